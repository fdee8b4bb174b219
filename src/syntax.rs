//! Go parsing with tree-sitter
//!
//! Wraps a `tree_sitter::Parser` configured for Go and provides the small set
//! of node helpers the matcher and extractors share.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{Error, Result};

/// A parsed Go source file.
pub struct SourceFile {
    source: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse `source`, failing with `Error::Parse` on any syntax error.
    ///
    /// tree-sitter recovers from errors by inserting `ERROR` and missing
    /// nodes; such a tree is rejected rather than classified partially.
    pub fn parse(path: &Path, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;

        let tree = parser.parse(&source, None).ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
            message: "parser produced no tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let bad = first_error(root).unwrap_or(root);
            let pos = bad.start_position();
            let message = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                let snippet = node_text(bad, source.as_bytes())
                    .lines()
                    .next()
                    .unwrap_or("")
                    .trim();
                format!("unexpected '{}'", truncate(snippet, 40))
            };
            return Err(Error::Parse {
                path: path.to_path_buf(),
                line: pos.row + 1,
                column: pos.column + 1,
                message,
            });
        }

        let file = Self { source, tree };
        if file.package_name().is_none() {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                line: 1,
                column: 1,
                message: "expected 'package'".to_string(),
            });
        }
        Ok(file)
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    /// Identifier from the `package` clause, if present.
    pub fn package_name(&self) -> Option<&str> {
        let root = self.root();
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;
        let mut cursor = clause.walk();
        let ident = clause
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_identifier")?;
        ident.utf8_text(self.bytes()).ok()
    }
}

/// Depth-first search for the first `ERROR` or missing node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find_map(first_error)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Source text of a node, empty if it is not valid UTF-8.
pub fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Strip parentheses around an expression: `((x))` -> `x`.
pub fn unparen(mut node: Node) -> Node {
    while node.kind() == "parenthesized_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Value of a Go string literal node, or `None` for any other node.
///
/// Raw literals are returned verbatim; interpreted literals have their
/// escapes decoded.
pub fn string_literal_value(node: Node, source: &[u8]) -> Option<String> {
    let text = node_text(node, source);
    match node.kind() {
        "raw_string_literal" => text
            .strip_prefix('`')
            .and_then(|t| t.strip_suffix('`'))
            .map(str::to_string),
        "interpreted_string_literal" => text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .map(unescape),
        _ => None,
    }
}

/// Decode the escapes of an interpreted string literal body.
///
/// Byte escapes (`\x69`, `\151`) are collected as raw bytes so that multi-byte
/// sequences like `\xc3\xa9` decode to one character; invalid UTF-8 becomes
/// U+FFFD. An unknown or truncated escape is kept as written.
fn unescape(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('\\') {
        bytes.extend_from_slice(rest[..pos].as_bytes());
        let escape = &rest[pos + 1..];
        match decode_escape(escape) {
            Some((Escaped::Byte(b), used)) => {
                bytes.push(b);
                rest = &escape[used..];
            }
            Some((Escaped::Char(c), used)) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                rest = &escape[used..];
            }
            None => {
                bytes.push(b'\\');
                rest = escape;
            }
        }
    }
    bytes.extend_from_slice(rest.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

enum Escaped {
    Byte(u8),
    Char(char),
}

/// Decode one escape from the text following a backslash, returning the
/// value and the number of bytes it spans.
fn decode_escape(escape: &str) -> Option<(Escaped, usize)> {
    let first = escape.chars().next()?;
    let simple = match first {
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    };
    if let Some(c) = simple {
        return Some((Escaped::Char(c), 1));
    }

    let digits = |start: usize, count: usize, radix: u32| -> Option<u32> {
        let text = escape.get(start..start + count)?;
        if !text.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        u32::from_str_radix(text, radix).ok()
    };

    match first {
        'x' => digits(1, 2, 16).map(|v| (Escaped::Byte(v as u8), 3)),
        '0'..='7' => digits(0, 3, 8)
            .filter(|v| *v <= 0xFF)
            .map(|v| (Escaped::Byte(v as u8), 3)),
        'u' => digits(1, 4, 16)
            .and_then(char::from_u32)
            .map(|c| (Escaped::Char(c), 5)),
        'U' => digits(1, 8, 16)
            .and_then(char::from_u32)
            .map(|c| (Escaped::Char(c), 9)),
        _ => None,
    }
}
