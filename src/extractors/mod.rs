//! Extraction of handler metadata from function bodies
//!
//! The matcher decides *which* functions are handlers; extractors decide what
//! to report about each one. An extractor only ever sees the body block of a
//! function that already passed the handler shape check.

pub mod route_vars;

use tree_sitter::Node;

pub use route_vars::{AccessorSpec, RouteVarsExtractor};

/// Base trait for body extractors.
pub trait Extractor {
    /// The output type produced by this extractor.
    type Output;

    /// Extract metadata from a function body (a `block` node).
    fn extract(&self, body: Node, source: &[u8]) -> Self::Output;

    /// Get a descriptive name for this extractor (e.g., "route-vars").
    fn name(&self) -> &'static str;
}

/// Statements directly inside a `block`, in source order.
///
/// Comments are skipped. Grammar versions that wrap the statements in a
/// `statement_list` node are flattened.
pub fn top_level_statements(block: Node) -> Vec<Node> {
    let mut statements = Vec::new();
    let mut cursor = block.walk();
    for child in block.named_children(&mut cursor) {
        match child.kind() {
            "comment" => {}
            "statement_list" => {
                let mut inner = child.walk();
                statements.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|n| n.kind() != "comment"),
                );
            }
            _ => statements.push(child),
        }
    }
    statements
}
