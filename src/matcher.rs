//! Signature matching: which top-level functions are HTTP handlers
//!
//! A function is handler-shaped when its parameters include both
//!
//! - a qualified type whose name is `ResponseWriter` (any package), and
//! - a pointer to the qualified type `http.Request`.
//!
//! The check is purely structural. Imports are not resolved, so a
//! `ResponseWriter` from any package matches, while a by-value `http.Request`,
//! a type alias, or a dot-imported `Request` does not. Methods are never
//! considered since only `function_declaration` nodes are classified.

use std::path::Path;

use tracing::debug;
use tree_sitter::Node;

use crate::error::Result;
use crate::extractors::{Extractor, RouteVarsExtractor};
use crate::syntax::{SourceFile, node_text};
use crate::types::{FileClassificationResult, HandlerDescriptor};

/// Shape of one parameter type, as far as the handler predicate cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamShape {
    /// `pkg.ResponseWriter`
    ResponseWriter,
    /// `*http.Request`
    RequestPointer,
    Other,
}

/// Classifies the functions of Go source files.
#[derive(Debug, Clone, Default)]
pub struct SignatureMatcher {
    route_vars: RouteVarsExtractor,
}

impl SignatureMatcher {
    pub fn new(route_vars: RouteVarsExtractor) -> Self {
        Self { route_vars }
    }

    /// Parse `source` and classify its top-level functions.
    ///
    /// A file without handlers yields an empty result, not an error. Only a
    /// syntax error fails.
    pub fn classify_source(&self, path: &Path, source: &str) -> Result<FileClassificationResult> {
        let file = SourceFile::parse(path, source)?;
        Ok(self.classify(&file))
    }

    /// Classify an already parsed file.
    pub fn classify(&self, file: &SourceFile) -> FileClassificationResult {
        let source = file.bytes();
        let mut result = FileClassificationResult::new(file.package_name().unwrap_or_default());

        let root = file.root();
        let mut cursor = root.walk();
        for decl in root.named_children(&mut cursor) {
            if decl.kind() != "function_declaration" {
                continue;
            }
            let Some(name) = decl.child_by_field_name("name") else {
                continue;
            };
            let name = node_text(name, source);

            if !is_handler_shaped(decl, source) {
                debug!(function = name, "not handler-shaped");
                continue;
            }

            let route_variables = decl
                .child_by_field_name("body")
                .map(|body| self.route_vars.extract(body, source))
                .unwrap_or_default();
            debug!(
                function = name,
                extractor = self.route_vars.name(),
                accessor = %self.route_vars.accessor(),
                route_variables = ?route_variables,
                "matched handler"
            );
            result
                .handlers
                .push(HandlerDescriptor::new(name, route_variables));
        }

        result
    }
}

/// The handler shape predicate for one `function_declaration`.
fn is_handler_shaped(func: Node, source: &[u8]) -> bool {
    let Some(params) = func.child_by_field_name("parameters") else {
        return false;
    };

    let mut has_writer = false;
    let mut has_request = false;
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        // Variadic parameters have a different type (a slice) and never match
        if param.kind() != "parameter_declaration" {
            continue;
        }
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        match param_shape(ty, source) {
            ParamShape::ResponseWriter => has_writer = true,
            ParamShape::RequestPointer => has_request = true,
            ParamShape::Other => {}
        }
    }

    has_writer && has_request
}

fn param_shape(ty: Node, source: &[u8]) -> ParamShape {
    match ty.kind() {
        "qualified_type" => match qualified_parts(ty, source) {
            Some((_, "ResponseWriter")) => ParamShape::ResponseWriter,
            _ => ParamShape::Other,
        },
        "pointer_type" => {
            let target = ty.named_child(0);
            match target
                .filter(|t| t.kind() == "qualified_type")
                .and_then(|t| qualified_parts(t, source))
            {
                Some(("http", "Request")) => ParamShape::RequestPointer,
                _ => ParamShape::Other,
            }
        }
        _ => ParamShape::Other,
    }
}

/// `(package, name)` of a `qualified_type` node.
fn qualified_parts<'a>(ty: Node, source: &'a [u8]) -> Option<(&'a str, &'a str)> {
    let package = ty.child_by_field_name("package")?;
    let name = ty.child_by_field_name("name")?;
    Some((node_text(package, source), node_text(name, source)))
}
