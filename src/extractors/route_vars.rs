//! Route variable extraction
//!
//! Routers in the gorilla/mux family expose path variables through an
//! accessor that takes the request and returns a `map[string]string`:
//!
//! ```go
//! id := mux.Vars(r)["id"]
//!
//! vars := mux.Vars(r)
//! slug := vars["slug"]
//! ```
//!
//! Every string-keyed read of that map is reported, in source order and with
//! duplicates. Only the direct statement list of the body is scanned: nested
//! blocks (branches, loops, closures, `switch` and `select` clauses) are not
//! entered, and there is no
//! control-flow or data-flow analysis beyond tracking locals bound to the
//! accessor at the top level.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tree_sitter::Node;

use super::{Extractor, top_level_statements};
use crate::syntax::{node_text, string_literal_value, unparen};

/// The `module.Func` accessor that returns route variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorSpec {
    pub module: String,
    pub function: String,
}

impl Default for AccessorSpec {
    fn default() -> Self {
        Self {
            module: "mux".to_string(),
            function: "Vars".to_string(),
        }
    }
}

impl FromStr for AccessorSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, function) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| format!("expected MODULE.FUNC, got '{}'", s))?;
        for part in [module, function] {
            if !is_go_identifier(part) {
                return Err(format!("'{}' is not a Go identifier", part));
            }
        }
        Ok(Self {
            module: module.to_string(),
            function: function.to_string(),
        })
    }
}

impl fmt::Display for AccessorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.function)
    }
}

fn is_go_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Collects route variable names from a handler body.
#[derive(Debug, Clone, Default)]
pub struct RouteVarsExtractor {
    accessor: AccessorSpec,
}

impl RouteVarsExtractor {
    pub fn new(accessor: AccessorSpec) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> &AccessorSpec {
        &self.accessor
    }
}

impl Extractor for RouteVarsExtractor {
    type Output = Vec<String>;

    fn extract(&self, body: Node, source: &[u8]) -> Vec<String> {
        let mut scan = BodyScan {
            accessor: &self.accessor,
            source,
            bound: HashSet::new(),
            vars: Vec::new(),
        };
        for statement in top_level_statements(body) {
            scan.visit(statement);
            scan.update_bindings(statement);
        }
        scan.vars
    }

    fn name(&self) -> &'static str {
        "route-vars"
    }
}

/// Nodes whose statements belong to a nested scope. Case clauses hold their
/// statements directly rather than in a `block`.
const NESTED_BODIES: &[&str] = &[
    "block",
    "expression_case",
    "type_case",
    "communication_case",
    "default_case",
];

struct BodyScan<'a> {
    accessor: &'a AccessorSpec,
    source: &'a [u8],
    /// Locals currently holding the accessor's result
    bound: HashSet<String>,
    vars: Vec<String>,
}

impl BodyScan<'_> {
    /// Pre-order walk of one top-level statement, stopping at nested blocks
    /// and at the clauses of `switch` and `select` statements.
    fn visit(&mut self, node: Node) {
        if NESTED_BODIES.contains(&node.kind()) {
            return;
        }
        if node.kind() == "index_expression" {
            if let Some(key) = self.route_var_read(node) {
                self.vars.push(key);
            }
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child);
        }
    }

    /// `mux.Vars(r)["id"]` or `vars["id"]` with `vars` bound to the accessor.
    fn route_var_read(&self, index_expr: Node) -> Option<String> {
        let operand = unparen(index_expr.child_by_field_name("operand")?);
        let reads_accessor = self.is_accessor_call(operand)
            || (operand.kind() == "identifier"
                && self.bound.contains(node_text(operand, self.source)));
        if !reads_accessor {
            return None;
        }
        let index = unparen(index_expr.child_by_field_name("index")?);
        string_literal_value(index, self.source)
    }

    fn is_accessor_call(&self, node: Node) -> bool {
        let node = unparen(node);
        if node.kind() != "call_expression" {
            return false;
        }
        let Some(function) = node.child_by_field_name("function").map(unparen) else {
            return false;
        };
        if function.kind() != "selector_expression" {
            return false;
        }
        let operand = function.child_by_field_name("operand");
        let field = function.child_by_field_name("field");
        match (operand, field) {
            (Some(operand), Some(field)) => {
                operand.kind() == "identifier"
                    && node_text(operand, self.source) == self.accessor.module
                    && node_text(field, self.source) == self.accessor.function
            }
            _ => false,
        }
    }

    /// Track `vars := mux.Vars(r)`, `vars = mux.Vars(r)` and
    /// `var vars = mux.Vars(r)`; rebinding a name to anything else forgets it.
    fn update_bindings(&mut self, statement: Node) {
        match statement.kind() {
            "short_var_declaration" | "assignment_statement" => {
                let (Some(left), Some(right)) = (
                    statement.child_by_field_name("left"),
                    statement.child_by_field_name("right"),
                ) else {
                    return;
                };
                let names = named_list(left);
                let values = named_list(right);
                self.bind_pairs(&names, &values);
            }
            "var_declaration" => {
                for spec in var_specs(statement) {
                    let mut cursor = spec.walk();
                    let names: Vec<Node> = spec.children_by_field_name("name", &mut cursor).collect();
                    let values = spec
                        .child_by_field_name("value")
                        .map(named_list)
                        .unwrap_or_default();
                    self.bind_pairs(&names, &values);
                }
            }
            _ => {}
        }
    }

    fn bind_pairs(&mut self, names: &[Node], values: &[Node]) {
        for (i, name) in names.iter().enumerate() {
            if name.kind() != "identifier" {
                continue;
            }
            let name = node_text(*name, self.source).to_string();
            // `a, b := f()` has fewer values than names; none of them is the map
            let is_accessor = names.len() == values.len()
                && values.get(i).is_some_and(|v| self.is_accessor_call(*v));
            if is_accessor {
                self.bound.insert(name);
            } else {
                self.bound.remove(&name);
            }
        }
    }
}

fn named_list(list: Node) -> Vec<Node> {
    if list.kind() != "expression_list" {
        return vec![list];
    }
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn var_specs(declaration: Node) -> Vec<Node> {
    let mut specs = Vec::new();
    let mut cursor = declaration.walk();
    for child in declaration.named_children(&mut cursor) {
        match child.kind() {
            "var_spec" => specs.push(child),
            "var_spec_list" => {
                let mut inner = child.walk();
                specs.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|n| n.kind() == "var_spec"),
                );
            }
            _ => {}
        }
    }
    specs
}
