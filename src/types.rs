//! Classification results shared by the matcher and the renderer

use serde::Serialize;

/// A function recognized as an HTTP handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerDescriptor {
    /// Declared identifier of the function
    pub name: String,
    /// Route variable names read by the body, in encounter order (duplicates kept)
    pub route_variables: Vec<String>,
}

impl HandlerDescriptor {
    pub fn new(name: impl Into<String>, route_variables: Vec<String>) -> Self {
        Self {
            name: name.into(),
            route_variables,
        }
    }
}

/// Everything the matcher learned about one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileClassificationResult {
    /// Declared package of the file
    pub package_name: String,
    /// Matched handlers in declaration order
    pub handlers: Vec<HandlerDescriptor>,
}

impl FileClassificationResult {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            handlers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names in declaration order.
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name.as_str()).collect()
    }

    /// File-level route variable list: that of the last handler in
    /// declaration order, empty when there are no handlers. Each handler's
    /// own list is on its descriptor.
    pub fn route_variables(&self) -> Vec<&str> {
        self.handlers
            .last()
            .map(|h| h.route_variables.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_views_preserve_order() {
        let mut result = FileClassificationResult::new("main");
        result.handlers.push(HandlerDescriptor::new(
            "ListUsers",
            vec![],
        ));
        result.handlers.push(HandlerDescriptor::new(
            "GetUser",
            vec!["id".to_string(), "id".to_string()],
        ));
        result
            .handlers
            .push(HandlerDescriptor::new("GetPost", vec!["slug".to_string()]));

        assert_eq!(result.handler_names(), ["ListUsers", "GetUser", "GetPost"]);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_file_level_route_variables_come_from_last_handler() {
        let mut result = FileClassificationResult::new("main");
        assert!(result.route_variables().is_empty());

        result.handlers.push(HandlerDescriptor::new(
            "GetOrg",
            vec!["org".to_string()],
        ));
        result.handlers.push(HandlerDescriptor::new(
            "GetRepo",
            vec!["org".to_string(), "repo".to_string()],
        ));
        assert_eq!(result.route_variables(), ["org", "repo"]);

        result.handlers.push(HandlerDescriptor::new("Health", vec![]));
        assert!(result.route_variables().is_empty());
    }

    #[test]
    fn test_serializes_field_names() {
        let mut result = FileClassificationResult::new("api");
        result
            .handlers
            .push(HandlerDescriptor::new("Health", Vec::new()));
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"package_name":"api","handlers":[{"name":"Health","route_variables":[]}]}"#
        );
    }
}
