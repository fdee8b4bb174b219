//! JSON output formatting

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::types::FileClassificationResult;

/// One JSON record per classified source file.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub source: String,
    #[serde(flatten)]
    pub result: &'a FileClassificationResult,
}

impl<'a> JsonReport<'a> {
    pub fn new(source: &Path, result: &'a FileClassificationResult) -> Self {
        Self {
            source: source.display().to_string(),
            result,
        }
    }
}

/// Write a classification result as a single line of JSON.
pub fn write_json<W: Write>(out: &mut W, source: &Path, result: &FileClassificationResult) -> io::Result<()> {
    let json = serde_json::to_string(&JsonReport::new(source, result)).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

/// Print a classification result as JSON to stdout.
pub fn print_json(source: &Path, result: &FileClassificationResult) -> io::Result<()> {
    write_json(&mut io::stdout().lock(), source, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandlerDescriptor;

    #[test]
    fn test_json_record_is_flat() {
        let mut result = FileClassificationResult::new("main");
        result
            .handlers
            .push(HandlerDescriptor::new("GetUser", vec!["id".to_string()]));

        let mut buf = Vec::new();
        write_json(&mut buf, Path::new("server.go"), &result).unwrap();
        let line = String::from_utf8(buf).unwrap();

        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["source"], "server.go");
        assert_eq!(value["package_name"], "main");
        assert_eq!(value["handlers"][0]["name"], "GetUser");
        assert_eq!(value["handlers"][0]["route_variables"][0], "id");
        assert!(line.ends_with('\n'));
    }
}
