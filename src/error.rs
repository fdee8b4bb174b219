//! Error types for handlerstub
//!
//! Failures fall into two classes. Fatal errors (unreadable or unparseable
//! input, a broken template, an output that cannot be finalized) abort the
//! whole run. Oversized inputs and output creation errors only abandon the
//! file at hand; the remaining inputs are still processed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file exceeds the configured size limit.
    #[error("'{}' is {size} bytes, larger than the {limit} byte limit", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The input is not syntactically valid Go.
    #[error("{}:{line}:{column}: syntax error: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The destination file could not be created.
    #[error("error creating test file named: {}: {source}", path.display())]
    OutputCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Filling the template or flushing the output failed.
    #[error("error rendering '{}': {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The embedded template is malformed.
    #[error("invalid template: {0}")]
    Template(String),

    /// An input argument did not resolve to any source file.
    #[error("{0}")]
    Input(String),

    /// The tree-sitter grammar could not be loaded.
    #[error("cannot load Go grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

impl Error {
    /// Whether this error aborts the run.
    ///
    /// `TooLarge` and `OutputCreation` are recoverable: the current file is
    /// skipped and processing continues with the next input.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::TooLarge { .. } | Error::OutputCreation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_creation_is_recoverable() {
        let err = Error::OutputCreation {
            path: PathBuf::from("server_test.go"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("server_test.go"));
    }

    #[test]
    fn test_oversized_input_is_recoverable() {
        let err = Error::TooLarge {
            path: PathBuf::from("api.pb.go"),
            size: 2_000_000,
            limit: 1_048_576,
        };
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_parse_and_render_are_fatal() {
        let parse = Error::Parse {
            path: PathBuf::from("server.go"),
            line: 3,
            column: 7,
            message: "unexpected token".to_string(),
        };
        assert!(parse.is_fatal());
        assert_eq!(
            parse.to_string(),
            "server.go:3:7: syntax error: unexpected token"
        );

        let render = Error::Render {
            path: PathBuf::from("server_test.go"),
            source: io::Error::other("disk full"),
        };
        assert!(render.is_fatal());
        assert!(Error::Template("unclosed section".into()).is_fatal());
    }
}
