//! handlerstub - generate Go test stubs for net/http handlers
//!
//! Functions are recognized as handlers by the shape of their parameters
//! (`pkg.ResponseWriter` plus `*http.Request`), and the route variables each
//! one reads through `mux.Vars` are recorded alongside.

pub mod config;
pub mod error;
pub mod extractors;
pub mod file_utils;
pub mod generator;
pub mod inputs;
pub mod matcher;
pub mod output;
pub mod syntax;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use extractors::{AccessorSpec, RouteVarsExtractor};
pub use generator::{FileOutcome, Generator};
pub use inputs::collect_inputs;
pub use matcher::SignatureMatcher;
pub use output::{RunSummary, print_json, print_summary, print_written};
pub use types::{FileClassificationResult, HandlerDescriptor};
