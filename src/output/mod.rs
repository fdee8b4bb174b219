//! Rendering and writing of generated test stubs
//!
//! # Module Structure
//!
//! - `template` - the embedded stub template and its renderer
//! - `naming` - companion file naming
//! - `writer` - creating and filling the companion file
//! - `json` - JSON records for `--json`
//! - `report` - colored per-file lines and the run summary

mod json;
mod naming;
mod report;
mod template;
mod writer;

pub use json::{JsonReport, print_json, write_json};
pub use naming::{output_path, test_file_name};
pub use report::{RunSummary, print_summary, print_written};
pub use template::{RenderContext, STUB_TEMPLATE, Template, stub_template};
pub use writer::{render_context, render_to_string, write_companion};
