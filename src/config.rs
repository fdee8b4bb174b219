//! Generator configuration

use std::path::PathBuf;

use crate::extractors::AccessorSpec;
use crate::file_utils::DEFAULT_MAX_FILE_SIZE;

/// Settings for one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory companion files are written to
    pub out_dir: PathBuf,
    /// Call that returns route variables
    pub accessor: AccessorSpec,
    /// Classify only; never create files
    pub dry_run: bool,
    /// Inputs larger than this many bytes are rejected
    pub max_file_size: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            accessor: AccessorSpec::default(),
            dry_run: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
pub fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))
}
