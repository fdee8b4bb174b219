//! Output file naming

use std::path::{Path, PathBuf};

use crate::file_utils::{GO_EXTENSION, TEST_SUFFIX};

/// Name of the companion test file for `source`: `server.go` -> `server_test.go`.
///
/// Only the base name is used, with its last extension removed. A name
/// without an extension keeps its full base name (`Makefile` ->
/// `Makefile_test.go`).
pub fn test_file_name(source: &Path) -> String {
    let base = source
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base.as_str(),
    };
    format!("{}{}.{}", stem, TEST_SUFFIX, GO_EXTENSION)
}

/// Where the companion test file for `source` is written.
pub fn output_path(out_dir: &Path, source: &Path) -> PathBuf {
    out_dir.join(test_file_name(source))
}
