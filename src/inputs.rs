//! Resolving command-line arguments to source files
//!
//! Each argument is one of:
//!
//! - a file, used as given regardless of extension;
//! - a directory, walked recursively (respecting `.gitignore`) for `.go`
//!   files that are not themselves `_test.go` files;
//! - a glob pattern such as `handlers/*.go`, expanded in sorted order.
//!
//! Paths that do not exist are passed through untouched so that reading them
//! fails with the usual read error.

use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::file_utils::{is_go_source, is_go_test_file};

/// Expand `args` into the ordered list of files to process.
///
/// `exclude` holds file-name patterns applied while walking directories.
pub fn collect_inputs(args: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let exclude = compile_patterns(exclude)?;
    let mut files = Vec::new();

    for arg in args {
        if arg.is_dir() {
            files.extend(walk_go_files(arg, &exclude));
        } else if !arg.exists() && is_glob(arg) {
            files.extend(expand_glob(arg, &exclude)?);
        } else {
            files.push(arg.clone());
        }
    }

    Ok(files)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::Input(format!("invalid exclude pattern '{}': {}", p, e)))
        })
        .collect()
}

fn is_glob(path: &Path) -> bool {
    path.to_string_lossy().contains(['*', '?', '['])
}

fn is_excluded(path: &Path, exclude: &[Pattern]) -> bool {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    exclude.iter().any(|p| p.matches(&name))
}

/// Go sources under `root`, sorted, skipping test files and excluded names.
fn walk_go_files(root: &Path, exclude: &[Pattern]) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .ignore(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    let mut files: Vec<PathBuf> = walker
        .flatten()
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter(|path| is_go_source(path) && !is_go_test_file(path))
        .filter(|path| !is_excluded(path, exclude))
        .collect();
    files.sort();

    debug!(root = %root.display(), count = files.len(), "collected go files");
    files
}

fn expand_glob(pattern: &Path, exclude: &[Pattern]) -> Result<Vec<PathBuf>> {
    let pattern_str = pattern.to_string_lossy();
    let entries = glob::glob(&pattern_str)
        .map_err(|e| Error::Input(format!("invalid pattern '{}': {}", pattern_str, e)))?;

    let mut files = Vec::new();
    for path in entries.flatten() {
        if path.is_dir() {
            files.extend(walk_go_files(&path, exclude));
        } else if !is_excluded(&path, exclude) {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(Error::Input(format!("no files match '{}'", pattern_str)));
    }
    files.sort();
    Ok(files)
}
