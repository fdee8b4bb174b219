//! Test utilities for building throwaway Go source trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding Go fixtures.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Read a file relative to the directory, if it exists.
    pub fn read(&self, path: &str) -> Option<String> {
        fs::read_to_string(self.dir.path().join(path)).ok()
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

/// A Go handler with the standard `net/http` signature.
///
/// `body` is inserted verbatim as the function body.
pub fn go_handler(name: &str, body: &str) -> String {
    format!(
        "func {}(w http.ResponseWriter, r *http.Request) {{\n{}\n}}\n",
        name, body
    )
}

/// A complete Go file in package `package` containing `decls`.
pub fn go_file(package: &str, decls: &[String]) -> String {
    let mut src = format!(
        "package {}\n\nimport (\n\t\"net/http\"\n\n\t\"github.com/gorilla/mux\"\n)\n",
        package
    );
    for decl in decls {
        src.push('\n');
        src.push_str(decl);
    }
    src
}
