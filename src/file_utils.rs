//! Source file reading and Go file classification
//!
//! Reading goes through a size limit so that a stray multi-megabyte generated
//! file cannot stall a run.

use std::path::Path;

use crate::error::{Error, Result};

/// Default maximum input size (1MB, matching `--max-file-size 1M`).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Extension of Go source files, without the dot.
pub const GO_EXTENSION: &str = "go";

/// Suffix Go uses for test files, before the extension.
pub const TEST_SUFFIX: &str = "_test";

/// Read a source file as UTF-8, enforcing `max_size`.
///
/// A leading byte order mark is dropped; Go permits one but the parser
/// does not expect it.
pub fn read_source_file(path: &Path, max_size: u64) -> Result<String> {
    let metadata = path.metadata().map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > max_size {
        return Err(Error::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_size,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Whether `path` names a `.go` file (case-insensitive extension).
pub fn is_go_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(GO_EXTENSION))
}

/// Whether `path` is a Go test file such as `server_test.go`.
pub fn is_go_test_file(path: &Path) -> bool {
    is_go_source(path)
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with(TEST_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_source_file_success() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("main.go");
        fs::write(&file_path, "package main\n").unwrap();

        let content = read_source_file(&file_path, DEFAULT_MAX_FILE_SIZE).unwrap();
        assert_eq!(content, "package main\n");
    }

    #[test]
    fn test_read_source_file_nonexistent() {
        let err = read_source_file(Path::new("/nonexistent/file.go"), DEFAULT_MAX_FILE_SIZE)
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_oversized_file_is_skippable() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("huge.pb.go");
        fs::write(&file_path, "package p\n").unwrap();

        let err = read_source_file(&file_path, 4).unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_file_exceeding_limit() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("big.go");
        fs::write(&file_path, "package main\n// padding\n").unwrap();

        let err = read_source_file(&file_path, 10).unwrap_err();
        match err {
            Error::TooLarge { size, limit, .. } => {
                assert_eq!(limit, 10);
                assert!(size > 10);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_file_at_exact_limit() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("exact.go");
        fs::write(&file_path, "package p\n").unwrap();

        assert!(read_source_file(&file_path, 10).is_ok());
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("invalid.go");
        fs::write(&file_path, [0xFF, 0xFE, 0x00, 0x01]).unwrap();

        assert!(matches!(
            read_source_file(&file_path, DEFAULT_MAX_FILE_SIZE),
            Err(Error::Read { .. })
        ));
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("bom.go");

        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(b"package main\n");
        fs::write(&file_path, &content).unwrap();

        let text = read_source_file(&file_path, DEFAULT_MAX_FILE_SIZE).unwrap();
        assert_eq!(text, "package main\n");
    }

    #[test]
    fn test_is_go_source() {
        assert!(is_go_source(Path::new("server.go")));
        assert!(is_go_source(Path::new("dir/Server.GO")));
        assert!(!is_go_source(Path::new("server.rs")));
        assert!(!is_go_source(Path::new("go")));
        assert!(!is_go_source(Path::new("Makefile")));
    }

    #[test]
    fn test_is_go_test_file() {
        assert!(is_go_test_file(Path::new("server_test.go")));
        assert!(!is_go_test_file(Path::new("server.go")));
        assert!(!is_go_test_file(Path::new("testdata.go")));
        assert!(!is_go_test_file(Path::new("server_test.rs")));
    }
}
