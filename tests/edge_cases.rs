//! Edge case and error handling tests for handlerstub


use harness::{SERVER_GO, TestProject, run_handlerstub};
use std::fs;

// ============================================================================
// Fatal Errors
// ============================================================================

#[test]
fn test_syntax_error_aborts_run() {
    let project = TestProject::new();
    project.add_file("broken.go", "package main\n\nfunc Broken(w http.ResponseWriter {\n");
    project.add_file("server.go", SERVER_GO);

    let (_stdout, stderr, success) = run_handlerstub(project.path(), &["broken.go", "server.go"]);
    assert!(!success, "syntax error should fail the run");
    assert!(stderr.contains("broken.go:"), "{}", stderr);
    assert!(stderr.contains("syntax error"), "{}", stderr);
    assert!(
        !project.exists("server_test.go"),
        "files after the failing one must not be processed"
    );
}

#[test]
fn test_missing_package_clause_is_fatal() {
    let project = TestProject::new();
    project.add_file(
        "nopkg.go",
        "import \"net/http\"\n\nfunc H(w http.ResponseWriter, r *http.Request) {}\n",
    );

    let (_, stderr, success) = run_handlerstub(project.path(), &["nopkg.go"]);
    assert!(!success);
    assert!(stderr.contains("nopkg.go:"), "{}", stderr);
    assert!(!project.exists("nopkg_test.go"));
}

#[test]
fn test_missing_input_is_fatal() {
    let project = TestProject::new();

    let (_, stderr, success) = run_handlerstub(project.path(), &["nope.go"]);
    assert!(!success);
    assert!(stderr.contains("nope.go"), "{}", stderr);
}

#[test]
fn test_invalid_max_file_size() {
    let project = TestProject::new();
    project.add_file("server.go", SERVER_GO);

    let (_, stderr, success) =
        run_handlerstub(project.path(), &["--max-file-size", "lots", "server.go"]);
    assert!(!success);
    assert!(stderr.contains("invalid --max-file-size"), "{}", stderr);
}

#[test]
fn test_glob_without_matches_is_fatal() {
    let project = TestProject::new();

    let (_, stderr, success) = run_handlerstub(project.path(), &["missing/*.go"]);
    assert!(!success);
    assert!(stderr.contains("no files match"), "{}", stderr);
}

// ============================================================================
// Recoverable Errors
// ============================================================================

#[test]
fn test_missing_out_dir_is_skipped() {
    let project = TestProject::new();
    project.add_file("a.go", SERVER_GO);
    project.add_file("b.go", SERVER_GO);

    let (stdout, stderr, success) =
        run_handlerstub(project.path(), &["-o", "does-not-exist", "a.go", "b.go"]);
    assert!(success, "output creation failures are not fatal: {}", stderr);
    assert!(
        stderr.contains("error creating test file named"),
        "{}",
        stderr
    );
    assert_eq!(stderr.matches("error creating test file named").count(), 2);
    assert!(stdout.contains("2 skipped"), "{}", stdout);
}

#[test]
fn test_skipped_output_does_not_stop_later_files() {
    let project = TestProject::new();
    project.add_file("server.go", SERVER_GO);
    project.add_file("other.go", SERVER_GO);
    // A directory where the first companion file should go
    fs::create_dir(project.path().join("server_test.go")).unwrap();

    let (_, stderr, success) = run_handlerstub(project.path(), &["server.go", "other.go"]);
    assert!(success, "{}", stderr);
    assert!(stderr.contains("server_test.go"), "{}", stderr);
    assert!(project.read("other_test.go").contains("func TestGetUser"));
}

#[test]
fn test_file_over_size_limit_is_skipped() {
    let project = TestProject::new();
    let mut big = String::from(SERVER_GO);
    big.push_str(&"// padding\n".repeat(200));
    project.add_file("a.go", SERVER_GO);
    project.add_file("big.go", &big);
    project.add_file("c.go", SERVER_GO);

    let (stdout, stderr, success) = run_handlerstub(
        project.path(),
        &["--max-file-size", "1K", "a.go", "big.go", "c.go"],
    );
    assert!(success, "oversized inputs are not fatal: {}", stderr);
    assert!(stderr.contains("big.go"), "{}", stderr);
    assert!(project.exists("a_test.go"));
    assert!(!project.exists("big_test.go"));
    assert!(project.exists("c_test.go"), "files after the oversized one are processed");
    assert!(
        stdout.contains("2 files scanned, 2 handlers found, 2 files generated, 1 skipped"),
        "{}",
        stdout
    );
}

// ============================================================================
// Signature Shapes
// ============================================================================

#[test]
fn test_request_by_value_is_not_a_handler() {
    let project = TestProject::new();
    project.add_file(
        "value.go",
        "package main\n\nimport \"net/http\"\n\nfunc ByValue(w http.ResponseWriter, r http.Request) {}\n",
    );

    let (_, stderr, success) = run_handlerstub(project.path(), &["value.go"]);
    assert!(success, "{}", stderr);
    assert!(!project.exists("value_test.go"));
}

#[test]
fn test_missing_writer_is_not_a_handler() {
    let project = TestProject::new();
    project.add_file(
        "nowriter.go",
        "package main\n\nimport \"net/http\"\n\nfunc OnlyRequest(r *http.Request) {}\n",
    );

    let (_, stderr, success) = run_handlerstub(project.path(), &["nowriter.go"]);
    assert!(success, "{}", stderr);
    assert!(!project.exists("nowriter_test.go"));
}

#[test]
fn test_methods_are_not_handlers() {
    let project = TestProject::new();
    project.add_file(
        "methods.go",
        r#"package main

import "net/http"

type Server struct{}

func (s *Server) ServeHTTP(w http.ResponseWriter, r *http.Request) {}
"#,
    );

    let (_, stderr, success) = run_handlerstub(project.path(), &["methods.go"]);
    assert!(success, "{}", stderr);
    assert!(!project.exists("methods_test.go"));
}

#[test]
fn test_route_vars_in_nested_blocks_ignored() {
    let project = TestProject::new();
    project.add_file(
        "nested.go",
        r#"package main

import (
	"net/http"

	"github.com/gorilla/mux"
)

func Nested(w http.ResponseWriter, r *http.Request) {
	if r.Method == http.MethodPost {
		_ = mux.Vars(r)["inner"]
	}
	switch r.Method {
	case http.MethodGet:
		_ = mux.Vars(r)["insidecase"]
	}
	_ = mux.Vars(r)["outer"]
}
"#,
    );

    let (_, stderr, success) = run_handlerstub(project.path(), &["nested.go"]);
    assert!(success, "{}", stderr);
    let generated = fs::read_to_string(project.path().join("nested_test.go")).unwrap();
    assert!(generated.contains("[]string{\"outer\"}"), "{}", generated);
    assert!(!generated.contains("inner"), "{}", generated);
    assert!(!generated.contains("insidecase"), "{}", generated);
}

#[test]
fn test_byte_order_mark_is_tolerated() {
    let project = TestProject::new();
    project.add_file("bom.go", &format!("\u{feff}{}", SERVER_GO));

    let (_, stderr, success) = run_handlerstub(project.path(), &["bom.go"]);
    assert!(success, "{}", stderr);
    assert!(project.exists("bom_test.go"));
}

#[test]
fn test_empty_file_is_fatal() {
    let project = TestProject::new();
    project.add_file("empty.go", "");

    let (_, _, success) = run_handlerstub(project.path(), &["empty.go"]);
    assert!(!success, "a file without a package clause cannot be parsed");
}
