//! CLI contract tests
//!
//! Run the `dualgen` binary on the IR fixtures in `tests/fixtures/` and check the text contracts
//! other tools depend on: `Parse error at`, `Check passed`, `Check failed`, `error[`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn dualgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dualgen"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to run dualgen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dualgen_cli_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

// ============================================================================
// parse
// ============================================================================

#[test]
fn parse_prints_summary() {
    let path = fixture("rename_foo.json");
    let output = dualgen(&["parse", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        r#"{"name":"RenameFoo","kind":"plugin","uses":0,"items":1,"functions":1}"#
    );
}

#[test]
fn parse_error_is_one_line() {
    let path = fixture("broken.json");
    let output = dualgen(&["parse", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 1, "{}", out);
    assert!(out.starts_with("Parse error at 3:"), "{}", out);
}

#[test]
fn missing_file_fails_on_stderr() {
    let output = dualgen(&["parse", "/definitely/not/here.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn check_passes_valid_program() {
    let path = fixture("rename_foo.json");
    let output = dualgen(&["check", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), "Check passed");
}

#[test]
fn check_reports_backend_error() {
    let path = fixture("power.json");
    let output = dualgen(&["check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("Check failed"));
    assert_eq!(
        lines.next(),
        Some("error[E0201]: unsupported construct operator `**` for the swc backend")
    );
    assert_eq!(lines.next(), Some("  --> 4:17"));
}

#[test]
fn check_reports_validation_errors() {
    let path = fixture("duplicate.json");
    let output = dualgen(&["check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("Check failed\n"), "{}", out);
    assert!(out.contains("error[E0111]: `visit_identifier` is declared more than once in `Twice`"), "{}", out);
    assert!(out.contains("error[E0112]:"), "{}", out);
}

#[test]
fn check_passes_with_warnings() {
    let path = fixture("unbound.json");
    let output = dualgen(&["check", path.to_str().unwrap()]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Check passed\n"), "{}", out);
    assert!(out.contains("warning[W0301]: `visit_mystery`"), "{}", out);
}

#[test]
fn check_of_unparsable_file_fails() {
    let path = fixture("broken.json");
    let output = dualgen(&["check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("Check failed\nerror[E0101]: Parse error at 3:"), "{}", out);
}

// ============================================================================
// build
// ============================================================================

#[test]
fn build_writes_both_files() {
    let dir = scratch_dir("build_ok");
    let path = fixture("rename_foo.json");
    let output = dualgen(&["build", path.to_str().unwrap(), "--output", dir.to_str().unwrap(), "--manifest"]);
    assert!(output.status.success(), "{}", stdout(&output));

    let js = std::fs::read_to_string(dir.join("index.js")).unwrap();
    assert!(js.contains("function RenameFoo({ types: t })"));
    assert!(js.contains("Identifier(path) {"));
    let rs = std::fs::read_to_string(dir.join("lib.rs")).unwrap();
    assert!(rs.contains("fn visit_mut_ident("));
    let manifest = std::fs::read_to_string(dir.join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"rename_foo\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn build_with_failing_backend_writes_only_the_other() {
    let dir = scratch_dir("build_partial");
    let path = fixture("power.json");
    let output = dualgen(&["build", path.to_str().unwrap(), "--output", dir.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("error[E0201]"));
    assert!(dir.join("index.js").exists());
    assert!(!dir.join("lib.rs").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn build_rejects_parent_output_dir() {
    let path = fixture("rename_foo.json");
    let output = dualgen(&["build", path.to_str().unwrap(), "--output", "../escape"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("path traversal"));
}

// ============================================================================
// emit
// ============================================================================

#[test]
fn emit_prints_one_backend() {
    let path = fixture("rename_foo.json");
    let output = dualgen(&["emit", path.to_str().unwrap(), "--target", "babel", "--esm"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("// Generated by dualgen from `RenameFoo`."), "{}", out);
    assert!(out.trim_end().ends_with("export default RenameFoo;"), "{}", out);
}

#[test]
fn emit_swc_is_valid_rust() {
    let path = fixture("rename_foo.json");
    let output = dualgen(&["emit", path.to_str().unwrap(), "--target", "swc"]);
    assert!(output.status.success(), "{}", stdout(&output));
    syn::parse_file(&stdout(&output)).expect("emitted Rust parses");
}
