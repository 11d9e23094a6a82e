//! Layering guardrails between the two backends and the shared vocabulary crate.
//!
//! - `backend/babel/` and `backend/swc/` never reference each other; both go through the shared
//!   modules (`detection`, `visitors`, `scope`, `emitter`) and `dualgen_core`.
//! - `dualgen_core` has no dependencies, so the registries stay usable from anywhere.

use std::fs;
use std::path::Path;

fn sources_in(dir: &str) -> Vec<(String, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);
    let mut out = Vec::new();
    for entry in fs::read_dir(&root).unwrap_or_else(|e| panic!("cannot list {}: {}", root.display(), e)) {
        let path = entry.expect("directory entry").path();
        if path.extension().is_some_and(|ext| ext == "rs") {
            let text = fs::read_to_string(&path).expect("readable source");
            out.push((path.display().to_string(), text));
        }
    }
    assert!(!out.is_empty(), "no sources found in {}", dir);
    out
}

fn assert_no_reference(dir: &str, forbidden: &[&str]) {
    for (path, text) in sources_in(dir) {
        for (n, line) in text.lines().enumerate() {
            let code = line.split("//").next().unwrap_or("");
            for needle in forbidden {
                assert!(
                    !code.contains(needle),
                    "{}:{} references `{}`: {}",
                    path,
                    n + 1,
                    needle,
                    line.trim()
                );
            }
        }
    }
}

#[test]
fn babel_backend_does_not_reference_swc_backend() {
    assert_no_reference("src/backend/babel", &["backend::swc", "super::super::swc", "SwcCodegen"]);
}

#[test]
fn swc_backend_does_not_reference_babel_backend() {
    assert_no_reference("src/backend/swc", &["backend::babel", "super::super::babel", "BabelCodegen"]);
}

#[test]
fn vocabulary_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/dualgen_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if in_dependencies && !line.is_empty() && !line.starts_with('#') {
            panic!("`dualgen_core` must stay dependency-free, found: {}", line);
        }
    }
}
