//! Output writer - puts generated files on disk
//!
//! Writes:
//! - `index.js` (Babel) and `lib.rs` (SWC) for every backend that succeeded
//! - optionally a `Cargo.toml` for the SWC output, with dependencies derived from its markers

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use super::codegen::DualOutput;
use super::detection::SupportMarker;
use super::{Backend, GeneratedFile};

const DUALGEN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Writes generated files into one output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    /// Crate name for the generated `Cargo.toml`; no manifest when `None`
    manifest: Option<String>,
}

impl OutputWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            manifest: None,
        }
    }

    /// Also write a `Cargo.toml` for the SWC output, naming the crate `crate_name`.
    pub fn with_manifest(mut self, crate_name: &str) -> Self {
        self.manifest = Some(crate_name.to_string());
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one generated file; returns its path.
    pub async fn write(&self, file: &GeneratedFile) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(file.backend.output_file());
        tokio::fs::write(&path, &file.code).await?;
        tracing::info!(backend = %file.backend, path = %path.display(), "wrote output");
        Ok(path)
    }

    /// Write every successful output (and the manifest, when the SWC output exists).
    pub async fn write_all(&self, output: &DualOutput) -> io::Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for backend in Backend::ALL {
            if let Ok(file) = output.get(backend) {
                written.push(self.write(file).await?);
            }
        }
        if let (Some(name), Ok(swc)) = (&self.manifest, &output.swc) {
            let path = self.output_dir.join("Cargo.toml");
            tokio::fs::write(&path, cargo_manifest(name, &swc.markers)).await?;
            tracing::info!(path = %path.display(), "wrote manifest");
            written.push(path);
        }
        Ok(written)
    }
}

/// `Cargo.toml` for an SWC plugin crate whose source is `lib.rs`.
pub fn cargo_manifest(name: &str, markers: &BTreeSet<SupportMarker>) -> String {
    let common = markers.contains(&SupportMarker::SpanImport) || markers.contains(&SupportMarker::TakeImport);
    let swc_features = match common {
        true => r#"["common", "ecma_ast", "ecma_visit"]"#,
        false => r#"["ecma_ast", "ecma_visit"]"#,
    };
    let mut deps = vec![format!(r#"swc_core = {{ version = "0.90", features = {} }}"#, swc_features)];
    if markers.contains(&SupportMarker::SerdeImport) {
        deps.push(r#"serde = { version = "1.0", features = ["derive"] }"#.to_string());
    }
    if markers.contains(&SupportMarker::SerdeJsonImport) {
        deps.push(r#"serde_json = "1.0""#.to_string());
    }

    format!(
        r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2021"

# Generated by dualgen {version}

[lib]
path = "lib.rs"
crate-type = ["cdylib", "rlib"]

[dependencies]
{dependencies}
"#,
        name = name,
        version = DUALGEN_VERSION,
        dependencies = deps.join("\n"),
    )
}
