#![forbid(unsafe_code)]
//! dualgen: one AST-transform DSL, two plugin ecosystems
//!
//! dualgen reads the validated IR of a DSL program (JSON) and generates two plugins from it: a Babel
//! plugin in JavaScript and an SWC plugin in Rust. This crate provides the front end (IR loading and
//! validation), the two backends, and the CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: DSL calls such as `unwrap()` pass through to the SWC output as text. These
//!   are output strings, not method calls in the generator.
//!
//! - **True invariants**: registry lookups by a typed id (`info_for`) use `.expect` and document the
//!   panic; a panic there is a registry bug, not a user error.

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod ir;

pub use backend::{Backend, DualCodegen, DualOutput, GeneratedFile, OutputWriter};
pub use config::{CodegenConfig, ModuleStyle};
pub use frontend::diagnostics;
pub use frontend::{load_file, load_str, validate};
pub use ir::IrProgram;
