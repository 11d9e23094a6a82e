//! dualgen front end
//!
//! The DSL's own parser and type checker hand their result over as JSON. This module turns that
//! JSON back into an [`IrProgram`](crate::ir::IrProgram) and checks the structural rules codegen
//! relies on:
//!
//! - `loader`: JSON → IR, with `ParseError { line, column, message }`
//! - `validate`: duplicate declarations, duplicate visitor bindings, empty names
//! - `diagnostics`: one-line `error[CODE]: message` rendering shared by the CLI

pub mod diagnostics;
pub mod loader;
pub mod validate;

pub use diagnostics::Report;
pub use loader::{LoadError, ParseError, load_file, load_str};
pub use validate::{ValidationError, validate};
