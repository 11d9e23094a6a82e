//! Typed Intermediate Representation (IR)
//!
//! This module defines the validated, typed IR of one DSL compilation unit. The IR is the only
//! input of the code generator:
//!
//! - **Closed**: every node category is a Rust enum; backends match exhaustively.
//! - **Typed**: expressions may carry their resolved type (used for node field mapping, string
//!   concatenation and collection-specific method rewriting).
//! - **Immutable**: codegen only borrows it; both backends read the same instance.
//!
//! ## Pipeline
//!
//! ```text
//! DSL source → front end (parse + typecheck) → IR (JSON) → dualgen → { Babel plugin, SWC plugin }
//! ```
//!
//! The IR derives `serde` so the front end can hand it over as JSON.

pub mod decl;
pub mod expr;
pub mod pattern;
pub mod stmt;
pub mod types;

pub use decl::{
    IrEnum, IrField, IrFunction, IrImpl, IrItem, IrModule, IrParam, IrPlugin, IrStruct, IrTopLevel, IrVariant,
    Receiver, VisitorFlags,
};
pub use expr::{BinaryOp, CompoundOp, IrExpr, IrExprKind, IrFieldInit, IrLiteral, IrMatchArm, UnaryOp};
pub use pattern::{IrFieldPattern, IrPattern, Rest};
pub use stmt::{IrBlock, IrStateField, IrStmt, IrStmtKind, IrTraverse, TraverseVisitor, VerbatimTarget};
pub use types::{CollectionKind, IrType, PrimitiveType};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete IR program: import declarations plus exactly one top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrProgram {
    #[serde(default)]
    pub uses: Vec<IrUse>,
    pub decl: IrTopLevel,
}

impl IrProgram {
    pub fn new(decl: IrTopLevel) -> Self {
        Self { uses: Vec::new(), decl }
    }

    pub fn with_use(mut self, use_decl: IrUse) -> Self {
        self.uses.push(use_decl);
        self
    }

    /// Name of the top-level plugin, writer or module.
    pub fn name(&self) -> &str {
        self.decl.name()
    }

    /// Items of the top-level declaration, in declaration order.
    pub fn items(&self) -> &[IrItem] {
        self.decl.items()
    }
}

/// An import declaration (`use ./helpers.lux::{escape_string};`, `use fs;`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrUse {
    pub path: String,
    #[serde(default)]
    pub alias: Option<String>,
    /// Named imports; empty for a whole-module import.
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub span: IrSpan,
}

impl IrUse {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
            imports: Vec::new(),
            span: IrSpan::default(),
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Source position preserved from the DSL front end (1-based; `0` means unknown).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IrSpan {
    pub line: u32,
    pub column: u32,
}

impl IrSpan {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for IrSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
