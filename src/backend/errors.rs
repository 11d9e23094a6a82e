//! Define error and warning types for backend code generation.
//!
//! These errors are *backend-local*: each one aborts only the pipeline of the backend named in it.
//! Parse and validation errors live in [`crate::frontend`].
//!
//! ## Notes
//!
//! - Every variant carries a stable diagnostic code (`miette::Diagnostic`); the CLI renders it as
//!   `error[CODE]: message`.
//! - Prefer actionable messages: name the construct and the backend so the user can rewrite the
//!   DSL or move the code into a backend-specific verbatim block.

use super::Backend;
use crate::ir::IrSpan;
use miette::Diagnostic;
use thiserror::Error;

/// Error raised by one backend's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CodegenError {
    /// A type, operator or expression has no mapping for the backend.
    #[error("unsupported construct {construct} for the {backend} backend")]
    #[diagnostic(code(E0201), help("wrap the code in a verbatim block for the other backend only"))]
    UnsupportedConstruct {
        construct: String,
        backend: Backend,
        span: IrSpan,
    },

    /// A (sub-)pattern cannot be lowered to the backend's pattern syntax.
    #[error("cannot lower pattern `{sub_pattern}` for the {backend} backend")]
    #[diagnostic(code(E0202), help("split the pattern into nested matches"))]
    PatternLowering {
        sub_pattern: String,
        backend: Backend,
        span: IrSpan,
    },

    /// The generated Rust text failed to parse.
    #[error("generated {backend} output is not valid Rust: {message}")]
    #[diagnostic(code(E0203))]
    Verification { backend: Backend, message: String },
}

impl CodegenError {
    pub fn unsupported(construct: impl Into<String>, backend: Backend, span: IrSpan) -> Self {
        CodegenError::UnsupportedConstruct {
            construct: construct.into(),
            backend,
            span,
        }
    }

    pub fn pattern(sub_pattern: impl ToString, backend: Backend, span: IrSpan) -> Self {
        CodegenError::PatternLowering {
            sub_pattern: sub_pattern.to_string(),
            backend,
            span,
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            CodegenError::UnsupportedConstruct { backend, .. }
            | CodegenError::PatternLowering { backend, .. }
            | CodegenError::Verification { backend, .. } => *backend,
        }
    }

    /// Source location, when the IR carried one.
    pub fn span(&self) -> Option<IrSpan> {
        match self {
            CodegenError::UnsupportedConstruct { span, .. } | CodegenError::PatternLowering { span, .. } => {
                span.is_known().then_some(*span)
            }
            CodegenError::Verification { .. } => None,
        }
    }
}

/// Non-fatal codegen findings.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CodegenWarning {
    /// A `visit_*` method with no entry in the node-kind table; emitted as a plain function.
    #[error("`{method_name}` looks like a visitor method but no node kind is bound to it; emitted as a plain function")]
    #[diagnostic(code(W0301), severity(Warning))]
    MissingVisitorBinding { method_name: String, span: IrSpan },
}

impl CodegenWarning {
    pub fn span(&self) -> Option<IrSpan> {
        match self {
            CodegenWarning::MissingVisitorBinding { span, .. } => span.is_known().then_some(*span),
        }
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
