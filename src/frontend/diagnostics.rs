//! One-line diagnostic rendering
//!
//! Every error and warning in dualgen implements [`miette::Diagnostic`] with a stable code. The CLI
//! prints them as
//!
//! ```text
//! error[E0201]: unsupported construct operator `**` for the swc backend
//!   --> 3:14
//! ```
//!
//! The location line is present only when the IR carried a span.

use std::fmt;

use miette::{Diagnostic, Severity};

use super::loader::ParseError;
use super::validate::ValidationError;
use crate::backend::{CodegenError, CodegenWarning};
use crate::ir::IrSpan;

/// A rendered-ready diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub span: Option<IrSpan>,
    pub help: Option<String>,
}

impl Report {
    /// Build a report from any diagnostic; the span is supplied by the caller since IR spans are
    /// not miette source spans.
    pub fn new(diagnostic: &dyn Diagnostic, span: Option<IrSpan>) -> Self {
        Self {
            severity: diagnostic.severity().unwrap_or(Severity::Error),
            code: diagnostic.code().map_or_else(|| "E0000".to_string(), |c| c.to_string()),
            message: diagnostic.to_string(),
            span,
            help: diagnostic.help().map(|h| h.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Advice => "note",
        };
        write!(f, "{}[{}]: {}", label, self.code, self.message)?;
        if let Some(span) = self.span {
            write!(f, "\n  --> {}", span)?;
        }
        Ok(())
    }
}

impl From<&CodegenError> for Report {
    fn from(err: &CodegenError) -> Self {
        Report::new(err, err.span())
    }
}

impl From<&CodegenWarning> for Report {
    fn from(warning: &CodegenWarning) -> Self {
        Report::new(warning, warning.span())
    }
}

impl From<&ValidationError> for Report {
    fn from(err: &ValidationError) -> Self {
        Report::new(err, err.span())
    }
}

impl From<&ParseError> for Report {
    fn from(err: &ParseError) -> Self {
        // the location is already part of the message
        Report::new(err, None)
    }
}
