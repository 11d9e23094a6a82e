//! IR loading from JSON

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::ir::IrProgram;

/// The IR text is not valid JSON or does not have the IR's shape.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("Parse error at {line}:{column}: {message}")]
#[diagnostic(code(E0101))]
pub struct ParseError {
    /// 1-based line (0 when unknown)
    pub line: usize,
    /// 1-based column (0 when unknown)
    pub column: usize,
    pub message: String,
}

impl ParseError {
    fn from_json(err: serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        let full = err.to_string();
        let location = format!(" at line {} column {}", line, column);
        let message = full.strip_suffix(&location).unwrap_or(&full).to_string();
        Self { line, column, message }
    }
}

/// Failure to read or parse an IR file.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    #[diagnostic(code(E0100))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Parse an IR program from JSON text.
pub fn load_str(source: &str) -> Result<IrProgram, ParseError> {
    serde_json::from_str(source).map_err(ParseError::from_json)
}

/// Read and parse an IR file.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_file(path: &Path) -> Result<IrProgram, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = load_str(&source)?;
    tracing::debug!(program = program.name(), items = program.items().len(), "loaded IR");
    Ok(program)
}
