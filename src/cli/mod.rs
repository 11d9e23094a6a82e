//! CLI module for dualgen
//!
//! ## Commands
//!
//! - `parse <file>` - Load the IR only
//! - `check <file>` - Load, validate and dry-run both backends
//! - `build <file> --output <dir>` - Generate `index.js` and `lib.rs`
//! - `emit <file> --target babel|swc` - Print one backend's output
//!
//! ## Output contract
//!
//! Command results go to stdout with fixed prefixes (`Parse error at`, `Check passed`,
//! `Check failed`, `error[`, `warning[`); logs go to stderr.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::backend::Backend;
use crate::config::{CodegenConfig, ModuleStyle};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate a Babel plugin and an SWC plugin from one DSL program
#[derive(Parser, Debug)]
#[command(name = "dualgen")]
#[command(version = VERSION)]
#[command(about = "Generate Babel and SWC plugins from one DSL program", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the IR and print a one-line summary
    Parse {
        /// IR file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate the IR and dry-run both backends
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        codegen: CodegenArgs,
    },

    /// Generate both plugins into a directory
    Build {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
        /// Also write a Cargo.toml for the SWC plugin
        #[arg(long)]
        manifest: bool,
        #[command(flatten)]
        codegen: CodegenArgs,
    },

    /// Print one backend's output to stdout
    Emit {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(short, long, value_enum)]
        target: Backend,
        #[command(flatten)]
        codegen: CodegenArgs,
    },
}

/// Flags shared by the generating commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct CodegenArgs {
    /// Use ES module imports/exports in the Babel output
    #[arg(long)]
    pub esm: bool,
    /// Reformat the SWC output with prettyplease
    #[arg(long)]
    pub pretty: bool,
    /// Skip parsing the SWC output with syn
    #[arg(long = "no-verify")]
    pub no_verify: bool,
    /// Run the two backends one after the other
    #[arg(long)]
    pub sequential: bool,
}

impl CodegenArgs {
    pub fn config(self) -> CodegenConfig {
        let style = if self.esm { ModuleStyle::Esm } else { ModuleStyle::CommonJs };
        CodegenConfig::new()
            .with_module_style(style)
            .with_pretty_rust(self.pretty)
            .with_verify_rust(!self.no_verify)
            .with_parallel(!self.sequential)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Parse { file } => commands::parse_file(&file),
        Command::Check { file, codegen } => commands::check_file(&file, &codegen.config()),
        Command::Build {
            file,
            output,
            manifest,
            codegen,
        } => commands::build_file(&file, &output, manifest, codegen.config()),
        Command::Emit { file, target, codegen } => commands::emit_file(&file, target, &codegen.config()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_build() {
        let cli = Cli::try_parse_from(["dualgen", "build", "plugin.json", "--output", "out", "--manifest"]).unwrap();
        let Command::Build { output, manifest, .. } = cli.command else {
            panic!("Expected Build command");
        };
        assert_eq!(output, PathBuf::from("out"));
        assert!(manifest);
    }

    #[test]
    fn test_cli_build_requires_output() {
        assert!(Cli::try_parse_from(["dualgen", "build", "plugin.json"]).is_err());
    }

    #[test]
    fn test_cli_parse_emit_target() {
        let cli = Cli::try_parse_from(["dualgen", "emit", "plugin.json", "--target", "swc"]).unwrap();
        assert!(matches!(cli.command, Command::Emit { target: Backend::Swc, .. }));
        assert!(Cli::try_parse_from(["dualgen", "emit", "plugin.json", "--target", "webpack"]).is_err());
    }

    #[test]
    fn test_codegen_flags_map_onto_config() {
        let cli =
            Cli::try_parse_from(["dualgen", "check", "plugin.json", "--esm", "--no-verify", "--sequential"]).unwrap();
        let Command::Check { codegen, .. } = cli.command else {
            panic!("Expected Check command");
        };
        let config = codegen.config();
        assert_eq!(config.js_module_style, ModuleStyle::Esm);
        assert!(!config.verify_rust);
        assert!(!config.parallel);
        assert!(!config.pretty_rust);
    }

    #[test]
    fn test_default_flags_verify_rust() {
        let config = CodegenArgs::default().config();
        assert!(config.verify_rust);
        assert!(config.parallel);
        assert_eq!(config.js_module_style, ModuleStyle::CommonJs);
    }
}
