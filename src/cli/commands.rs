//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Diagnostics that belong to the command's text contract (`Parse error at`, `error[...]`) are
//! printed to stdout and turned into `ExitCode::FAILURE`; a `CliError` is reserved for problems
//! outside the program being compiled (unreadable file, bad output directory, IO).

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use super::{CliError, CliResult, ExitCode};
use crate::backend::{Backend, BackendResult, DualCodegen, DualOutput, OutputWriter, detect, generate};
use crate::config::CodegenConfig;
use crate::frontend::{LoadError, ParseError, Report, load_file, validate};
use crate::ir::{IrItem, IrProgram, IrTopLevel};

// ============================================================================
// Loading
// ============================================================================

/// Load an IR file. A parse failure is part of the command's result, not a CLI error.
fn load(path: &Path) -> CliResult<Result<IrProgram, ParseError>> {
    match load_file(path) {
        Ok(program) => Ok(Ok(program)),
        Err(LoadError::Parse(err)) => Ok(Err(err)),
        Err(err @ LoadError::Io { .. }) => Err(CliError::failure(err.to_string())),
    }
}

/// Print the validation errors of `program`; true when there were none.
fn report_validation(program: &IrProgram) -> bool {
    let errors = validate(program);
    for err in &errors {
        println!("{}", Report::from(err));
    }
    errors.is_empty()
}

// ============================================================================
// parse
// ============================================================================

/// One-line summary printed by `parse`.
#[derive(Debug, Serialize)]
struct ProgramSummary<'a> {
    name: &'a str,
    kind: &'static str,
    uses: usize,
    items: usize,
    functions: usize,
}

impl<'a> ProgramSummary<'a> {
    fn of(program: &'a IrProgram) -> Self {
        let kind = match program.decl {
            IrTopLevel::Plugin(_) => "plugin",
            IrTopLevel::Writer(_) => "writer",
            IrTopLevel::Module(_) => "module",
        };
        Self {
            name: program.name(),
            kind,
            uses: program.uses.len(),
            items: program.items().len(),
            functions: program
                .items()
                .iter()
                .filter(|item| matches!(item, IrItem::Function(_)))
                .count(),
        }
    }
}

/// Load only; print a one-line summary or the parse error.
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    match load(path)? {
        Ok(program) => {
            let summary = serde_json::to_string(&ProgramSummary::of(&program))
                .map_err(|e| CliError::failure(format!("Cannot serialize summary: {}", e)))?;
            println!("{}", summary);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// check
// ============================================================================

/// Load, validate and dry-run both backends.
pub fn check_file(path: &Path, config: &CodegenConfig) -> CliResult<ExitCode> {
    let program = match load(path)? {
        Ok(program) => program,
        Err(err) => {
            println!("Check failed");
            println!("{}", Report::from(&err));
            return Ok(ExitCode::FAILURE);
        }
    };

    let validation = validate(&program);
    if !validation.is_empty() {
        println!("Check failed");
        for err in &validation {
            println!("{}", Report::from(err));
        }
        return Ok(ExitCode::FAILURE);
    }

    let output = DualCodegen::new(config.clone()).generate(&program);
    println!("{}", if output.is_success() { "Check passed" } else { "Check failed" });
    print_diagnostics(&output);
    Ok(if output.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_diagnostics(output: &DualOutput) {
    for err in output.errors() {
        println!("{}", Report::from(err));
    }
    for warning in output.warnings() {
        println!("{}", Report::from(warning));
    }
}

// ============================================================================
// build
// ============================================================================

/// Generate both plugins and write the successful ones into `output_dir`.
pub fn build_file(path: &Path, output_dir: &Path, manifest: bool, config: CodegenConfig) -> CliResult<ExitCode> {
    validate_output_dir(output_dir)?;

    let program = match load(path)? {
        Ok(program) => program,
        Err(err) => {
            println!("{}", err);
            return Ok(ExitCode::FAILURE);
        }
    };
    if !report_validation(&program) {
        return Ok(ExitCode::FAILURE);
    }

    let mut writer = OutputWriter::new(output_dir);
    if manifest {
        writer = writer.with_manifest(&crate_name(program.name()));
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::failure(format!("Cannot start async runtime: {}", e)))?;
    let output = runtime.block_on(generate_concurrently(program, config))?;

    print_diagnostics(&output);
    let written = runtime
        .block_on(writer.write_all(&output))
        .map_err(|e| CliError::failure(format!("Error writing output to '{}': {}", output_dir.display(), e)))?;
    for path in &written {
        println!("Wrote {}", path.display());
    }

    Ok(if output.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run each backend on the blocking pool; both results are collected before returning.
async fn generate_concurrently(program: IrProgram, config: CodegenConfig) -> CliResult<DualOutput> {
    let detection = detect(&program);
    let shared = Arc::new((program, detection.clone(), config));

    let spawn = |backend: Backend| {
        let shared = Arc::clone(&shared);
        tokio::task::spawn_blocking(move || {
            let (program, detection, config) = &*shared;
            generate(backend, program, detection, config)
        })
    };
    let babel = spawn(Backend::Babel);
    let swc = spawn(Backend::Swc);

    let join = |result: Result<BackendResult, tokio::task::JoinError>| {
        result.map_err(|e| CliError::failure(format!("Code generation task failed: {}", e)))
    };
    let babel = join(babel.await)?;
    let swc = join(swc.await)?;
    Ok(DualOutput { detection, babel, swc })
}

/// Reject output paths that climb out of the working tree.
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    if out_dir.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(CliError::failure(format!(
            "Output directory '{}' contains path traversal (..)",
            out_dir.display()
        )));
    }
    if out_dir.is_absolute() {
        tracing::debug!(path = %out_dir.display(), "using absolute output path");
    }
    Ok(())
}

/// `MyPlugin` → `my_plugin`
fn crate_name(program_name: &str) -> String {
    let mut out = String::with_capacity(program_name.len() + 4);
    for (i, ch) in program_name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() { "plugin".to_string() } else { out }
}

// ============================================================================
// emit
// ============================================================================

/// Print one backend's output; diagnostics go to stderr so stdout stays the generated file.
pub fn emit_file(path: &Path, target: Backend, config: &CodegenConfig) -> CliResult<ExitCode> {
    let program = match load(path)? {
        Ok(program) => program,
        Err(err) => {
            println!("{}", err);
            return Ok(ExitCode::FAILURE);
        }
    };
    if !report_validation(&program) {
        return Ok(ExitCode::FAILURE);
    }

    let detection = detect(&program);
    match generate(target, &program, &detection, config) {
        Ok(file) => {
            for warning in &file.warnings {
                eprintln!("{}", Report::from(warning));
            }
            print!("{}", file.code);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{}", Report::from(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}
