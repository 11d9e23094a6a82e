//! SWC backend: Rust source for `swc_core` visitors
//!
//! `SwcCodegen` is split across files by concern, each adding an `impl SwcCodegen<'_>` block:
//!
//! - `types.rs` - Type, default-value and operator mapping
//! - `patterns.rs` - Pattern lowering (native pattern + guards + bindings)
//! - `expressions.rs` - Expression emission
//! - `statements.rs` - Statement and block emission
//! - `structures.rs` - Structs, enums, impls and functions
//! - `visitors.rs` - `impl VisitMut`/`impl Visit` hooks and hoisted inline visitors
//! - `program.rs` - Header and top-level assembly
//!
//! Plugins become a struct implementing `VisitMut`; writers implement `Visit` and accumulate text
//! in an `output` buffer; modules are a flat list of items.

mod expressions;
mod patterns;
mod program;
mod statements;
mod structures;
mod types;
mod visitors;

pub use patterns::LoweredPattern;

use crate::backend::detection::Detection;
use crate::backend::emitter::CodeWriter;
use crate::backend::errors::{CodegenError, CodegenResult, CodegenWarning};
use crate::backend::scope::{Locals, UserTypes};
use crate::backend::{Backend, GeneratedFile};
use crate::config::CodegenConfig;
use crate::ir::{IrExpr, IrProgram};

/// Per-function emission context.
#[derive(Debug, Clone, Default)]
pub(crate) struct FnContext {
    /// Outer locals copied into an inline visitor (read as `self.name`)
    captures: Vec<String>,
}

/// Rust code generator for the SWC backend
pub struct SwcCodegen<'a> {
    program: &'a IrProgram,
    detection: &'a Detection,
    config: &'a CodegenConfig,
    user_types: UserTypes<'a>,
    locals: Locals,
    ctx: FnContext,
    /// Counter for generated temporaries (`__elems0`, `__lit1`, ...)
    next_temp: usize,
    /// Counter for hoisted inline visitors
    next_visitor: usize,
    /// Inline visitor definitions, emitted after all items
    hoisted: Vec<String>,
    warnings: Vec<CodegenWarning>,
}

impl<'a> SwcCodegen<'a> {
    pub fn new(program: &'a IrProgram, detection: &'a Detection, config: &'a CodegenConfig) -> Self {
        Self {
            program,
            detection,
            config,
            user_types: UserTypes::collect(program.items()),
            locals: Locals::for_program(program),
            ctx: FnContext::default(),
            next_temp: 0,
            next_visitor: 0,
            hoisted: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Generate the complete SWC source file.
    #[tracing::instrument(skip_all, fields(backend = "swc", program = self.program.name()))]
    pub fn generate(mut self) -> CodegenResult<GeneratedFile> {
        let markers = self.detection.markers(Backend::Swc);
        let body = self.emit_program(&markers)?;
        let code = self.finalize(body)?;
        tracing::debug!(bytes = code.len(), "swc output generated");
        Ok(GeneratedFile {
            backend: Backend::Swc,
            code,
            markers,
            warnings: self.warnings,
        })
    }

    /// Render a single expression outside any function.
    pub fn render_expr(&mut self, expr: &IrExpr) -> CodegenResult<String> {
        self.locals.push();
        let out = self.expr(expr);
        self.locals.pop();
        out
    }

    fn writer(&self) -> CodeWriter {
        CodeWriter::with_indent_width(self.config.rust_indent)
    }

    fn temp(&mut self, prefix: &str) -> String {
        let name = format!("__{}{}", prefix, self.next_temp);
        self.next_temp += 1;
        name
    }

    /// Verify (and optionally pretty-print) the generated Rust.
    fn finalize(&self, code: String) -> CodegenResult<String> {
        if !self.config.verify_rust && !self.config.pretty_rust {
            return Ok(code);
        }
        let file = syn::parse_file(&code).map_err(|e| CodegenError::Verification {
            backend: Backend::Swc,
            message: e.to_string(),
        })?;
        if !self.config.pretty_rust {
            return Ok(code);
        }
        let pretty = prettyplease::unparse(&file);
        Ok(match self.header_comment() {
            Some(header) => format!("{}\n{}", header, pretty),
            None => pretty,
        })
    }

    fn header_comment(&self) -> Option<String> {
        self.config
            .emit_header
            .then(|| format!("// Generated by dualgen from `{}`. Do not edit.", self.program.name()))
    }
}
