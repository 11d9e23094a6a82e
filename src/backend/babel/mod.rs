//! Babel backend: JavaScript source for a Babel plugin
//!
//! `BabelCodegen` is split across files by concern, each adding an `impl BabelCodegen<'_>` block:
//!
//! - `types.rs` - JSDoc types, default values, operators and string literals
//! - `patterns.rs` - Pattern lowering to runtime conditions + bindings
//! - `expressions.rs` - Expression emission
//! - `statements.rs` - Statement, block and `match` emission
//! - `structures.rs` - Classes, frozen enums and helper functions
//! - `visitors.rs` - Visitor hooks and `path.traverse` calls
//! - `program.rs` - Header, shims and the plugin factory
//!
//! A plugin is a factory `function Name({ types: t })` returning `{ name, pre, post, visitor }`.
//! Plugin state and receiver helpers live on a closure-local `self` object, so DSL `self.x` reads
//! the same in both backends.

mod expressions;
mod patterns;
mod program;
mod statements;
mod structures;
mod types;
mod visitors;

pub use patterns::LoweredCondition;

use crate::backend::detection::Detection;
use crate::backend::emitter::CodeWriter;
use crate::backend::errors::{CodegenResult, CodegenWarning};
use crate::backend::scope::{Locals, UserTypes};
use crate::backend::{Backend, GeneratedFile};
use crate::config::CodegenConfig;
use crate::ir::{IrExpr, IrProgram};

/// Per-function emission context.
#[derive(Debug, Clone)]
pub(crate) struct FnContext {
    /// Name of the visited node parameter inside a visitor hook (`path` is in scope)
    node_param: Option<String>,
    /// What DSL `self` refers to: the plugin's `self` object, or `this` in classes and inline visitors
    self_ref: &'static str,
}

impl Default for FnContext {
    fn default() -> Self {
        Self {
            node_param: None,
            self_ref: "self",
        }
    }
}

/// JavaScript code generator for the Babel backend
pub struct BabelCodegen<'a> {
    program: &'a IrProgram,
    detection: &'a Detection,
    config: &'a CodegenConfig,
    user_types: UserTypes<'a>,
    locals: Locals,
    ctx: FnContext,
    /// Counter for generated temporaries (`__match0`, `__let1`, ...)
    next_temp: usize,
    /// Counter for inline traverse visitors (names their field tables)
    next_visitor: usize,
    warnings: Vec<CodegenWarning>,
}

impl<'a> BabelCodegen<'a> {
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
            warnings: Vec::new(),
        }
    }

    /// Generate the complete Babel source file.
    #[tracing::instrument(skip_all, fields(backend = "babel", program = self.program.name()))]
    pub fn generate(mut self) -> CodegenResult<GeneratedFile> {
        let markers = self.detection.markers(Backend::Babel);
        let code = self.emit_program(&markers)?;
        tracing::debug!(bytes = code.len(), "babel output generated");
        Ok(GeneratedFile {
            backend: Backend::Babel,
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
        CodeWriter::with_indent_width(self.config.js_indent)
    }

    fn temp(&mut self, prefix: &str) -> String {
        let name = format!("__{}{}", prefix, self.next_temp);
        self.next_temp += 1;
        name
    }
}
