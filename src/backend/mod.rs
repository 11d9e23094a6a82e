//! dualgen backends
//!
//! This module turns a validated [`IrProgram`] into two source files:
//!
//! ```text
//! IR → detection (once) → { babel pipeline → index.js, swc pipeline → lib.rs }
//! ```
//!
//! The two pipelines are pure functions over the same immutable IR and detection result;
//! [`DualCodegen`] runs them sequentially or on two threads.
//!
//! ## Module Organization
//!
//! - `detection.rs` - Usage scan deciding each backend's header
//! - `visitors.rs` - Visitor binding table resolution (shared by both backends)
//! - `scope.rs` - User types and local scopes
//! - `emitter.rs` - Low-level indented text writer
//! - `errors.rs` - Backend-local errors and warnings
//! - `swc/` - Rust (SWC `VisitMut`/`Visit`) backend
//! - `babel/` - JavaScript (Babel plugin) backend
//! - `codegen.rs` - Orchestration of both pipelines
//! - `project.rs` - Writing outputs (and an optional Cargo manifest) to disk

pub mod babel;
pub mod codegen;
pub mod detection;
pub mod emitter;
pub mod errors;
pub mod project;
pub mod scope;
pub mod swc;
pub mod visitors;

use std::collections::BTreeSet;
use std::fmt;

use dualgen_core::lang::builders::{self, NodeBuilder};
use dualgen_core::lang::node_kinds::{self, NodeKindId};
use dualgen_core::lang::registry::Target;

pub use codegen::{BackendResult, DualCodegen, DualOutput};
pub use detection::{Detection, SupportMarker, detect};
pub use errors::{CodegenError, CodegenResult, CodegenWarning};
pub use project::OutputWriter;

use crate::config::CodegenConfig;
use crate::ir::{IrExpr, IrFieldInit, IrModule, IrPattern, IrProgram, IrSpan, IrTopLevel, IrType};

/// One of the two code generation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Backend {
    /// JavaScript output for Babel
    Babel,
    /// Rust output for SWC
    Swc,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Babel, Backend::Swc];

    pub fn target(self) -> Target {
        match self {
            Backend::Babel => Target::Babel,
            Backend::Swc => Target::Swc,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.target().as_str()
    }

    /// File written for this backend by `build`.
    pub fn output_file(self) -> &'static str {
        match self {
            Backend::Babel => "index.js",
            Backend::Swc => "lib.rs",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub backend: Backend,
    pub code: String,
    /// Support markers the header was built from
    pub markers: BTreeSet<SupportMarker>,
    pub warnings: Vec<CodegenWarning>,
}

/// Run the Babel pipeline.
pub fn generate_babel(
    program: &IrProgram,
    detection: &Detection,
    config: &CodegenConfig,
) -> CodegenResult<GeneratedFile> {
    babel::BabelCodegen::new(program, detection, config).generate()
}

/// Run the SWC pipeline.
pub fn generate_swc(program: &IrProgram, detection: &Detection, config: &CodegenConfig) -> CodegenResult<GeneratedFile> {
    swc::SwcCodegen::new(program, detection, config).generate()
}

/// Run one backend's pipeline.
pub fn generate(
    backend: Backend,
    program: &IrProgram,
    detection: &Detection,
    config: &CodegenConfig,
) -> CodegenResult<GeneratedFile> {
    match backend {
        Backend::Babel => generate_babel(program, detection, config),
        Backend::Swc => generate_swc(program, detection, config),
    }
}

/// The builder for a node literal of `kind`; every initialized field must be a builder argument.
pub(crate) fn node_builder(
    kind: NodeKindId,
    fields: &[IrFieldInit],
    backend: Backend,
    span: IrSpan,
) -> CodegenResult<&'static NodeBuilder> {
    let name = node_kinds::info_for(kind).name;
    let Some(builder) = builders::for_kind(kind) else {
        return Err(CodegenError::unsupported(format!("constructing `{}` nodes", name), backend, span));
    };
    if let Some(extra) = fields.iter().find(|f| builder.arg(&f.name).is_none()) {
        return Err(CodegenError::unsupported(
            format!("field `{}` in a `{}` literal", extra.name, name),
            backend,
            span,
        ));
    }
    Ok(builder)
}

fn scratch_program() -> IrProgram {
    IrProgram::new(IrTopLevel::Module(IrModule {
        name: "scratch".to_string(),
        items: Vec::new(),
        span: IrSpan::default(),
    }))
}

/// Render a single expression with one backend (outside any function).
pub fn render_expr(backend: Backend, expr: &IrExpr) -> CodegenResult<String> {
    let program = scratch_program();
    let detection = Detection::default();
    let config = CodegenConfig::default();
    match backend {
        Backend::Babel => babel::BabelCodegen::new(&program, &detection, &config).render_expr(expr),
        Backend::Swc => swc::SwcCodegen::new(&program, &detection, &config).render_expr(expr),
    }
}

/// Lowered form of a pattern, rendered as text for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPattern {
    /// Native pattern (SWC) or combined condition (Babel)
    pub head: String,
    /// Guard conditions (SWC only)
    pub guards: Vec<String>,
    /// `(name, expression)` for every bound name, in binding order
    pub bindings: Vec<(String, String)>,
}

/// Lower a pattern matched against `scrutinee` (of type `scrutinee_ty`) with one backend.
pub fn render_pattern(
    backend: Backend,
    pattern: &IrPattern,
    scrutinee: &str,
    scrutinee_ty: Option<&IrType>,
) -> CodegenResult<RenderedPattern> {
    let program = scratch_program();
    let detection = Detection::default();
    let config = CodegenConfig::default();
    match backend {
        Backend::Babel => {
            let mut codegen = babel::BabelCodegen::new(&program, &detection, &config);
            let lowered = codegen.lower_pattern(pattern, scrutinee, scrutinee_ty, IrSpan::default())?;
            Ok(RenderedPattern {
                head: lowered.condition(),
                guards: Vec::new(),
                bindings: lowered.bindings,
            })
        }
        Backend::Swc => {
            let mut codegen = swc::SwcCodegen::new(&program, &detection, &config);
            let lowered = codegen.lower_pattern(pattern, scrutinee_ty, IrSpan::default())?;
            Ok(RenderedPattern {
                head: lowered.pattern,
                guards: lowered.guards,
                bindings: lowered.bindings,
            })
        }
    }
}
