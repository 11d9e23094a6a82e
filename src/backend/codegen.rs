//! Orchestration of the two backend pipelines
//!
//! Detection runs once; both pipelines then read the same `IrProgram` and `Detection` and write to
//! private buffers. A failure in one pipeline never stops the other: both outcomes are collected in
//! a [`DualOutput`] and the caller decides what a partial result means.

use super::detection::{Detection, detect};
use super::errors::{CodegenError, CodegenResult, CodegenWarning};
use super::{Backend, GeneratedFile, generate_babel, generate_swc};
use crate::config::CodegenConfig;
use crate::ir::IrProgram;

/// Outcome of one backend pipeline.
pub type BackendResult = CodegenResult<GeneratedFile>;

/// Both backends' outcomes for one program.
#[derive(Debug)]
pub struct DualOutput {
    pub detection: Detection,
    pub babel: BackendResult,
    pub swc: BackendResult,
}

impl DualOutput {
    pub fn get(&self, backend: Backend) -> &BackendResult {
        match backend {
            Backend::Babel => &self.babel,
            Backend::Swc => &self.swc,
        }
    }

    /// True when both backends produced a file.
    pub fn is_success(&self) -> bool {
        self.babel.is_ok() && self.swc.is_ok()
    }

    /// Errors of the failed backends, Babel first.
    pub fn errors(&self) -> Vec<&CodegenError> {
        Backend::ALL.iter().filter_map(|b| self.get(*b).as_ref().err()).collect()
    }

    /// Warnings from the successful backends, without duplicates.
    ///
    /// Both backends share the visitor plan, so a missing binding is reported by each of them.
    pub fn warnings(&self) -> Vec<&CodegenWarning> {
        let mut out: Vec<&CodegenWarning> = Vec::new();
        for backend in Backend::ALL {
            if let Ok(file) = self.get(backend) {
                for warning in &file.warnings {
                    if !out.contains(&warning) {
                        out.push(warning);
                    }
                }
            }
        }
        out
    }
}

/// Runs detection and both backend pipelines.
#[derive(Debug, Clone, Default)]
pub struct DualCodegen {
    config: CodegenConfig,
}

impl DualCodegen {
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate both outputs for `program`.
    #[tracing::instrument(skip_all, fields(program = program.name(), parallel = self.config.parallel))]
    pub fn generate(&self, program: &IrProgram) -> DualOutput {
        let detection = detect(program);
        tracing::debug!(?detection, "detection complete");

        let (babel, swc) = if self.config.parallel {
            std::thread::scope(|scope| {
                let swc = scope.spawn(|| generate_swc(program, &detection, &self.config));
                let babel = generate_babel(program, &detection, &self.config);
                let swc = swc.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload));
                (babel, swc)
            })
        } else {
            (
                generate_babel(program, &detection, &self.config),
                generate_swc(program, &detection, &self.config),
            )
        };

        for (backend, result) in [(Backend::Babel, &babel), (Backend::Swc, &swc)] {
            match result {
                Ok(file) => tracing::debug!(%backend, bytes = file.code.len(), "backend succeeded"),
                Err(err) => tracing::debug!(%backend, error = %err, "backend failed"),
            }
        }
        DualOutput { detection, babel, swc }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BinaryOp, IrBlock, IrExpr, IrFunction, IrItem, IrParam, IrPlugin, IrStmt, IrTopLevel, IrType};

    fn plugin(items: Vec<IrItem>) -> IrProgram {
        IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("P", items)))
    }

    #[test]
    fn test_one_backend_failure_leaves_the_other() {
        // `**` has no SWC spelling
        let visit = IrFunction::new(
            "visit_identifier",
            vec![IrParam::new("node", IrType::named("Identifier"))],
            IrBlock::new(vec![IrStmt::let_(
                "x",
                IrExpr::binary(BinaryOp::Pow, IrExpr::int(2), IrExpr::int(3)),
            )]),
        );
        let output = DualCodegen::default().generate(&plugin(vec![IrItem::Function(visit)]));
        assert!(output.babel.is_ok());
        assert!(matches!(output.swc, Err(CodegenError::UnsupportedConstruct { backend: Backend::Swc, .. })));
        assert!(!output.is_success());
        assert_eq!(output.errors().len(), 1);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let visit = IrFunction::new(
            "visit_call_expression",
            vec![IrParam::new("node", IrType::named("CallExpression"))],
            IrBlock::default(),
        );
        let program = plugin(vec![IrItem::Function(visit)]);
        let parallel = DualCodegen::default().generate(&program);
        let sequential = DualCodegen::new(CodegenConfig::default().with_parallel(false)).generate(&program);
        assert_eq!(parallel.babel, sequential.babel);
        assert_eq!(parallel.swc, sequential.swc);
    }

    #[test]
    fn test_warnings_are_deduplicated() {
        let unbound = IrFunction::new("visit_mystery", vec![], IrBlock::default());
        let output = DualCodegen::default().generate(&plugin(vec![IrItem::Function(unbound)]));
        assert!(output.is_success());
        assert_eq!(output.warnings().len(), 1);
    }
}
