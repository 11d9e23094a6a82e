//! Header and top-level assembly for the SWC backend

use std::collections::BTreeSet;

use dualgen_core::lang::keywords;
use dualgen_core::lang::modules::{self, BuiltinModuleId};

use super::SwcCodegen;
use super::visitors::Lifecycle;
use crate::backend::Backend;
use crate::backend::detection::SupportMarker;
use crate::backend::emitter::{CodeWriter, comma_list};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::visitors::VisitorPlan;
use crate::ir::{IrItem, IrTopLevel, IrType};

impl SwcCodegen<'_> {
    pub(crate) fn emit_program(&mut self, markers: &BTreeSet<SupportMarker>) -> CodegenResult<String> {
        let mut w = self.writer();
        if let Some(header) = self.header_comment() {
            w.line(&header);
        }
        self.emit_uses(&mut w, markers);

        let program = self.program;
        match &program.decl {
            IrTopLevel::Plugin(plugin) | IrTopLevel::Writer(plugin) => {
                self.locals.push();
                self.locals.declare("self", Some(IrType::named(plugin.name.clone())));
                for item in &plugin.items {
                    self.declaration(&mut w, item)?;
                }
                let plan = VisitorPlan::from_items(&plugin.items);
                self.warnings.extend(plan.warnings.iter().cloned());
                w.blank_line();
                self.visitor_struct(&mut w, &plugin.name, &plan)?;
                w.blank_line();
                let lifecycle = Lifecycle {
                    pre: plan.pre_hook.is_some(),
                    exit: plan.exit_hook.is_some() && !self.is_writer(),
                };
                self.visitor_impl(&mut w, &plugin.name, &plan, lifecycle)?;
                self.locals.pop();
            }
            IrTopLevel::Module(module) => {
                for item in &module.items {
                    match item {
                        IrItem::Function(f) => {
                            w.blank_line();
                            self.function(&mut w, f, false)?;
                        }
                        IrItem::PreHook(f) | IrItem::ExitHook(f) => {
                            return Err(CodegenError::unsupported(
                                format!("lifecycle hook `{}` in module `{}`", f.name, module.name),
                                Backend::Swc,
                                f.span,
                            ));
                        }
                        _ => self.declaration(&mut w, item)?,
                    }
                }
            }
        }

        for hoisted in std::mem::take(&mut self.hoisted) {
            w.blank_line();
            w.write(&hoisted);
        }
        // sections open with a blank line; none before the first
        let code = w.finish();
        Ok(code.trim_start_matches('\n').to_string())
    }

    fn emit_uses(&self, w: &mut CodeWriter, markers: &BTreeSet<SupportMarker>) {
        let mut lines = Vec::new();
        if !matches!(self.program.decl, IrTopLevel::Module(_)) {
            lines.push("use swc_core::ecma::ast::*;".to_string());
        }
        if markers.contains(&SupportMarker::VisitMutImport) {
            lines.push("use swc_core::ecma::visit::{VisitMut, VisitMutWith};".to_string());
        }
        if markers.contains(&SupportMarker::VisitImport) {
            lines.push("use swc_core::ecma::visit::{Visit, VisitWith};".to_string());
        }
        if markers.contains(&SupportMarker::SpanImport) {
            lines.push("use swc_core::common::{SyntaxContext, DUMMY_SP};".to_string());
        }
        if markers.contains(&SupportMarker::TakeImport) {
            lines.push("use swc_core::common::util::take::Take;".to_string());
        }
        if markers.contains(&SupportMarker::HashMapImport) {
            lines.push("use std::collections::HashMap;".to_string());
        }
        if markers.contains(&SupportMarker::HashSetImport) {
            lines.push("use std::collections::HashSet;".to_string());
        }
        for (marker, id) in [
            (SupportMarker::FsImport, BuiltinModuleId::Fs),
            (SupportMarker::PathImport, BuiltinModuleId::Path),
            (SupportMarker::SerdeJsonImport, BuiltinModuleId::Json),
        ] {
            if markers.contains(&marker) {
                lines.push(format!("{};", modules::info_for(id).swc_use));
            }
        }
        if markers.contains(&SupportMarker::SerdeImport) {
            lines.push("use serde::{Deserialize, Serialize};".to_string());
        }

        let mut locals = Vec::new();
        for use_decl in &self.program.uses {
            if modules::from_str(&use_decl.path).is_some() {
                continue;
            }
            let Some(stem) = modules::local_module_name(&use_decl.path) else {
                continue;
            };
            let stem = keywords::escape_rust(stem);
            locals.push(format!("mod {};", stem));
            if let Some(alias) = &use_decl.alias {
                locals.push(format!("use {} as {};", stem, keywords::escape_rust(alias)));
            }
            if !use_decl.imports.is_empty() {
                let imports = comma_list(use_decl.imports.iter().map(|i| keywords::escape_rust(i)));
                locals.push(format!("use {}::{{{}}};", stem, imports));
            }
        }

        if lines.is_empty() && locals.is_empty() {
            return;
        }
        w.blank_line();
        w.lines(lines.iter().map(String::as_str));
        if !locals.is_empty() {
            if !lines.is_empty() {
                w.blank_line();
            }
            w.lines(locals.iter().map(String::as_str));
        }
    }

    /// Structs, enums and impls; functions and hooks are placed by the caller.
    fn declaration(&mut self, w: &mut CodeWriter, item: &IrItem) -> CodegenResult<()> {
        match item {
            IrItem::Struct(s) => {
                w.blank_line();
                self.struct_decl(w, s)
            }
            IrItem::Enum(e) => {
                w.blank_line();
                self.enum_decl(w, e)
            }
            IrItem::Impl(i) => {
                w.blank_line();
                self.impl_decl(w, i)
            }
            IrItem::Function(_) | IrItem::PreHook(_) | IrItem::ExitHook(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::detection::detect;
    use crate::config::CodegenConfig;
    use crate::ir::{IrBlock, IrFunction, IrParam, IrPlugin, IrProgram, IrType, IrUse};

    fn generate(program: &IrProgram) -> String {
        let detection = detect(program);
        let config = CodegenConfig::default();
        SwcCodegen::new(program, &detection, &config)
            .generate()
            .expect("swc output")
            .code
    }

    #[test]
    fn test_local_module_use() {
        let visit = IrFunction::new(
            "visit_call_expression",
            vec![IrParam::new("node", IrType::named("CallExpression"))],
            IrBlock::default(),
        );
        let program = IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("P", vec![IrItem::Function(visit)])))
            .with_use(IrUse::new("./helpers.lux").with_imports(["escape_string"]));
        let code = generate(&program);
        assert!(code.contains("mod helpers;\nuse helpers::{escape_string};\n"), "{}", code);
        assert!(code.contains("use swc_core::ecma::visit::{VisitMut, VisitMutWith};"));
    }

    #[test]
    fn test_empty_plugin_layout() {
        let program = IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("Empty", vec![])));
        let code = generate(&program);
        assert!(code.starts_with("// Generated by dualgen from `Empty`. Do not edit.\n\nuse swc_core::ecma::ast::*;\n"));
        assert!(code.contains("pub struct Empty;\n"));
        assert!(code.trim_end().ends_with("impl VisitMut for Empty {\n}"), "{}", code);
    }
}
