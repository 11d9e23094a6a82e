//! Visitor emission for the SWC backend
//!
//! Plugins implement `VisitMut`; writers implement the read-only `Visit`. Each bound DSL method
//! becomes the matching `visit_mut_*`/`visit_*` hook. Children are visited explicitly:
//!
//! | flags            | hook body                          |
//! |------------------|------------------------------------|
//! | (none)           | body, then `visit_mut_children_with` |
//! | `on_exit`        | `visit_mut_children_with`, then body |
//! | `skip_children`  | body only                          |
//!
//! Inline `traverse` visitors are hoisted to module-level structs (`__InlineVisitor0`) that copy
//! their captured locals.

use std::mem;

use dualgen_core::lang::keywords;
use dualgen_core::lang::node_kinds::{self, NodeKindId};

use super::{FnContext, SwcCodegen};
use crate::backend::Backend;
use crate::backend::emitter::CodeWriter;
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::visitors::{VisitorBinding, VisitorPlan};
use crate::ir::{IrFunction, IrSpan, IrTraverse, IrType, TraverseVisitor};

/// Which lifecycle hooks `visit_mut_program` runs around the traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Lifecycle {
    pub pre: bool,
    pub exit: bool,
}

impl Lifecycle {
    fn is_active(self) -> bool {
        self.pre || self.exit
    }
}

impl SwcCodegen<'_> {
    pub(crate) fn is_writer(&self) -> bool {
        self.program.decl.is_writer()
    }

    /// `VisitMut`/`Visit`, depending on the program kind.
    pub(crate) fn visit_trait(&self) -> &'static str {
        if self.is_writer() { "Visit" } else { "VisitMut" }
    }

    fn children_call(&self, node: &str) -> String {
        if self.is_writer() {
            format!("{}.visit_children_with(self);", node)
        } else {
            format!("{}.visit_mut_children_with(self);", node)
        }
    }

    /// Emit `impl VisitMut for target { hooks }`.
    pub(crate) fn visitor_impl(
        &mut self,
        w: &mut CodeWriter,
        target: &str,
        plan: &VisitorPlan<'_>,
        lifecycle: Lifecycle,
    ) -> CodegenResult<()> {
        let header = format!("impl {} for {}", self.visit_trait(), target);
        w.try_block(&header, "}", |w| {
            let mut first = true;
            let program_bound = plan
                .visitors
                .iter()
                .any(|(b, _)| b.node_kind == NodeKindId::Program);
            if lifecycle.is_active() && !program_bound {
                self.program_hook(w, lifecycle, None)?;
                first = false;
            }
            for (binding, method) in &plan.visitors {
                if !first {
                    w.blank_line();
                }
                first = false;
                if lifecycle.is_active() && binding.node_kind == NodeKindId::Program {
                    self.program_hook(w, lifecycle, Some((binding, method)))?;
                } else {
                    self.hook(w, binding, method)?;
                }
            }
            Ok(())
        })
    }

    fn hook_signature(&self, binding: &VisitorBinding, param: &str) -> String {
        let info = node_kinds::info_for(binding.node_kind);
        if self.is_writer() {
            format!("fn {}(&mut self, {}: &{})", info.swc_visit_method(), param, info.swc_type)
        } else {
            format!("fn {}(&mut self, {}: &mut {})", info.swc_visit_mut_method(), param, info.swc_type)
        }
    }

    fn hook(&mut self, w: &mut CodeWriter, binding: &VisitorBinding, method: &IrFunction) -> CodegenResult<()> {
        let param = method
            .node_param()
            .map(|p| keywords::escape_rust(&p.name))
            .unwrap_or_else(|| "node".to_string());
        let header = self.hook_signature(binding, &param);
        let children = self.children_call(&param);
        w.try_block(&header, "}", |w| {
            if binding.flags.on_exit && !binding.flags.skip_children {
                w.line(&children);
            }
            self.hook_body(w, binding, method)?;
            if !binding.flags.on_exit && !binding.flags.skip_children {
                w.line(&children);
            }
            Ok(())
        })
    }

    /// `visit_mut_program` running the pre/exit hooks around the traversal.
    fn program_hook(
        &mut self,
        w: &mut CodeWriter,
        lifecycle: Lifecycle,
        bound: Option<(&VisitorBinding, &IrFunction)>,
    ) -> CodegenResult<()> {
        let binding = VisitorBinding {
            method_name: "visit_program".to_string(),
            node_kind: NodeKindId::Program,
            flags: bound.map(|(b, _)| b.flags).unwrap_or_default(),
        };
        let param = bound
            .and_then(|(_, m)| m.node_param())
            .map(|p| keywords::escape_rust(&p.name))
            .unwrap_or_else(|| "node".to_string());
        let header = self.hook_signature(&binding, &param);
        let children = self.children_call(&param);
        w.try_block(&header, "}", |w| {
            if lifecycle.pre {
                w.line("self.pre();");
            }
            if binding.flags.on_exit && !binding.flags.skip_children {
                w.line(&children);
            }
            if let Some((_, method)) = bound {
                self.hook_body(w, &binding, method)?;
            }
            if !binding.flags.on_exit && !binding.flags.skip_children {
                w.line(&children);
            }
            if lifecycle.exit {
                w.line("self.exit();");
            }
            Ok(())
        })
    }

    fn hook_body(
        &mut self,
        w: &mut CodeWriter,
        binding: &VisitorBinding,
        method: &IrFunction,
    ) -> CodegenResult<()> {
        self.locals.push();
        let kind_name = node_kinds::info_for(binding.node_kind).name;
        if let Some(p) = method.node_param() {
            self.locals.declare(&p.name, Some(IrType::named(kind_name)));
        }
        for p in method.params.iter().skip(1) {
            self.locals.declare(&p.name, Some(p.ty.clone()));
        }
        let result = self.block_body(w, &method.body, false);
        self.locals.pop();
        result
    }

    /// Emit a nested traversal at the call site, hoisting inline visitors.
    pub(crate) fn traverse(&mut self, w: &mut CodeWriter, traverse: &IrTraverse, span: IrSpan) -> CodegenResult<()> {
        let target = self.expr(&traverse.target)?;
        let method = if self.is_writer() { "visit_with" } else { "visit_mut_with" };

        match &traverse.visitor {
            TraverseVisitor::Delegated(name) => {
                w.line(&format!("{}.{}(&mut {}::default());", target, method, name));
                Ok(())
            }
            TraverseVisitor::Inline { state, methods } => {
                let mut captured = Vec::with_capacity(traverse.captures.len());
                for capture in &traverse.captures {
                    let ty = self.locals.type_of(capture).cloned().ok_or_else(|| {
                        CodegenError::unsupported(
                            format!("capture `{}` of unknown type in an inline visitor", capture),
                            Backend::Swc,
                            span,
                        )
                    })?;
                    captured.push((capture.clone(), ty.peeled().clone()));
                }

                let n = self.next_visitor;
                self.next_visitor += 1;
                let struct_name = format!("__InlineVisitor{}", n);
                let var = format!("__visitor{}", n);

                let mut inits = Vec::with_capacity(state.len() + captured.len());
                for field in state {
                    let value = match &field.init {
                        Some(init) => self.owned_expr(init)?,
                        None => self.default_value(&field.ty),
                    };
                    inits.push(format!("{}: {}", keywords::escape_rust(&field.name), value));
                }
                for (name, _) in &captured {
                    let name = keywords::escape_rust(name);
                    inits.push(format!("{}: {}.clone()", name, name));
                }

                let mut fields = Vec::with_capacity(inits.len());
                for field in state {
                    fields.push((field.name.clone(), field.ty.clone()));
                }
                fields.extend(captured.iter().cloned());
                let hoisted = self.inline_visitor(&struct_name, &fields, methods, &captured, span)?;
                self.hoisted.push(hoisted);

                let init = match inits.is_empty() {
                    true => struct_name,
                    false => format!("{} {{ {} }}", struct_name, inits.join(", ")),
                };
                w.line(&format!("let mut {} = {};", var, init));
                w.line(&format!("{}.{}(&mut {});", target, method, var));
                Ok(())
            }
        }
    }

    fn inline_visitor(
        &mut self,
        name: &str,
        fields: &[(String, IrType)],
        methods: &[IrFunction],
        captured: &[(String, IrType)],
        span: IrSpan,
    ) -> CodegenResult<String> {
        let mut w = self.writer();
        match fields.is_empty() {
            true => w.line(&format!("struct {};", name)),
            false => {
                let mut lines = Vec::with_capacity(fields.len());
                for (field, ty) in fields {
                    lines.push(format!("{}: {},", keywords::escape_rust(field), self.type_name(ty, span)?));
                }
                w.block(&format!("struct {}", name), "}", |w| {
                    w.lines(lines.iter().map(String::as_str));
                });
            }
        }

        let saved_ctx = mem::replace(
            &mut self.ctx,
            FnContext {
                captures: captured.iter().map(|(n, _)| n.clone()).collect(),
            },
        );
        let mut locals = self.locals.detached();
        locals.declare_fields(name, fields.iter().cloned());
        locals.push();
        locals.declare("self", Some(IrType::named(name)));
        for (capture, ty) in captured {
            locals.declare(capture, Some(ty.clone()));
        }
        let saved_locals = mem::replace(&mut self.locals, locals);

        let plan = VisitorPlan::from_methods(methods);
        self.warnings.extend(plan.warnings.iter().cloned());
        let result = (|| {
            if !plan.helpers.is_empty() {
                w.blank_line();
                w.try_block(&format!("impl {}", name), "}", |w| {
                    for (idx, helper) in plan.helpers.iter().enumerate() {
                        if idx > 0 {
                            w.blank_line();
                        }
                        self.function(w, helper, false)?;
                    }
                    Ok(())
                })?;
            }
            w.blank_line();
            self.visitor_impl(&mut w, name, &plan, Lifecycle::default())
        })();

        self.locals = saved_locals;
        self.ctx = saved_ctx;
        result?;
        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::detection::detect;
    use crate::config::CodegenConfig;
    use crate::ir::{IrBlock, IrExpr, IrItem, IrParam, IrPlugin, IrProgram, IrStmt, IrTopLevel, VisitorFlags};

    fn plugin_with(method: IrFunction) -> IrProgram {
        IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("P", vec![IrItem::Function(method)])))
    }

    fn swc_code(program: &IrProgram) -> String {
        let detection = detect(program);
        let config = CodegenConfig::default();
        SwcCodegen::new(program, &detection, &config)
            .generate()
            .expect("swc output")
            .code
    }

    #[test]
    fn test_on_exit_visits_children_first() {
        let mut method = IrFunction::new(
            "visit_call_expression",
            vec![IrParam::new("node", IrType::named("CallExpression"))],
            IrBlock::new(vec![IrStmt::expr(IrExpr::macro_call("println", vec![IrExpr::string("exit")]))]),
        );
        method.visitor = VisitorFlags {
            on_exit: true,
            skip_children: false,
        };
        let code = swc_code(&plugin_with(method));
        assert!(
            code.contains(
                "    fn visit_mut_call_expr(&mut self, node: &mut CallExpr) {\n        node.visit_mut_children_with(self);\n        println!(\"exit\");\n    }"
            ),
            "{}",
            code
        );
    }

    #[test]
    fn test_skip_children_has_no_descent() {
        let mut method = IrFunction::new(
            "visit_identifier",
            vec![IrParam::new("node", IrType::named("Identifier"))],
            IrBlock::default(),
        );
        method.visitor.skip_children = true;
        let code = swc_code(&plugin_with(method));
        assert!(code.contains("fn visit_mut_ident(&mut self, node: &mut Ident) {\n    }"), "{}", code);
    }
}
