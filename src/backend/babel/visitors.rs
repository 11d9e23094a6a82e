//! Visitor emission for the Babel backend
//!
//! Each bound DSL method becomes an entry of the plugin's `visitor` object keyed by the Babel node
//! type. The visited node is read from `path.node`:
//!
//! | flags            | entry                                     |
//! |------------------|-------------------------------------------|
//! | (none)           | `Kind(path) { ... }`                      |
//! | `on_exit`        | `Kind: { exit(path) { ... } }`            |
//! | `skip_children`  | `Kind(path) { path.skip(); ... }`         |
//!
//! Nested traversal goes through `path.traverse`. Inline visitors get their state object as the
//! second argument, which Babel binds to `this` inside the hooks.

use std::mem;

use dualgen_core::lang::keywords;
use dualgen_core::lang::node_kinds;

use super::structures::FnStyle;
use super::{BabelCodegen, FnContext};
use crate::backend::Backend;
use crate::backend::emitter::CodeWriter;
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::visitors::{VisitorBinding, VisitorPlan};
use crate::ir::{IrExpr, IrExprKind, IrFunction, IrSpan, IrTraverse, IrType, TraverseVisitor};

use super::statements::TailMode;

impl BabelCodegen<'_> {
    /// Emit the entries of a `visitor` object (without the surrounding braces).
    pub(crate) fn visitor_entries(&mut self, w: &mut CodeWriter, plan: &VisitorPlan<'_>) -> CodegenResult<()> {
        for (binding, method) in &plan.visitors {
            self.hook(w, binding, method)?;
        }
        Ok(())
    }

    fn hook(&mut self, w: &mut CodeWriter, binding: &VisitorBinding, method: &IrFunction) -> CodegenResult<()> {
        let kind = node_kinds::info_for(binding.node_kind).name;
        let exit = binding.flags.on_exit && !binding.flags.skip_children;
        if exit {
            w.try_block(&format!("{}:", kind), "},", |w| {
                w.try_block("exit(path)", "},", |w| self.hook_body(w, binding, method))
            })
        } else {
            w.try_block(&format!("{}(path)", kind), "},", |w| {
                if binding.flags.skip_children {
                    w.line("path.skip();");
                }
                self.hook_body(w, binding, method)
            })
        }
    }

    fn hook_body(&mut self, w: &mut CodeWriter, binding: &VisitorBinding, method: &IrFunction) -> CodegenResult<()> {
        let param = method.node_param().map(|p| keywords::escape_js(&p.name));
        if let Some(param) = &param {
            w.line(&format!("const {} = path.node;", param));
        }
        let self_ref = self.ctx.self_ref;
        let saved = mem::replace(
            &mut self.ctx,
            FnContext {
                node_param: Some(param.unwrap_or_else(|| "node".to_string())),
                self_ref,
            },
        );
        self.locals.push();
        let kind_name = node_kinds::info_for(binding.node_kind).name;
        if let Some(p) = method.node_param() {
            self.locals.declare(&p.name, Some(IrType::named(kind_name)));
        }
        for p in method.params.iter().skip(1) {
            self.locals.declare(&p.name, Some(p.ty.clone()));
        }
        let result = self.block_body(w, &method.body, TailMode::Discard);
        self.locals.pop();
        self.ctx = saved;
        result
    }

    /// The `NodePath` of `target`: the visited node itself or one of its fields.
    ///
    /// `construct` names the operation needing the path in the error.
    pub(crate) fn node_path(&self, target: &IrExpr, construct: &str, span: IrSpan) -> CodegenResult<String> {
        let Some(node_param) = self.ctx.node_param.as_deref() else {
            return Err(CodegenError::unsupported(
                format!("{} outside a visitor method", construct),
                Backend::Babel,
                span,
            ));
        };
        let is_node = |e: &IrExpr| matches!(&e.kind, IrExprKind::Ident(name) if keywords::escape_js(name) == node_param);
        match &target.kind {
            _ if is_node(target) => Ok("path".to_string()),
            IrExprKind::Member {
                object,
                property,
                path: false,
            } if is_node(object) => {
                let field = self
                    .locals
                    .expr_type(object)
                    .and_then(|t| t.peeled().node_kind())
                    .and_then(|id| node_kinds::info_for(id).field(property))
                    .map_or_else(|| keywords::escape_js(property), |f| f.babel.to_string());
                Ok(format!("path.get({})", super::types::js_string(&field)))
            }
            _ => Err(CodegenError::unsupported(
                format!("{} target other than the visited node or one of its fields", construct),
                Backend::Babel,
                span,
            )),
        }
    }

    pub(crate) fn traverse(&mut self, w: &mut CodeWriter, traverse: &IrTraverse, span: IrSpan) -> CodegenResult<()> {
        let path = self.node_path(&traverse.target, "`traverse`", span)?;
        match &traverse.visitor {
            TraverseVisitor::Delegated(name) => {
                w.line(&format!("{}.traverse({}({{ types: t }}).visitor);", path, name));
                Ok(())
            }
            TraverseVisitor::Inline { state, methods } => {
                let plan = VisitorPlan::from_methods(methods);
                self.warnings.extend(plan.warnings.iter().cloned());

                let mut state_entries = Vec::with_capacity(state.len());
                for field in state {
                    let value = match &field.init {
                        Some(init) => self.expr(init)?,
                        None => self.default_value(&field.ty),
                    };
                    state_entries.push(format!("{}: {},", keywords::escape_js(&field.name), value));
                }

                let owner = format!("__InlineVisitor{}", self.next_visitor);
                self.next_visitor += 1;
                self.locals
                    .declare_fields(&owner, state.iter().map(|f| (f.name.clone(), f.ty.clone())));
                self.locals.push();
                self.locals.declare("self", Some(IrType::named(owner)));
                let saved = mem::replace(
                    &mut self.ctx,
                    FnContext {
                        node_param: None,
                        self_ref: "this",
                    },
                );
                let result = (|| {
                    w.line(&format!("{}.traverse(", path));
                    w.indent();
                    w.try_block("", "},", |w| self.visitor_entries(w, &plan))?;
                    w.try_block("", "},", |w| {
                        w.lines(state_entries.iter().map(String::as_str));
                        for helper in &plan.helpers {
                            self.function(w, helper, FnStyle::Entry, "this")?;
                        }
                        Ok(())
                    })?;
                    w.dedent();
                    w.line(");");
                    Ok(())
                })();
                self.ctx = saved;
                self.locals.pop();
                result
            }
        }
    }
}
