//! Statement and block emission for the SWC backend

use dualgen_core::lang::keywords;

use super::SwcCodegen;
use crate::backend::Backend;
use crate::backend::emitter::{CodeWriter, comma_list};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{
    IrBlock, IrExpr, IrExprKind, IrPattern, IrSpan, IrStmt, IrStmtKind, IrType, PrimitiveType, VerbatimTarget,
};

impl SwcCodegen<'_> {
    /// Emit the statements of a block (without braces) in a fresh scope.
    ///
    /// With `value_tail`, the tail expression is the block's value; otherwise it is a statement.
    pub(crate) fn block_body(&mut self, w: &mut CodeWriter, block: &IrBlock, value_tail: bool) -> CodegenResult<()> {
        self.locals.push();
        let result = self.block_stmts(w, block, value_tail);
        self.locals.pop();
        result
    }

    fn block_stmts(&mut self, w: &mut CodeWriter, block: &IrBlock, value_tail: bool) -> CodegenResult<()> {
        for stmt in &block.stmts {
            self.stmt(w, stmt)?;
        }
        if let Some(tail) = &block.tail {
            if value_tail {
                let out = self.owned_expr(tail)?;
                w.line(&out);
            } else {
                self.expr_stmt(w, tail)?;
            }
        }
        Ok(())
    }

    pub(crate) fn stmt(&mut self, w: &mut CodeWriter, stmt: &IrStmt) -> CodegenResult<()> {
        let span = stmt.span;
        match &stmt.kind {
            IrStmtKind::Block(block) => w.try_block("", "}", |w| self.block_body(w, block, false)),
            IrStmtKind::Let {
                pattern,
                mutable,
                ty,
                init,
            } => self.let_stmt(w, pattern, *mutable, ty.as_ref(), init.as_ref(), span),
            IrStmtKind::Const { name, ty, value } => {
                let (ty, value) = match ty {
                    IrType::Primitive(PrimitiveType::Str) => ("&str".to_string(), self.expr(value)?),
                    _ => (self.type_name(ty, span)?, self.expr(value)?),
                };
                w.line(&format!("const {}: {} = {};", keywords::escape_rust(name), ty, value));
                Ok(())
            }
            IrStmtKind::Expr(expr) => self.expr_stmt(w, expr),
            IrStmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                let cond = self.expr(cond)?;
                w.line(&format!("if {} {{", cond));
                self.nested(w, then_block)?;
                if let Some(else_block) = else_block {
                    w.line("} else {");
                    self.nested(w, else_block)?;
                }
                w.line("}");
                Ok(())
            }
            IrStmtKind::IfLet {
                pattern,
                scrutinee,
                then_block,
                else_block,
            } => self.if_let(w, pattern, scrutinee, then_block, else_block.as_ref(), span),
            IrStmtKind::For {
                binding,
                iterable,
                body,
            } => {
                let elem_ty = self.element_type(iterable);
                let iter = match &iterable.kind {
                    IrExprKind::Range { .. }
                    | IrExprKind::MethodCall { .. }
                    | IrExprKind::Call { .. }
                    | IrExprKind::MacroCall { .. } => self.expr(iterable)?,
                    _ => {
                        let target = self.expr(iterable)?;
                        match iterable.kind {
                            IrExprKind::Ident(_) | IrExprKind::Member { .. } | IrExprKind::Paren(_) => {
                                format!("{}.iter()", target)
                            }
                            _ => format!("({}).iter()", target),
                        }
                    }
                };
                w.line(&format!("for {} in {} {{", keywords::escape_rust(binding), iter));
                self.locals.push();
                self.locals.declare(binding, elem_ty);
                w.indent();
                let result = self.block_body(w, body, false);
                w.dedent();
                self.locals.pop();
                result?;
                w.line("}");
                Ok(())
            }
            IrStmtKind::While { cond, body } => {
                let cond = self.expr(cond)?;
                w.line(&format!("while {} {{", cond));
                self.nested(w, body)?;
                w.line("}");
                Ok(())
            }
            IrStmtKind::Break => {
                w.line("break;");
                Ok(())
            }
            IrStmtKind::Continue => {
                w.line("continue;");
                Ok(())
            }
            IrStmtKind::Return(value) => {
                match value {
                    Some(value) => {
                        let value = self.owned_expr(value)?;
                        w.line(&format!("return {};", value));
                    }
                    None => w.line("return;"),
                }
                Ok(())
            }
            IrStmtKind::Traverse(traverse) => self.traverse(w, traverse, span),
            IrStmtKind::Verbatim { target, code } => {
                if *target == VerbatimTarget::Swc {
                    w.line(code.trim_end());
                }
                Ok(())
            }
        }
    }

    fn nested(&mut self, w: &mut CodeWriter, block: &IrBlock) -> CodegenResult<()> {
        w.indent();
        let result = self.block_body(w, block, false);
        w.dedent();
        result
    }

    fn expr_stmt(&mut self, w: &mut CodeWriter, expr: &IrExpr) -> CodegenResult<()> {
        let out = self.expr(expr)?;
        match expr.kind {
            IrExprKind::Match { .. } | IrExprKind::Block(_) => w.line(&out),
            _ => w.line(&format!("{};", out)),
        }
        Ok(())
    }

    fn element_type(&self, iterable: &IrExpr) -> Option<IrType> {
        if let IrExprKind::Range { .. } = iterable.kind {
            return Some(IrType::int());
        }
        match self.locals.expr_type(iterable)?.peeled() {
            IrType::Collection { args, .. } => args.first().cloned(),
            _ => None,
        }
    }

    fn let_stmt(
        &mut self,
        w: &mut CodeWriter,
        pattern: &IrPattern,
        mutable: bool,
        ty: Option<&IrType>,
        init: Option<&IrExpr>,
        span: IrSpan,
    ) -> CodegenResult<()> {
        if let IrPattern::Ident(name) = pattern {
            let annotation = ty.map(|t| self.type_name(t, span)).transpose()?;
            let init_out = init.map(|e| self.owned_expr(e)).transpose()?;
            let known = ty.cloned().or_else(|| init.and_then(|e| self.locals.inferred_type(e)));
            let mut line = format!("let {}{}", if mutable { "mut " } else { "" }, keywords::escape_rust(name));
            if let Some(annotation) = annotation {
                line.push_str(&format!(": {}", annotation));
            }
            if let Some(init_out) = init_out {
                line.push_str(&format!(" = {}", init_out));
            }
            line.push(';');
            w.line(&line);
            self.locals.declare(name, known);
            return Ok(());
        }

        let init = init.ok_or_else(|| {
            CodegenError::unsupported(format!("`let {}` without an initializer", pattern), Backend::Swc, span)
        })?;
        if let IrPattern::Wildcard = pattern {
            let out = self.expr(init)?;
            w.line(&format!("let _ = {};", out));
            return Ok(());
        }

        let scrutinee_ty = self.locals.expr_type(init).cloned();
        let value = self.expr(init)?;
        let temp = self.temp("let");
        w.line(&format!("let {} = {};", temp, value));

        let lowered = self.lower_pattern(pattern, scrutinee_ty.as_ref(), span)?;
        let names: Vec<String> = pattern.bound_names().into_iter().map(keywords::escape_rust).collect();
        let (targets, values) = match names.as_slice() {
            [] => ("_".to_string(), "()".to_string()),
            [single] => (single.clone(), format!("{}.clone()", single)),
            many => (
                format!("({})", comma_list(many)),
                format!("({})", comma_list(many.iter().map(|n| format!("{}.clone()", n)))),
            ),
        };
        let subject = match lowered.needs_slice {
            true => format!("{}.as_slice()", temp),
            false => format!("&{}", temp),
        };
        let head = match lowered.guard() {
            Some(guard) => format!("{} if {} =>", lowered.pattern, guard),
            None => format!("{} =>", lowered.pattern),
        };
        let mutability = if mutable { "mut " } else { "" };
        w.block(&format!("let {}{} = match {}", mutability, targets, subject), "};", |w| {
            w.block(&head, "}", |w| {
                w.lines(lowered.binding_lines().iter().map(String::as_str));
                w.line(&values);
            });
            w.line(&format!("_ => panic!(\"pattern `{}` did not match\"),", escape_braces(&pattern.to_string())));
        });
        for name in pattern.bound_names() {
            self.locals.declare(name, None);
        }
        Ok(())
    }

    fn if_let(
        &mut self,
        w: &mut CodeWriter,
        pattern: &IrPattern,
        scrutinee: &IrExpr,
        then_block: &IrBlock,
        else_block: Option<&IrBlock>,
        span: IrSpan,
    ) -> CodegenResult<()> {
        let ty = self.locals.expr_type(scrutinee).cloned();
        let lowered = self.lower_pattern(pattern, ty.as_ref(), span)?;
        let mut subject = self.expr(scrutinee)?;
        if lowered.needs_slice {
            subject = format!("{}.as_slice()", subject);
        }

        self.locals.push();
        for name in pattern.bound_names() {
            self.locals.declare(name, None);
        }
        let then_out = self.arm_body(w, then_block, &lowered.binding_lines());
        self.locals.pop();
        let then_out = then_out?;
        let else_out = else_block.map(|b| self.arm_body(w, b, &[])).transpose()?;

        match lowered.guard() {
            None => {
                w.line(&format!("if let {} = {} {{", lowered.pattern, subject));
                push_body(w, &then_out);
                if let Some(else_out) = else_out {
                    w.line("} else {");
                    push_body(w, &else_out);
                }
                w.line("}");
            }
            Some(guard) => {
                w.block(&format!("match {}", subject), "}", |w| {
                    w.line(&format!("{} if {} => {{", lowered.pattern, guard));
                    push_body(w, &then_out);
                    w.line("}");
                    w.line("_ => {");
                    if let Some(else_out) = &else_out {
                        push_body(w, else_out);
                    }
                    w.line("}");
                });
            }
        }
        Ok(())
    }

    /// Render a branch body one level deeper than the branch header, as text.
    fn arm_body(&mut self, w: &CodeWriter, block: &IrBlock, bindings: &[String]) -> CodegenResult<String> {
        let mut body = w.fork();
        body.indent();
        body.lines(bindings.iter().map(String::as_str));
        self.block_body(&mut body, block, false)?;
        Ok(body.finish().trim_end_matches('\n').to_string())
    }
}

fn push_body(w: &mut CodeWriter, body: &str) {
    if !body.is_empty() {
        w.line(body);
    }
}

/// Escape `{`/`}` for use inside a `panic!` format string.
fn escape_braces(s: &str) -> String {
    s.replace('{', "{{").replace('}', "}}")
}
