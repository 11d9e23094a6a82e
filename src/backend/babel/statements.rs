//! Statement, block and `match` emission for the Babel backend
//!
//! A `match` in statement or tail position becomes an `if`/`else if` chain over the lowered
//! pattern conditions; only a `match` nested inside an expression needs an IIFE.

use dualgen_core::lang::keywords;

use super::BabelCodegen;
use super::types::js_string;
use crate::backend::Backend;
use crate::backend::emitter::{CodeWriter, comma_list};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{
    IrBlock, IrExpr, IrExprKind, IrLiteral, IrMatchArm, IrPattern, IrSpan, IrStmt, IrStmtKind, IrType, VerbatimTarget,
};

/// What happens to the value of a block's tail expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TailMode {
    /// Evaluate for side effects
    Discard,
    /// `return` it from the enclosing function
    Return,
}

impl BabelCodegen<'_> {
    /// Emit the statements of a block (without braces) in a fresh scope.
    pub(crate) fn block_body(&mut self, w: &mut CodeWriter, block: &IrBlock, tail: TailMode) -> CodegenResult<()> {
        self.locals.push();
        let result = self.block_stmts(w, block, tail);
        self.locals.pop();
        result
    }

    fn block_stmts(&mut self, w: &mut CodeWriter, block: &IrBlock, tail: TailMode) -> CodegenResult<()> {
        for stmt in &block.stmts {
            self.stmt(w, stmt)?;
        }
        if let Some(expr) = &block.tail {
            self.tail_expr(w, expr, tail)?;
        }
        Ok(())
    }

    fn tail_expr(&mut self, w: &mut CodeWriter, expr: &IrExpr, mode: TailMode) -> CodegenResult<()> {
        match (&expr.kind, mode) {
            (IrExprKind::Match { scrutinee, arms }, _) => {
                self.match_chain(w, scrutinee, arms, mode, expr.span)?;
            }
            (IrExprKind::Block(block), _) => w.try_block("", "}", |w| self.block_body(w, block, mode))?,
            (IrExprKind::Literal(IrLiteral::Unit), TailMode::Discard) => {}
            (IrExprKind::Literal(IrLiteral::Unit), TailMode::Return) => w.line("return;"),
            (_, TailMode::Discard) => {
                let out = self.expr(expr)?;
                w.line(&format!("{};", out));
            }
            (_, TailMode::Return) => {
                let out = self.expr(expr)?;
                w.line(&format!("return {};", out));
            }
        }
        Ok(())
    }

    pub(crate) fn stmt(&mut self, w: &mut CodeWriter, stmt: &IrStmt) -> CodegenResult<()> {
        let span = stmt.span;
        match &stmt.kind {
            IrStmtKind::Block(block) => w.try_block("", "}", |w| self.block_body(w, block, TailMode::Discard)),
            IrStmtKind::Let {
                pattern,
                mutable,
                ty,
                init,
            } => self.let_stmt(w, pattern, *mutable, ty.as_ref(), init.as_ref(), span),
            IrStmtKind::Const { name, ty, value } => {
                let value = self.expr(value)?;
                w.line(&format!("const {} = {};", keywords::escape_js(name), value));
                self.locals.declare(name, Some(ty.clone()));
                Ok(())
            }
            IrStmtKind::Expr(expr) => self.tail_expr(w, expr, TailMode::Discard),
            IrStmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                let cond = self.expr(cond)?;
                w.line(&format!("if ({}) {{", cond));
                self.nested(w, then_block, &[])?;
                if let Some(else_block) = else_block {
                    w.line("} else {");
                    self.nested(w, else_block, &[])?;
                }
                w.line("}");
                Ok(())
            }
            IrStmtKind::IfLet {
                pattern,
                scrutinee,
                then_block,
                else_block,
            } => {
                let ty = self.locals.expr_type(scrutinee).cloned();
                let subject = self.subject(w, scrutinee, "iflet")?;
                let lowered = self.lower_pattern(pattern, &subject, ty.as_ref(), span)?;
                w.line(&format!("if ({}) {{", lowered.condition()));
                self.nested(w, then_block, &lowered.bindings)?;
                if let Some(else_block) = else_block {
                    w.line("} else {");
                    self.nested(w, else_block, &[])?;
                }
                w.line("}");
                Ok(())
            }
            IrStmtKind::For {
                binding,
                iterable,
                body,
            } => {
                let name = keywords::escape_js(binding);
                let (header, elem_ty) = match &iterable.kind {
                    IrExprKind::Range { start, end, inclusive } => {
                        let end = end.as_deref().ok_or_else(|| {
                            CodegenError::unsupported("unbounded range in a `for` header", Backend::Babel, span)
                        })?;
                        let start = match start {
                            Some(start) => self.expr(start)?,
                            None => "0".to_string(),
                        };
                        let end = self.expr(end)?;
                        let cmp = if *inclusive { "<=" } else { "<" };
                        (
                            format!("for (let {n} = {}; {n} {} {}; {n}++)", start, cmp, end, n = name),
                            Some(IrType::int()),
                        )
                    }
                    _ => {
                        let elem_ty = match self.locals.expr_type(iterable).map(IrType::peeled) {
                            Some(IrType::Collection { args, .. }) => args.first().cloned(),
                            _ => None,
                        };
                        (format!("for (const {} of {})", name, self.expr(iterable)?), elem_ty)
                    }
                };
                self.locals.push();
                self.locals.declare(binding, elem_ty);
                let result = w.try_block(&header, "}", |w| self.block_body(w, body, TailMode::Discard));
                self.locals.pop();
                result
            }
            IrStmtKind::While { cond, body } => {
                let cond = self.expr(cond)?;
                w.try_block(&format!("while ({})", cond), "}", |w| {
                    self.block_body(w, body, TailMode::Discard)
                })
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
                        let value = self.expr(value)?;
                        w.line(&format!("return {};", value));
                    }
                    None => w.line("return;"),
                }
                Ok(())
            }
            IrStmtKind::Traverse(traverse) => self.traverse(w, traverse, span),
            IrStmtKind::Verbatim { target, code } => {
                if *target == VerbatimTarget::Babel {
                    w.line(code.trim_end());
                }
                Ok(())
            }
        }
    }

    /// Emit a branch body one level deeper, after its pattern bindings.
    fn nested(&mut self, w: &mut CodeWriter, block: &IrBlock, bindings: &[(String, String)]) -> CodegenResult<()> {
        w.indent();
        self.locals.push();
        for (name, value) in bindings {
            w.line(&format!("const {} = {};", name, value));
            self.locals.declare(name, None);
        }
        let result = self.block_body(w, block, TailMode::Discard);
        self.locals.pop();
        w.dedent();
        result
    }

    /// Render `scrutinee` once: identifiers and member chains are reused, anything else is
    /// bound to a `const` temporary first.
    fn subject(&mut self, w: &mut CodeWriter, scrutinee: &IrExpr, prefix: &str) -> CodegenResult<String> {
        let out = self.expr(scrutinee)?;
        match scrutinee.kind {
            IrExprKind::Ident(_) | IrExprKind::Member { .. } => Ok(out),
            _ => {
                let temp = self.temp(prefix);
                w.line(&format!("const {} = {};", temp, out));
                Ok(temp)
            }
        }
    }

    /// Emit a `match` as an `if`/`else if` chain.
    ///
    /// Returns `true` when the chain ends in an unguarded irrefutable arm, i.e. some branch always runs.
    pub(crate) fn match_chain(
        &mut self,
        w: &mut CodeWriter,
        scrutinee: &IrExpr,
        arms: &[IrMatchArm],
        mode: TailMode,
        span: IrSpan,
    ) -> CodegenResult<bool> {
        let ty = self.locals.expr_type(scrutinee).cloned();
        let subject = self.subject(w, scrutinee, "match")?;

        let mut opened = false;
        for arm in arms {
            let lowered = self.lower_pattern(&arm.pattern, &subject, ty.as_ref(), span)?;
            let guard = match &arm.guard {
                Some(guard) => Some(self.arm_guard(guard, &lowered.bindings)?),
                None => None,
            };
            let catch_all = lowered.is_irrefutable() && guard.is_none();
            let condition = match (lowered.is_irrefutable(), guard) {
                (_, None) => lowered.condition(),
                (true, Some(guard)) => guard,
                (false, Some(guard)) => format!("{} && {}", lowered.condition(), guard),
            };

            let header = match (opened, catch_all) {
                (false, true) => "{".to_string(),
                (false, false) => format!("if ({}) {{", condition),
                (true, true) => "} else {".to_string(),
                (true, false) => format!("}} else if ({}) {{", condition),
            };
            w.line(&header);
            opened = true;
            w.indent();
            self.locals.push();
            for (name, value) in &lowered.bindings {
                w.line(&format!("const {} = {};", name, value));
                self.locals.declare(name, None);
            }
            let result = match &arm.body.kind {
                IrExprKind::Block(block) => self.block_body(w, block, mode),
                _ => self.tail_expr(w, &arm.body, mode),
            };
            self.locals.pop();
            w.dedent();
            result?;

            if catch_all {
                w.line("}");
                return Ok(true);
            }
        }
        if opened {
            w.line("}");
        }
        Ok(false)
    }

    /// A guard runs before the arm's bindings exist, so bound names are passed to an arrow.
    fn arm_guard(&mut self, guard: &IrExpr, bindings: &[(String, String)]) -> CodegenResult<String> {
        if bindings.is_empty() {
            return self.expr(guard);
        }
        self.locals.push();
        for (name, _) in bindings {
            self.locals.declare(name, None);
        }
        let body = self.expr(guard);
        self.locals.pop();
        let params = comma_list(bindings.iter().map(|(n, _)| n));
        let args = comma_list(bindings.iter().map(|(_, v)| v));
        Ok(format!("(({}) => {})({})", params, body?, args))
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
        let keyword = if mutable || init.is_none() { "let" } else { "const" };
        if let IrPattern::Ident(name) = pattern {
            let known = ty.cloned().or_else(|| init.and_then(|e| self.locals.inferred_type(e)));
            let line = match init {
                Some(init) => format!("{} {} = {};", keyword, keywords::escape_js(name), self.expr(init)?),
                None => format!("let {};", keywords::escape_js(name)),
            };
            w.line(&line);
            self.locals.declare(name, known);
            return Ok(());
        }

        let init = init.ok_or_else(|| {
            CodegenError::unsupported(format!("`let {}` without an initializer", pattern), Backend::Babel, span)
        })?;
        if let IrPattern::Wildcard = pattern {
            let out = self.expr(init)?;
            w.line(&format!("{};", out));
            return Ok(());
        }

        let scrutinee_ty = self.locals.expr_type(init).cloned();
        let value = self.expr(init)?;
        let temp = self.temp("let");
        w.line(&format!("const {} = {};", temp, value));
        let lowered = self.lower_pattern(pattern, &temp, scrutinee_ty.as_ref(), span)?;
        if !lowered.is_irrefutable() {
            let message = js_string(&format!("pattern `{}` did not match", pattern));
            w.line(&format!("if (!({})) throw new Error({});", lowered.condition(), message));
        }
        for (name, value) in &lowered.bindings {
            w.line(&format!("{} {} = {};", keyword, name, value));
        }
        for name in pattern.bound_names() {
            self.locals.declare(name, None);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::detection::Detection;
    use crate::config::CodegenConfig;
    use crate::ir::{BinaryOp, IrModule, IrProgram, IrTopLevel};

    fn emit(stmts: Vec<IrStmt>) -> String {
        let program = IrProgram::new(IrTopLevel::Module(IrModule {
            name: "m".into(),
            items: vec![],
            span: IrSpan::default(),
        }));
        let detection = Detection::default();
        let config = CodegenConfig::default();
        let mut codegen = BabelCodegen::new(&program, &detection, &config);
        let mut w = CodeWriter::with_indent_width(2);
        codegen
            .block_body(&mut w, &IrBlock::new(stmts), TailMode::Discard)
            .expect("statements emit");
        w.finish()
    }

    #[test]
    fn test_let_is_const_unless_mutable() {
        let mut mutable = IrStmt::let_("count", IrExpr::int(0));
        if let IrStmtKind::Let { mutable: m, .. } = &mut mutable.kind {
            *m = true;
        }
        let out = emit(vec![IrStmt::let_("name", IrExpr::string("x")), mutable]);
        assert_eq!(out, "const name = \"x\";\nlet count = 0;\n");
    }

    #[test]
    fn test_match_statement_becomes_if_chain() {
        let arms = vec![
            IrMatchArm::new(
                IrPattern::Literal(IrLiteral::Int(1)),
                IrExpr::macro_call("println", vec![IrExpr::string("one")]),
            ),
            IrMatchArm::new(IrPattern::Wildcard, IrExpr::macro_call("println", vec![IrExpr::string("other")])),
        ];
        let out = emit(vec![IrStmt::expr(IrExpr::match_(IrExpr::ident("n"), arms))]);
        assert_eq!(
            out,
            "if (n === 1) {\n  println(\"one\");\n} else {\n  println(\"other\");\n}\n"
        );
    }

    #[test]
    fn test_guard_sees_bindings() {
        let arms = vec![
            IrMatchArm::new(IrPattern::variant("Some", vec![IrPattern::ident("v")]), IrExpr::ident("v")).with_guard(
                IrExpr::binary(BinaryOp::Gt, IrExpr::ident("v"), IrExpr::int(0)),
            ),
        ];
        let out = emit(vec![IrStmt::expr(IrExpr::match_(IrExpr::ident("x"), arms))]);
        assert!(out.starts_with("if (x != null && ((v) => v > 0)(x)) {\n  const v = x;\n  v;\n}"), "{}", out);
    }

    #[test]
    fn test_range_for_is_counting_loop() {
        let range = IrExpr::new(IrExprKind::Range {
            start: None,
            end: Some(Box::new(IrExpr::int(3))),
            inclusive: false,
        });
        let out = emit(vec![IrStmt::new(IrStmtKind::For {
            binding: "i".into(),
            iterable: range,
            body: IrBlock::new(vec![IrStmt::new(IrStmtKind::Continue)]),
        })]);
        assert_eq!(out, "for (let i = 0; i < 3; i++) {\n  continue;\n}\n");
    }

    #[test]
    fn test_refutable_let_throws() {
        let out = emit(vec![IrStmt::new(IrStmtKind::Let {
            pattern: IrPattern::variant("Some", vec![IrPattern::ident("v")]),
            mutable: false,
            ty: None,
            init: Some(IrExpr::call("lookup", vec![])),
        })]);
        assert_eq!(
            out,
            "const __let0 = lookup();\nif (!(__let0 != null)) throw new Error(\"pattern `Some(v)` did not match\");\nconst v = __let0;\n"
        );
    }

    #[test]
    fn test_verbatim_for_babel_only() {
        let out = emit(vec![
            IrStmt::new(IrStmtKind::Verbatim {
                target: VerbatimTarget::Swc,
                code: "eprintln!(\"1\");".into(),
            }),
            IrStmt::new(IrStmtKind::Verbatim {
                target: VerbatimTarget::Babel,
                code: "console.log(1);".into(),
            }),
        ]);
        assert_eq!(out, "console.log(1);\n");
    }
}
