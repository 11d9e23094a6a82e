//! Expression emission for the SWC backend

use dualgen_core::lang::builders::Slot;
use dualgen_core::lang::keywords;
use dualgen_core::lang::macros;
use dualgen_core::lang::methods::{self, MethodId};
use dualgen_core::lang::node_kinds::{self, NodeKindId};
use dualgen_core::lang::operators;

use super::{LoweredPattern, SwcCodegen};
use crate::backend::emitter::{CodeWriter, comma_list};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::{Backend, node_builder};
use crate::ir::{
    BinaryOp, CollectionKind, IrBlock, IrExpr, IrExprKind, IrFieldInit, IrLiteral, IrMatchArm, IrSpan, IrType,
};

impl SwcCodegen<'_> {
    /// Rust spelling of a literal.
    pub(crate) fn literal(&self, lit: &IrLiteral) -> String {
        match lit {
            IrLiteral::Int(v) => v.to_string(),
            IrLiteral::Float(v) if v.is_nan() => "f64::NAN".to_string(),
            IrLiteral::Float(v) if v.is_infinite() => {
                if *v > 0.0 { "f64::INFINITY" } else { "f64::NEG_INFINITY" }.to_string()
            }
            IrLiteral::Float(v) => format!("{:?}", v),
            IrLiteral::Str(s) => format!("{:?}", s),
            IrLiteral::Bool(b) => b.to_string(),
            IrLiteral::Null => "None".to_string(),
            IrLiteral::Unit => "()".to_string(),
        }
    }

    /// Emit an expression in a position that takes ownership (`let`, struct fields, returns).
    ///
    /// String literals become `String`s there.
    pub(crate) fn owned_expr(&mut self, expr: &IrExpr) -> CodegenResult<String> {
        let out = self.expr(expr)?;
        Ok(match &expr.kind {
            IrExprKind::Literal(IrLiteral::Str(_)) => format!("{}.to_string()", out),
            _ => out,
        })
    }

    pub(crate) fn expr(&mut self, expr: &IrExpr) -> CodegenResult<String> {
        let span = expr.span;
        match &expr.kind {
            IrExprKind::Literal(lit) => Ok(self.literal(lit)),
            IrExprKind::Ident(name) => Ok(self.ident(name)),
            IrExprKind::Call { callee, args } => {
                let owned = matches!(callee.kind, IrExprKind::Ident(_));
                let callee = self.postfix_operand(callee)?;
                let args = self.args(args, owned)?;
                Ok(format!("{}({})", callee, args))
            }
            IrExprKind::MacroCall { name, args } => {
                let delimiter = macros::delimiter_for(name);
                let args = self.args(args, name == "vec")?;
                Ok(format!("{}!{}{}{}", name, delimiter.open(), args, delimiter.close()))
            }
            IrExprKind::Member { object, property, path } => self.member(object, property, *path),
            IrExprKind::MethodCall { receiver, method, args } => self.method_call(receiver, method, args),
            IrExprKind::Index { object, index } => {
                let by_key = matches!(
                    self.locals.expr_type(object).map(IrType::peeled).and_then(IrType::collection_kind),
                    Some(CollectionKind::HashMap)
                );
                let target = self.postfix_operand(object)?;
                let idx = self.expr(index)?;
                Ok(match &index.kind {
                    _ if by_key => format!("{}[&{}]", target, idx),
                    IrExprKind::Literal(IrLiteral::Int(_)) | IrExprKind::Range { .. } => {
                        format!("{}[{}]", target, idx)
                    }
                    _ => format!("{}[{} as usize]", target, idx),
                })
            }
            IrExprKind::Binary { op, left, right } => {
                if *op == BinaryOp::Add && self.is_string_expr(left) {
                    return self.string_concat(expr);
                }
                let spelled = self.operator(op.operator(), span)?;
                let prec = operators::info_for(op.operator()).precedence;
                let l = self.operand(left, prec, false)?;
                let r = self.operand(right, prec, true)?;
                Ok(format!("{} {} {}", l, spelled, r))
            }
            IrExprKind::Unary { op, operand } => {
                let spelled = self.operator(op.operator(), span)?;
                let inner = self.unary_operand(operand, operators::info_for(op.operator()).precedence)?;
                Ok(format!("{}{}", spelled, inner))
            }
            IrExprKind::Assign { target, value } => {
                let target = self.expr(target)?;
                let value = self.owned_expr(value)?;
                Ok(format!("{} = {}", target, value))
            }
            IrExprKind::CompoundAssign { op, target, value } => {
                let spelled = self.operator(op.operator(), span)?;
                let string_target = self.is_string_expr(target);
                let target = self.expr(target)?;
                let value = self.expr(value)?;
                if string_target && spelled == "+=" {
                    return Ok(format!("{}.push_str(&{})", target, value));
                }
                Ok(format!("{} {} {}", target, spelled, value))
            }
            IrExprKind::Match { scrutinee, arms } => self.match_expr(scrutinee, arms, span),
            IrExprKind::Matches { scrutinee, pattern } => {
                let ty = self.locals.expr_type(scrutinee).cloned();
                let lowered = self.lower_pattern(pattern, ty.as_ref(), span)?;
                let mut subject = self.expr(scrutinee)?;
                if lowered.needs_slice {
                    subject = format!("{}.as_slice()", subject);
                }
                Ok(match lowered.guard() {
                    Some(guard) => format!("matches!({}, {} if {})", subject, lowered.pattern, guard),
                    None => format!("matches!({}, {})", subject, lowered.pattern),
                })
            }
            IrExprKind::StructInit { name, fields } => self.struct_init(name, fields, span),
            IrExprKind::VecInit(items) => Ok(format!("vec![{}]", self.args(items, true)?)),
            IrExprKind::Closure { params, body } => {
                self.locals.push();
                for p in params {
                    self.locals.declare(p, None);
                }
                let body = self.expr(body);
                self.locals.pop();
                let params = comma_list(params.iter().map(|p| keywords::escape_rust(p)));
                Ok(format!("|{}| {}", params, body?))
            }
            IrExprKind::Ref { mutable, expr: inner } => {
                let inner = self.operand(inner, 80, true)?;
                Ok(format!("&{}{}", if *mutable { "mut " } else { "" }, inner))
            }
            IrExprKind::Deref(inner) => Ok(format!("*{}", self.operand(inner, 80, true)?)),
            IrExprKind::Range { start, end, inclusive } => {
                let start = start.as_deref().map(|e| self.expr(e)).transpose()?.unwrap_or_default();
                let end = end.as_deref().map(|e| self.expr(e)).transpose()?.unwrap_or_default();
                Ok(format!("{}{}{}", start, if *inclusive { "..=" } else { ".." }, end))
            }
            IrExprKind::Try(inner) => Ok(format!("{}?", self.postfix_operand(inner)?)),
            IrExprKind::Paren(inner) => Ok(format!("({})", self.expr(inner)?)),
            IrExprKind::Block(block) => self.block_expr(block),
        }
    }

    fn ident(&self, name: &str) -> String {
        if self.ctx.captures.iter().any(|c| c == name) {
            return format!("self.{}", keywords::escape_rust(name));
        }
        keywords::escape_rust(name)
    }

    fn args(&mut self, args: &[IrExpr], owned: bool) -> CodegenResult<String> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            out.push(if owned { self.owned_expr(arg)? } else { self.expr(arg)? });
        }
        Ok(comma_list(out))
    }

    /// Receiver of a call, field access or `?` (parenthesized unless atomic).
    fn postfix_operand(&mut self, expr: &IrExpr) -> CodegenResult<String> {
        let out = self.expr(expr)?;
        Ok(match expr.kind {
            IrExprKind::Binary { .. }
            | IrExprKind::Unary { .. }
            | IrExprKind::Ref { .. }
            | IrExprKind::Deref(_)
            | IrExprKind::Range { .. }
            | IrExprKind::Closure { .. }
            | IrExprKind::Assign { .. }
            | IrExprKind::CompoundAssign { .. } => format!("({})", out),
            _ => out,
        })
    }

    /// Operand of a prefix operator; nested prefixes and negative literals are parenthesized.
    fn unary_operand(&mut self, expr: &IrExpr, parent: u8) -> CodegenResult<String> {
        if is_signed_operand(expr) {
            return Ok(format!("({})", self.expr(expr)?));
        }
        self.operand(expr, parent, true)
    }

    /// Operand of an operator with precedence `parent`.
    fn operand(&mut self, expr: &IrExpr, parent: u8, right: bool) -> CodegenResult<String> {
        let own = match &expr.kind {
            IrExprKind::Binary { op, .. } => Some(operators::info_for(op.operator()).precedence),
            IrExprKind::Assign { .. } | IrExprKind::CompoundAssign { .. } | IrExprKind::Range { .. } => Some(0),
            IrExprKind::Closure { .. } => Some(0),
            _ => None,
        };
        let out = self.expr(expr)?;
        Ok(match own {
            Some(p) if p < parent || (right && p == parent) => format!("({})", out),
            _ => out,
        })
    }

    fn is_string_expr(&self, expr: &IrExpr) -> bool {
        match &expr.kind {
            IrExprKind::Literal(IrLiteral::Str(_)) => true,
            IrExprKind::MacroCall { name, .. } => name == "format",
            IrExprKind::Binary {
                op: BinaryOp::Add, left, ..
            } => self.is_string_expr(left),
            _ => self.locals.expr_type(expr).is_some_and(|t| t.peeled().is_string()),
        }
    }

    /// `a + b + c` on strings becomes a single `format!`.
    fn string_concat(&mut self, expr: &IrExpr) -> CodegenResult<String> {
        let mut parts = Vec::new();
        let mut cursor = expr;
        while let IrExprKind::Binary {
            op: BinaryOp::Add,
            left,
            right,
        } = &cursor.kind
        {
            parts.push(right.as_ref());
            cursor = left;
        }
        parts.push(cursor);
        parts.reverse();

        let mut rendered = Vec::with_capacity(parts.len());
        for part in parts {
            rendered.push(self.expr(part)?);
        }
        Ok(format!("format!(\"{}\", {})", "{}".repeat(rendered.len()), comma_list(rendered)))
    }

    fn member(&mut self, object: &IrExpr, property: &str, path: bool) -> CodegenResult<String> {
        if path {
            return Ok(format!("{}::{}", self.expr(object)?, property));
        }
        let field = self
            .locals
            .expr_type(object)
            .and_then(|t| t.peeled().node_kind())
            .and_then(|id| node_kinds::info_for(id).field(property))
            .and_then(|f| f.swc);
        let property = match field {
            Some(swc) => swc.to_string(),
            None => keywords::escape_rust(property),
        };
        Ok(format!("{}.{}", self.postfix_operand(object)?, property))
    }

    fn method_call(&mut self, receiver: &IrExpr, method: &str, args: &[IrExpr]) -> CodegenResult<String> {
        if method == "remove" && args.is_empty() && self.is_node_rooted(receiver) {
            return Ok(format!("{}.take()", self.postfix_operand(receiver)?));
        }
        let receiver_kind = self
            .locals
            .expr_type(receiver)
            .map(IrType::peeled)
            .and_then(IrType::collection_kind);
        let recv = self.postfix_operand(receiver)?;
        let mut rendered = Vec::with_capacity(args.len());
        for arg in args {
            let out = match methods::from_str(method) {
                Some(MethodId::Contains | MethodId::ContainsKey) => format!("&{}", self.owned_expr(arg)?),
                Some(MethodId::Get) if receiver_kind == Some(CollectionKind::HashMap) => {
                    format!("&{}", self.owned_expr(arg)?)
                }
                Some(MethodId::Push | MethodId::Insert) => self.owned_expr(arg)?,
                _ => self.expr(arg)?,
            };
            rendered.push(out);
        }
        Ok(format!("{}.{}({})", recv, method, comma_list(rendered)))
    }

    fn struct_init(&mut self, name: &str, fields: &[IrFieldInit], span: IrSpan) -> CodegenResult<String> {
        if self.user_types.struct_named(name).is_none()
            && let Some(kind) = node_kinds::from_str(name)
        {
            return self.construct_node(kind, fields, span);
        }
        let declared = self.user_types.struct_named(name).map(|s| s.fields.len());
        let mut parts = Vec::with_capacity(fields.len() + 1);
        for field in fields {
            let key = keywords::escape_rust(&field.name);
            let value = self.owned_expr(&field.value)?;
            parts.push(if value == key { key } else { format!("{}: {}", key, value) });
        }
        if declared.is_some_and(|n| n > fields.len()) {
            parts.push("..Default::default()".to_string());
        }
        if parts.is_empty() {
            return Ok(format!("{} {{}}", name));
        }
        Ok(format!("{} {{ {} }}", name, comma_list(parts)))
    }

    /// Fill the builder template for a node literal.
    fn construct_node(&mut self, kind: NodeKindId, fields: &[IrFieldInit], span: IrSpan) -> CodegenResult<String> {
        let builder = node_builder(kind, fields, Backend::Swc, span)?;
        let mut out = builder.swc.to_string();
        for arg in builder.args {
            let value = match (fields.iter().find(|f| f.name == arg.field), arg.swc_default) {
                (Some(init), _) => self.builder_arg(arg.slot, &init.value)?,
                (None, Some(default)) => default.to_string(),
                (None, None) => {
                    return Err(CodegenError::unsupported(
                        format!("`{}` literal without its `{}` field", node_kinds::info_for(kind).name, arg.field),
                        Backend::Swc,
                        span,
                    ));
                }
            };
            out = out.replace(&format!("{{{}}}", arg.field), &value);
        }
        Ok(out)
    }

    fn builder_arg(&mut self, slot: Slot, value: &IrExpr) -> CodegenResult<String> {
        Ok(match slot {
            Slot::Value => self.expr(value)?,
            Slot::Expr => self.wrapped_node(value, "Expr")?,
            Slot::OptExpr => format!("Some(Box::new({}))", self.wrapped_node(value, "Expr")?),
            Slot::ExprList => self.wrapped_list(value, "Expr")?,
            Slot::StmtList => self.wrapped_list(value, "Stmt")?,
            Slot::MemberProp => match identifier_name(value) {
                Some(name) => format!("MemberProp::Ident(IdentName::new({}.into(), DUMMY_SP))", self.expr(name)?),
                None => format!(
                    "MemberProp::Computed(ComputedPropName {{ span: DUMMY_SP, expr: Box::new({}) }})",
                    self.wrapped_node(value, "Expr")?
                ),
            },
        })
    }

    /// `value` as an SWC `target` (`Expr`, `Stmt`), wrapped in its node kind's enum path.
    fn wrapped_node(&mut self, value: &IrExpr, target: &str) -> CodegenResult<String> {
        let kind = self.locals.node_kind_of(value);
        let mut out = self.expr(value)?;
        if is_place(value) {
            out = format!("{}.clone()", out);
        }
        if let Some(kind) = kind {
            for variant in node_kinds::info_for(kind).swc_path_from(Some(target)).iter().rev() {
                out = format!("{}({})", variant, out);
            }
        }
        Ok(out)
    }

    fn wrapped_list(&mut self, value: &IrExpr, target: &str) -> CodegenResult<String> {
        let IrExprKind::VecInit(items) = &value.kind else {
            let out = self.expr(value)?;
            return Ok(if is_place(value) { format!("{}.clone()", out) } else { out });
        };
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(self.wrapped_node(item, target)?);
        }
        Ok(format!("vec![{}]", comma_list(parts)))
    }

    /// A node-typed expression or a field of one.
    fn is_node_rooted(&self, expr: &IrExpr) -> bool {
        let is_node = |e: &IrExpr| self.locals.node_kind_of(e).is_some();
        match &expr.kind {
            IrExprKind::Member { object, path: false, .. } => is_node(expr) || is_node(object),
            _ => is_node(expr),
        }
    }

    fn match_expr(&mut self, scrutinee: &IrExpr, arms: &[IrMatchArm], span: IrSpan) -> CodegenResult<String> {
        let ty = self.locals.expr_type(scrutinee).cloned();
        let mut lowered = Vec::with_capacity(arms.len());
        for arm in arms {
            lowered.push(self.lower_pattern(&arm.pattern, ty.as_ref(), span)?);
        }
        let mut subject = self.expr(scrutinee)?;
        if lowered.iter().any(|l| l.needs_slice) {
            subject = format!("{}.as_slice()", subject);
        }

        let mut w = self.writer();
        w.try_block(&format!("match {}", subject), "}", |w| {
            for (arm, pat) in arms.iter().zip(&lowered) {
                self.locals.push();
                for name in arm.pattern.bound_names() {
                    self.locals.declare(name, None);
                }
                let arm_out = self.match_arm(w, arm, pat);
                self.locals.pop();
                arm_out?;
            }
            Ok(())
        })?;
        Ok(w.finish().trim_end().to_string())
    }

    fn match_arm(&mut self, w: &mut CodeWriter, arm: &IrMatchArm, pat: &LoweredPattern) -> CodegenResult<()> {
        let bindings = pat.binding_lines();
        let mut guards = pat.guards.clone();
        if let Some(user) = &arm.guard {
            let user = self.expr(user)?;
            guards.push(match bindings.is_empty() {
                true => user,
                false => format!("{{ {} {} }}", bindings.join(" "), user),
            });
        }
        let head = match guards.is_empty() {
            true => pat.pattern.clone(),
            false => format!("{} if {}", pat.pattern, guards.join(" && ")),
        };

        match &arm.body.kind {
            IrExprKind::Block(block) => {
                w.try_block(&format!("{} =>", head), "}", |w| {
                    w.lines(bindings.iter().map(String::as_str));
                    self.block_body(w, block, true)
                })?;
            }
            _ if !bindings.is_empty() => {
                let body = self.expr(&arm.body)?;
                w.block(&format!("{} =>", head), "}", |w| {
                    w.lines(bindings.iter().map(String::as_str));
                    w.line(&body);
                });
            }
            _ => {
                let body = self.expr(&arm.body)?;
                w.line(&format!("{} => {},", head, body));
            }
        }
        Ok(())
    }

    fn block_expr(&mut self, block: &IrBlock) -> CodegenResult<String> {
        let mut w = self.writer();
        w.try_block("", "}", |w| self.block_body(w, block, true))?;
        Ok(w.finish().trim_end().to_string())
    }
}

/// The `name` of an `Identifier { name }` literal.
fn identifier_name(value: &IrExpr) -> Option<&IrExpr> {
    match &value.kind {
        IrExprKind::StructInit { name, fields } if name == "Identifier" => {
            fields.iter().find(|f| f.name == "name").map(|f| &f.value)
        }
        _ => None,
    }
}

/// A variable or field read, which must be cloned to become part of a new node.
fn is_place(value: &IrExpr) -> bool {
    matches!(value.kind, IrExprKind::Ident(_) | IrExprKind::Member { path: false, .. } | IrExprKind::Index { .. })
}

/// A prefix expression or a negative numeric literal.
fn is_signed_operand(expr: &IrExpr) -> bool {
    match &expr.kind {
        IrExprKind::Unary { .. } => true,
        IrExprKind::Literal(IrLiteral::Int(v)) => *v < 0,
        IrExprKind::Literal(IrLiteral::Float(v)) => v.is_sign_negative(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{Backend, render_expr};
    use crate::ir::{BinaryOp, IrExpr, IrExprKind, IrType, UnaryOp};

    fn swc(expr: &IrExpr) -> String {
        render_expr(Backend::Swc, expr).expect("expression renders")
    }

    #[test]
    fn test_nested_prefix_operands_are_parenthesized() {
        let neg = |e| IrExpr::unary(UnaryOp::Neg, e);
        assert_eq!(swc(&neg(neg(IrExpr::ident("x")))), "-(-x)");
        assert_eq!(swc(&neg(IrExpr::int(-5))), "-(-5)");
    }

    #[test]
    fn test_node_literals_fill_constructor_templates() {
        let ident = |name: &str| IrExpr::struct_init("Identifier", [("name", IrExpr::string(name))]);
        assert_eq!(swc(&ident("x")), "Ident::new(\"x\".into(), DUMMY_SP, SyntaxContext::empty())");
        let call = IrExpr::struct_init(
            "CallExpression",
            [
                ("callee", ident("log")),
                (
                    "arguments",
                    IrExpr::new(IrExprKind::VecInit(vec![IrExpr::struct_init(
                        "StringLiteral",
                        [("value", IrExpr::string("hi"))],
                    )])),
                ),
            ],
        );
        let out = swc(&call);
        assert!(
            out.starts_with(
                "CallExpr { span: DUMMY_SP, callee: Callee::Expr(Box::new(Expr::Ident(Ident::new(\"log\".into(), DUMMY_SP, SyntaxContext::empty())))), "
            ),
            "{}",
            out
        );
        assert!(
            out.contains("args: vec![Expr::Lit(Lit::Str(Str { span: DUMMY_SP, value: \"hi\".into(), raw: None }))].into_iter()"),
            "{}",
            out
        );
        assert!(out.ends_with("..Default::default() }"), "{}", out);
        let ret = IrExpr::struct_init("ReturnStatement", Vec::<(&str, IrExpr)>::new());
        assert_eq!(swc(&ret), "ReturnStmt { span: DUMMY_SP, arg: None }");
    }

    #[test]
    fn test_member_literal_properties_and_cloned_places() {
        let member = IrExpr::struct_init(
            "MemberExpression",
            [
                ("object", IrExpr::ident("obj")),
                ("property", IrExpr::struct_init("Identifier", [("name", IrExpr::string("x"))])),
            ],
        );
        assert_eq!(
            swc(&member),
            "MemberExpr { span: DUMMY_SP, obj: Box::new(obj.clone()), prop: MemberProp::Ident(IdentName::new(\"x\".into(), DUMMY_SP)) }"
        );
        let node = IrExpr::ident("node").with_ty(IrType::named("Identifier"));
        let stmt = IrExpr::struct_init("ExpressionStatement", [("expression", node)]);
        assert_eq!(swc(&stmt), "ExprStmt { span: DUMMY_SP, expr: Box::new(Expr::Ident(node.clone())) }");
    }

    #[test]
    fn test_remove_takes_the_node() {
        let node = IrExpr::ident("node").with_ty(IrType::named("CallExpression"));
        assert_eq!(swc(&IrExpr::method_call(node.clone(), "remove", vec![])), "node.take()");
        assert_eq!(swc(&IrExpr::method_call(IrExpr::member(node, "callee"), "remove", vec![])), "node.callee.take()");
        let list = IrExpr::ident("items").with_ty(IrType::vec(IrType::int()));
        assert_eq!(swc(&IrExpr::method_call(list, "remove", vec![IrExpr::int(0)])), "items.remove(0)");
    }

    #[test]
    fn test_literals() {
        assert_eq!(swc(&IrExpr::string("a\"b")), "\"a\\\"b\"");
        assert_eq!(swc(&IrExpr::float(1.0)), "1.0");
        assert_eq!(swc(&IrExpr::float(f64::NAN)), "f64::NAN");
        assert_eq!(swc(&IrExpr::bool(true)), "true");
    }

    #[test]
    fn test_precedence_parens() {
        let sum = IrExpr::binary(BinaryOp::Add, IrExpr::ident("a"), IrExpr::ident("b"));
        let product = IrExpr::binary(BinaryOp::Mul, sum, IrExpr::ident("c"));
        assert_eq!(swc(&product), "(a + b) * c");
        let not = IrExpr::unary(UnaryOp::Not, IrExpr::binary(BinaryOp::Eq, IrExpr::ident("a"), IrExpr::int(1)));
        assert_eq!(swc(&not), "!(a == 1)");
    }

    #[test]
    fn test_string_concat_uses_format() {
        let e = IrExpr::binary(
            BinaryOp::Add,
            IrExpr::binary(BinaryOp::Add, IrExpr::string("a"), IrExpr::ident("b")),
            IrExpr::ident("c"),
        );
        assert_eq!(swc(&e), "format!(\"{}{}{}\", \"a\", b, c)");
    }

    #[test]
    fn test_pow_is_unsupported() {
        let e = IrExpr::binary(BinaryOp::Pow, IrExpr::int(2), IrExpr::int(3));
        assert!(render_expr(Backend::Swc, &e).is_err());
    }

    #[test]
    fn test_macro_delimiters() {
        assert_eq!(swc(&IrExpr::macro_call("vec", vec![IrExpr::string("x")])), "vec![\"x\".to_string()]");
        assert_eq!(
            swc(&IrExpr::macro_call("format", vec![IrExpr::string("{}"), IrExpr::ident("n")])),
            "format!(\"{}\", n)"
        );
    }

    #[test]
    fn test_node_field_mapping() {
        let node = IrExpr::ident("node").with_ty(IrType::named("CallExpression"));
        assert_eq!(swc(&IrExpr::member(node, "arguments")), "node.args");
    }

    #[test]
    fn test_contains_borrows_argument() {
        let e = IrExpr::method_call(IrExpr::ident("names"), "contains", vec![IrExpr::string("x")]);
        assert_eq!(swc(&e), "names.contains(&\"x\".to_string())");
    }
}
