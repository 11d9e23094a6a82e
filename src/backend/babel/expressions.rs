//! Expression emission for the Babel backend

use dualgen_core::lang::builders::Slot;
use dualgen_core::lang::keywords;
use dualgen_core::lang::methods::{self, BabelForm, ListForm, UntypedReceiver};
use dualgen_core::lang::node_kinds::{self, NodeKindId};
use dualgen_core::lang::operators;
use dualgen_core::lang::types;

use super::BabelCodegen;
use super::statements::TailMode;
use crate::backend::{Backend, node_builder};
use crate::backend::emitter::comma_list;
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{
    BinaryOp, CollectionKind, CompoundOp, IrBlock, IrExpr, IrExprKind, IrFieldInit, IrLiteral, IrSpan, IrType, UnaryOp,
};

impl BabelCodegen<'_> {
    pub(crate) fn expr(&mut self, expr: &IrExpr) -> CodegenResult<String> {
        let span = expr.span;
        match &expr.kind {
            IrExprKind::Literal(lit) => Ok(self.literal(lit)),
            IrExprKind::Ident(name) => Ok(self.ident(name)),
            IrExprKind::Call { callee, args } => {
                if args.is_empty()
                    && let Some(value) = constructor_default(callee)
                {
                    return Ok(value.to_string());
                }
                let callee = self.postfix_operand(callee)?;
                Ok(format!("{}({})", callee, self.args(args)?))
            }
            IrExprKind::MacroCall { name, args } => Ok(format!("{}({})", name, self.args(args)?)),
            IrExprKind::Member { object, property, path } => {
                let property_out = match path {
                    true => property.clone(),
                    false => self
                        .locals
                        .expr_type(object)
                        .and_then(|t| t.peeled().node_kind())
                        .and_then(|id| node_kinds::info_for(id).field(property))
                        .map_or_else(|| keywords::escape_js(property), |f| f.babel.to_string()),
                };
                Ok(format!("{}.{}", self.postfix_operand(object)?, property_out))
            }
            IrExprKind::MethodCall { receiver, method, args } => self.method_call(receiver, method, args, span),
            IrExprKind::Index { object, index } => {
                let is_map = self.collection_of(object) == Some(CollectionKind::HashMap);
                let target = self.postfix_operand(object)?;
                let idx = self.expr(index)?;
                Ok(match is_map {
                    true => format!("{}.get({})", target, idx),
                    false => format!("{}[{}]", target, idx),
                })
            }
            IrExprKind::Binary { op, left, right } => {
                let spelled = self.operator(op.operator(), span)?;
                let prec = operators::info_for(op.operator()).precedence;
                // JS rejects an unparenthesized prefix operand on the left of `**`
                let l = match op {
                    BinaryOp::Pow if is_signed_operand(left) => format!("({})", self.expr(left)?),
                    _ => self.operand(left, prec, false)?,
                };
                let r = self.operand(right, prec, true)?;
                if *op == BinaryOp::Div && self.is_int_expr(left) && self.is_int_expr(right) {
                    return Ok(format!("Math.trunc({} / {})", l, r));
                }
                Ok(format!("{} {} {}", l, spelled, r))
            }
            IrExprKind::Unary { op, operand } => {
                let spelled = self.operator(op.operator(), span)?;
                let inner = self.unary_operand(operand, operators::info_for(op.operator()).precedence)?;
                Ok(format!("{}{}", spelled, inner))
            }
            IrExprKind::Assign { target, value } => {
                if let IrExprKind::Index { object, index } = &target.kind
                    && self.collection_of(object) == Some(CollectionKind::HashMap)
                {
                    let map = self.postfix_operand(object)?;
                    let key = self.expr(index)?;
                    let value = self.expr(value)?;
                    return Ok(format!("{}.set({}, {})", map, key, value));
                }
                // `*node = v` replaces the node in the tree
                if let IrExprKind::Deref(node) = &target.kind {
                    let path = self.node_path(node, "assignment through `*`", span)?;
                    let value = self.expr(value)?;
                    return Ok(format!("{}.replaceWith({})", path, value));
                }
                let target = self.expr(target)?;
                let value = self.expr(value)?;
                Ok(format!("{} = {}", target, value))
            }
            IrExprKind::CompoundAssign { op, target, value } => {
                let spelled = self.operator(op.operator(), span)?;
                let truncate = *op == CompoundOp::Div && self.is_int_expr(target) && self.is_int_expr(value);
                let target = self.expr(target)?;
                if truncate {
                    let divisor = self.operand(value, operators::info_for(BinaryOp::Div.operator()).precedence, true)?;
                    return Ok(format!("{} = Math.trunc({} / {})", target, target, divisor));
                }
                let value = self.expr(value)?;
                Ok(format!("{} {} {}", target, spelled, value))
            }
            IrExprKind::Match { scrutinee, arms } => {
                let mut w = self.writer();
                w.line("(() => {");
                w.indent();
                let exhaustive = self.match_chain(&mut w, scrutinee, arms, TailMode::Return, span)?;
                if !exhaustive {
                    w.line("throw new Error(\"non-exhaustive match\");");
                }
                w.dedent();
                w.line("})()");
                Ok(w.finish().trim_end().to_string())
            }
            IrExprKind::Matches { scrutinee, pattern } => {
                let ty = self.locals.expr_type(scrutinee).cloned();
                let subject = self.expr(scrutinee)?;
                match scrutinee.kind {
                    IrExprKind::Ident(_) | IrExprKind::Member { .. } => {
                        let lowered = self.lower_pattern(pattern, &subject, ty.as_ref(), span)?;
                        Ok(format!("({})", lowered.condition()))
                    }
                    _ => {
                        let temp = self.temp("m");
                        let lowered = self.lower_pattern(pattern, &temp, ty.as_ref(), span)?;
                        Ok(format!("(({}) => {})({})", temp, lowered.condition(), subject))
                    }
                }
            }
            IrExprKind::StructInit { name, fields } => self.struct_init(name, fields, span),
            IrExprKind::VecInit(items) => Ok(format!("[{}]", self.args(items)?)),
            IrExprKind::Closure { params, body } => {
                self.locals.push();
                for p in params {
                    self.locals.declare(p, None);
                }
                let body = match &body.kind {
                    IrExprKind::Block(block) => self.function_block(block),
                    IrExprKind::StructInit { .. } => self.expr(body).map(|b| format!("({})", b)),
                    _ => self.expr(body),
                };
                self.locals.pop();
                let params = comma_list(params.iter().map(|p| keywords::escape_js(p)));
                Ok(format!("({}) => {}", params, body?))
            }
            IrExprKind::Ref { expr: inner, .. } | IrExprKind::Deref(inner) => self.expr(inner),
            IrExprKind::Range { .. } => Err(CodegenError::unsupported(
                "range expression outside a `for` header",
                Backend::Babel,
                span,
            )),
            IrExprKind::Try(_) => Err(CodegenError::unsupported("`?` operator", Backend::Babel, span)),
            IrExprKind::Paren(inner) => Ok(format!("({})", self.expr(inner)?)),
            IrExprKind::Block(block) => Ok(format!("(() => {})()", self.function_block(block)?)),
        }
    }

    fn ident(&self, name: &str) -> String {
        if name == "self" {
            return self.ctx.self_ref.to_string();
        }
        keywords::escape_js(name)
    }

    fn args(&mut self, args: &[IrExpr]) -> CodegenResult<String> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            out.push(self.expr(arg)?);
        }
        Ok(comma_list(out))
    }

    /// Statically integer-valued; JS division on these must truncate.
    fn is_int_expr(&self, expr: &IrExpr) -> bool {
        match &expr.kind {
            IrExprKind::Literal(IrLiteral::Int(_)) => true,
            IrExprKind::Paren(inner) => self.is_int_expr(inner),
            IrExprKind::Unary {
                op: UnaryOp::Neg | UnaryOp::BitNot,
                operand,
            } => self.is_int_expr(operand),
            IrExprKind::Binary {
                op: BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem,
                left,
                right,
            } => self.is_int_expr(left) && self.is_int_expr(right),
            _ => self.locals.expr_type(expr).is_some_and(IrType::is_int),
        }
    }

    /// A node-typed expression or a field of one.
    fn is_node_rooted(&self, expr: &IrExpr) -> bool {
        let is_node = |e: &IrExpr| self.locals.node_kind_of(e).is_some();
        match &expr.kind {
            IrExprKind::Member { object, path: false, .. } => is_node(expr) || is_node(object),
            _ => is_node(expr),
        }
    }

    fn collection_of(&self, expr: &IrExpr) -> Option<CollectionKind> {
        self.locals
            .expr_type(expr)
            .map(IrType::peeled)
            .and_then(IrType::collection_kind)
    }

    fn postfix_operand(&mut self, expr: &IrExpr) -> CodegenResult<String> {
        let out = self.expr(expr)?;
        Ok(match expr.kind {
            IrExprKind::Binary { .. }
            | IrExprKind::Unary { .. }
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

    fn operand(&mut self, expr: &IrExpr, parent: u8, right: bool) -> CodegenResult<String> {
        let own = match &expr.kind {
            IrExprKind::Binary { op, .. } => Some(operators::info_for(op.operator()).precedence),
            IrExprKind::Assign { .. } | IrExprKind::CompoundAssign { .. } | IrExprKind::Closure { .. } => Some(0),
            _ => None,
        };
        let out = self.expr(expr)?;
        Ok(match own {
            Some(p) if p < parent || (right && p == parent) => format!("({})", out),
            _ => out,
        })
    }

    fn method_call(&mut self, receiver: &IrExpr, method: &str, args: &[IrExpr], span: IrSpan) -> CodegenResult<String> {
        if method == "remove" && args.is_empty() && self.is_node_rooted(receiver) {
            let path = self.node_path(receiver, "`remove()`", span)?;
            return Ok(format!("{}.remove()", path));
        }
        let kind = self.collection_of(receiver);
        let recv = self.postfix_operand(receiver)?;
        let mut rendered = Vec::with_capacity(args.len());
        for arg in args {
            rendered.push(self.expr(arg)?);
        }
        let Some(id) = methods::from_str(method) else {
            return Ok(format!("{}.{}({})", recv, keywords::escape_js(method), comma_list(rendered)));
        };
        let sized = |property: &'static str| match (property, kind) {
            ("length", Some(CollectionKind::HashSet | CollectionKind::HashMap)) => "size",
            _ => property,
        };
        Ok(match methods::info_for(id).babel {
            BabelForm::Property(name) => format!("{}.{}", recv, sized(name)),
            BabelForm::Method(name) => format!("{}.{}({})", recv, name, comma_list(rendered)),
            BabelForm::Identity => recv,
            BabelForm::WrapCall(func) => format!("{}({})", func, recv),
            BabelForm::Compare { property, op, rhs } => match property {
                Some(property) => format!("({}.{} {} {})", recv, sized(property), op, rhs),
                None => format!("({} {} {})", recv, op, rhs),
            },
            BabelForm::ByCollection { set, map, list, untyped } => {
                let name = match (kind, untyped) {
                    (Some(CollectionKind::HashSet), _) => set,
                    (Some(CollectionKind::HashMap), _) | (None, UntypedReceiver::Map) => map,
                    (None, UntypedReceiver::SetOrMap) if rendered.len() == 2 => map,
                    (None, UntypedReceiver::SetOrMap) => set,
                    (Some(CollectionKind::Vec), _) | (None, UntypedReceiver::List) => match list {
                        ListForm::Method(name) => name,
                        ListForm::InsertAt => {
                            let [index, value] = rendered.as_slice() else {
                                return Err(CodegenError::unsupported(
                                    format!("`{}` on a list with {} arguments", method, rendered.len()),
                                    Backend::Babel,
                                    span,
                                ));
                            };
                            return Ok(format!("{}.splice({}, 0, {})", recv, index, value));
                        }
                    },
                };
                format!("{}.{}({})", recv, name, comma_list(rendered))
            }
        })
    }

    fn struct_init(&mut self, name: &str, fields: &[IrFieldInit], span: IrSpan) -> CodegenResult<String> {
        if self.user_types.struct_named(name).is_none()
            && let Some(kind) = node_kinds::from_str(name)
        {
            return self.construct_node(kind, fields, span);
        }
        let Some(decl) = self.user_types.struct_named(name) else {
            let mut parts = Vec::with_capacity(fields.len());
            for field in fields {
                parts.push(format!("{}: {}", keywords::escape_js(&field.name), self.expr(&field.value)?));
            }
            return Ok(match parts.is_empty() {
                true => "{}".to_string(),
                false => format!("{{ {} }}", comma_list(parts)),
            });
        };
        let mut args = Vec::with_capacity(decl.fields.len());
        for declared in &decl.fields {
            match fields.iter().find(|f| f.name == declared.name) {
                Some(init) => args.push(self.expr(&init.value)?),
                None => args.push("undefined".to_string()),
            }
        }
        while args.last().is_some_and(|a| a == "undefined") {
            args.pop();
        }
        Ok(format!("new {}({})", name, comma_list(args)))
    }

    /// `t.<builder>(args)` for a node literal.
    fn construct_node(&mut self, kind: NodeKindId, fields: &[IrFieldInit], span: IrSpan) -> CodegenResult<String> {
        let name = node_kinds::info_for(kind).name;
        let builder = node_builder(kind, fields, Backend::Babel, span)?;
        let mut args = Vec::with_capacity(builder.args.len() + 1);
        for arg in builder.args {
            match (fields.iter().find(|f| f.name == arg.field), arg.babel_default) {
                (Some(init), _) => {
                    args.push(self.expr(&init.value)?);
                    let named = self.locals.node_kind_of(&init.value) == Some(NodeKindId::Identifier);
                    if arg.slot == Slot::MemberProp && !named {
                        args.push("true".to_string());
                    }
                }
                (None, Some(default)) => args.push(default.to_string()),
                (None, None) => {
                    return Err(CodegenError::unsupported(
                        format!("`{}` literal without its `{}` field", name, arg.field),
                        Backend::Babel,
                        span,
                    ));
                }
            }
        }
        Ok(format!("t.{}({})", builder.babel, comma_list(args)))
    }

    /// `{ ...; return tail; }` as a single (multi-line) string.
    fn function_block(&mut self, block: &IrBlock) -> CodegenResult<String> {
        let mut w = self.writer();
        w.try_block("", "}", |w| self.block_body(w, block, TailMode::Return))?;
        Ok(w.finish().trim_end().to_string())
    }
}

/// The JS value of `HashMap::new()`, `Vec::new()`, `Str::new()` and the like.
fn constructor_default(callee: &IrExpr) -> Option<&'static str> {
    let IrExprKind::Member {
        object,
        property,
        path: true,
    } = &callee.kind
    else {
        return None;
    };
    let IrExprKind::Ident(owner) = &object.kind else {
        return None;
    };
    if property != "new" {
        return None;
    }
    match (types::collection_from_str(owner), owner.as_str()) {
        (Some(id), _) => Some(types::collection(id).babel_default),
        (None, "String") => Some("\"\""),
        (None, _) => types::primitive_from_str(owner).map(|id| types::primitive(id).babel_default),
    }
}

/// A prefix expression or a negative numeric literal.
fn is_signed_operand(expr: &IrExpr) -> bool {
    match &expr.kind {
        IrExprKind::Unary { .. } => true,
        IrExprKind::Literal(IrLiteral::Int(v)) => *v < 0,
        IrExprKind::Literal(IrLiteral::Float(v)) => v.is_sign_negative(),
        IrExprKind::Ref { expr: inner, .. } | IrExprKind::Deref(inner) => is_signed_operand(inner),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{Backend, render_expr};
    use crate::ir::{BinaryOp, CompoundOp, IrExpr, IrExprKind, IrType, UnaryOp};

    fn babel(expr: &IrExpr) -> String {
        render_expr(Backend::Babel, expr).expect("expression renders")
    }

    #[test]
    fn test_equality_is_strict() {
        let e = IrExpr::binary(BinaryOp::Eq, IrExpr::ident("a"), IrExpr::string("b"));
        assert_eq!(babel(&e), "a === \"b\"");
    }

    #[test]
    fn test_bitnot_and_pow() {
        assert_eq!(babel(&IrExpr::unary(UnaryOp::BitNot, IrExpr::ident("x"))), "~x");
        assert_eq!(babel(&IrExpr::binary(BinaryOp::Pow, IrExpr::int(2), IrExpr::int(3))), "2 ** 3");
    }

    #[test]
    fn test_nested_prefix_operands_are_parenthesized() {
        let x = IrExpr::ident("x");
        let neg = |e| IrExpr::unary(UnaryOp::Neg, e);
        assert_eq!(babel(&neg(neg(x.clone()))), "-(-x)");
        assert_eq!(babel(&neg(IrExpr::int(-5))), "-(-5)");
        assert_eq!(babel(&IrExpr::unary(UnaryOp::Not, IrExpr::unary(UnaryOp::Not, x.clone()))), "!(!x)");
        assert_eq!(babel(&neg(x.clone())), "-x");
        assert_eq!(babel(&IrExpr::binary(BinaryOp::Pow, neg(x), IrExpr::int(2))), "(-x) ** 2");
    }

    #[test]
    fn test_builtin_methods() {
        let names = IrExpr::ident("names").with_ty(IrType::hashset(IrType::str()));
        assert_eq!(babel(&IrExpr::method_call(names.clone(), "contains", vec![IrExpr::ident("x")])), "names.has(x)");
        assert_eq!(babel(&IrExpr::method_call(names, "len", vec![])), "names.size");
        let list = IrExpr::ident("items").with_ty(IrType::vec(IrType::str()));
        assert_eq!(babel(&IrExpr::method_call(list.clone(), "contains", vec![IrExpr::ident("x")])), "items.includes(x)");
        assert_eq!(babel(&IrExpr::method_call(list, "is_empty", vec![])), "(items.length === 0)");
    }

    #[test]
    fn test_list_insert_splices_at_index() {
        let list = IrExpr::ident("items").with_ty(IrType::vec(IrType::int()));
        let e = IrExpr::method_call(list, "insert", vec![IrExpr::int(0), IrExpr::ident("x")]);
        assert_eq!(babel(&e), "items.splice(0, 0, x)");
    }

    #[test]
    fn test_untyped_receivers_do_not_take_list_forms() {
        let recv = IrExpr::ident("seen");
        let one = IrExpr::method_call(recv.clone(), "insert", vec![IrExpr::ident("x")]);
        assert_eq!(babel(&one), "seen.add(x)");
        let two = IrExpr::method_call(recv.clone(), "insert", vec![IrExpr::ident("k"), IrExpr::ident("v")]);
        assert_eq!(babel(&two), "seen.set(k, v)");
        assert_eq!(babel(&IrExpr::method_call(recv.clone(), "get", vec![IrExpr::ident("k")])), "seen.get(k)");
        assert_eq!(babel(&IrExpr::method_call(recv, "contains", vec![IrExpr::ident("x")])), "seen.includes(x)");
    }

    #[test]
    fn test_collection_constructors_become_js_values() {
        let new = |owner: &str| IrExpr::call_expr(IrExpr::path(owner, "new"), vec![]);
        assert_eq!(babel(&new("HashMap")), "new Map()");
        assert_eq!(babel(&new("HashSet")), "new Set()");
        assert_eq!(babel(&new("Vec")), "[]");
        assert_eq!(babel(&new("String")), "\"\"");
        assert_eq!(babel(&IrExpr::call_expr(IrExpr::path("Helper", "new"), vec![])), "Helper.new()");
    }

    #[test]
    fn test_node_literals_call_type_builders() {
        let ident = |name: &str| IrExpr::struct_init("Identifier", [("name", IrExpr::string(name))]);
        assert_eq!(babel(&ident("x")), "t.identifier(\"x\")");
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
        assert_eq!(babel(&call), "t.callExpression(t.identifier(\"log\"), [t.stringLiteral(\"hi\")])");
        let bare_call = IrExpr::struct_init("CallExpression", [("callee", ident("f"))]);
        assert_eq!(babel(&bare_call), "t.callExpression(t.identifier(\"f\"), [])");
        let ret = IrExpr::struct_init("ReturnStatement", Vec::<(&str, IrExpr)>::new());
        assert_eq!(babel(&ret), "t.returnStatement(null)");
    }

    #[test]
    fn test_member_literal_marks_computed_properties() {
        let named = IrExpr::struct_init(
            "MemberExpression",
            [
                ("object", IrExpr::ident("obj")),
                ("property", IrExpr::struct_init("Identifier", [("name", IrExpr::string("x"))])),
            ],
        );
        assert_eq!(babel(&named), "t.memberExpression(obj, t.identifier(\"x\"))");
        let computed = IrExpr::struct_init(
            "MemberExpression",
            [("object", IrExpr::ident("obj")), ("property", IrExpr::ident("key"))],
        );
        assert_eq!(babel(&computed), "t.memberExpression(obj, key, true)");
    }

    #[test]
    fn test_node_literal_errors() {
        let missing = IrExpr::struct_init("Identifier", Vec::<(&str, IrExpr)>::new());
        let err = render_expr(Backend::Babel, &missing).unwrap_err();
        assert!(err.to_string().contains("without its `name` field"), "{}", err);
        let extra = IrExpr::struct_init("Identifier", [("name", IrExpr::string("x")), ("span", IrExpr::int(0))]);
        assert!(render_expr(Backend::Babel, &extra).is_err());
        let jsx = IrExpr::struct_init("JSXElement", Vec::<(&str, IrExpr)>::new());
        let err = render_expr(Backend::Babel, &jsx).unwrap_err();
        assert!(err.to_string().contains("constructing `JSXElement` nodes"), "{}", err);
    }

    #[test]
    fn test_remove_outside_visitor_is_unsupported() {
        let node = IrExpr::ident("node").with_ty(IrType::named("Identifier"));
        assert!(render_expr(Backend::Babel, &IrExpr::method_call(node, "remove", vec![])).is_err());
        let list = IrExpr::ident("items").with_ty(IrType::vec(IrType::int()));
        assert_eq!(babel(&IrExpr::method_call(list, "remove", vec![IrExpr::int(0)])), "items.remove(0)");
    }

    #[test]
    fn test_integer_division_truncates() {
        let a = IrExpr::ident("a").with_ty(IrType::int());
        let div = |l, r| IrExpr::binary(BinaryOp::Div, l, r);
        assert_eq!(babel(&div(a.clone(), IrExpr::int(2))), "Math.trunc(a / 2)");
        assert_eq!(babel(&div(IrExpr::ident("x"), IrExpr::int(2))), "x / 2");
        assert_eq!(babel(&div(IrExpr::float(7.0), IrExpr::int(2))), "7.0 / 2");
        let sum = IrExpr::binary(BinaryOp::Add, a.clone(), IrExpr::int(1));
        assert_eq!(babel(&div(sum, IrExpr::int(2))), "Math.trunc((a + 1) / 2)");
        let halve = IrExpr::compound_assign(CompoundOp::Div, a, IrExpr::int(2));
        assert_eq!(babel(&halve), "a = Math.trunc(a / 2)");
    }

    #[test]
    fn test_node_field_mapping_and_paths() {
        let node = IrExpr::ident("node").with_ty(IrType::named("Identifier"));
        assert_eq!(babel(&IrExpr::member(node, "name")), "node.name");
        assert_eq!(babel(&IrExpr::path("Kind", "A")), "Kind.A");
    }

    #[test]
    fn test_macros_call_shims() {
        let e = IrExpr::macro_call("format", vec![IrExpr::string("{}!"), IrExpr::ident("n")]);
        assert_eq!(babel(&e), "format(\"{}!\", n)");
    }

    #[test]
    fn test_try_is_unsupported() {
        let e = IrExpr::new(crate::ir::IrExprKind::Try(Box::new(IrExpr::ident("x"))));
        assert!(render_expr(Backend::Babel, &e).is_err());
    }
}
