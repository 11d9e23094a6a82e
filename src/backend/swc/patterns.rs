//! Pattern lowering for the SWC backend
//!
//! A DSL pattern lowers to three parts:
//!
//! - a native Rust pattern (`Expr::Call(CallExpr { args: __elems0, .. })`),
//! - guard conditions the native pattern cannot express (`__elems0.len() == 2`),
//! - binding statements for names that live inside node lists (`let first = &__elems0[0];`).
//!
//! Node lists are `Vec`s and node fields are mostly boxed, so anything that would need to
//! destructure *through* them (a qualified pattern nested in a node element or field) is rejected
//! with `PatternLowering`.

use dualgen_core::lang::keywords;
use dualgen_core::lang::node_kinds::{self, NodeClass, NodeKindInfo};

use super::SwcCodegen;
use crate::backend::Backend;
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{IrFieldPattern, IrLiteral, IrPattern, IrSpan, IrType, Rest};

/// Enum variants whose payload is boxed; struct patterns cannot reach through them.
const BOXED_VARIANTS: &[&str] = &["Decl::Var", "Expr::JSXElement"];

/// A pattern lowered to Rust.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoweredPattern {
    pub pattern: String,
    pub guards: Vec<String>,
    /// `(name, expression)` pairs bound after the match succeeds
    pub bindings: Vec<(String, String)>,
    /// The scrutinee must be matched as a slice
    pub needs_slice: bool,
}

impl LoweredPattern {
    /// `let name = expr;` for every binding.
    pub fn binding_lines(&self) -> Vec<String> {
        self.bindings
            .iter()
            .map(|(name, value)| format!("let {} = {};", name, value))
            .collect()
    }

    /// Guards joined with `&&`, if any.
    pub fn guard(&self) -> Option<String> {
        (!self.guards.is_empty()).then(|| self.guards.join(" && "))
    }

    fn is_plain(&self) -> bool {
        self.guards.is_empty() && self.bindings.is_empty()
    }
}

impl SwcCodegen<'_> {
    /// Lower `pattern` for a scrutinee of (optional) type `scrutinee_ty`.
    pub fn lower_pattern(
        &mut self,
        pattern: &IrPattern,
        scrutinee_ty: Option<&IrType>,
        span: IrSpan,
    ) -> CodegenResult<LoweredPattern> {
        let mut out = LoweredPattern {
            needs_slice: matches!(pattern, IrPattern::Array { qualifier: None, .. }),
            ..LoweredPattern::default()
        };
        let from = self.swc_type_of(scrutinee_ty);
        out.pattern = self.lower(pattern, from, &mut out, span)?;
        Ok(out)
    }

    fn lower(
        &mut self,
        pattern: &IrPattern,
        from: Option<&str>,
        out: &mut LoweredPattern,
        span: IrSpan,
    ) -> CodegenResult<String> {
        match pattern {
            IrPattern::Ident(name) => Ok(keywords::escape_rust(name)),
            IrPattern::Wildcard => Ok("_".to_string()),
            IrPattern::Literal(lit) => Ok(self.lower_literal(lit, out)),
            IrPattern::Array {
                qualifier: Some(q),
                elements,
                rest,
            } => {
                let info = self.node_info(q, pattern, span)?;
                self.lower_node_array(info, elements, rest.as_ref(), from, out, pattern, span)
            }
            IrPattern::Array {
                qualifier: None,
                elements,
                rest,
            } => {
                let mut parts = Vec::with_capacity(elements.len() + 1);
                for element in elements {
                    parts.push(self.lower(element, None, out, span)?);
                }
                match rest {
                    Some(Rest::Ignore) => parts.push("..".to_string()),
                    Some(Rest::Bind(name)) => parts.push(format!("{} @ ..", keywords::escape_rust(name))),
                    None => {}
                }
                Ok(format!("[{}]", parts.join(", ")))
            }
            IrPattern::Object {
                qualifier: Some(q),
                fields,
                rest,
            } => {
                if let Some(Rest::Bind(_)) = rest {
                    return Err(CodegenError::pattern(pattern, Backend::Swc, span));
                }
                match node_kinds::from_str(q) {
                    Some(_) => {
                        let info = self.node_info(q, pattern, span)?;
                        self.lower_node_object(info, fields, from, out, span)
                    }
                    None => {
                        let mut parts = Vec::with_capacity(fields.len() + 1);
                        for field in fields {
                            let key = keywords::escape_rust(&field.key);
                            let sub = self.lower(&field.pattern, None, out, span)?;
                            parts.push(if sub == key { key } else { format!("{}: {}", key, sub) });
                        }
                        parts.push("..".to_string());
                        Ok(format!("{} {{ {} }}", q, parts.join(", ")))
                    }
                }
            }
            IrPattern::Object { qualifier: None, .. } => Err(CodegenError::pattern(pattern, Backend::Swc, span)),
            IrPattern::Variant { path, inner } => self.lower_variant(path, inner, from, out, pattern, span),
            IrPattern::Or(alternatives) => {
                let mut parts = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    let mut sub = LoweredPattern::default();
                    let text = self.lower(alternative, from, &mut sub, span)?;
                    if !sub.is_plain() {
                        return Err(CodegenError::pattern(pattern, Backend::Swc, span));
                    }
                    parts.push(text);
                }
                Ok(parts.join(" | "))
            }
        }
    }

    fn lower_literal(&mut self, lit: &IrLiteral, out: &mut LoweredPattern) -> String {
        match lit {
            IrLiteral::Int(_) | IrLiteral::Bool(_) => self.literal(lit),
            IrLiteral::Null => "None".to_string(),
            IrLiteral::Unit => "()".to_string(),
            IrLiteral::Str(_) | IrLiteral::Float(_) => {
                let temp = self.temp("lit");
                let guard = match lit {
                    IrLiteral::Str(_) => format!("{} == {}", temp, self.literal(lit)),
                    _ => format!("*{} == {}", temp, self.literal(lit)),
                };
                out.guards.push(guard);
                temp
            }
        }
    }

    fn node_info(&self, qualifier: &str, pattern: &IrPattern, span: IrSpan) -> CodegenResult<&'static NodeKindInfo> {
        node_kinds::from_str(qualifier)
            .map(node_kinds::info_for)
            .filter(|info| info.class == NodeClass::Concrete)
            .ok_or_else(|| CodegenError::pattern(pattern, Backend::Swc, span))
    }

    /// Wrap a struct pattern in the enum path leading to it from `from`.
    fn wrap_path(
        info: &NodeKindInfo,
        inner: String,
        from: Option<&str>,
        pattern: &IrPattern,
        span: IrSpan,
    ) -> CodegenResult<String> {
        let path = info.swc_path_from(from);
        if path.last().is_some_and(|seg| BOXED_VARIANTS.contains(seg)) {
            return Err(CodegenError::pattern(pattern, Backend::Swc, span));
        }
        Ok(path
            .iter()
            .rev()
            .fold(inner, |acc, segment| format!("{}({})", segment, acc)))
    }

    #[allow(clippy::too_many_arguments)]
    fn lower_node_array(
        &mut self,
        info: &'static NodeKindInfo,
        elements: &[IrPattern],
        rest: Option<&Rest>,
        from: Option<&str>,
        out: &mut LoweredPattern,
        pattern: &IrPattern,
        span: IrSpan,
    ) -> CodegenResult<String> {
        let field = info
            .element_field()
            .ok_or_else(|| CodegenError::pattern(pattern, Backend::Swc, span))?;
        let swc_field = match field.swc {
            Some(name) if !field.swc_is_nested() => name,
            _ => return Err(CodegenError::pattern(pattern, Backend::Swc, span)),
        };

        let list = self.temp("elems");
        let cmp = if rest.is_some() { ">=" } else { "==" };
        out.guards.push(format!("{}.len() {} {}", list, cmp, elements.len()));

        for (idx, element) in elements.iter().enumerate() {
            match element {
                IrPattern::Ident(name) => out
                    .bindings
                    .push((keywords::escape_rust(name), format!("&{}[{}]", list, idx))),
                IrPattern::Wildcard => {}
                other => return Err(CodegenError::pattern(other, Backend::Swc, span)),
            }
        }
        if let Some(Rest::Bind(name)) = rest {
            out.bindings
                .push((keywords::escape_rust(name), format!("&{}[{}..]", list, elements.len())));
        }

        let inner = format!("{} {{ {}: {}, .. }}", info.swc_type, swc_field, list);
        Self::wrap_path(info, inner, from, pattern, span)
    }

    fn lower_node_object(
        &mut self,
        info: &'static NodeKindInfo,
        fields: &[IrFieldPattern],
        from: Option<&str>,
        out: &mut LoweredPattern,
        span: IrSpan,
    ) -> CodegenResult<String> {
        let mut parts = Vec::with_capacity(fields.len() + 1);
        for field in fields {
            let unsupported = || {
                CodegenError::pattern(format!("{}: {}", field.key, field.pattern), Backend::Swc, span)
            };
            let meta = info.field(&field.key).ok_or_else(unsupported)?;
            let swc_field = match meta.swc {
                Some(name) if !meta.swc_is_nested() => name,
                _ => return Err(unsupported()),
            };
            let sub = match &field.pattern {
                IrPattern::Wildcard => continue,
                IrPattern::Ident(name) => keywords::escape_rust(name),
                IrPattern::Literal(lit) => self.lower_literal(lit, out),
                IrPattern::Variant { .. } | IrPattern::Or(_) => self.lower(&field.pattern, None, out, span)?,
                nested @ (IrPattern::Array { .. } | IrPattern::Object { .. }) => {
                    return Err(CodegenError::pattern(nested, Backend::Swc, span));
                }
            };
            parts.push(if sub == swc_field {
                sub
            } else {
                format!("{}: {}", swc_field, sub)
            });
        }
        parts.push("..".to_string());
        let inner = format!("{} {{ {} }}", info.swc_type, parts.join(", "));
        let whole = IrPattern::Object {
            qualifier: Some(info.name.to_string()),
            fields: fields.to_vec(),
            rest: Some(Rest::Ignore),
        };
        Self::wrap_path(info, inner, from, &whole, span)
    }

    fn lower_variant(
        &mut self,
        path: &str,
        inner: &[IrPattern],
        from: Option<&str>,
        out: &mut LoweredPattern,
        pattern: &IrPattern,
        span: IrSpan,
    ) -> CodegenResult<String> {
        let last = path.rsplit("::").next().unwrap_or(path);
        let enum_name = path.rsplit_once("::").map(|(head, _)| head);
        let user_enum = enum_name.is_some_and(|name| self.user_types.is_enum(name));

        if let (false, Some(id)) = (user_enum, node_kinds::from_str(last)) {
            let info = node_kinds::info_for(id);
            let payload = match inner {
                [] => "_".to_string(),
                [single] => self.lower(single, Some(info.swc_type), out, span)?,
                _ => return Err(CodegenError::pattern(pattern, Backend::Swc, span)),
            };
            if info.swc_path_from(from).is_empty() {
                return Ok(payload);
            }
            return Self::wrap_path(info, payload, from, pattern, span);
        }

        if inner.is_empty() {
            return Ok(path.to_string());
        }
        let mut parts = Vec::with_capacity(inner.len());
        for p in inner {
            parts.push(self.lower(p, None, out, span)?);
        }
        Ok(format!("{}({})", path, parts.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{Backend, render_pattern};
    use crate::ir::{IrFieldPattern, IrPattern, IrType, Rest};

    fn swc(pattern: &IrPattern, ty: Option<&IrType>) -> crate::backend::RenderedPattern {
        render_pattern(Backend::Swc, pattern, "node", ty).expect("pattern lowers")
    }

    #[test]
    fn test_node_array_against_node_struct() {
        let pat = IrPattern::array_of("CallExpression", vec![IrPattern::ident("first"), IrPattern::ident("second")]);
        let lowered = swc(&pat, Some(&IrType::named("CallExpression")));
        assert_eq!(lowered.head, "CallExpr { args: __elems0, .. }");
        assert_eq!(lowered.guards, vec!["__elems0.len() == 2"]);
        assert_eq!(
            lowered.bindings,
            vec![
                ("first".to_string(), "&__elems0[0]".to_string()),
                ("second".to_string(), "&__elems0[1]".to_string())
            ]
        );
    }

    #[test]
    fn test_node_array_against_expression_enum() {
        let pat = IrPattern::Array {
            qualifier: Some("CallExpression".into()),
            elements: vec![IrPattern::ident("first")],
            rest: Some(Rest::Bind("others".into())),
        };
        let lowered = swc(&pat, Some(&IrType::named("Expression")));
        assert_eq!(lowered.head, "Expr::Call(CallExpr { args: __elems0, .. })");
        assert_eq!(lowered.guards, vec!["__elems0.len() >= 1"]);
        assert_eq!(lowered.bindings[1], ("others".to_string(), "&__elems0[1..]".to_string()));
    }

    #[test]
    fn test_node_object_maps_field_names() {
        let pat = IrPattern::object_of(
            "CallExpression",
            vec![IrFieldPattern::shorthand("callee"), IrFieldPattern::new("arguments", IrPattern::ident("args"))],
        );
        let lowered = swc(&pat, None);
        assert_eq!(lowered.head, "Expr::Call(CallExpr { callee, args, .. })");
    }

    #[test]
    fn test_string_literal_field_becomes_guard() {
        let pat = IrPattern::object_of(
            "Identifier",
            vec![IrFieldPattern::new("name", IrPattern::Literal(crate::ir::IrLiteral::Str("require".into())))],
        );
        let lowered = swc(&pat, Some(&IrType::named("Identifier")));
        assert_eq!(lowered.head, "Ident { sym: __lit0, .. }");
        assert_eq!(lowered.guards, vec!["__lit0 == \"require\""]);
    }

    #[test]
    fn test_nested_node_pattern_in_element_is_rejected() {
        let inner = IrPattern::object_of("StringLiteral", vec![IrFieldPattern::shorthand("value")]);
        let pat = IrPattern::array_of("CallExpression", vec![inner.clone()]);
        let err = render_pattern(Backend::Swc, &pat, "node", None).unwrap_err();
        assert_eq!(
            err,
            crate::backend::CodegenError::pattern(&inner, Backend::Swc, crate::ir::IrSpan::default())
        );
    }

    #[test]
    fn test_nested_field_path_is_rejected() {
        let pat = IrPattern::array_of("FunctionDeclaration", vec![IrPattern::ident("p")]);
        assert!(render_pattern(Backend::Swc, &pat, "node", None).is_err());
    }

    #[test]
    fn test_variant_through_node_enum() {
        let pat = IrPattern::variant("Expression::StringLiteral", vec![IrPattern::ident("s")]);
        let lowered = swc(&pat, Some(&IrType::named("Expression")));
        assert_eq!(lowered.head, "Expr::Lit(Lit::Str(s))");
    }

    #[test]
    fn test_unqualified_object_is_rejected() {
        let pat = IrPattern::Object {
            qualifier: None,
            fields: vec![IrFieldPattern::shorthand("x")],
            rest: None,
        };
        assert!(render_pattern(Backend::Swc, &pat, "v", None).is_err());
    }
}
