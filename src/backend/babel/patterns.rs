//! Pattern lowering for the Babel backend
//!
//! JavaScript has no structural match, so a pattern lowers to runtime checks against an
//! expression (`t.isCallExpression(s)`, `s.arguments.length === 2`) plus the bindings it
//! introduces (`first = s.arguments[0]`). Nested node patterns are supported here; the SWC backend
//! is the one that rejects them.

use dualgen_core::lang::keywords;
use dualgen_core::lang::node_kinds::{self, NodeClass};

use super::BabelCodegen;
use crate::backend::Backend;
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{IrFieldPattern, IrLiteral, IrPattern, IrSpan, IrType, Rest};

/// A pattern lowered to JavaScript checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoweredCondition {
    pub conditions: Vec<String>,
    /// `(name, expression)` pairs bound after the checks pass
    pub bindings: Vec<(String, String)>,
}

impl LoweredCondition {
    /// All checks joined with `&&` (`true` for an irrefutable pattern).
    pub fn condition(&self) -> String {
        if self.conditions.is_empty() {
            "true".to_string()
        } else {
            self.conditions.join(" && ")
        }
    }

    pub fn is_irrefutable(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl BabelCodegen<'_> {
    /// Lower `pattern` matched against the JavaScript expression `scrutinee`.
    pub fn lower_pattern(
        &mut self,
        pattern: &IrPattern,
        scrutinee: &str,
        _scrutinee_ty: Option<&IrType>,
        span: IrSpan,
    ) -> CodegenResult<LoweredCondition> {
        let mut out = LoweredCondition::default();
        self.lower(pattern, scrutinee, &mut out, span)?;
        Ok(out)
    }

    fn lower(&mut self, pattern: &IrPattern, s: &str, out: &mut LoweredCondition, span: IrSpan) -> CodegenResult<()> {
        match pattern {
            IrPattern::Ident(name) => out.bindings.push((keywords::escape_js(name), s.to_string())),
            IrPattern::Wildcard => {}
            IrPattern::Literal(IrLiteral::Null) => out.conditions.push(format!("{} == null", s)),
            IrPattern::Literal(lit) => out.conditions.push(format!("{} === {}", s, self.literal(lit))),
            IrPattern::Array {
                qualifier,
                elements,
                rest,
            } => {
                let list = match qualifier {
                    Some(q) => {
                        let info = node_kinds::from_str(q)
                            .map(node_kinds::info_for)
                            .filter(|info| info.class == NodeClass::Concrete)
                            .ok_or_else(|| CodegenError::pattern(pattern, Backend::Babel, span))?;
                        let field = info
                            .element_field()
                            .ok_or_else(|| CodegenError::pattern(pattern, Backend::Babel, span))?;
                        out.conditions.push(format!("t.{}({})", info.babel_checker(), s));
                        format!("{}.{}", s, field.babel)
                    }
                    None => {
                        out.conditions.push(format!("Array.isArray({})", s));
                        s.to_string()
                    }
                };
                let cmp = if rest.is_some() { ">=" } else { "===" };
                out.conditions.push(format!("{}.length {} {}", list, cmp, elements.len()));
                for (idx, element) in elements.iter().enumerate() {
                    self.lower(element, &format!("{}[{}]", list, idx), out, span)?;
                }
                if let Some(Rest::Bind(name)) = rest {
                    out.bindings
                        .push((keywords::escape_js(name), format!("{}.slice({})", list, elements.len())));
                }
            }
            IrPattern::Object {
                qualifier,
                fields,
                rest,
            } => {
                if let Some(Rest::Bind(_)) = rest {
                    return Err(CodegenError::pattern(pattern, Backend::Babel, span));
                }
                match qualifier.as_deref() {
                    Some(q) if node_kinds::from_str(q).is_some() => {
                        let info = node_kinds::from_str(q)
                            .map(node_kinds::info_for)
                            .filter(|info| info.class == NodeClass::Concrete)
                            .ok_or_else(|| CodegenError::pattern(pattern, Backend::Babel, span))?;
                        out.conditions.push(format!("t.{}({})", info.babel_checker(), s));
                        for field in fields {
                            let meta = info.field(&field.key).ok_or_else(|| field_error(field, span))?;
                            self.lower(&field.pattern, &format!("{}.{}", s, meta.babel), out, span)?;
                        }
                    }
                    Some(q) if self.user_types.is_struct(q) => {
                        out.conditions.push(format!("{} instanceof {}", s, q));
                        self.lower_fields(fields, s, out, span)?;
                    }
                    Some(_) => return Err(CodegenError::pattern(pattern, Backend::Babel, span)),
                    None => {
                        out.conditions.push(format!("{} != null", s));
                        self.lower_fields(fields, s, out, span)?;
                    }
                }
            }
            IrPattern::Variant { path, inner } => self.lower_variant(path, inner, s, out, pattern, span)?,
            IrPattern::Or(alternatives) => {
                let mut parts = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    let mut sub = LoweredCondition::default();
                    self.lower(alternative, s, &mut sub, span)?;
                    if !sub.bindings.is_empty() {
                        return Err(CodegenError::pattern(pattern, Backend::Babel, span));
                    }
                    if sub.is_irrefutable() {
                        return Ok(());
                    }
                    parts.push(match sub.conditions.len() {
                        1 => sub.condition(),
                        _ => format!("({})", sub.condition()),
                    });
                }
                out.conditions.push(format!("({})", parts.join(" || ")));
            }
        }
        Ok(())
    }

    fn lower_fields(
        &mut self,
        fields: &[IrFieldPattern],
        s: &str,
        out: &mut LoweredCondition,
        span: IrSpan,
    ) -> CodegenResult<()> {
        for field in fields {
            self.lower(&field.pattern, &format!("{}.{}", s, keywords::escape_js(&field.key)), out, span)?;
        }
        Ok(())
    }

    fn lower_variant(
        &mut self,
        path: &str,
        inner: &[IrPattern],
        s: &str,
        out: &mut LoweredCondition,
        pattern: &IrPattern,
        span: IrSpan,
    ) -> CodegenResult<()> {
        let (enum_name, variant) = match path.rsplit_once("::") {
            Some((head, last)) => (Some(head), last),
            None => (None, path),
        };

        if let Some(e) = enum_name.and_then(|name| self.user_types.enum_named(name)) {
            if !e.variants.iter().any(|v| v.name == variant) {
                return Err(CodegenError::pattern(pattern, Backend::Babel, span));
            }
            out.conditions.push(format!("{}.tag === {}", s, super::types::js_string(variant)));
            for (idx, p) in inner.iter().enumerate() {
                self.lower(p, &format!("{}.values[{}]", s, idx), out, span)?;
            }
            return Ok(());
        }

        match (variant, inner) {
            ("Some", [p]) => {
                out.conditions.push(format!("{} != null", s));
                self.lower(p, s, out, span)
            }
            ("None", []) => {
                out.conditions.push(format!("{} == null", s));
                Ok(())
            }
            ("Ok" | "Err", _) => Err(CodegenError::pattern(pattern, Backend::Babel, span)),
            (kind, _) => {
                let info = node_kinds::from_str(kind)
                    .map(node_kinds::info_for)
                    .ok_or_else(|| CodegenError::pattern(pattern, Backend::Babel, span))?;
                out.conditions.push(format!("t.{}({})", info.babel_checker(), s));
                match inner {
                    [] => Ok(()),
                    [p] => self.lower(p, s, out, span),
                    _ => Err(CodegenError::pattern(pattern, Backend::Babel, span)),
                }
            }
        }
    }
}

fn field_error(field: &IrFieldPattern, span: IrSpan) -> CodegenError {
    CodegenError::pattern(format!("{}: {}", field.key, field.pattern), Backend::Babel, span)
}

#[cfg(test)]
mod tests {
    use crate::backend::{Backend, render_pattern};
    use crate::ir::{IrFieldPattern, IrLiteral, IrPattern, Rest};

    #[test]
    fn test_node_array_pattern() {
        let pat = IrPattern::array_of("CallExpression", vec![IrPattern::ident("first"), IrPattern::ident("second")]);
        let lowered = render_pattern(Backend::Babel, &pat, "node", None).unwrap();
        assert_eq!(lowered.head, "t.isCallExpression(node) && node.arguments.length === 2");
        assert_eq!(
            lowered.bindings,
            vec![
                ("first".to_string(), "node.arguments[0]".to_string()),
                ("second".to_string(), "node.arguments[1]".to_string())
            ]
        );
    }

    #[test]
    fn test_nested_node_pattern_is_supported() {
        let inner = IrPattern::object_of(
            "StringLiteral",
            vec![IrFieldPattern::new("value", IrPattern::Literal(IrLiteral::Str("fs".into())))],
        );
        let pat = IrPattern::Array {
            qualifier: Some("CallExpression".into()),
            elements: vec![inner],
            rest: Some(Rest::Ignore),
        };
        let lowered = render_pattern(Backend::Babel, &pat, "n", None).unwrap();
        assert_eq!(
            lowered.head,
            "t.isCallExpression(n) && n.arguments.length >= 1 && t.isStringLiteral(n.arguments[0]) && n.arguments[0].value === \"fs\""
        );
    }

    #[test]
    fn test_option_and_or_patterns() {
        let some = IrPattern::variant("Some", vec![IrPattern::ident("v")]);
        let lowered = render_pattern(Backend::Babel, &some, "x", None).unwrap();
        assert_eq!(lowered.head, "x != null");
        assert_eq!(lowered.bindings, vec![("v".to_string(), "x".to_string())]);

        let or = IrPattern::Or(vec![IrPattern::Literal(IrLiteral::Int(1)), IrPattern::Literal(IrLiteral::Int(2))]);
        assert_eq!(render_pattern(Backend::Babel, &or, "x", None).unwrap().head, "(x === 1 || x === 2)");
    }

    #[test]
    fn test_or_with_bindings_is_rejected() {
        let or = IrPattern::Or(vec![IrPattern::ident("a"), IrPattern::Wildcard]);
        assert!(render_pattern(Backend::Babel, &or, "x", None).is_err());
    }

    #[test]
    fn test_result_variants_are_rejected() {
        let ok = IrPattern::variant("Ok", vec![IrPattern::ident("v")]);
        assert!(render_pattern(Backend::Babel, &ok, "x", None).is_err());
    }
}
