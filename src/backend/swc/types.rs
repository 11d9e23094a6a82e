//! Type, default-value and operator mapping for the SWC backend

use dualgen_core::lang::node_kinds;
use dualgen_core::lang::operators::{self, OperatorId};
use dualgen_core::lang::types;

use super::SwcCodegen;
use crate::backend::Backend;
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{IrSpan, IrType};

impl SwcCodegen<'_> {
    /// Rust spelling of a DSL type.
    pub(crate) fn type_name(&self, ty: &IrType, span: IrSpan) -> CodegenResult<String> {
        Ok(match ty {
            IrType::Primitive(p) => types::primitive(p.id()).swc_name.to_string(),
            IrType::Named(name) => match node_kinds::from_str(name) {
                Some(id) => node_kinds::info_for(id).swc_type.to_string(),
                None => name.clone(),
            },
            IrType::Optional(inner) => format!("Option<{}>", self.type_name(inner, span)?),
            IrType::Collection { kind, args } => {
                let info = types::collection(kind.id());
                if args.len() != info.arity {
                    return Err(CodegenError::unsupported(
                        format!("type `{}` ({} expects {} type arguments)", ty, info.name, info.arity),
                        Backend::Swc,
                        span,
                    ));
                }
                let args = args
                    .iter()
                    .map(|a| self.type_name(a, span))
                    .collect::<CodegenResult<Vec<_>>>()?;
                format!("{}<{}>", info.swc_name, args.join(", "))
            }
            IrType::Reference { mutable, inner } => {
                format!("&{}{}", if *mutable { "mut " } else { "" }, self.type_name(inner, span)?)
            }
            IrType::Tuple(items) => {
                let items = items
                    .iter()
                    .map(|a| self.type_name(a, span))
                    .collect::<CodegenResult<Vec<_>>>()?;
                match items.len() {
                    1 => format!("({},)", items[0]),
                    _ => format!("({})", items.join(", ")),
                }
            }
        })
    }

    /// Native default value of a DSL type.
    pub(crate) fn default_value(&self, ty: &IrType) -> String {
        match ty {
            IrType::Primitive(p) => types::primitive(p.id()).swc_default.to_string(),
            IrType::Collection { kind, .. } => types::collection(kind.id()).swc_default.to_string(),
            IrType::Optional(_) => "None".to_string(),
            IrType::Named(name) if self.user_types.is_struct(name) => format!("{}::default()", name),
            IrType::Named(_) | IrType::Reference { .. } | IrType::Tuple(_) => "Default::default()".to_string(),
        }
    }

    /// Whether `#[derive(Default)]` can be used for a field of this type.
    pub(crate) fn is_defaultable(&self, ty: &IrType) -> bool {
        match ty {
            IrType::Primitive(_) | IrType::Collection { .. } | IrType::Optional(_) => true,
            IrType::Named(name) => node_kinds::from_str(name).is_none(),
            IrType::Reference { .. } => false,
            IrType::Tuple(items) => items.iter().all(|t| self.is_defaultable(t)),
        }
    }

    /// Rust spelling of an operator, or `UnsupportedConstruct` when SWC has none.
    pub(crate) fn operator(&self, id: OperatorId, span: IrSpan) -> CodegenResult<&'static str> {
        operators::spelling(id, Backend::Swc.target()).ok_or_else(|| {
            CodegenError::unsupported(
                format!("operator `{}`", operators::info_for(id).dsl),
                Backend::Swc,
                span,
            )
        })
    }

    /// SWC struct/enum name a scrutinee of this type has, for enum-path trimming.
    pub(crate) fn swc_type_of(&self, ty: Option<&IrType>) -> Option<&'static str> {
        ty.and_then(|t| t.node_kind()).map(|id| node_kinds::info_for(id).swc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::detection::Detection;
    use crate::config::CodegenConfig;
    use crate::ir::{CollectionKind, IrModule, IrProgram, IrTopLevel};

    fn with_codegen<R>(f: impl FnOnce(&SwcCodegen<'_>) -> R) -> R {
        let program = IrProgram::new(IrTopLevel::Module(IrModule {
            name: "m".into(),
            items: vec![],
            span: IrSpan::default(),
        }));
        let detection = Detection::default();
        let config = CodegenConfig::default();
        let codegen = SwcCodegen::new(&program, &detection, &config);
        f(&codegen)
    }

    #[test]
    fn test_type_names() {
        with_codegen(|c| {
            let span = IrSpan::default();
            assert_eq!(c.type_name(&IrType::str(), span).unwrap(), "String");
            assert_eq!(
                c.type_name(&IrType::hashmap(IrType::str(), IrType::vec(IrType::int())), span)
                    .unwrap(),
                "HashMap<String, Vec<i64>>"
            );
            assert_eq!(c.type_name(&IrType::named("CallExpression"), span).unwrap(), "CallExpr");
            assert_eq!(c.type_name(&IrType::optional(IrType::bool()), span).unwrap(), "Option<bool>");
        });
    }

    #[test]
    fn test_wrong_arity_is_unsupported() {
        with_codegen(|c| {
            let ty = IrType::Collection {
                kind: CollectionKind::HashMap,
                args: vec![IrType::str()],
            };
            let err = c.type_name(&ty, IrSpan::default()).unwrap_err();
            assert!(matches!(err, CodegenError::UnsupportedConstruct { backend: Backend::Swc, .. }));
        });
    }

    #[test]
    fn test_defaults() {
        with_codegen(|c| {
            assert_eq!(c.default_value(&IrType::str()), "String::new()");
            assert_eq!(c.default_value(&IrType::hashset(IrType::str())), "HashSet::new()");
            assert_eq!(c.default_value(&IrType::optional(IrType::int())), "None");
            assert_eq!(c.default_value(&IrType::named("Expression")), "Default::default()");
        });
    }

    #[test]
    fn test_pow_has_no_swc_spelling() {
        with_codegen(|c| {
            assert!(c.operator(OperatorId::Pow, IrSpan::default()).is_err());
            assert_eq!(c.operator(OperatorId::Eq, IrSpan::default()).unwrap(), "==");
        });
    }
}
