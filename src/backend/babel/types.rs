//! JSDoc types, default values, operators and literals for the Babel backend

use dualgen_core::lang::operators::{self, OperatorId};
use dualgen_core::lang::types;

use super::BabelCodegen;
use crate::backend::Backend;
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{IrLiteral, IrSpan, IrType};

impl BabelCodegen<'_> {
    /// JSDoc spelling of a DSL type.
    pub(crate) fn jsdoc_type(&self, ty: &IrType) -> String {
        match ty {
            IrType::Primitive(p) => types::primitive(p.id()).babel_name.to_string(),
            IrType::Named(_) if ty.node_kind().is_some() => "Node".to_string(),
            IrType::Named(name) => name.clone(),
            IrType::Optional(inner) => format!("{} | null", self.jsdoc_type(inner)),
            IrType::Collection { kind, args } => {
                let args = args.iter().map(|a| self.jsdoc_type(a)).collect::<Vec<_>>();
                format!("{}<{}>", types::collection(kind.id()).babel_name, args.join(", "))
            }
            IrType::Reference { inner, .. } => self.jsdoc_type(inner),
            IrType::Tuple(items) => {
                let items = items.iter().map(|a| self.jsdoc_type(a)).collect::<Vec<_>>();
                format!("[{}]", items.join(", "))
            }
        }
    }

    /// JavaScript default value of a DSL type.
    pub(crate) fn default_value(&self, ty: &IrType) -> String {
        match ty {
            IrType::Primitive(p) => types::primitive(p.id()).babel_default.to_string(),
            IrType::Collection { kind, .. } => types::collection(kind.id()).babel_default.to_string(),
            IrType::Optional(_) => "null".to_string(),
            IrType::Named(name) if self.user_types.is_struct(name) => format!("new {}()", name),
            IrType::Reference { inner, .. } => self.default_value(inner),
            IrType::Named(_) | IrType::Tuple(_) => "undefined".to_string(),
        }
    }

    /// JavaScript spelling of an operator, or `UnsupportedConstruct` when Babel has none.
    pub(crate) fn operator(&self, id: OperatorId, span: IrSpan) -> CodegenResult<&'static str> {
        operators::spelling(id, Backend::Babel.target()).ok_or_else(|| {
            CodegenError::unsupported(
                format!("operator `{}`", operators::info_for(id).dsl),
                Backend::Babel,
                span,
            )
        })
    }

    pub(crate) fn literal(&self, lit: &IrLiteral) -> String {
        match lit {
            IrLiteral::Int(v) => v.to_string(),
            IrLiteral::Float(v) if v.is_nan() => "NaN".to_string(),
            IrLiteral::Float(v) if v.is_infinite() => {
                if *v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
            }
            IrLiteral::Float(v) => format!("{:?}", v),
            IrLiteral::Str(s) => js_string(s),
            IrLiteral::Bool(b) => b.to_string(),
            IrLiteral::Null => "null".to_string(),
            IrLiteral::Unit => "undefined".to_string(),
        }
    }
}

/// Double-quoted JavaScript string literal.
pub(crate) fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
