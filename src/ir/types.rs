//! IR type descriptors
//!
//! A type is a primitive, a named type (user struct/enum or AST node kind), an optional, a
//! standard collection of element types, a reference, or a tuple.

use dualgen_core::lang::node_kinds::{self, NodeKindId};
use dualgen_core::lang::types::{CollectionId, PrimitiveId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive DSL types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Str,
    Int,
    Float,
    Bool,
    Unit,
}

impl PrimitiveType {
    pub fn id(self) -> PrimitiveId {
        match self {
            PrimitiveType::Str => PrimitiveId::Str,
            PrimitiveType::Int => PrimitiveId::Int,
            PrimitiveType::Float => PrimitiveId::Float,
            PrimitiveType::Bool => PrimitiveId::Bool,
            PrimitiveType::Unit => PrimitiveId::Unit,
        }
    }
}

/// Standard collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    Vec,
    HashMap,
    HashSet,
}

impl CollectionKind {
    pub fn id(self) -> CollectionId {
        match self {
            CollectionKind::Vec => CollectionId::Vec,
            CollectionKind::HashMap => CollectionId::HashMap,
            CollectionKind::HashSet => CollectionId::HashSet,
        }
    }
}

/// IR type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrType {
    Primitive(PrimitiveType),
    /// User struct/enum or AST node kind (`CallExpression`, `Expression`)
    Named(String),
    Optional(Box<IrType>),
    Collection { kind: CollectionKind, args: Vec<IrType> },
    Reference { mutable: bool, inner: Box<IrType> },
    Tuple(Vec<IrType>),
}

impl IrType {
    pub fn str() -> Self {
        IrType::Primitive(PrimitiveType::Str)
    }

    pub fn int() -> Self {
        IrType::Primitive(PrimitiveType::Int)
    }

    pub fn float() -> Self {
        IrType::Primitive(PrimitiveType::Float)
    }

    pub fn bool() -> Self {
        IrType::Primitive(PrimitiveType::Bool)
    }

    pub fn unit() -> Self {
        IrType::Primitive(PrimitiveType::Unit)
    }

    pub fn named(name: impl Into<String>) -> Self {
        IrType::Named(name.into())
    }

    pub fn optional(inner: IrType) -> Self {
        IrType::Optional(Box::new(inner))
    }

    pub fn vec(elem: IrType) -> Self {
        IrType::Collection {
            kind: CollectionKind::Vec,
            args: vec![elem],
        }
    }

    pub fn hashmap(key: IrType, value: IrType) -> Self {
        IrType::Collection {
            kind: CollectionKind::HashMap,
            args: vec![key, value],
        }
    }

    pub fn hashset(elem: IrType) -> Self {
        IrType::Collection {
            kind: CollectionKind::HashSet,
            args: vec![elem],
        }
    }

    pub fn reference(inner: IrType, mutable: bool) -> Self {
        IrType::Reference {
            mutable,
            inner: Box::new(inner),
        }
    }

    /// The type with all reference layers removed.
    pub fn peeled(&self) -> &IrType {
        match self {
            IrType::Reference { inner, .. } => inner.peeled(),
            other => other,
        }
    }

    /// AST node kind named by this type (through references).
    pub fn node_kind(&self) -> Option<NodeKindId> {
        match self.peeled() {
            IrType::Named(name) => node_kinds::from_str(name),
            _ => None,
        }
    }

    /// Collection kind of this type (through references).
    pub fn collection_kind(&self) -> Option<CollectionKind> {
        match self.peeled() {
            IrType::Collection { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self.peeled(), IrType::Primitive(PrimitiveType::Int))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.peeled(), IrType::Primitive(PrimitiveType::Str))
    }

    /// Visit this type and every nested type argument, outermost first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a IrType)) {
        f(self);
        match self {
            IrType::Primitive(_) | IrType::Named(_) => {}
            IrType::Optional(inner) | IrType::Reference { inner, .. } => inner.walk(f),
            IrType::Collection { args, .. } | IrType::Tuple(args) => {
                for arg in args {
                    arg.walk(f);
                }
            }
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Primitive(p) => write!(f, "{}", dualgen_core::lang::types::primitive(p.id()).name),
            IrType::Named(name) => write!(f, "{}", name),
            IrType::Optional(inner) => write!(f, "Option<{}>", inner),
            IrType::Collection { kind, args } => {
                write!(f, "{}<", dualgen_core::lang::types::collection(kind.id()).name)?;
                write_list(f, args)?;
                write!(f, ">")
            }
            IrType::Reference { mutable, inner } => {
                write!(f, "&{}{}", if *mutable { "mut " } else { "" }, inner)
            }
            IrType::Tuple(items) => {
                write!(f, "(")?;
                write_list(f, items)?;
                write!(f, ")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[IrType]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Display
    // ========================================

    #[test]
    fn test_display_primitives() {
        assert_eq!(IrType::str().to_string(), "Str");
        assert_eq!(IrType::int().to_string(), "i64");
        assert_eq!(IrType::unit().to_string(), "()");
    }

    #[test]
    fn test_display_nested() {
        let ty = IrType::hashmap(IrType::str(), IrType::vec(IrType::optional(IrType::int())));
        assert_eq!(ty.to_string(), "HashMap<Str, Vec<Option<i64>>>");
        let r = IrType::reference(IrType::named("CallExpression"), true);
        assert_eq!(r.to_string(), "&mut CallExpression");
    }

    // ========================================
    // Queries
    // ========================================

    #[test]
    fn test_node_kind_through_reference() {
        let ty = IrType::reference(IrType::named("CallExpression"), true);
        assert_eq!(ty.node_kind(), Some(NodeKindId::CallExpression));
        assert_eq!(IrType::named("State").node_kind(), None);
    }

    #[test]
    fn test_walk_visits_all_levels() {
        let ty = IrType::vec(IrType::optional(IrType::hashset(IrType::str())));
        let mut seen = Vec::new();
        ty.walk(&mut |t| seen.push(t.to_string()));
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[2], "HashSet<Str>");
    }
}
