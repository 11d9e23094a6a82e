//! Primitive and standard-collection type vocabulary.
//!
//! The DSL has a fixed set of primitive types and three standard collections. This registry holds
//! the per-target type names and default-value idioms; the generator's type mappers compose them
//! for nested types.
//!
//! ## Examples
//! ```rust
//! use dualgen_core::lang::types::{self, CollectionId, PrimitiveId};
//!
//! assert_eq!(types::primitive(PrimitiveId::Str).swc_default, "String::new()");
//! assert_eq!(types::collection(CollectionId::HashSet).babel_default, "new Set()");
//! assert_eq!(types::collection_from_str("HashMap"), Some(CollectionId::HashMap));
//! ```

/// Stable identifier for a primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveId {
    Str,
    Int,
    Float,
    Bool,
    Unit,
}

/// Metadata for a primitive type.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    pub id: PrimitiveId,
    pub name: &'static str,
    pub swc_name: &'static str,
    pub swc_default: &'static str,
    /// JSDoc type name.
    pub babel_name: &'static str,
    pub babel_default: &'static str,
}

/// Registry of primitive types.
pub const PRIMITIVES: &[PrimitiveInfo] = &[
    PrimitiveInfo {
        id: PrimitiveId::Str,
        name: "Str",
        swc_name: "String",
        swc_default: "String::new()",
        babel_name: "string",
        babel_default: "\"\"",
    },
    PrimitiveInfo {
        id: PrimitiveId::Int,
        name: "i64",
        swc_name: "i64",
        swc_default: "0",
        babel_name: "number",
        babel_default: "0",
    },
    PrimitiveInfo {
        id: PrimitiveId::Float,
        name: "f64",
        swc_name: "f64",
        swc_default: "0.0",
        babel_name: "number",
        babel_default: "0",
    },
    PrimitiveInfo {
        id: PrimitiveId::Bool,
        name: "bool",
        swc_name: "bool",
        swc_default: "false",
        babel_name: "boolean",
        babel_default: "false",
    },
    PrimitiveInfo {
        id: PrimitiveId::Unit,
        name: "()",
        swc_name: "()",
        swc_default: "()",
        babel_name: "void",
        babel_default: "undefined",
    },
];

/// Stable identifier for a standard collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionId {
    Vec,
    HashMap,
    HashSet,
}

/// Metadata for a standard collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionInfo {
    pub id: CollectionId,
    pub name: &'static str,
    /// Number of type arguments.
    pub arity: usize,
    pub swc_name: &'static str,
    /// Rust import needed before use, if any.
    pub swc_import: Option<&'static str>,
    pub swc_default: &'static str,
    /// JSDoc generic name.
    pub babel_name: &'static str,
    pub babel_default: &'static str,
}

/// Registry of standard collections.
pub const COLLECTIONS: &[CollectionInfo] = &[
    CollectionInfo {
        id: CollectionId::Vec,
        name: "Vec",
        arity: 1,
        swc_name: "Vec",
        swc_import: None,
        swc_default: "Vec::new()",
        babel_name: "Array",
        babel_default: "[]",
    },
    CollectionInfo {
        id: CollectionId::HashMap,
        name: "HashMap",
        arity: 2,
        swc_name: "HashMap",
        swc_import: Some("std::collections::HashMap"),
        swc_default: "HashMap::new()",
        babel_name: "Map",
        babel_default: "new Map()",
    },
    CollectionInfo {
        id: CollectionId::HashSet,
        name: "HashSet",
        arity: 1,
        swc_name: "HashSet",
        swc_import: Some("std::collections::HashSet"),
        swc_default: "HashSet::new()",
        babel_name: "Set",
        babel_default: "new Set()",
    },
];

/// Return the metadata entry for a primitive.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn primitive(id: PrimitiveId) -> &'static PrimitiveInfo {
    PRIMITIVES.iter().find(|p| p.id == id).expect("primitive info missing")
}

/// Return the metadata entry for a collection.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn collection(id: CollectionId) -> &'static CollectionInfo {
    COLLECTIONS.iter().find(|c| c.id == id).expect("collection info missing")
}

/// Resolve a DSL primitive spelling (`Str`, `i64`, ...).
pub fn primitive_from_str(name: &str) -> Option<PrimitiveId> {
    PRIMITIVES.iter().find(|p| p.name == name).map(|p| p.id)
}

/// Resolve a DSL collection spelling (`Vec`, `HashMap`, `HashSet`).
pub fn collection_from_str(name: &str) -> Option<CollectionId> {
    COLLECTIONS.iter().find(|c| c.name == name).map(|c| c.id)
}
