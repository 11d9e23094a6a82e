//! Builtin method vocabulary.
//!
//! DSL method calls are Rust-flavoured (`items.len()`, `names.contains(x)`). SWC output keeps them
//! verbatim. Babel output rewrites the ones listed here into the JavaScript idiom; every other
//! method call is emitted unchanged.

/// Stable identifier for a builtin method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MethodId {
    Len,
    IsEmpty,
    Push,
    Contains,
    ContainsKey,
    Insert,
    Get,
    Clone,
    ToString,
    Unwrap,
    IsSome,
    IsNone,
}

/// How a builtin method is written in JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BabelForm {
    /// `recv.<name>` (no call).
    Property(&'static str),
    /// `recv.<name>(args)`.
    Method(&'static str),
    /// `recv` (the call disappears).
    Identity,
    /// `<name>(recv)`.
    WrapCall(&'static str),
    /// `(recv <op> <rhs>)`, e.g. `(recv.length === 0)`.
    Compare {
        property: Option<&'static str>,
        op: &'static str,
        rhs: &'static str,
    },
    /// Chosen by the receiver's collection kind; `untyped` decides when the kind is unknown.
    ByCollection {
        set: &'static str,
        map: &'static str,
        list: ListForm,
        untyped: UntypedReceiver,
    },
}

/// A `ByCollection` method on array (or string) receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListForm {
    /// `recv.<name>(args)`.
    Method(&'static str),
    /// `recv.splice(index, 0, value)`.
    InsertAt,
}

/// Which `ByCollection` form a receiver of unknown type gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntypedReceiver {
    /// The list form (`includes` also covers strings).
    List,
    /// The map form.
    Map,
    /// The set form with one argument, the map form with two.
    SetOrMap,
}

/// Metadata for a builtin method.
#[derive(Debug, Clone, Copy)]
pub struct MethodInfo {
    pub id: MethodId,
    pub name: &'static str,
    pub babel: BabelForm,
}

/// Registry of builtin methods.
pub const METHODS: &[MethodInfo] = &[
    m(MethodId::Len, "len", BabelForm::Property("length")),
    m(
        MethodId::IsEmpty,
        "is_empty",
        BabelForm::Compare {
            property: Some("length"),
            op: "===",
            rhs: "0",
        },
    ),
    m(MethodId::Push, "push", BabelForm::Method("push")),
    m(
        MethodId::Contains,
        "contains",
        BabelForm::ByCollection {
            set: "has",
            map: "has",
            list: ListForm::Method("includes"),
            untyped: UntypedReceiver::List,
        },
    ),
    m(MethodId::ContainsKey, "contains_key", BabelForm::Method("has")),
    m(
        MethodId::Insert,
        "insert",
        BabelForm::ByCollection {
            set: "add",
            map: "set",
            list: ListForm::InsertAt,
            untyped: UntypedReceiver::SetOrMap,
        },
    ),
    m(
        MethodId::Get,
        "get",
        BabelForm::ByCollection {
            set: "has",
            map: "get",
            list: ListForm::Method("at"),
            untyped: UntypedReceiver::Map,
        },
    ),
    m(MethodId::Clone, "clone", BabelForm::Identity),
    m(MethodId::ToString, "to_string", BabelForm::WrapCall("String")),
    m(MethodId::Unwrap, "unwrap", BabelForm::Identity),
    m(
        MethodId::IsSome,
        "is_some",
        BabelForm::Compare {
            property: None,
            op: "!=",
            rhs: "null",
        },
    ),
    m(
        MethodId::IsNone,
        "is_none",
        BabelForm::Compare {
            property: None,
            op: "==",
            rhs: "null",
        },
    ),
];

/// Return the metadata entry for a method.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: MethodId) -> &'static MethodInfo {
    METHODS.iter().find(|m| m.id == id).expect("method info missing")
}

/// Resolve a method name.
pub fn from_str(name: &str) -> Option<MethodId> {
    METHODS.iter().find(|m| m.name == name).map(|m| m.id)
}

// --- helpers -----------------------------------------------------------------

const fn m(id: MethodId, name: &'static str, babel: BabelForm) -> MethodInfo {
    MethodInfo { id, name, babel }
}
