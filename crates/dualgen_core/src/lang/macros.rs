//! Macro-style call vocabulary.
//!
//! The DSL marks some calls as macro-style (`format!`, `vec!`, ...). SWC output keeps the native
//! macro syntax; Babel output turns them into plain calls and relies on a small runtime shim
//! emitted into the module prelude.
//!
//! ## Notes
//! - Unknown macro names are still valid: SWC emits them as user macros, Babel as plain calls to
//!   a user-provided function (no shim).
//! - Each shim is self-contained so any subset can be emitted in any order.
//!
//! ## Examples
//! ```rust
//! use dualgen_core::lang::macros::{self, Delimiter, MacroId};
//!
//! assert_eq!(macros::from_str("vec"), Some(MacroId::Vec));
//! assert_eq!(macros::info_for(MacroId::Vec).delimiter, Delimiter::Bracket);
//! ```

/// Delimiters used around the SWC macro arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Paren,
    Bracket,
}

impl Delimiter {
    pub const fn open(self) -> char {
        match self {
            Delimiter::Paren => '(',
            Delimiter::Bracket => '[',
        }
    }

    pub const fn close(self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
        }
    }
}

/// Stable identifier for a known macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MacroId {
    Format,
    Println,
    Print,
    Eprintln,
    Vec,
    Panic,
    Assert,
}

/// Metadata for a known macro.
#[derive(Debug, Clone, Copy)]
pub struct MacroInfo {
    pub id: MacroId,
    pub name: &'static str,
    pub delimiter: Delimiter,
    /// JavaScript definition of the shim function named `name`.
    pub babel_shim: &'static [&'static str],
}

/// Registry of known macros.
pub const MACROS: &[MacroInfo] = &[
    MacroInfo {
        id: MacroId::Format,
        name: "format",
        delimiter: Delimiter::Paren,
        babel_shim: &[
            "function format(template, ...args) {",
            "  const parts = String(template).split(\"{}\");",
            "  return parts.reduce((out, part, i) => out + String(args[i - 1]) + part);",
            "}",
        ],
    },
    MacroInfo {
        id: MacroId::Println,
        name: "println",
        delimiter: Delimiter::Paren,
        babel_shim: &[
            "function println(template = \"\", ...args) {",
            "  const parts = String(template).split(\"{}\");",
            "  console.log(parts.reduce((out, part, i) => out + String(args[i - 1]) + part));",
            "}",
        ],
    },
    MacroInfo {
        id: MacroId::Print,
        name: "print",
        delimiter: Delimiter::Paren,
        babel_shim: &[
            "function print(template = \"\", ...args) {",
            "  const parts = String(template).split(\"{}\");",
            "  process.stdout.write(parts.reduce((out, part, i) => out + String(args[i - 1]) + part));",
            "}",
        ],
    },
    MacroInfo {
        id: MacroId::Eprintln,
        name: "eprintln",
        delimiter: Delimiter::Paren,
        babel_shim: &[
            "function eprintln(template = \"\", ...args) {",
            "  const parts = String(template).split(\"{}\");",
            "  console.error(parts.reduce((out, part, i) => out + String(args[i - 1]) + part));",
            "}",
        ],
    },
    MacroInfo {
        id: MacroId::Vec,
        name: "vec",
        delimiter: Delimiter::Bracket,
        babel_shim: &["function vec(...items) {", "  return items;", "}"],
    },
    MacroInfo {
        id: MacroId::Panic,
        name: "panic",
        delimiter: Delimiter::Paren,
        babel_shim: &[
            "function panic(template = \"explicit panic\", ...args) {",
            "  const parts = String(template).split(\"{}\");",
            "  throw new Error(parts.reduce((out, part, i) => out + String(args[i - 1]) + part));",
            "}",
        ],
    },
    MacroInfo {
        id: MacroId::Assert,
        name: "assert",
        delimiter: Delimiter::Paren,
        babel_shim: &[
            "function assert(condition, message = \"assertion failed\") {",
            "  if (!condition) {",
            "    throw new Error(message);",
            "  }",
            "}",
        ],
    },
];

/// Return the metadata entry for a macro.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: MacroId) -> &'static MacroInfo {
    MACROS.iter().find(|m| m.id == id).expect("macro info missing")
}

/// Resolve a macro name (without the `!`).
pub fn from_str(name: &str) -> Option<MacroId> {
    MACROS.iter().find(|m| m.name == name).map(|m| m.id)
}

/// SWC delimiter for a macro name; unknown macros use parentheses.
pub fn delimiter_for(name: &str) -> Delimiter {
    from_str(name).map_or(Delimiter::Paren, |id| info_for(id).delimiter)
}
