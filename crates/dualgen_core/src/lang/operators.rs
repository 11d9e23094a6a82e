//! Operator vocabulary.
//!
//! Binary, unary and compound-assignment operators with their per-target spellings and
//! precedence. A target with no spelling for an operator cannot express it; the generator reports
//! that as an unsupported construct for that target only.
//!
//! ## Notes
//! - Precedence follows the Rust reference; higher binds tighter. Both targets agree on the
//!   relative order of every operator they share, so one table serves both.
//! - Babel spells equality strictly (`===`, `!==`).
//!
//! ## Examples
//! ```rust
//! use dualgen_core::lang::operators::{self, OperatorId};
//! use dualgen_core::lang::registry::Target;
//!
//! assert_eq!(operators::spelling(OperatorId::Eq, Target::Babel), Some("==="));
//! assert_eq!(operators::spelling(OperatorId::Eq, Target::Swc), Some("=="));
//! assert_eq!(operators::spelling(OperatorId::Pow, Target::Swc), None);
//! ```

use super::registry::{Spelling, Target};

/// Define whether an operator is infix (binary), prefix (unary) or an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Assign,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorId {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UnsignedShr,

    // Unary
    Not,
    Neg,
    BitNot,

    // Compound assignment
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    PowAssign,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    /// DSL spelling, used in diagnostics.
    pub dsl: &'static str,
    pub spelling: Spelling,
    pub precedence: u8,
    pub fixity: Fixity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Add, "+", Spelling::both("+"), 50, Fixity::Infix),
    op(OperatorId::Sub, "-", Spelling::both("-"), 50, Fixity::Infix),
    op(OperatorId::Mul, "*", Spelling::both("*"), 60, Fixity::Infix),
    op(OperatorId::Div, "/", Spelling::both("/"), 60, Fixity::Infix),
    op(OperatorId::Rem, "%", Spelling::both("%"), 60, Fixity::Infix),
    op(OperatorId::Pow, "**", Spelling::babel_only("**"), 70, Fixity::Infix),
    // Comparison
    op(OperatorId::Eq, "==", Spelling::split("===", "=="), 30, Fixity::Infix),
    op(OperatorId::NotEq, "!=", Spelling::split("!==", "!="), 30, Fixity::Infix),
    op(OperatorId::Lt, "<", Spelling::both("<"), 30, Fixity::Infix),
    op(OperatorId::LtEq, "<=", Spelling::both("<="), 30, Fixity::Infix),
    op(OperatorId::Gt, ">", Spelling::both(">"), 30, Fixity::Infix),
    op(OperatorId::GtEq, ">=", Spelling::both(">="), 30, Fixity::Infix),
    // Logical
    op(OperatorId::And, "&&", Spelling::both("&&"), 20, Fixity::Infix),
    op(OperatorId::Or, "||", Spelling::both("||"), 10, Fixity::Infix),
    // Bitwise
    op(OperatorId::BitAnd, "&", Spelling::both("&"), 45, Fixity::Infix),
    op(OperatorId::BitOr, "|", Spelling::both("|"), 35, Fixity::Infix),
    op(OperatorId::BitXor, "^", Spelling::both("^"), 40, Fixity::Infix),
    op(OperatorId::Shl, "<<", Spelling::both("<<"), 48, Fixity::Infix),
    op(OperatorId::Shr, ">>", Spelling::both(">>"), 48, Fixity::Infix),
    op(OperatorId::UnsignedShr, ">>>", Spelling::babel_only(">>>"), 48, Fixity::Infix),
    // Unary
    op(OperatorId::Not, "!", Spelling::both("!"), 80, Fixity::Prefix),
    op(OperatorId::Neg, "-", Spelling::both("-"), 80, Fixity::Prefix),
    op(OperatorId::BitNot, "~", Spelling::split("~", "!"), 80, Fixity::Prefix),
    // Compound assignment
    op(OperatorId::AddAssign, "+=", Spelling::both("+="), 1, Fixity::Assign),
    op(OperatorId::SubAssign, "-=", Spelling::both("-="), 1, Fixity::Assign),
    op(OperatorId::MulAssign, "*=", Spelling::both("*="), 1, Fixity::Assign),
    op(OperatorId::DivAssign, "/=", Spelling::both("/="), 1, Fixity::Assign),
    op(OperatorId::RemAssign, "%=", Spelling::both("%="), 1, Fixity::Assign),
    op(OperatorId::PowAssign, "**=", Spelling::babel_only("**="), 1, Fixity::Assign),
];

/// Return the metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Target spelling of an operator, or `None` when the target cannot express it.
pub fn spelling(id: OperatorId, target: Target) -> Option<&'static str> {
    info_for(id).spelling.get(target)
}

/// Resolve a DSL spelling of a binary or compound operator.
///
/// ## Notes
/// - `-` resolves to the binary [`OperatorId::Sub`]; prefix negation is only reachable by id.
pub fn from_str(dsl: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.dsl == dsl && o.fixity != Fixity::Prefix)
        .or_else(|| OPERATORS.iter().find(|o| o.dsl == dsl))
        .map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, dsl: &'static str, spelling: Spelling, precedence: u8, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        id,
        dsl,
        spelling,
        precedence,
        fixity,
    }
}
