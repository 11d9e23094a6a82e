//! Shareable metadata for `dualgen_core::lang` registries.
//!
//! Every registry in [`crate::lang`] answers the same question for a different vocabulary: "how
//! does backend X spell this?". This submodule holds the small, dependency-free types reused by
//! all of them.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.

/// Identify one of the two code generation targets.
///
/// The generator crate has its own `Backend` type; registries use this lightweight mirror so the
/// core crate stays independent of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// JavaScript AST transforms (Babel plugin API).
    Babel,
    /// Rust AST transforms (SWC visitor API).
    Swc,
}

impl Target {
    /// All targets in emission order.
    pub const ALL: [Target; 2] = [Target::Babel, Target::Swc];

    pub const fn as_str(self) -> &'static str {
        match self {
            Target::Babel => "babel",
            Target::Swc => "swc",
        }
    }
}

/// A per-target spelling. `None` means the target has no native equivalent.
///
/// ## Examples
/// ```rust
/// use dualgen_core::lang::registry::{Spelling, Target};
///
/// let pow = Spelling { babel: Some("**"), swc: None };
/// assert_eq!(pow.get(Target::Babel), Some("**"));
/// assert_eq!(pow.get(Target::Swc), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub babel: Option<&'static str>,
    pub swc: Option<&'static str>,
}

impl Spelling {
    /// Same spelling on both targets.
    pub const fn both(s: &'static str) -> Self {
        Self {
            babel: Some(s),
            swc: Some(s),
        }
    }

    /// Different spellings per target.
    pub const fn split(babel: &'static str, swc: &'static str) -> Self {
        Self {
            babel: Some(babel),
            swc: Some(swc),
        }
    }

    /// Only the Babel target has this construct.
    pub const fn babel_only(babel: &'static str) -> Self {
        Self {
            babel: Some(babel),
            swc: None,
        }
    }

    pub const fn get(&self, target: Target) -> Option<&'static str> {
        match target {
            Target::Babel => self.babel,
            Target::Swc => self.swc,
        }
    }
}
