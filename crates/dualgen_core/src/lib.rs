//! Provide the canonical vocabulary shared by both dualgen backends.
//!
//! Everything in this crate is a const registry: AST node kinds and their per-backend spellings,
//! operators, macro-style calls, builtin modules, builtin methods, primitive/collection types and
//! reserved words. Backends look things up here instead of hard-coding strings.
//!
//! ## Notes
//!
//! - This is a pure crate: **no IO**, no global state, no dependency on the IR types.
//! - Lookups return `Option`; callers turn a miss into a backend-specific diagnostic.

pub mod lang;
