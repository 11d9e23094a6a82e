//! dualgen vocabulary registries.
//!
//! This module is the "front door" for backend vocabulary: node kinds and their builders,
//! operators, macro-style calls, builtin modules and methods, primitive/collection types and
//! reserved words.
//!
//! The design goal is to avoid stringly-typed checks scattered across the generator. Callers work
//! with **stable IDs** (e.g. `NodeKindId`, `OperatorId`) and look up per-backend spellings via the
//! registry tables.
//!
//! ## Notes
//! - Registries are **pure**: no IR types, no IO, no side effects.
//! - Every table is total over its ID enum; `tests/lang_registry_guardrails.rs` enforces this.
//!
//! ## Examples
//! ```rust
//! use dualgen_core::lang::node_kinds::{self, NodeKindId};
//!
//! let kind = node_kinds::from_visitor_method("visit_call_expression");
//! assert_eq!(kind, Some(NodeKindId::CallExpression));
//! assert_eq!(node_kinds::info_for(NodeKindId::CallExpression).swc_type, "CallExpr");
//! ```

pub mod builders;
pub mod keywords;
pub mod macros;
pub mod methods;
pub mod modules;
pub mod node_kinds;
pub mod operators;
pub mod registry;
pub mod types;
