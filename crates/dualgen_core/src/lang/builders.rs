//! AST node construction vocabulary.
//!
//! A DSL struct literal whose name is a node kind (`Identifier { name: "x" }`) builds a fresh AST
//! node. Babel output calls the `@babel/types` builder (`t.identifier("x")`) with the fields in
//! builder-argument order; SWC output fills the [`NodeBuilder::swc`] template, one `{field}`
//! placeholder per argument.
//!
//! ## Notes
//! - Only the kinds listed here can be constructed. Other node kinds are reported as unsupported.
//! - An argument without defaults is required.
//!
//! ## Examples
//! ```rust
//! use dualgen_core::lang::builders;
//! use dualgen_core::lang::node_kinds::NodeKindId;
//!
//! let ident = builders::for_kind(NodeKindId::Identifier).unwrap();
//! assert_eq!(ident.babel, "identifier");
//! assert!(ident.swc.starts_with("Ident::new({name}"));
//! ```

use super::node_kinds::NodeKindId;

/// What an SWC builder argument expects, which decides how a node value is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A plain Rust value (`String`, `f64`, `bool`), substituted as is.
    Value,
    /// An `Expr`; node values are wrapped in their enum path (`Expr::Ident(..)`).
    Expr,
    /// `Option<Box<Expr>>`.
    OptExpr,
    /// A `Vec<Expr>`; `vec![..]` literals have each element wrapped.
    ExprList,
    /// A `Vec<Stmt>`; `vec![..]` literals have each element wrapped.
    StmtList,
    /// A member property: an `Identifier` node becomes a named property, anything else computed.
    MemberProp,
}

/// One builder argument, in builder order.
#[derive(Debug, Clone, Copy)]
pub struct BuilderArg {
    /// DSL field name.
    pub field: &'static str,
    pub slot: Slot,
    /// Written when the field is omitted; `None` (on both) means required.
    pub babel_default: Option<&'static str>,
    pub swc_default: Option<&'static str>,
}

impl BuilderArg {
    pub fn is_required(&self) -> bool {
        self.babel_default.is_none() && self.swc_default.is_none()
    }
}

/// How one node kind is constructed on each backend.
#[derive(Debug, Clone, Copy)]
pub struct NodeBuilder {
    pub kind: NodeKindId,
    /// `@babel/types` builder name, without the `t.` prefix.
    pub babel: &'static str,
    pub args: &'static [BuilderArg],
    /// Rust expression template with one `{field}` placeholder per argument.
    pub swc: &'static str,
}

impl NodeBuilder {
    pub fn arg(&self, field: &str) -> Option<&'static BuilderArg> {
        self.args.iter().find(|a| a.field == field)
    }
}

/// Registry of constructible node kinds.
pub const BUILDERS: &[NodeBuilder] = &[
    NodeBuilder {
        kind: NodeKindId::Identifier,
        babel: "identifier",
        args: &[required("name", Slot::Value)],
        swc: "Ident::new({name}.into(), DUMMY_SP, SyntaxContext::empty())",
    },
    NodeBuilder {
        kind: NodeKindId::StringLiteral,
        babel: "stringLiteral",
        args: &[required("value", Slot::Value)],
        swc: "Str { span: DUMMY_SP, value: {value}.into(), raw: None }",
    },
    NodeBuilder {
        kind: NodeKindId::NumericLiteral,
        babel: "numericLiteral",
        args: &[required("value", Slot::Value)],
        swc: "Number { span: DUMMY_SP, value: ({value}) as f64, raw: None }",
    },
    NodeBuilder {
        kind: NodeKindId::BooleanLiteral,
        babel: "booleanLiteral",
        args: &[required("value", Slot::Value)],
        swc: "Bool { span: DUMMY_SP, value: {value} }",
    },
    NodeBuilder {
        kind: NodeKindId::CallExpression,
        babel: "callExpression",
        args: &[
            required("callee", Slot::Expr),
            optional("arguments", Slot::ExprList, "[]", "Vec::<Expr>::new()"),
        ],
        swc: "CallExpr { span: DUMMY_SP, callee: Callee::Expr(Box::new({callee})), args: {arguments}.into_iter().map(|expr| ExprOrSpread { spread: None, expr: Box::new(expr) }).collect(), ..Default::default() }",
    },
    NodeBuilder {
        kind: NodeKindId::MemberExpression,
        babel: "memberExpression",
        args: &[required("object", Slot::Expr), required("property", Slot::MemberProp)],
        swc: "MemberExpr { span: DUMMY_SP, obj: Box::new({object}), prop: {property} }",
    },
    NodeBuilder {
        kind: NodeKindId::ArrayExpression,
        babel: "arrayExpression",
        args: &[optional("elements", Slot::ExprList, "[]", "Vec::<Expr>::new()")],
        swc: "ArrayLit { span: DUMMY_SP, elems: {elements}.into_iter().map(|expr| Some(ExprOrSpread { spread: None, expr: Box::new(expr) })).collect() }",
    },
    NodeBuilder {
        kind: NodeKindId::ExpressionStatement,
        babel: "expressionStatement",
        args: &[required("expression", Slot::Expr)],
        swc: "ExprStmt { span: DUMMY_SP, expr: Box::new({expression}) }",
    },
    NodeBuilder {
        kind: NodeKindId::ReturnStatement,
        babel: "returnStatement",
        args: &[optional("argument", Slot::OptExpr, "null", "None")],
        swc: "ReturnStmt { span: DUMMY_SP, arg: {argument} }",
    },
    NodeBuilder {
        kind: NodeKindId::BlockStatement,
        babel: "blockStatement",
        args: &[optional("body", Slot::StmtList, "[]", "Vec::<Stmt>::new()")],
        swc: "BlockStmt { span: DUMMY_SP, stmts: {body}, ..Default::default() }",
    },
];

/// The builder for `kind`, if the kind can be constructed.
pub fn for_kind(kind: NodeKindId) -> Option<&'static NodeBuilder> {
    BUILDERS.iter().find(|b| b.kind == kind)
}

// --- helpers -----------------------------------------------------------------

const fn required(field: &'static str, slot: Slot) -> BuilderArg {
    BuilderArg {
        field,
        slot,
        babel_default: None,
        swc_default: None,
    }
}

const fn optional(field: &'static str, slot: Slot, babel: &'static str, swc: &'static str) -> BuilderArg {
    BuilderArg {
        field,
        slot,
        babel_default: Some(babel),
        swc_default: Some(swc),
    }
}
