//! IR statement definitions

use super::decl::IrFunction;
use super::expr::IrExpr;
use super::pattern::IrPattern;
use super::{IrSpan, IrType};
use serde::{Deserialize, Serialize};

/// Statement in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrStmt {
    pub kind: IrStmtKind,
    #[serde(default)]
    pub span: IrSpan,
}

impl IrStmt {
    pub fn new(kind: IrStmtKind) -> Self {
        Self {
            kind,
            span: IrSpan::default(),
        }
    }

    pub fn with_span(mut self, span: IrSpan) -> Self {
        self.span = span;
        self
    }

    pub fn expr(expr: IrExpr) -> Self {
        Self::new(IrStmtKind::Expr(expr))
    }

    /// `let name = init;`
    pub fn let_(name: impl Into<String>, init: IrExpr) -> Self {
        Self::new(IrStmtKind::Let {
            pattern: IrPattern::Ident(name.into()),
            mutable: false,
            ty: None,
            init: Some(init),
        })
    }

    pub fn ret(value: Option<IrExpr>) -> Self {
        Self::new(IrStmtKind::Return(value))
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrStmtKind {
    Block(IrBlock),
    /// `let [mut] pattern[: ty] [= init];`
    Let {
        pattern: IrPattern,
        #[serde(default)]
        mutable: bool,
        #[serde(default)]
        ty: Option<IrType>,
        #[serde(default)]
        init: Option<IrExpr>,
    },
    Const { name: String, ty: IrType, value: IrExpr },
    Expr(IrExpr),
    If {
        cond: IrExpr,
        then_block: IrBlock,
        #[serde(default)]
        else_block: Option<IrBlock>,
    },
    /// `if let pattern = scrutinee { .. } [else { .. }]`
    IfLet {
        pattern: IrPattern,
        scrutinee: IrExpr,
        then_block: IrBlock,
        #[serde(default)]
        else_block: Option<IrBlock>,
    },
    For {
        binding: String,
        iterable: IrExpr,
        body: IrBlock,
    },
    While { cond: IrExpr, body: IrBlock },
    Break,
    Continue,
    Return(Option<IrExpr>),
    /// Nested traversal of a subtree
    Traverse(IrTraverse),
    /// Raw code for one backend; the other backend skips it.
    Verbatim { target: VerbatimTarget, code: String },
}

/// Backend selector of a verbatim block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbatimTarget {
    Babel,
    Swc,
}

/// A braced statement list with an optional tail expression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrBlock {
    #[serde(default)]
    pub stmts: Vec<IrStmt>,
    /// Trailing expression without a semicolon (the block's value)
    #[serde(default)]
    pub tail: Option<Box<IrExpr>>,
}

impl IrBlock {
    pub fn new(stmts: Vec<IrStmt>) -> Self {
        Self { stmts, tail: None }
    }

    pub fn with_tail(mut self, tail: IrExpr) -> Self {
        self.tail = Some(Box::new(tail));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty() && self.tail.is_none()
    }
}

/// `traverse target with visitor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrTraverse {
    /// Subtree to walk (`node`, `node.body`)
    pub target: IrExpr,
    pub visitor: TraverseVisitor,
    /// Outer locals read inside the inline visitor
    #[serde(default)]
    pub captures: Vec<String>,
}

/// Visitor used by a nested traversal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraverseVisitor {
    /// Anonymous visitor with its own state and hook methods
    Inline {
        #[serde(default)]
        state: Vec<IrStateField>,
        methods: Vec<IrFunction>,
    },
    /// Reuse of a named visitor struct
    Delegated(String),
}

/// One state field of an inline visitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrStateField {
    pub name: String,
    pub ty: IrType,
    #[serde(default)]
    pub init: Option<IrExpr>,
}
