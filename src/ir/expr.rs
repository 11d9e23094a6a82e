//! IR expression definitions.
//!
//! ## Macro-style calls
//!
//! A macro-style invocation (`format!("x={}", x)`) is its own node, [`IrExprKind::MacroCall`],
//! rather than a flag on `Call`. The front end decides what is a macro; backends never guess from
//! the callee name.
//!
//! ## Operators
//!
//! Operators are closed enums that map onto [`dualgen_core::lang::operators::OperatorId`]; the
//! per-backend spelling (or its absence) comes from the registry.

use super::pattern::IrPattern;
use super::stmt::IrBlock;
use super::{IrSpan, IrType};
use dualgen_core::lang::operators::OperatorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (possibly typed) expression in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrExpr {
    pub kind: IrExprKind,
    /// Resolved type, when the front end recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<IrType>,
    #[serde(default)]
    pub span: IrSpan,
}

impl IrExpr {
    pub fn new(kind: IrExprKind) -> Self {
        Self {
            kind,
            ty: None,
            span: IrSpan::default(),
        }
    }

    pub fn with_ty(mut self, ty: IrType) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_span(mut self, span: IrSpan) -> Self {
        self.span = span;
        self
    }

    pub fn int(value: i64) -> Self {
        Self::new(IrExprKind::Literal(IrLiteral::Int(value))).with_ty(IrType::int())
    }

    pub fn float(value: f64) -> Self {
        Self::new(IrExprKind::Literal(IrLiteral::Float(value))).with_ty(IrType::float())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(IrExprKind::Literal(IrLiteral::Str(value.into()))).with_ty(IrType::str())
    }

    pub fn bool(value: bool) -> Self {
        Self::new(IrExprKind::Literal(IrLiteral::Bool(value))).with_ty(IrType::bool())
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(IrExprKind::Ident(name.into()))
    }

    /// Call of a named function.
    pub fn call(callee: impl Into<String>, args: Vec<IrExpr>) -> Self {
        Self::new(IrExprKind::Call {
            callee: Box::new(Self::ident(callee)),
            args,
        })
    }

    /// Call of an arbitrary callee expression (`HashMap::new()`).
    pub fn call_expr(callee: IrExpr, args: Vec<IrExpr>) -> Self {
        Self::new(IrExprKind::Call {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn macro_call(name: impl Into<String>, args: Vec<IrExpr>) -> Self {
        Self::new(IrExprKind::MacroCall {
            name: name.into(),
            args,
        })
    }

    pub fn member(object: IrExpr, property: impl Into<String>) -> Self {
        Self::new(IrExprKind::Member {
            object: Box::new(object),
            property: property.into(),
            path: false,
        })
    }

    /// `Enum::Variant` style path access.
    pub fn path(object: impl Into<String>, item: impl Into<String>) -> Self {
        Self::new(IrExprKind::Member {
            object: Box::new(Self::ident(object)),
            property: item.into(),
            path: true,
        })
    }

    pub fn method_call(receiver: IrExpr, method: impl Into<String>, args: Vec<IrExpr>) -> Self {
        Self::new(IrExprKind::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        })
    }

    pub fn binary(op: BinaryOp, left: IrExpr, right: IrExpr) -> Self {
        Self::new(IrExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, operand: IrExpr) -> Self {
        Self::new(IrExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn assign(target: IrExpr, value: IrExpr) -> Self {
        Self::new(IrExprKind::Assign {
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn compound_assign(op: CompoundOp, target: IrExpr, value: IrExpr) -> Self {
        Self::new(IrExprKind::CompoundAssign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn match_(scrutinee: IrExpr, arms: Vec<IrMatchArm>) -> Self {
        Self::new(IrExprKind::Match {
            scrutinee: Box::new(scrutinee),
            arms,
        })
    }

    pub fn deref(inner: IrExpr) -> Self {
        Self::new(IrExprKind::Deref(Box::new(inner)))
    }

    /// `Name { field: value, .. }`
    pub fn struct_init<S: Into<String>>(name: impl Into<String>, fields: impl IntoIterator<Item = (S, IrExpr)>) -> Self {
        Self::new(IrExprKind::StructInit {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(name, value)| IrFieldInit {
                    name: name.into(),
                    value,
                })
                .collect(),
        })
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrLiteral {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Unit,
}

impl fmt::Display for IrLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrLiteral::Int(v) => write!(f, "{}", v),
            IrLiteral::Float(v) => write!(f, "{:?}", v),
            IrLiteral::Str(s) => write!(f, "{:?}", s),
            IrLiteral::Bool(b) => write!(f, "{}", b),
            IrLiteral::Null => write!(f, "null"),
            IrLiteral::Unit => write!(f, "()"),
        }
    }
}

/// Expression kinds in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrExprKind {
    Literal(IrLiteral),
    Ident(String),

    /// Ordinary call
    Call { callee: Box<IrExpr>, args: Vec<IrExpr> },
    /// Macro-style call (`name!(args)` in the DSL)
    MacroCall { name: String, args: Vec<IrExpr> },

    /// Field access (`a.b`) or path access (`A::b`) when `path` is set
    Member {
        object: Box<IrExpr>,
        property: String,
        #[serde(default)]
        path: bool,
    },
    MethodCall {
        receiver: Box<IrExpr>,
        method: String,
        args: Vec<IrExpr>,
    },
    Index { object: Box<IrExpr>, index: Box<IrExpr> },

    Binary {
        op: BinaryOp,
        left: Box<IrExpr>,
        right: Box<IrExpr>,
    },
    Unary { op: UnaryOp, operand: Box<IrExpr> },
    Assign { target: Box<IrExpr>, value: Box<IrExpr> },
    CompoundAssign {
        op: CompoundOp,
        target: Box<IrExpr>,
        value: Box<IrExpr>,
    },

    /// Pattern-guarded branches
    Match { scrutinee: Box<IrExpr>, arms: Vec<IrMatchArm> },
    /// `matches!(scrutinee, pattern)`
    Matches { scrutinee: Box<IrExpr>, pattern: IrPattern },

    StructInit { name: String, fields: Vec<IrFieldInit> },
    VecInit(Vec<IrExpr>),
    Closure { params: Vec<String>, body: Box<IrExpr> },

    Ref {
        #[serde(default)]
        mutable: bool,
        expr: Box<IrExpr>,
    },
    Deref(Box<IrExpr>),
    Range {
        #[serde(default)]
        start: Option<Box<IrExpr>>,
        #[serde(default)]
        end: Option<Box<IrExpr>>,
        #[serde(default)]
        inclusive: bool,
    },
    /// `expr?`
    Try(Box<IrExpr>),
    Paren(Box<IrExpr>),
    Block(IrBlock),
}

/// One `pattern [if guard] => body` arm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrMatchArm {
    pub pattern: IrPattern,
    #[serde(default)]
    pub guard: Option<IrExpr>,
    pub body: IrExpr,
}

impl IrMatchArm {
    pub fn new(pattern: IrPattern, body: IrExpr) -> Self {
        Self {
            pattern,
            guard: None,
            body,
        }
    }

    pub fn with_guard(mut self, guard: IrExpr) -> Self {
        self.guard = Some(guard);
        self
    }
}

/// `name: value` inside a struct literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrFieldInit {
    pub name: String,
    pub value: IrExpr,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UnsignedShr,
}

impl BinaryOp {
    pub fn operator(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Add,
            BinaryOp::Sub => OperatorId::Sub,
            BinaryOp::Mul => OperatorId::Mul,
            BinaryOp::Div => OperatorId::Div,
            BinaryOp::Rem => OperatorId::Rem,
            BinaryOp::Pow => OperatorId::Pow,
            BinaryOp::Eq => OperatorId::Eq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
            BinaryOp::And => OperatorId::And,
            BinaryOp::Or => OperatorId::Or,
            BinaryOp::BitAnd => OperatorId::BitAnd,
            BinaryOp::BitOr => OperatorId::BitOr,
            BinaryOp::BitXor => OperatorId::BitXor,
            BinaryOp::Shl => OperatorId::Shl,
            BinaryOp::Shr => OperatorId::Shr,
            BinaryOp::UnsignedShr => OperatorId::UnsignedShr,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Neg,
    BitNot,
}

impl UnaryOp {
    pub fn operator(self) -> OperatorId {
        match self {
            UnaryOp::Not => OperatorId::Not,
            UnaryOp::Neg => OperatorId::Neg,
            UnaryOp::BitNot => OperatorId::BitNot,
        }
    }
}

/// Compound assignment operators (`+=`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl CompoundOp {
    pub fn operator(self) -> OperatorId {
        match self {
            CompoundOp::Add => OperatorId::AddAssign,
            CompoundOp::Sub => OperatorId::SubAssign,
            CompoundOp::Mul => OperatorId::MulAssign,
            CompoundOp::Div => OperatorId::DivAssign,
            CompoundOp::Rem => OperatorId::RemAssign,
            CompoundOp::Pow => OperatorId::PowAssign,
        }
    }
}
