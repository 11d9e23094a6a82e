//! IR match patterns
//!
//! Patterns nest arbitrarily. Array and object patterns may carry a qualifier: an AST node kind
//! (`CallExpression`) or a user struct name. The qualifier decides which node field an array
//! pattern destructures and how object keys are spelled per backend.

use super::expr::IrLiteral;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DSL pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrPattern {
    /// Bind the matched value to a name
    Ident(String),
    /// `_`
    Wildcard,
    Literal(IrLiteral),
    /// `Qualifier[a, b, ..rest]`
    Array {
        #[serde(default)]
        qualifier: Option<String>,
        elements: Vec<IrPattern>,
        #[serde(default)]
        rest: Option<Rest>,
    },
    /// `Qualifier { key: pattern, .. }`
    Object {
        #[serde(default)]
        qualifier: Option<String>,
        fields: Vec<IrFieldPattern>,
        #[serde(default)]
        rest: Option<Rest>,
    },
    /// `Some(p)`, `None`, `Kind::A(p, q)`, `Expression::CallExpression(p)`
    Variant {
        path: String,
        #[serde(default)]
        inner: Vec<IrPattern>,
    },
    /// `a | b`
    Or(Vec<IrPattern>),
}

/// The trailing `..` of an array/object pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rest {
    /// `..`
    Ignore,
    /// `..name`
    Bind(String),
}

/// `key: pattern` inside an object pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrFieldPattern {
    pub key: String,
    pub pattern: IrPattern,
}

impl IrFieldPattern {
    pub fn new(key: impl Into<String>, pattern: IrPattern) -> Self {
        Self {
            key: key.into(),
            pattern,
        }
    }

    /// `{ key }` shorthand: binds the field to a local of the same name.
    pub fn shorthand(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            pattern: IrPattern::Ident(key.clone()),
            key,
        }
    }
}

impl IrPattern {
    pub fn ident(name: impl Into<String>) -> Self {
        IrPattern::Ident(name.into())
    }

    /// Array pattern qualified by a node kind or struct name.
    pub fn array_of(qualifier: impl Into<String>, elements: Vec<IrPattern>) -> Self {
        IrPattern::Array {
            qualifier: Some(qualifier.into()),
            elements,
            rest: None,
        }
    }

    pub fn object_of(qualifier: impl Into<String>, fields: Vec<IrFieldPattern>) -> Self {
        IrPattern::Object {
            qualifier: Some(qualifier.into()),
            fields,
            rest: None,
        }
    }

    pub fn variant(path: impl Into<String>, inner: Vec<IrPattern>) -> Self {
        IrPattern::Variant {
            path: path.into(),
            inner,
        }
    }

    /// Names bound by this pattern, in source order.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            IrPattern::Ident(name) => out.push(name),
            IrPattern::Wildcard | IrPattern::Literal(_) => {}
            IrPattern::Array { elements, rest, .. } => {
                for element in elements {
                    element.collect_names(out);
                }
                if let Some(Rest::Bind(name)) = rest {
                    out.push(name);
                }
            }
            IrPattern::Object { fields, rest, .. } => {
                for field in fields {
                    field.pattern.collect_names(out);
                }
                if let Some(Rest::Bind(name)) = rest {
                    out.push(name);
                }
            }
            IrPattern::Variant { inner, .. } => {
                for p in inner {
                    p.collect_names(out);
                }
            }
            IrPattern::Or(alternatives) => {
                // Alternatives bind the same names; report the first.
                if let Some(first) = alternatives.first() {
                    first.collect_names(out);
                }
            }
        }
    }

    /// True when the pattern binds nothing.
    pub fn is_irrefutable_binding(&self) -> bool {
        matches!(self, IrPattern::Ident(_) | IrPattern::Wildcard)
    }
}

impl fmt::Display for IrPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrPattern::Ident(name) => write!(f, "{}", name),
            IrPattern::Wildcard => write!(f, "_"),
            IrPattern::Literal(lit) => write!(f, "{}", lit),
            IrPattern::Array {
                qualifier,
                elements,
                rest,
            } => {
                if let Some(q) = qualifier {
                    write!(f, "{}", q)?;
                }
                write!(f, "[")?;
                let mut first = true;
                for element in elements {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{}", element)?;
                }
                if let Some(rest) = rest {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", rest)?;
                }
                write!(f, "]")
            }
            IrPattern::Object {
                qualifier,
                fields,
                rest,
            } => {
                if let Some(q) = qualifier {
                    write!(f, "{} ", q)?;
                }
                write!(f, "{{ ")?;
                let mut first = true;
                for field in fields {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    match &field.pattern {
                        IrPattern::Ident(name) if *name == field.key => write!(f, "{}", name)?,
                        other => write!(f, "{}: {}", field.key, other)?,
                    }
                }
                if let Some(rest) = rest {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", rest)?;
                }
                write!(f, " }}")
            }
            IrPattern::Variant { path, inner } => {
                write!(f, "{}", path)?;
                if !inner.is_empty() {
                    write!(f, "(")?;
                    for (i, p) in inner.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", p)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            IrPattern::Or(alternatives) => {
                for (i, p) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", p)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Rest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rest::Ignore => write!(f, ".."),
            Rest::Bind(name) => write!(f, "..{}", name),
        }
    }
}
