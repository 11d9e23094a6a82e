//! Structural checks on a loaded IR program
//!
//! The DSL front end already type-checked the program; these checks cover the rules codegen
//! relies on that the JSON shape cannot express:
//!
//! - every declaration, field, variant and parameter has a non-empty name
//! - item names are unique within the plugin/module, field names within a struct, variant names
//!   within an enum, method names within an `impl`
//! - at most one method per node kind in a visitor (top-level or inline `traverse`), and at most
//!   one `pre`/`exit` hook
//!
//! All findings are collected; validation never stops at the first one.

use std::collections::{HashMap, HashSet};

use dualgen_core::lang::node_kinds;
use miette::Diagnostic;
use thiserror::Error;

use crate::ir::{IrBlock, IrFunction, IrItem, IrProgram, IrSpan, IrStmtKind, TraverseVisitor};

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("`{name}` is declared more than once in {scope}")]
    #[diagnostic(code(E0111))]
    DuplicateItem { name: String, scope: String, span: IrSpan },

    #[error("node kind `{node_kind}` is visited by both `{first}` and `{second}`")]
    #[diagnostic(code(E0112), help("merge the two methods into one"))]
    DuplicateVisitorBinding {
        node_kind: String,
        first: String,
        second: String,
        span: IrSpan,
    },

    #[error("{what} has an empty name")]
    #[diagnostic(code(E0113))]
    EmptyName { what: String, span: IrSpan },
}

impl ValidationError {
    pub fn span(&self) -> Option<IrSpan> {
        let span = match self {
            ValidationError::DuplicateItem { span, .. }
            | ValidationError::DuplicateVisitorBinding { span, .. }
            | ValidationError::EmptyName { span, .. } => *span,
        };
        span.is_known().then_some(span)
    }
}

/// Check `program`; an empty result means it is fit for codegen.
#[tracing::instrument(skip_all, fields(program = program.name()))]
pub fn validate(program: &IrProgram) -> Vec<ValidationError> {
    let mut v = Validator::default();
    let decl_span = program.decl.span();
    if program.name().is_empty() {
        v.empty("top-level declaration", decl_span);
    }
    v.items(program.name(), program.items());
    tracing::debug!(errors = v.errors.len(), "validation complete");
    v.errors
}

#[derive(Default)]
struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    fn empty(&mut self, what: &str, span: IrSpan) {
        self.errors.push(ValidationError::EmptyName {
            what: what.to_string(),
            span,
        });
    }

    /// Record duplicates among `names` (in order) as `DuplicateItem` in `scope`.
    fn unique<'a>(&mut self, scope: &str, names: impl IntoIterator<Item = (&'a str, IrSpan)>) {
        let mut seen = HashSet::new();
        for (name, span) in names {
            if !name.is_empty() && !seen.insert(name) {
                self.errors.push(ValidationError::DuplicateItem {
                    name: name.to_string(),
                    scope: scope.to_string(),
                    span,
                });
            }
        }
    }

    fn items(&mut self, owner: &str, items: &[IrItem]) {
        let scope = format!("`{}`", owner);
        self.unique(
            &scope,
            items.iter().filter_map(|item| match item {
                IrItem::Struct(_) | IrItem::Enum(_) | IrItem::Function(_) => Some((item.name(), item.span())),
                IrItem::Impl(_) => None,
                IrItem::PreHook(f) => Some(("pre", f.span)),
                IrItem::ExitHook(f) => Some(("exit", f.span)),
            }),
        );

        let mut methods = Vec::new();
        for item in items {
            match item {
                IrItem::Struct(s) => {
                    if s.name.is_empty() {
                        self.empty("struct", s.span);
                    }
                    if s.fields.iter().any(|f| f.name.is_empty()) {
                        self.empty(&format!("field of `{}`", s.name), s.span);
                    }
                    self.unique(
                        &format!("struct `{}`", s.name),
                        s.fields.iter().map(|f| (f.name.as_str(), s.span)),
                    );
                }
                IrItem::Enum(e) => {
                    if e.name.is_empty() {
                        self.empty("enum", e.span);
                    }
                    if e.variants.iter().any(|variant| variant.name.is_empty()) {
                        self.empty(&format!("variant of `{}`", e.name), e.span);
                    }
                    self.unique(
                        &format!("enum `{}`", e.name),
                        e.variants.iter().map(|variant| (variant.name.as_str(), e.span)),
                    );
                }
                IrItem::Function(f) => {
                    self.function(f);
                    methods.push(f);
                }
                IrItem::PreHook(f) | IrItem::ExitHook(f) => self.function(f),
                IrItem::Impl(i) => {
                    if i.target.is_empty() {
                        self.empty("impl target", i.span);
                    }
                    self.unique(
                        &format!("impl `{}`", i.target),
                        i.methods.iter().map(|m| (m.name.as_str(), m.span)),
                    );
                    for method in &i.methods {
                        self.function(method);
                    }
                }
            }
        }
        self.bindings(&methods);
    }

    fn function(&mut self, f: &IrFunction) {
        if f.name.is_empty() {
            self.empty("function", f.span);
        }
        if f.params.iter().any(|p| p.name.is_empty()) {
            self.empty(&format!("parameter of `{}`", f.name), f.span);
        }
        self.block(&f.body);
    }

    /// At most one method per node kind.
    fn bindings(&mut self, methods: &[&IrFunction]) {
        let mut bound: HashMap<node_kinds::NodeKindId, &str> = HashMap::new();
        for method in methods {
            let Some(kind) = node_kinds::from_visitor_method(&method.name) else {
                continue;
            };
            if let Some(first) = bound.insert(kind, &method.name) {
                self.errors.push(ValidationError::DuplicateVisitorBinding {
                    node_kind: node_kinds::info_for(kind).name.to_string(),
                    first: first.to_string(),
                    second: method.name.clone(),
                    span: method.span,
                });
            }
        }
    }

    /// Statement-level walk looking for inline `traverse` visitors.
    fn block(&mut self, block: &IrBlock) {
        for stmt in &block.stmts {
            match &stmt.kind {
                IrStmtKind::Block(b) | IrStmtKind::For { body: b, .. } | IrStmtKind::While { body: b, .. } => {
                    self.block(b)
                }
                IrStmtKind::If {
                    then_block, else_block, ..
                }
                | IrStmtKind::IfLet {
                    then_block, else_block, ..
                } => {
                    self.block(then_block);
                    if let Some(else_block) = else_block {
                        self.block(else_block);
                    }
                }
                IrStmtKind::Traverse(traverse) => {
                    if let TraverseVisitor::Inline { state, methods } = &traverse.visitor {
                        if state.iter().any(|field| field.name.is_empty()) {
                            self.empty("inline visitor state field", IrSpan::default());
                        }
                        self.unique(
                            "inline visitor",
                            methods.iter().map(|m| (m.name.as_str(), m.span)),
                        );
                        for method in methods {
                            self.function(method);
                        }
                        self.bindings(&methods.iter().collect::<Vec<_>>());
                    }
                }
                _ => {}
            }
        }
    }
}
