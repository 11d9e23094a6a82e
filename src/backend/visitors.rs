//! Visitor binding resolution shared by both backends
//!
//! A method is bound to a node kind only through the declared table in
//! [`dualgen_core::lang::node_kinds`]. Both backends consume the same [`VisitorPlan`], so the set
//! of node kinds bound in the Babel output always equals the set bound in the SWC output.

use std::collections::BTreeSet;

use dualgen_core::lang::node_kinds::{self, NodeKindId};

use super::errors::CodegenWarning;
use crate::ir::{IrFunction, IrItem, VisitorFlags};

/// A DSL method bound to a node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorBinding {
    pub method_name: String,
    pub node_kind: NodeKindId,
    pub flags: VisitorFlags,
}

/// How a method is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodRole {
    Visitor(VisitorBinding),
    /// Ordinary helper
    Helper,
    /// `visit_*` name with no table entry; emitted as a helper with a warning
    UnboundVisitor,
}

/// Classify a single method by the binding table.
pub fn classify(method: &IrFunction) -> MethodRole {
    match node_kinds::from_visitor_method(&method.name) {
        Some(node_kind) => MethodRole::Visitor(VisitorBinding {
            method_name: method.name.clone(),
            node_kind,
            flags: method.visitor,
        }),
        None if node_kinds::is_visitor_name(&method.name) => MethodRole::UnboundVisitor,
        None => MethodRole::Helper,
    }
}

/// Items of a plugin or writer, sorted by role (declaration order kept within each group).
#[derive(Debug, Default)]
pub struct VisitorPlan<'a> {
    pub visitors: Vec<(VisitorBinding, &'a IrFunction)>,
    pub helpers: Vec<&'a IrFunction>,
    pub pre_hook: Option<&'a IrFunction>,
    pub exit_hook: Option<&'a IrFunction>,
    pub warnings: Vec<CodegenWarning>,
}

impl<'a> VisitorPlan<'a> {
    /// Build the plan for the top-level functions of a plugin or writer.
    pub fn from_items(items: &'a [IrItem]) -> Self {
        let mut plan = VisitorPlan::default();
        for item in items {
            match item {
                IrItem::Function(f) => plan.push_method(f),
                IrItem::PreHook(f) => plan.pre_hook = Some(f),
                IrItem::ExitHook(f) => plan.exit_hook = Some(f),
                IrItem::Struct(_) | IrItem::Enum(_) | IrItem::Impl(_) => {}
            }
        }
        plan
    }

    /// Build the plan for the methods of an inline traverse visitor.
    pub fn from_methods(methods: &'a [IrFunction]) -> Self {
        let mut plan = VisitorPlan::default();
        for method in methods {
            plan.push_method(method);
        }
        plan
    }

    fn push_method(&mut self, f: &'a IrFunction) {
        match classify(f) {
            MethodRole::Visitor(binding) => self.visitors.push((binding, f)),
            MethodRole::Helper => self.helpers.push(f),
            MethodRole::UnboundVisitor => {
                tracing::warn!(method = %f.name, "no node kind bound to visitor-style method");
                self.warnings.push(CodegenWarning::MissingVisitorBinding {
                    method_name: f.name.clone(),
                    span: f.span,
                });
                self.helpers.push(f);
            }
        }
    }

    /// Node kinds bound by this plan.
    pub fn bound_kinds(&self) -> BTreeSet<NodeKindId> {
        self.visitors.iter().map(|(b, _)| b.node_kind).collect()
    }
}
