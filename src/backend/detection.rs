//! Detection pass: usage facts that decide each backend's header
//!
//! [`detect`] walks the whole program once, before any text is emitted, and records which
//! collections, macros, builtin modules and derives are used anywhere: struct fields, signatures,
//! `let` types nested in inner blocks, expression types, closure bodies and inline visitors.
//! [`Detection::markers`] turns those facts into the ordered set of support markers a backend's
//! header must satisfy.

use std::collections::BTreeSet;
use std::fmt;

use dualgen_core::lang::builders;
use dualgen_core::lang::macros::{self, MacroId};
use dualgen_core::lang::node_kinds;
use dualgen_core::lang::modules::{self, BuiltinModuleId};
use dualgen_core::lang::types::{self, CollectionId};

use super::Backend;
use crate::ir::{
    CollectionKind, IrBlock, IrExpr, IrExprKind, IrFunction, IrItem, IrProgram, IrStmt, IrStmtKind, IrTopLevel,
    IrType, TraverseVisitor,
};

/// One piece of header support a backend needs.
///
/// Variant order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SupportMarker {
    // --- SWC ---
    HashMapImport,
    HashSetImport,
    SerdeImport,
    SerdeJsonImport,
    FsImport,
    PathImport,
    VisitImport,
    VisitMutImport,
    /// `DUMMY_SP` and `SyntaxContext` for constructed nodes
    SpanImport,
    /// `Take` for removed nodes
    TakeImport,
    // --- Babel ---
    /// Runtime function standing in for a macro (`format`, `println`, `vec`, ...)
    Shim(MacroId),
    FsRequire,
    PathRequire,
}

impl fmt::Display for SupportMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportMarker::HashMapImport => write!(f, "HashMapImport"),
            SupportMarker::HashSetImport => write!(f, "HashSetImport"),
            SupportMarker::SerdeImport => write!(f, "SerdeImport"),
            SupportMarker::SerdeJsonImport => write!(f, "SerdeJsonImport"),
            SupportMarker::FsImport => write!(f, "FsImport"),
            SupportMarker::PathImport => write!(f, "PathImport"),
            SupportMarker::VisitImport => write!(f, "VisitImport"),
            SupportMarker::VisitMutImport => write!(f, "VisitMutImport"),
            SupportMarker::SpanImport => write!(f, "SpanImport"),
            SupportMarker::TakeImport => write!(f, "TakeImport"),
            SupportMarker::Shim(id) => {
                let name = macros::info_for(*id).name;
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => write!(f, "{}{}Shim", first.to_ascii_uppercase(), chars.as_str()),
                    None => write!(f, "Shim"),
                }
            }
            SupportMarker::FsRequire => write!(f, "FsRequire"),
            SupportMarker::PathRequire => write!(f, "PathRequire"),
        }
    }
}

/// Usage facts collected from one program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub uses_hashmap: bool,
    pub uses_hashset: bool,
    pub uses_serde: bool,
    /// Nested `traverse` statements are present
    pub uses_traverse: bool,
    pub is_writer: bool,
    pub is_plugin: bool,
    /// Known macros invoked anywhere
    pub macros: BTreeSet<MacroId>,
    /// Macro names with no registry entry (emitted as plain calls without a shim)
    pub unknown_macros: BTreeSet<String>,
    pub builtin_modules: BTreeSet<BuiltinModuleId>,
    /// Struct literals naming a constructible node kind
    pub constructs_nodes: bool,
    /// Zero-argument `remove()` calls
    pub removes_nodes: bool,
}

impl Detection {
    /// Ordered support markers for `backend`.
    pub fn markers(&self, backend: Backend) -> BTreeSet<SupportMarker> {
        let mut out = BTreeSet::new();
        match backend {
            Backend::Swc => {
                if self.uses_hashmap {
                    out.insert(SupportMarker::HashMapImport);
                }
                if self.uses_hashset {
                    out.insert(SupportMarker::HashSetImport);
                }
                if self.uses_serde {
                    out.insert(SupportMarker::SerdeImport);
                }
                for module in &self.builtin_modules {
                    out.insert(match module {
                        BuiltinModuleId::Fs => SupportMarker::FsImport,
                        BuiltinModuleId::Path => SupportMarker::PathImport,
                        BuiltinModuleId::Json => SupportMarker::SerdeJsonImport,
                    });
                }
                if self.constructs_nodes {
                    out.insert(SupportMarker::SpanImport);
                }
                if self.removes_nodes {
                    out.insert(SupportMarker::TakeImport);
                }
                if self.is_writer {
                    out.insert(SupportMarker::VisitImport);
                } else if self.is_plugin || self.uses_traverse {
                    out.insert(SupportMarker::VisitMutImport);
                }
            }
            Backend::Babel => {
                for id in &self.macros {
                    if !macros::info_for(*id).babel_shim.is_empty() {
                        out.insert(SupportMarker::Shim(*id));
                    }
                }
                for module in &self.builtin_modules {
                    match module {
                        BuiltinModuleId::Fs => {
                            out.insert(SupportMarker::FsRequire);
                        }
                        BuiltinModuleId::Path => {
                            out.insert(SupportMarker::PathRequire);
                        }
                        // JSON is a global in JS
                        BuiltinModuleId::Json => {}
                    }
                }
            }
        }
        out
    }
}

/// Run the detection pass over a whole program.
#[tracing::instrument(skip_all, fields(program = program.name()))]
pub fn detect(program: &IrProgram) -> Detection {
    let mut scanner = Scanner::default();
    scanner.found.is_writer = matches!(program.decl, IrTopLevel::Writer(_));
    scanner.found.is_plugin = matches!(program.decl, IrTopLevel::Plugin(_));

    for use_decl in &program.uses {
        if let Some(id) = modules::from_str(&use_decl.path) {
            scanner.found.builtin_modules.insert(id);
        }
    }
    for item in program.items() {
        scanner.item(item);
    }

    let found = scanner.found;
    tracing::debug!(
        hashmap = found.uses_hashmap,
        hashset = found.uses_hashset,
        serde = found.uses_serde,
        macros = found.macros.len(),
        "detection complete"
    );
    found
}

#[derive(Default)]
struct Scanner {
    found: Detection,
}

impl Scanner {
    fn item(&mut self, item: &IrItem) {
        match item {
            IrItem::Struct(s) => {
                if s.serializable {
                    self.found.uses_serde = true;
                }
                for field in &s.fields {
                    self.ty(&field.ty);
                }
            }
            IrItem::Enum(e) => {
                for variant in &e.variants {
                    for ty in &variant.fields {
                        self.ty(ty);
                    }
                }
            }
            IrItem::Function(f) | IrItem::PreHook(f) | IrItem::ExitHook(f) => self.function(f),
            IrItem::Impl(i) => {
                for method in &i.methods {
                    self.function(method);
                }
            }
        }
    }

    fn function(&mut self, f: &IrFunction) {
        for param in &f.params {
            self.ty(&param.ty);
        }
        if let Some(ret) = &f.ret {
            self.ty(ret);
        }
        self.block(&f.body);
    }

    fn ty(&mut self, ty: &IrType) {
        ty.walk(&mut |t| match t.collection_kind() {
            Some(CollectionKind::HashMap) => self.found.uses_hashmap = true,
            Some(CollectionKind::HashSet) => self.found.uses_hashset = true,
            Some(CollectionKind::Vec) | None => {}
        });
    }

    fn collection_name(&mut self, name: &str) {
        match types::collection_from_str(name) {
            Some(CollectionId::HashMap) => self.found.uses_hashmap = true,
            Some(CollectionId::HashSet) => self.found.uses_hashset = true,
            Some(CollectionId::Vec) | None => {}
        }
    }

    fn block(&mut self, block: &IrBlock) {
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
        if let Some(tail) = &block.tail {
            self.expr(tail);
        }
    }

    fn stmt(&mut self, stmt: &IrStmt) {
        match &stmt.kind {
            IrStmtKind::Block(b) => self.block(b),
            IrStmtKind::Let { ty, init, .. } => {
                if let Some(ty) = ty {
                    self.ty(ty);
                }
                if let Some(init) = init {
                    self.expr(init);
                }
            }
            IrStmtKind::Const { ty, value, .. } => {
                self.ty(ty);
                self.expr(value);
            }
            IrStmtKind::Expr(e) => self.expr(e),
            IrStmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                self.expr(cond);
                self.block(then_block);
                if let Some(b) = else_block {
                    self.block(b);
                }
            }
            IrStmtKind::IfLet {
                scrutinee,
                then_block,
                else_block,
                ..
            } => {
                self.expr(scrutinee);
                self.block(then_block);
                if let Some(b) = else_block {
                    self.block(b);
                }
            }
            IrStmtKind::For { iterable, body, .. } => {
                self.expr(iterable);
                self.block(body);
            }
            IrStmtKind::While { cond, body } => {
                self.expr(cond);
                self.block(body);
            }
            IrStmtKind::Return(value) => {
                if let Some(v) = value {
                    self.expr(v);
                }
            }
            IrStmtKind::Traverse(traverse) => {
                self.found.uses_traverse = true;
                self.expr(&traverse.target);
                if let TraverseVisitor::Inline { state, methods } = &traverse.visitor {
                    for field in state {
                        self.ty(&field.ty);
                        if let Some(init) = &field.init {
                            self.expr(init);
                        }
                    }
                    for method in methods {
                        self.function(method);
                    }
                }
            }
            IrStmtKind::Break | IrStmtKind::Continue | IrStmtKind::Verbatim { .. } => {}
        }
    }

    fn expr(&mut self, expr: &IrExpr) {
        if let Some(ty) = &expr.ty {
            self.ty(ty);
        }
        match &expr.kind {
            IrExprKind::Literal(_) | IrExprKind::Ident(_) => {}
            IrExprKind::Call { callee, args } => {
                self.expr(callee);
                self.exprs(args);
            }
            IrExprKind::MacroCall { name, args } => {
                match macros::from_str(name) {
                    Some(id) => {
                        self.found.macros.insert(id);
                    }
                    None => {
                        self.found.unknown_macros.insert(name.clone());
                    }
                }
                self.exprs(args);
            }
            IrExprKind::Member { object, path, .. } => {
                // `HashMap::new()` and friends name the collection only through the path
                if *path && let IrExprKind::Ident(owner) = &object.kind {
                    self.collection_name(owner);
                }
                self.expr(object);
            }
            IrExprKind::MethodCall { receiver, method, args } => {
                if method == "remove" && args.is_empty() {
                    self.found.removes_nodes = true;
                }
                self.expr(receiver);
                self.exprs(args);
            }
            IrExprKind::Index { object, index } => {
                self.expr(object);
                self.expr(index);
            }
            IrExprKind::Binary { left, right, .. } => {
                self.expr(left);
                self.expr(right);
            }
            IrExprKind::Unary { operand, .. } => self.expr(operand),
            IrExprKind::Assign { target, value } | IrExprKind::CompoundAssign { target, value, .. } => {
                self.expr(target);
                self.expr(value);
            }
            IrExprKind::Match { scrutinee, arms } => {
                self.expr(scrutinee);
                for arm in arms {
                    if let Some(guard) = &arm.guard {
                        self.expr(guard);
                    }
                    self.expr(&arm.body);
                }
            }
            IrExprKind::Matches { scrutinee, .. } => self.expr(scrutinee),
            IrExprKind::StructInit { name, fields } => {
                if node_kinds::from_str(name).is_some_and(|kind| builders::for_kind(kind).is_some()) {
                    self.found.constructs_nodes = true;
                }
                for field in fields {
                    self.expr(&field.value);
                }
            }
            IrExprKind::VecInit(items) => self.exprs(items),
            IrExprKind::Closure { body, .. } => self.expr(body),
            IrExprKind::Ref { expr, .. }
            | IrExprKind::Deref(expr)
            | IrExprKind::Try(expr)
            | IrExprKind::Paren(expr) => self.expr(expr),
            IrExprKind::Range { start, end, .. } => {
                if let Some(s) = start {
                    self.expr(s);
                }
                if let Some(e) = end {
                    self.expr(e);
                }
            }
            IrExprKind::Block(b) => self.block(b),
        }
    }

    fn exprs(&mut self, exprs: &[IrExpr]) {
        for e in exprs {
            self.expr(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrField, IrParam, IrPattern, IrPlugin, IrStruct};

    fn plugin(items: Vec<IrItem>) -> IrProgram {
        IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("P", items)))
    }

    fn nested_let(ty: IrType) -> IrBlock {
        // three blocks deep: fn body → if → block → let
        let inner = IrBlock::new(vec![IrStmt::new(IrStmtKind::Let {
            pattern: IrPattern::ident("seen"),
            mutable: true,
            ty: Some(ty),
            init: None,
        })]);
        IrBlock::new(vec![IrStmt::new(IrStmtKind::If {
            cond: IrExpr::bool(true),
            then_block: IrBlock::new(vec![IrStmt::new(IrStmtKind::Block(inner))]),
            else_block: None,
        })])
    }

    #[test]
    fn test_nested_let_type_triggers_marker() {
        let f = IrFunction::new("helper", vec![], nested_let(IrType::vec(IrType::hashset(IrType::str()))));
        let d = detect(&plugin(vec![IrItem::Function(f)]));
        assert!(d.uses_hashset);
        assert!(!d.uses_hashmap);
        let markers = d.markers(Backend::Swc);
        assert!(markers.contains(&SupportMarker::HashSetImport));
        assert!(!markers.contains(&SupportMarker::HashMapImport));
    }

    #[test]
    fn test_untyped_constructor_path_triggers_marker() {
        let body = IrBlock::new(vec![
            IrStmt::let_("m", IrExpr::call_expr(IrExpr::path("HashMap", "new"), vec![])),
            IrStmt::let_("s", IrExpr::call_expr(IrExpr::path("HashSet", "new"), vec![])),
        ]);
        let d = detect(&plugin(vec![IrItem::Function(IrFunction::new("f", vec![], body))]));
        assert!(d.uses_hashmap);
        assert!(d.uses_hashset);
        let markers = d.markers(Backend::Swc);
        assert!(markers.contains(&SupportMarker::HashMapImport));
        assert!(markers.contains(&SupportMarker::HashSetImport));
    }

    #[test]
    fn test_vec_constructor_path_needs_no_import() {
        let body = IrBlock::new(vec![IrStmt::let_("v", IrExpr::call_expr(IrExpr::path("Vec", "new"), vec![]))]);
        let d = detect(&plugin(vec![IrItem::Function(IrFunction::new("f", vec![], body))]));
        assert!(!d.uses_hashmap && !d.uses_hashset);
    }

    #[test]
    fn test_node_construction_and_removal_need_swc_imports() {
        let body = IrBlock::new(vec![
            IrStmt::let_("id", IrExpr::struct_init("Identifier", [("name", IrExpr::string("x"))])),
            IrStmt::expr(IrExpr::method_call(IrExpr::ident("node"), "remove", vec![])),
        ]);
        let d = detect(&plugin(vec![IrItem::Function(IrFunction::new("f", vec![], body))]));
        let markers = d.markers(Backend::Swc);
        assert!(markers.contains(&SupportMarker::SpanImport));
        assert!(markers.contains(&SupportMarker::TakeImport));
        assert!(!d.markers(Backend::Babel).contains(&SupportMarker::SpanImport));
    }

    #[test]
    fn test_user_struct_literal_needs_no_span_import() {
        let body = IrBlock::new(vec![IrStmt::let_("p", IrExpr::struct_init("Point", [("x", IrExpr::int(1))]))]);
        let d = detect(&plugin(vec![IrItem::Function(IrFunction::new("f", vec![], body))]));
        assert!(!d.constructs_nodes);
        assert!(!d.removes_nodes);
    }

    #[test]
    fn test_no_usage_no_marker() {
        let s = IrStruct::new("State", vec![IrField::new("count", IrType::int())]);
        let f = IrFunction::new("f", vec![IrParam::new("n", IrType::int())], IrBlock::default());
        let d = detect(&plugin(vec![IrItem::Struct(s), IrItem::Function(f)]));
        let markers = d.markers(Backend::Swc);
        assert_eq!(markers.into_iter().collect::<Vec<_>>(), vec![SupportMarker::VisitMutImport]);
        assert!(d.markers(Backend::Babel).is_empty());
    }

    #[test]
    fn test_macro_calls_map_to_babel_shims() {
        let body = IrBlock::new(vec![IrStmt::expr(IrExpr::macro_call(
            "format",
            vec![IrExpr::string("x={}"), IrExpr::ident("x")],
        ))]);
        let d = detect(&plugin(vec![IrItem::Function(IrFunction::new("f", vec![], body))]));
        let markers = d.markers(Backend::Babel);
        assert!(markers.contains(&SupportMarker::Shim(MacroId::Format)));
        assert_eq!(SupportMarker::Shim(MacroId::Format).to_string(), "FormatShim");
        assert!(!d.markers(Backend::Swc).iter().any(|m| matches!(m, SupportMarker::Shim(_))));
    }
}
