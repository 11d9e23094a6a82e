//! Symbol tables consulted during emission
//!
//! - [`UserTypes`]: the structs and enums declared by the program (struct-init ordering,
//!   `instanceof` checks, enum tags).
//! - [`Locals`]: a scope stack of local names and their types, used to map node fields and to
//!   type the captures of inline visitors.

use std::collections::HashMap;

use dualgen_core::lang::node_kinds::{self, NodeKindId};

use crate::ir::{IrEnum, IrExpr, IrExprKind, IrItem, IrProgram, IrStruct, IrTopLevel, IrType};

/// User-declared aggregate types, by name.
#[derive(Debug, Default)]
pub struct UserTypes<'a> {
    structs: HashMap<&'a str, &'a IrStruct>,
    enums: HashMap<&'a str, &'a IrEnum>,
}

impl<'a> UserTypes<'a> {
    pub fn collect(items: &'a [IrItem]) -> Self {
        let mut types = UserTypes::default();
        for item in items {
            match item {
                IrItem::Struct(s) => {
                    types.structs.insert(s.name.as_str(), s);
                }
                IrItem::Enum(e) => {
                    types.enums.insert(e.name.as_str(), e);
                }
                IrItem::Function(_) | IrItem::Impl(_) | IrItem::PreHook(_) | IrItem::ExitHook(_) => {}
            }
        }
        types
    }

    pub fn struct_named(&self, name: &str) -> Option<&'a IrStruct> {
        self.structs.get(name).copied()
    }

    pub fn enum_named(&self, name: &str) -> Option<&'a IrEnum> {
        self.enums.get(name).copied()
    }

    pub fn is_struct(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }
}

/// Stack of lexical scopes mapping local names to their (known) types.
///
/// Field types of aggregates (user structs, the plugin itself, inline visitors) are kept beside
/// the scopes so that `self.seen` or `state.items` resolve to the declared field type.
#[derive(Debug, Default)]
pub struct Locals {
    scopes: Vec<HashMap<String, Option<IrType>>>,
    fields: HashMap<String, HashMap<String, IrType>>,
}

impl Locals {
    /// Scopes for `program`, with the fields of every declared struct registered.
    pub fn for_program(program: &IrProgram) -> Self {
        let mut locals = Locals::default();
        for item in program.items() {
            if let IrItem::Struct(s) = item {
                locals.declare_fields(&s.name, s.fields.iter().map(|f| (f.name.clone(), f.ty.clone())));
            }
        }
        if let IrTopLevel::Plugin(plugin) | IrTopLevel::Writer(plugin) = &program.decl
            && let Some(state) = plugin.state()
        {
            locals.declare_fields(&plugin.name, [("state".to_string(), IrType::named(state.name.clone()))]);
        }
        locals
    }

    /// An empty scope stack sharing this one's field types.
    pub fn detached(&self) -> Self {
        Locals {
            scopes: Vec::new(),
            fields: self.fields.clone(),
        }
    }

    /// Register (or extend) the field types of the aggregate `owner`.
    pub fn declare_fields(&mut self, owner: &str, fields: impl IntoIterator<Item = (String, IrType)>) {
        self.fields.entry(owner.to_string()).or_default().extend(fields);
    }

    /// Enter a new variable scope (function body, block)
    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Exit the current scope
    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Declare a local in the current scope
    pub fn declare(&mut self, name: &str, ty: Option<IrType>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), ty);
        }
    }

    /// Type of a local, searching inner scopes first.
    pub fn type_of(&self, name: &str) -> Option<&IrType> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .and_then(|ty| ty.as_ref())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    /// [`Locals::expr_type`], plus the type a struct literal builds.
    pub fn inferred_type(&self, expr: &IrExpr) -> Option<IrType> {
        match &expr.kind {
            IrExprKind::StructInit { name, .. } if expr.ty.is_none() => Some(IrType::named(name.clone())),
            _ => self.expr_type(expr).cloned(),
        }
    }

    /// Node kind of `expr`: the kind a node literal constructs, or the node type of its static type.
    pub fn node_kind_of(&self, expr: &IrExpr) -> Option<NodeKindId> {
        match &expr.kind {
            IrExprKind::StructInit { name, .. } => node_kinds::from_str(name),
            _ => self.expr_type(expr).and_then(|t| t.peeled().node_kind()),
        }
    }

    /// Best-known type of an expression: its annotation, or the declared type of a local.
    pub fn expr_type<'e>(&'e self, expr: &'e IrExpr) -> Option<&'e IrType> {
        if let Some(ty) = &expr.ty {
            return Some(ty);
        }
        match &expr.kind {
            IrExprKind::Ident(name) => self.type_of(name),
            IrExprKind::Paren(inner) | IrExprKind::Ref { expr: inner, .. } | IrExprKind::Deref(inner) => {
                self.expr_type(inner)
            }
            IrExprKind::Member {
                object,
                property,
                path: false,
            } => match self.expr_type(object)?.peeled() {
                IrType::Named(owner) => self.fields.get(owner)?.get(property),
                _ => None,
            },
            _ => None,
        }
    }
}
