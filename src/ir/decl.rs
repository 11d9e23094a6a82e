//! IR declarations: the top-level plugin/writer/module and its items

use super::stmt::IrBlock;
use super::{IrSpan, IrType};
use serde::{Deserialize, Serialize};

/// The single top-level declaration of a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrTopLevel {
    /// AST transformer (mutating visitor)
    Plugin(IrPlugin),
    /// Read-only visitor accumulating text output
    Writer(IrPlugin),
    /// Bag of helpers with no visitor shape
    Module(IrModule),
}

impl IrTopLevel {
    pub fn name(&self) -> &str {
        match self {
            IrTopLevel::Plugin(p) | IrTopLevel::Writer(p) => &p.name,
            IrTopLevel::Module(m) => &m.name,
        }
    }

    pub fn items(&self) -> &[IrItem] {
        match self {
            IrTopLevel::Plugin(p) | IrTopLevel::Writer(p) => &p.items,
            IrTopLevel::Module(m) => &m.items,
        }
    }

    pub fn span(&self) -> IrSpan {
        match self {
            IrTopLevel::Plugin(p) | IrTopLevel::Writer(p) => p.span,
            IrTopLevel::Module(m) => m.span,
        }
    }

    pub fn is_writer(&self) -> bool {
        matches!(self, IrTopLevel::Writer(_))
    }
}

/// Plugin or writer body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrPlugin {
    pub name: String,
    #[serde(default)]
    pub items: Vec<IrItem>,
    #[serde(default)]
    pub span: IrSpan,
}

impl IrPlugin {
    pub fn new(name: impl Into<String>, items: Vec<IrItem>) -> Self {
        Self {
            name: name.into(),
            items,
            span: IrSpan::default(),
        }
    }

    /// The `State` struct, if declared.
    pub fn state(&self) -> Option<&IrStruct> {
        self.items.iter().find_map(|item| match item {
            IrItem::Struct(s) if s.name == "State" => Some(s),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrModule {
    pub name: String,
    #[serde(default)]
    pub items: Vec<IrItem>,
    #[serde(default)]
    pub span: IrSpan,
}

/// Item inside a plugin, writer or module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrItem {
    Struct(IrStruct),
    Enum(IrEnum),
    Function(IrFunction),
    Impl(IrImpl),
    /// Runs once before traversal (`fn pre(&mut self)`)
    PreHook(IrFunction),
    /// Runs once after traversal (`fn exit(&mut self)`)
    ExitHook(IrFunction),
}

impl IrItem {
    pub fn name(&self) -> &str {
        match self {
            IrItem::Struct(s) => &s.name,
            IrItem::Enum(e) => &e.name,
            IrItem::Function(f) | IrItem::PreHook(f) | IrItem::ExitHook(f) => &f.name,
            IrItem::Impl(i) => &i.target,
        }
    }

    pub fn span(&self) -> IrSpan {
        match self {
            IrItem::Struct(s) => s.span,
            IrItem::Enum(e) => e.span,
            IrItem::Function(f) | IrItem::PreHook(f) | IrItem::ExitHook(f) => f.span,
            IrItem::Impl(i) => i.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrStruct {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<IrField>,
    /// Derive serialization support on the Rust side
    #[serde(default)]
    pub serializable: bool,
    #[serde(default)]
    pub span: IrSpan,
}

impl IrStruct {
    pub fn new(name: impl Into<String>, fields: Vec<IrField>) -> Self {
        Self {
            name: name.into(),
            fields,
            serializable: false,
            span: IrSpan::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrField {
    pub name: String,
    pub ty: IrType,
}

impl IrField {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self { name: name.into(), ty }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrEnum {
    pub name: String,
    pub variants: Vec<IrVariant>,
    #[serde(default)]
    pub span: IrSpan,
}

/// Enum variant with positional payload types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrVariant {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<IrType>,
}

/// Function, helper, visitor method or hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrFunction {
    pub name: String,
    #[serde(default)]
    pub receiver: Option<Receiver>,
    #[serde(default)]
    pub params: Vec<IrParam>,
    #[serde(default)]
    pub ret: Option<IrType>,
    #[serde(default)]
    pub body: IrBlock,
    #[serde(default)]
    pub is_pub: bool,
    #[serde(default)]
    pub visitor: VisitorFlags,
    #[serde(default)]
    pub span: IrSpan,
}

impl IrFunction {
    pub fn new(name: impl Into<String>, params: Vec<IrParam>, body: IrBlock) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            params,
            ret: None,
            body,
            is_pub: false,
            visitor: VisitorFlags::default(),
            span: IrSpan::default(),
        }
    }

    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_ret(mut self, ret: IrType) -> Self {
        self.ret = Some(ret);
        self
    }

    pub fn with_span(mut self, span: IrSpan) -> Self {
        self.span = span;
        self
    }

    /// First non-receiver parameter (the visited node of a visitor method).
    pub fn node_param(&self) -> Option<&IrParam> {
        self.params.first()
    }
}

/// `self` receiver of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self`
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrParam {
    pub name: String,
    pub ty: IrType,
}

impl IrParam {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// Per-method visitor behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorFlags {
    /// Run after the children were visited
    #[serde(default)]
    pub on_exit: bool,
    /// Do not descend into the node's children
    #[serde(default)]
    pub skip_children: bool,
}

/// `impl Target { methods }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrImpl {
    pub target: String,
    pub methods: Vec<IrFunction>,
    #[serde(default)]
    pub span: IrSpan,
}
