//! AST node-kind vocabulary and the visitor binding tables.
//!
//! Each [`NodeKindId`] has exactly one [`NodeKindInfo`] entry carrying:
//! - the DSL spelling (which is also the Babel node type, e.g. `CallExpression`),
//! - the DSL visitor method bound to it (`visit_call_expression`),
//! - the SWC struct name (`CallExpr`) and the enum path that wraps it (`Expr::Call`),
//! - the SWC visitor hook stem (`call_expr` → `visit_mut_call_expr` / `visit_call_expr`),
//! - the field used for array destructuring and the per-backend field names.
//!
//! ## Notes
//! - Both tables the generator needs (visitor name → node kind, node kind → backend hook) are
//!   derived from this one registry, so they cannot drift apart.
//! - Alias kinds (`Expression`, `Statement`, ...) name a whole family of nodes. Babel accepts them
//!   as visitor keys; on SWC they are the enums (`Expr`, `Stmt`, ...).
//!
//! ## Examples
//! ```rust
//! use dualgen_core::lang::node_kinds::{self, NodeKindId};
//!
//! assert_eq!(node_kinds::from_str("CallExpression"), Some(NodeKindId::CallExpression));
//! let info = node_kinds::info_for(NodeKindId::CallExpression);
//! assert_eq!(info.swc_visit_mut_method(), "visit_mut_call_expr");
//! assert_eq!(info.babel_checker(), "isCallExpression");
//! ```

/// Stable identifier for every AST node kind the DSL can bind or destructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKindId {
    // Aliases (node families)
    Expression,
    Statement,
    Declaration,
    Pattern,
    Literal,

    // Program / modules
    Program,
    ImportDeclaration,

    // Declarations & statements
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ExpressionStatement,
    BlockStatement,
    ReturnStatement,
    IfStatement,
    ForStatement,
    WhileStatement,

    // Expressions
    Identifier,
    CallExpression,
    MemberExpression,
    BinaryExpression,
    UnaryExpression,
    AssignmentExpression,
    ConditionalExpression,
    ArrayExpression,
    ObjectExpression,
    ArrowFunctionExpression,
    TemplateLiteral,
    JSXElement,

    // Literals
    StringLiteral,
    NumericLiteral,
    BooleanLiteral,

    // Patterns
    ArrayPattern,
    ObjectPattern,
}

/// Whether an entry names one concrete node or a family of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Alias,
    Concrete,
}

/// One named field of a node, spelled per backend.
///
/// `swc` is `None` when SWC has no direct equivalent; a dotted value (`function.params`) is a
/// nested access path that cannot appear inside a Rust struct pattern.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    pub name: &'static str,
    pub babel: &'static str,
    pub swc: Option<&'static str>,
}

impl FieldInfo {
    /// True when the SWC access path goes through an intermediate struct.
    pub fn swc_is_nested(&self) -> bool {
        self.swc.is_some_and(|s| s.contains('.'))
    }
}

/// Metadata for a node kind.
#[derive(Debug, Clone, Copy)]
pub struct NodeKindInfo {
    pub id: NodeKindId,
    /// DSL spelling; identical to the Babel node type.
    pub name: &'static str,
    /// DSL visitor method bound to this kind.
    pub visitor_method: &'static str,
    pub class: NodeClass,
    /// SWC struct (or enum, for aliases) name.
    pub swc_type: &'static str,
    /// SWC enum variants wrapping the struct, outermost first (e.g. `["Expr::Lit", "Lit::Str"]`).
    pub swc_path: &'static [&'static str],
    /// Stem of the SWC visitor hook (`call_expr` → `visit_mut_call_expr`).
    pub swc_hook: &'static str,
    /// Field holding the list destructured by array patterns.
    pub elements: Option<&'static str>,
    pub fields: &'static [FieldInfo],
}

impl NodeKindInfo {
    /// Babel type checker (`t.isCallExpression`), without the `t.` prefix.
    pub fn babel_checker(&self) -> String {
        format!("is{}", self.name)
    }

    /// SWC `VisitMut` hook name.
    pub fn swc_visit_mut_method(&self) -> String {
        format!("visit_mut_{}", self.swc_hook)
    }

    /// SWC `Visit` hook name (read-only writers).
    pub fn swc_visit_method(&self) -> String {
        format!("visit_{}", self.swc_hook)
    }

    /// Look up a field by its DSL name.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The element field metadata used by array destructuring.
    pub fn element_field(&self) -> Option<&'static FieldInfo> {
        self.elements.and_then(|name| self.field(name))
    }

    /// The SWC enum path needed to reach this node from a scrutinee of SWC type `from`.
    ///
    /// When `from` is the node's own struct the path is empty; when `from` is one of the wrapping
    /// enums only the inner part of the path is kept; otherwise the full path is returned.
    pub fn swc_path_from(&self, from: Option<&str>) -> &'static [&'static str] {
        let Some(from) = from else {
            return self.swc_path;
        };
        if from == self.swc_type {
            return &[];
        }
        for (idx, segment) in self.swc_path.iter().enumerate() {
            if segment.split("::").next() == Some(from) {
                return &self.swc_path[idx..];
            }
        }
        self.swc_path
    }
}

const fn f(name: &'static str, babel: &'static str, swc: &'static str) -> FieldInfo {
    FieldInfo {
        name,
        babel,
        swc: Some(swc),
    }
}

/// Registry of all node kinds.
pub const NODE_KINDS: &[NodeKindInfo] = &[
    // --- aliases -------------------------------------------------------------
    alias(NodeKindId::Expression, "Expression", "visit_expression", "Expr", "expr"),
    alias(NodeKindId::Statement, "Statement", "visit_statement", "Stmt", "stmt"),
    alias(NodeKindId::Declaration, "Declaration", "visit_declaration", "Decl", "decl"),
    alias(NodeKindId::Pattern, "Pattern", "visit_pattern", "Pat", "pat"),
    alias(NodeKindId::Literal, "Literal", "visit_literal", "Lit", "lit"),
    // --- program / modules ---------------------------------------------------
    node(
        NodeKindId::Program,
        "Program",
        "visit_program",
        "Program",
        &[],
        "program",
        None,
        &[],
    ),
    node(
        NodeKindId::ImportDeclaration,
        "ImportDeclaration",
        "visit_import_declaration",
        "ImportDecl",
        &["ModuleItem::ModuleDecl", "ModuleDecl::Import"],
        "import_decl",
        Some("specifiers"),
        &[f("source", "source", "src"), f("specifiers", "specifiers", "specifiers")],
    ),
    // --- declarations & statements -------------------------------------------
    node(
        NodeKindId::FunctionDeclaration,
        "FunctionDeclaration",
        "visit_function_declaration",
        "FnDecl",
        &["Stmt::Decl", "Decl::Fn"],
        "fn_decl",
        Some("params"),
        &[
            f("id", "id", "ident"),
            f("params", "params", "function.params"),
            f("body", "body", "function.body"),
        ],
    ),
    node(
        NodeKindId::VariableDeclaration,
        "VariableDeclaration",
        "visit_variable_declaration",
        "VarDecl",
        &["Stmt::Decl", "Decl::Var"],
        "var_decl",
        Some("declarations"),
        &[f("kind", "kind", "kind"), f("declarations", "declarations", "decls")],
    ),
    node(
        NodeKindId::VariableDeclarator,
        "VariableDeclarator",
        "visit_variable_declarator",
        "VarDeclarator",
        &[],
        "var_declarator",
        None,
        &[f("id", "id", "name"), f("init", "init", "init")],
    ),
    node(
        NodeKindId::ExpressionStatement,
        "ExpressionStatement",
        "visit_expression_statement",
        "ExprStmt",
        &["Stmt::Expr"],
        "expr_stmt",
        None,
        &[f("expression", "expression", "expr")],
    ),
    node(
        NodeKindId::BlockStatement,
        "BlockStatement",
        "visit_block_statement",
        "BlockStmt",
        &["Stmt::Block"],
        "block_stmt",
        Some("body"),
        &[f("body", "body", "stmts")],
    ),
    node(
        NodeKindId::ReturnStatement,
        "ReturnStatement",
        "visit_return_statement",
        "ReturnStmt",
        &["Stmt::Return"],
        "return_stmt",
        None,
        &[f("argument", "argument", "arg")],
    ),
    node(
        NodeKindId::IfStatement,
        "IfStatement",
        "visit_if_statement",
        "IfStmt",
        &["Stmt::If"],
        "if_stmt",
        None,
        &[
            f("test", "test", "test"),
            f("consequent", "consequent", "cons"),
            f("alternate", "alternate", "alt"),
        ],
    ),
    node(
        NodeKindId::ForStatement,
        "ForStatement",
        "visit_for_statement",
        "ForStmt",
        &["Stmt::For"],
        "for_stmt",
        None,
        &[
            f("init", "init", "init"),
            f("test", "test", "test"),
            f("update", "update", "update"),
            f("body", "body", "body"),
        ],
    ),
    node(
        NodeKindId::WhileStatement,
        "WhileStatement",
        "visit_while_statement",
        "WhileStmt",
        &["Stmt::While"],
        "while_stmt",
        None,
        &[f("test", "test", "test"), f("body", "body", "body")],
    ),
    // --- expressions ---------------------------------------------------------
    node(
        NodeKindId::Identifier,
        "Identifier",
        "visit_identifier",
        "Ident",
        &["Expr::Ident"],
        "ident",
        None,
        &[f("name", "name", "sym")],
    ),
    node(
        NodeKindId::CallExpression,
        "CallExpression",
        "visit_call_expression",
        "CallExpr",
        &["Expr::Call"],
        "call_expr",
        Some("arguments"),
        &[f("callee", "callee", "callee"), f("arguments", "arguments", "args")],
    ),
    node(
        NodeKindId::MemberExpression,
        "MemberExpression",
        "visit_member_expression",
        "MemberExpr",
        &["Expr::Member"],
        "member_expr",
        None,
        &[f("object", "object", "obj"), f("property", "property", "prop")],
    ),
    node(
        NodeKindId::BinaryExpression,
        "BinaryExpression",
        "visit_binary_expression",
        "BinExpr",
        &["Expr::Bin"],
        "bin_expr",
        None,
        &[
            f("left", "left", "left"),
            f("right", "right", "right"),
            f("operator", "operator", "op"),
        ],
    ),
    node(
        NodeKindId::UnaryExpression,
        "UnaryExpression",
        "visit_unary_expression",
        "UnaryExpr",
        &["Expr::Unary"],
        "unary_expr",
        None,
        &[f("operator", "operator", "op"), f("argument", "argument", "arg")],
    ),
    node(
        NodeKindId::AssignmentExpression,
        "AssignmentExpression",
        "visit_assignment_expression",
        "AssignExpr",
        &["Expr::Assign"],
        "assign_expr",
        None,
        &[
            f("left", "left", "left"),
            f("right", "right", "right"),
            f("operator", "operator", "op"),
        ],
    ),
    node(
        NodeKindId::ConditionalExpression,
        "ConditionalExpression",
        "visit_conditional_expression",
        "CondExpr",
        &["Expr::Cond"],
        "cond_expr",
        None,
        &[
            f("test", "test", "test"),
            f("consequent", "consequent", "cons"),
            f("alternate", "alternate", "alt"),
        ],
    ),
    node(
        NodeKindId::ArrayExpression,
        "ArrayExpression",
        "visit_array_expression",
        "ArrayLit",
        &["Expr::Array"],
        "array_lit",
        Some("elements"),
        &[f("elements", "elements", "elems")],
    ),
    node(
        NodeKindId::ObjectExpression,
        "ObjectExpression",
        "visit_object_expression",
        "ObjectLit",
        &["Expr::Object"],
        "object_lit",
        Some("properties"),
        &[f("properties", "properties", "props")],
    ),
    node(
        NodeKindId::ArrowFunctionExpression,
        "ArrowFunctionExpression",
        "visit_arrow_function_expression",
        "ArrowExpr",
        &["Expr::Arrow"],
        "arrow_expr",
        Some("params"),
        &[f("params", "params", "params"), f("body", "body", "body")],
    ),
    node(
        NodeKindId::TemplateLiteral,
        "TemplateLiteral",
        "visit_template_literal",
        "Tpl",
        &["Expr::Tpl"],
        "tpl",
        Some("expressions"),
        &[f("quasis", "quasis", "quasis"), f("expressions", "expressions", "exprs")],
    ),
    node(
        NodeKindId::JSXElement,
        "JSXElement",
        "visit_jsx_element",
        "JSXElement",
        &["Expr::JSXElement"],
        "jsx_element",
        Some("children"),
        &[
            f("openingElement", "openingElement", "opening"),
            f("children", "children", "children"),
        ],
    ),
    // --- literals ------------------------------------------------------------
    node(
        NodeKindId::StringLiteral,
        "StringLiteral",
        "visit_string_literal",
        "Str",
        &["Expr::Lit", "Lit::Str"],
        "str",
        None,
        &[f("value", "value", "value")],
    ),
    node(
        NodeKindId::NumericLiteral,
        "NumericLiteral",
        "visit_numeric_literal",
        "Number",
        &["Expr::Lit", "Lit::Num"],
        "number",
        None,
        &[f("value", "value", "value")],
    ),
    node(
        NodeKindId::BooleanLiteral,
        "BooleanLiteral",
        "visit_boolean_literal",
        "Bool",
        &["Expr::Lit", "Lit::Bool"],
        "bool",
        None,
        &[f("value", "value", "value")],
    ),
    // --- patterns ------------------------------------------------------------
    node(
        NodeKindId::ArrayPattern,
        "ArrayPattern",
        "visit_array_pattern",
        "ArrayPat",
        &["Pat::Array"],
        "array_pat",
        Some("elements"),
        &[f("elements", "elements", "elems")],
    ),
    node(
        NodeKindId::ObjectPattern,
        "ObjectPattern",
        "visit_object_pattern",
        "ObjectPat",
        &["Pat::Object"],
        "object_pat",
        Some("properties"),
        &[f("properties", "properties", "props")],
    ),
];

/// Return the metadata entry for a node kind.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: NodeKindId) -> &'static NodeKindInfo {
    NODE_KINDS.iter().find(|n| n.id == id).expect("node kind info missing")
}

/// Resolve a DSL/Babel node type name (`"CallExpression"`).
pub fn from_str(name: &str) -> Option<NodeKindId> {
    NODE_KINDS.iter().find(|n| n.name == name).map(|n| n.id)
}

/// Resolve a DSL visitor method name (`"visit_call_expression"`).
///
/// This is the declared DSL name → node kind table. Names that follow the `visit_` convention
/// but are not listed here resolve to `None`; callers report them as missing bindings.
pub fn from_visitor_method(method: &str) -> Option<NodeKindId> {
    NODE_KINDS.iter().find(|n| n.visitor_method == method).map(|n| n.id)
}

/// Resolve an SWC type name (`"CallExpr"`, `"Expr"`) back to its node kind.
pub fn from_swc_type(name: &str) -> Option<NodeKindId> {
    NODE_KINDS.iter().find(|n| n.swc_type == name).map(|n| n.id)
}

/// True when `method` follows the DSL visitor naming convention.
pub fn is_visitor_name(method: &str) -> bool {
    method.len() > "visit_".len() && method.starts_with("visit_")
}

// --- helpers -----------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
const fn node(
    id: NodeKindId,
    name: &'static str,
    visitor_method: &'static str,
    swc_type: &'static str,
    swc_path: &'static [&'static str],
    swc_hook: &'static str,
    elements: Option<&'static str>,
    fields: &'static [FieldInfo],
) -> NodeKindInfo {
    NodeKindInfo {
        id,
        name,
        visitor_method,
        class: NodeClass::Concrete,
        swc_type,
        swc_path,
        swc_hook,
        elements,
        fields,
    }
}

const fn alias(
    id: NodeKindId,
    name: &'static str,
    visitor_method: &'static str,
    swc_type: &'static str,
    swc_hook: &'static str,
) -> NodeKindInfo {
    NodeKindInfo {
        id,
        name,
        visitor_method,
        class: NodeClass::Alias,
        swc_type,
        swc_path: &[],
        swc_hook,
        elements: None,
        fields: &[],
    }
}
