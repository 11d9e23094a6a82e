//! Property-based tests for dualgen
//!
//! These tests use proptest to generate IR programs and check properties that must hold for any
//! input: balanced output, idempotence, identical visitor bindings in both backends, and sound
//! usage detection. Balance and idempotence also run over bodies using matches, `if let`, loops,
//! closures, struct and node literals and nested traversals.

use std::collections::BTreeSet;

use dualgen::backend::{Backend, DualCodegen};
use dualgen::ir::{
    BinaryOp, IrBlock, IrExpr, IrExprKind, IrField, IrFunction, IrItem, IrLiteral, IrMatchArm, IrParam, IrPattern,
    IrPlugin, IrProgram, IrStateField, IrStmt, IrStmtKind, IrStruct, IrTopLevel, IrTraverse, IrType, TraverseVisitor,
    VisitorFlags,
};
use dualgen_core::lang::node_kinds::{self, NodeClass, NodeKindId};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn all_kinds() -> Vec<NodeKindId> {
    node_kinds::NODE_KINDS.iter().map(|info| info.id).collect()
}

fn concrete_kinds() -> Vec<NodeKindId> {
    node_kinds::NODE_KINDS
        .iter()
        .filter(|info| info.class == NodeClass::Concrete)
        .map(|info| info.id)
        .collect()
}

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}".prop_map(|s| format!("v_{}", s))
}

/// Integer-valued expressions built from operators both backends spell.
fn arb_int_expr() -> impl Strategy<Value = IrExpr> {
    let leaf = (-1000i64..1000).prop_map(IrExpr::int);
    leaf.prop_recursive(3, 12, 2, |inner| {
        (
            prop::sample::select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul]),
            inner.clone(),
            inner,
        )
            .prop_map(|(op, l, r)| IrExpr::binary(op, l, r))
    })
}

fn arb_stmt() -> impl Strategy<Value = IrStmt> {
    prop_oneof![
        (arb_ident(), arb_int_expr()).prop_map(|(name, e)| IrStmt::let_(name, e)),
        (arb_ident(), "[a-zA-Z ]{0,12}").prop_map(|(name, s)| IrStmt::let_(name, IrExpr::string(s))),
        (any::<bool>(), arb_ident(), arb_int_expr()).prop_map(|(cond, name, e)| {
            IrStmt::new(IrStmtKind::If {
                cond: IrExpr::bool(cond),
                then_block: IrBlock::new(vec![IrStmt::let_(name, e)]),
                else_block: None,
            })
        }),
    ]
}

/// Arm patterns over an integer scrutinee, always closed by a wildcard.
fn arb_int_pattern() -> impl Strategy<Value = IrPattern> {
    let literal = (-20i64..20).prop_map(|v| IrPattern::Literal(IrLiteral::Int(v)));
    prop_oneof![
        literal.clone(),
        prop::collection::vec(literal, 2..4).prop_map(IrPattern::Or),
        arb_ident().prop_map(IrPattern::Ident),
    ]
}

fn arb_match() -> impl Strategy<Value = IrExpr> {
    (
        arb_int_expr(),
        prop::collection::vec((arb_int_pattern(), arb_int_expr()), 1..4),
        arb_int_expr(),
    )
        .prop_map(|(scrutinee, arms, fallback)| {
            let mut arms: Vec<IrMatchArm> = arms.into_iter().map(|(p, body)| IrMatchArm::new(p, body)).collect();
            arms.push(IrMatchArm::new(IrPattern::Wildcard, fallback));
            IrExpr::match_(scrutinee, arms)
        })
}

/// `{ let maybe: Option<i64> = ..; if let Some(n) = maybe { .. } else { .. } }`
fn arb_if_let() -> impl Strategy<Value = IrStmt> {
    (arb_ident(), arb_int_expr(), any::<bool>()).prop_map(|(name, e, with_else)| {
        let maybe = IrStmt::new(IrStmtKind::Let {
            pattern: IrPattern::ident("maybe"),
            mutable: false,
            ty: Some(IrType::optional(IrType::int())),
            init: Some(IrExpr::new(IrExprKind::Literal(IrLiteral::Null))),
        });
        let if_let = IrStmt::new(IrStmtKind::IfLet {
            pattern: IrPattern::variant("Some", vec![IrPattern::ident(name.clone())]),
            scrutinee: IrExpr::ident("maybe"),
            then_block: IrBlock::new(vec![IrStmt::let_("copy", IrExpr::ident(name))]),
            else_block: with_else.then(|| IrBlock::new(vec![IrStmt::let_("fallback", e)])),
        });
        IrStmt::new(IrStmtKind::Block(IrBlock::new(vec![maybe, if_let])))
    })
}

fn arb_for() -> impl Strategy<Value = IrStmt> {
    (arb_ident(), prop::collection::vec(arb_int_expr(), 0..4)).prop_map(|(binding, items)| {
        IrStmt::new(IrStmtKind::For {
            binding: binding.clone(),
            iterable: IrExpr::new(IrExprKind::VecInit(items)),
            body: IrBlock::new(vec![IrStmt::let_("seen", IrExpr::ident(binding))]),
        })
    })
}

fn arb_closure() -> impl Strategy<Value = IrStmt> {
    (arb_ident(), arb_int_expr()).prop_map(|(name, e)| {
        let body = IrExpr::binary(BinaryOp::Add, IrExpr::ident("arg"), e);
        let closure = IrExpr::new(IrExprKind::Closure {
            params: vec!["arg".to_string()],
            body: Box::new(body),
        });
        IrStmt::let_(name, closure)
    })
}

/// A user struct literal or a node literal.
fn arb_struct_init() -> impl Strategy<Value = IrStmt> {
    (arb_ident(), arb_int_expr(), arb_int_expr(), "[a-z]{1,8}", 0usize..3).prop_map(|(name, x, y, text, which)| {
        let init = match which {
            0 => IrExpr::struct_init("Counter", [("x", x), ("y", y)]),
            1 => IrExpr::struct_init("Identifier", [("name", IrExpr::string(text))]),
            _ => IrExpr::struct_init(
                "CallExpression",
                [
                    ("callee", IrExpr::struct_init("Identifier", [("name", IrExpr::string(text))])),
                    (
                        "arguments",
                        IrExpr::new(IrExprKind::VecInit(vec![IrExpr::struct_init("NumericLiteral", [("value", x)])])),
                    ),
                ],
            ),
        };
        IrStmt::let_(name, init)
    })
}

/// `traverse node { .. }` with a counter and one hook.
fn arb_traverse() -> impl Strategy<Value = IrStmt> {
    (
        prop::sample::select(concrete_kinds()),
        arb_flags(),
        prop::collection::vec(arb_stmt(), 0..3),
    )
        .prop_map(|(kind, flags, body)| {
            IrStmt::new(IrStmtKind::Traverse(IrTraverse {
                target: IrExpr::ident("node"),
                visitor: TraverseVisitor::Inline {
                    state: vec![IrStateField {
                        name: "count".to_string(),
                        ty: IrType::int(),
                        init: Some(IrExpr::int(0)),
                    }],
                    methods: vec![visitor(kind, flags, body)],
                },
                captures: Vec::new(),
            }))
        })
}

/// Statements exercising every control-flow and literal form.
fn arb_rich_stmt() -> impl Strategy<Value = IrStmt> {
    prop_oneof![
        arb_stmt(),
        (arb_ident(), arb_match()).prop_map(|(name, m)| IrStmt::let_(name, m)),
        arb_if_let(),
        arb_for(),
        arb_closure(),
        arb_struct_init(),
        arb_traverse(),
    ]
}

fn arb_flags() -> impl Strategy<Value = VisitorFlags> {
    (any::<bool>(), any::<bool>()).prop_map(|(on_exit, skip_children)| VisitorFlags { on_exit, skip_children })
}

fn visitor(kind: NodeKindId, flags: VisitorFlags, body: Vec<IrStmt>) -> IrFunction {
    let info = node_kinds::info_for(kind);
    let mut f = IrFunction::new(
        info.visitor_method,
        vec![IrParam::new("node", IrType::named(info.name))],
        IrBlock::new(body),
    );
    f.visitor = flags;
    f
}

/// A plugin or writer with distinct visitor methods whose bodies come from `stmt`.
fn program_of<S>(stmt: S) -> impl Strategy<Value = (IrProgram, Vec<NodeKindId>)>
where
    S: Strategy<Value = IrStmt>,
{
    (
        any::<bool>(),
        prop::sample::subsequence(all_kinds(), 0..6),
        prop::collection::vec((arb_flags(), prop::collection::vec(stmt, 0..4)), 6),
    )
        .prop_map(|(writer, kinds, bodies)| {
            let counter = IrStruct::new(
                "Counter",
                vec![IrField::new("x", IrType::int()), IrField::new("y", IrType::int())],
            );
            let mut items = vec![IrItem::Struct(counter)];
            items.extend(
                kinds
                    .iter()
                    .zip(bodies)
                    .map(|(kind, (flags, body))| IrItem::Function(visitor(*kind, flags, body))),
            );
            let plugin = IrPlugin::new("Generated", items);
            let decl = if writer { IrTopLevel::Writer(plugin) } else { IrTopLevel::Plugin(plugin) };
            (IrProgram::new(decl), kinds)
        })
}

/// Simple bodies: the only visitor bindings are the top-level ones.
fn arb_program() -> impl Strategy<Value = (IrProgram, Vec<NodeKindId>)> {
    program_of(arb_stmt())
}

fn arb_rich_program() -> impl Strategy<Value = (IrProgram, Vec<NodeKindId>)> {
    program_of(arb_rich_stmt())
}

// =============================================================================
// Helpers
// =============================================================================

/// Bracket balance, ignoring string literals and line comments.
///
/// Single quotes delimit strings in JS only; in Rust they start lifetimes.
fn is_balanced(code: &str, single_quoted_strings: bool) -> bool {
    let mut stack = Vec::new();
    for line in code.lines() {
        let mut chars = line.chars().peekable();
        let mut quote: Option<char> = None;
        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                match c {
                    '\\' => {
                        chars.next();
                    }
                    _ if c == q => quote = None,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => quote = Some(c),
                '\'' if single_quoted_strings => quote = Some(c),
                '/' if chars.peek() == Some(&'/') => break,
                '(' | '[' | '{' => stack.push(c),
                ')' | ']' | '}' => {
                    let open = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if stack.pop() != Some(open) {
                        return false;
                    }
                }
                _ => {}
            }
        }
    }
    stack.is_empty()
}

/// Node kinds with a Babel visitor entry.
fn babel_bound(code: &str) -> BTreeSet<NodeKindId> {
    all_kinds()
        .into_iter()
        .filter(|id| {
            let name = node_kinds::info_for(*id).name;
            code.contains(&format!(" {}(path) {{", name)) || code.contains(&format!(" {}: {{", name))
        })
        .collect()
}

/// Node kinds with an SWC visitor hook.
fn swc_bound(code: &str, writer: bool) -> BTreeSet<NodeKindId> {
    all_kinds()
        .into_iter()
        .filter(|id| {
            let info = node_kinds::info_for(*id);
            let hook = if writer { info.swc_visit_method() } else { info.swc_visit_mut_method() };
            code.contains(&format!("fn {}(", hook))
        })
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: both outputs exist and every bracket is closed.
    #[test]
    fn outputs_are_balanced((program, _) in arb_rich_program()) {
        let output = DualCodegen::default().generate(&program);
        for backend in Backend::ALL {
            let file = output.get(backend).as_ref().expect("generation succeeds");
            let js = backend == Backend::Babel;
            prop_assert!(is_balanced(&file.code, js), "{} output unbalanced:\n{}", backend, file.code);
        }
    }

    /// Property: generating twice gives byte-identical files.
    #[test]
    fn generation_is_idempotent((program, _) in arb_rich_program()) {
        let codegen = DualCodegen::default();
        let first = codegen.generate(&program);
        let second = codegen.generate(&program);
        prop_assert_eq!(first.babel, second.babel);
        prop_assert_eq!(first.swc, second.swc);
    }

    /// Property: the set of visited node kinds is the same in both outputs.
    #[test]
    fn both_backends_bind_the_same_kinds((program, kinds) in arb_program()) {
        let writer = program.decl.is_writer();
        let output = DualCodegen::default().generate(&program);
        let js = &output.babel.as_ref().expect("babel output").code;
        let rs = &output.swc.as_ref().expect("swc output").code;

        let expected: BTreeSet<NodeKindId> = kinds.into_iter().collect();
        prop_assert_eq!(&babel_bound(js), &expected);
        prop_assert_eq!(&swc_bound(rs, writer), &expected);
    }

    /// Property: a collection type used at any nesting depth reaches the SWC header.
    #[test]
    fn nested_collection_use_is_detected(depth in 0usize..5, set in any::<bool>()) {
        let ty = if set {
            IrType::hashset(IrType::str())
        } else {
            IrType::hashmap(IrType::str(), IrType::int())
        };
        let mut block = IrBlock::new(vec![IrStmt::new(IrStmtKind::Let {
            pattern: IrPattern::ident("seen"),
            mutable: true,
            ty: Some(ty),
            init: None,
        })]);
        for _ in 0..depth {
            block = IrBlock::new(vec![IrStmt::new(IrStmtKind::If {
                cond: IrExpr::bool(true),
                then_block: block,
                else_block: None,
            })]);
        }
        let program = IrProgram::new(IrTopLevel::Plugin(IrPlugin::new(
            "Nested",
            vec![IrItem::Function(IrFunction::new(
                "visit_identifier",
                vec![IrParam::new("node", IrType::named("Identifier"))],
                block,
            ))],
        )));
        let output = DualCodegen::default().generate(&program);
        let rs = &output.swc.as_ref().expect("swc output").code;
        let import = if set { "use std::collections::HashSet;" } else { "use std::collections::HashMap;" };
        prop_assert!(rs.contains(import), "{}", rs);
    }
}

#[test]
fn balance_checker_ignores_strings_and_comments() {
    assert!(is_balanced("f(\"(\", '}') // {", true));
    assert!(is_balanced("fn f<'a>(x: &'a str) {}", false));
    assert!(!is_balanced("f(]", true));
    assert!(!is_balanced("{", false));
}
