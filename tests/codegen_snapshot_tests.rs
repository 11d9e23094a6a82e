//! Snapshot tests for codegen
//!
//! Small programs whose complete output is pinned with insta inline snapshots, so layout changes
//! in either backend show up in review.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use dualgen::backend::{Backend, DualCodegen, render_expr, render_pattern};
use dualgen::config::{CodegenConfig, ModuleStyle};
use dualgen::ir::{
    BinaryOp, CompoundOp, IrBlock, IrExpr, IrFunction, IrItem, IrLiteral, IrMatchArm, IrParam, IrPattern, IrPlugin,
    IrProgram, IrStateField, IrStmt, IrStmtKind, IrTopLevel, IrTraverse, IrType, TraverseVisitor,
};

fn empty_plugin() -> IrProgram {
    IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("Empty", vec![])))
}

fn generate_with(program: &IrProgram, config: CodegenConfig) -> (String, String) {
    let output = DualCodegen::new(config).generate(program);
    let js = output.babel.expect("babel output").code;
    let rs = output.swc.expect("swc output").code;
    (js, rs)
}

// ============================================================================
// Whole files
// ============================================================================

#[test]
fn test_empty_plugin_babel() {
    let (js, _) = generate_with(&empty_plugin(), CodegenConfig::default());
    insta::assert_snapshot!(js, @r#"
    // Generated by dualgen from `Empty`. Do not edit.

    function Empty({ types: t }) {
      const self = {
      };

      return {
        name: "Empty",
        visitor: {
        },
      };
    }

    module.exports = Empty;
    "#);
}

#[test]
fn test_empty_plugin_babel_esm_export() {
    let (js, _) = generate_with(&empty_plugin(), CodegenConfig::default().with_module_style(ModuleStyle::Esm));
    assert!(js.trim_end().ends_with("export default Empty;"), "{}", js);
    assert!(!js.contains("module.exports"));
}

#[test]
fn test_empty_plugin_swc() {
    let (_, rs) = generate_with(&empty_plugin(), CodegenConfig::default());
    insta::assert_snapshot!(rs, @r#"
    // Generated by dualgen from `Empty`. Do not edit.

    use swc_core::ecma::ast::*;
    use swc_core::ecma::visit::{VisitMut, VisitMutWith};

    pub struct Empty;

    impl Empty {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for Empty {
        fn default() -> Self {
            Self::new()
        }
    }

    impl VisitMut for Empty {
    }
    "#);
}

#[test]
fn test_header_can_be_disabled() {
    let (js, rs) = generate_with(&empty_plugin(), CodegenConfig::default().with_header(false));
    assert!(js.starts_with("function Empty({ types: t }) {"), "{}", js);
    assert!(!rs.contains("Generated by dualgen"));
}

#[test]
fn test_inline_traverse_hoists_visitor_struct() {
    let count_idents = IrFunction::new(
        "visit_identifier",
        vec![IrParam::new("node", IrType::named("Identifier"))],
        IrBlock::new(vec![IrStmt::expr(IrExpr::compound_assign(
            CompoundOp::Add,
            IrExpr::member(IrExpr::ident("self"), "count"),
            IrExpr::int(1),
        ))]),
    );
    let traverse = IrStmt::new(IrStmtKind::Traverse(IrTraverse {
        target: IrExpr::ident("node"),
        visitor: TraverseVisitor::Inline {
            state: vec![IrStateField {
                name: "count".to_string(),
                ty: IrType::int(),
                init: Some(IrExpr::int(0)),
            }],
            methods: vec![count_idents],
        },
        captures: Vec::new(),
    }));
    let hook = IrFunction::new(
        "visit_call_expression",
        vec![IrParam::new("node", IrType::named("CallExpression"))],
        IrBlock::new(vec![traverse]),
    );
    let program = IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("P", vec![IrItem::Function(hook)])));

    let (_, rs) = generate_with(&program, CodegenConfig::default());
    let start = rs.find("impl VisitMut for P {").expect("plugin visitor impl");
    insta::assert_snapshot!(&rs[start..], @r#"
    impl VisitMut for P {
        fn visit_mut_call_expr(&mut self, node: &mut CallExpr) {
            let mut __visitor0 = __InlineVisitor0 { count: 0 };
            node.visit_mut_with(&mut __visitor0);
            node.visit_mut_children_with(self);
        }
    }

    struct __InlineVisitor0 {
        count: i64,
    }

    impl VisitMut for __InlineVisitor0 {
        fn visit_mut_ident(&mut self, node: &mut Ident) {
            self.count += 1;
            node.visit_mut_children_with(self);
        }
    }
    "#);
}

// ============================================================================
// Expressions and patterns
// ============================================================================

#[test]
fn test_macro_call_forms() {
    let call = IrExpr::macro_call("format", vec![IrExpr::string("{}"), IrExpr::ident("n")]);
    insta::assert_snapshot!(render_expr(Backend::Swc, &call).unwrap(), @r#"format!("{}", n)"#);
    insta::assert_snapshot!(render_expr(Backend::Babel, &call).unwrap(), @r#"format("{}", n)"#);
}

#[test]
fn test_vec_macro_owns_strings() {
    let call = IrExpr::macro_call("vec", vec![IrExpr::string("x")]);
    insta::assert_snapshot!(render_expr(Backend::Swc, &call).unwrap(), @r#"vec!["x".to_string()]"#);
}

#[test]
fn test_call_expression_array_pattern() {
    let pattern = IrPattern::array_of("CallExpression", vec![IrPattern::ident("first"), IrPattern::ident("second")]);

    let swc = render_pattern(Backend::Swc, &pattern, "node", Some(&IrType::named("CallExpression"))).unwrap();
    insta::assert_snapshot!(swc.head, @"CallExpr { args: __elems0, .. }");
    insta::assert_snapshot!(swc.guards.join(" && "), @"__elems0.len() == 2");

    let babel = render_pattern(Backend::Babel, &pattern, "node", None).unwrap();
    insta::assert_snapshot!(babel.head, @"t.isCallExpression(node) && node.arguments.length === 2");
}

#[test]
fn test_swc_match_expression() {
    let subject = IrExpr::match_(
        IrExpr::ident("x"),
        vec![
            IrMatchArm::new(IrPattern::Literal(IrLiteral::Int(0)), IrExpr::int(1)),
            IrMatchArm::new(IrPattern::ident("n"), IrExpr::int(100))
                .with_guard(IrExpr::binary(BinaryOp::Gt, IrExpr::ident("n"), IrExpr::int(100))),
            IrMatchArm::new(IrPattern::Wildcard, IrExpr::int(0)),
        ],
    );
    insta::assert_snapshot!(render_expr(Backend::Swc, &subject).unwrap(), @r#"
    match x {
        0 => 1,
        n if n > 100 => 100,
        _ => 0,
    }
    "#);
}
