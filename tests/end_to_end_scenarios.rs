//! End-to-end scenarios: one IR program in, both plugin files out
//!
//! Each scenario builds a small IR, runs both backends through the public API and checks the
//! backend-specific spelling of the same construct.

use dualgen::backend::{Backend, CodegenError, DualCodegen, OutputWriter, render_expr, render_pattern};
use dualgen::ir::{
    BinaryOp, IrBlock, IrExpr, IrFunction, IrItem, IrParam, IrPattern, IrPlugin, IrProgram, IrStmt, IrTopLevel,
    IrType, IrUse,
};

fn plugin(items: Vec<IrItem>) -> IrProgram {
    IrProgram::new(IrTopLevel::Plugin(IrPlugin::new("Scenario", items)))
}

fn visit_call(body: Vec<IrStmt>) -> IrItem {
    IrItem::Function(IrFunction::new(
        "visit_call_expression",
        vec![IrParam::new("node", IrType::named("CallExpression"))],
        IrBlock::new(body),
    ))
}

// ============================================================================
// 1. Integer literal
// ============================================================================

#[test]
fn scenario_integer_literal_is_verbatim() {
    for backend in Backend::ALL {
        assert_eq!(render_expr(backend, &IrExpr::int(42)).unwrap(), "42", "{}", backend);
    }

    let output = DualCodegen::default().generate(&plugin(vec![visit_call(vec![IrStmt::let_("answer", IrExpr::int(42))])]));
    assert!(output.babel.as_ref().unwrap().code.contains("const answer = 42;"));
    assert!(output.swc.as_ref().unwrap().code.contains("let answer = 42;"));
}

// ============================================================================
// 2. Macro-style call
// ============================================================================

#[test]
fn scenario_macro_call_forms() {
    let call = IrExpr::macro_call("format", vec![IrExpr::string("x={}"), IrExpr::ident("x")]);
    assert_eq!(render_expr(Backend::Swc, &call).unwrap(), "format!(\"x={}\", x)");
    assert_eq!(render_expr(Backend::Babel, &call).unwrap(), "format(\"x={}\", x)");
}

#[test]
fn scenario_macro_call_brings_its_shim() {
    let body = vec![IrStmt::let_(
        "label",
        IrExpr::macro_call("format", vec![IrExpr::string("x={}"), IrExpr::int(1)]),
    )];
    let output = DualCodegen::default().generate(&plugin(vec![visit_call(body)]));
    let js = &output.babel.as_ref().unwrap().code;
    assert!(js.contains("function format("), "{}", js);
    assert!(js.contains("const label = format(\"x={}\", 1);"), "{}", js);
    assert!(!output.swc.as_ref().unwrap().code.contains("fn format("));
}

// ============================================================================
// 3. Array destructure against a node kind
// ============================================================================

#[test]
fn scenario_node_array_pattern_binds_both_names() {
    let pattern = IrPattern::array_of("CallExpression", vec![IrPattern::ident("first"), IrPattern::ident("second")]);
    let call_ty = IrType::named("CallExpression");

    let swc = render_pattern(Backend::Swc, &pattern, "node", Some(&call_ty)).unwrap();
    assert!(swc.head.starts_with("CallExpr {"), "{}", swc.head);

    let babel = render_pattern(Backend::Babel, &pattern, "node", Some(&call_ty)).unwrap();
    assert!(babel.head.starts_with("t.isCallExpression(node)"), "{}", babel.head);

    for lowered in [&swc, &babel] {
        let names: Vec<&str> = lowered.bindings.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}

// ============================================================================
// 4. Named import of a local helper module
// ============================================================================

#[test]
fn scenario_local_helper_import() {
    let body = vec![IrStmt::let_(
        "escaped",
        IrExpr::call("escape_string", vec![IrExpr::string("a\"b")]),
    )];
    let program = plugin(vec![visit_call(body)]).with_use(IrUse::new("./helpers.lux").with_imports(["escape_string"]));
    let output = DualCodegen::default().generate(&program);

    let js = &output.babel.as_ref().unwrap().code;
    assert!(js.contains("const { escape_string } = require('./helpers.js');"), "{}", js);
    assert!(js.contains("escape_string(\"a\\\"b\")"), "{}", js);

    let rs = &output.swc.as_ref().unwrap().code;
    assert!(rs.contains("mod helpers;\nuse helpers::{escape_string};"), "{}", rs);
    assert!(rs.contains("escape_string("), "{}", rs);
}

// ============================================================================
// 5. Operator with no SWC mapping
// ============================================================================

#[tokio::test]
async fn scenario_one_backend_fails_only_its_file_is_missing() {
    let body = vec![IrStmt::let_("p", IrExpr::binary(BinaryOp::Pow, IrExpr::int(2), IrExpr::int(8)))];
    let output = DualCodegen::default().generate(&plugin(vec![visit_call(body)]));

    assert!(output.babel.as_ref().unwrap().code.contains("2 ** 8"));
    match &output.swc {
        Err(CodegenError::UnsupportedConstruct { construct, backend, .. }) => {
            assert_eq!(*backend, Backend::Swc);
            assert!(construct.contains("**"), "{}", construct);
        }
        other => panic!("expected UnsupportedConstruct, got {:?}", other),
    }

    let dir = std::env::temp_dir().join("dualgen_scenario_five");
    let _ = tokio::fs::remove_dir_all(&dir).await;
    let written = OutputWriter::new(&dir).with_manifest("scenario").write_all(&output).await.unwrap();
    assert_eq!(written, vec![dir.join("index.js")]);
    assert!(!dir.join("lib.rs").exists());
    assert!(!dir.join("Cargo.toml").exists());
    let _ = tokio::fs::remove_dir_all(&dir).await;
}
