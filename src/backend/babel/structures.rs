//! Classes, frozen enums and functions for the Babel backend
//!
//! Structs become classes whose constructor takes every field positionally with its default, so
//! `new State()` is the default value and a struct literal with missing fields still works. Enum
//! values are frozen `{ tag, values }` records: unit variants are shared singletons, tuple variants
//! are constructor arrows.

use std::mem;

use dualgen_core::lang::keywords;

use super::statements::TailMode;
use super::types::js_string;
use super::{BabelCodegen, FnContext};
use crate::backend::Backend;
use crate::backend::emitter::{CodeWriter, comma_list};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::ir::{IrEnum, IrFunction, IrImpl, IrItem, IrStruct, IrType, PrimitiveType};

/// How a function is introduced in JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FnStyle {
    /// `function name(..) {}`
    Free,
    /// `name(..) {}` inside a class
    Method,
    /// `static name(..) {}` inside a class
    Static,
    /// `name(..) {},` inside an object literal
    Entry,
}

/// Methods declared in `impl` blocks for `target`, in declaration order.
pub(crate) fn impl_methods<'i>(items: &'i [IrItem], target: &str) -> Vec<&'i IrFunction> {
    items
        .iter()
        .filter_map(|item| match item {
            IrItem::Impl(i) if i.target == target => Some(i.methods.iter()),
            _ => None,
        })
        .flatten()
        .collect()
}

impl BabelCodegen<'_> {
    /// Reject `impl` blocks with no class to attach to.
    pub(crate) fn check_impl(&self, i: &IrImpl, plugin_name: Option<&str>) -> CodegenResult<()> {
        if self.user_types.is_struct(&i.target) || plugin_name == Some(i.target.as_str()) {
            return Ok(());
        }
        let what = match self.user_types.is_enum(&i.target) {
            true => format!("`impl` on enum `{}`", i.target),
            false => format!("`impl` on unknown type `{}`", i.target),
        };
        Err(CodegenError::unsupported(what, Backend::Babel, i.span))
    }

    pub(crate) fn class_decl(&mut self, w: &mut CodeWriter, s: &IrStruct, methods: &[&IrFunction]) -> CodegenResult<()> {
        if s.fields.is_empty() && methods.is_empty() {
            w.line(&format!("class {} {{}}", s.name));
            return Ok(());
        }
        self.locals.push();
        self.locals.declare("self", Some(IrType::named(s.name.clone())));
        let result = w.try_block(&format!("class {}", s.name), "}", |w| {
            if !s.fields.is_empty() {
                let docs = s
                    .fields
                    .iter()
                    .map(|f| format!("@param {{{}}} [{}]", self.jsdoc_type(&f.ty), keywords::escape_js(&f.name)))
                    .collect::<Vec<_>>();
                jsdoc(w, &docs);
                let params = comma_list(
                    s.fields
                        .iter()
                        .map(|f| format!("{} = {}", keywords::escape_js(&f.name), self.default_value(&f.ty))),
                );
                w.block(&format!("constructor({})", params), "}", |w| {
                    for field in &s.fields {
                        let name = keywords::escape_js(&field.name);
                        w.line(&format!("this.{} = {};", name, name));
                    }
                });
            }
            for (idx, method) in methods.iter().enumerate() {
                if idx > 0 || !s.fields.is_empty() {
                    w.blank_line();
                }
                let style = match method.receiver {
                    Some(_) => FnStyle::Method,
                    None => FnStyle::Static,
                };
                self.function(w, method, style, "this")?;
            }
            Ok(())
        });
        self.locals.pop();
        result
    }

    pub(crate) fn enum_decl(&self, w: &mut CodeWriter, e: &IrEnum) {
        w.line(&format!("const {} = Object.freeze({{", e.name));
        w.indent();
        for variant in &e.variants {
            let tag = js_string(&variant.name);
            match variant.fields.is_empty() {
                true => w.line(&format!("{}: Object.freeze({{ tag: {}, values: [] }}),", variant.name, tag)),
                false => w.line(&format!(
                    "{}: (...values) => Object.freeze({{ tag: {}, values }}),",
                    variant.name, tag
                )),
            }
        }
        w.dedent();
        w.line("});");
    }

    /// Emit a function with its JSDoc. `self_ref` is what DSL `self` means inside the body.
    pub(crate) fn function(
        &mut self,
        w: &mut CodeWriter,
        f: &IrFunction,
        style: FnStyle,
        self_ref: &'static str,
    ) -> CodegenResult<()> {
        let returns = f.ret.as_ref().filter(|t| **t != IrType::Primitive(PrimitiveType::Unit));

        let mut docs = f
            .params
            .iter()
            .map(|p| format!("@param {{{}}} {}", self.jsdoc_type(&p.ty), keywords::escape_js(&p.name)))
            .collect::<Vec<_>>();
        if let Some(ret) = returns {
            docs.push(format!("@returns {{{}}}", self.jsdoc_type(ret)));
        }
        jsdoc(w, &docs);

        let params = comma_list(f.params.iter().map(|p| keywords::escape_js(&p.name)));
        let name = keywords::escape_js(&f.name);
        let header = match style {
            FnStyle::Free => format!("function {}({})", name, params),
            FnStyle::Method | FnStyle::Entry => format!("{}({})", name, params),
            FnStyle::Static => format!("static {}({})", name, params),
        };
        let closer = match style {
            FnStyle::Entry => "},",
            _ => "}",
        };

        let saved = mem::replace(
            &mut self.ctx,
            FnContext {
                node_param: None,
                self_ref,
            },
        );
        self.locals.push();
        for p in &f.params {
            self.locals.declare(&p.name, Some(p.ty.clone()));
        }
        let tail = match returns {
            Some(_) => TailMode::Return,
            None => TailMode::Discard,
        };
        let result = w.try_block(&header, closer, |w| self.block_body(w, &f.body, tail));
        self.locals.pop();
        self.ctx = saved;
        result
    }
}

/// `/** ... */` block; nothing for an empty tag list.
fn jsdoc(w: &mut CodeWriter, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    w.line("/**");
    for tag in tags {
        w.line(&format!(" * {}", tag));
    }
    w.line(" */");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::detection::Detection;
    use crate::config::CodegenConfig;
    use crate::ir::{IrBlock, IrExpr, IrField, IrModule, IrParam, IrProgram, IrSpan, IrTopLevel, IrVariant, Receiver};

    fn with_codegen<R>(items: Vec<IrItem>, f: impl FnOnce(&mut BabelCodegen<'_>) -> R) -> R {
        let program = IrProgram::new(IrTopLevel::Module(IrModule {
            name: "m".into(),
            items,
            span: IrSpan::default(),
        }));
        let detection = Detection::default();
        let config = CodegenConfig::default();
        let mut codegen = BabelCodegen::new(&program, &detection, &config);
        f(&mut codegen)
    }

    #[test]
    fn test_class_with_defaults_and_method() {
        let s = IrStruct::new("Counter", vec![IrField::new("count", IrType::int())]);
        let bump = IrFunction::new("total", vec![], IrBlock::default().with_tail(IrExpr::member(IrExpr::ident("self"), "count")))
            .with_receiver(Receiver::Ref)
            .with_ret(IrType::int());
        let out = with_codegen(vec![IrItem::Struct(s.clone())], |c| {
            let mut w = CodeWriter::with_indent_width(2);
            c.class_decl(&mut w, &s, &[&bump]).expect("class");
            w.finish()
        });
        assert_eq!(
            out,
            "class Counter {\n  /**\n   * @param {number} [count]\n   */\n  constructor(count = 0) {\n    this.count = count;\n  }\n\n  /**\n   * @returns {number}\n   */\n  total() {\n    return this.count;\n  }\n}\n"
        );
    }

    #[test]
    fn test_enum_is_frozen_tagged_record() {
        let e = IrEnum {
            name: "Kind".into(),
            variants: vec![
                IrVariant {
                    name: "A".into(),
                    fields: vec![],
                },
                IrVariant {
                    name: "B".into(),
                    fields: vec![IrType::str()],
                },
            ],
            span: IrSpan::default(),
        };
        let out = with_codegen(vec![], |c| {
            let mut w = CodeWriter::with_indent_width(2);
            c.enum_decl(&mut w, &e);
            w.finish()
        });
        assert_eq!(
            out,
            "const Kind = Object.freeze({\n  A: Object.freeze({ tag: \"A\", values: [] }),\n  B: (...values) => Object.freeze({ tag: \"B\", values }),\n});\n"
        );
    }

    #[test]
    fn test_impl_on_enum_is_unsupported() {
        let e = IrEnum {
            name: "Kind".into(),
            variants: vec![],
            span: IrSpan::default(),
        };
        let i = IrImpl {
            target: "Kind".into(),
            methods: vec![],
            span: IrSpan::default(),
        };
        let result = with_codegen(vec![IrItem::Enum(e)], |c| c.check_impl(&i, None));
        assert!(matches!(result, Err(CodegenError::UnsupportedConstruct { .. })));
    }

    #[test]
    fn test_free_function_jsdoc() {
        let f = IrFunction::new(
            "greet",
            vec![IrParam::new("name", IrType::str())],
            IrBlock::default().with_tail(IrExpr::ident("name")),
        )
        .with_ret(IrType::str());
        let out = with_codegen(vec![], |c| {
            let mut w = CodeWriter::with_indent_width(2);
            c.function(&mut w, &f, FnStyle::Free, "self").expect("function");
            w.finish()
        });
        assert_eq!(
            out,
            "/**\n * @param {string} name\n * @returns {string}\n */\nfunction greet(name) {\n  return name;\n}\n"
        );
    }
}
