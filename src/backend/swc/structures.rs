//! Structs, enums, impls, functions and the plugin/writer struct for the SWC backend

use dualgen_core::lang::keywords;

use super::SwcCodegen;
use crate::backend::emitter::{CodeWriter, comma_list};
use crate::backend::errors::CodegenResult;
use crate::backend::visitors::VisitorPlan;
use crate::ir::{IrEnum, IrFunction, IrImpl, IrStruct, IrTopLevel, IrType, PrimitiveType, Receiver};

impl SwcCodegen<'_> {
    pub(crate) fn struct_decl(&mut self, w: &mut CodeWriter, s: &IrStruct) -> CodegenResult<()> {
        let mut derives = vec!["Debug", "Clone"];
        if s.fields.iter().all(|f| self.is_defaultable(&f.ty)) {
            derives.push("Default");
        }
        if s.serializable {
            derives.extend(["Serialize", "Deserialize"]);
        }
        w.line(&format!("#[derive({})]", derives.join(", ")));

        if s.fields.is_empty() {
            w.line(&format!("pub struct {};", s.name));
            return Ok(());
        }
        let mut fields = Vec::with_capacity(s.fields.len());
        for field in &s.fields {
            fields.push(format!(
                "pub {}: {},",
                keywords::escape_rust(&field.name),
                self.type_name(&field.ty, s.span)?
            ));
        }
        w.block(&format!("pub struct {}", s.name), "}", |w| {
            w.lines(fields.iter().map(String::as_str));
        });
        Ok(())
    }

    pub(crate) fn enum_decl(&mut self, w: &mut CodeWriter, e: &IrEnum) -> CodegenResult<()> {
        let mut variants = Vec::with_capacity(e.variants.len());
        for variant in &e.variants {
            if variant.fields.is_empty() {
                variants.push(format!("{},", variant.name));
                continue;
            }
            let fields = variant
                .fields
                .iter()
                .map(|t| self.type_name(t, e.span))
                .collect::<CodegenResult<Vec<_>>>()?;
            variants.push(format!("{}({}),", variant.name, comma_list(fields)));
        }
        w.line("#[derive(Debug, Clone, PartialEq)]");
        w.block(&format!("pub enum {}", e.name), "}", |w| {
            w.lines(variants.iter().map(String::as_str));
        });
        Ok(())
    }

    pub(crate) fn impl_decl(&mut self, w: &mut CodeWriter, i: &IrImpl) -> CodegenResult<()> {
        self.locals.push();
        self.locals.declare("self", Some(IrType::named(i.target.clone())));
        let result = w.try_block(&format!("impl {}", i.target), "}", |w| {
            for (idx, method) in i.methods.iter().enumerate() {
                if idx > 0 {
                    w.blank_line();
                }
                self.function(w, method, false)?;
            }
            Ok(())
        });
        self.locals.pop();
        result
    }

    /// Emit a function or method. `force_pub` overrides the declared visibility.
    pub(crate) fn function(&mut self, w: &mut CodeWriter, f: &IrFunction, force_pub: bool) -> CodegenResult<()> {
        let mut params = Vec::with_capacity(f.params.len() + 1);
        match f.receiver {
            Some(Receiver::Ref) => params.push("&self".to_string()),
            Some(Receiver::RefMut) => params.push("&mut self".to_string()),
            Some(Receiver::Value) => params.push("self".to_string()),
            None => {}
        }
        for p in &f.params {
            params.push(format!("{}: {}", keywords::escape_rust(&p.name), self.type_name(&p.ty, f.span)?));
        }

        let returns = f.ret.as_ref().filter(|t| **t != IrType::Primitive(PrimitiveType::Unit));
        let mut header = format!(
            "{}fn {}({})",
            if force_pub || f.is_pub { "pub " } else { "" },
            keywords::escape_rust(&f.name),
            comma_list(params)
        );
        if let Some(ret) = returns {
            header.push_str(&format!(" -> {}", self.type_name(ret, f.span)?));
        }

        self.locals.push();
        for p in &f.params {
            self.locals.declare(&p.name, Some(p.ty.clone()));
        }
        let result = w.try_block(&header, "}", |w| self.block_body(w, &f.body, returns.is_some()));
        self.locals.pop();
        result
    }

    /// Plugin or writer struct, its inherent impl and `Default`.
    pub(crate) fn visitor_struct(&mut self, w: &mut CodeWriter, name: &str, plan: &VisitorPlan<'_>) -> CodegenResult<()> {
        let program = self.program;
        let state = match &program.decl {
            IrTopLevel::Plugin(p) | IrTopLevel::Writer(p) => p.state(),
            IrTopLevel::Module(_) => None,
        };
        let writer = self.is_writer();

        let mut fields = Vec::new();
        let mut inits = Vec::new();
        if let Some(state) = state {
            fields.push(format!("pub state: {},", state.name));
            let values = state
                .fields
                .iter()
                .map(|f| format!("{}: {}", keywords::escape_rust(&f.name), self.default_value(&f.ty)))
                .collect::<Vec<_>>();
            inits.push(match values.is_empty() {
                true => format!("state: {}", state.name),
                false => format!("state: {} {{ {} }}", state.name, comma_list(values)),
            });
        }
        if writer {
            fields.push("output: String,".to_string());
            fields.push("indent_level: usize,".to_string());
            inits.push("output: String::new()".to_string());
            inits.push("indent_level: 0".to_string());
        }

        match fields.is_empty() {
            true => w.line(&format!("pub struct {};", name)),
            false => w.block(&format!("pub struct {}", name), "}", |w| {
                w.lines(fields.iter().map(String::as_str));
            }),
        }
        w.blank_line();

        let construct = match inits.is_empty() {
            true => "Self".to_string(),
            false => format!("Self {{ {} }}", comma_list(inits)),
        };
        w.try_block(&format!("impl {}", name), "}", |w| {
            w.block("pub fn new() -> Self", "}", |w| w.line(&construct));
            if writer {
                w.blank_line();
                w.block("fn append(&mut self, s: impl AsRef<str>)", "}", |w| {
                    w.line("self.output.push_str(s.as_ref());");
                });
                w.blank_line();
                w.block("fn newline(&mut self)", "}", |w| {
                    w.line("self.output.push('\\n');");
                    w.line("self.output.push_str(&\"    \".repeat(self.indent_level));");
                });
                w.blank_line();
                w.block("fn indent(&mut self)", "}", |w| w.line("self.indent_level += 1;"));
                w.blank_line();
                w.block("fn dedent(&mut self)", "}", |w| {
                    w.line("self.indent_level = self.indent_level.saturating_sub(1);");
                });
                w.blank_line();
                match plan.exit_hook {
                    Some(_) => w.block("pub fn finish(mut self) -> String", "}", |w| {
                        w.line("self.exit();");
                        w.line("self.output");
                    }),
                    None => w.block("pub fn finish(self) -> String", "}", |w| w.line("self.output")),
                }
            }
            for helper in plan.helpers.iter().filter(|h| h.receiver.is_some()) {
                w.blank_line();
                self.function(w, helper, false)?;
            }
            for (hook, hook_name) in [(plan.pre_hook, "pre"), (plan.exit_hook, "exit")] {
                if let Some(hook) = hook {
                    w.blank_line();
                    let mut f = hook.clone();
                    f.name = hook_name.to_string();
                    f.receiver = Some(Receiver::RefMut);
                    f.params.clear();
                    f.ret = None;
                    self.function(w, &f, false)?;
                }
            }
            Ok(())
        })?;
        w.blank_line();
        w.block(&format!("impl Default for {}", name), "}", |w| {
            w.block("fn default() -> Self", "}", |w| w.line("Self::new()"));
        });

        for helper in plan.helpers.iter().filter(|h| h.receiver.is_none()) {
            w.blank_line();
            self.function(w, helper, false)?;
        }
        Ok(())
    }
}
