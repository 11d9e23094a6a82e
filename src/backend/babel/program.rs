//! Header, shims and the plugin factory for the Babel backend

use std::collections::BTreeSet;

use dualgen_core::lang::keywords;
use dualgen_core::lang::macros;
use dualgen_core::lang::modules::{self, BuiltinModuleId};

use super::BabelCodegen;
use super::structures::{FnStyle, impl_methods};
use super::types::js_string;
use crate::backend::Backend;
use crate::backend::detection::SupportMarker;
use crate::backend::emitter::{CodeWriter, comma_list};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::visitors::VisitorPlan;
use crate::config::ModuleStyle;
use crate::ir::{IrItem, IrModule, IrPlugin, IrTopLevel, IrType, Receiver};

impl BabelCodegen<'_> {
    pub(crate) fn emit_program(&mut self, markers: &BTreeSet<SupportMarker>) -> CodegenResult<String> {
        let mut w = self.writer();
        if self.config.emit_header {
            w.line(&format!("// Generated by dualgen from `{}`. Do not edit.", self.program.name()));
        }
        self.emit_imports(&mut w, markers);
        emit_shims(&mut w, markers);

        let program = self.program;
        match &program.decl {
            IrTopLevel::Plugin(plugin) | IrTopLevel::Writer(plugin) => self.factory(&mut w, plugin)?,
            IrTopLevel::Module(module) => self.module(&mut w, module)?,
        }
        // sections open with a blank line; none before the first
        let code = w.finish();
        Ok(code.trim_start_matches('\n').to_string())
    }

    fn esm(&self) -> bool {
        self.config.js_module_style == ModuleStyle::Esm
    }

    fn emit_imports(&self, w: &mut CodeWriter, markers: &BTreeSet<SupportMarker>) {
        let mut lines = Vec::new();
        for use_decl in &self.program.uses {
            if modules::from_str(&use_decl.path).is_some() {
                continue;
            }
            let Some(stem) = modules::local_module_name(&use_decl.path) else {
                continue;
            };
            let specifier = format!("'{}'", modules::babel_specifier(&use_decl.path));
            let namespace = keywords::escape_js(use_decl.alias.as_deref().unwrap_or(stem));
            let imports = comma_list(use_decl.imports.iter().map(|i| keywords::escape_js(i)));
            lines.push(match (self.esm(), use_decl.imports.is_empty()) {
                (false, false) => format!("const {{ {} }} = require({});", imports, specifier),
                (false, true) => format!("const {} = require({});", namespace, specifier),
                (true, false) => format!("import {{ {} }} from {};", imports, specifier),
                (true, true) => format!("import * as {} from {};", namespace, specifier),
            });
        }
        for (marker, id) in [
            (SupportMarker::FsRequire, BuiltinModuleId::Fs),
            (SupportMarker::PathRequire, BuiltinModuleId::Path),
        ] {
            let info = modules::info_for(id);
            let Some(module) = info.babel_module.filter(|_| markers.contains(&marker)) else {
                continue;
            };
            lines.push(match self.esm() {
                false => format!("const {} = require('{}');", info.name, module),
                true => format!("import {} from '{}';", info.name, module),
            });
        }
        if lines.is_empty() {
            return;
        }
        w.blank_line();
        w.lines(lines.iter().map(String::as_str));
    }

    /// Classes (with their `impl` methods) and enums.
    fn declarations(&mut self, w: &mut CodeWriter, items: &[IrItem], plugin_name: Option<&str>) -> CodegenResult<()> {
        for item in items {
            match item {
                IrItem::Struct(s) => {
                    w.blank_line();
                    let methods = impl_methods(items, &s.name);
                    self.class_decl(w, s, &methods)?;
                }
                IrItem::Enum(e) => {
                    w.blank_line();
                    self.enum_decl(w, e);
                }
                IrItem::Impl(i) => self.check_impl(i, plugin_name)?,
                IrItem::Function(_) | IrItem::PreHook(_) | IrItem::ExitHook(_) => {}
            }
        }
        Ok(())
    }

    /// `function Name({ types: t }) { ... }` plus its export.
    fn factory(&mut self, w: &mut CodeWriter, plugin: &IrPlugin) -> CodegenResult<()> {
        let plan = VisitorPlan::from_items(&plugin.items);
        self.warnings.extend(plan.warnings.iter().cloned());
        let writer = self.program.decl.is_writer();
        let state = plugin.state().map(|s| s.name.clone());

        w.blank_line();
        self.locals.push();
        self.locals.declare("self", Some(IrType::named(plugin.name.clone())));
        let result = w.try_block(&format!("function {}({{ types: t }})", plugin.name), "}", |w| {
            let mut body = w.fork();
            body.indent();
            self.declarations(&mut body, &plugin.items, Some(&plugin.name))?;
            let declared = body.finish();
            if !declared.is_empty() {
                w.write(declared.trim_start_matches('\n'));
                w.blank_line();
            }

            self.self_object(w, plugin, &plan, state.as_deref())?;
            for helper in plan.helpers.iter().filter(|h| h.receiver.is_none()) {
                w.blank_line();
                self.function(w, helper, FnStyle::Free, "self")?;
            }

            w.blank_line();
            w.try_block("return", "};", |w| {
                w.line(&format!("name: {},", js_string(&plugin.name)));
                let mut pre = Vec::new();
                if let Some(state) = &state {
                    pre.push(format!("self.state = new {}();", state));
                }
                if writer {
                    pre.push("self._output = \"\";".to_string());
                    pre.push("self._indent = 0;".to_string());
                }
                if plan.pre_hook.is_some() {
                    pre.push("self.pre();".to_string());
                }
                if !pre.is_empty() {
                    w.block("pre(file)", "},", |w| w.lines(pre.iter().map(String::as_str)));
                }
                if writer {
                    w.block("post(file)", "},", |w| w.line("file.metadata.output = self.finish();"));
                } else if plan.exit_hook.is_some() {
                    w.block("post(file)", "},", |w| w.line("self.exit();"));
                }
                w.try_block("visitor:", "},", |w| self.visitor_entries(w, &plan))
            })
        });
        self.locals.pop();
        result?;
        w.blank_line();
        match self.esm() {
            false => w.line(&format!("module.exports = {};", plugin.name)),
            true => w.line(&format!("export default {};", plugin.name)),
        }
        Ok(())
    }

    /// The closure-local `self` object: state, writer buffer, receiver helpers and lifecycle hooks.
    fn self_object(
        &mut self,
        w: &mut CodeWriter,
        plugin: &IrPlugin,
        plan: &VisitorPlan<'_>,
        state: Option<&str>,
    ) -> CodegenResult<()> {
        let writer = self.program.decl.is_writer();
        w.try_block("const self =", "};", |w| {
            if let Some(state) = state {
                w.line(&format!("state: new {}(),", state));
            }
            if writer {
                w.line("_output: \"\",");
                w.line("_indent: 0,");
                w.block("append(s)", "},", |w| w.line("self._output += s;"));
                w.block("newline()", "},", |w| w.line("self._output += \"\\n\" + \"    \".repeat(self._indent);"));
                w.block("indent()", "},", |w| w.line("self._indent += 1;"));
                w.block("dedent()", "},", |w| w.line("self._indent = Math.max(0, self._indent - 1);"));
                w.block("finish()", "},", |w| {
                    if plan.exit_hook.is_some() {
                        w.line("self.exit();");
                    }
                    w.line("return self._output;");
                });
            }
            let receivers = plan.helpers.iter().copied().filter(|h| h.receiver.is_some());
            let impl_helpers = impl_methods(&plugin.items, &plugin.name);
            for helper in receivers.chain(impl_helpers) {
                self.function(w, helper, FnStyle::Entry, "self")?;
            }
            for (hook, hook_name) in [(plan.pre_hook, "pre"), (plan.exit_hook, "exit")] {
                if let Some(hook) = hook {
                    let mut f = hook.clone();
                    f.name = hook_name.to_string();
                    f.receiver = Some(Receiver::RefMut);
                    f.params.clear();
                    f.ret = None;
                    self.function(w, &f, FnStyle::Entry, "self")?;
                }
            }
            Ok(())
        })
    }

    fn module(&mut self, w: &mut CodeWriter, module: &IrModule) -> CodegenResult<()> {
        self.declarations(w, &module.items, None)?;
        let mut exports = Vec::new();
        for item in &module.items {
            match item {
                IrItem::Function(f) => {
                    w.blank_line();
                    self.function(w, f, FnStyle::Free, "self")?;
                    if f.is_pub {
                        exports.push(keywords::escape_js(&f.name));
                    }
                }
                IrItem::Struct(s) => exports.push(s.name.clone()),
                IrItem::Enum(e) => exports.push(e.name.clone()),
                IrItem::PreHook(f) | IrItem::ExitHook(f) => {
                    return Err(CodegenError::unsupported(
                        format!("lifecycle hook `{}` in module `{}`", f.name, module.name),
                        Backend::Babel,
                        f.span,
                    ));
                }
                IrItem::Impl(_) => {}
            }
        }
        if exports.is_empty() {
            return Ok(());
        }
        w.blank_line();
        match self.esm() {
            false => w.line(&format!("module.exports = {{ {} }};", comma_list(&exports))),
            true => w.line(&format!("export {{ {} }};", comma_list(&exports))),
        }
        Ok(())
    }
}

/// Runtime functions standing in for macros, in marker order.
fn emit_shims(w: &mut CodeWriter, markers: &BTreeSet<SupportMarker>) {
    for marker in markers {
        if let SupportMarker::Shim(id) = marker {
            w.blank_line();
            w.lines(macros::info_for(*id).babel_shim.iter().copied());
        }
    }
}
