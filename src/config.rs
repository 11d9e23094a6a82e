//! Code generation configuration
//!
//! Options shared by both backends. The CLI maps its flags onto a [`CodegenConfig`]; library users
//! build one with the `with_*` methods.

/// How the Babel output declares its imports and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleStyle {
    /// `require(...)` / `module.exports`
    #[default]
    CommonJs,
    /// `import ... from` / `export default`
    Esm,
}

/// Code generation configuration
#[derive(Debug, Clone)]
pub struct CodegenConfig {
    /// Spaces per indentation level in the Babel output
    pub js_indent: usize,
    /// Spaces per indentation level in the SWC output
    pub rust_indent: usize,
    pub js_module_style: ModuleStyle,
    /// Emit a "generated file" comment at the top of each output
    pub emit_header: bool,
    /// Parse the SWC output with `syn` and fail the backend if it is not valid Rust
    pub verify_rust: bool,
    /// Reformat the SWC output with `prettyplease` (implies parsing it)
    pub pretty_rust: bool,
    /// Run the two backend pipelines on separate threads
    pub parallel: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            js_indent: 2,
            rust_indent: 4,
            js_module_style: ModuleStyle::CommonJs,
            emit_header: true,
            verify_rust: false,
            pretty_rust: false,
            parallel: true,
        }
    }
}

impl CodegenConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_js_indent(mut self, width: usize) -> Self {
        self.js_indent = width;
        self
    }

    pub fn with_rust_indent(mut self, width: usize) -> Self {
        self.rust_indent = width;
        self
    }

    pub fn with_module_style(mut self, style: ModuleStyle) -> Self {
        self.js_module_style = style;
        self
    }

    pub fn with_header(mut self, emit: bool) -> Self {
        self.emit_header = emit;
        self
    }

    pub fn with_verify_rust(mut self, verify: bool) -> Self {
        self.verify_rust = verify;
        self
    }

    pub fn with_pretty_rust(mut self, pretty: bool) -> Self {
        self.pretty_rust = pretty;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert_eq!(config.js_indent, 2);
        assert_eq!(config.rust_indent, 4);
        assert_eq!(config.js_module_style, ModuleStyle::CommonJs);
        assert!(config.emit_header);
        assert!(!config.pretty_rust);
    }

    #[test]
    fn test_builder_chain() {
        let config = CodegenConfig::new()
            .with_module_style(ModuleStyle::Esm)
            .with_pretty_rust(true)
            .with_parallel(false);
        assert_eq!(config.js_module_style, ModuleStyle::Esm);
        assert!(config.pretty_rust);
        assert!(!config.parallel);
    }
}
