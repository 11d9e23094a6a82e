//! Builtin module vocabulary.
//!
//! `use fs;`, `use path;` and `use json;` in the DSL refer to host facilities rather than local
//! helper files. Each entry says how the two targets bring the facility into scope.

/// Stable identifier for a builtin module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinModuleId {
    Fs,
    Path,
    Json,
}

/// Metadata for a builtin module.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinModuleInfo {
    pub id: BuiltinModuleId,
    pub name: &'static str,
    /// Rust `use` item (without the trailing `;`).
    pub swc_use: &'static str,
    /// Node module specifier to `require`/`import`; `None` when the facility is a JS global.
    pub babel_module: Option<&'static str>,
}

/// Registry of builtin modules.
pub const BUILTIN_MODULES: &[BuiltinModuleInfo] = &[
    BuiltinModuleInfo {
        id: BuiltinModuleId::Fs,
        name: "fs",
        swc_use: "use std::fs",
        babel_module: Some("fs"),
    },
    BuiltinModuleInfo {
        id: BuiltinModuleId::Path,
        name: "path",
        swc_use: "use std::path::Path",
        babel_module: Some("path"),
    },
    BuiltinModuleInfo {
        id: BuiltinModuleId::Json,
        name: "json",
        swc_use: "use serde_json",
        babel_module: None,
    },
];

/// Return the metadata entry for a builtin module.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinModuleId) -> &'static BuiltinModuleInfo {
    BUILTIN_MODULES
        .iter()
        .find(|m| m.id == id)
        .expect("builtin module info missing")
}

/// Resolve a `use` path to a builtin module.
pub fn from_str(path: &str) -> Option<BuiltinModuleId> {
    BUILTIN_MODULES.iter().find(|m| m.name == path).map(|m| m.id)
}

/// Derive the module name of a local helper path (`./helpers.lux` → `helpers`).
///
/// Returns `None` for an empty stem.
pub fn local_module_name(path: &str) -> Option<&str> {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file.strip_suffix(".lux").unwrap_or(file);
    if stem.is_empty() { None } else { Some(stem) }
}

/// Babel specifier for a local helper path (`./helpers.lux` → `./helpers.js`).
pub fn babel_specifier(path: &str) -> String {
    let base = path.strip_suffix(".lux").unwrap_or(path);
    if base.starts_with("./") || base.starts_with("../") {
        format!("{}.js", base)
    } else {
        format!("./{}.js", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_module_name() {
        assert_eq!(local_module_name("./helpers.lux"), Some("helpers"));
        assert_eq!(local_module_name("utils/strings.lux"), Some("strings"));
        assert_eq!(local_module_name("helpers"), Some("helpers"));
        assert_eq!(local_module_name("./.lux"), None);
    }

    #[test]
    fn test_babel_specifier() {
        assert_eq!(babel_specifier("./helpers.lux"), "./helpers.js");
        assert_eq!(babel_specifier("helpers"), "./helpers.js");
        assert_eq!(babel_specifier("../shared/names.lux"), "../shared/names.js");
    }
}
