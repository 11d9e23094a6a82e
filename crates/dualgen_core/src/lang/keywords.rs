//! Reserved words of both targets (for identifier escaping).

/// Reserved + strict keywords in Rust.
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern", "false", "fn",
    "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self",
    "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become",
    "box", "do", "final", "gen", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Rust keywords that cannot be written as raw identifiers.
pub const RUST_NON_RAW: &[&str] = &["crate", "self", "Self", "super"];

/// Reserved words in strict-mode JavaScript.
pub const JS_RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "eval", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
    "yield",
];

/// Check whether an identifier is a Rust keyword.
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Check whether an identifier is reserved in JavaScript.
pub fn is_js_reserved(name: &str) -> bool {
    JS_RESERVED.contains(&name)
}

/// Escape an identifier for Rust output (`type` → `r#type`).
///
/// Keywords that have no raw form (`self`, `super`, ...) are returned unchanged; they only ever
/// reach codegen in their keyword role.
pub fn escape_rust(name: &str) -> String {
    if is_rust_keyword(name) && !RUST_NON_RAW.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Escape an identifier for JavaScript output (`class` → `_class`).
pub fn escape_js(name: &str) -> String {
    if is_js_reserved(name) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_rust() {
        assert_eq!(escape_rust("type"), "r#type");
        assert_eq!(escape_rust("self"), "self");
        assert_eq!(escape_rust("node"), "node");
    }

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js("class"), "_class");
        assert_eq!(escape_js("new"), "_new");
        assert_eq!(escape_js("node"), "node");
    }
}
