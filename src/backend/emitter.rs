//! Code writer - builds indented source text for both backends
//!
//! `CodeWriter` is a formatting sink: it knows nothing about the IR or the target language. The
//! backends render expressions to strings and statements/declarations through a writer.
//!
//! ## Multi-line fragments
//!
//! A fragment passed to [`CodeWriter::line`] may contain newlines (a rendered `match` or IIFE).
//! Each of its lines is re-indented at the current depth, so fragments are rendered relative to
//! column zero and nest correctly at any depth.

use std::fmt::Write;

/// A buffer for building source code with indentation tracking
#[derive(Debug, Clone)]
pub struct CodeWriter {
    buffer: String,
    indent_level: usize,
    indent_unit: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::with_indent_width(4)
    }
}

impl CodeWriter {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_unit: indent_unit.into(),
        }
    }

    /// Writer indenting with `width` spaces per level.
    pub fn with_indent_width(width: usize) -> Self {
        Self::new(" ".repeat(width))
    }

    /// A fresh writer with the same indent unit, starting at depth zero.
    pub fn fork(&self) -> Self {
        Self::new(self.indent_unit.clone())
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Write a line with current indentation.
    ///
    /// Embedded newlines start new lines at the same indentation.
    pub fn line(&mut self, s: &str) {
        for part in s.split('\n') {
            if part.is_empty() {
                self.buffer.push('\n');
                continue;
            }
            self.write_indent();
            self.buffer.push_str(part);
            self.buffer.push('\n');
        }
    }

    /// Write several lines, each at the current indentation.
    pub fn lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for l in lines {
            self.line(l);
        }
    }

    /// Write text without newline
    pub fn write(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Write formatted text
    pub fn writef(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = self.buffer.write_fmt(args);
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Write indentation only
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent_unit);
        }
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `header {`, the body one level deeper, then `closer`.
    pub fn block<F>(&mut self, header: &str, closer: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.open(header);
        f(self);
        self.close(closer);
    }

    /// Fallible [`CodeWriter::block`]. The indent level is restored even when `f` fails.
    pub fn try_block<F, E>(&mut self, header: &str, closer: &str, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        let level = self.indent_level;
        self.open(header);
        let result = f(self);
        if result.is_err() {
            self.indent_level = level;
            return result;
        }
        self.close(closer);
        result
    }

    fn open(&mut self, header: &str) {
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(&format!("{} {{", header));
        }
        self.indent();
    }

    fn close(&mut self, closer: &str) {
        self.dedent();
        self.line(closer);
    }
}

/// Join rendered items with `, `.
pub fn comma_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(item.as_ref());
    }
    out
}
