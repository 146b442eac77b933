//! Nesting-aware source text writer.
//!
//! [`CodeWriter`] tracks indentation depth as an explicit integer. Opening a
//! scope writes the header and open delimiter at the current depth and returns
//! a [`Scope`] guard that increments the depth; dropping the guard restores the
//! depth and writes the matching close delimiter (plus an optional terminator).
//! The closer therefore runs exactly once per opener, including on early
//! returns and `?` inside the code that fills the scope.
//!
//! ## Examples
//!
//! ```
//! use enum_reflector::writer::{CodeWriter, Delimiter};
//!
//! let mut w = CodeWriter::new("    ");
//! {
//!     let mut body = w.scope("fn answer() -> u8");
//!     body.line("42");
//! }
//! {
//!     let mut items = w.scope_with("const ITEMS: &[u8] = &", Delimiter::Bracket, Some(";"));
//!     items.line("1,");
//! }
//!
//! assert_eq!(
//!     w.finish(),
//!     "fn answer() -> u8 {\n    42\n}\nconst ITEMS: &[u8] = &[\n    1,\n];\n"
//! );
//! ```

use std::ops::{Deref, DerefMut};

/// Paired delimiters a scope can open and close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Brace,
    Bracket,
    Paren,
}

impl Delimiter {
    fn open(self) -> char {
        match self {
            Self::Brace => '{',
            Self::Bracket => '[',
            Self::Paren => '(',
        }
    }

    fn close(self) -> char {
        match self {
            Self::Brace => '}',
            Self::Bracket => ']',
            Self::Paren => ')',
        }
    }
}

/// Accumulates indented lines of source text.
#[derive(Debug)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
    indent: String,
}

impl CodeWriter {
    /// Creates an empty writer using `indent` once per nesting level.
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            indent: indent.into(),
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Writes one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            self.write_indent();
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Opens a brace-delimited scope: `header {`.
    pub fn scope(&mut self, header: impl AsRef<str>) -> Scope<'_> {
        self.scope_with(header, Delimiter::Brace, None)
    }

    /// Opens a scope with an explicit delimiter and optional terminator.
    ///
    /// A non-empty header is followed by a space before a brace (`if x {`) but
    /// sits directly against a bracket or parenthesis (`&[`, `Ok(`).
    pub fn scope_with(
        &mut self,
        header: impl AsRef<str>,
        delimiter: Delimiter,
        terminator: Option<&'static str>,
    ) -> Scope<'_> {
        let header = header.as_ref();
        let opener = match (header.is_empty(), delimiter) {
            (true, _) => delimiter.open().to_string(),
            (false, Delimiter::Brace) => format!("{header} {}", delimiter.open()),
            (false, _) => format!("{header}{}", delimiter.open()),
        };
        self.line(opener);

        let depth = self.depth;
        self.depth += 1;

        Scope {
            writer: self,
            depth,
            delimiter,
            terminator,
        }
    }

    /// Consumes the writer and returns the accumulated text.
    pub fn finish(self) -> String {
        self.buf
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(&self.indent);
        }
    }
}

/// An open scope; closes itself when dropped.
///
/// Dereferences to the underlying [`CodeWriter`], so scopes nest naturally.
#[derive(Debug)]
pub struct Scope<'a> {
    writer: &'a mut CodeWriter,
    depth: usize,
    delimiter: Delimiter,
    terminator: Option<&'static str>,
}

impl Deref for Scope<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        &*self.writer
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        &mut *self.writer
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.writer.depth = self.depth;
        let closer = format!(
            "{}{}",
            self.delimiter.close(),
            self.terminator.unwrap_or_default()
        );
        self.writer.line(closer);
    }
}
