//! Indentation-tracking source writer.

use std::fmt::{self, Write as _};

const INDENT: &str = "    ";

/// Accumulates generated Rust source.
///
/// Lines written inside [`SourceWriter::block`] are indented one level per
/// nesting; blank lines never carry trailing whitespace.
#[derive(Debug, Default)]
pub struct SourceWriter {
    out: String,
    level: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return self.blank();
        }
        for _ in 0..self.level {
            self.out.write_str(INDENT)?;
        }
        self.out.write_str(text)?;
        self.out.write_char('\n')
    }

    pub fn blank(&mut self) -> fmt::Result {
        self.out.write_char('\n')
    }

    /// Writes `// text` lines.
    pub fn comment(&mut self, text: &str) -> fmt::Result {
        self.line(&format!("// {text}"))
    }

    /// Writes each line of `text` as a `///` doc comment.
    pub fn doc(&mut self, text: &str) -> fmt::Result {
        for line in text.lines() {
            let line = line.strip_prefix(' ').unwrap_or(line).trim_end();
            if line.is_empty() {
                self.line("///")?;
            } else {
                self.line(&format!("/// {line}"))?;
            }
        }
        Ok(())
    }

    /// Writes the body one indentation level deeper.
    pub fn indented<F>(&mut self, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.level += 1;
        let result = body(self);
        self.level -= 1;
        result
    }

    /// Writes `header {` (or a bare `{`), the indented body, then `}`.
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        if header.is_empty() {
            self.line("{")?;
        } else {
            self.line(&format!("{header} {{"))?;
        }
        self.indented(body)?;
        self.line("}")
    }

    pub fn finish(self) -> String {
        self.out
    }
}
