//! Located diagnostics
//!
//! Every validating stage reports failures the same way: it knows the byte offset of the
//! offending text inside the program it is holding, and this module turns that offset into
//! a [`Position`] and a display snippet.
//!
//! ## Types
//!
//! - [`Position`] - a 1-based line:column position plus the text of that line
//! - [`SourceLocation`] - line start table for converting byte offsets to positions
//! - [`Diagnostic`] - message, position and snippet, rendered as
//!   `<message> at line L, column C near "<snippet>"`
//!
//! Positions are always computed against the text the reporting stage holds. After the
//! boundary extractor runs that is the extracted program, not the original file.
//!
//! Columns count characters, not bytes, so a keyword after a Devanagari word reports the
//! column a reader would count.

use serde::Serialize;
use std::fmt;

/// Maximum number of characters of the offending line shown in a diagnostic.
pub const SNIPPET_WIDTH: usize = 60;

/// Marker appended to snippets cut at [`SNIPPET_WIDTH`].
pub const ELLIPSIS: &str = "...";

/// A position in source text (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub line_text: String,
}

impl Position {
    pub fn new(line: usize, column: usize, line_text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            line_text: line_text.into(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provides conversion from byte offsets to line/column positions
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the end.
    pub fn position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let start = self.line_starts[line];
        let end = self.source[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or(self.source.len());

        let column = self
            .source
            .get(start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - start)
            + 1;

        Position::new(line + 1, column, &self.source[start..end])
    }
}

/// A located compile-time failure
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub position: Position,
    pub snippet: String,
}

impl Diagnostic {
    /// Locate `message` at `offset` inside `text`.
    pub fn locate(message: impl Into<String>, text: &str, offset: usize) -> Self {
        let position = SourceLocation::new(text).position(offset);
        let snippet = snippet(&position.line_text);
        Self {
            message: message.into(),
            position,
            snippet,
        }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {} near \"{}\"",
            self.message, self.position.line, self.position.column, self.snippet
        )
    }
}

/// Trim a source line and cut it to [`SNIPPET_WIDTH`] characters.
pub fn snippet(line_text: &str) -> String {
    let trimmed = line_text.trim();
    if trimmed.chars().count() > SNIPPET_WIDTH {
        let mut cut: String = trimmed.chars().take(SNIPPET_WIDTH).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        trimmed.to_string()
    }
}
