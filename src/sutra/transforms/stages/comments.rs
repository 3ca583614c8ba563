//! Comment stripping stage
//!
//! Removes `//` line comments. The scan is quote-aware so `मुद्रय("http://x")` keeps its
//! string intact.
//!
//! # Logic
//!
//! Each line is scanned left to right with two flags, one per quote type:
//! - a backslash consumes itself and the next character, whatever they are
//! - a quote toggles its own flag unless the other quote type is open
//! - `//` with neither flag open cuts the line at that position
//!
//! There is no block comment form, so lines never affect each other.

use crate::sutra::error::CompileError;
use crate::sutra::transforms::Runnable;

/// Comment stripping stage
pub struct CommentStripping;

impl CommentStripping {
    pub fn new() -> Self {
        CommentStripping
    }
}

impl Default for CommentStripping {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for CommentStripping {
    fn name(&self) -> &'static str {
        "comment_stripping"
    }

    fn run(&self, input: String) -> Result<String, CompileError> {
        Ok(strip_comments(&input))
    }
}

/// Remove the comment suffix of every line.
pub fn strip_comments(source: &str) -> String {
    source.split('\n').map(strip_line).collect::<Vec<_>>().join("\n")
}

/// Remove the comment suffix of one line, if it has one outside of quotes.
pub fn strip_line(line: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '/' if !in_single && !in_double && matches!(chars.peek(), Some((_, '/'))) => {
                return &line[..idx];
            }
            _ => {}
        }
    }

    line
}
