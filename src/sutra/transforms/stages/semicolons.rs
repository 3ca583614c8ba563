//! Semicolon normalization stage
//!
//! Sutra statements may omit the terminator. Every line that is not blank, not a comment
//! and not already ending in `{`, `}` or `;` gets a `;` appended to the untouched line.
//! Whitespace-only lines come out empty. Running the stage twice changes nothing.

use crate::sutra::error::CompileError;
use crate::sutra::keywords::{COMMENT_MARKER, TERMINATOR};
use crate::sutra::transforms::Runnable;

/// Semicolon normalization stage
pub struct SemicolonNormalization;

impl SemicolonNormalization {
    pub fn new() -> Self {
        SemicolonNormalization
    }
}

impl Default for SemicolonNormalization {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for SemicolonNormalization {
    fn name(&self) -> &'static str {
        "semicolon_normalization"
    }

    fn run(&self, input: String) -> Result<String, CompileError> {
        Ok(normalize_semicolons(&input))
    }
}

pub fn normalize_semicolons(source: &str) -> String {
    source
        .split('\n')
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return String::new();
    }

    // Comments are gone by now unless this stage runs on its own
    if trimmed.starts_with(COMMENT_MARKER) {
        return line.to_string();
    }

    if trimmed.ends_with(&['{', '}', TERMINATOR][..]) {
        line.to_string()
    } else {
        format!("{}{}", line, TERMINATOR)
    }
}
