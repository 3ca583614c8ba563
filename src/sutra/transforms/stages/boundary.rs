//! Boundary extraction stage
//!
//! A program may be wrapped in `आरम्भ` ... `समाप्त`. When both markers are present only the
//! text between the first start marker and the first end marker after it is compiled;
//! everything outside is dropped without being looked at. When neither is present the
//! whole input is the program. One marker without the other is an error.

use crate::sutra::diagnostics::Diagnostic;
use crate::sutra::error::CompileError;
use crate::sutra::keywords::{END_MARKER, START_MARKER};
use crate::sutra::transforms::Runnable;
use once_cell::sync::Lazy;
use regex::Regex;

static PROGRAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?s){}\s*(.*?)\s*{}", START_MARKER, END_MARKER)).unwrap()
});

/// Boundary extraction stage
///
/// # Input
/// - `String` - raw source text
///
/// # Output
/// - `String` - the program between the markers, trimmed, or the input unchanged
pub struct BoundaryExtraction;

impl BoundaryExtraction {
    pub fn new() -> Self {
        BoundaryExtraction
    }
}

impl Default for BoundaryExtraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for BoundaryExtraction {
    fn name(&self) -> &'static str {
        "boundary_extraction"
    }

    fn run(&self, input: String) -> Result<String, CompileError> {
        extract_program(&input).map(|program| program.to_string())
    }
}

/// Isolate the compilable region of `source`.
pub fn extract_program(source: &str) -> Result<&str, CompileError> {
    let start = source.find(START_MARKER);
    let end = source.find(END_MARKER);

    match (start, end) {
        (None, None) => Ok(source),
        (Some(start), None) => Err(boundary_error(
            format!("{} found without {}", END_MARKER, START_MARKER),
            source,
            start,
        )),
        (None, Some(end)) => Err(boundary_error(
            format!("{} found without {}", START_MARKER, END_MARKER),
            source,
            end,
        )),
        (Some(start), Some(_)) => PROGRAM_REGEX
            .captures(source)
            .and_then(|captures| captures.get(1))
            .map(|program| program.as_str().trim())
            .ok_or_else(|| boundary_error("invalid program boundaries", source, start)),
    }
}

fn boundary_error(message: impl Into<String>, source: &str, offset: usize) -> CompileError {
    CompileError::Boundary(Diagnostic::locate(message, source, offset))
}
