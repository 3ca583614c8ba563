//! Shape validation stage
//!
//! Checks the surface form of block-introducing lines, one physical line at a time:
//!
//! - a line with `यदि` must contain `यदि (condition) {`, where the condition has no
//!   unescaped parentheses of its own
//! - a line with `अन्यथा` must not give it a condition and must open its block with `{`
//!   on the same line
//!
//! A header split over several lines is therefore rejected.
//!
//! Errors point at the keyword. The line's offset is that of the first line in the text
//! with identical content, so a repeated bad line always reports its first occurrence.

use crate::sutra::diagnostics::Diagnostic;
use crate::sutra::error::CompileError;
use crate::sutra::keywords::Keyword;
use crate::sutra::transforms::Runnable;
use once_cell::sync::Lazy;
use regex::Regex;

static CONDITIONAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}\s*\((?:\\.|[^()\\])*\)\s*\{{",
        Keyword::Conditional.source()
    ))
    .unwrap()
});

static ALTERNATE_CONDITION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{}\s*\(", Keyword::Alternate.source())).unwrap());

/// Shape validation stage
pub struct ShapeValidation;

impl ShapeValidation {
    pub fn new() -> Self {
        ShapeValidation
    }
}

impl Default for ShapeValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for ShapeValidation {
    fn name(&self) -> &'static str {
        "shape_validation"
    }

    fn run(&self, input: String) -> Result<String, CompileError> {
        validate_shapes(&input)?;
        Ok(input)
    }
}

pub fn validate_shapes(source: &str) -> Result<(), CompileError> {
    let lines = lines_with_offsets(source);

    for &(_, line) in &lines {
        let conditional = Keyword::Conditional.source();
        if let Some(keyword_at) = line.find(conditional) {
            if !CONDITIONAL_REGEX.is_match(line) {
                return Err(shape_error(
                    "invalid conditional block shape",
                    source,
                    &lines,
                    line,
                    keyword_at,
                ));
            }
        }

        let alternate = Keyword::Alternate.source();
        if let Some(keyword_at) = line.find(alternate) {
            if ALTERNATE_CONDITION_REGEX.is_match(line) {
                return Err(shape_error(
                    "alternate branch cannot have a condition",
                    source,
                    &lines,
                    line,
                    keyword_at,
                ));
            }
            if !line.contains('{') {
                return Err(shape_error(
                    "invalid alternate block shape",
                    source,
                    &lines,
                    line,
                    keyword_at,
                ));
            }
        }
    }

    Ok(())
}

fn lines_with_offsets(source: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    source
        .split('\n')
        .map(|line| {
            let entry = (offset, line);
            offset += line.len() + 1;
            entry
        })
        .collect()
}

fn shape_error(
    message: &str,
    source: &str,
    lines: &[(usize, &str)],
    line: &str,
    keyword_at: usize,
) -> CompileError {
    let line_offset = lines
        .iter()
        .find(|(_, candidate)| *candidate == line)
        .map(|(offset, _)| *offset)
        .unwrap_or(0);
    CompileError::Shape(Diagnostic::locate(
        message,
        source,
        line_offset + keyword_at,
    ))
}
