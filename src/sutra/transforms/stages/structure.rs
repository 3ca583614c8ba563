//! Structure validation stage
//!
//! Verifies brace balance with a stack of opening-brace offsets. A stray `}` is reported
//! where it stands, as soon as it is seen. Braces still open at the end are reported at the
//! innermost one.

use crate::sutra::diagnostics::Diagnostic;
use crate::sutra::error::CompileError;
use crate::sutra::transforms::Runnable;

/// Structure validation stage
pub struct StructureValidation;

impl StructureValidation {
    pub fn new() -> Self {
        StructureValidation
    }
}

impl Default for StructureValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for StructureValidation {
    fn name(&self) -> &'static str {
        "structure_validation"
    }

    fn run(&self, input: String) -> Result<String, CompileError> {
        validate_structure(&input)?;
        Ok(input)
    }
}

pub fn validate_structure(source: &str) -> Result<(), CompileError> {
    let mut open: Vec<usize> = Vec::new();

    for (offset, ch) in source.char_indices() {
        match ch {
            '{' => open.push(offset),
            '}' => {
                if open.pop().is_none() {
                    return Err(CompileError::Structure(Diagnostic::locate(
                        "unmatched closing brace",
                        source,
                        offset,
                    )));
                }
            }
            _ => {}
        }
    }

    match open.last() {
        Some(&innermost) => Err(CompileError::Structure(Diagnostic::locate(
            "unmatched opening brace",
            source,
            innermost,
        ))),
        None => Ok(()),
    }
}
