//! Compile errors
//!
//! All pipeline failures are fail-fast and carry a [`Diagnostic`]. The variant says which
//! kind of check failed; `Display` is the rendered diagnostic, which is the single string
//! callers show to users.

use crate::sutra::diagnostics::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// A located compile-time error raised by one of the pipeline stages
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "diagnostic", rename_all = "kebab-case")]
pub enum CompileError {
    /// Missing or misordered program boundary markers
    #[error("{0}")]
    Boundary(Diagnostic),

    /// Malformed conditional or alternate-branch line
    #[error("{0}")]
    Shape(Diagnostic),

    /// Brace imbalance
    #[error("{0}")]
    Structure(Diagnostic),

    /// `विराम` or `अग्रिम` used outside any loop
    #[error("{0}")]
    LoopControl(Diagnostic),
}

impl CompileError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            CompileError::Boundary(d)
            | CompileError::Shape(d)
            | CompileError::Structure(d)
            | CompileError::LoopControl(d) => d,
        }
    }

    /// Short name of the failing check, as used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Boundary(_) => "boundary",
            CompileError::Shape(_) => "shape",
            CompileError::Structure(_) => "structure",
            CompileError::LoopControl(_) => "loop-control",
        }
    }
}
