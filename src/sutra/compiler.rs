//! Compilation entry points
//!
//! [`compile`] runs the default pipeline. [`Compiler`] holds a pipeline built for specific
//! [`CompileOptions`], e.g. the counter-based loop tracking.

use crate::sutra::error::CompileError;
use crate::sutra::transforms::standard::{pipeline, TextTransform, COMPILE};
use serde::{Deserialize, Serialize};

pub use crate::sutra::transforms::stages::loop_control::LoopTracking;

/// Knobs that change how a program is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub loop_tracking: LoopTracking,
}

/// Compile sutra source into JavaScript with the default options.
pub fn compile(source: &str) -> Result<String, CompileError> {
    run_pipeline(&COMPILE, source)
}

/// A compiler bound to one set of options
pub struct Compiler {
    options: CompileOptions,
    transform: TextTransform,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            transform: pipeline(&options),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn compile(&self, source: &str) -> Result<String, CompileError> {
        run_pipeline(&self.transform, source)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

fn run_pipeline(transform: &TextTransform, source: &str) -> Result<String, CompileError> {
    tracing::debug!(bytes = source.len(), "compiling");
    let output = transform.run(source.to_string())?;
    tracing::debug!(bytes = output.len(), "compiled");
    Ok(output)
}
