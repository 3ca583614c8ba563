//! Capture-and-display sessions
//!
//! A playground compiles editor text, runs it in a sandbox with a fresh [`BufferSink`],
//! and turns the outcome into the text shown under the editor: the printed lines, a
//! placeholder when nothing was printed, or the error message.

use crate::sutra::compiler::Compiler;
use crate::sutra::error::CompileError;
use crate::sutra::runtime::{BufferSink, RuntimeError, Sandbox};
use thiserror::Error;

/// Shown when a program ran successfully without printing
pub const NO_OUTPUT: &str = "(no output)";

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub struct Playground<S: Sandbox> {
    compiler: Compiler,
    sandbox: S,
}

impl<S: Sandbox> Playground<S> {
    pub fn new(sandbox: S) -> Self {
        Self::with_compiler(Compiler::default(), sandbox)
    }

    pub fn with_compiler(compiler: Compiler, sandbox: S) -> Self {
        Self { compiler, sandbox }
    }

    /// Compile and execute `source`, returning the lines it printed.
    ///
    /// Lines printed before a runtime failure are discarded with the session.
    pub fn capture(&self, source: &str) -> Result<Vec<String>, PlaygroundError> {
        let program = self.compiler.compile(source)?;
        let mut sink = BufferSink::new();
        self.sandbox.execute(&program, &mut sink)?;
        Ok(sink.into_lines())
    }

    /// Compile and execute `source`, returning display text.
    pub fn run(&self, source: &str) -> String {
        match self.capture(source) {
            Ok(lines) if lines.is_empty() => NO_OUTPUT.to_string(),
            Ok(lines) => lines.join("\n"),
            Err(err) => format!("Error: {}", err),
        }
    }
}
