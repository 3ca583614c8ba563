//! Executing compiled programs
//!
//! The compiler never runs anything. Callers hand its output to a [`Sandbox`] together with
//! an [`OutputSink`] that receives every printed line. The sink is an explicit argument, so
//! capturing output never swaps anything global and there is nothing to restore when a
//! program fails.
//!
//! [`NodeSandbox`] runs programs with `node` inside a fresh `vm` context whose only global
//! is `console.log`.

use crate::sutra::config::RuntimeConfig;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Reads the program from stdin and evaluates it in an isolated context.
const SANDBOX_PRELUDE: &str = r#"
const vm = require('vm');
let program = '';
process.stdin.setEncoding('utf8');
process.stdin.on('data', (chunk) => { program += chunk; });
process.stdin.on('end', () => {
  const context = { console: { log: (...args) => console.log(...args) } };
  vm.createContext(context);
  try {
    vm.runInContext(program, context);
  } catch (error) {
    const message = error && error.message !== undefined ? error.message : String(error);
    process.stderr.write(message);
    process.exitCode = 1;
  }
});
"#;

/// Errors raised while executing a compiled program
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("could not start {runtime}: {source}")]
    Spawn {
        runtime: String,
        #[source]
        source: io::Error,
    },

    #[error("lost contact with the JavaScript runtime: {0}")]
    Io(#[from] io::Error),

    /// The program itself threw; holds the thrown message
    #[error("{0}")]
    Script(String),
}

/// Receives each line a program prints
pub trait OutputSink {
    fn emit(&mut self, line: &str);
}

/// Prints lines to standard output as they arrive
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Collects lines in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for BufferSink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Something that can execute generated JavaScript
pub trait Sandbox {
    fn execute(&self, program: &str, sink: &mut dyn OutputSink) -> Result<(), RuntimeError>;
}

/// Executes programs with a `node` binary
#[derive(Debug, Clone)]
pub struct NodeSandbox {
    node: String,
}

impl NodeSandbox {
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.node.clone())
    }

    pub fn node(&self) -> &str {
        &self.node
    }
}

impl Default for NodeSandbox {
    fn default() -> Self {
        Self::new("node")
    }
}

impl Sandbox for NodeSandbox {
    fn execute(&self, program: &str, sink: &mut dyn OutputSink) -> Result<(), RuntimeError> {
        tracing::debug!(runtime = %self.node, bytes = program.len(), "executing program");

        let mut child = Command::new(&self.node)
            .arg("-e")
            .arg(SANDBOX_PRELUDE)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RuntimeError::Spawn {
                runtime: self.node.clone(),
                source,
            })?;

        // Closing stdin tells the prelude the whole program has arrived
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(program.as_bytes()) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(err.into());
            }
        }

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                sink.emit(&line?);
            }
        }

        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            pipe.read_to_string(&mut stderr)?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            let message = stderr.trim();
            tracing::debug!(%status, "program failed");
            Err(RuntimeError::Script(if message.is_empty() {
                format!("{} exited with {}", self.node, status)
            } else {
                message.to_string()
            }))
        }
    }
}
