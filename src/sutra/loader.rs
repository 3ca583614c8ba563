//! Source loading utilities
//!
//! `SourceLoader` reads sutra source from files or strings and runs transforms on it. The
//! CLI uses it to enforce the file contract (the file exists and carries the source
//! extension) before anything is compiled.
//!
//! # Example
//!
//! ```rust,ignore
//! use sutra::sutra::loader::SourceLoader;
//!
//! let js = SourceLoader::from_path("countdown.skt", "skt")?.compile()?;
//! let js = SourceLoader::from_string("मुद्रय(1)").compile()?;
//! ```

use crate::sutra::compiler::Compiler;
use crate::sutra::error::CompileError;
use crate::sutra::transforms::Transform;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error that can occur when loading and compiling sources
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("File \"{}\" not found.", .0.display())]
    NotFound(PathBuf),

    #[error("File must have .{expected} extension.")]
    Extension { path: PathBuf, expected: String },

    #[error("could not read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Source loader with transform shortcuts
pub struct SourceLoader {
    source: String,
}

impl SourceLoader {
    /// Load from a file path, requiring the file to exist and end in `.<extension>`.
    pub fn from_path<P: AsRef<Path>>(path: P, extension: &str) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            return Err(LoaderError::Extension {
                path: path.to_path_buf(),
                expected: extension.to_string(),
            });
        }

        let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "loaded source");
        Ok(SourceLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        SourceLoader {
            source: source.into(),
        }
    }

    /// Run a custom transform on the source
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Compile with the default options
    pub fn compile(&self) -> Result<String, LoaderError> {
        Ok(crate::sutra::compiler::compile(&self.source)?)
    }

    /// Compile with a configured compiler
    pub fn compile_with(&self, compiler: &Compiler) -> Result<String, LoaderError> {
        Ok(compiler.compile(&self.source)?)
    }

    /// Get the raw source string
    pub fn source(&self) -> &str {
        &self.source
    }
}
