//! Transform pipeline infrastructure
//!
//! The compiler is a chain of text-to-text stages. Each stage implements [`Runnable`], and
//! stages are joined with [`Transform::then`] into a single [`Transform`]:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(BoundaryExtraction::new())   // String → String
//!     .then(CommentStripping::new())     // String → String
//!     .then(KeywordRewriting::new());    // String → String
//! ```
//!
//! The compiler checks that each stage's input type matches the previous output type.
//! A stage that fails returns a [`CompileError`] and the remaining stages never run.
//!
//! # Module Organization
//!
//! - [`stages`]: the individual stages, in pipeline order
//! - [`standard`]: pre-built pipelines as `once_cell::sync::Lazy` statics

pub mod stages;
pub mod standard;

use crate::sutra::error::CompileError;

/// Trait for anything that can transform an input to an output
///
/// This is implemented by individual pipeline stages.
/// The `Transform` struct composes multiple `Runnable` implementations.
pub trait Runnable<I, O> {
    /// Name used in logs, lowercase with underscores (e.g. "comment_stripping")
    fn name(&self) -> &'static str;

    /// Execute this stage on the input
    fn run(&self, input: I) -> Result<O, CompileError>;
}

/// A composable transformation pipeline
///
/// `Transform<I, O>` represents a transformation from type `I` to type `O`.
pub struct Transform<I, O> {
    stages: Vec<&'static str>,
    run_fn: Box<dyn Fn(I) -> Result<O, CompileError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, CompileError> + Send + Sync + 'static,
    {
        Transform {
            stages: Vec::new(),
            run_fn: Box::new(f),
        }
    }

    /// Add a stage to this transform, returning a new transform with extended output type
    ///
    /// This chains this transform's output into the next stage's input, creating a new
    /// transform from `I` to `O2`.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        let mut stages = self.stages;
        stages.push(stage.name());
        Transform {
            stages,
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                tracing::trace!(stage = stage.name(), "running stage");
                stage.run(intermediate).inspect_err(|err| {
                    tracing::debug!(stage = stage.name(), kind = err.kind(), "stage failed");
                })
            }),
        }
    }

    /// Names of the stages, in the order they run
    pub fn stage_names(&self) -> &[&'static str] {
        &self.stages
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, CompileError> {
        (self.run_fn)(input)
    }
}
