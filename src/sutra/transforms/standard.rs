//! Standard transform definitions
//!
//! Pre-built pipelines. The default ones are static references using
//! `once_cell::sync::Lazy`; [`pipeline`] builds one for non-default options.

use crate::sutra::compiler::CompileOptions;
use crate::sutra::transforms::stages::{
    BoundaryExtraction, CommentStripping, KeywordRewriting, LoopControlValidation,
    SemicolonNormalization, ShapeValidation, StructureValidation,
};
use crate::sutra::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for a text-to-text pipeline
pub type TextTransform = Transform<String, String>;

/// Normalization: String → String
///
/// 1. Boundary extraction
/// 2. Comment stripping
/// 3. Semicolon normalization
///
/// The output is what every validator sees.
pub static NORMALIZATION: Lazy<TextTransform> = Lazy::new(normalization);

/// Full compilation with default options: sutra source → JavaScript
pub static COMPILE: Lazy<TextTransform> = Lazy::new(|| pipeline(&CompileOptions::default()));

fn normalization() -> TextTransform {
    Transform::from_fn(Ok)
        .then(BoundaryExtraction::new())
        .then(CommentStripping::new())
        .then(SemicolonNormalization::new())
}

/// Build the full compilation pipeline for `options`
///
/// 1. Boundary extraction
/// 2. Comment stripping
/// 3. Semicolon normalization
/// 4. Shape validation
/// 5. Structure validation
/// 6. Loop-control validation
/// 7. Keyword rewriting
pub fn pipeline(options: &CompileOptions) -> TextTransform {
    normalization()
        .then(ShapeValidation::new())
        .then(StructureValidation::new())
        .then(LoopControlValidation::with_tracking(options.loop_tracking))
        .then(KeywordRewriting::new())
}
