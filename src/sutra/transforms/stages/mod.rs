//! Individual pipeline stages
//!
//! Each stage implements the `Runnable<String, String>` trait. Listed in pipeline order.

pub mod boundary;
pub mod comments;
pub mod semicolons;
pub mod shape;
pub mod structure;
pub mod loop_control;
pub mod rewrite;

pub use boundary::BoundaryExtraction;
pub use comments::CommentStripping;
pub use loop_control::LoopControlValidation;
pub use rewrite::KeywordRewriting;
pub use semicolons::SemicolonNormalization;
pub use shape::ShapeValidation;
pub use structure::StructureValidation;
