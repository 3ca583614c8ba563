//! Main module for sutra library functionality

pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod keywords;
pub mod loader;
pub mod playground;
pub mod runtime;
pub mod transforms;
