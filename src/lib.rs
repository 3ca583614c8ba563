//! # sutra
//!
//! A compiler for sutra, a small keyword language with Sanskrit keywords, to JavaScript.
//!
//! The compiler never builds a syntax tree. Source text goes through a fixed chain of
//! text-to-text stages (see [`sutra::transforms`]) which either hand back runnable
//! JavaScript or stop at the first located error.
//!
//! ```text
//! boundaries -> comments -> semicolons -> shape -> structure -> loop control -> rewrite
//! ```
//!
//! File Layout
//!
//! src/sutra
//!   ├── transforms   The stage trait, the composable Transform and every stage
//!   ├── diagnostics  Offset to line/column conversion and located error rendering
//!   ├── keywords     Keyword table and the token stream used for rewriting
//!   ├── loader       Reading `.skt` files
//!   ├── config       Layered configuration
//!   ├── runtime      Executing generated JavaScript with an explicit output sink
//!   └── playground   Capture-and-display sessions over the runtime

pub mod sutra;

pub use sutra::compiler::{compile, CompileOptions, Compiler, LoopTracking};
pub use sutra::diagnostics::{Diagnostic, Position};
pub use sutra::error::CompileError;
