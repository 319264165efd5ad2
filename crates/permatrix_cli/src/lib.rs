//! PERMATRIX CLI support
//!
//! Format resolution, logging setup, and the read-compile-write pipeline
//! behind the `permatrix` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;
pub mod pipeline;

pub use config::{load_format, FormatOverrides};
pub use pipeline::{compile_file, inspect_code, CompileReport};
