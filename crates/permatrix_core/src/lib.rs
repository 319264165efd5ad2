//! PERMATRIX Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Everything the compiler emits is built from these values.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod error;
pub mod format;
pub mod matrix;
pub mod rule;

// Re-exports
pub use action::{Action, Condition};
pub use error::{CellFailure, CoreError, CoreResult};
pub use format::TableFormat;
pub use matrix::{MatrixRow, PermissionMatrix};
pub use rule::{AttributeConstraints, AttributeMap, DEFAULT_DOMAIN, Effect, NO_ATTRIBUTES, PolicyRule};
