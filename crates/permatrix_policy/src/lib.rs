//! PERMATRIX Policy Compiler
//!
//! Decodes compact permission codes and compiles a role-by-resource
//! permission matrix into normalized policy rules.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod compiler;
pub mod diagnostic;
pub mod extract;
pub mod resolver;

pub use builder::build;
pub use compiler::{compile, CompilerOutput, MatrixCompiler};
pub use diagnostic::Diagnostic;
pub use extract::extract;
pub use resolver::{resolve, ActionResolver, Resolution, ResolvedEntry};
