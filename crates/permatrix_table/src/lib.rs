//! PERMATRIX Tables
//!
//! Delimited-file collaborators around the compiler: the permission-matrix
//! reader and the policy-table writer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod reader;
pub mod writer;

pub use reader::MatrixReader;
pub use writer::PolicyWriter;

use permatrix_core::CoreError;

pub(crate) fn table_error(err: csv::Error) -> CoreError {
    CoreError::Table {
        message: err.to_string(),
    }
}
