//! Delimited permission-matrix reader.

use crate::table_error;
use permatrix_core::{CoreError, CoreResult, PermissionMatrix, TableFormat};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Reads a permission matrix from a delimited table.
///
/// The header row names the columns. Columns before
/// [`TableFormat::role_column_offset`] are metadata; one of them, labelled
/// [`TableFormat::resource_column`], holds the resource identifier. Every
/// later column is a role, keyed by its trimmed header.
#[derive(Debug, Clone, Default)]
pub struct MatrixReader {
    format: TableFormat,
}

impl MatrixReader {
    /// Create a reader for the given format
    #[must_use]
    pub fn new(format: TableFormat) -> Self {
        Self { format }
    }

    /// Table format in use
    #[must_use]
    pub fn format(&self) -> &TableFormat {
        &self.format
    }

    /// Read a matrix from a file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or is not a valid matrix
    pub fn read_path(&self, path: impl AsRef<Path>) -> CoreResult<PermissionMatrix> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading permission matrix");
        let file = File::open(path)?;
        self.read(file)
    }

    /// Read a matrix from any byte source
    ///
    /// # Errors
    ///
    /// Returns error if the format is invalid, the resource column is
    /// missing, a row lacks a resource identifier, or the input is not
    /// well-formed delimited text
    pub fn read<R: Read>(&self, input: R) -> CoreResult<PermissionMatrix> {
        self.format.validate()?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.format.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers().map_err(table_error)?.clone();
        let wanted = self.format.resource_column.trim();
        let resource_idx = headers
            .iter()
            .position(|h| h.trim() == wanted)
            .ok_or_else(|| CoreError::MissingColumn {
                column: self.format.resource_column.clone(),
            })?;

        let role_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .skip(self.format.role_column_offset)
            .filter(|(idx, _)| *idx != resource_idx)
            .map(|(idx, h)| (idx, h.trim().to_string()))
            .collect();

        let mut matrix =
            PermissionMatrix::new(role_columns.iter().map(|(_, role)| role.clone()).collect());

        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(table_error)?;
            let resource = record.get(resource_idx).unwrap_or_default();
            if resource.trim().is_empty() {
                return Err(CoreError::MissingResource { row: row_idx + 1 });
            }

            let cells = role_columns
                .iter()
                .map(|(idx, _)| record.get(*idx).unwrap_or_default().trim().to_string())
                .collect();
            matrix.push_row(resource, cells);
        }

        info!(
            resources = matrix.rows.len(),
            roles = matrix.roles.len(),
            "permission matrix loaded"
        );
        Ok(matrix)
    }
}
