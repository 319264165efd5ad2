//! In-memory permission matrix: resources by roles.

use serde::{Deserialize, Serialize};

/// One resource row of the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    /// Resource identifier
    pub resource: String,
    /// Permission codes, positionally aligned with [`PermissionMatrix::roles`]
    pub cells: Vec<String>,
}

/// The whole input table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionMatrix {
    /// Role identifiers in column order
    pub roles: Vec<String>,
    /// Resource rows in table order
    pub rows: Vec<MatrixRow>,
}

impl PermissionMatrix {
    /// Create an empty matrix over the given roles
    #[must_use]
    pub fn new(roles: Vec<String>) -> Self {
        Self {
            roles,
            rows: Vec::new(),
        }
    }

    /// Append a resource row
    #[must_use]
    pub fn with_row(mut self, resource: impl Into<String>, cells: Vec<String>) -> Self {
        self.push_row(resource, cells);
        self
    }

    /// Append a resource row
    pub fn push_row(&mut self, resource: impl Into<String>, cells: Vec<String>) {
        self.rows.push(MatrixRow {
            resource: resource.into(),
            cells,
        });
    }

    /// Permission code for a row and role column; missing cells read as empty
    #[must_use]
    pub fn cell(&self, row: usize, role: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(role))
            .map_or("", String::as_str)
    }

    /// Number of (resource, role) cells
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.roles.len()
    }

    /// Check if the matrix has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
