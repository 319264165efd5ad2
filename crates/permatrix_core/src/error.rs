//! Core error types for PERMATRIX.

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// A single matrix cell that could not be compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFailure {
    /// Resource (row) the cell belongs to
    pub resource: String,
    /// Role (column) the cell belongs to
    pub role: String,
    /// Underlying cell error
    pub error: Box<CoreError>,
}

impl std::fmt::Display for CellFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} / {}] {}", self.resource, self.role, self.error)
    }
}

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Attribute suffix is present but is not a JSON object
    #[error("Invalid attribute payload in permission code {code:?}: {reason}")]
    InvalidAttributePayload {
        /// Raw permission code
        code: String,
        /// Parser message
        reason: String,
    },

    /// One or more cells failed; nothing was compiled
    #[error("Compile failed: {} invalid cell(s): {}", .failures.len(), join_failures(.failures))]
    CompileFailed {
        /// Every failing cell, in matrix order
        failures: Vec<CellFailure>,
    },

    /// Required column is absent from the input header
    #[error("Missing column: {column}")]
    MissingColumn {
        /// Column label that was looked up
        column: String,
    },

    /// Input row has no resource identifier
    #[error("Missing resource identifier in data row {row}")]
    MissingResource {
        /// 1-based data row number
        row: usize,
    },

    /// Table format configuration is unusable
    #[error("Invalid table format: {reason}")]
    InvalidFormat {
        /// What is wrong with it
        reason: String,
    },

    /// Delimited table could not be read or written
    #[error("Table error: {message}")]
    Table {
        /// Underlying message
        message: String,
    },

    /// Filesystem error
    #[error("IO error: {message}")]
    Io {
        /// Underlying message
        message: String,
    },
}

fn join_failures(failures: &[CellFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::MissingColumn {
            column: "Tables".to_string(),
        };
        assert_eq!(format!("{}", err), "Missing column: Tables");

        let err = CoreError::MissingResource { row: 4 };
        assert_eq!(format!("{}", err), "Missing resource identifier in data row 4");
    }

    #[test]
    fn test_invalid_payload_names_code() {
        let err = CoreError::InvalidAttributePayload {
            code: "CRUD{bad".to_string(),
            reason: "EOF while parsing".to_string(),
        };
        let s = format!("{}", err);
        assert!(s.contains("CRUD{bad"));
        assert!(s.contains("EOF while parsing"));
    }

    #[test]
    fn test_compile_failed_lists_cells() {
        let err = CoreError::CompileFailed {
            failures: vec![
                CellFailure {
                    resource: "orders".to_string(),
                    role: "admin".to_string(),
                    error: Box::new(CoreError::InvalidAttributePayload {
                        code: "R{".to_string(),
                        reason: "eof".to_string(),
                    }),
                },
                CellFailure {
                    resource: "users".to_string(),
                    role: "guest".to_string(),
                    error: Box::new(CoreError::InvalidAttributePayload {
                        code: "C{x".to_string(),
                        reason: "key".to_string(),
                    }),
                },
            ],
        };
        let s = format!("{}", err);
        assert!(s.starts_with("Compile failed: 2 invalid cell(s)"));
        assert!(s.contains("[orders / admin]"));
        assert!(s.contains("[users / guest]"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoreError = io.into();
        assert_eq!(
            err,
            CoreError::Io {
                message: "gone".to_string()
            }
        );
    }
}
