//! Table format configuration shared by the reader and the writer.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Layout of the input matrix and the output policy table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFormat {
    /// Field delimiter for both tables
    pub delimiter: char,
    /// Emit the attributes column in the policy table
    pub include_attributes: bool,
    /// Header label of the resource identifier column
    pub resource_column: String,
    /// Index of the first role column; earlier columns are metadata
    pub role_column_offset: usize,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_attributes: true,
            resource_column: "Tables".to_string(),
            role_column_offset: 3,
        }
    }
}

impl TableFormat {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Toggle the attributes column
    #[must_use]
    pub fn with_attributes(mut self, include: bool) -> Self {
        self.include_attributes = include;
        self
    }

    /// Set the resource column label
    #[must_use]
    pub fn with_resource_column(mut self, column: impl Into<String>) -> Self {
        self.resource_column = column.into();
        self
    }

    /// Set the first role column index
    #[must_use]
    pub fn with_role_offset(mut self, offset: usize) -> Self {
        self.role_column_offset = offset;
        self
    }

    /// Delimiter as a single byte
    ///
    /// # Errors
    ///
    /// Returns error if the delimiter is not a usable ASCII separator
    pub fn delimiter_byte(&self) -> CoreResult<u8> {
        let c = self.delimiter;
        if !c.is_ascii() {
            return Err(CoreError::InvalidFormat {
                reason: format!("delimiter {c:?} is not ASCII"),
            });
        }
        if matches!(c, '"' | '\n' | '\r' | '{' | '}' | '*') || c.is_ascii_alphanumeric() {
            return Err(CoreError::InvalidFormat {
                reason: format!("delimiter {c:?} collides with quoting or permission codes"),
            });
        }
        Ok(c as u8)
    }

    /// Validate the whole configuration
    ///
    /// # Errors
    ///
    /// Returns error if any field is unusable
    pub fn validate(&self) -> CoreResult<()> {
        self.delimiter_byte()?;
        if self.resource_column.trim().is_empty() {
            return Err(CoreError::InvalidFormat {
                reason: "resource column label is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let format = TableFormat::default();
        assert_eq!(format.delimiter, ',');
        assert!(format.include_attributes);
        assert_eq!(format.resource_column, "Tables");
        assert_eq!(format.role_column_offset, 3);
        assert!(format.validate().is_ok());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let format = TableFormat::default().with_delimiter(';');
        assert_eq!(format.delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn test_rejects_bad_delimiters() {
        for c in ['"', '\n', 'C', '{', 'é'] {
            let format = TableFormat::default().with_delimiter(c);
            assert!(
                matches!(format.validate(), Err(CoreError::InvalidFormat { .. })),
                "{c:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_blank_resource_column() {
        let format = TableFormat::default().with_resource_column("  ");
        assert!(format.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let format: TableFormat =
            serde_json::from_str(r#"{"delimiter":";","include_attributes":false}"#).unwrap();
        assert_eq!(format.delimiter, ';');
        assert!(!format.include_attributes);
        assert_eq!(format.resource_column, "Tables");
        assert_eq!(format.role_column_offset, 3);
    }
}
