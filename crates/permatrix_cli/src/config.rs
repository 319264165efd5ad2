//! Table format resolution: defaults, then a JSON file, then flags.

use permatrix_core::{CoreError, CoreResult, TableFormat};
use std::fs;
use std::path::Path;

/// Command-line overrides applied on top of the file configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOverrides {
    /// Field delimiter
    pub delimiter: Option<char>,
    /// Drop the attributes column
    pub no_attributes: bool,
    /// Resource column label
    pub resource_column: Option<String>,
    /// First role column index
    pub role_offset: Option<usize>,
}

/// Build the effective table format.
///
/// # Errors
///
/// Returns error if the config file cannot be read or parsed, or if the
/// resulting format is invalid
pub fn load_format(config: Option<&Path>, overrides: &FormatOverrides) -> CoreResult<TableFormat> {
    let mut format = match config {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            serde_json::from_str::<TableFormat>(&contents).map_err(|e| {
                CoreError::InvalidFormat {
                    reason: format!("{}: {}", path.display(), e),
                }
            })?
        }
        None => TableFormat::default(),
    };

    if let Some(delimiter) = overrides.delimiter {
        format.delimiter = delimiter;
    }
    if overrides.no_attributes {
        format.include_attributes = false;
    }
    if let Some(column) = &overrides.resource_column {
        format.resource_column.clone_from(column);
    }
    if let Some(offset) = overrides.role_offset {
        format.role_column_offset = offset;
    }

    format.validate()?;
    Ok(format)
}
