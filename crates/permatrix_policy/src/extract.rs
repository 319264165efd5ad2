//! Attribute suffix extraction.
//!
//! A permission code may end with a JSON object, e.g. `CRUD{"region":"eu"}`.
//! Everything from the first `{` onward is the payload; everything before
//! it is the base code handed to the resolver.

use permatrix_core::{AttributeConstraints, AttributeMap, CoreError, CoreResult};

/// Character that opens an attribute payload
pub const PAYLOAD_START: char = '{';

/// Split a raw permission code into its base code and attribute payload.
///
/// # Errors
///
/// Returns [`CoreError::InvalidAttributePayload`] if a payload is present but
/// is not exactly one well-formed JSON object.
pub fn extract(code: &str) -> CoreResult<(&str, AttributeConstraints)> {
    let Some(start) = code.find(PAYLOAD_START) else {
        return Ok((code, AttributeConstraints::None));
    };

    let (base, payload) = code.split_at(start);
    let map: AttributeMap =
        serde_json::from_str(payload).map_err(|e| CoreError::InvalidAttributePayload {
            code: code.to_string(),
            reason: e.to_string(),
        })?;

    Ok((base, AttributeConstraints::from_map(map)))
}
