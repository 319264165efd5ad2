//! Policy tuple construction.

use crate::resolver::ResolvedEntry;
use permatrix_core::{AttributeConstraints, PolicyRule};

/// Build one allow rule per resolved entry of a cell.
///
/// Every rule carries the same attribute value; cloning it only bumps the
/// shared reference count.
#[must_use]
pub fn build(
    role: &str,
    resource: &str,
    entries: &[ResolvedEntry],
    attributes: &AttributeConstraints,
) -> Vec<PolicyRule> {
    entries
        .iter()
        .map(|entry| {
            PolicyRule::allow(
                role,
                resource,
                entry.action,
                entry.condition,
                attributes.clone(),
            )
        })
        .collect()
}
