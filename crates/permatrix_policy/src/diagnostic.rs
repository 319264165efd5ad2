//! Non-fatal findings raised while compiling a matrix.

use permatrix_core::Action;
use serde::{Deserialize, Serialize};

/// Compilation diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An ownership-qualified grant flag; ownership cannot be delegated, so
    /// the grant was dropped
    MeaninglessGrant {
        /// Resource (row)
        resource: String,
        /// Role (column)
        role: String,
        /// Raw permission code
        code: String,
        /// Delegated action that was dropped
        action: Action,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeaninglessGrant {
                resource,
                role,
                code,
                action,
            } => write!(
                f,
                "Meaningless combination in permission code '{}' for resource '{}' and role '{}': \
                 {} cannot be ownership-qualified",
                code, resource, role, action
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_code_resource_role() {
        let diagnostic = Diagnostic::MeaninglessGrant {
            resource: "orders".to_string(),
            role: "manager".to_string(),
            code: "GCO".to_string(),
            action: Action::GrantCreate,
        };
        let s = diagnostic.to_string();
        assert!(s.contains("'GCO'"));
        assert!(s.contains("'orders'"));
        assert!(s.contains("'manager'"));
        assert!(s.contains("GC"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let diagnostic = Diagnostic::MeaninglessGrant {
            resource: "r".to_string(),
            role: "x".to_string(),
            code: "GRO".to_string(),
            action: Action::GrantRead,
        };
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["kind"], "meaningless_grant");
        assert_eq!(value["action"], "GR");
    }
}
