//! Actions and access conditions carried by policy rules.

use serde::{Deserialize, Serialize};

/// A policy action: one of the four base CRUD rights or its delegated
/// ("grant") counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Create records
    #[serde(rename = "C")]
    Create,
    /// Read records
    #[serde(rename = "R")]
    Read,
    /// Update records
    #[serde(rename = "U")]
    Update,
    /// Delete records
    #[serde(rename = "D")]
    Delete,
    /// Delegate the create right
    #[serde(rename = "GC")]
    GrantCreate,
    /// Delegate the read right
    #[serde(rename = "GR")]
    GrantRead,
    /// Delegate the update right
    #[serde(rename = "GU")]
    GrantUpdate,
    /// Delegate the delete right
    #[serde(rename = "GD")]
    GrantDelete,
}

impl Action {
    /// Base actions in emission order
    pub const BASE: [Action; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Literal identifier written to the policy table
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "C",
            Self::Read => "R",
            Self::Update => "U",
            Self::Delete => "D",
            Self::GrantCreate => "GC",
            Self::GrantRead => "GR",
            Self::GrantUpdate => "GU",
            Self::GrantDelete => "GD",
        }
    }

    /// Letter that flags this right inside a permission code
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Create | Self::GrantCreate => 'C',
            Self::Read | Self::GrantRead => 'R',
            Self::Update | Self::GrantUpdate => 'U',
            Self::Delete | Self::GrantDelete => 'D',
        }
    }

    /// Delegated counterpart of a base action (grant actions map to themselves)
    #[must_use]
    pub fn granted(self) -> Self {
        match self {
            Self::Create | Self::GrantCreate => Self::GrantCreate,
            Self::Read | Self::GrantRead => Self::GrantRead,
            Self::Update | Self::GrantUpdate => Self::GrantUpdate,
            Self::Delete | Self::GrantDelete => Self::GrantDelete,
        }
    }

    /// Whether this is a delegated action
    #[must_use]
    pub fn is_grant(self) -> bool {
        matches!(
            self,
            Self::GrantCreate | Self::GrantRead | Self::GrantUpdate | Self::GrantDelete
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate the policy engine evaluates at request time.
///
/// The compiler only selects one; it never evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Unconditional
    None,
    /// Record must be owned by the subject
    CheckOwnership,
    /// Subject must hold a declared relationship to the record
    CheckRelationship,
}

impl Condition {
    /// Literal identifier written to the policy table
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CheckOwnership => "check_ownership",
            Self::CheckRelationship => "check_relationship",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
