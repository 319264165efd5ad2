//! Policy rules: the normalized output tuples of the compiler.

use crate::action::{Action, Condition};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Tenant-scope marker written into every rule's domain field
pub const DEFAULT_DOMAIN: &str = "0";

/// Literal used for an absent attribute payload
pub const NO_ATTRIBUTES: &str = "none";

/// Ordered attribute name to expected value mapping
pub type AttributeMap = IndexMap<String, serde_json::Value>;

/// Attribute constraints attached to every rule compiled from one cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributeConstraints {
    /// No payload was given
    #[default]
    None,
    /// Parsed payload, shared between the rules of a cell
    Map(Arc<AttributeMap>),
}

impl AttributeConstraints {
    /// Wrap a parsed attribute map
    #[must_use]
    pub fn from_map(map: AttributeMap) -> Self {
        Self::Map(Arc::new(map))
    }

    /// Check if no payload is attached
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Borrow the attribute map, if any
    #[must_use]
    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            Self::None => None,
            Self::Map(map) => Some(&**map),
        }
    }
}

impl std::fmt::Display for AttributeConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str(NO_ATTRIBUTES),
            Self::Map(map) => {
                let json = serde_json::to_string(&**map).map_err(|_| std::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for AttributeConstraints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_str(NO_ATTRIBUTES),
            Self::Map(map) => (**map).serialize(serializer),
        }
    }
}

/// Rule effect. Matrix cells only ever grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Permit the request
    #[default]
    Allow,
}

impl Effect {
    /// Literal identifier written to the policy table
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized policy tuple consumed by a policy-evaluation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRule {
    /// Role identifier
    pub subject: String,
    /// Tenant scope, always [`DEFAULT_DOMAIN`]
    pub domain: &'static str,
    /// Resource identifier
    pub object: String,
    /// Granted action
    pub action: Action,
    /// Request-time predicate
    pub condition: Condition,
    /// Attribute constraints shared by the originating cell
    pub attributes: AttributeConstraints,
    /// Always [`Effect::Allow`]
    pub effect: Effect,
}

impl PolicyRule {
    /// Create an allow rule in the default domain
    #[must_use]
    pub fn allow(
        subject: impl Into<String>,
        object: impl Into<String>,
        action: Action,
        condition: Condition,
        attributes: AttributeConstraints,
    ) -> Self {
        Self {
            subject: subject.into(),
            domain: DEFAULT_DOMAIN,
            object: object.into(),
            action,
            condition,
            attributes,
            effect: Effect::Allow,
        }
    }
}
