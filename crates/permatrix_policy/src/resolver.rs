//! Action and condition resolution for base permission codes.
//!
//! A base code is a run of flag letters such as `CRO*GU`. For each base
//! action letter (`C`, `R`, `U`, `D`, in that order) the resolver decides
//! whether the right is held directly, under which condition, and whether
//! it may be delegated.
//!
//! Matching is plain substring containment. All precedence lives in the two
//! ordered tables below; the first matching row wins.
//!
//! | Direct qualifier | Condition            |
//! |------------------|----------------------|
//! | `{a}O`           | `check_ownership`    |
//! | `{a}*`           | `check_relationship` |
//! | (none)           | `none`               |
//!
//! | Grant flag | Outcome                                 |
//! |------------|-----------------------------------------|
//! | `G{a}O`    | rejected: ownership cannot be delegated |
//! | `G{a}*`    | grant with `check_relationship`         |
//! | `G{a}`     | grant with `none`                       |
//!
//! A direct qualifier occurrence that is the tail of a grant flag (`GCO`,
//! `GC*`) qualifies the grant, not the direct right.

use permatrix_core::{Action, Condition};
use serde::{Deserialize, Serialize};

/// Prefix letter that marks a delegation flag
pub const GRANT_PREFIX: char = 'G';

/// Qualifier for ownership-scoped rights
pub const OWNERSHIP: char = 'O';

/// Qualifier for relationship-scoped rights
pub const RELATIONSHIP: char = '*';

/// Direct-right qualifiers in precedence order
const DIRECT_QUALIFIERS: [(char, Condition); 2] = [
    (OWNERSHIP, Condition::CheckOwnership),
    (RELATIONSHIP, Condition::CheckRelationship),
];

/// What a grant flag resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrantOutcome {
    /// Flag is not meaningful and yields no entry
    Rejected,
    /// Delegation under the given condition
    Delegate(Condition),
}

/// Grant flags in precedence order; `None` is the bare `G{a}` flag
const GRANT_FLAGS: [(Option<char>, GrantOutcome); 3] = [
    (Some(OWNERSHIP), GrantOutcome::Rejected),
    (
        Some(RELATIONSHIP),
        GrantOutcome::Delegate(Condition::CheckRelationship),
    ),
    (None, GrantOutcome::Delegate(Condition::None)),
];

/// One resolved (action, condition) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    /// Base or delegated action
    pub action: Action,
    /// Condition the engine must check
    pub condition: Condition,
}

impl ResolvedEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(action: Action, condition: Condition) -> Self {
        Self { action, condition }
    }

    /// Whether this entry is a delegation right
    #[must_use]
    pub fn is_grant(&self) -> bool {
        self.action.is_grant()
    }
}

/// Result of resolving one base code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Entries in emission order
    pub entries: Vec<ResolvedEntry>,
    /// Delegated actions dropped because their flag was ownership-qualified
    pub rejected_grants: Vec<Action>,
}

impl Resolution {
    /// Check if nothing was granted and nothing was rejected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.rejected_grants.is_empty()
    }
}

/// Resolver for base permission codes
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionResolver;

impl ActionResolver {
    /// Create a new resolver
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve a base code (attribute payload already removed)
    #[must_use]
    pub fn resolve(&self, base: &str) -> Resolution {
        let mut resolution = Resolution::default();

        for action in Action::BASE {
            let letter = action.letter();
            if !base.contains(letter) {
                continue;
            }

            resolution
                .entries
                .push(ResolvedEntry::new(action, direct_condition(base, letter)));

            match grant_outcome(base, letter) {
                Some(GrantOutcome::Delegate(condition)) => resolution
                    .entries
                    .push(ResolvedEntry::new(action.granted(), condition)),
                Some(GrantOutcome::Rejected) => resolution.rejected_grants.push(action.granted()),
                None => {}
            }
        }

        resolution
    }
}

/// Resolve a base code with the default resolver
#[must_use]
pub fn resolve(base: &str) -> Resolution {
    ActionResolver::new().resolve(base)
}

fn direct_condition(base: &str, letter: char) -> Condition {
    DIRECT_QUALIFIERS
        .iter()
        .find(|(qualifier, _)| has_direct_qualifier(base, letter, *qualifier))
        .map_or(Condition::None, |(_, condition)| *condition)
}

fn has_direct_qualifier(base: &str, letter: char, qualifier: char) -> bool {
    let pattern: String = [letter, qualifier].iter().collect();
    base.match_indices(&pattern)
        .any(|(at, _)| !base[..at].ends_with(GRANT_PREFIX))
}

fn grant_outcome(base: &str, letter: char) -> Option<GrantOutcome> {
    GRANT_FLAGS
        .iter()
        .find(|(qualifier, _)| {
            let mut flag = String::with_capacity(3);
            flag.push(GRANT_PREFIX);
            flag.push(letter);
            if let Some(q) = qualifier {
                flag.push(*q);
            }
            base.contains(&flag)
        })
        .map(|(_, outcome)| *outcome)
}
