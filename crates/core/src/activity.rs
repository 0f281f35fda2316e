//! Activity log vocabulary.
//!
//! Actions are stored verbatim in the `activity_logs` table and must match
//! the CHECK constraint in its migration.

use serde::{Deserialize, Serialize};

/// What a logged action did to its subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
}

impl ActivityAction {
    pub const ALL: [ActivityAction; 3] = [
        ActivityAction::Created,
        ActivityAction::Updated,
        ActivityAction::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Created => "created",
            ActivityAction::Updated => "updated",
            ActivityAction::Deleted => "deleted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_round_trip_through_string_form() {
        for action in ActivityAction::ALL {
            assert_eq!(ActivityAction::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_cased_actions() {
        assert_eq!(ActivityAction::parse("Created"), None);
        assert_eq!(ActivityAction::parse("archived"), None);
    }
}
