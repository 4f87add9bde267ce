use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

// ---------------------------------------------------------------------------
// DecisionReason
// ---------------------------------------------------------------------------

/// Why the merge engine consulted the conflict policy at a given path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// The destination has an entry, the source has none.
    MissingInSrc,
    /// The source has an entry, the destination has none.
    MissingInDst,
    /// The source is a scalar or null, so recursion stops here.
    ScalarEncountered,
    /// The destination is present but not of a mergeable shape.
    ///
    /// Part of the vocabulary offered to policies; the traversal never
    /// produces it.
    InvalidDst,
    /// Source and destination disagree on mapping versus sequence.
    TypeConflict,
}

impl DecisionReason {
    /// Stable label used in change-log descriptions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingInSrc => "missing in src",
            Self::MissingInDst => "missing in dst",
            Self::ScalarEncountered => "scalar in src",
            Self::InvalidDst => "dst not mergeable",
            Self::TypeConflict => "type conflict",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PolicyAction
// ---------------------------------------------------------------------------

/// The disposition a conflict policy returns for one decision point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    /// Keep this value at the path.
    Add(Value),
    /// Omit the path from the merged result.
    Delete,
}

impl PolicyAction {
    /// Returns `true` if the action is `Add`.
    pub fn is_add(&self) -> bool {
        matches!(self, Self::Add(_))
    }

    /// Returns `true` if the action is `Delete`.
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }

    /// The value to keep, or `None` for a deletion.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Add(value) => Some(value),
            Self::Delete => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_labels_are_distinct() {
        let reasons = [
            DecisionReason::MissingInSrc,
            DecisionReason::MissingInDst,
            DecisionReason::ScalarEncountered,
            DecisionReason::InvalidDst,
            DecisionReason::TypeConflict,
        ];
        let labels: std::collections::HashSet<_> = reasons.iter().map(|r| r.as_str()).collect();
        assert_eq!(labels.len(), reasons.len());
    }

    #[test]
    fn reason_serializes_snake_case() {
        let json = serde_json::to_string(&DecisionReason::MissingInDst).unwrap();
        assert_eq!(json, r#""missing_in_dst""#);
    }

    #[test]
    fn action_accessors() {
        let add = PolicyAction::Add(Value::from(1));
        assert!(add.is_add());
        assert_eq!(add.to_string(), "add");
        assert_eq!(add.into_value(), Some(Value::from(1)));

        assert!(PolicyAction::Delete.is_delete());
        assert_eq!(PolicyAction::Delete.to_string(), "delete");
        assert_eq!(PolicyAction::Delete.into_value(), None);
    }
}
