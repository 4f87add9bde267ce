//! The change recorder: an append-only log of structural decisions.
//!
//! One [`ChangeLog`] is created per merge run and handed back to the caller
//! together with the merged value.

use serde::{Deserialize, Serialize};

use crate::decision::DecisionReason;

/// A single recorded change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Dot-separated path from the root sentinel, e.g. `root.A.0`.
    pub path: String,
    /// The decision point that produced this record.
    pub reason: DecisionReason,
    /// Human-readable detail naming the reason and the values involved.
    pub description: String,
}

/// Ordered log of the changes made during one merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(
        &mut self,
        path: impl Into<String>,
        reason: DecisionReason,
        description: impl Into<String>,
    ) {
        self.records.push(ChangeRecord {
            path: path.into(),
            reason,
            description: description.into(),
        });
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// All records at exactly this path, in recording order.
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ChangeRecord> + 'a {
        self.records.iter().filter(move |r| r.path == path)
    }

    /// Number of records produced for `reason`.
    pub fn count_reason(&self, reason: DecisionReason) -> usize {
        self.records.iter().filter(|r| r.reason == reason).count()
    }

    pub fn into_records(self) -> Vec<ChangeRecord> {
        self.records
    }
}

impl IntoIterator for ChangeLog {
    type Item = ChangeRecord;
    type IntoIter = std::vec::IntoIter<ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log() {
        let log = ChangeLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn records_keep_insertion_order() {
        let mut log = ChangeLog::new();
        log.record("root.b", DecisionReason::MissingInDst, "second key first");
        log.record("root.a", DecisionReason::ScalarEncountered, "then the first");
        let paths: Vec<_> = log.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["root.b", "root.a"]);
    }

    #[test]
    fn path_and_reason_queries() {
        let mut log = ChangeLog::new();
        log.record("root.x", DecisionReason::TypeConflict, "one");
        log.record("root.x", DecisionReason::ScalarEncountered, "two");
        log.record("root.y", DecisionReason::ScalarEncountered, "three");

        assert_eq!(log.for_path("root.x").count(), 2);
        assert_eq!(log.for_path("root.z").count(), 0);
        assert_eq!(log.count_reason(DecisionReason::ScalarEncountered), 2);
        assert_eq!(log.count_reason(DecisionReason::MissingInSrc), 0);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut log = ChangeLog::new();
        log.record("root.k", DecisionReason::MissingInSrc, "gone");
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"path": "root.k", "reason": "missing_in_src", "description": "gone"}
            ])
        );
    }
}
