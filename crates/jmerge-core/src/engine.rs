//! The recursive merge engine.
//!
//! [`Merger`] walks the source tree depth-first against the destination,
//! consulting its [`ConflictPolicy`] whenever it cannot recurse uniformly and
//! recording every such decision in a [`ChangeLog`].
//!
//! # Ownership
//!
//! - Mapping merges take the destination map by value, mutate it, and hand
//!   the same storage back. Callers must not expect the original destination
//!   mapping to survive.
//! - Sequence merges never write to the destination they are handed and
//!   always build a fresh vector. Nested sequences the engine already owns are
//!   consumed element by element instead of being copied.
//!
//! # Preconditions
//!
//! Inputs must be finite trees. The recursion depth equals the tree depth and
//! is not guarded.

use tracing::{debug, trace};

use crate::changes::ChangeLog;
use crate::decision::{DecisionReason, PolicyAction};
use crate::policy::{ConflictPolicy, DefaultPolicy};
use crate::value::{Mapping, Shape, Value};

/// Path segment every change-log path starts with.
pub const ROOT_PATH: &str = "root";

// ---------------------------------------------------------------------------
// MergeReport
// ---------------------------------------------------------------------------

/// The outcome of one merge run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeReport {
    /// The merged tree, or `None` if the policy removed the root itself.
    pub value: Option<Value>,
    /// Every decision made along the way, in traversal order.
    pub changes: ChangeLog,
}

impl MergeReport {
    pub fn into_parts(self) -> (Option<Value>, ChangeLog) {
        (self.value, self.changes)
    }
}

// ---------------------------------------------------------------------------
// Merger
// ---------------------------------------------------------------------------

/// Drives a single merge. Borrows its policy and owns the change log.
pub struct Merger<'p, P: ConflictPolicy + ?Sized> {
    policy: &'p P,
    changes: ChangeLog,
}

impl<'p, P: ConflictPolicy + ?Sized> Merger<'p, P> {
    /// Create a merger with an empty change log.
    pub fn new(policy: &'p P) -> Self {
        Self {
            policy,
            changes: ChangeLog::new(),
        }
    }

    /// Changes recorded so far.
    pub fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    pub fn into_changes(self) -> ChangeLog {
        self.changes
    }

    /// Merge `src` into `dst` at `path`.
    ///
    /// Returns `None` when the path must not exist in the result.
    pub fn merge(&mut self, dst: Value, src: &Value, path: &str) -> Option<Value> {
        match (dst, src) {
            (dst, src) if src.shape() == Shape::Other => {
                let reason = DecisionReason::ScalarEncountered;
                self.changes.record(path, reason, format!("{reason} --> src: {src}"));
                self.decide(Some(&dst), Some(src), path, reason).into_value()
            }
            (Value::Mapping(dst), Value::Mapping(src)) => {
                Some(Value::Mapping(self.merge_map(dst, src, path)))
            }
            (Value::Sequence(dst), Value::Sequence(src)) => {
                Some(Value::Sequence(self.merge_owned_sequence(dst, src, path)))
            }
            (dst, src) => {
                let reason = DecisionReason::TypeConflict;
                self.changes.record(path, reason, format!("{reason} --> src: {src}, dst: {dst}"));
                self.decide(Some(&dst), Some(src), path, reason).into_value()
            }
        }
    }

    /// Merge every key of `src` into `dst`, reusing `dst`'s storage.
    ///
    /// Keys only present in `dst` are left alone and not recorded.
    pub fn merge_map(&mut self, mut dst: Mapping, src: &Mapping, path: &str) -> Mapping {
        trace!(path, keys = src.len(), "merging mapping");
        for (key, src_val) in src {
            let next = format!("{path}.{key}");
            match dst.remove(key) {
                None => {
                    let action = self.decide(None, Some(src_val), &next, DecisionReason::MissingInDst);
                    // Recorded whatever the policy decided, unlike sequences.
                    self.changes.record(
                        next.as_str(),
                        DecisionReason::MissingInDst,
                        format!("{} --> src: {src_val}, dst: absent", DecisionReason::MissingInDst),
                    );
                    if let PolicyAction::Add(value) = action {
                        dst.insert(key.clone(), value);
                    }
                }
                Some(dst_val) => {
                    if let Some(value) = self.merge(dst_val, src_val, &next) {
                        dst.insert(key.clone(), value);
                    }
                }
            }
        }
        dst
    }

    /// Merge two sequences position by position into a new vector.
    ///
    /// Element `i` of `dst` is only ever compared with element `i` of `src`.
    /// `dst` is left untouched.
    pub fn merge_sequence(&mut self, dst: &[Value], src: &[Value], path: &str) -> Vec<Value> {
        self.merge_owned_sequence(dst.to_vec(), src, path)
    }

    /// Positional merge consuming `dst`, so nested elements are moved into
    /// the recursion rather than copied at every level.
    fn merge_owned_sequence(&mut self, dst: Vec<Value>, src: &[Value], path: &str) -> Vec<Value> {
        trace!(path, dst_len = dst.len(), src_len = src.len(), "merging sequence");
        let len = dst.len().max(src.len());
        let mut result = Vec::with_capacity(len);
        let mut dst = dst.into_iter();
        for i in 0..len {
            let next = format!("{path}.{i}");
            match (dst.next(), src.get(i)) {
                (Some(dst_val), Some(src_val)) => {
                    if let Some(value) = self.merge(dst_val, src_val, &next) {
                        result.push(value);
                    }
                }
                (Some(dst_val), None) => {
                    let action = self.decide(Some(&dst_val), None, &next, DecisionReason::MissingInSrc);
                    self.keep_unmatched(action, &dst_val, &next, DecisionReason::MissingInSrc, &mut result);
                }
                (None, Some(src_val)) => {
                    let action = self.decide(None, Some(src_val), &next, DecisionReason::MissingInDst);
                    self.keep_unmatched(action, src_val, &next, DecisionReason::MissingInDst, &mut result);
                }
                (None, None) => {}
            }
        }
        result
    }

    /// Apply and record the action for a sequence element with no counterpart.
    fn keep_unmatched(
        &mut self,
        action: PolicyAction,
        original: &Value,
        path: &str,
        reason: DecisionReason,
        result: &mut Vec<Value>,
    ) {
        match action {
            PolicyAction::Delete => {
                self.changes.record(path, reason, format!("{reason} --> delete: {original}"));
            }
            PolicyAction::Add(value) => {
                self.changes.record(path, reason, format!("{reason} --> add: {value}"));
                result.push(value);
            }
        }
    }

    fn decide(
        &self,
        dst: Option<&Value>,
        src: Option<&Value>,
        path: &str,
        reason: DecisionReason,
    ) -> PolicyAction {
        let action = self.policy.resolve(dst, src, path, reason);
        debug!(path, %reason, %action, "policy decision");
        action
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Merge `src` into `dst` with the [`DefaultPolicy`].
pub fn json_merge(dst: Value, src: &Value) -> MergeReport {
    json_merge_with(dst, src, &DefaultPolicy)
}

/// Merge `src` into `dst`, resolving every decision point with `policy`.
pub fn json_merge_with<P>(dst: Value, src: &Value, policy: &P) -> MergeReport
where
    P: ConflictPolicy + ?Sized,
{
    let mut merger = Merger::new(policy);
    let value = merger.merge(dst, src, ROOT_PATH);
    let changes = merger.into_changes();
    debug!(changes = changes.len(), removed_root = value.is_none(), "merge complete");
    MergeReport { value, changes }
}

/// [`json_merge`] for callers already holding `serde_json` trees.
pub fn merge_json(
    dst: serde_json::Value,
    src: serde_json::Value,
) -> (Option<serde_json::Value>, ChangeLog) {
    let src = Value::from(src);
    let (value, changes) = json_merge(dst.into(), &src).into_parts();
    (value.map(Into::into), changes)
}
