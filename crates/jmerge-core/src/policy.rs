//! Conflict policies: the pluggable decision function consulted whenever the
//! merge cannot simply recurse.

use crate::decision::{DecisionReason, PolicyAction};
use crate::value::Value;

// ---------------------------------------------------------------------------
// ConflictPolicy trait
// ---------------------------------------------------------------------------

/// Resolves a single decision point during a merge.
///
/// `dst` and `src` are `None` when that side has no entry at `path`. The
/// policy is passed to the engine per call and never stored globally, so
/// any number of merges may run with different policies side by side.
///
/// Any closure with the matching signature is a policy:
///
/// ```
/// use jmerge_core::{json_merge_with, DecisionReason, PolicyAction, Value};
///
/// let keep_dst = |dst: Option<&Value>, src: Option<&Value>, _path: &str, _reason: DecisionReason| {
///     match dst.or(src) {
///         Some(v) => PolicyAction::Add(v.clone()),
///         None => PolicyAction::Delete,
///     }
/// };
/// let report = json_merge_with(Value::from(1), &Value::from(2), &keep_dst);
/// assert_eq!(report.value, Some(Value::from(1)));
/// ```
pub trait ConflictPolicy {
    fn resolve(
        &self,
        dst: Option<&Value>,
        src: Option<&Value>,
        path: &str,
        reason: DecisionReason,
    ) -> PolicyAction;
}

impl<F> ConflictPolicy for F
where
    F: Fn(Option<&Value>, Option<&Value>, &str, DecisionReason) -> PolicyAction,
{
    fn resolve(
        &self,
        dst: Option<&Value>,
        src: Option<&Value>,
        path: &str,
        reason: DecisionReason,
    ) -> PolicyAction {
        self(dst, src, path, reason)
    }
}

// ---------------------------------------------------------------------------
// DefaultPolicy
// ---------------------------------------------------------------------------

/// Source wins on conflicts and scalar leaves, absence in the source deletes,
/// absence in the destination adds, and an explicit empty mapping in the
/// source is a deletion marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPolicy;

impl ConflictPolicy for DefaultPolicy {
    fn resolve(
        &self,
        _dst: Option<&Value>,
        src: Option<&Value>,
        _path: &str,
        reason: DecisionReason,
    ) -> PolicyAction {
        let Some(src) = src else {
            // Only `MissingInSrc` reaches here with no source.
            return PolicyAction::Delete;
        };
        if src.is_empty_mapping() {
            return PolicyAction::Delete;
        }
        match reason {
            DecisionReason::MissingInSrc => PolicyAction::Delete,
            DecisionReason::MissingInDst
            | DecisionReason::TypeConflict
            | DecisionReason::ScalarEncountered
            | DecisionReason::InvalidDst => PolicyAction::Add(src.clone()),
        }
    }
}
