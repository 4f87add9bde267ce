//! Policy-driven merge engine for JSON-like trees.
//!
//! Reconciles a destination tree with a source tree under a caller-supplied
//! conflict policy, returning the merged tree together with a log of every
//! structural decision made along the way.
//!
//! # Key Types
//!
//! - [`Value`] / [`Shape`] -- Tree model and its structural classifier
//! - [`DecisionReason`] / [`PolicyAction`] -- Why a policy was consulted and what it decided
//! - [`ConflictPolicy`] / [`DefaultPolicy`] -- Pluggable decision function and the reference one
//! - [`ChangeLog`] / [`ChangeRecord`] -- Path-keyed record of applied changes
//! - [`Merger`] / [`MergeReport`] -- The recursive engine and its outcome
//!
//! # Example
//!
//! ```
//! use jmerge_core::{json_merge, Value};
//!
//! let dst = Value::from_json_str(r#"{"A": {"a1": 0}, "b": "b"}"#).unwrap();
//! let src = Value::from_json_str(r#"{"A": {"a1": "a1", "a3": "a3"}, "c": "c"}"#).unwrap();
//!
//! let report = json_merge(dst, &src);
//! let merged = report.value.unwrap();
//! assert_eq!(
//!     merged.to_json_string(false).unwrap(),
//!     r#"{"A":{"a1":"a1","a3":"a3"},"b":"b","c":"c"}"#
//! );
//! assert_eq!(report.changes.len(), 3);
//! ```

pub mod changes;
pub mod decision;
pub mod engine;
pub mod error;
pub mod policy;
pub mod value;

pub use changes::{ChangeLog, ChangeRecord};
pub use decision::{DecisionReason, PolicyAction};
pub use engine::{json_merge, json_merge_with, merge_json, MergeReport, Merger, ROOT_PATH};
pub use error::{MergeError, MergeResult};
pub use policy::{ConflictPolicy, DefaultPolicy};
pub use value::{Mapping, Scalar, Shape, Value};
