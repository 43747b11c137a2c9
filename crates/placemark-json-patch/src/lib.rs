//! Structural diff and patch application for JSON snapshots.
//!
//! The diff engine is the leaf of the reconciliation pipeline: the element
//! model diffs consecutive projections of an element, and the map
//! synchronizer turns the resulting patches into renderer calls.
//!
//! Only the RFC 6902 `add`, `replace` and `remove` operations exist here;
//! there is no `move`, `copy` or `test`.
//!
//! # Example
//!
//! ```
//! use placemark_json_patch::{apply_patch, diff, Patch};
//! use serde_json::json;
//!
//! let prev = json!({"zoom": 3, "style": "s"});
//! let next = json!({"zoom": 5, "style": "s"});
//!
//! let patches = diff(Some(&prev), &next);
//! assert_eq!(patches, vec![Patch::replace("/zoom", json!(5))]);
//!
//! let mut doc = prev.clone();
//! apply_patch(&mut doc, &patches).unwrap();
//! assert_eq!(doc, next);
//! ```

pub mod apply;
pub mod codec;
pub mod diff;
pub mod types;

pub use apply::{apply_op, apply_patch};
pub use codec::{from_json, to_json};
pub use diff::diff;
pub use types::{Patch, PatchError};
