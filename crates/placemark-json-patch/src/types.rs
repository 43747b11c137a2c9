//! Core types for patches.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use placemark_json_pointer::{parse_json_pointer, JsonPointerError, Path};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("INVALID_POINTER: {0}")]
    InvalidPointer(#[from] JsonPointerError),
}

// ── Patch ─────────────────────────────────────────────────────────────────

/// One RFC 6902 operation, restricted to `add`, `replace` and `remove`.
///
/// Serializes as `{"op": "...", "path": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Patch {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
}

impl Patch {
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Patch::Add { path: path.into(), value }
    }

    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Patch::Replace { path: path.into(), value }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Patch::Remove { path: path.into() }
    }

    /// Returns the operation name as it appears on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Patch::Add { .. } => "add",
            Patch::Replace { .. } => "replace",
            Patch::Remove { .. } => "remove",
        }
    }

    /// Returns the pointer this operation targets.
    pub fn path(&self) -> &str {
        match self {
            Patch::Add { path, .. } | Patch::Replace { path, .. } | Patch::Remove { path } => path,
        }
    }

    /// Returns the carried value; `remove` carries none.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Patch::Add { value, .. } | Patch::Replace { value, .. } => Some(value),
            Patch::Remove { .. } => None,
        }
    }

    /// Parses the pointer into unescaped components.
    pub fn segments(&self) -> Result<Path, PatchError> {
        Ok(parse_json_pointer(self.path())?)
    }

    /// Returns the first unescaped component of the path, if any.
    ///
    /// `/bounds/0/1` and `/bounds` both yield `bounds`; the root path yields `None`.
    pub fn top_level_key(&self) -> Option<String> {
        self.segments().ok()?.into_iter().next()
    }
}
