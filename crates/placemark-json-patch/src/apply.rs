//! Patch application with RFC 6902 semantics for `add`, `replace` and `remove`.

use serde_json::Value;

use placemark_json_pointer::{get_mut, parent};

use crate::types::{Patch, PatchError};

// ── Public API ────────────────────────────────────────────────────────────

/// Applies `patches` to `doc` in order. Stops at the first failing operation.
pub fn apply_patch(doc: &mut Value, patches: &[Patch]) -> Result<(), PatchError> {
    for patch in patches {
        apply_op(doc, patch)?;
    }
    Ok(())
}

/// Applies one operation, returning the value it displaced, if any.
pub fn apply_op(doc: &mut Value, patch: &Patch) -> Result<Option<Value>, PatchError> {
    let path = patch.segments()?;
    match patch {
        Patch::Add { value, .. } => apply_add(doc, &path, value.clone()),
        Patch::Replace { value, .. } => apply_replace(doc, &path, value.clone()),
        Patch::Remove { .. } => apply_remove(doc, &path).map(Some),
    }
}

// ── Individual operation applicators ─────────────────────────────────────

fn container<'a>(doc: &'a mut Value, path: &'a [String]) -> Result<(&'a mut Value, &'a str), PatchError> {
    let (key, _) = path.split_last().ok_or(PatchError::InvalidTarget)?;
    let parent_path = parent(path)?;
    let target = get_mut(doc, parent_path).ok_or(PatchError::NotFound)?;
    Ok((target, key.as_str()))
}

fn parse_index(key: &str) -> Result<usize, PatchError> {
    key.parse().map_err(|_| PatchError::InvalidIndex)
}

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (target, key) = container(doc, path)?;
    match target {
        Value::Object(map) => Ok(map.insert(key.to_string(), value)),
        Value::Array(arr) if key == "-" => {
            arr.push(value);
            Ok(None)
        }
        Value::Array(arr) => {
            let idx = parse_index(key)?;
            if idx > arr.len() {
                return Err(PatchError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(None)
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (target, key) = container(doc, path)?;
    match target {
        Value::Object(map) => {
            let slot = map.get_mut(key).ok_or(PatchError::NotFound)?;
            Ok(Some(std::mem::replace(slot, value)))
        }
        Value::Array(arr) => {
            let idx = parse_index(key)?;
            let slot = arr.get_mut(idx).ok_or(PatchError::NotFound)?;
            Ok(Some(std::mem::replace(slot, value)))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<Value, PatchError> {
    let (target, key) = container(doc, path)?;
    match target {
        // shift_remove keeps the remaining keys in insertion order
        Value::Object(map) => map.shift_remove(key).ok_or(PatchError::NotFound),
        Value::Array(arr) => {
            let idx = parse_index(key)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            Ok(arr.remove(idx))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_into_object_and_array() {
        let mut doc = json!({"a": [1, 3]});
        apply_patch(
            &mut doc,
            &[Patch::add("/b", json!(true)), Patch::add("/a/1", json!(2)), Patch::add("/a/-", json!(4))],
        )
        .unwrap();
        assert_eq!(doc, json!({"a": [1, 2, 3, 4], "b": true}));
    }

    #[test]
    fn replace_requires_existing_target() {
        let mut doc = json!({"a": 1});
        assert_eq!(apply_op(&mut doc, &Patch::replace("/b", json!(2))), Err(PatchError::NotFound));
        assert_eq!(apply_op(&mut doc, &Patch::replace("/a", json!(2))), Ok(Some(json!(1))));
    }

    #[test]
    fn remove_root_is_rejected() {
        let mut doc = json!({});
        assert_eq!(apply_op(&mut doc, &Patch::remove("")), Err(PatchError::InvalidTarget));
    }

    #[test]
    fn remove_past_end_is_not_found() {
        let mut doc = json!([1]);
        assert_eq!(apply_op(&mut doc, &Patch::remove("/1")), Err(PatchError::NotFound));
    }

    #[test]
    fn add_through_scalar_is_invalid_target() {
        let mut doc = json!({"a": 1});
        assert_eq!(apply_op(&mut doc, &Patch::add("/a/b", json!(1))), Err(PatchError::InvalidTarget));
    }

    #[test]
    fn malformed_pointer_is_reported() {
        let mut doc = json!({});
        assert!(matches!(
            apply_op(&mut doc, &Patch::add("a", json!(1))),
            Err(PatchError::InvalidPointer(_))
        ));
    }
}
