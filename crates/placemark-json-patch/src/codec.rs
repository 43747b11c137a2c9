//! JSON codec for patch lists.
//!
//! The wire shape is the RFC 6902 one: `[{"op": "replace", "path": "/zoom", "value": 5}]`.

use serde::Deserialize;
use serde_json::Value;

use crate::types::Patch;

/// Serializes patches to a JSON array.
pub fn to_json(patches: &[Patch]) -> Value {
    Value::Array(patches.iter().map(to_json_op).collect())
}

/// Serializes one patch.
pub fn to_json_op(patch: &Patch) -> Value {
    // Patch only holds strings and JSON values, serialization cannot fail.
    serde_json::to_value(patch).unwrap_or(Value::Null)
}

/// Deserializes a JSON array of patches.
pub fn from_json(value: &Value) -> Result<Vec<Patch>, serde_json::Error> {
    Vec::<Patch>::deserialize(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_wire_shape() {
        let patches = vec![
            Patch::replace("/zoom", json!(5)),
            Patch::remove("/bounds"),
        ];
        assert_eq!(
            to_json(&patches),
            json!([
                {"op": "replace", "path": "/zoom", "value": 5},
                {"op": "remove", "path": "/bounds"}
            ])
        );
    }

    #[test]
    fn decodes_wire_shape() {
        let value = json!([{"op": "add", "path": "/a", "value": [1]}]);
        assert_eq!(from_json(&value).unwrap(), vec![Patch::add("/a", json!([1]))]);
    }

    #[test]
    fn rejects_unknown_ops() {
        let value = json!([{"op": "move", "path": "/a", "from": "/b"}]);
        assert!(from_json(&value).is_err());
    }
}
