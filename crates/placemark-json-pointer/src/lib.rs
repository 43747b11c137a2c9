//! JSON Pointer (RFC 6901) utilities.
//!
//! Patches emitted by the element model address values with `/`-separated
//! pointers. This crate owns the escaping rules and the navigation helpers
//! shared by the diff engine, the patch applier and the map synchronizer.
//!
//! # Example
//!
//! ```
//! use placemark_json_pointer::{append, format_json_pointer, get, parse_json_pointer};
//!
//! let path = parse_json_pointer("/paint/fill-color").unwrap();
//! assert_eq!(path, vec!["paint".to_string(), "fill-color".to_string()]);
//! assert_eq!(format_json_pointer(&path), "/paint/fill-color");
//!
//! assert_eq!(append("/layout", "a/b"), "/layout/a~1b");
//!
//! let doc = serde_json::json!({"paint": {"fill-color": "red"}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!("red")));
//! ```

use serde_json::Value;
use thiserror::Error;

/// A parsed pointer: one unescaped component per step.
pub type Path = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonPointerError {
    #[error("pointer must be empty or start with '/': {0:?}")]
    Invalid(String),
    #[error("root path has no parent")]
    NoParent,
}

/// Unescapes a pointer component: `~1` becomes `/`, `~0` becomes `~`.
///
/// ```
/// use placemark_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer component: `~` becomes `~0`, `/` becomes `~1`.
///
/// ```
/// use placemark_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("plain"), "plain");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Appends one escaped component to an already formatted pointer.
pub fn append(pointer: &str, component: &str) -> String {
    let escaped = escape_component(component);
    let mut out = String::with_capacity(pointer.len() + escaped.len() + 1);
    out.push_str(pointer);
    out.push('/');
    out.push_str(&escaped);
    out
}

/// Parses a pointer into unescaped components.
///
/// The empty pointer is the root and parses to an empty path.
pub fn parse_json_pointer(pointer: &str) -> Result<Path, JsonPointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    match pointer.strip_prefix('/') {
        Some(rest) => Ok(rest.split('/').map(unescape_component).collect()),
        None => Err(JsonPointerError::Invalid(pointer.to_string())),
    }
}

/// Formats components into a pointer. The root path formats to `""`.
pub fn format_json_pointer(path: &[String]) -> String {
    path.iter()
        .fold(String::new(), |pointer, component| append(&pointer, component))
}

/// Returns the parent of `path`.
pub fn parent(path: &[String]) -> Result<&[String], JsonPointerError> {
    match path.split_last() {
        Some((_, init)) => Ok(init),
        None => Err(JsonPointerError::NoParent),
    }
}

/// Checks whether `index` is a canonical array index (no sign, no leading zero).
pub fn is_valid_index(index: &str) -> bool {
    let bytes = index.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

/// Resolves `path` inside `val`.
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) if is_valid_index(step) => arr.get(step.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(val: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) if is_valid_index(step) => {
                arr.get_mut(step.parse::<usize>().ok()?)?
            }
            Value::Object(map) => map.get_mut(step)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_pointer_is_empty_path() {
        assert_eq!(parse_json_pointer("").unwrap(), Path::new());
        assert_eq!(format_json_pointer(&[]), "");
    }

    #[test]
    fn relative_pointer_is_rejected() {
        assert_eq!(
            parse_json_pointer("zoom"),
            Err(JsonPointerError::Invalid("zoom".into()))
        );
    }

    #[test]
    fn parent_of_root_fails() {
        assert_eq!(parent(&[]), Err(JsonPointerError::NoParent));
        let path = vec!["a".to_string(), "b".to_string()];
        assert_eq!(parent(&path).unwrap(), &["a".to_string()][..]);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut doc = json!({"bounds": [[0, 0], [1, 1]]});
        let path = parse_json_pointer("/bounds/1/0").unwrap();
        *get_mut(&mut doc, &path).unwrap() = json!(5);
        assert_eq!(doc, json!({"bounds": [[0, 0], [5, 1]]}));
    }

    #[test]
    fn non_canonical_index_does_not_resolve() {
        let doc = json!([10, 20]);
        assert_eq!(get(&doc, &["01".to_string()]), None);
        assert_eq!(get(&doc, &["-".to_string()]), None);
        assert_eq!(get(&doc, &["1".to_string()]), Some(&json!(20)));
    }
}
