//! Structural diff: generate the patches that turn one snapshot into another.
//!
//! Output order is part of the contract: keys of `next` in insertion order
//! (adds, replaces and nested patches), followed by removals of keys that
//! only exist in `prev`. Array removals run from the highest index down.

use serde_json::{Map, Value};

use placemark_json_pointer::append;

use crate::types::Patch;

// ── Public API ────────────────────────────────────────────────────────────

/// Computes the patches that transform `prev` into `next`.
///
/// A missing `prev` is the first snapshot ever observed: a composite `next`
/// is diffed against an empty composite of the same kind, a scalar `next`
/// becomes a single root `replace`.
///
/// Trailing array elements are removed highest index first rather than in
/// ascending key order, so the patches apply cleanly in sequence.
pub fn diff(prev: Option<&Value>, next: &Value) -> Vec<Patch> {
    let mut patches = Vec::new();
    match (prev, next) {
        (Some(prev), _) => diff_at_path(&mut patches, "", prev, next),
        (None, Value::Object(next)) => diff_obj(&mut patches, "", &Map::new(), next),
        (None, Value::Array(next)) => diff_arr(&mut patches, "", &[], next),
        (None, _) => patches.push(Patch::replace("", next.clone())),
    }
    patches
}

// ── Core recursive differ ─────────────────────────────────────────────────

fn diff_at_path(patches: &mut Vec<Patch>, path: &str, prev: &Value, next: &Value) {
    match (prev, next) {
        (Value::Object(p), Value::Object(n)) => diff_obj(patches, path, p, n),
        (Value::Array(p), Value::Array(n)) => diff_arr(patches, path, p, n),
        _ if prev != next => patches.push(Patch::replace(path, next.clone())),
        _ => {}
    }
}

fn diff_obj(patches: &mut Vec<Patch>, path: &str, prev: &Map<String, Value>, next: &Map<String, Value>) {
    for (key, next_val) in next {
        let key_path = append(path, key);
        match prev.get(key) {
            None => patches.push(Patch::add(key_path, next_val.clone())),
            Some(prev_val) => diff_at_path(patches, &key_path, prev_val, next_val),
        }
    }
    for key in prev.keys() {
        if !next.contains_key(key) {
            patches.push(Patch::remove(append(path, key)));
        }
    }
}

fn diff_arr(patches: &mut Vec<Patch>, path: &str, prev: &[Value], next: &[Value]) {
    for (i, next_val) in next.iter().enumerate() {
        let index_path = append(path, &i.to_string());
        match prev.get(i) {
            None => patches.push(Patch::add(index_path, next_val.clone())),
            Some(prev_val) => diff_at_path(patches, &index_path, prev_val, next_val),
        }
    }
    // Highest index first, so each removal leaves the remaining indices valid.
    for i in (next.len()..prev.len()).rev() {
        patches.push(Patch::remove(append(path, &i.to_string())));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
