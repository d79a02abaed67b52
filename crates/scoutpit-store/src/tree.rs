//! Path addressing over a JSON tree.
//!
//! Paths are `/`-separated key sequences ("pitScoutingResults/118"); the
//! empty path (or "/") addresses the root. Writing `null` at a path removes
//! the key, matching the hosted store.

use serde_json::{Map, Value};

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// The node at `path`, if present.
pub fn get_at<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = tree;
    for seg in segments(path) {
        node = node.as_object()?.get(seg)?;
    }
    Some(node)
}

/// Replace the subtree at `path` with `value`, creating intermediate
/// objects as needed.
pub fn set_at(tree: &mut Value, path: &str, value: Value) {
    let segs: Vec<&str> = segments(path).collect();
    let Some((last, parents)) = segs.split_last() else {
        *tree = value;
        return;
    };

    let mut node = tree;
    for seg in parents {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(obj) = node else {
            return;
        };
        node = obj.entry(seg.to_string()).or_insert(Value::Null);
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let Value::Object(obj) = node else {
        return;
    };
    if value.is_null() {
        obj.remove(*last);
    } else {
        obj.insert(last.to_string(), value);
    }
}

/// Merge `patch`'s top-level keys into the value at `path`; keys mapped to
/// `null` are removed. A non-object patch degenerates to a plain set.
pub fn merge_at(tree: &mut Value, path: &str, patch: Value) {
    let Value::Object(entries) = patch else {
        set_at(tree, path, patch);
        return;
    };
    for (key, value) in entries {
        let child = if segments(path).next().is_none() {
            key
        } else {
            format!("{}/{key}", path.trim_matches('/'))
        };
        set_at(tree, &child, value);
    }
}
