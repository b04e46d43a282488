//! Attribute flattening for line-oriented output
//!
//! Expands nested values into `parent.child` keys:
//! - strings holding a JSON object are decoded and expanded
//! - maps (and serialized records) expand one pair per entry, recursively
//! - everything else stays a single pair
//!
//! Leaves are stringified; `null` stays an explicit [`FieldValue::Null`].

use super::value::{Attr, FieldValue};

/// Separator between a parent key and its child keys
pub const KEY_SEPARATOR: &str = ".";

/// Flatten one attribute value under `key`
///
/// ```
/// use logfacade::core::flatten;
/// use logfacade::FieldValue;
///
/// let flat = flatten("body", &FieldValue::from(r#"{"user":"alice","age":30}"#));
/// let pairs: Vec<(String, String)> = flat.into_iter().map(|a| (a.key, a.value.to_string())).collect();
/// assert_eq!(pairs, vec![
///     ("body.user".to_string(), "alice".to_string()),
///     ("body.age".to_string(), "30".to_string()),
/// ]);
/// ```
pub fn flatten(key: &str, value: &FieldValue) -> Vec<Attr> {
    let mut out = Vec::new();
    flatten_into(key, value, &mut out);
    out
}

/// Like [`flatten`], appending to an existing buffer
pub fn flatten_into(key: &str, value: &FieldValue, out: &mut Vec<Attr>) {
    match value {
        FieldValue::String(s) => match parse_json_object(s) {
            Some(entries) => flatten_entries(key, &entries, out),
            None => out.push(Attr::new(key, s.as_str())),
        },
        FieldValue::Map(entries) => flatten_entries(key, entries, out),
        other => out.push(leaf(key, other)),
    }
}

fn flatten_entries(key: &str, entries: &[(String, FieldValue)], out: &mut Vec<Attr>) {
    for (sub_key, value) in entries {
        let child = join_key(key, sub_key);
        match value {
            FieldValue::Map(nested) => flatten_entries(&child, nested, out),
            other => out.push(leaf(&child, other)),
        }
    }
}

fn leaf(key: &str, value: &FieldValue) -> Attr {
    match value {
        FieldValue::Null => Attr::new(key, FieldValue::Null),
        other => Attr::new(key, other.to_string()),
    }
}

/// Join a parent and child key; an empty parent yields the child unchanged
pub fn join_key(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        return child.to_string();
    }
    let mut key = String::with_capacity(parent.len() + KEY_SEPARATOR.len() + child.len());
    key.push_str(parent);
    key.push_str(KEY_SEPARATOR);
    key.push_str(child);
    key
}

fn parse_json_object(s: &str) -> Option<Vec<(String, FieldValue)>> {
    if !s.trim_start().starts_with('{') {
        return None;
    }
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(s).ok()?;
    Some(map.into_iter().map(|(k, v)| (k, v.into())).collect())
}
