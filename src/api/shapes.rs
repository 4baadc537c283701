//! Normalization of the backend's inconsistent payload shapes.
//!
//! The same endpoint can answer with a bare array, `{"items": [...]}`,
//! `{"<resource>": [...]}`, or `{"data": {"<resource>": [...]}}` depending
//! on which backend version is deployed. Each probe here applies one fixed
//! priority order so accessors never repeat the checks inline.

use serde_json::Value;

/// Extract a list payload. Shapes are checked in priority order:
/// - a bare array
/// - `{"<resource>": [...]}`
/// - `{"items": [...]}`
/// - `{"data": {"<resource>": [...]}}`
///
/// The resource key must beat `items`: some backend versions return both
/// and only the resource key holds the full records. Anything else
/// normalizes to an empty list.
pub fn list(value: &Value, resource: &str) -> Vec<Value> {
  if let Some(items) = value.as_array() {
    return items.clone();
  }
  if let Some(items) = value.get(resource).and_then(Value::as_array) {
    return items.clone();
  }
  if let Some(items) = value.get("items").and_then(Value::as_array) {
    return items.clone();
  }
  if let Some(items) = value
    .get("data")
    .and_then(|data| data.get(resource))
    .and_then(Value::as_array)
  {
    return items.clone();
  }
  Vec::new()
}

/// Extract a single entity:
/// - `{"<resource>": {...}}`
/// - `{"data": {"<resource>": {...}}}`
/// - the value itself when it is a non-empty object
pub fn entity(value: &Value, resource: &str) -> Option<Value> {
  if let Some(object) = value.get(resource).filter(|v| v.is_object()) {
    return Some(object.clone());
  }
  if let Some(object) = value
    .get("data")
    .and_then(|data| data.get(resource))
    .filter(|v| v.is_object())
  {
    return Some(object.clone());
  }
  match value.as_object() {
    Some(map) if !map.is_empty() => Some(value.clone()),
    _ => None,
  }
}

/// First string found probing `keys` in order, then the bare body itself.
/// The push public key arrives as `{"key": ...}`, `{"publicKey": ...}` or a
/// bare string depending on the backend version.
pub fn string_key(value: &Value, keys: &[&str]) -> Option<String> {
  for key in keys {
    if let Some(s) = value.get(key).and_then(Value::as_str) {
      return Some(s.to_string());
    }
  }
  value.as_str().map(str::to_string)
}

/// First non-negative integer found probing `keys` in order, then the bare
/// body itself. Used for counters such as the blog like count.
pub fn count(value: &Value, keys: &[&str]) -> Option<u64> {
  for key in keys {
    if let Some(n) = value.get(key).and_then(Value::as_u64) {
      return Some(n);
    }
  }
  value.as_u64()
}
