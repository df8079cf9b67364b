//! Typed views over an untyped additional-data map.
//!
//! Generated models carry an [`AdditionalData`] map for properties that are
//! not part of their static schema. The helpers here read and write one key
//! (or one nested key) of such a map as a typed optional value:
//!
//! - Reading is total: an absent key *or* a value of the wrong JSON type reads
//!   as `None`.
//! - Writing `Some(v)` stores `v` in its native JSON form (a string stays a
//!   string, a boolean stays a boolean).
//! - Writing `None` removes the key; it never stores `null`.
//! - Nested maps are created on first write and removed once their last key
//!   is removed.
//!
//! Removals use `shift_remove` so the remaining keys keep their insertion
//! order on the wire.

use serde_json::{Map, Value};

/// Insertion-ordered map of property name to untyped JSON value.
pub type AdditionalData = Map<String, Value>;

/// Implemented by models that carry an [`AdditionalData`] map.
pub trait AdditionalDataHolder {
    /// Properties not covered by the model's static schema.
    fn additional_data(&self) -> &AdditionalData;

    /// Mutable access to the same map.
    fn additional_data_mut(&mut self) -> &mut AdditionalData;
}

/// Reads `key` as a string.
pub fn get_str<'a>(data: &'a AdditionalData, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

/// Writes `key` as a string, or removes it for `None`.
pub fn set_str(data: &mut AdditionalData, key: &str, value: Option<String>) {
    match value {
        Some(v) => {
            data.insert(key.to_owned(), Value::String(v));
        }
        None => {
            data.shift_remove(key);
        }
    }
}

/// Reads `key` as a boolean.
pub fn get_bool(data: &AdditionalData, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

/// Writes `key` as a boolean, or removes it for `None`.
pub fn set_bool(data: &mut AdditionalData, key: &str, value: Option<bool>) {
    match value {
        Some(v) => {
            data.insert(key.to_owned(), Value::Bool(v));
        }
        None => {
            data.shift_remove(key);
        }
    }
}

/// Reads `outer` → `inner` as a string.
///
/// Returns `None` if `outer` is absent or not a map, or if `inner` is absent
/// or not a string.
pub fn get_nested_str<'a>(data: &'a AdditionalData, outer: &str, inner: &str) -> Option<&'a str> {
    data.get(outer)?.as_object()?.get(inner)?.as_str()
}

/// Writes `outer` → `inner` as a string, or removes it for `None`.
///
/// On write, an empty `outer` map is created if none exists and sibling keys
/// are preserved. A non-map value already stored under `outer` is left as-is
/// and the write is dropped.
///
/// On removal, `outer` itself is removed once it becomes empty.
pub fn set_nested_str(data: &mut AdditionalData, outer: &str, inner: &str, value: Option<String>) {
    match value {
        Some(v) => {
            let nested = data
                .entry(outer)
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = nested {
                map.insert(inner.to_owned(), Value::String(v));
            }
        }
        None => {
            let emptied = match data.get_mut(outer) {
                Some(Value::Object(map)) => {
                    map.shift_remove(inner);
                    map.is_empty()
                }
                _ => false,
            };
            if emptied {
                data.shift_remove(outer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> AdditionalData {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_get_str_on_wrong_type_reads_as_none() {
        let data = map(json!({ "name": 42, "notes": true, "title": null }));

        assert_eq!(get_str(&data, "name"), None);
        assert_eq!(get_str(&data, "notes"), None);
        assert_eq!(get_str(&data, "title"), None);
        assert_eq!(get_str(&data, "missing"), None);
    }

    #[test]
    fn test_get_bool_on_wrong_type_reads_as_none() {
        let data = map(json!({ "completed": "true", "liked": 1 }));

        assert_eq!(get_bool(&data, "completed"), None);
        assert_eq!(get_bool(&data, "liked"), None);
    }

    #[test]
    fn test_set_none_on_absent_key_is_noop() {
        let mut data = map(json!({ "other": "kept" }));

        set_str(&mut data, "name", None);
        set_bool(&mut data, "completed", None);

        assert_eq!(Value::Object(data), json!({ "other": "kept" }));
    }

    #[test]
    fn test_removal_preserves_order_of_remaining_keys() {
        let mut data = AdditionalData::new();
        set_str(&mut data, "a", Some("1".into()));
        set_str(&mut data, "b", Some("2".into()));
        set_str(&mut data, "c", Some("3".into()));

        set_str(&mut data, "a", None);

        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_nested_write_preserves_siblings() {
        let mut data = map(json!({ "external": { "data": "payload" } }));

        set_nested_str(&mut data, "external", "id", Some("ext-1".into()));

        assert_eq!(
            Value::Object(data),
            json!({ "external": { "data": "payload", "id": "ext-1" } })
        );
    }

    #[test]
    fn test_nested_clear_keeps_map_with_siblings() {
        let mut data = map(json!({ "external": { "data": "payload", "id": "ext-1" } }));

        set_nested_str(&mut data, "external", "id", None);

        assert_eq!(Value::Object(data), json!({ "external": { "data": "payload" } }));
    }

    #[test]
    fn test_nested_clear_removes_emptied_map() {
        let mut data = AdditionalData::new();
        set_nested_str(&mut data, "external", "id", Some("ext-1".into()));

        set_nested_str(&mut data, "external", "id", None);

        assert!(data.is_empty());
    }

    #[test]
    fn test_nested_on_non_map_value_is_ignored() {
        let mut data = map(json!({ "external": "not-a-map" }));

        assert_eq!(get_nested_str(&data, "external", "id"), None);
        set_nested_str(&mut data, "external", "id", Some("ext-1".into()));
        set_nested_str(&mut data, "external", "id", None);

        assert_eq!(Value::Object(data), json!({ "external": "not-a-map" }));
    }

    #[test]
    fn test_nested_clear_without_outer_is_noop() {
        let mut data = AdditionalData::new();

        set_nested_str(&mut data, "external", "id", None);

        assert!(data.is_empty());
    }
}
