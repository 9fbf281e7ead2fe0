use serde_json::{Map, Value};

/// First present key, looked up at the top level and then under `data`.
pub fn lookup<'a>(root: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    let data = root.get("data").and_then(Value::as_object);
    keys.iter()
        .find_map(|key| root.get(*key))
        .or_else(|| data.and_then(|inner| keys.iter().find_map(|key| inner.get(*key))))
        .filter(|value| !value.is_null())
}

/// First string value among `keys`, looked up at the top level and then under `data`.
pub fn lookup_str<'a>(root: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    let data = root.get("data").and_then(Value::as_object);
    std::iter::once(root)
        .chain(data)
        .flat_map(|object| keys.iter().filter_map(move |key| object.get(*key)))
        .find_map(Value::as_str)
}

/// Provider identifiers arrive as strings or numbers.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn lookup_prefers_top_level_then_data() {
        let root = object(json!({"status": "sent", "data": {"status": "queued", "id": 7}}));
        assert_eq!(lookup(&root, &["status"]), Some(&json!("sent")));
        assert_eq!(lookup(&root, &["message_id", "id"]), Some(&json!(7)));
        assert_eq!(lookup(&root, &["missing"]), None);
    }

    #[test]
    fn lookup_skips_null_values() {
        let root = object(json!({"id": null}));
        assert_eq!(lookup(&root, &["id"]), None);
    }

    #[test]
    fn lookup_str_skips_non_string_values() {
        let root = object(json!({"status": 200, "data": {"status": "delivered"}}));
        assert_eq!(lookup_str(&root, &["status"]), Some("delivered"));
        assert_eq!(lookup_str(&root, &["missing"]), None);
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(scalar_to_string(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(scalar_to_string(&json!(42)).as_deref(), Some("42"));
        assert_eq!(scalar_to_string(&json!(true)), None);
    }
}
