use serde_json::{Map, Value};

/// Recursive structural merge of a possibly-partial server profile over the
/// authoritative default shape.
///
/// The default shape decides the key set: keys absent from the server
/// response keep their defaults, keys the server sends that the default does
/// not know are dropped. The result always has exactly the default's keys,
/// fully populated, so no downstream field access can miss.
///
/// Rules per node:
/// - object: recurse key-by-key over the default's keys
/// - sequence: a server-provided sequence (even empty) wins verbatim,
///   anything else keeps the default
/// - leaf: a present, non-null server value wins, else the default
pub fn merge(default_shape: &Value, server: Option<&Value>) -> Value {
    // A null from the server is the same as not sending the field.
    let server = server.filter(|v| !v.is_null());

    match default_shape {
        Value::Object(default_map) => {
            let mut merged = Map::with_capacity(default_map.len());
            for (key, default_value) in default_map {
                let server_value = server.and_then(|s| s.get(key));
                merged.insert(key.clone(), merge(default_value, server_value));
            }
            Value::Object(merged)
        }
        Value::Array(_) => match server {
            Some(Value::Array(items)) => Value::Array(items.clone()),
            _ => default_shape.clone(),
        },
        _ => match server {
            Some(value) => value.clone(),
            None => default_shape.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_keys_outside_the_shape_are_dropped() {
        let shape = json!({"a": "", "b": ""});
        let server = json!({"a": "x", "zzz": "ignored"});
        let merged = merge(&shape, Some(&server));
        assert_eq!(merged, json!({"a": "x", "b": ""}));
    }

    #[test]
    fn null_server_value_keeps_the_default() {
        let shape = json!({"a": "fallback"});
        let server = json!({"a": null});
        assert_eq!(merge(&shape, Some(&server)), json!({"a": "fallback"}));
    }

    #[test]
    fn empty_server_sequence_wins_over_template_default() {
        let shape = json!({"rows": [{"degree": ""}]});
        let server = json!({"rows": []});
        assert_eq!(merge(&shape, Some(&server)), json!({"rows": []}));
    }

    #[test]
    fn non_array_server_value_for_a_sequence_keeps_the_default() {
        let shape = json!({"skills": []});
        let server = json!({"skills": "Go"});
        assert_eq!(merge(&shape, Some(&server)), json!({"skills": []}));
    }

    #[test]
    fn nested_objects_merge_key_by_key() {
        let shape = json!({"socialLinks": {"linkedin": "", "github": "", "twitter": ""}});
        let server = json!({"socialLinks": {"github": "gh"}});
        assert_eq!(
            merge(&shape, Some(&server)),
            json!({"socialLinks": {"linkedin": "", "github": "gh", "twitter": ""}})
        );
    }
}
