//! Response payload normalization.
//!
//! The API responds with snake_case keys; normalized payloads use camelCase
//! (`source_language` becomes `sourceLanguage`) so result field names stay
//! stable for callers. The transform is total over any JSON value.

use serde_json::Value;

/// Rewrite a snake_case key to camelCase: every `_x` sequence with a
/// lowercase letter becomes uppercase `X`. Other underscores are kept.
pub fn camel_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_'
            && let Some(&next) = chars.peek()
            && next.is_ascii_lowercase()
        {
            result.push(next.to_ascii_uppercase());
            chars.next();
        } else {
            result.push(c);
        }
    }

    result
}

/// Recursively normalize a JSON value: objects get camelCase keys, arrays map
/// element-wise, scalars and null pass through unchanged.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (camel_key(&key), normalize(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_key() {
        assert_eq!(camel_key("source_language"), "sourceLanguage");
        assert_eq!(camel_key("adapted_to_matches"), "adaptedToMatches");
        assert_eq!(camel_key("already"), "already");
        assert_eq!(camel_key("alreadyCamel"), "alreadyCamel");
        // Underscore not followed by a lowercase letter is preserved
        assert_eq!(camel_key("trailing_"), "trailing_");
        assert_eq!(camel_key("_leading"), "Leading");
    }

    #[test]
    fn test_normalize_flat_object() {
        let normalized = normalize(json!({
            "source_language": "en",
            "content_type": "text/plain",
            "translation": "ciao",
        }));
        assert_eq!(
            normalized,
            json!({
                "sourceLanguage": "en",
                "contentType": "text/plain",
                "translation": "ciao",
            })
        );
    }

    #[test]
    fn test_normalize_nested_structures() {
        let normalized = normalize(json!({
            "adapted_to_matches": [
                {"memory_id": "m1", "match_score": 0.9},
                {"memory_id": "m2", "match_score": 0.7},
            ],
            "nested": {"inner_list": [{"deep_key": null}]},
        }));
        assert_eq!(
            normalized,
            json!({
                "adaptedToMatches": [
                    {"memoryId": "m1", "matchScore": 0.9},
                    {"memoryId": "m2", "matchScore": 0.7},
                ],
                "nested": {"innerList": [{"deepKey": null}]},
            })
        );
    }

    #[test]
    fn test_normalize_preserves_scalars_and_order() {
        assert_eq!(normalize(json!("text")), json!("text"));
        assert_eq!(normalize(json!(42)), json!(42));
        assert_eq!(normalize(json!(true)), json!(true));
        assert_eq!(normalize(json!(null)), json!(null));
        assert_eq!(normalize(json!([3, 1, 2])), json!([3, 1, 2]));
    }

    #[test]
    fn test_normalize_is_idempotent_on_camel_case() {
        let value = json!({"sourceLanguage": "en", "items": [{"aKey": 1}]});
        assert_eq!(normalize(value.clone()), value);
    }
}
