use serde::Serialize;
use serde_json::Value;

/// Error object returned in place of a normalized payload when the model
/// reply cannot be used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelErrorPayload {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Outcome of normalizing one model reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelReply<T> {
    Normalized(T),
    Failed(ModelErrorPayload),
}

impl<T> ModelReply<T> {
    /// Normalize a parsed reply, passing through objects that already carry
    /// an `error` key.
    pub fn from_parsed(value: &Value, normalize: impl FnOnce(&Value) -> T) -> Self {
        match value.get("error") {
            Some(Value::Null) | None => ModelReply::Normalized(normalize(value)),
            Some(error) => ModelReply::Failed(ModelErrorPayload {
                error: match error {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
                raw_response: value
                    .get("raw_response")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
        }
    }

    pub fn unparsable(err: &serde_json::Error, raw_response: &str) -> Self {
        ModelReply::Failed(ModelErrorPayload {
            error: format!("Model response is not valid JSON: {}", err),
            raw_response: Some(raw_response.to_string()),
        })
    }

    pub fn normalized(&self) -> Option<&T> {
        match self {
            ModelReply::Normalized(value) => Some(value),
            ModelReply::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_object_passes_through() {
        let value = json!({"error": "refused", "raw_response": "nope"});
        let reply = ModelReply::from_parsed(&value, |_| 1);

        assert_eq!(
            reply,
            ModelReply::Failed(ModelErrorPayload {
                error: "refused".to_string(),
                raw_response: Some("nope".to_string()),
            })
        );
    }

    #[test]
    fn test_null_error_is_ignored() {
        let value = json!({"error": null});
        let reply = ModelReply::from_parsed(&value, |_| 7);
        assert_eq!(reply.normalized(), Some(&7));
    }

    #[test]
    fn test_unparsable_serializes_with_raw_response() {
        let err = serde_json::from_str::<Value>("not json").unwrap_err();
        let reply: ModelReply<u32> = ModelReply::unparsable(&err, "not json");

        let body = serde_json::to_value(&reply).unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Model response is not valid JSON"));
        assert_eq!(body["raw_response"], "not json");
    }
}
