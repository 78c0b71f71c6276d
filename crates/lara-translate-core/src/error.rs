use thiserror::Error;

/// Unified error type for lara-translate-core
///
/// This enum encompasses all error cases that can occur in the library:
/// - Client configuration (missing transport, bad config files)
/// - API failures (structured and unstructured error responses)
/// - Document translation (server-side errors, polling timeouts)
/// - Input validation (empty text, unsupported extensions/languages)
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// No transport configured before making an API call
    #[error("ConfigurationError: transport not configured; set a transport before making API calls")]
    Configuration,

    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    // ==========================================================================
    // API Errors
    // ==========================================================================
    /// Non-2xx response with a structured `{type, message}` error body
    #[error("{kind}: {message}")]
    Api { kind: String, message: String },

    /// Non-2xx response whose body was not structured JSON
    #[error("ApiError: HTTP {status} - {body}")]
    UnknownApi { status: u16, body: String },

    /// Transport-level failure (connection, TLS, timeout at the socket)
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded as JSON
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    // ==========================================================================
    // Document Translation Errors
    // ==========================================================================
    /// Document reached terminal `error` status server-side
    #[error("DocumentError: {reason}")]
    Document { reason: String },

    /// Polling exceeded the wall-clock budget
    #[error("TimeoutError: document {document_id} translation timed out after {budget_secs} seconds")]
    Timeout { document_id: String, budget_secs: u64 },

    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    // ==========================================================================
    // Context Wrapper
    // ==========================================================================
    /// Any of the above, annotated with the operation that failed
    #[error("Lara API error ({context}): {message}")]
    Context { context: String, message: String },
}

impl Error {
    /// Wrap this error with the context of the operation that produced it,
    /// e.g. `"text translation"` or `"document translation"`.
    pub fn into_context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Extract a human-readable message from an arbitrary JSON error payload.
///
/// Strings are returned as-is, objects yield their `message` property, and
/// anything else falls back to a generic message.
pub fn message_from_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| "Unknown error occurred".to_string(), str::to_owned),
        _ => "Unknown error occurred".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_format() {
        let err = Error::Api {
            kind: "AuthenticationError".to_string(),
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "AuthenticationError: Invalid credentials");
    }

    #[test]
    fn test_unknown_api_error_format() {
        let err = Error::UnknownApi {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "ApiError: HTTP 502 - Bad Gateway");
    }

    #[test]
    fn test_context_wrapping() {
        let err = Error::Api {
            kind: "TranslationError".to_string(),
            message: "boom".to_string(),
        };
        let wrapped = err.into_context("text translation");
        assert_eq!(
            wrapped.to_string(),
            "Lara API error (text translation): TranslationError: boom"
        );
    }

    #[test]
    fn test_message_from_string_value() {
        assert_eq!(message_from_value(&json!("plain failure")), "plain failure");
    }

    #[test]
    fn test_message_from_object_value() {
        assert_eq!(
            message_from_value(&json!({"message": "custom"})),
            "custom"
        );
    }

    #[test]
    fn test_message_from_other_values() {
        assert_eq!(message_from_value(&json!(42)), "Unknown error occurred");
        assert_eq!(message_from_value(&json!(null)), "Unknown error occurred");
        assert_eq!(
            message_from_value(&json!({"code": 1})),
            "Unknown error occurred"
        );
    }
}
