//! Authenticated HTTP client for the Lara Translate API.
//!
//! All API endpoints are invoked as physical HTTP POSTs carrying an
//! `X-HTTP-Method-Override` header with the semantic verb, a signed
//! `Authorization` header and an `X-Lara-Date` timestamp. Success responses
//! arrive as `{"content": ...}` envelopes whose payload is normalized from
//! snake_case to camelCase before deserialization.
//!
//! Document translation is a six-step flow: request an upload ticket, upload
//! the raw bytes to object storage (unsigned), register the document, poll
//! its status until a terminal state, fetch a download URL, and download the
//! translated bytes (unsigned).

pub mod content;
pub mod multipart;
pub mod signing;
pub mod transport;

pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

use bytes::Bytes;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{ClientConfig, Credentials, Lang, TranslationOptions};
use crate::error::{Error, Result};

const CONTENT_TYPE_JSON: &str = "application/json";
const DEFAULT_DOCUMENT_ERROR: &str = "Unknown document error";

/// Server-side document status observed while polling.
///
/// `Translated` and `Error` are terminal; every other status means the
/// document is still being processed and is treated identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Initialized,
    Analyzing,
    Paused,
    Ready,
    Translating,
    Translated,
    Error,
    /// Forward compatibility: unknown statuses are non-terminal
    #[serde(other)]
    Unknown,
}

impl DocumentStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Translated | Self::Error)
    }
}

/// Document registration / polling response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentState {
    #[serde(default)]
    id: Option<String>,
    status: DocumentStatus,
    #[serde(default)]
    error_reason: Option<String>,
}

/// Presigned upload target: a URL plus the form fields the storage service
/// requires. Consumed exactly once per document translation.
#[derive(Debug, Clone, Deserialize)]
struct UploadTicket {
    url: String,
    fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DownloadTicket {
    url: String,
}

/// A translation-memory match reported alongside a translation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemoryMatch {
    pub memory: String,
    #[serde(default)]
    pub tuid: Option<String>,
    pub language: (String, String),
    pub sentence: String,
    pub translation: String,
    pub score: f64,
}

/// A glossary term match reported alongside a translation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlossaryMatch {
    pub glossary: String,
    pub language: (String, String),
    pub term: String,
    pub translation: String,
}

/// Match lists arrive flat for single-segment requests and nested for
/// multi-segment ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Matches<T> {
    Flat(Vec<T>),
    Nested(Vec<Vec<T>>),
}

/// Result of a text translation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResult {
    pub translation: String,
    pub source_language: String,
    pub content_type: String,
    #[serde(default)]
    pub adapted_to: Option<Vec<String>>,
    #[serde(default)]
    pub glossaries: Option<Vec<String>>,
    #[serde(default)]
    pub adapted_to_matches: Option<Matches<MemoryMatch>>,
    #[serde(default)]
    pub glossaries_matches: Option<Matches<GlossaryMatch>>,
}

/// A glossary or translation memory, as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub name: String,
}

/// Drop null entries from a JSON object body; `None` when nothing remains.
/// Non-object bodies pass through untouched.
fn strip_nulls(body: Value) -> Option<Value> {
    match body {
        Value::Object(map) => {
            let filtered: serde_json::Map<String, Value> =
                map.into_iter().filter(|(_, v)| !v.is_null()).collect();
            if filtered.is_empty() {
                None
            } else {
                Some(Value::Object(filtered))
            }
        }
        other => Some(other),
    }
}

/// Client for the Lara Translate API.
///
/// Owns the credentials and an injected [`HttpTransport`] for its lifetime.
/// Holds no other mutable state, so sharing one client across concurrent
/// translation requests is safe.
pub struct LaraClient {
    credentials: Credentials,
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl LaraClient {
    /// Create a client with default configuration and no transport.
    /// A transport must be set before any API call.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with explicit configuration and no transport.
    pub const fn with_config(credentials: Credentials, config: ClientConfig) -> Self {
        Self {
            credentials,
            config,
            transport: None,
        }
    }

    /// Create a client wired to the production reqwest transport.
    pub fn connect(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        let mut client = Self::with_config(credentials, config);
        client.set_transport(Arc::new(transport));
        Ok(client)
    }

    /// Inject the transport used for all HTTP calls.
    pub fn set_transport(&mut self, transport: Arc<dyn HttpTransport>) {
        self.transport = Some(transport);
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn transport(&self) -> Result<&Arc<dyn HttpTransport>> {
        self.transport.as_ref().ok_or(Error::Configuration)
    }

    /// Make an authenticated request to the API.
    ///
    /// `method` is the semantic verb; the physical request is always a POST
    /// with `X-HTTP-Method-Override`. Returns the normalized `content` value
    /// of the success envelope.
    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        no_trace: bool,
    ) -> Result<Value> {
        let transport = self.transport()?;

        let clean_body = body.and_then(strip_nulls);
        let body_bytes = match &clean_body {
            Some(value) => Some(
                serde_json::to_vec(value)
                    .map_err(|e| Error::InvalidResponse(format!("failed to encode body: {e}")))?,
            ),
            None => None,
        };

        let date = signing::http_date();
        let content_md5 = body_bytes
            .as_deref()
            .map_or_else(String::new, signing::md5_hex);
        let challenge =
            signing::build_challenge(method, path, &content_md5, CONTENT_TYPE_JSON, &date);
        let signature = signing::sign(&self.credentials.access_key_secret, &challenge);

        debug!(method, path, "Sending Lara API request");

        let mut request =
            HttpRequest::new(Method::POST, format!("{}{}", self.config.base_url, path))
                .header("X-HTTP-Method-Override", method)
                .header("X-Lara-Date", &date)
                .header("Content-Type", CONTENT_TYPE_JSON)
                .header(
                    "Authorization",
                    signing::authorization(&self.credentials.access_key_id, &signature),
                );

        if !content_md5.is_empty() {
            request = request.header("Content-MD5", &content_md5);
        }

        if no_trace {
            request = request.header("X-No-Trace", "true");
        }

        if let Some(bytes) = body_bytes {
            request = request.body(bytes);
        }

        let response = transport.send(request).await?;
        Self::parse_response(&response)
    }

    /// Unwrap the `{content: ...}` envelope or map the failure taxonomy.
    fn parse_response(response: &HttpResponse) -> Result<Value> {
        if response.is_success() {
            let envelope: Value = serde_json::from_slice(&response.body)
                .map_err(|e| Error::InvalidResponse(e.to_string()))?;
            let payload = match envelope {
                Value::Object(mut map) => map.remove("content").unwrap_or(Value::Null),
                _ => Value::Null,
            };
            return Ok(content::normalize(payload));
        }

        // Failures: structured bodies carry {error: {type, message}}; anything
        // else (e.g. a 502 from a load balancer) surfaces raw.
        match serde_json::from_slice::<Value>(&response.body) {
            Ok(Value::Object(map)) => {
                let error = map.get("error").cloned().unwrap_or(Value::Null);
                let kind = error
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("UnknownError")
                    .to_string();
                // The error payload is usually {type, message} but can also be
                // a bare string; fall back to the status code otherwise.
                let message = if error.get("message").is_some() || error.is_string() {
                    crate::error::message_from_value(&error)
                } else {
                    format!("HTTP {}", response.status)
                };
                Err(Error::Api { kind, message })
            }
            _ => {
                let body = response.body_text();
                Err(Error::UnknownApi {
                    status: response.status,
                    body: if body.is_empty() {
                        "No response body".to_string()
                    } else {
                        body
                    },
                })
            }
        }
    }

    fn deserialize<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    /// Translate text.
    ///
    /// Options are mapped from their field names to the API's snake_case
    /// parameters; absent options are omitted from the request body.
    pub async fn translate(
        &self,
        text: &str,
        source: &Lang,
        target: &Lang,
        options: &TranslationOptions,
    ) -> Result<TextResult> {
        let body = json!({
            "q": text,
            "source": source.as_str(),
            "target": target.as_str(),
            "content_type": options.content_type,
            "multiline": true,
            "adapt_to": options.adapt_to,
            "glossaries": options.glossaries,
            "instructions": options.instructions,
            "timeout": options.timeout_ms,
            "use_cache": options.use_cache,
            "cache_ttl": options.cache_ttl,
            "style": options.style.map(crate::config::TranslationStyle::as_str),
        });

        let no_trace = options.no_trace.unwrap_or(false);
        let content = self
            .request("POST", "/translate", Some(body), no_trace)
            .await?;
        Self::deserialize(content)
    }

    /// Translate a document, returning the translated file's bytes.
    pub async fn translate_document(
        &self,
        file_bytes: &[u8],
        filename: &str,
        source: &Lang,
        target: &Lang,
        options: &TranslationOptions,
    ) -> Result<Bytes> {
        let no_trace = options.no_trace.unwrap_or(false);

        // Step 1: request a presigned upload ticket
        let ticket: UploadTicket = Self::deserialize(
            self.request(
                "GET",
                "/documents/upload-url",
                Some(json!({ "filename": filename })),
                no_trace,
            )
            .await?,
        )?;

        // Step 2: upload the raw bytes to object storage (unsigned)
        self.upload_to_storage(&ticket, file_bytes, filename).await?;

        // Step 3: register the document
        let document: DocumentState = Self::deserialize(
            self.request(
                "POST",
                "/documents",
                Some(json!({
                    "source": source.as_str(),
                    "target": target.as_str(),
                    "s3key": ticket.fields.get("key"),
                    "adapt_to": options.adapt_to,
                    "glossaries": options.glossaries,
                    "style": options.style.map(crate::config::TranslationStyle::as_str),
                })),
                no_trace,
            )
            .await?,
        )?;

        let document_id = document
            .id
            .ok_or_else(|| Error::InvalidResponse("document registration returned no id".into()))?;
        info!(document_id = %document_id, "Document registered");

        // Steps 4-6: poll until terminal, then download
        self.poll_and_download(&document_id, document.status, document.error_reason, options, no_trace)
            .await
    }

    async fn upload_to_storage(
        &self,
        ticket: &UploadTicket,
        file_bytes: &[u8],
        filename: &str,
    ) -> Result<()> {
        let transport = self.transport()?;
        let boundary = multipart::generate_boundary();
        let body =
            multipart::build_multipart_body(&ticket.fields, "file", file_bytes, filename, &boundary);

        debug!(url = %ticket.url, size = file_bytes.len(), "Uploading document to storage");

        let request = HttpRequest::new(Method::POST, &ticket.url)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body);

        let response = transport.send(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(Error::UnknownApi {
                status: response.status,
                body: response.body_text(),
            })
        }
    }

    /// Bounded polling loop over the document state machine.
    ///
    /// Non-terminal statuses all mean "wait and re-check". `translated`
    /// resolves a download URL and fetches the bytes; `error` fails
    /// immediately; exceeding the wall-clock budget fails with a timeout.
    async fn poll_and_download(
        &self,
        document_id: &str,
        mut status: DocumentStatus,
        mut error_reason: Option<String>,
        options: &TranslationOptions,
        no_trace: bool,
    ) -> Result<Bytes> {
        let budget = self.config.poll_budget();
        let interval = self.config.poll_interval();
        let start = Instant::now();

        while start.elapsed() < budget {
            match status {
                DocumentStatus::Translated => {
                    return self.download_translated(document_id, options, no_trace).await;
                }
                DocumentStatus::Error => {
                    return Err(Error::Document {
                        reason: error_reason
                            .unwrap_or_else(|| DEFAULT_DOCUMENT_ERROR.to_string()),
                    });
                }
                _ => {}
            }

            tokio::time::sleep(interval).await;

            let polled: DocumentState = Self::deserialize(
                self.request("GET", &format!("/documents/{document_id}"), None, no_trace)
                    .await?,
            )?;
            debug!(document_id, status = ?polled.status, "Polled document status");
            status = polled.status;
            error_reason = polled.error_reason;
        }

        Err(Error::Timeout {
            document_id: document_id.to_string(),
            budget_secs: self.config.poll_budget_secs,
        })
    }

    async fn download_translated(
        &self,
        document_id: &str,
        options: &TranslationOptions,
        no_trace: bool,
    ) -> Result<Bytes> {
        // Step 5: resolve the download URL, forwarding the output format
        let ticket: DownloadTicket = Self::deserialize(
            self.request(
                "GET",
                &format!("/documents/{document_id}/download-url"),
                Some(json!({
                    "output_format": options.output_format.map(crate::config::OutputFormat::as_str),
                })),
                no_trace,
            )
            .await?,
        )?;

        // Step 6: fetch the translated bytes from storage (unsigned, binary)
        let transport = self.transport()?;
        let response = transport
            .send(HttpRequest::new(Method::GET, &ticket.url))
            .await?;

        if response.is_success() {
            debug!(document_id, size = response.body.len(), "Downloaded translated document");
            Ok(response.body)
        } else {
            Err(Error::UnknownApi {
                status: response.status,
                body: response.body_text(),
            })
        }
    }

    /// List the account's glossaries.
    pub async fn list_glossaries(&self) -> Result<Vec<ListItem>> {
        let content = self.request("GET", "/glossaries", None, false).await?;
        Self::deserialize(content)
    }

    /// List the account's translation memories.
    pub async fn list_memories(&self) -> Result<Vec<ListItem>> {
        let content = self.request("GET", "/memories", None, false).await?;
        Self::deserialize(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_nulls_removes_absent_fields() {
        let body = json!({"q": "hi", "style": null, "timeout": null});
        assert_eq!(strip_nulls(body), Some(json!({"q": "hi"})));
    }

    #[test]
    fn test_strip_nulls_empty_body_is_none() {
        assert_eq!(strip_nulls(json!({"a": null})), None);
        assert_eq!(strip_nulls(json!({})), None);
    }

    #[test]
    fn test_strip_nulls_preserves_false_and_zero() {
        let body = json!({"use_cache": false, "cache_ttl": 0});
        assert_eq!(
            strip_nulls(body),
            Some(json!({"use_cache": false, "cache_ttl": 0}))
        );
    }

    #[test]
    fn test_document_status_terminality() {
        assert!(DocumentStatus::Translated.is_terminal());
        assert!(DocumentStatus::Error.is_terminal());
        for status in [
            DocumentStatus::Initialized,
            DocumentStatus::Analyzing,
            DocumentStatus::Paused,
            DocumentStatus::Ready,
            DocumentStatus::Translating,
            DocumentStatus::Unknown,
        ] {
            assert!(!status.is_terminal(), "{status:?} must be non-terminal");
        }
    }

    #[test]
    fn test_document_status_parses_wire_values() {
        let state: DocumentState =
            serde_json::from_value(json!({"id": "d1", "status": "translating"})).unwrap();
        assert_eq!(state.status, DocumentStatus::Translating);

        let state: DocumentState =
            serde_json::from_value(json!({"status": "error", "errorReason": "bad file"})).unwrap();
        assert_eq!(state.status, DocumentStatus::Error);
        assert_eq!(state.error_reason.as_deref(), Some("bad file"));

        // Unknown statuses are tolerated as non-terminal
        let state: DocumentState =
            serde_json::from_value(json!({"status": "converting"})).unwrap();
        assert_eq!(state.status, DocumentStatus::Unknown);
    }

    #[test]
    fn test_text_result_from_normalized_payload() {
        let payload = content::normalize(json!({
            "translation": "ciao",
            "source_language": "en",
            "content_type": "text/plain",
            "adapted_to": ["mem1"],
            "adapted_to_matches": [
                {
                    "memory": "mem1",
                    "language": ["en", "it"],
                    "sentence": "hello",
                    "translation": "ciao",
                    "score": 0.98
                }
            ],
        }));
        let result: TextResult = serde_json::from_value(payload).unwrap();
        assert_eq!(result.translation, "ciao");
        assert_eq!(result.source_language, "en");
        assert_eq!(result.adapted_to.as_deref(), Some(&["mem1".to_string()][..]));
        match result.adapted_to_matches {
            Some(Matches::Flat(matches)) => {
                assert_eq!(matches[0].language, ("en".to_string(), "it".to_string()));
            }
            other => panic!("expected flat matches, got {other:?}"),
        }
    }
}
