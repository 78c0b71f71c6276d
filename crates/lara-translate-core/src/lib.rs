//! Lara Translate Core Library
//!
//! This library provides a typed client for the Lara Translate API:
//! - Text translation with memories, glossaries and style options
//! - Asynchronous document translation (upload, register, poll, download)
//! - Glossary and translation-memory listing
//! - HMAC-SHA256 request signing with a pluggable HTTP transport

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod options;
pub mod util;
pub mod validators;

pub use cache::ClientCache;
pub use client::{
    DocumentStatus, GlossaryMatch, HttpRequest, HttpResponse, HttpTransport, LaraClient, ListItem,
    Matches, MemoryMatch, ReqwestTransport, TextResult,
};
pub use config::{
    ClientConfig, Credentials, Lang, OutputFormat, TranslationOptions, TranslationStyle,
    DEFAULT_BASE_URL,
};
pub use error::{Error, Result};

use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// High-level translator that validates inputs, cleans options and drives
/// the API client.
pub struct LaraTranslator {
    client: Arc<LaraClient>,
}

impl LaraTranslator {
    /// Create a translator with default configuration and the production
    /// transport.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a translator with explicit configuration and the production
    /// transport.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Arc::new(LaraClient::connect(credentials, config)?),
        })
    }

    /// Create a translator around an existing client (e.g. one from a
    /// [`ClientCache`], or one with a test transport).
    pub const fn with_client(client: Arc<LaraClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &LaraClient {
        &self.client
    }

    /// Translate text. Validates the input and language codes, cleans the
    /// options, then calls the API.
    pub async fn translate_text(
        &self,
        text: &str,
        source: &Lang,
        target: &Lang,
        options: &TranslationOptions,
    ) -> Result<TextResult> {
        validators::validate_text(text)?;
        validators::validate_languages(&[source, target])?;

        let options = options::process(options);
        debug!(source = %source, target = %target, chars = text.len(), "Translating text");

        self.client
            .translate(text, source, target, &options)
            .await
            .map_err(|e| e.into_context("text translation"))
    }

    /// Translate a document, returning the translated file's bytes.
    /// Validates the document name against the supported extensions before
    /// any network call.
    pub async fn translate_document(
        &self,
        file_bytes: &[u8],
        filename: &str,
        source: &Lang,
        target: &Lang,
        options: &TranslationOptions,
    ) -> Result<Bytes> {
        validators::validate_document_name(filename)?;
        validators::validate_document_bytes(file_bytes)?;
        validators::validate_languages(&[source, target])?;

        let options = options::process(options);
        debug!(filename, source = %source, target = %target, "Translating document");

        self.client
            .translate_document(file_bytes, filename, source, target, &options)
            .await
            .map_err(|e| e.into_context("document translation"))
    }

    /// List the account's glossaries.
    pub async fn list_glossaries(&self) -> Result<Vec<ListItem>> {
        self.client
            .list_glossaries()
            .await
            .map_err(|e| e.into_context("glossaries listing"))
    }

    /// List the account's translation memories.
    pub async fn list_memories(&self) -> Result<Vec<ListItem>> {
        self.client
            .list_memories()
            .await
            .map_err(|e| e.into_context("memories listing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translator_construction() {
        let translator = LaraTranslator::new(Credentials::new("id", "secret"));
        assert!(translator.is_ok());
    }
}
