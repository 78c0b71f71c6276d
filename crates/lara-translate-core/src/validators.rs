//! Fail-fast input validation.
//!
//! All checks here run before any network call and reject bad input with
//! [`Error::Validation`].

use crate::config::{self, Lang, MAX_TEXT_LENGTH};
use crate::error::{Error, Result};
use crate::util::file_extension;

/// Validate text input for translation: non-empty and within the size limit.
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::Validation(
            "Text to translate cannot be empty".to_string(),
        ));
    }

    if text.len() > MAX_TEXT_LENGTH {
        return Err(Error::Validation(format!(
            "Text to translate exceeds maximum length of {MAX_TEXT_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validate a document name: non-empty with a supported extension.
pub fn validate_document_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(
            "Document name cannot be empty".to_string(),
        ));
    }

    let extension = file_extension(name);
    if extension.is_empty() {
        return Err(Error::Validation(format!(
            "The document name '{name}' has no valid extension"
        )));
    }

    if !config::is_extension_supported(&extension) {
        return Err(Error::Validation(format!(
            "The extension '{extension}' is not supported. Check the documentation for supported extensions."
        )));
    }

    Ok(())
}

/// Validate document content: must not be empty.
pub fn validate_document_bytes(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::Validation(
            "Document content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate language codes. Empty codes are allowed (autodetect).
pub fn validate_languages(languages: &[&Lang]) -> Result<()> {
    for language in languages {
        if language.is_auto() {
            continue;
        }

        if !config::is_supported_language(language.as_str()) {
            return Err(Error::Validation(format!(
                "The language '{language}' is not supported. Check the documentation for supported languages."
            )));
        }
    }

    Ok(())
}
