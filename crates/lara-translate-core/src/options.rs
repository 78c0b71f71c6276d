//! Translation option sanitization.
//!
//! Cleans user-supplied options before they reach the client: array options
//! are trimmed and emptied-out entries dropped (with the whole field omitted
//! when nothing survives), scalar and boolean options pass through only when
//! present. Total over the options shape, no error conditions.

use crate::config::TranslationOptions;
use crate::util::clean_string_array;

/// Process raw translation options into a cleaned set.
pub fn process(options: &TranslationOptions) -> TranslationOptions {
    let clean_array = |values: &Option<Vec<String>>| {
        values.as_deref().and_then(|v| {
            let cleaned = clean_string_array(v);
            if cleaned.is_empty() { None } else { Some(cleaned) }
        })
    };

    TranslationOptions {
        adapt_to: clean_array(&options.adapt_to),
        instructions: clean_array(&options.instructions),
        glossaries: clean_array(&options.glossaries),
        style: options.style,
        content_type: options.content_type.clone(),
        timeout_ms: options.timeout_ms,
        output_format: options.output_format,
        use_cache: options.use_cache,
        cache_ttl: options.cache_ttl,
        no_trace: options.no_trace,
    }
}
