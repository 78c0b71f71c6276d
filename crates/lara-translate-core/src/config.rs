use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the Lara Translate API
pub const DEFAULT_BASE_URL: &str = "https://api.laratranslate.com";

/// Interval between document status polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Overall wall-clock budget for document polling (15 minutes)
pub const DEFAULT_POLL_BUDGET_SECS: u64 = 15 * 60;

/// Per-request timeout for the production transport
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Maximum text length accepted for translation (DoS protection)
pub const MAX_TEXT_LENGTH: usize = 10_000_000;

/// Maximum number of cached clients
pub const MAX_CLIENT_CACHE_SIZE: u64 = 1000;

/// Language codes following ISO 639-1 with regional variants
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lang(pub String);

impl Lang {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Empty code, which the API treats as "autodetect"
    pub fn auto() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_auto(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Lang {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Lang {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// API credentials. The secret is never logged or serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }

    /// Read credentials from `LARA_ACCESS_KEY_ID` / `LARA_ACCESS_KEY_SECRET`.
    pub fn from_env() -> Result<Self, crate::error::Error> {
        let id = std::env::var("LARA_ACCESS_KEY_ID").map_err(|_| {
            crate::error::Error::ConfigLoad("LARA_ACCESS_KEY_ID not set".to_string())
        })?;
        let secret = std::env::var("LARA_ACCESS_KEY_SECRET").map_err(|_| {
            crate::error::Error::ConfigLoad("LARA_ACCESS_KEY_SECRET not set".to_string())
        })?;
        Ok(Self::new(id, secret))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"<redacted>")
            .finish()
    }
}

/// Translation style accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStyle {
    Faithful,
    Fluid,
    Creative,
}

impl TranslationStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Faithful => "faithful",
            Self::Fluid => "fluid",
            Self::Creative => "creative",
        }
    }
}

/// Output format for translated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
        }
    }
}

/// Optional translation parameters. Absent fields are omitted from the wire
/// request, never sent as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationOptions {
    /// Free-form instructions forwarded to the translation engine
    pub instructions: Option<Vec<String>>,
    /// Translation memory IDs to adapt to
    pub adapt_to: Option<Vec<String>>,
    /// Glossary IDs to apply
    pub glossaries: Option<Vec<String>>,
    pub style: Option<TranslationStyle>,
    pub content_type: Option<String>,
    pub timeout_ms: Option<u64>,
    pub use_cache: Option<bool>,
    /// Cache TTL in seconds
    pub cache_ttl: Option<u64>,
    /// Suppress request tracing on the translation-service API
    pub no_trace: Option<bool>,
    /// Document translation only
    pub output_format: Option<OutputFormat>,
}

// Serde default functions for ClientConfig
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

const fn default_poll_budget_secs() -> u64 {
    DEFAULT_POLL_BUDGET_SECS
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Interval between document status polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Overall document polling budget in seconds
    #[serde(default = "default_poll_budget_secs")]
    pub poll_budget_secs: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_budget_secs: default_poll_budget_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub const fn poll_budget(&self) -> Duration {
        Duration::from_secs(self.poll_budget_secs)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::error::Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| crate::error::Error::ConfigLoad(format!("Failed to parse config: {e}")))
    }

    /// Load from default locations (~/.config/lara-translate/config.toml, ./lara-translate.toml)
    pub fn load() -> Self {
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("lara-translate").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        let local_config = std::path::PathBuf::from("lara-translate.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./lara-translate.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./lara-translate.toml: {}", e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }
}

/// Languages the API accepts, ISO 639-1 codes plus common BCP-47 locales.
/// Kept as a static table so validation works without a network round trip.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("en-GB", "English (United Kingdom)"),
    ("en-US", "English (United States)"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("it-IT", "Italian (Italy)"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nb", "Norwegian Bokmål"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// Document extensions accepted for document translation
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "txt", "html", "htm", "odt", "odp", "ods",
    "xlf", "xliff", "srt",
];

/// Check whether a language code is supported
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Display name for a supported language code, if known
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Check whether a file extension (without dot) is supported
pub fn is_extension_supported(extension: &str) -> bool {
    let normalized = extension.to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&normalized.as_str())
}
