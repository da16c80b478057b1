//! Configuration for structured-data extraction.
//!
//! Every external collaborator (the OCR service, the layout parser, the chat
//! service) is reached through credentials and endpoints held in one
//! [`ExtractionConfig`], built once at startup and passed to every component.
//! Nothing in the library reads the process environment after construction,
//! so two configs can coexist in one process (e.g. tests against a mock
//! endpoint next to a live config).
//!
//! Missing credentials are not a local error: the field stays empty and the
//! service answers with its own auth failure. This keeps the failure surface
//! identical whether a key is absent, expired, or mistyped.

use crate::backend::BackendKind;
use std::fmt;

/// Default endpoints for the three hosted services.
const WHISPER_BASE_URL: &str = "https://llmwhisperer-api.unstract.com";
const LLAMAPARSE_BASE_URL: &str = "https://api.cloud.llamaindex.ai";
const CHAT_BASE_URL: &str = "https://api.openai.com";
const CHAT_MODEL: &str = "gpt-4o-mini";

/// Process-wide configuration for a pipeline run.
///
/// Built via [`ExtractionConfig::from_env()`] in the binary, or via
/// [`ExtractionConfig::builder()`] by library callers and tests.
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Which text-extraction backend every pipeline uses.
    pub backend: BackendKind,

    /// OCR/whisper service endpoint and key (`unstract-key` header).
    pub whisper_base_url: String,
    pub whisper_api_key: String,

    /// Layout-aware parse service endpoint and key (Bearer auth).
    pub llamaparse_base_url: String,
    pub llamaparse_api_key: String,

    /// Chat-completion service endpoint, key (Bearer auth) and model id.
    pub chat_base_url: String,
    pub chat_api_key: String,
    pub chat_model: String,

    /// Sleep between layout-parse job-status polls, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Whisper,
            whisper_base_url: WHISPER_BASE_URL.to_string(),
            whisper_api_key: String::new(),
            llamaparse_base_url: LLAMAPARSE_BASE_URL.to_string(),
            llamaparse_api_key: String::new(),
            chat_base_url: CHAT_BASE_URL.to_string(),
            chat_api_key: String::new(),
            chat_model: CHAT_MODEL.to_string(),
            poll_interval_ms: 2000,
        }
    }
}

// API keys must not leak into logs; render their presence only.
impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn key(k: &str) -> &'static str {
            if k.is_empty() {
                "<unset>"
            } else {
                "<set>"
            }
        }
        f.debug_struct("ExtractionConfig")
            .field("backend", &self.backend)
            .field("whisper_base_url", &self.whisper_base_url)
            .field("whisper_api_key", &key(&self.whisper_api_key))
            .field("llamaparse_base_url", &self.llamaparse_base_url)
            .field("llamaparse_api_key", &key(&self.llamaparse_api_key))
            .field("chat_base_url", &self.chat_base_url)
            .field("chat_api_key", &key(&self.chat_api_key))
            .field("chat_model", &self.chat_model)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}

impl ExtractionConfig {
    /// Read configuration from the process environment, once, at startup.
    ///
    /// Recognised variables: `LLMWHISPERER_API_KEY`, `LLMWHISPERER_BASE_URL`,
    /// `LLAMA_CLOUD_API_KEY`, `LLAMA_CLOUD_BASE_URL`, `OPENAI_API_KEY`,
    /// `OPENAI_BASE_URL`, `OPENAI_MODEL`. Unset endpoints fall back to the
    /// hosted-service defaults; unset keys stay empty and fail service-side.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: defaults.backend,
            whisper_base_url: std::env::var("LLMWHISPERER_BASE_URL")
                .unwrap_or(defaults.whisper_base_url),
            whisper_api_key: std::env::var("LLMWHISPERER_API_KEY").unwrap_or_default(),
            llamaparse_base_url: std::env::var("LLAMA_CLOUD_BASE_URL")
                .unwrap_or(defaults.llamaparse_base_url),
            llamaparse_api_key: std::env::var("LLAMA_CLOUD_API_KEY").unwrap_or_default(),
            chat_base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.chat_base_url),
            chat_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            chat_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.chat_model),
            poll_interval_ms: defaults.poll_interval_ms,
        }
    }

    /// Create a new builder seeded with defaults.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.config.backend = kind;
        self
    }

    pub fn whisper_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.whisper_base_url = url.into();
        self
    }

    pub fn whisper_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.whisper_api_key = key.into();
        self
    }

    pub fn llamaparse_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.llamaparse_base_url = url.into();
        self
    }

    pub fn llamaparse_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.llamaparse_api_key = key.into();
        self
    }

    pub fn chat_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.chat_base_url = url.into();
        self
    }

    pub fn chat_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.chat_api_key = key.into();
        self
    }

    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.config.chat_model = model.into();
        self
    }

    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms.max(1);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hosted_services() {
        let c = ExtractionConfig::default();
        assert_eq!(c.backend, BackendKind::Whisper);
        assert!(c.whisper_base_url.starts_with("https://"));
        assert!(c.llamaparse_base_url.starts_with("https://"));
        assert!(c.chat_base_url.starts_with("https://"));
        assert!(c.whisper_api_key.is_empty());
    }

    #[test]
    fn builder_overrides_stick() {
        let c = ExtractionConfig::builder()
            .backend(BackendKind::LlamaParse)
            .chat_model("gpt-4o")
            .chat_base_url("http://localhost:8080")
            .poll_interval_ms(0)
            .build();
        assert_eq!(c.backend, BackendKind::LlamaParse);
        assert_eq!(c.chat_model, "gpt-4o");
        assert_eq!(c.chat_base_url, "http://localhost:8080");
        assert_eq!(c.poll_interval_ms, 1);
    }

    #[test]
    fn debug_never_prints_keys() {
        let c = ExtractionConfig::builder()
            .whisper_api_key("secret-key-value")
            .build();
        let rendered = format!("{c:?}");
        assert!(!rendered.contains("secret-key-value"));
        assert!(rendered.contains("<set>"));
    }
}
