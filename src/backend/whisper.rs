//! Backend A: OCR/whisper-style extraction service.
//!
//! One synchronous round trip: POST the raw file bytes, get the extracted
//! text back. The page selector (human page numbers, 1-based) rides along as
//! a query parameter exactly as the caller wrote it; out-of-range or
//! malformed selectors are the service's to reject.

use crate::backend::TextExtractor;
use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Client for the whisper extraction service.
pub struct WhisperExtractor {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    extracted_text: String,
}

impl WhisperExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.whisper_base_url.clone(),
            api_key: config.whisper_api_key.clone(),
        }
    }
}

#[async_trait]
impl TextExtractor for WhisperExtractor {
    async fn extract_text(
        &self,
        file_path: &Path,
        pages: Option<&str>,
    ) -> Result<String, ExtractError> {
        // Unreadable files surface as a service-client failure, the same
        // bucket as an unreachable endpoint or rejected page selector, so
        // the caller sees one failure shape for the whole whisper call.
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| ExtractError::Whisper {
                detail: format!("failed to read '{}': {e}", file_path.display()),
            })?;

        debug!(
            file = %file_path.display(),
            bytes = bytes.len(),
            pages = pages.unwrap_or("<all>"),
            "submitting document to whisper service"
        );

        let mut request = self
            .client
            .post(format!("{}/api/v2/whisper", self.base_url))
            .header("unstract-key", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream");

        if let Some(selector) = pages {
            request = request.query(&[("pages_to_extract", selector)]);
        }

        let response = request
            .body(bytes)
            .send()
            .await
            .map_err(|e| ExtractError::Whisper {
                detail: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(ExtractError::Whisper {
                detail: format!("service returned {status}: {body}"),
            });
        }

        let parsed: WhisperResponse =
            response.json().await.map_err(|e| ExtractError::Whisper {
                detail: format!("failed to parse service response: {e}"),
            })?;

        debug!(chars = parsed.extracted_text.len(), "whisper extraction complete");
        Ok(parsed.extracted_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_shape_parses() {
        let parsed: WhisperResponse =
            serde_json::from_str(r#"{"extracted_text": "Page 3 text", "status": "ok"}"#).unwrap();
        assert_eq!(parsed.extracted_text, "Page 3 text");
    }

    #[tokio::test]
    async fn unreadable_file_is_a_whisper_error() {
        let config = ExtractionConfig::default();
        let extractor = WhisperExtractor::new(&config);
        let err = extractor
            .extract_text(Path::new("assets/docs/does-not-exist.pdf"), Some("3"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Whisper { .. }));
    }
}
