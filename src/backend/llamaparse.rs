//! Backend B: layout-aware parse service.
//!
//! Three round trips instead of one: upload the file as a parse job
//! configured for markdown output and the requested pages (0-based), poll the
//! job status until it reaches a terminal state, then fetch the JSON result
//! and concatenate the text of every returned page fragment. The service may
//! split one input file into several fragments; the order it returns them in
//! is trusted to be document order.
//!
//! There is no poll deadline. A job that never leaves `PENDING` blocks the
//! run, matching the blocking-round-trip model of the rest of the program.

use crate::backend::TextExtractor;
use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Client for the layout-aware parse service.
pub struct LlamaParseExtractor {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
}

#[derive(Debug, Deserialize)]
struct ParseJob {
    id: String,
    status: JobStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum JobStatus {
    Pending,
    Success,
    Error,
    Canceled,
}

#[derive(Debug, Deserialize)]
struct ParseResult {
    pages: Vec<PageFragment>,
}

#[derive(Debug, Deserialize)]
struct PageFragment {
    md: String,
}

impl LlamaParseExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.llamaparse_base_url.clone(),
            api_key: config.llamaparse_api_key.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    async fn upload(&self, file_path: &Path, pages: Option<&str>) -> Result<ParseJob, ExtractError> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| ExtractError::Io {
                path: file_path.to_path_buf(),
                source: e,
            })?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        let file_part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(|e| ExtractError::LlamaParse {
                detail: format!("invalid mime type: {e}"),
            })?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("result_type", "markdown");
        if let Some(selector) = pages {
            // 0-based page numbers, passed through verbatim.
            form = form.text("target_pages", selector.to_string());
        }

        let response = self
            .client
            .post(format!("{}/api/parsing/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractError::LlamaParse {
                detail: format!("upload request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(ExtractError::LlamaParse {
                detail: format!("upload returned {status}: {body}"),
            });
        }

        response.json().await.map_err(|e| ExtractError::LlamaParse {
            detail: format!("failed to parse upload response: {e}"),
        })
    }

    async fn wait_for_completion(&self, job_id: &str) -> Result<(), ExtractError> {
        loop {
            let response = self
                .client
                .get(format!("{}/api/parsing/job/{}", self.base_url, job_id))
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(|e| ExtractError::LlamaParse {
                    detail: format!("status request failed: {e}"),
                })?;

            let job: ParseJob = response.json().await.map_err(|e| ExtractError::LlamaParse {
                detail: format!("failed to parse status response: {e}"),
            })?;

            match job.status {
                JobStatus::Success => return Ok(()),
                JobStatus::Error | JobStatus::Canceled => {
                    return Err(ExtractError::LlamaParse {
                        detail: format!("job {} ended with status {:?}", job.id, job.status),
                    });
                }
                JobStatus::Pending => {
                    debug!(job = %job.id, "parse job still pending");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    async fn fetch_result(&self, job_id: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(format!(
                "{}/api/parsing/job/{}/result/json",
                self.base_url, job_id
            ))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ExtractError::LlamaParse {
                detail: format!("result request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(ExtractError::LlamaParse {
                detail: format!("result fetch returned {status}: {body}"),
            });
        }

        let result: ParseResult = response.json().await.map_err(|e| ExtractError::LlamaParse {
            detail: format!("failed to parse result response: {e}"),
        })?;

        Ok(concatenate_fragments(&result))
    }
}

/// Join every returned fragment's text in service order.
fn concatenate_fragments(result: &ParseResult) -> String {
    result
        .pages
        .iter()
        .map(|p| p.md.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl TextExtractor for LlamaParseExtractor {
    async fn extract_text(
        &self,
        file_path: &Path,
        pages: Option<&str>,
    ) -> Result<String, ExtractError> {
        debug!(
            file = %file_path.display(),
            pages = pages.unwrap_or("<all>"),
            "submitting document to layout parser"
        );
        let job = self.upload(file_path, pages).await?;
        debug!(job = %job.id, "parse job created");
        self.wait_for_completion(&job.id).await?;
        let text = self.fetch_result(&job.id).await?;
        debug!(chars = text.len(), "layout parse complete");
        Ok(text)
    }
}
