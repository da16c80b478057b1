//! Pipeline orchestration.
//!
//! One configurable driver replaces the reference flow's copy-pasted
//! per-document variants: every pipeline is (document path, per-backend page
//! selectors, preamble, record type) fed through the same stages of text
//! extraction, prompt compilation + chat completion, and schema parsing.
//! Parsing happens here, at the orchestration layer, and the typed record is
//! handed to the caller alongside the intermediate artifacts.

use crate::backend::{self, BackendKind};
use crate::chat::ChatClient;
use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::prompts;
use crate::schema::StructuredRecord;
use std::path::Path;
use tracing::info;

/// Everything a pipeline run produced.
pub struct Extraction<T> {
    /// The text rendering of the selected pages, as returned by the backend.
    pub extracted_text: String,
    /// The chat service's reply, verbatim.
    pub raw_reply: String,
    /// The reply parsed against the target schema.
    pub record: T,
}

/// Run one full pipeline: extract text, compile and send the prompt, parse
/// the reply into `T`.
pub async fn extract_structured<T: StructuredRecord>(
    file_path: impl AsRef<Path>,
    pages: Option<&str>,
    preamble: &str,
    config: &ExtractionConfig,
) -> Result<Extraction<T>, ExtractError> {
    let file_path = file_path.as_ref();
    let extractor = backend::from_config(config);

    info!(file = %file_path.display(), "extracting text");
    let extracted_text = extractor.extract_text(file_path, pages).await?;
    info!(chars = extracted_text.len(), "text extraction complete");

    let user_message = prompts::compose_user_message(&T::format_instructions(), &extracted_text);
    let chat = ChatClient::new(config);
    let raw_reply = chat.complete(preamble, &user_message).await?;
    info!(chars = raw_reply.len(), "chat reply received");

    let record = T::parse_reply(&raw_reply)?;
    Ok(Extraction {
        extracted_text,
        raw_reply,
        record,
    })
}

// ── Sample-document pipelines ────────────────────────────────────────────

/// A fixed sample-document pipeline: which file, which pages on which
/// backend, and the task preamble.
///
/// The whisper service takes human page numbers (1-based), the layout parser
/// 0-based indices, so each pipeline carries one selector per backend for the
/// same physical page. `None` means the whole document.
pub struct DocumentPipeline {
    pub name: &'static str,
    pub path: &'static str,
    pub whisper_pages: Option<&'static str>,
    pub llamaparse_pages: Option<&'static str>,
    pub preamble: &'static str,
}

impl DocumentPipeline {
    /// The page selector for the given backend, untranslated from here on.
    pub fn pages_for(&self, kind: BackendKind) -> Option<&'static str> {
        match kind {
            BackendKind::Whisper => self.whisper_pages,
            BackendKind::LlamaParse => self.llamaparse_pages,
        }
    }

    /// Run this pipeline with the configured backend.
    pub async fn run<T: StructuredRecord>(
        &self,
        config: &ExtractionConfig,
    ) -> Result<Extraction<T>, ExtractError> {
        extract_structured(self.path, self.pages_for(config.backend), self.preamble, config).await
    }
}

/// Spend items from page 3 of the sample card statement.
pub const CREDIT_CARD_STATEMENT: DocumentPipeline = DocumentPipeline {
    name: "credit-card statement",
    path: "assets/docs/Chase Freedom.pdf",
    whisper_pages: Some("3"),
    llamaparse_pages: Some("2"),
    preamble: prompts::CREDIT_CARD_PREAMBLE,
};

/// Geographic segment data from page 14 of the sample 10-Q.
pub const FINANCIAL_STATEMENT: DocumentPipeline = DocumentPipeline {
    name: "financial statement",
    path: "assets/docs/Apple_10-Q-Q2-2024.pdf",
    whisper_pages: Some("14"),
    llamaparse_pages: Some("13"),
    preamble: prompts::FINANCIAL_STATEMENT_PREAMBLE,
};

/// The sample receipt, whole document.
pub const RECEIPT: DocumentPipeline = DocumentPipeline {
    name: "receipt",
    path: "assets/docs/costco_receipt.pdf",
    whisper_pages: None,
    llamaparse_pages: None,
    preamble: prompts::RECEIPT_PREAMBLE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_track_the_backend_indexing_offset() {
        // Same physical page, two numberings: whisper is 1-based, the layout
        // parser 0-based.
        for pipeline in [&CREDIT_CARD_STATEMENT, &FINANCIAL_STATEMENT] {
            let whisper: usize = pipeline
                .pages_for(BackendKind::Whisper)
                .unwrap()
                .parse()
                .unwrap();
            let parse: usize = pipeline
                .pages_for(BackendKind::LlamaParse)
                .unwrap()
                .parse()
                .unwrap();
            assert_eq!(whisper, parse + 1, "pipeline {}", pipeline.name);
        }
    }

    #[test]
    fn receipt_reads_the_whole_document() {
        assert!(RECEIPT.pages_for(BackendKind::Whisper).is_none());
        assert!(RECEIPT.pages_for(BackendKind::LlamaParse).is_none());
    }
}
