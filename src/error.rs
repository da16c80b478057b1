//! Error types for the pdf2struct library.
//!
//! Every failure in a pipeline run is one of five shapes: the document could
//! not be read, one of the two text-extraction services failed, the chat
//! service failed, or the chat reply did not conform to the target schema.
//! There is no retry machinery behind any of these: a failed call fails the
//! run.
//!
//! The binary treats [`ExtractError::Whisper`] specially: it prints the
//! rendered message and exits with status 1 instead of letting the error
//! propagate with a full chain. All other variants propagate to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2struct library.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input document could not be read from disk.
    #[error("failed to read document '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OCR/whisper extraction service call failed: unreachable service,
    /// rejected file, invalid page selector, or missing credential. Page
    /// selectors are never validated locally, so a malformed selector also
    /// surfaces here.
    #[error("text extraction failed: {detail}")]
    Whisper { detail: String },

    /// The layout-aware parse service failed: upload rejected, job ended in
    /// an error state, or the result could not be fetched.
    #[error("layout parse failed: {detail}")]
    LlamaParse { detail: String },

    /// The chat-completion service call failed or returned no content.
    #[error("chat completion failed: {detail}")]
    Chat { detail: String },

    /// The chat reply did not parse against the target schema.
    #[error("reply does not match the expected schema: {detail}")]
    MalformedReply { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whisper_display_carries_detail() {
        let e = ExtractError::Whisper {
            detail: "service returned 401: invalid key".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("text extraction failed"));
        assert!(msg.contains("401"), "got: {msg}");
    }

    #[test]
    fn malformed_reply_display() {
        let e = ExtractError::MalformedReply {
            detail: "missing field `spend_items`".into(),
        };
        assert!(e.to_string().contains("spend_items"));
    }
}
