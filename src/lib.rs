//! # pdf2struct
//!
//! Extract structured financial data from PDF documents using hosted OCR
//! services and an LLM chat-completion API with schema-driven prompting.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract  render selected pages to text via one of two backends
//!  │              (OCR/whisper service, or layout-aware parse service)
//!  ├─ 2. Prompt   system message = task preamble; user message =
//!  │              schema format instructions + text + closing directive
//!  ├─ 3. Chat     one completion call, temperature pinned to 0.0
//!  └─ 4. Parse    reply parsed against the declared schema descriptor
//! ```
//!
//! Three document schemas ship with the crate: credit-card spend items,
//! quarterly geographic financial statements, and retail receipts. New
//! schemas are a serde struct plus a [`schema::SchemaDescriptor`] away.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2struct::{extract_structured, CreditCardSpendItems, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials read once from LLMWHISPERER_API_KEY / OPENAI_API_KEY etc.
//!     let config = ExtractionConfig::from_env();
//!     let result = extract_structured::<CreditCardSpendItems>(
//!         "statement.pdf",
//!         Some("3"),
//!         pdf2struct::prompts::CREDIT_CARD_PREAMBLE,
//!         &config,
//!     )
//!     .await?;
//!     println!("{} transactions", result.record.spend_items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2struct` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod chat;
pub mod config;
pub mod documents;
pub mod error;
pub mod extract;
pub mod prompts;
pub mod schema;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{BackendKind, TextExtractor};
pub use chat::ChatClient;
pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use documents::{
    CreditCardSpend, CreditCardSpendItems, GeographicFinancialStatement, PeriodLength, Receipt,
    ReceiptLineItem, RegionalFinancialStatement,
};
pub use error::ExtractError;
pub use extract::{extract_structured, DocumentPipeline, Extraction};
pub use schema::{FieldKind, FieldSpec, SchemaDescriptor, StructuredRecord};
