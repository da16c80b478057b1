//! Live end-to-end tests for pdf2struct.
//!
//! These tests call the real extraction and chat services and need the
//! bundled sample PDFs plus valid API keys in the environment. They are
//! gated behind the `LIVE_ENABLED` environment variable so they never run
//! in CI by accident.
//!
//! Run with:
//!   LIVE_ENABLED=1 cargo test --test live -- --nocapture

use pdf2struct::extract::{CREDIT_CARD_STATEMENT, FINANCIAL_STATEMENT, RECEIPT};
use pdf2struct::{
    BackendKind, CreditCardSpendItems, ExtractionConfig, GeographicFinancialStatement, Receipt,
};
use std::path::Path;

/// Skip this test unless LIVE_ENABLED is set *and* the sample PDF exists.
macro_rules! live_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("LIVE_ENABLED").is_err() {
            println!("SKIP — set LIVE_ENABLED=1 to run live tests");
            return;
        }
        if !Path::new($path).exists() {
            println!("SKIP — sample document not found: {}", $path);
            return;
        }
    }};
}

#[tokio::test]
async fn credit_card_pipeline_whisper() {
    live_skip_unless_ready!(CREDIT_CARD_STATEMENT.path);

    let config = ExtractionConfig::from_env();
    let result = CREDIT_CARD_STATEMENT
        .run::<CreditCardSpendItems>(&config)
        .await
        .expect("credit-card pipeline should succeed");

    assert!(!result.extracted_text.trim().is_empty());
    assert!(
        !result.record.spend_items.is_empty(),
        "statement page should yield at least one transaction"
    );
    for item in &result.record.spend_items {
        assert!(!item.merchant_name.trim().is_empty());
    }
}

#[tokio::test]
async fn financial_statement_pipeline_whisper() {
    live_skip_unless_ready!(FINANCIAL_STATEMENT.path);

    let config = ExtractionConfig::from_env();
    let result = FINANCIAL_STATEMENT
        .run::<GeographicFinancialStatement>(&config)
        .await
        .expect("financial-statement pipeline should succeed");

    // The 10-Q segment page reports every region.
    assert!(!result.record.americas.is_empty());
    assert!(!result.record.europe.is_empty());
}

#[tokio::test]
async fn receipt_pipeline_llamaparse() {
    live_skip_unless_ready!(RECEIPT.path);

    let mut config = ExtractionConfig::from_env();
    config.backend = BackendKind::LlamaParse;

    let result = RECEIPT
        .run::<Receipt>(&config)
        .await
        .expect("receipt pipeline should succeed");

    assert!(!result.record.vendor_name.trim().is_empty());
    assert!(result.record.total_amount > 0.0);
}
