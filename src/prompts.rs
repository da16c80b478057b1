//! Prompt text for the extraction pipelines.
//!
//! Every prompt string lives here so changing the wording of a task never
//! touches request plumbing, and unit tests can inspect prompts without a
//! live chat service.
//!
//! A compiled request has two messages: a system message carrying only the
//! task preamble, and a user message filling three slots in order (the
//! schema-derived format instructions, the extracted document text, and the
//! fixed closing directive).

/// Preamble for the credit-card statement pipeline.
pub const CREDIT_CARD_PREAMBLE: &str = "You're seeing the list of spend items from a credit \
card statement and your job is to accurately extract the spend date, merchant name and amount \
spent for each transaction.";

/// Preamble for the geographic financial-statement pipeline.
pub const FINANCIAL_STATEMENT_PREAMBLE: &str = "You're seeing the geographic segment data from \
a company's quarterly financial statement and your job is to accurately extract, for each \
region, the quarter ending date, net sales and operating income.";

/// Preamble for the receipt pipeline.
pub const RECEIPT_PREAMBLE: &str = "You're seeing a retail receipt and your job is to \
accurately extract the vendor name, purchase date, receipt number, every line item and the \
total amount.";

/// Fixed closing directive appended to every user message.
pub const POSTAMBLE: &str = "Do not include any explanation in the reply. Only include the \
extracted information in the reply.";

/// Fill the three-slot user message template.
pub fn compose_user_message(format_instructions: &str, extracted_text: &str) -> String {
    format!("{format_instructions}\n\n{extracted_text}\n\n{POSTAMBLE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_slots_in_order() {
        let msg = compose_user_message("INSTRUCTIONS", "DOCUMENT TEXT");
        let i = msg.find("INSTRUCTIONS").unwrap();
        let t = msg.find("DOCUMENT TEXT").unwrap();
        let p = msg.find(POSTAMBLE).unwrap();
        assert!(i < t && t < p);
    }

    #[test]
    fn postamble_forbids_explanation() {
        assert!(POSTAMBLE.contains("Do not include any explanation"));
    }
}
