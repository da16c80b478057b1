//! The three concrete document schemas.
//!
//! Each record type is a plain serde struct declared next to its
//! [`SchemaDescriptor`]; the descriptor's field list mirrors the struct field
//! for field. Dates carry no timezone (statements and receipts print local
//! dates), so every date field is a [`NaiveDateTime`].

use crate::schema::{FieldKind, FieldSpec, SchemaDescriptor, StructuredRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ── Credit-card statement ────────────────────────────────────────────────

/// One transaction from a credit-card statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardSpend {
    pub spend_date: NaiveDateTime,
    pub merchant_name: String,
    pub amount_spent: f64,
}

/// All transactions extracted from one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardSpendItems {
    pub spend_items: Vec<CreditCardSpend>,
}

static CREDIT_CARD_SPEND: SchemaDescriptor = SchemaDescriptor {
    title: "CreditCardSpend",
    fields: &[
        FieldSpec {
            name: "spend_date",
            kind: FieldKind::DateTime,
            description: "Date of purchase",
        },
        FieldSpec {
            name: "merchant_name",
            kind: FieldKind::Text,
            description: "Name of the merchant",
        },
        FieldSpec {
            name: "amount_spent",
            kind: FieldKind::Number,
            description: "Amount spent",
        },
    ],
};

static CREDIT_CARD_SPEND_ITEMS: SchemaDescriptor = SchemaDescriptor {
    title: "CreditCardSpendItems",
    fields: &[FieldSpec {
        name: "spend_items",
        kind: FieldKind::List(&CREDIT_CARD_SPEND),
        description: "List of spend items from the credit card statement",
    }],
};

impl StructuredRecord for CreditCardSpendItems {
    fn descriptor() -> &'static SchemaDescriptor {
        &CREDIT_CARD_SPEND_ITEMS
    }
}

// ── Geographic financial statement ───────────────────────────────────────

/// Reporting period length for one statement row.
///
/// The wire values are exactly `"6-month"` and `"3-month"`; anything else
/// fails parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodLength {
    #[serde(rename = "6-month")]
    SixMonth,
    #[serde(rename = "3-month")]
    ThreeMonth,
}

/// One region's figures for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalFinancialStatement {
    pub quarter_ending: NaiveDateTime,
    pub net_sales: f64,
    pub operating_income: f64,
    pub ending_type: PeriodLength,
}

/// Quarterly figures bucketed by reporting region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicFinancialStatement {
    pub americas: Vec<RegionalFinancialStatement>,
    pub europe: Vec<RegionalFinancialStatement>,
    pub greater_china: Vec<RegionalFinancialStatement>,
    pub japan: Vec<RegionalFinancialStatement>,
    pub rest_of_asia_pacific: Vec<RegionalFinancialStatement>,
}

static REGIONAL_FINANCIAL_STATEMENT: SchemaDescriptor = SchemaDescriptor {
    title: "RegionalFinancialStatement",
    fields: &[
        FieldSpec {
            name: "quarter_ending",
            kind: FieldKind::DateTime,
            description: "Quarter ending date",
        },
        FieldSpec {
            name: "net_sales",
            kind: FieldKind::Number,
            description: "Net sales",
        },
        FieldSpec {
            name: "operating_income",
            kind: FieldKind::Number,
            description: "Operating income",
        },
        FieldSpec {
            name: "ending_type",
            kind: FieldKind::Enumeration(&["6-month", "3-month"]),
            description: "Type of ending. Set to either '6-month' or '3-month'",
        },
    ],
};

static GEOGRAPHIC_FINANCIAL_STATEMENT: SchemaDescriptor = SchemaDescriptor {
    title: "GeographicFinancialStatement",
    fields: &[
        FieldSpec {
            name: "americas",
            kind: FieldKind::List(&REGIONAL_FINANCIAL_STATEMENT),
            description: "Financial statement for the Americas region, sorted chronologically",
        },
        FieldSpec {
            name: "europe",
            kind: FieldKind::List(&REGIONAL_FINANCIAL_STATEMENT),
            description: "Financial statement for the Europe region, sorted chronologically",
        },
        FieldSpec {
            name: "greater_china",
            kind: FieldKind::List(&REGIONAL_FINANCIAL_STATEMENT),
            description: "Financial statement for the Greater China region, sorted chronologically",
        },
        FieldSpec {
            name: "japan",
            kind: FieldKind::List(&REGIONAL_FINANCIAL_STATEMENT),
            description: "Financial statement for the Japan region, sorted chronologically",
        },
        FieldSpec {
            name: "rest_of_asia_pacific",
            kind: FieldKind::List(&REGIONAL_FINANCIAL_STATEMENT),
            description:
                "Financial statement for the Rest of Asia Pacific region, sorted chronologically",
        },
    ],
};

impl StructuredRecord for GeographicFinancialStatement {
    fn descriptor() -> &'static SchemaDescriptor {
        &GEOGRAPHIC_FINANCIAL_STATEMENT
    }
}

// ── Retail receipt ───────────────────────────────────────────────────────

/// One purchased item on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLineItem {
    pub item_name: String,
    pub quantity: f64,
    pub item_total: f64,
}

/// A retail receipt.
///
/// The schema imposes no cross-field arithmetic: `total_amount` is extracted
/// independently of the line items and the two may diverge (discount rows,
/// taxes, partial scans).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub vendor_name: String,
    pub purchase_date: NaiveDateTime,
    pub receipt_number: String,
    pub line_items: Vec<ReceiptLineItem>,
    pub total_amount: f64,
}

static RECEIPT_LINE_ITEM: SchemaDescriptor = SchemaDescriptor {
    title: "ReceiptLineItem",
    fields: &[
        FieldSpec {
            name: "item_name",
            kind: FieldKind::Text,
            description: "Name of the purchased item",
        },
        FieldSpec {
            name: "quantity",
            kind: FieldKind::Number,
            description: "Quantity purchased",
        },
        FieldSpec {
            name: "item_total",
            kind: FieldKind::Number,
            description: "Total charged for this line item",
        },
    ],
};

static RECEIPT: SchemaDescriptor = SchemaDescriptor {
    title: "Receipt",
    fields: &[
        FieldSpec {
            name: "vendor_name",
            kind: FieldKind::Text,
            description: "Name of the vendor",
        },
        FieldSpec {
            name: "purchase_date",
            kind: FieldKind::DateTime,
            description: "Date of purchase",
        },
        FieldSpec {
            name: "receipt_number",
            kind: FieldKind::Text,
            description: "Receipt number",
        },
        FieldSpec {
            name: "line_items",
            kind: FieldKind::List(&RECEIPT_LINE_ITEM),
            description: "List of line items on the receipt",
        },
        FieldSpec {
            name: "total_amount",
            kind: FieldKind::Number,
            description: "Total amount of the receipt",
        },
    ],
};

impl StructuredRecord for Receipt {
    fn descriptor() -> &'static SchemaDescriptor {
        &RECEIPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    #[test]
    fn credit_card_round_trip() {
        let reply = r#"{"spend_items": [{"spend_date": "2024-01-15T00:00:00",
            "merchant_name": "Coffee Shop", "amount_spent": 4.50}]}"#;
        let parsed = CreditCardSpendItems::parse_reply(reply).unwrap();
        assert_eq!(parsed.spend_items.len(), 1);
        assert_eq!(parsed.spend_items[0].merchant_name, "Coffee Shop");
        assert_eq!(parsed.spend_items[0].amount_spent, 4.50);
        assert_eq!(
            parsed.spend_items[0].spend_date,
            "2024-01-15T00:00:00".parse::<NaiveDateTime>().unwrap()
        );
    }

    #[test]
    fn credit_card_rejects_missing_merchant() {
        let reply = r#"{"spend_items": [{"spend_date": "2024-01-15T00:00:00",
            "amount_spent": 4.50}]}"#;
        assert!(matches!(
            CreditCardSpendItems::parse_reply(reply),
            Err(ExtractError::MalformedReply { .. })
        ));
    }

    #[test]
    fn credit_card_instructions_name_every_field() {
        let instructions = CreditCardSpendItems::format_instructions();
        for name in ["spend_items", "spend_date", "merchant_name", "amount_spent"] {
            assert!(instructions.contains(name), "missing {name}");
        }
    }

    #[test]
    fn financial_statement_instructions_name_every_field() {
        let instructions = GeographicFinancialStatement::format_instructions();
        for name in [
            "americas",
            "europe",
            "greater_china",
            "japan",
            "rest_of_asia_pacific",
            "quarter_ending",
            "net_sales",
            "operating_income",
            "ending_type",
        ] {
            assert!(instructions.contains(name), "missing {name}");
        }
        assert!(instructions.contains("\"6-month\""));
        assert!(instructions.contains("\"3-month\""));
    }

    #[test]
    fn receipt_instructions_name_every_field() {
        let instructions = Receipt::format_instructions();
        for name in [
            "vendor_name",
            "purchase_date",
            "receipt_number",
            "line_items",
            "item_name",
            "quantity",
            "item_total",
            "total_amount",
        ] {
            assert!(instructions.contains(name), "missing {name}");
        }
    }

    fn regional_row(ending_type: &str) -> String {
        format!(
            r#"{{"quarter_ending": "2024-03-30T00:00:00", "net_sales": 37273.0,
                "operating_income": 15074.0, "ending_type": "{ending_type}"}}"#
        )
    }

    fn statement_with(row: &str) -> String {
        format!(
            r#"{{"americas": [{row}], "europe": [], "greater_china": [],
                "japan": [], "rest_of_asia_pacific": []}}"#
        )
    }

    #[test]
    fn financial_statement_accepts_both_period_lengths() {
        for (literal, expected) in [
            ("6-month", PeriodLength::SixMonth),
            ("3-month", PeriodLength::ThreeMonth),
        ] {
            let parsed =
                GeographicFinancialStatement::parse_reply(&statement_with(&regional_row(literal)))
                    .unwrap();
            assert_eq!(parsed.americas[0].ending_type, expected);
        }
    }

    #[test]
    fn financial_statement_rejects_other_period_lengths() {
        for bad in ["12-month", "quarterly", "3-months", ""] {
            assert!(
                matches!(
                    GeographicFinancialStatement::parse_reply(&statement_with(&regional_row(bad))),
                    Err(ExtractError::MalformedReply { .. })
                ),
                "accepted ending_type {bad:?}"
            );
        }
    }

    #[test]
    fn financial_statement_requires_all_regions() {
        let reply = r#"{"americas": [], "europe": [], "greater_china": [], "japan": []}"#;
        assert!(GeographicFinancialStatement::parse_reply(reply).is_err());
    }

    #[test]
    fn receipt_accepts_diverging_totals() {
        // No cross-field validation: line items sum to 8.00 but the receipt
        // total says 11.50 (tax line the model didn't itemise). The parser
        // accepts this.
        let reply = r#"{"vendor_name": "Costco", "purchase_date": "2024-02-02T00:00:00",
            "receipt_number": "R-1109",
            "line_items": [{"item_name": "Bananas", "quantity": 2.0, "item_total": 3.00},
                           {"item_name": "Bread", "quantity": 1.0, "item_total": 5.00}],
            "total_amount": 11.50}"#;
        let parsed = Receipt::parse_reply(reply).unwrap();
        let line_sum: f64 = parsed.line_items.iter().map(|i| i.item_total).sum();
        assert_eq!(line_sum, 8.00);
        assert_eq!(parsed.total_amount, 11.50);
    }

    #[test]
    fn receipt_rejects_missing_total() {
        let reply = r#"{"vendor_name": "Costco", "purchase_date": "2024-02-02T00:00:00",
            "receipt_number": "R-1109", "line_items": []}"#;
        assert!(Receipt::parse_reply(reply).is_err());
    }

    #[test]
    fn period_length_serialises_to_wire_literals() {
        assert_eq!(
            serde_json::to_string(&PeriodLength::SixMonth).unwrap(),
            r#""6-month""#
        );
        assert_eq!(
            serde_json::to_string(&PeriodLength::ThreeMonth).unwrap(),
            r#""3-month""#
        );
    }
}
