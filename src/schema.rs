//! Declarative output schemas: format instructions and reply parsing.
//!
//! A [`SchemaDescriptor`] describes the shape of the structured record a
//! pipeline wants back from the chat service: field names, semantic kinds,
//! and a human-readable description per field that steers the model. The same
//! descriptor drives both halves of the contract:
//!
//! * [`SchemaDescriptor::format_instructions`] renders the descriptor as a
//!   JSON-schema block embedded in the prompt, telling the model what to emit.
//! * [`StructuredRecord::parse_reply`] parses the model's reply into the
//!   record type declared next to the descriptor, rejecting anything that
//!   does not conform.
//!
//! Keeping the descriptor adjacent to the serde derive is what keeps the two
//! halves in agreement; the unit tests on each record type pin every field
//! name into both.

use crate::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Semantic kind of a schema field.
pub enum FieldKind {
    /// Free text.
    Text,
    /// Numeric amount.
    Number,
    /// ISO 8601 date-time without timezone, e.g. `2024-01-15T00:00:00`.
    DateTime,
    /// Text constrained to one of the listed literals.
    Enumeration(&'static [&'static str]),
    /// Ordered list of nested records.
    List(&'static SchemaDescriptor),
}

/// One field of a schema: name, kind, and the description shown to the model.
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Declarative description of a structured output shape.
pub struct SchemaDescriptor {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldKind {
    fn json_schema(&self, description: &str) -> serde_json::Value {
        match self {
            FieldKind::Text => json!({"type": "string", "description": description}),
            FieldKind::Number => json!({"type": "number", "description": description}),
            FieldKind::DateTime => json!({
                "type": "string",
                "format": "date-time",
                "description": description,
            }),
            FieldKind::Enumeration(values) => json!({
                "type": "string",
                "enum": values,
                "description": description,
            }),
            FieldKind::List(item) => json!({
                "type": "array",
                "items": item.json_schema(),
                "description": description,
            }),
        }
    }
}

impl SchemaDescriptor {
    /// Render the descriptor as a JSON-schema object.
    pub fn json_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            properties.insert(field.name.to_string(), field.kind.json_schema(field.description));
            required.push(field.name);
        }
        json!({
            "title": self.title,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Machine-generated formatting instructions for the prompt.
    ///
    /// Every required field is listed in the embedded schema, so the model
    /// sees the exact names and kinds the parser will demand.
    pub fn format_instructions(&self) -> String {
        format!(
            "The output should be formatted as a JSON instance that conforms to the JSON \
             schema below. All listed fields are required.\n\n\
             Here is the output schema:\n```\n{}\n```",
            serde_json::to_string_pretty(&self.json_schema())
                .expect("descriptor schema is always serialisable")
        )
    }
}

/// A record type that can be requested from and parsed out of a chat reply.
pub trait StructuredRecord: DeserializeOwned {
    /// The descriptor this type was declared against.
    fn descriptor() -> &'static SchemaDescriptor;

    /// Format instructions derived from [`Self::descriptor`].
    fn format_instructions() -> String {
        Self::descriptor().format_instructions()
    }

    /// Parse a raw chat reply into the record.
    ///
    /// Models occasionally wrap the JSON in markdown fences despite the
    /// closing directive; those are stripped before parsing. Anything that
    /// still fails serde is a non-conforming reply.
    fn parse_reply(raw: &str) -> Result<Self, ExtractError> {
        let cleaned = strip_code_fences(raw);
        serde_json::from_str(cleaned).map_err(|e| ExtractError::MalformedReply {
            detail: e.to_string(),
        })
    }
}

// ── Reply cleanup ────────────────────────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json)?\s*\n(.*)\n```\s*$").unwrap());

/// Strip a single pair of markdown fences wrapping the whole reply.
fn strip_code_fences(input: &str) -> &str {
    let trimmed = input.trim();
    match RE_OUTER_FENCES.captures(trimmed) {
        Some(caps) => caps.get(1).map_or(trimmed, |m| m.as_str()),
        None => trimmed,
    }
}
