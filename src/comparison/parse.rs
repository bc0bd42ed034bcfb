//! Validation of structured model output.

use serde_json::{Map, Value, json};

use super::config::JudgmentVariant;
use super::error::ComparisonError;
use crate::model::{Judgment, JudgmentError};

pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_SIMILARITY: &str = "similarity";
pub const FIELD_DIFFERENCE: &str = "difference";
pub const FIELD_SCORE: &str = "score";
pub const FIELD_CONFIDENCE: &str = "confidence";
pub const FIELD_REASON: &str = "reason";

/// JSON schema sent to the model for the given variant.
pub fn judgment_schema(variant: JudgmentVariant) -> Value {
    let mut fields = vec![
        (FIELD_SUMMARY, "string"),
        (FIELD_SIMILARITY, "string"),
        (FIELD_DIFFERENCE, "string"),
        (FIELD_SCORE, "number"),
        (FIELD_REASON, "string"),
    ];
    if variant.requires_confidence() {
        fields.push((FIELD_CONFIDENCE, "number"));
    }

    let mut properties = Map::new();
    for (name, kind) in &fields {
        properties.insert(name.to_string(), json!({ "type": kind }));
    }
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Parses and validates a raw model reply into a [`Judgment`].
///
/// A reply wrapped in a Markdown code fence is accepted. Scores must be JSON
/// numbers; numeric strings are rejected.
pub fn parse_judgment(raw: &str, variant: JudgmentVariant) -> Result<Judgment, ComparisonError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(ComparisonError::MalformedOutput {
            reason: "empty response".to_string(),
        });
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| ComparisonError::MalformedOutput {
            reason: format!("invalid JSON: {}", e),
        })?;

    let object = value
        .as_object()
        .ok_or_else(|| ComparisonError::MalformedOutput {
            reason: "expected a JSON object".to_string(),
        })?;

    let summary = required_text(object, FIELD_SUMMARY)?;
    let similarity = required_text(object, FIELD_SIMILARITY)?;
    let difference = required_text(object, FIELD_DIFFERENCE)?;
    let reason = required_text(object, FIELD_REASON)?;

    let score = required_number(object, FIELD_SCORE)?;
    let confidence = if variant.requires_confidence() {
        Some(required_number(object, FIELD_CONFIDENCE)?)
    } else {
        optional_number(object, FIELD_CONFIDENCE)?
    };

    Ok(Judgment::new(
        summary, similarity, difference, score, confidence, reason,
    )?)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") up to the first newline.
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn required_text(object: &Map<String, Value>, field: &'static str) -> Result<String, ComparisonError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ComparisonError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ComparisonError::MalformedOutput {
            reason: format!("'{}' must be a string, got {}", field, type_name(other)),
        }),
    }
}

fn required_number(object: &Map<String, Value>, field: &'static str) -> Result<f32, ComparisonError> {
    optional_number(object, field)?.ok_or(ComparisonError::MissingField { field })
}

fn optional_number(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<f32>, ComparisonError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|v| Some(v as f32))
            .ok_or(ComparisonError::MalformedJudgment(JudgmentError::NotANumber { field })),
        Some(_) => Err(ComparisonError::MalformedJudgment(
            JudgmentError::NotANumber { field },
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
