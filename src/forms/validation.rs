//! Field validation for projected forms.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

use crate::forms::projector::FormTriple;
use crate::forms::renderers::RendererRegistry;
use crate::forms::schema::FormData;

/// Number of digits in a national ID number.
pub const NATIONAL_ID_LEN: usize = 12;

/// Message reported for a malformed national ID number.
pub const NATIONAL_ID_MESSAGE: &str = "Aadhaar must be exactly 12 digits (0-9 only)";

fn national_id_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{12}$").expect("static pattern compiles"))
}

/// A validation failure for one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field key the error belongs to
    pub key: String,
    /// Field title (the item label)
    pub title: String,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Checks that a value is exactly 12 ASCII digits.
pub fn validate_national_id(value: &str) -> Result<(), String> {
    if national_id_regex().is_match(value) {
        Ok(())
    } else {
        Err(NATIONAL_ID_MESSAGE.to_string())
    }
}

/// Strips non-digits from raw input and truncates it to 12 digits.
pub fn sanitize_national_id(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(NATIONAL_ID_LEN)
        .collect()
}

/// Checks a form value for a national ID field.
///
/// Only JSON strings are accepted; a number keeps no leading zeros and would
/// be stored under a text kind.
pub(crate) fn validate_national_id_value(value: &Value) -> Result<(), String> {
    match value {
        Value::String(s) => validate_national_id(s),
        _ => Err(NATIONAL_ID_MESSAGE.to_string()),
    }
}

/// Runs the editor-specific validator of every control against `data`.
///
/// Returns an empty list when the data may be saved.
pub fn validate_form(
    triple: &FormTriple,
    registry: &RendererRegistry,
    data: &FormData,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for control in triple.uischema.controls() {
        let Some(key) = control.field_key() else {
            continue;
        };
        let editor = registry.select(control, &triple.schema);
        let value = data.get(key).unwrap_or(&Value::Null);

        if let Err(message) = editor.validate(value) {
            let title = triple
                .schema
                .properties
                .get(key)
                .map_or_else(|| key.to_string(), |p| p.title.clone());
            errors.push(FieldError {
                key: key.to_string(),
                title,
                message,
            });
        }
    }

    errors
}
