//! Tile item values and their textual conversions.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::sync::OnceLock;

use crate::models::ItemKind;

/// Value held by a tile item.
///
/// Serialized untagged, so `125000`, `"+15%"` and `true` round-trip as plain
/// JSON scalars. Integers stay integers because the number is kept as a
/// [`serde_json::Number`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileValue {
    /// Boolean value
    Bool(bool),
    /// Numeric value (integer or float)
    Number(Number),
    /// Free text, dates and ID numbers
    Text(String),
}

impl TileValue {
    /// Converts a JSON value coming back from a form into a tile value.
    ///
    /// Returns `None` for `null`, arrays and objects, which have no tile
    /// representation.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Converts the value into its JSON form for the initial form data.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for TileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TileValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for TileValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for TileValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for TileValue {
    fn from(n: i32) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<i64> for TileValue {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

fn number_prefix_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("static pattern compiles")
    })
}

/// Parses the longest leading number of `raw` (`"12abc"` reads as `12`).
///
/// Leading whitespace is skipped. Returns `None` when no number starts the text.
fn parse_number_prefix(raw: &str) -> Option<Number> {
    let prefix = number_prefix_regex().find(raw.trim_start())?.as_str();
    if let Ok(int) = prefix.parse::<i64>() {
        return Some(Number::from(int));
    }
    prefix.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Parses raw text input into a value of the given kind.
///
/// Numbers are read from the leading numeric prefix and become `0` when
/// there is none; booleans are `true` only for the exact text `"true"`.
/// Dates and ID numbers stay text.
pub fn parse_value_for_kind(raw: &str, kind: ItemKind) -> TileValue {
    match kind {
        ItemKind::Number => {
            TileValue::Number(parse_number_prefix(raw).unwrap_or_else(|| Number::from(0)))
        }
        ItemKind::Boolean => TileValue::Bool(raw == "true"),
        ItemKind::String | ItemKind::Date | ItemKind::Aadhaar => TileValue::Text(raw.to_string()),
    }
}

/// Formats a value for read-only display on a tile card.
pub fn format_value(value: &TileValue, kind: ItemKind) -> String {
    match (kind, value) {
        (ItemKind::Boolean, TileValue::Bool(b)) => String::from(if *b { "Yes" } else { "No" }),
        (ItemKind::Date, TileValue::Text(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|date| date.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|_| s.clone()),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_round_trip_keeps_integers() {
        let value: TileValue = serde_json::from_value(json!(125000)).unwrap();
        assert_eq!(value, TileValue::from(125_000));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(125000));
    }

    #[test]
    fn test_from_json_rejects_null_and_containers() {
        assert!(TileValue::from_json(&Value::Null).is_none());
        assert!(TileValue::from_json(&json!([1, 2])).is_none());
        assert!(TileValue::from_json(&json!({"a": 1})).is_none());
        assert_eq!(TileValue::from_json(&json!("x")), Some(TileValue::from("x")));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_value_for_kind("42", ItemKind::Number), TileValue::from(42));
        assert_eq!(
            parse_value_for_kind("2.5", ItemKind::Number).to_json(),
            json!(2.5)
        );
        assert_eq!(parse_value_for_kind("abc", ItemKind::Number), TileValue::from(0));
    }

    #[test]
    fn test_parse_number_reads_leading_prefix() {
        assert_eq!(parse_value_for_kind("12abc", ItemKind::Number), TileValue::from(12));
        assert_eq!(parse_value_for_kind("  -7 units", ItemKind::Number), TileValue::from(-7));
        assert_eq!(
            parse_value_for_kind("3.75%", ItemKind::Number).to_json(),
            json!(3.75)
        );
        assert_eq!(
            parse_value_for_kind(".5x", ItemKind::Number).to_json(),
            json!(0.5)
        );
        assert_eq!(parse_value_for_kind("x12", ItemKind::Number), TileValue::from(0));
        assert_eq!(parse_value_for_kind("-", ItemKind::Number), TileValue::from(0));
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(parse_value_for_kind("true", ItemKind::Boolean), TileValue::Bool(true));
        assert_eq!(parse_value_for_kind("yes", ItemKind::Boolean), TileValue::Bool(false));
    }

    #[test]
    fn test_parse_text_kinds() {
        assert_eq!(
            parse_value_for_kind("1995-04-12", ItemKind::Date),
            TileValue::from("1995-04-12")
        );
        assert_eq!(parse_value_for_kind("+15%", ItemKind::String), TileValue::from("+15%"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&TileValue::Bool(true), ItemKind::Boolean), "Yes");
        assert_eq!(format_value(&TileValue::Bool(false), ItemKind::Boolean), "No");
        assert_eq!(
            format_value(&TileValue::from("1995-04-12"), ItemKind::Date),
            "Apr 12, 1995"
        );
        assert_eq!(
            format_value(&TileValue::from("someday"), ItemKind::Date),
            "someday"
        );
        assert_eq!(format_value(&TileValue::from(450), ItemKind::Number), "450");
    }
}
