//! JSON Forms data schema and UI schema types.
//!
//! These serialize to exactly what a JSON Forms renderer expects:
//!
//! ```json
//! { "type": "object", "properties": { "revenue_0": { "type": "number", "title": "Revenue" } } }
//! { "type": "VerticalLayout", "elements": [ { "type": "Control", "scope": "#/properties/revenue_0" } ] }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every control scope.
pub const SCOPE_PREFIX: &str = "#/properties/";

/// Format marker for date properties.
pub const FORMAT_DATE: &str = "date";

/// Format marker for national ID number properties.
pub const FORMAT_NATIONAL_ID: &str = "aadhaar";

/// Form data keyed by field key, in item order.
pub type FormData = IndexMap<String, Value>;

/// Primitive JSON Schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `"string"`
    String,
    /// `"number"`
    Number,
    /// `"boolean"`
    Boolean,
    /// `"object"`
    Object,
}

impl SchemaType {
    /// Returns the JSON Schema type name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
        }
    }
}

/// Schema of a single form property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Primitive type
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Display title (the item label)
    pub title: String,
    /// Optional display format marker (`"date"`, `"aadhaar"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Object schema describing all form fields of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Always [`SchemaType::Object`]
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Properties keyed by field key, in item order
    pub properties: IndexMap<String, PropertySchema>,
}

impl DataSchema {
    /// Creates an empty object schema.
    pub fn object() -> Self {
        Self {
            schema_type: SchemaType::Object,
            properties: IndexMap::new(),
        }
    }

    /// Looks up the property a control points at.
    pub fn resolve(&self, element: &UiElement) -> Option<&PropertySchema> {
        element.field_key().and_then(|key| self.properties.get(key))
    }
}

/// UI schema element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiElement {
    /// A single field editor bound to a property
    Control {
        /// JSON pointer to the property (`#/properties/<key>`)
        scope: String,
    },
    /// Children stacked top to bottom
    VerticalLayout {
        /// Child elements
        elements: Vec<UiElement>,
    },
    /// Children placed side by side
    HorizontalLayout {
        /// Child elements
        elements: Vec<UiElement>,
    },
}

impl UiElement {
    /// Creates a control bound to a field key.
    pub fn control(key: &str) -> Self {
        Self::Control {
            scope: format!("{SCOPE_PREFIX}{key}"),
        }
    }

    /// Returns true for controls.
    pub const fn is_control(&self) -> bool {
        matches!(self, Self::Control { .. })
    }

    /// Returns the scope of a control.
    pub fn scope(&self) -> Option<&str> {
        match self {
            Self::Control { scope } => Some(scope),
            Self::VerticalLayout { .. } | Self::HorizontalLayout { .. } => None,
        }
    }

    /// Returns the field key a control is bound to.
    pub fn field_key(&self) -> Option<&str> {
        self.scope().and_then(|s| s.strip_prefix(SCOPE_PREFIX))
    }

    /// Collects every control in document order.
    pub fn controls(&self) -> Vec<&UiElement> {
        let mut out = Vec::new();
        self.collect_controls(&mut out);
        out
    }

    fn collect_controls<'a>(&'a self, out: &mut Vec<&'a UiElement>) {
        match self {
            Self::Control { .. } => out.push(self),
            Self::VerticalLayout { elements } | Self::HorizontalLayout { elements } => {
                for element in elements {
                    element.collect_controls(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_control_serialization() {
        let control = UiElement::control("city_0");
        assert_eq!(
            serde_json::to_value(&control).unwrap(),
            json!({"type": "Control", "scope": "#/properties/city_0"})
        );
        assert_eq!(control.field_key(), Some("city_0"));
    }

    #[test]
    fn test_layout_round_trip() {
        let raw = json!({
            "type": "VerticalLayout",
            "elements": [
                {"type": "HorizontalLayout", "elements": [
                    {"type": "Control", "scope": "#/properties/a_0"},
                    {"type": "Control", "scope": "#/properties/b_1"}
                ]},
                {"type": "Control", "scope": "#/properties/c_2"}
            ]
        });
        let layout: UiElement = serde_json::from_value(raw.clone()).unwrap();
        let keys: Vec<_> = layout.controls().iter().filter_map(|c| c.field_key()).collect();
        assert_eq!(keys, vec!["a_0", "b_1", "c_2"]);
        assert_eq!(serde_json::to_value(&layout).unwrap(), raw);
    }

    #[test]
    fn test_property_format_omitted_when_absent() {
        let prop = PropertySchema {
            schema_type: SchemaType::String,
            title: "City".to_string(),
            format: None,
        };
        assert_eq!(
            serde_json::to_value(&prop).unwrap(),
            json!({"type": "string", "title": "City"})
        );
    }

    #[test]
    fn test_resolve_foreign_scope() {
        let schema = DataSchema::object();
        let control = UiElement::Control {
            scope: "#/definitions/x".to_string(),
        };
        assert!(control.field_key().is_none());
        assert!(schema.resolve(&control).is_none());
    }
}
