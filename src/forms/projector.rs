//! Tile to JSON Forms projection and the reverse mapping used on save.

use serde::{Deserialize, Serialize};

use crate::forms::key::field_key;
use crate::forms::schema::{
    DataSchema, FormData, PropertySchema, SchemaType, UiElement, FORMAT_DATE, FORMAT_NATIONAL_ID,
};
use crate::models::{ItemKind, Tile, TileValue};

/// Arrangement of controls in the generated UI schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStyle {
    /// One control per line
    Flat,
    /// Controls grouped into horizontal rows of the given width
    Rows(usize),
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self::Rows(3)
    }
}

impl LayoutStyle {
    /// Builds a style from a configured row size, where 0 means flat.
    pub const fn from_row_size(row_size: usize) -> Self {
        if row_size == 0 {
            Self::Flat
        } else {
            Self::Rows(row_size)
        }
    }
}

/// Data schema, UI schema and initial data projected from one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTriple {
    /// Object schema of all fields
    pub schema: DataSchema,
    /// Layout of the controls
    pub uischema: UiElement,
    /// Initial values keyed by field key
    pub data: FormData,
}

/// Schema type and format marker for each item kind.
const fn schema_shape(kind: ItemKind) -> (SchemaType, Option<&'static str>) {
    match kind {
        ItemKind::String => (SchemaType::String, None),
        ItemKind::Number => (SchemaType::Number, None),
        ItemKind::Boolean => (SchemaType::Boolean, None),
        ItemKind::Date => (SchemaType::String, Some(FORMAT_DATE)),
        ItemKind::Aadhaar => (SchemaType::String, Some(FORMAT_NATIONAL_ID)),
    }
}

/// Projects a tile into a JSON Forms triple.
///
/// Properties, controls and initial data all follow item order. Never fails.
pub fn project_tile(tile: &Tile, style: LayoutStyle) -> FormTriple {
    let mut schema = DataSchema::object();
    let mut controls = Vec::with_capacity(tile.items.len());
    let mut data = FormData::with_capacity(tile.items.len());

    for (idx, item) in tile.items.iter().enumerate() {
        let key = field_key(&item.label, idx);
        let (schema_type, format) = schema_shape(item.kind);

        schema.properties.insert(
            key.clone(),
            PropertySchema {
                schema_type,
                title: item.label.clone(),
                format: format.map(str::to_string),
            },
        );
        controls.push(UiElement::control(&key));
        data.insert(key, item.value.to_json());
    }

    let elements = match style {
        LayoutStyle::Flat => controls,
        LayoutStyle::Rows(width) => controls
            .chunks(width.max(1))
            .map(|row| UiElement::HorizontalLayout {
                elements: row.to_vec(),
            })
            .collect(),
    };

    FormTriple {
        schema,
        uischema: UiElement::VerticalLayout { elements },
        data,
    }
}

/// Merges edited form data back into a tile.
///
/// Keys are recomputed from the original tile's labels and positions, so
/// this is only correct when the item list is unchanged since projection.
/// Labels and kinds are kept; a missing key or a value with no tile
/// representation (`null`, arrays, objects) keeps the original value.
pub fn apply_form_data(tile: &Tile, data: &FormData) -> Tile {
    let items = tile
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let key = field_key(&item.label, idx);
            let value = data
                .get(&key)
                .and_then(TileValue::from_json)
                .unwrap_or_else(|| item.value.clone());
            let mut updated = item.clone();
            updated.value = value;
            updated
        })
        .collect();

    Tile {
        items,
        ..tile.clone()
    }
}
