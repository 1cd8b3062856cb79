//! Edit session for a single tile.
//!
//! A session owns a copy of the tile, its projected form triple and the
//! working form data. Edits only touch the working data; [`EditSession::save`]
//! validates and merges them back into a new tile.

use anyhow::{bail, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::forms::{
    apply_form_data, field_key, project_tile, sanitize_national_id, validate_form, EditorKind,
    FieldError, FormData, FormTriple, LayoutStyle, RendererRegistry,
};
use crate::models::{parse_value_for_kind, ItemKind, Tile};

/// Editing state for one tile.
#[derive(Debug, Clone)]
pub struct EditSession<'r> {
    tile: Tile,
    triple: FormTriple,
    data: FormData,
    registry: &'r RendererRegistry,
}

impl<'r> EditSession<'r> {
    /// Opens a session by projecting the tile.
    pub fn new(tile: Tile, style: LayoutStyle, registry: &'r RendererRegistry) -> Self {
        let triple = project_tile(&tile, style);
        let data = triple.data.clone();
        debug!(tile = %tile.id, fields = data.len(), "Opened edit session");
        Self {
            tile,
            triple,
            data,
            registry,
        }
    }

    /// The tile as it was when the session opened.
    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// The projected schema, UI schema and initial data.
    pub fn triple(&self) -> &FormTriple {
        &self.triple
    }

    /// Current working data.
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Editor selected for every field, in layout order.
    pub fn editors(&self) -> Vec<(String, EditorKind)> {
        self.triple
            .uischema
            .controls()
            .into_iter()
            .filter_map(|control| {
                let editor = self.registry.select(control, &self.triple.schema);
                control.field_key().map(|key| (key.to_string(), editor))
            })
            .collect()
    }

    /// Item kind behind a field key.
    pub fn kind_of(&self, key: &str) -> Option<ItemKind> {
        self.tile
            .items
            .iter()
            .enumerate()
            .find(|(idx, item)| field_key(&item.label, *idx) == key)
            .map(|(_, item)| item.kind)
    }

    /// Sets one field to a JSON value.
    pub fn set_field(&mut self, key: &str, value: Value) -> Result<()> {
        match self.data.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => bail!("Unknown field '{key}' in tile '{}'", self.tile.id),
        }
    }

    /// Sets one field from raw text, parsing it according to the item kind.
    ///
    /// ID numbers are filtered to digits and truncated the way the editor
    /// filters keystrokes.
    pub fn set_field_text(&mut self, key: &str, raw: &str) -> Result<()> {
        let Some(kind) = self.kind_of(key) else {
            bail!("Unknown field '{key}' in tile '{}'", self.tile.id);
        };
        let value = match kind {
            ItemKind::Aadhaar => Value::String(sanitize_national_id(raw)),
            _ => parse_value_for_kind(raw, kind).to_json(),
        };
        self.set_field(key, value)
    }

    /// Replaces the whole working data, as a form renderer does on change.
    ///
    /// Keys that do not belong to the tile are kept but ignored on save.
    pub fn replace_data(&mut self, data: FormData) {
        for key in data.keys().filter(|k| !self.triple.data.contains_key(*k)) {
            warn!(tile = %self.tile.id, key = %key, "Ignoring unknown form field");
        }
        self.data = data;
    }

    /// Discards all edits.
    pub fn reset(&mut self) {
        self.data = self.triple.data.clone();
    }

    /// Returns true if the working data differs from the initial data.
    pub fn is_dirty(&self) -> bool {
        self.data != self.triple.data
    }

    /// Validates the working data.
    pub fn validate(&self) -> Vec<FieldError> {
        validate_form(&self.triple, self.registry, &self.data)
    }

    /// Validates and merges the working data into an updated tile.
    pub fn save(&self) -> Result<Tile, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            debug!(tile = %self.tile.id, errors = errors.len(), "Save blocked by validation");
            return Err(errors);
        }
        Ok(apply_form_data(&self.tile, &self.data))
    }
}
