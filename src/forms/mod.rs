//! JSON Forms projection, editor selection and field validation.
//!
//! A tile is projected into a [`FormTriple`] (data schema, UI schema and
//! initial data). A [`RendererRegistry`] decides which editor handles each
//! control, and the editors' validators decide whether edited data may be
//! saved back into the tile with [`apply_form_data`].

pub mod key;
pub mod projector;
pub mod renderers;
pub mod schema;
pub mod validation;

pub use key::field_key;
pub use projector::{apply_form_data, project_tile, FormTriple, LayoutStyle};
pub use renderers::{EditorKind, RankedTester, RendererRegistry, Tester};
pub use schema::{DataSchema, FormData, PropertySchema, SchemaType, UiElement};
pub use validation::{
    sanitize_national_id, validate_form, validate_national_id, FieldError, NATIONAL_ID_MESSAGE,
};
