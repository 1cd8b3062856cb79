//! Editor selection for form controls.
//!
//! Each registry entry pairs a ranked tester with the editor it selects. For
//! a given control the highest-ranked matching tester wins; ties go to the
//! earlier entry. When nothing matches, the plain text editor is used.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::schema::{DataSchema, SchemaType, UiElement, FORMAT_DATE, FORMAT_NATIONAL_ID};
use crate::forms::validation::validate_national_id_value;

/// Field editor kinds known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorKind {
    /// Single-line text input
    Text,
    /// Numeric input
    Number,
    /// Checkbox
    Checkbox,
    /// Date picker
    Date,
    /// 12-digit national ID number input
    NationalId,
}

impl EditorKind {
    /// Human-readable editor name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Checkbox => "Checkbox",
            Self::Date => "Date",
            Self::NationalId => "National ID",
        }
    }

    /// Validates a value as this editor would before allowing save.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            Self::NationalId => validate_national_id_value(value),
            Self::Text | Self::Number | Self::Checkbox | Self::Date => Ok(()),
        }
    }
}

/// Predicate over a UI element and the data schema it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tester {
    /// Element is a control
    IsControl,
    /// Control scope contains the text (case-insensitive)
    ScopeContains(String),
    /// Control scope ends with the text
    ScopeEndsWith(String),
    /// Property has the given primitive type
    SchemaType(SchemaType),
    /// Property carries the given format marker
    FormatIs(String),
    /// All inner testers match
    And(Vec<Tester>),
}

impl Tester {
    /// Evaluates the tester.
    pub fn matches(&self, element: &UiElement, schema: &DataSchema) -> bool {
        match self {
            Self::IsControl => element.is_control(),
            Self::ScopeContains(needle) => element
                .scope()
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
            Self::ScopeEndsWith(suffix) => element
                .scope()
                .is_some_and(|s| s.ends_with(suffix.as_str())),
            Self::SchemaType(expected) => schema
                .resolve(element)
                .is_some_and(|p| p.schema_type == *expected),
            Self::FormatIs(marker) => schema
                .resolve(element)
                .and_then(|p| p.format.as_deref())
                .is_some_and(|f| f == marker),
            Self::And(testers) => testers.iter().all(|t| t.matches(element, schema)),
        }
    }
}

/// A tester with a priority rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTester {
    /// Priority; higher wins
    pub rank: u32,
    /// Predicate
    pub tester: Tester,
}

impl RankedTester {
    /// Creates a ranked tester.
    pub const fn new(rank: u32, tester: Tester) -> Self {
        Self { rank, tester }
    }

    /// Returns the rank if the tester applies, `None` otherwise.
    pub fn rank_for(&self, element: &UiElement, schema: &DataSchema) -> Option<u32> {
        self.tester.matches(element, schema).then_some(self.rank)
    }
}

/// Ordered list of (tester, editor) pairs.
///
/// Built once at startup and passed explicitly to whatever renders or
/// validates a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererRegistry {
    entries: Vec<(RankedTester, EditorKind)>,
}

impl RendererRegistry {
    /// Creates an empty registry. Every control falls back to [`EditorKind::Text`].
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub fn with(mut self, rank: u32, tester: Tester, editor: EditorKind) -> Self {
        self.entries.push((RankedTester::new(rank, tester), editor));
        self
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selects the editor for a UI element.
    pub fn select(&self, element: &UiElement, schema: &DataSchema) -> EditorKind {
        let mut best: Option<(u32, EditorKind)> = None;

        for (tester, editor) in &self.entries {
            if let Some(rank) = tester.rank_for(element, schema) {
                if best.map_or(true, |(best_rank, _)| rank > best_rank) {
                    best = Some((rank, *editor));
                }
            }
        }

        best.map_or(EditorKind::Text, |(_, editor)| editor)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let control_of = |tester: Tester| Tester::And(vec![Tester::IsControl, tester]);

        Self::empty()
            .with(1, control_of(Tester::SchemaType(SchemaType::String)), EditorKind::Text)
            .with(2, control_of(Tester::SchemaType(SchemaType::Number)), EditorKind::Number)
            .with(2, control_of(Tester::SchemaType(SchemaType::Boolean)), EditorKind::Checkbox)
            .with(3, control_of(Tester::FormatIs(FORMAT_DATE.to_string())), EditorKind::Date)
            .with(
                4,
                control_of(Tester::FormatIs(FORMAT_NATIONAL_ID.to_string())),
                EditorKind::NationalId,
            )
    }
}
