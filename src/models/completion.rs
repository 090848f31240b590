//! Completion data types exchanged with the editor host.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

// =============================================================================
// Suggestions
// =============================================================================

/// Completion item kind, mirroring the editor widget's categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Keyword,
    Property,
    Function,
    Variable,
}

/// Character columns (0-based, end exclusive) replaced by a suggestion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRange {
    pub start_column: usize,
    pub end_column: usize,
}

impl WordRange {
    pub fn new(start_column: usize, end_column: usize) -> Self {
        Self {
            start_column,
            end_column,
        }
    }

    /// Empty range at a column.
    pub fn at(column: usize) -> Self {
        Self::new(column, column)
    }
}

/// A single completion item.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub label: String,
    pub insert_text: String,
    pub kind: SuggestionKind,
    pub documentation: String,
    pub detail: Option<String>,
    pub range: WordRange,
    pub sort_key: Option<String>,
}

// =============================================================================
// Storage Variables
// =============================================================================

/// Type of a value parsed from a storage document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `${doc.path}` reference derived from a storage document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablePath {
    /// Full reference text, e.g. `${config.app.name}`
    pub path: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Parsed subvalue, kept for display
    pub value: Value,
}

impl VariablePath {
    /// Reference without the surrounding `${` and `}`.
    pub fn reference(&self) -> &str {
        self.path
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(&self.path)
    }
}
