//! Formatting of completion documentation.

use serde_json::Value;

use crate::models::ValueType;

/// Documentation text for a storage variable: its type and pretty JSON value.
pub fn describe_value(value_type: ValueType, value: &Value) -> String {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    format!("Type: {}\nValue: {}", value_type, rendered)
}

/// Documentation text for a shell command suggestion.
pub fn describe_command(command: &str) -> String {
    format!("Linux command: {}", command)
}
