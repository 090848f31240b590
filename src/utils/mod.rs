//! Text and formatting helpers.
//!
//! Provides:
//! - [`prefix_at`], [`word_range_at`] - Caret-relative line slicing
//! - [`char_column_from_utf16`], [`utf16_column_from_char`] - JS column conversion
//! - [`describe_value`], [`describe_command`] - Completion documentation strings

mod format;
mod text;

pub use format::{describe_command, describe_value};
pub use text::{char_column_from_utf16, prefix_at, utf16_column_from_char, word_range_at};
