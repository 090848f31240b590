//! Caret and word helpers working in character columns.
//!
//! Columns are 0-based character offsets into a single line, so
//! multi-byte text never splits inside a code point. Editor hosts running
//! in JavaScript count UTF-16 code units instead; convert at the boundary
//! with [`char_column_from_utf16`] and [`utf16_column_from_char`].

use crate::models::WordRange;

/// Characters that end a word, besides whitespace.
const WORD_SEPARATORS: &str = "`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

/// Text of `line` before `caret_column` (clamped to the line length).
pub fn prefix_at(line: &str, caret_column: usize) -> &str {
    match line.char_indices().nth(caret_column) {
        Some((byte, _)) => &line[..byte],
        None => line,
    }
}

/// Range of the word ending at the caret.
///
/// Starts at the first word character before the caret and ends at the
/// caret; empty when the caret follows a separator.
pub fn word_range_at(line: &str, caret_column: usize) -> WordRange {
    let prefix = prefix_at(line, caret_column);
    let end = prefix.chars().count();
    let word_len = prefix
        .chars()
        .rev()
        .take_while(|c| is_word_char(*c))
        .count();
    WordRange::new(end - word_len, end)
}

/// Character column for a UTF-16 column of `line`.
///
/// A column inside a surrogate pair maps to the character after it.
/// Columns past the end clamp to the line length.
pub fn char_column_from_utf16(line: &str, column: usize) -> usize {
    let mut units = 0;
    for (index, c) in line.chars().enumerate() {
        if units >= column {
            return index;
        }
        units += c.len_utf16();
    }
    line.chars().count()
}

/// UTF-16 column for a character column of `line`.
pub fn utf16_column_from_char(line: &str, column: usize) -> usize {
    line.chars().take(column).map(char::len_utf16).sum()
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !WORD_SEPARATORS.contains(c)
}
