//! Context-sensitive completion for workflow files.
//!
//! The line up to the caret decides what is offered:
//! - Inside an unclosed `${` - references into storage documents
//! - After `run:` - common shell commands
//! - Anywhere else - workflow keywords
//!
//! Classification is purely lexical; the buffer being edited is never parsed.

mod tables;

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{StorageOptions, VARIABLE_SORT_PREFIX};
use crate::core::{Snapshot, StorageIndex};
use crate::models::{Suggestion, SuggestionKind, VariablePath, WordRange};
use crate::utils::{describe_command, describe_value, prefix_at};

pub use tables::{Keyword, KEYWORDS, SHELL_COMMANDS};

// ============================================================================
// Context Classification
// ============================================================================

/// `${` followed by anything but a closing brace, up to the caret.
static VARIABLE_CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*$").expect("variable pattern is valid"));

/// `run:` with an optional opening quote and no further quotes.
static RUN_CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"run:\s*['"]?[^'"]*$"#).expect("run pattern is valid"));

/// Lexical context of the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// Inside `${...` - storage variable references.
    Variable,
    /// After `run:` - shell commands.
    RunLine,
    /// Anything else - workflow keywords.
    Default,
}

impl CompletionContext {
    /// Classify the text preceding the caret.
    pub fn classify(prefix: &str) -> Self {
        if VARIABLE_CONTEXT.is_match(prefix) {
            Self::Variable
        } else if RUN_CONTEXT.is_match(prefix) {
            Self::RunLine
        } else {
            Self::Default
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Suggestions for the caret at `caret_column` of `line`.
///
/// The storage index is rebuilt from `snapshot` for every variable request,
/// so documents created since the last call are always included.
pub fn complete(
    snapshot: &Snapshot,
    options: &StorageOptions,
    line: &str,
    caret_column: usize,
    range: WordRange,
) -> Vec<Suggestion> {
    let context = CompletionContext::classify(prefix_at(line, caret_column));
    let variables = match context {
        CompletionContext::Variable => StorageIndex::build(snapshot, options).flatten_paths(),
        _ => Vec::new(),
    };
    suggest(context, range, &variables)
}

/// Build the suggestion list for an already classified context.
///
/// `variables` is only read in [`CompletionContext::Variable`].
pub fn suggest(
    context: CompletionContext,
    range: WordRange,
    variables: &[VariablePath],
) -> Vec<Suggestion> {
    match context {
        CompletionContext::Variable => variables
            .iter()
            .map(|var| variable_suggestion(var, range))
            .collect(),
        CompletionContext::RunLine => SHELL_COMMANDS
            .iter()
            .map(|cmd| command_suggestion(cmd, range))
            .collect(),
        CompletionContext::Default => KEYWORDS
            .iter()
            .map(|keyword| keyword_suggestion(keyword, range))
            .collect(),
    }
}

// ============================================================================
// Suggestion Builders
// ============================================================================

fn variable_suggestion(var: &VariablePath, range: WordRange) -> Suggestion {
    Suggestion {
        label: var.path.clone(),
        insert_text: var.reference().to_string(),
        kind: SuggestionKind::Variable,
        documentation: describe_value(var.value_type, &var.value),
        detail: Some(var.value_type.to_string()),
        range,
        sort_key: Some(format!("{}{}", VARIABLE_SORT_PREFIX, var.path)),
    }
}

fn command_suggestion(command: &str, range: WordRange) -> Suggestion {
    Suggestion {
        label: command.to_string(),
        insert_text: command.to_string(),
        kind: SuggestionKind::Function,
        documentation: describe_command(command),
        detail: None,
        range,
        sort_key: None,
    }
}

fn keyword_suggestion(keyword: &Keyword, range: WordRange) -> Suggestion {
    Suggestion {
        label: keyword.label.to_string(),
        insert_text: keyword.insert_text.to_string(),
        kind: keyword.kind,
        documentation: keyword.documentation.to_string(),
        detail: Some(keyword.detail.to_string()),
        range,
        sort_key: None,
    }
}

// ============================================================================
// Tests
// ============================================================================
