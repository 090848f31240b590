//! Editor core configuration.
//!
//! Centralizes the constants used throughout the crate.
//! Seed file contents are loaded at compile time using `include_str!`.

use serde::Deserialize;

use crate::models::SeedNode;

// =============================================================================
// Seed Assets (loaded at compile time)
// =============================================================================

/// Example workflow shown when the editor opens.
pub const SEED_MAIN_YAML: &str = include_str!("../assets/seed/main.yaml");

/// Example storage document with application settings.
pub const SEED_CONFIG_YAML: &str = include_str!("../assets/seed/config.yaml");

/// Example storage document with server inventories.
pub const SEED_SERVERS_YAML: &str = include_str!("../assets/seed/servers.yaml");

// =============================================================================
// Workspace Configuration
// =============================================================================

/// Reserved id of the workspace root.
pub const ROOT_ID: &str = "root";

/// Name of the workspace root. Never appears in exported paths.
pub const ROOT_NAME: &str = "root";

/// Extension given to newly created files.
pub const DEFAULT_FILE_EXTENSION: &str = ".yaml";

/// Stem of the default name for newly created files.
pub const DEFAULT_FILE_STEM: &str = "newfile";

/// Default name for newly created directories.
pub const DEFAULT_FOLDER_NAME: &str = "newfolder";

/// File selected in the primary pane when a session starts.
pub const DEFAULT_SELECTED_FILE: &str = "main.yaml";

/// Default name for a newly created file (`newfile.yaml`).
pub fn default_file_name() -> String {
    format!("{}{}", DEFAULT_FILE_STEM, DEFAULT_FILE_EXTENSION)
}

/// Initial children of the workspace root.
///
/// Ids are assigned in depth-first order at construction, so `main.yaml`
/// gets `1`, `storage` gets `2` and so on.
pub fn default_seed() -> Vec<SeedNode> {
    vec![
        SeedNode::file("main.yaml", SEED_MAIN_YAML),
        SeedNode::dir(
            "storage",
            vec![
                SeedNode::file("config.yaml", SEED_CONFIG_YAML),
                SeedNode::file("servers.yaml", SEED_SERVERS_YAML),
            ],
        ),
    ]
}

// =============================================================================
// Storage Configuration
// =============================================================================

/// Name of directories whose documents feed variable completion.
pub const STORAGE_DIR_NAME: &str = "storage";

/// Extensions recognised for storage documents.
pub const STORAGE_EXTENSIONS: &[&str] = &[".yaml"];

/// Which files count as storage documents.
///
/// Deserializable so a host can pass overrides as JSON; missing fields
/// keep the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageOptions {
    /// Directory name that marks a storage directory
    pub directory_name: String,
    /// File name suffixes that mark storage documents (matched in order)
    pub extensions: Vec<String>,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            directory_name: STORAGE_DIR_NAME.to_string(),
            extensions: STORAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StorageOptions {
    /// Document name for a storage file, or `None` if the extension is not recognised.
    pub fn document_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.extensions
            .iter()
            .find_map(|ext| file_name.strip_suffix(ext.as_str()))
    }
}

// =============================================================================
// Completion Configuration
// =============================================================================

/// Sort key prefix that hoists variable suggestions above the defaults.
pub const VARIABLE_SORT_PREFIX: &str = "0_";

// =============================================================================
// Export Configuration
// =============================================================================

/// Default here-document sentinel.
pub const HEREDOC_SENTINEL: &str = "EOF";

/// Export script settings.
pub mod export {
    /// Interpreter line of the self-extracting script.
    pub const SHEBANG: &str = "#!/bin/bash";

    /// Comment lines written after the shebang.
    pub const SETUP_COMMENTS: &[&str] = &[
        "# Cocoon project bootstrap",
        "# Recreates the workflow project in the current directory.",
    ];

    /// Shell options set before the body runs.
    pub const SETUP_COMMAND: &str = "set -e";

    /// Messages echoed once the layout is written.
    pub const TRAILING_ECHOES: &[&str] = &[
        "echo \"Cocoon project created.\"",
        "echo \"Edit main.yaml to start your workflow.\"",
    ];
}
