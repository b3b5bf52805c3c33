//! Backing-file location for the todo list
//!
//! Resolution order: the `--file` flag, then the `TODO_FILE` environment
//! variable (both handled by clap), then `todo` under the platform data
//! directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// File name of the persisted list
pub const LIST_FILE_NAME: &str = "todo";

/// Returns the platform data directory for the tool
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "todo-cli", "todo").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Returns the default list file location.
///
/// Falls back to the current directory when no platform data directory
/// can be determined.
pub fn default_list_path() -> PathBuf {
    data_dir()
        .map(|dir| dir.join(LIST_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LIST_FILE_NAME))
}
