//! # Command-Line Interface
//!
//! `todo` with no subcommand enters the interactive menu loop; the
//! subcommands (`list`, `add`, `done`, `delete`, `search`) are one-shot
//! scripted operations against the same list file.
//!
//! All commands support `--format text|json`, `--verbose`, and `--file`
//! (or `TODO_FILE`) to override the list location.

mod app;
mod menu;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
