//! todo-cli - An interactive to-do list manager for the terminal
//!
//! Items live in an ordered in-memory list and are persisted to a flat
//! text file, one `|`-separated record per line. The binary presents a
//! five-operation menu (List, Add, Delete, Done, Search) when run without
//! a subcommand, and a scripted subcommand surface for non-interactive use.

pub mod domain;
pub mod store;
pub mod storage;
pub mod cli;

pub use domain::Item;
pub use store::{StoreError, TodoList};
