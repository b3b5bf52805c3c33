//! Domain models for the todo CLI
//!
//! Contains the core item type without any I/O concerns.

mod item;

pub use item::{Item, DATE_FORMAT};
