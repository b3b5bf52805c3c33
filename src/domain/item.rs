//! To-do item domain model

use chrono::{Local, NaiveDate};
use colored::Colorize;

/// Date format used everywhere an item date is rendered or persisted
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Task description
    pub text: String,

    /// Whether the task has been completed
    pub done: bool,

    /// When the task was added (day granularity)
    pub added_on: NaiveDate,

    /// When the task was completed (if done)
    pub done_on: Option<NaiveDate>,
}

impl Item {
    /// Creates a new undone item stamped with today's date
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
            added_on: Local::now().date_naive(),
            done_on: None,
        }
    }

    /// Reconstructs an item from persisted fields
    pub fn from_parts(
        text: impl Into<String>,
        done: bool,
        added_on: NaiveDate,
        done_on: Option<NaiveDate>,
    ) -> Self {
        Self {
            text: text.into(),
            done,
            added_on,
            done_on,
        }
    }

    /// Marks the item done and stamps the completion date.
    ///
    /// The transition is one-directional: there is no way back to undone.
    /// Marking an already-done item refreshes `done_on`.
    pub fn mark_done(&mut self) {
        self.done = true;
        self.done_on = Some(Local::now().date_naive());
    }

    /// Returns the colored status label
    pub fn status(&self) -> String {
        if self.done {
            "done".green().to_string()
        } else {
            "undone".red().to_string()
        }
    }

    /// Renders the item for listings: `[status][date] text`
    pub fn display(&self) -> String {
        format!(
            "[{}][{}] {}",
            self.status(),
            self.added_on.format(DATE_FORMAT).to_string().blue(),
            self.text
        )
    }
}
