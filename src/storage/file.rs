//! Flat-file persistence for the item list
//!
//! The whole list is rewritten on every flush: records are serialized to
//! a temp file next to the target, then renamed over it.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::line;
use crate::domain::Item;

/// The backing file for a todo list
pub struct ListFile {
    path: PathBuf,
}

impl ListFile {
    /// Creates a list file handle at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all items in file order. A missing file yields an empty list.
    pub fn read_all(&self) -> Result<Vec<Item>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open list file: {}", self.path.display()))?;

        let reader = BufReader::new(file);
        let mut items = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let item = line::decode(&line)
                .with_context(|| format!("Failed to parse item at line {}", line_num + 1))?;

            items.push(item);
        }

        Ok(items)
    }

    /// Writes all items to the file (full rewrite)
    pub fn write_all(&self, items: &[Item]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(file);

            for item in items {
                writeln!(writer, "{}", line::encode(item)).context("Failed to write item")?;
            }

            writer.flush().context("Failed to flush list file")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}
