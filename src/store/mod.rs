//! In-memory item store
//!
//! [`TodoList`] holds the ordered sequence of items plus its backing file.
//! Indices are positional: deleting an item shifts everything after it
//! left by one, so callers must re-fetch indices after any structural
//! change.

use std::path::Path;

use anyhow::Result;
use regex::Regex;
use thiserror::Error;

use crate::domain::Item;
use crate::storage::{ListFile, FIELD_SEPARATOR};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item text must not be empty")]
    EmptyText,

    #[error("item text must not contain '|' or a newline")]
    ReservedCharacter,

    #[error("no item at index {0}")]
    IndexOutOfRange(usize),
}

/// Compiled search pattern, kept until the keyword changes
struct Matcher {
    keyword: String,
    pattern: Regex,
}

impl Matcher {
    fn compile(keyword: &str) -> Self {
        // Escaped input always forms a valid pattern
        let pattern =
            Regex::new(&regex::escape(keyword)).expect("escaped keyword is a valid pattern");
        Self {
            keyword: keyword.to_string(),
            pattern,
        }
    }
}

/// The ordered in-memory todo list with persistence
pub struct TodoList {
    items: Vec<Item>,
    file: ListFile,
    matcher: Option<Matcher>,
}

impl TodoList {
    /// Creates an empty list backed by the given file
    pub fn new(file: ListFile) -> Self {
        Self {
            items: Vec::new(),
            file,
            matcher: None,
        }
    }

    /// Loads the list from its backing file.
    ///
    /// A missing file yields an empty list. A malformed record fails with
    /// the offending line number.
    pub fn load(file: ListFile) -> Result<Self> {
        let items = file.read_all()?;
        Ok(Self {
            items,
            file,
            matcher: None,
        })
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns all items in current order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders every item for display, in list order
    pub fn display_all(&self) -> Vec<String> {
        self.items.iter().map(Item::display).collect()
    }

    /// Renders undone items for display, relative order preserved
    pub fn display_undone(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|i| !i.done)
            .map(Item::display)
            .collect()
    }

    /// Indices of undone items, in list order. Parallel to
    /// [`display_undone`](Self::display_undone), so a pick from that
    /// rendering maps back to a real index.
    pub fn undone_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, i)| !i.done)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Appends a new undone item stamped with today's date and returns
    /// its index.
    ///
    /// Rejects empty text and text containing the record format's
    /// reserved bytes (`|`, newline).
    pub fn add(&mut self, text: &str) -> Result<usize, StoreError> {
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        if text.contains(FIELD_SEPARATOR) || text.contains('\n') {
            return Err(StoreError::ReservedCharacter);
        }

        self.items.push(Item::new(text));
        Ok(self.items.len() - 1)
    }

    /// Marks the item at `index` done and stamps its completion date.
    ///
    /// Marking twice refreshes the stamp; the item never reverts to
    /// undone.
    pub fn done(&mut self, index: usize) -> Result<(), StoreError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange(index))?;
        item.mark_done();
        Ok(())
    }

    /// Removes the item at `index`, shifting later items left by one
    pub fn del(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.items.len() {
            return Err(StoreError::IndexOutOfRange(index));
        }
        self.items.remove(index);
        Ok(())
    }

    /// Returns the items whose text contains `keyword`, in list order.
    ///
    /// Matching is case-sensitive literal substring: the keyword is
    /// escaped before compiling, so metacharacters have no special
    /// meaning. An empty keyword matches every item. An empty result is
    /// a normal value, not an error.
    pub fn search(&mut self, keyword: &str) -> Vec<&Item> {
        if self.matcher.as_ref().map_or(true, |m| m.keyword != keyword) {
            self.matcher = Some(Matcher::compile(keyword));
        }
        let Some(matcher) = self.matcher.as_ref() else {
            return Vec::new();
        };

        self.items
            .iter()
            .filter(|i| matcher.pattern.is_match(&i.text))
            .collect()
    }

    /// Writes the full list to the backing file, replacing prior content.
    ///
    /// Safe to call repeatedly; each call is an independent rewrite. The
    /// in-memory list stays valid if the write fails.
    pub fn flush(&self) -> Result<()> {
        self.file.write_all(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn empty_list(dir: &TempDir) -> TodoList {
        TodoList::new(ListFile::new(dir.path().join("todo")))
    }

    #[test]
    fn add_appends_and_returns_index() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);

        assert_eq!(list.add("buy milk").unwrap(), 0);
        assert_eq!(list.add("write report").unwrap(), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].text, "buy milk");
    }

    #[test]
    fn add_rejects_empty_text() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);

        assert!(matches!(list.add(""), Err(StoreError::EmptyText)));
        assert!(list.is_empty());
    }

    #[test]
    fn add_rejects_reserved_characters() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);

        assert!(matches!(
            list.add("a|b"),
            Err(StoreError::ReservedCharacter)
        ));
        assert!(matches!(
            list.add("a\nb"),
            Err(StoreError::ReservedCharacter)
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn done_marks_item_and_stamps_date() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("buy milk").unwrap();

        list.done(0).unwrap();

        assert!(list.items()[0].done);
        assert!(list.items()[0].done_on.is_some());
    }

    #[test]
    fn done_is_monotonic() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("buy milk").unwrap();

        list.done(0).unwrap();
        list.done(0).unwrap();

        assert!(list.items()[0].done);
        assert!(list.items()[0].done_on.is_some());
    }

    #[test]
    fn done_rejects_out_of_range_index() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("buy milk").unwrap();

        assert!(matches!(list.done(1), Err(StoreError::IndexOutOfRange(1))));
        assert!(matches!(list.done(5), Err(StoreError::IndexOutOfRange(5))));
    }

    #[test]
    fn del_shifts_later_items_left() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("alpha").unwrap();
        list.add("beta").unwrap();

        list.del(0).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].text, "beta");
    }

    #[test]
    fn del_rejects_out_of_range_index() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);

        assert!(matches!(list.del(0), Err(StoreError::IndexOutOfRange(0))));
    }

    #[test]
    fn search_matches_literal_substring() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("buy milk").unwrap();
        list.add("write report").unwrap();

        let found = list.search("milk");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "buy milk");
    }

    #[test]
    fn search_preserves_relative_order() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("task one").unwrap();
        list.add("other").unwrap();
        list.add("task two").unwrap();

        let found = list.search("task");
        let texts: Vec<&str> = found.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["task one", "task two"]);
    }

    #[test]
    fn search_with_empty_keyword_matches_everything() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("buy milk").unwrap();
        list.add("write report").unwrap();

        assert_eq!(list.search("").len(), 2);
    }

    #[test]
    fn search_escapes_metacharacters() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("a.b").unwrap();
        list.add("axb").unwrap();

        // A raw regex "." would match both; the literal dot matches one
        let found = list.search(".");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "a.b");
    }

    #[test]
    fn search_with_no_match_returns_empty() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("buy milk").unwrap();

        assert!(list.search("xyz").is_empty());
    }

    #[test]
    fn cached_matcher_does_not_leak_across_keywords() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("buy milk").unwrap();
        list.add("write report").unwrap();

        // Same keyword twice reuses the matcher; results must not change
        assert_eq!(list.search("milk").len(), 1);
        assert_eq!(list.search("milk").len(), 1);

        // A different keyword must recompile, not reuse the stale matcher
        let found = list.search("report");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "write report");
    }

    #[test]
    fn empty_list_queries() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);

        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.display_all().is_empty());
        assert!(list.display_undone().is_empty());
        assert!(list.search("anything").is_empty());
    }

    #[test]
    fn is_empty_tracks_len() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);

        list.add("buy milk").unwrap();
        assert!(!list.is_empty());

        list.del(0).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn undone_views_filter_done_items() {
        let dir = TempDir::new().unwrap();
        let mut list = empty_list(&dir);
        list.add("one").unwrap();
        list.add("two").unwrap();
        list.add("three").unwrap();
        list.done(1).unwrap();

        assert_eq!(list.display_undone().len(), 2);
        assert_eq!(list.undone_indices(), vec![0, 2]);
        assert_eq!(list.display_all().len(), 3);
    }

    #[test]
    fn flush_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");

        let mut list = TodoList::new(ListFile::new(&path));
        list.add("buy milk").unwrap();
        list.add("write report").unwrap();
        list.done(0).unwrap();
        list.flush().unwrap();

        let loaded = TodoList::load(ListFile::new(&path)).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.items()[0].text, "buy milk");
        assert!(loaded.items()[0].done);
        assert!(loaded.items()[0].done_on.is_some());
        assert_eq!(loaded.items()[1].text, "write report");
        assert!(!loaded.items()[1].done);
        assert_eq!(loaded.items(), list.items());
    }

    #[test]
    fn round_trip_after_delete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");

        let mut list = TodoList::new(ListFile::new(&path));
        list.add("alpha").unwrap();
        list.add("beta").unwrap();
        list.add("gamma").unwrap();
        list.del(1).unwrap();
        list.flush().unwrap();

        let loaded = TodoList::load(ListFile::new(&path)).unwrap();
        let texts: Vec<&str> = loaded.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "gamma"]);
    }

    #[test]
    fn flush_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");

        let mut list = TodoList::new(ListFile::new(&path));
        list.add("buy milk").unwrap();
        list.flush().unwrap();
        list.flush().unwrap();

        let loaded = TodoList::load(ListFile::new(&path)).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn flush_of_empty_list_truncates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");

        let mut list = TodoList::new(ListFile::new(&path));
        list.add("buy milk").unwrap();
        list.flush().unwrap();

        list.del(0).unwrap();
        list.flush().unwrap();

        let loaded = TodoList::load(ListFile::new(&path)).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn load_missing_file_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let list = TodoList::load(ListFile::new(dir.path().join("todo"))).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");
        std::fs::write(&path, "not a record\n").unwrap();

        assert!(TodoList::load(ListFile::new(&path)).is_err());
    }
}
