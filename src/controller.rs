//! The searchable table controller.
//!
//! `SearchableTable` keeps a derived view over a [`TableDataSource`]: the
//! source's indices sorted newest first and narrowed by the search text. The
//! view is rebuilt from scratch after every search change and every mutation,
//! and every row position coming from the user is resolved through it.

use tracing::{debug, info};

use crate::date_format::DateFormat;
use crate::error::TableError;
use crate::source::TableDataSource;

/// One rendered row: primary and secondary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub detail: String,
}

/// Sorting, filtering and edit handling for a table backed by `S`.
pub struct SearchableTable<S> {
    source: S,
    /// Source indices currently on screen, in display order.
    view: Vec<usize>,
    search_text: String,
    editing: bool,
    stop_edit_after_rename: bool,
    redraw_requested: bool,
}

impl<S: TableDataSource> SearchableTable<S> {
    /// Wrap `source` and build the initial view.
    pub fn new(source: S) -> Self {
        let mut table = Self {
            source,
            view: Vec::new(),
            search_text: String::new(),
            editing: false,
            stop_edit_after_rename: false,
            redraw_requested: false,
        };
        table.reload();
        table
    }

    /// Leave edit mode after each successful rename.
    pub fn with_stop_edit_after_rename(mut self, stop: bool) -> Self {
        self.stop_edit_after_rename = stop;
        self
    }

    /// Rebuild the view: sort every source index newest first, then keep the
    /// ones whose name contains the search text (case-insensitive).
    pub fn reload(&mut self) {
        let source = &self.source;
        let mut indices: Vec<usize> = (0..source.count()).collect();
        // Stable: equal timestamps keep source order.
        indices.sort_by(|&a, &b| source.date(b).cmp(&source.date(a)));

        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            indices.retain(|&i| source.name(i).to_lowercase().contains(&needle));
        }

        debug!(
            total = source.count(),
            shown = indices.len(),
            search = %self.search_text,
            "table reloaded"
        );
        self.view = indices;
        self.redraw_requested = true;
    }

    /// Replace the search text and reload.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.reload();
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Add a new item called `name`.
    pub fn add_item(&mut self, name: &str) -> Result<(), TableError> {
        if name.is_empty() {
            return Err(TableError::EmptyName { renaming: false });
        }
        info!(item = name, "adding item");
        self.source.add(name);
        self.reload();
        Ok(())
    }

    /// Handle the result of the "new item" prompt. No value counts as empty.
    pub fn confirm_add(&mut self, input: Option<String>) -> Result<(), TableError> {
        self.add_item(input.as_deref().unwrap_or(""))
    }

    /// Rename the item shown at `row`.
    pub fn rename_item(&mut self, row: usize, name: &str) -> Result<(), TableError> {
        let index = self.resolve(row)?;
        if name.is_empty() {
            return Err(TableError::EmptyName { renaming: true });
        }
        info!(index, new_name = name, "renaming item");
        self.source.rename(index, name);
        self.reload();
        if self.stop_edit_after_rename {
            self.editing = false;
        }
        Ok(())
    }

    /// Handle the result of the rename prompt for the item shown at `row`.
    pub fn confirm_rename(&mut self, row: usize, input: Option<String>) -> Result<(), TableError> {
        let name = input.ok_or(TableError::PromptFailure)?;
        self.rename_item(row, &name)
    }

    /// Delete the item shown at `row`.
    pub fn delete_item(&mut self, row: usize) -> Result<(), TableError> {
        let index = self.resolve(row)?;
        info!(index, "deleting item");
        self.source.delete(index);
        self.reload();
        Ok(())
    }

    /// Forward a pick of the item shown at `row` to the source.
    pub fn select_item(&mut self, row: usize) -> Result<(), TableError> {
        let index = self.resolve(row)?;
        info!(index, "selecting item");
        self.source.select(index);
        Ok(())
    }

    /// Source index of the item shown at `row`.
    pub fn source_index(&self, row: usize) -> Option<usize> {
        self.view.get(row).copied()
    }

    fn resolve(&self, row: usize) -> Result<usize, TableError> {
        self.source_index(row).ok_or(TableError::NoSuchRow(row))
    }

    /// Source indices in display order.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// Number of rows on screen.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Name of the item shown at `row`.
    pub fn name_at(&self, row: usize) -> Option<&str> {
        self.source_index(row).map(|i| self.source.name(i))
    }

    /// Text for every row on screen, dates formatted with `format`.
    pub fn rows(&self, format: &DateFormat) -> Vec<TableRow> {
        self.view
            .iter()
            .map(|&i| TableRow {
                name: self.source.name(i).to_string(),
                detail: format.row(&self.source.date(i)),
            })
            .collect()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    /// Returns `true` once after each reload.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run `f` against the source, then reload so the view matches it again.
    pub fn update_source<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let result = f(&mut self.source);
        self.reload();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Item, ItemList, Timestamp};
    use chrono::{Local, TimeZone};

    fn at(secs: i64) -> Timestamp {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn table(items: &[(&str, i64)]) -> SearchableTable<ItemList<Item>> {
        let items = items
            .iter()
            .map(|&(name, t)| Item::new(name, at(t)))
            .collect();
        SearchableTable::new(ItemList::new(items))
    }

    fn names<S: TableDataSource>(table: &SearchableTable<S>) -> Vec<String> {
        (0..table.len())
            .map(|row| table.name_at(row).unwrap().to_string())
            .collect()
    }

    #[test]
    fn reload_sorts_newest_first() {
        let t = table(&[("B", 10), ("A", 20)]);
        assert_eq!(t.view(), &[1, 0]);
        assert_eq!(names(&t), ["A", "B"]);
    }

    #[test]
    fn search_narrows_and_clearing_restores() {
        let mut t = table(&[("B", 10), ("A", 20)]);
        t.set_search_text("b");
        assert_eq!(names(&t), ["B"]);
        t.set_search_text("");
        assert_eq!(names(&t), ["A", "B"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut t = table(&[("Shopping List", 1), ("shop", 2), ("Workshop", 3), ("Notes", 4)]);
        t.set_search_text("SHOP");
        assert_eq!(names(&t), ["Workshop", "shop", "Shopping List"]);
    }

    #[test]
    fn deleting_search_characters_widens_results() {
        let mut t = table(&[("apple", 1), ("apricot", 2), ("banana", 3)]);
        t.set_search_text("a");
        t.set_search_text("ap");
        t.set_search_text("app");
        assert_eq!(names(&t), ["apple"]);
        t.set_search_text("ap");
        assert_eq!(names(&t), ["apricot", "apple"]);
        t.set_search_text("a");
        assert_eq!(names(&t), ["banana", "apricot", "apple"]);
    }

    #[test]
    fn empty_source_gives_empty_view() {
        let mut t = table(&[]);
        assert!(t.is_empty());
        t.set_search_text("x");
        assert!(t.is_empty());
        assert!(t.rows(&DateFormat::default()).is_empty());
    }

    #[test]
    fn equal_timestamps_keep_source_order() {
        let t = table(&[("first", 5), ("second", 5), ("newer", 9), ("third", 5)]);
        assert_eq!(t.view(), &[2, 0, 1, 3]);
    }

    #[test]
    fn add_empty_name_is_rejected() {
        let mut t = table(&[("A", 1)]);
        assert_eq!(t.add_item(""), Err(TableError::EmptyName { renaming: false }));
        assert_eq!(t.source().count(), 1);
    }

    #[test]
    fn add_appears_on_next_unfiltered_reload() {
        let mut t = table(&[("A", 1), ("B", 2)]);
        t.add_item("X").unwrap();
        assert_eq!(t.source().count(), 3);
        // Stamped with the current time, so it sorts first.
        assert_eq!(names(&t), ["X", "B", "A"]);
    }

    #[test]
    fn add_while_filtered_respects_filter() {
        let mut t = table(&[("alpha", 1), ("beta", 2)]);
        t.set_search_text("alp");
        t.add_item("gamma").unwrap();
        assert_eq!(names(&t), ["alpha"]);
        t.set_search_text("");
        assert_eq!(names(&t), ["gamma", "beta", "alpha"]);
    }

    #[test]
    fn confirm_add_without_value_is_empty_name() {
        let mut t = table(&[]);
        assert_eq!(t.confirm_add(None), Err(TableError::EmptyName { renaming: false }));
        assert_eq!(
            t.confirm_add(Some(String::new())),
            Err(TableError::EmptyName { renaming: false })
        );
        t.confirm_add(Some("new".into())).unwrap();
        assert_eq!(names(&t), ["new"]);
    }

    #[test]
    fn delete_targets_visible_row_not_source_index() {
        // Source order: old(0), mid(1), new(2). View order: new, mid, old.
        let mut t = table(&[("old", 1), ("mid", 2), ("new", 3)]);
        t.delete_item(0).unwrap();
        assert_eq!(names(&t), ["mid", "old"]);
        assert_eq!(t.source().count(), 2);
    }

    #[test]
    fn delete_through_filtered_view() {
        let mut t = table(&[("keep one", 1), ("drop me", 2), ("keep two", 3)]);
        t.set_search_text("drop");
        t.delete_item(0).unwrap();
        assert!(t.is_empty());
        t.set_search_text("");
        assert_eq!(names(&t), ["keep two", "keep one"]);
    }

    #[test]
    fn rename_empty_name_leaves_name_unchanged() {
        let mut t = table(&[("A", 1)]);
        assert_eq!(t.rename_item(0, ""), Err(TableError::EmptyName { renaming: true }));
        assert_eq!(t.name_at(0), Some("A"));
    }

    #[test]
    fn rename_targets_visible_row() {
        let mut t = table(&[("old", 1), ("new", 2)]);
        t.rename_item(1, "renamed").unwrap();
        assert_eq!(t.source().name(0), "renamed");
        assert_eq!(t.source().name(1), "new");
    }

    #[test]
    fn rename_can_drop_item_out_of_filter() {
        let mut t = table(&[("task", 1)]);
        t.set_search_text("task");
        t.rename_item(0, "chore").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn confirm_rename_without_value_is_prompt_failure() {
        let mut t = table(&[("A", 1)]);
        assert_eq!(t.confirm_rename(0, None), Err(TableError::PromptFailure));
        assert_eq!(
            t.confirm_rename(0, Some(String::new())),
            Err(TableError::EmptyName { renaming: true })
        );
        t.confirm_rename(0, Some("B".into())).unwrap();
        assert_eq!(t.name_at(0), Some("B"));
    }

    #[test]
    fn rename_leaves_edit_mode_only_when_configured() {
        let mut t = table(&[("A", 1)]);
        t.set_editing(true);
        t.rename_item(0, "B").unwrap();
        assert!(t.is_editing());

        let mut t = table(&[("A", 1)]).with_stop_edit_after_rename(true);
        t.set_editing(true);
        assert_eq!(t.rename_item(0, ""), Err(TableError::EmptyName { renaming: true }));
        assert!(t.is_editing());
        t.rename_item(0, "B").unwrap();
        assert!(!t.is_editing());
    }

    #[test]
    fn select_forwards_source_index_without_reload() {
        let mut t = table(&[("old", 1), ("new", 2)]);
        t.take_redraw();
        t.select_item(1).unwrap();
        assert!(!t.take_redraw());
        assert_eq!(t.update_source(ItemList::take_selection), Some(0));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn update_source_keeps_view_in_sync() {
        let mut t = table(&[("B", 10), ("A", 20)]);
        t.take_redraw();
        t.update_source(|s| s.delete(0));
        assert!(t.take_redraw());
        assert_eq!(t.view(), &[0]);
        let rows = t.rows(&DateFormat::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "A");
        assert_eq!(t.delete_item(1), Err(TableError::NoSuchRow(1)));
    }

    #[test]
    fn out_of_range_row_is_rejected() {
        let mut t = table(&[("A", 1)]);
        assert_eq!(t.delete_item(3), Err(TableError::NoSuchRow(3)));
        assert_eq!(t.select_item(1), Err(TableError::NoSuchRow(1)));
        assert_eq!(t.rename_item(5, "x"), Err(TableError::NoSuchRow(5)));
        assert_eq!(t.source().count(), 1);
    }

    #[test]
    fn every_reload_requests_one_redraw() {
        let mut t = table(&[("A", 1)]);
        assert!(t.take_redraw());
        assert!(!t.take_redraw());
        t.set_search_text("a");
        assert!(t.take_redraw());
        assert_eq!(t.add_item(""), Err(TableError::EmptyName { renaming: false }));
        assert!(!t.take_redraw());
    }

    #[test]
    fn rows_use_given_format() {
        let t = table(&[("A", 0)]);
        let fmt = DateFormat::new("%s", "%s");
        let rows = t.rows(&fmt);
        assert_eq!(
            rows,
            vec![TableRow {
                name: "A".into(),
                detail: "1700000000".into(),
            }]
        );
    }

    #[test]
    fn filter_matches_property_over_incremental_edits() {
        let words = ["Alpha", "alphabet", "Beta", "BETAMAX", "gamma", "Delta", "ALP"];
        let items: Vec<(&str, i64)> = words
            .iter()
            .enumerate()
            .map(|(i, w)| (*w, (i as i64 * 7) % 5))
            .collect();
        let mut t = table(&items);
        for query in ["a", "al", "alp", "al", "a", "", "et", "eta", "e", "", "ZZ", ""] {
            t.set_search_text(query);
            let needle = query.to_lowercase();
            let mut expected: Vec<usize> = (0..words.len())
                .filter(|&i| words[i].to_lowercase().contains(&needle))
                .collect();
            expected.sort();
            let mut actual = t.view().to_vec();
            actual.sort();
            assert_eq!(actual, expected, "query {:?}", query);
            for pair in t.view().windows(2) {
                assert!(t.source().date(pair[0]) >= t.source().date(pair[1]));
            }
        }
    }

    #[test]
    fn works_with_boxed_trait_object() {
        let source: Box<dyn TableDataSource> = Box::new(ItemList::new(vec![
            Item::new("one", at(1)),
            Item::new("two", at(2)),
        ]));
        let mut t = SearchableTable::new(source);
        assert_eq!(names(&t), ["two", "one"]);
        t.delete_item(1).unwrap();
        assert_eq!(names(&t), ["two"]);
    }
}
