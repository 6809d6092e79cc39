//! Data-provider capability consumed by the table controller, plus a
//! generic `Vec`-backed provider for hosts that just hold a list of items.

use std::fmt;

use chrono::{DateTime, Local};

/// Timestamp attached to every table item.
pub type Timestamp = DateTime<Local>;

/// Access to the host's item collection.
///
/// Rows are addressed by their index in the host's backing collection. The
/// controller never touches the collection directly; every mutation goes
/// through this trait and is followed by a full reload.
pub trait TableDataSource {
    /// Number of items in the collection.
    fn count(&self) -> usize;

    /// Display name of the item at `index`.
    fn name(&self, index: usize) -> &str;

    /// Timestamp of the item at `index`.
    fn date(&self, index: usize) -> Timestamp;

    /// Append a new item called `name`.
    fn add(&mut self, name: &str);

    /// The user picked the item at `index`. Typically used to navigate to it.
    fn select(&mut self, index: usize);

    /// Remove the item at `index`.
    fn delete(&mut self, index: usize);

    /// Rename the item at `index` to `name`.
    fn rename(&mut self, index: usize, name: &str);
}

impl<S: TableDataSource + ?Sized> TableDataSource for Box<S> {
    fn count(&self) -> usize {
        (**self).count()
    }

    fn name(&self, index: usize) -> &str {
        (**self).name(index)
    }

    fn date(&self, index: usize) -> Timestamp {
        (**self).date(index)
    }

    fn add(&mut self, name: &str) {
        (**self).add(name)
    }

    fn select(&mut self, index: usize) {
        (**self).select(index)
    }

    fn delete(&mut self, index: usize) {
        (**self).delete(index)
    }

    fn rename(&mut self, index: usize, name: &str) {
        (**self).rename(index, name)
    }
}

/// An element that can live in an [`ItemList`].
///
/// Items are ordered by `date()`, newest first, when displayed.
pub trait TableItem {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn date(&self) -> Timestamp;

    /// Build a fresh item for the add action.
    fn create(name: String, date: Timestamp) -> Self;
}

/// Plain named, dated item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub date: Timestamp,
}

impl Item {
    pub fn new(name: impl Into<String>, date: Timestamp) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TableItem for Item {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn date(&self) -> Timestamp {
        self.date
    }

    fn create(name: String, date: Timestamp) -> Self {
        Self::new(name, date)
    }
}

/// `Vec`-backed data source over any [`TableItem`].
///
/// New items are stamped with the current local time. `select` records a
/// pending navigation that the host collects with [`ItemList::take_selection`].
#[derive(Debug, Clone, Default)]
pub struct ItemList<T> {
    items: Vec<T>,
    pending_selection: Option<usize>,
}

impl<T: TableItem> ItemList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            pending_selection: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Take the index recorded by the last `select`, if any.
    pub fn take_selection(&mut self) -> Option<usize> {
        self.pending_selection.take()
    }
}

impl ItemList<Item> {
    /// Demo data: `Item 0..count`, each ten seconds older than the previous.
    pub fn demo(count: usize, now: Timestamp) -> Self {
        let items = (0..count)
            .map(|i| {
                Item::new(
                    format!("Item {}", i),
                    now - chrono::Duration::seconds(i as i64 * 10),
                )
            })
            .collect();
        Self::new(items)
    }
}

impl<T: TableItem> TableDataSource for ItemList<T> {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn name(&self, index: usize) -> &str {
        self.items[index].name()
    }

    fn date(&self, index: usize) -> Timestamp {
        self.items[index].date()
    }

    fn add(&mut self, name: &str) {
        self.items.push(T::create(name.to_string(), Local::now()));
    }

    fn select(&mut self, index: usize) {
        self.pending_selection = Some(index);
    }

    fn delete(&mut self, index: usize) {
        self.items.remove(index);
    }

    fn rename(&mut self, index: usize, name: &str) {
        self.items[index].set_name(name.to_string());
    }
}
