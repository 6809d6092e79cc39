//! A searchable, editable table of named, dated items.
//!
//! The host owns the items and exposes them through [`TableDataSource`].
//! [`SearchableTable`] keeps the sorted, filtered view over them and routes
//! add, rename, delete and select actions back to the host.

pub mod controller;
pub mod date_format;
pub mod error;
pub mod source;

pub use controller::{SearchableTable, TableRow};
pub use date_format::DateFormat;
pub use error::TableError;
pub use source::{Item, ItemList, TableDataSource, TableItem, Timestamp};
