use std::fmt::Display;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};

/// Row subtitle pattern, e.g. `Jan 05, 2024 3:04 PM`.
pub const DEFAULT_ROW_FORMAT: &str = "%b %d, %Y %-I:%M %p";
/// Pattern used on the item detail screen.
pub const DEFAULT_DETAIL_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Date patterns handed to whatever renders table rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    row: String,
    detail: String,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            row: DEFAULT_ROW_FORMAT.to_string(),
            detail: DEFAULT_DETAIL_FORMAT.to_string(),
        }
    }
}

impl DateFormat {
    pub fn new(row: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            detail: detail.into(),
        }
    }

    /// Like [`DateFormat::new`], but rejects patterns chrono cannot format.
    pub fn parse(row: &str, detail: &str) -> Result<Self, String> {
        for pattern in [row, detail] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(format!("invalid date format: {:?}", pattern));
            }
        }
        Ok(Self::new(row, detail))
    }

    pub fn row_pattern(&self) -> &str {
        &self.row
    }

    pub fn detail_pattern(&self) -> &str {
        &self.detail
    }

    /// Format a timestamp for a table row.
    pub fn row<Tz>(&self, date: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        date.format(&self.row).to_string()
    }

    /// Format a timestamp for the detail screen.
    pub fn detail<Tz>(&self, date: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        date.format(&self.detail).to_string()
    }
}
