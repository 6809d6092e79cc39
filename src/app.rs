use std::time::Instant;

use chrono::Local;
use tracing::info;

use searchable_table::{DateFormat, Item, ItemList, SearchableTable, TableError};

use crate::config::AppConfig;
use crate::theme::{self, ThemeColors};

/// The kind of dialog being displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// "Enter a name" prompt for a new item.
    AddItem,
    /// Rename prompt for the item shown at `row`.
    Rename { row: usize },
    /// Confirm deleting the item shown at `row`.
    DeleteConfirm { row: usize, name: String },
    /// Modal error message.
    Alert { title: String, message: String },
}

/// Application mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// Keystrokes go to the search bar.
    Search,
    Dialog(DialogKind),
    /// Detail screen for the item at this source index.
    Detail { index: usize },
}

/// State for a dialog's text input.
#[derive(Debug, Default)]
pub struct DialogState {
    pub input: String,
    pub cursor_position: usize,
}

/// Main application state.
pub struct App {
    pub table: SearchableTable<ItemList<Item>>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub mode: AppMode,
    pub dialog_state: DialogState,
    pub status_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub title: String,
    pub date_format: DateFormat,
    pub theme: ThemeColors,
    pub confirm_delete: bool,
}

impl App {
    /// Build the demo screen from resolved configuration.
    pub fn new(config: &AppConfig, date_format: DateFormat) -> Self {
        let items = ItemList::demo(config.item_count(), Local::now());
        let table = SearchableTable::new(items)
            .with_stop_edit_after_rename(config.stop_edit_after_rename());
        Self {
            table,
            selected: 0,
            scroll_offset: 0,
            mode: AppMode::Normal,
            dialog_state: DialogState::default(),
            status_message: None,
            should_quit: false,
            title: config.title().to_string(),
            date_format,
            theme: theme::resolve_theme(&config.theme),
            confirm_delete: config.confirm_delete(),
        }
    }

    // ── Dialogs ─────────────────────────────────────────────────────────────

    /// Open a dialog of the given kind.
    pub fn open_dialog(&mut self, kind: DialogKind) {
        self.dialog_state = DialogState::default();
        if let DialogKind::Rename { row } = kind {
            if let Some(name) = self.table.name_at(row) {
                self.dialog_state.cursor_position = name.len();
                self.dialog_state.input = name.to_string();
            }
        }
        self.mode = AppMode::Dialog(kind);
    }

    /// Close the current dialog and return to normal mode.
    pub fn close_dialog(&mut self) {
        self.mode = AppMode::Normal;
        self.dialog_state = DialogState::default();
    }

    /// Show a table error as a modal alert.
    pub fn show_error(&mut self, err: TableError) {
        self.open_dialog(DialogKind::Alert {
            title: err.title().to_string(),
            message: err.to_string(),
        });
    }

    /// Confirm the open dialog (Enter, or `y` on the delete confirmation).
    pub fn confirm_dialog(&mut self) {
        let AppMode::Dialog(kind) = self.mode.clone() else {
            return;
        };
        let input = std::mem::take(&mut self.dialog_state.input);
        self.close_dialog();

        let result = match kind {
            DialogKind::AddItem => self.table.confirm_add(Some(input.clone())).map(|()| {
                self.select_newest_source_item();
                format!("Created '{}'", input)
            }),
            DialogKind::Rename { row } => self
                .table
                .confirm_rename(row, Some(input.clone()))
                .map(|()| format!("Renamed to '{}'", input)),
            DialogKind::DeleteConfirm { row, name } => self
                .table
                .delete_item(row)
                .map(|()| format!("Deleted '{}'", name)),
            DialogKind::Alert { .. } => return,
        };

        match result {
            Ok(msg) => {
                self.clamp_selection();
                self.set_status_message(msg);
            }
            Err(err) => self.show_error(err),
        }
    }

    /// Insert a character at the current cursor position.
    pub fn dialog_input_char(&mut self, c: char) {
        self.dialog_state
            .input
            .insert(self.dialog_state.cursor_position, c);
        self.dialog_state.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn dialog_delete_char(&mut self) {
        if let Some(prev) = self.dialog_state.input[..self.dialog_state.cursor_position]
            .chars()
            .next_back()
        {
            self.dialog_state.cursor_position -= prev.len_utf8();
            self.dialog_state
                .input
                .remove(self.dialog_state.cursor_position);
        }
    }

    /// Move cursor left by one character.
    pub fn dialog_move_cursor_left(&mut self) {
        if let Some(prev) = self.dialog_state.input[..self.dialog_state.cursor_position]
            .chars()
            .next_back()
        {
            self.dialog_state.cursor_position -= prev.len_utf8();
        }
    }

    /// Move cursor right by one character.
    pub fn dialog_move_cursor_right(&mut self) {
        if let Some(next) = self.dialog_state.input[self.dialog_state.cursor_position..]
            .chars()
            .next()
        {
            self.dialog_state.cursor_position += next.len_utf8();
        }
    }

    pub fn dialog_cursor_home(&mut self) {
        self.dialog_state.cursor_position = 0;
    }

    pub fn dialog_cursor_end(&mut self) {
        self.dialog_state.cursor_position = self.dialog_state.input.len();
    }

    // ── Search ──────────────────────────────────────────────────────────────

    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
    }

    pub fn stop_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn search_input_char(&mut self, c: char) {
        let mut text = self.table.search_text().to_string();
        text.push(c);
        self.update_search(text);
    }

    pub fn search_delete_char(&mut self) {
        let mut text = self.table.search_text().to_string();
        if text.pop().is_some() {
            self.update_search(text);
        }
    }

    pub fn clear_search(&mut self) {
        self.update_search(String::new());
    }

    fn update_search(&mut self, text: String) {
        self.table.set_search_text(text);
        self.selected = 0;
        self.scroll_offset = 0;
    }

    // ── Row actions ─────────────────────────────────────────────────────────

    /// Enter on a row: rename in edit mode, otherwise open the item.
    pub fn activate_selected(&mut self) {
        if self.table.is_empty() {
            return;
        }
        if self.table.is_editing() {
            self.open_dialog(DialogKind::Rename { row: self.selected });
            return;
        }
        if let Err(err) = self.table.select_item(self.selected) {
            self.show_error(err);
            return;
        }
        if let Some(index) = self.table.update_source(ItemList::take_selection) {
            self.mode = AppMode::Detail { index };
        }
    }

    /// Delete the selected row, asking first when configured to.
    pub fn request_delete(&mut self) {
        let Some(name) = self.table.name_at(self.selected).map(str::to_string) else {
            return;
        };
        if self.confirm_delete {
            self.open_dialog(DialogKind::DeleteConfirm {
                row: self.selected,
                name,
            });
            return;
        }
        match self.table.delete_item(self.selected) {
            Ok(()) => {
                self.clamp_selection();
                self.set_status_message(format!("Deleted '{}'", name));
            }
            Err(err) => self.show_error(err),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.table.toggle_editing();
        info!(editing = self.table.is_editing(), "edit mode toggled");
    }

    /// Leave the detail screen.
    pub fn close_detail(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// The item on the detail screen, if it is open.
    pub fn detail_item(&self) -> Option<&Item> {
        match self.mode {
            AppMode::Detail { index } => self.table.source().get(index),
            _ => None,
        }
    }

    fn select_newest_source_item(&mut self) {
        let newest = self.table.source().items().len().saturating_sub(1);
        if let Some(row) = self.table.view().iter().position(|&i| i == newest) {
            self.selected = row;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.table.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        let len = self.table.len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by one row.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.table.len().saturating_sub(1);
    }

    /// Keep the selected row inside a window of `visible_height` rows.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }

    // ── Status ──────────────────────────────────────────────────────────────

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message once it has been shown for 3 seconds.
    /// Returns `true` if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        let expired = matches!(
            self.status_message,
            Some((_, created)) if created.elapsed().as_secs() >= 3
        );
        if expired {
            self.status_message = None;
        }
        expired
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
