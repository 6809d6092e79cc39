use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::detail::DetailWidget;
use crate::components::dialog::DialogWidget;
use crate::components::search_bar::SearchBarWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::components::table::{TableWidget, ROW_HEIGHT};

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    if let Some(item) = app.detail_item() {
        frame.render_widget(DetailWidget::new(item, &app.date_format, &app.theme), area);
        return;
    }

    let [search_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(ROW_HEIGHT + 2),
        Constraint::Length(1),
    ])
    .areas(area);

    // Keep the selected row visible (account for the border).
    let visible_rows = (table_area.height.saturating_sub(2) / ROW_HEIGHT) as usize;
    app.update_scroll(visible_rows);

    let search = SearchBarWidget::new(app.table.search_text(), app.table.len(), &app.theme)
        .focused(app.mode == AppMode::Search);
    frame.render_widget(search, search_area);

    let rows = app.table.rows(&app.date_format);
    let title_style = if app.table.is_editing() {
        Style::default()
            .fg(app.theme.warning_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .title(format!(" {} ", app.title))
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_fg));
    let table = TableWidget::new(&rows, &app.theme)
        .selected(app.selected, app.scroll_offset)
        .editing(app.table.is_editing())
        .block(block);
    frame.render_widget(table, table_area);

    let total = app.table.source().items().len();
    let mut status = StatusBarWidget::new(app.table.len(), total, &app.theme)
        .editing(app.table.is_editing());
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg);
    }
    frame.render_widget(status, status_area);

    if matches!(app.mode, AppMode::Dialog(_)) {
        frame.render_widget(
            DialogWidget::new(&app.mode, &app.dialog_state, &app.theme),
            area,
        );
    }
}
