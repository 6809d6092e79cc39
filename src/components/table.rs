use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use searchable_table::TableRow;

use crate::theme::ThemeColors;

/// Two-line rows: name on top, formatted date below.
pub const ROW_HEIGHT: u16 = 2;

/// Table widget rendering the current view, one two-line row per item.
pub struct TableWidget<'a> {
    rows: &'a [TableRow],
    selected: usize,
    scroll_offset: usize,
    editing: bool,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> TableWidget<'a> {
    pub fn new(rows: &'a [TableRow], theme: &'a ThemeColors) -> Self {
        Self {
            rows,
            selected: 0,
            scroll_offset: 0,
            editing: false,
            theme,
            block: None,
        }
    }

    pub fn selected(mut self, selected: usize, scroll_offset: usize) -> Self {
        self.selected = selected;
        self.scroll_offset = scroll_offset;
        self
    }

    /// Show the per-row edit affordance.
    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> Widget for TableWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            let line = Line::from(Span::styled(
                "No items",
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::ITALIC),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let visible_rows = (inner.height / ROW_HEIGHT) as usize;
        for (i, (idx, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_rows)
            .enumerate()
        {
            let y = inner.y + i as u16 * ROW_HEIGHT;
            let is_selected = idx == self.selected;

            let (name_style, detail_style) = if is_selected {
                let base = Style::default()
                    .bg(self.theme.row_selected_bg)
                    .fg(self.theme.row_selected_fg);
                (base.add_modifier(Modifier::BOLD), base)
            } else {
                (
                    Style::default().fg(self.theme.row_fg),
                    Style::default().fg(self.theme.row_detail_fg),
                )
            };

            if is_selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, ROW_HEIGHT), name_style);
            }

            // Leading marker: delete/rename affordance in edit mode, cursor otherwise.
            let marker = match (self.editing, is_selected) {
                (true, _) => Span::styled("⊖ ", Style::default().fg(self.theme.error_fg)),
                (false, true) => Span::styled("▸ ", Style::default().fg(self.theme.accent_fg)),
                (false, false) => Span::raw("  "),
            };
            let name_line = Line::from(vec![marker, Span::styled(row.name.as_str(), name_style)]);
            buf.set_line(inner.x, y, &name_line, inner.width);

            // Disclosure indicator on the right.
            if inner.width > 4 {
                let indicator = Span::styled("›", Style::default().fg(self.theme.dim_fg));
                buf.set_span(inner.x + inner.width - 2, y, &indicator, 1);
            }

            let detail_line = Line::from(vec![
                Span::raw("  "),
                Span::styled(row.detail.as_str(), detail_style),
            ]);
            buf.set_line(inner.x, y + 1, &detail_line, inner.width);
        }
    }
}
