use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::theme::ThemeColors;

/// Persistent search input shown above the table.
pub struct SearchBarWidget<'a> {
    text: &'a str,
    focused: bool,
    match_count: usize,
    theme: &'a ThemeColors,
}

impl<'a> SearchBarWidget<'a> {
    pub fn new(text: &'a str, match_count: usize, theme: &'a ThemeColors) -> Self {
        Self {
            text,
            focused: false,
            match_count,
            theme,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for SearchBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_fg = if self.focused {
            self.theme.border_focused_fg
        } else {
            self.theme.border_fg
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_fg));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let count = (!self.text.is_empty()).then(|| {
            format!(
                "{} match{}",
                self.match_count,
                if self.match_count == 1 { "" } else { "es" }
            )
        });
        let count_width = count.as_ref().map_or(0, |c| c.len() as u16);
        let show_count = count.is_some() && inner.width > count_width + 4;

        let prompt_style = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled("/ ", prompt_style)];

        if self.text.is_empty() && !self.focused {
            spans.push(Span::styled(
                "Search",
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            // Keep the cursor visible by trimming from the left.
            let mut room = (inner.width as usize).saturating_sub(2);
            if show_count {
                room = room.saturating_sub(count_width as usize + 1);
            }
            if self.focused {
                room = room.saturating_sub(1);
            }
            let text_chars = self.text.chars().count();
            let shown: String = if text_chars > room {
                self.text.chars().skip(text_chars - room).collect()
            } else {
                self.text.to_string()
            };
            spans.push(Span::styled(shown, Style::default().fg(self.theme.search_fg)));
            if self.focused {
                spans.push(Span::styled(
                    " ",
                    Style::default()
                        .bg(self.theme.search_fg)
                        .fg(self.theme.status_bg),
                ));
            }
        }

        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);

        if let Some(count) = count.filter(|_| show_count) {
            let span = Span::styled(count, Style::default().fg(self.theme.dim_fg));
            buf.set_span(inner.x + inner.width - count_width, inner.y, &span, count_width);
        }
    }
}
