use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const LIST_HINTS: &str = " /:search a:add e:edit d:del q:quit ";
const EDIT_HINTS: &str = " ⏎:rename d:del e:done ";

/// Status bar widget: row counts and key hints, or a transient status message.
pub struct StatusBarWidget<'a> {
    shown: usize,
    total: usize,
    editing: bool,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(shown: usize, total: usize, theme: &'a ThemeColors) -> Self {
        Self {
            shown,
            total,
            editing: false,
            theme,
            status_message: None,
        }
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn status_message(mut self, msg: &'a str) -> Self {
        self.status_message = Some(msg);
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let bar_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        buf.set_style(area, bar_style);

        if let Some(msg) = self.status_message {
            let line = Line::from(Span::styled(
                format!(" {}", msg),
                Style::default().fg(self.theme.success_fg),
            ));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let count = if self.shown == self.total {
            format!(" {} items", self.total)
        } else {
            format!(" {} of {} items", self.shown, self.total)
        };

        let mut spans = vec![Span::styled(count, Style::default().fg(self.theme.status_fg))];
        if self.editing {
            spans.push(Span::styled(
                " EDIT",
                Style::default()
                    .fg(self.theme.warning_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let hints = if self.editing { EDIT_HINTS } else { LIST_HINTS };
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let hints_width = Span::raw(hints).width();
        if used + hints_width <= width {
            spans.push(Span::raw(" ".repeat(width - used - hints_width)));
            spans.push(Span::styled(
                hints,
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::DIM),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
