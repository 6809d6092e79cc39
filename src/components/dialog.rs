use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::{AppMode, DialogKind, DialogState};
use crate::theme::ThemeColors;

/// Dialog widget that renders a centered modal overlay.
pub struct DialogWidget<'a> {
    mode: &'a AppMode,
    dialog_state: &'a DialogState,
    theme: &'a ThemeColors,
}

impl<'a> DialogWidget<'a> {
    pub fn new(mode: &'a AppMode, dialog_state: &'a DialogState, theme: &'a ThemeColors) -> Self {
        Self {
            mode,
            dialog_state,
            theme,
        }
    }
}

/// Calculate a centered rectangle within the given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(x, y, w, h)
}

impl<'a> Widget for DialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let AppMode::Dialog(kind) = self.mode else {
            return;
        };

        match kind {
            DialogKind::AddItem => render_prompt(
                "Enter a name",
                "Please enter a name",
                "[Enter] Create  [Esc] Cancel",
                self.dialog_state,
                self.theme,
                area,
                buf,
            ),
            DialogKind::Rename { .. } => render_prompt(
                "Enter a name",
                "Please enter a new name",
                "[Enter] Rename  [Esc] Cancel",
                self.dialog_state,
                self.theme,
                area,
                buf,
            ),
            DialogKind::DeleteConfirm { name, .. } => {
                render_confirm(name, self.theme, area, buf);
            }
            DialogKind::Alert { title, message } => {
                render_alert(title, message, self.theme, area, buf);
            }
        }
    }
}

fn hint_line(hint: &str, theme: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(theme.dim_fg).add_modifier(Modifier::DIM),
    ))
}

fn render_prompt(
    title: &str,
    message: &str,
    hint: &str,
    state: &DialogState,
    theme: &ThemeColors,
    area: Rect,
    buf: &mut Buffer,
) {
    let dialog_width = 50.min(area.width.saturating_sub(4));
    let dialog_height = 6;
    let rect = centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border_fg))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let msg_line = Line::from(Span::styled(message.to_string(), Style::default().fg(theme.row_fg)));
    buf.set_line(inner.x, inner.y, &msg_line, inner.width);

    // Input line with cursor
    let input = &state.input;
    let cursor_pos = state.cursor_position;
    let max_width = inner.width as usize;

    let (before, cursor_char, after) = match input[cursor_pos..].chars().next() {
        Some(ch) => {
            let end = cursor_pos + ch.len_utf8();
            (&input[..cursor_pos], &input[cursor_pos..end], &input[end..])
        }
        None => (input.as_str(), " ", ""),
    };

    // Keep the cursor visible by trimming from the left.
    let before_chars = before.chars().count();
    let room = max_width.saturating_sub(2);
    let before_display: String = if before_chars > room {
        before.chars().skip(before_chars - room).collect()
    } else {
        before.to_string()
    };

    let input_style = Style::default().fg(theme.search_fg);
    let cursor_style = Style::default()
        .bg(theme.search_fg)
        .fg(theme.status_bg)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(before_display, input_style),
        Span::styled(cursor_char, cursor_style),
        Span::styled(after, input_style),
    ]);
    if inner.height > 1 {
        buf.set_line(inner.x, inner.y + 2.min(inner.height - 1), &line, inner.width);
    }

    if inner.height > 3 {
        buf.set_line(
            inner.x,
            inner.y + inner.height - 1,
            &hint_line(hint, theme),
            inner.width,
        );
    }
}

fn render_confirm(name: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (name.chars().count() as u16 + 10)
        .max(40)
        .min(area.width.saturating_sub(4));
    let dialog_height = 6;
    let rect = centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let block = Block::default()
        .title(" Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error_fg))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let header = Line::from(Span::styled(
        "Delete this item?",
        Style::default()
            .fg(theme.warning_fg)
            .add_modifier(Modifier::BOLD),
    ));
    buf.set_line(inner.x, inner.y, &header, inner.width);

    if inner.height > 1 {
        let line = Line::from(Span::styled(
            format!("  • {}", name),
            Style::default().fg(theme.row_fg),
        ));
        buf.set_line(inner.x, inner.y + 1, &line, inner.width);
    }

    if inner.height > 2 {
        buf.set_line(
            inner.x,
            inner.y + inner.height - 1,
            &hint_line("[y] Yes  [n/Esc] Cancel", theme),
            inner.width,
        );
    }
}

fn render_alert(title: &str, message: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (message.chars().count() as u16 + 6)
        .max(30)
        .min(area.width.saturating_sub(4));
    let dialog_height = 5;
    let rect = centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error_fg))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let msg_line = Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.error_fg),
    ));
    buf.set_line(inner.x, inner.y + inner.height / 2, &msg_line, inner.width);

    if inner.height > 1 {
        buf.set_line(
            inner.x,
            inner.y + inner.height - 1,
            &hint_line("[Enter/Esc] Dismiss", theme),
            inner.width,
        );
    }
}
