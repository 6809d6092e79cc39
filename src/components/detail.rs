use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use searchable_table::{DateFormat, Item};

use crate::theme::ThemeColors;

/// Full-screen view of a single item, reached by selecting a row.
pub struct DetailWidget<'a> {
    item: &'a Item,
    date_format: &'a DateFormat,
    theme: &'a ThemeColors,
}

impl<'a> DetailWidget<'a> {
    pub fn new(item: &'a Item, date_format: &'a DateFormat, theme: &'a ThemeColors) -> Self {
        Self {
            item,
            date_format,
            theme,
        }
    }
}

impl<'a> Widget for DetailWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.item.name))
            .title_bottom(Line::from(" [Esc] Back ").right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused_fg));

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                self.item.name.as_str(),
                Style::default()
                    .fg(self.theme.row_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                self.date_format.detail(&self.item.date),
                Style::default().fg(self.theme.row_detail_fg),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use chrono::{Local, TimeZone};

    #[test]
    fn shows_name_and_full_date() {
        let tc = theme::dark_theme();
        let date = Local.with_ymd_and_hms(2024, 1, 5, 15, 4, 9).unwrap();
        let item = Item::new("Groceries", date);
        let fmt = DateFormat::new("%b", "%Y-%m-%d %H:%M:%S");

        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        DetailWidget::new(&item, &fmt, &tc).render(area, &mut buf);

        let mut content = String::new();
        for y in 0..8 {
            for x in 0..60 {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            content.push('\n');
        }
        assert!(content.contains(" Groceries "));
        assert!(content.contains("2024-01-05 15:04:09"));
        assert!(content.contains("Back"));
    }
}
