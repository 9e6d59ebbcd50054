use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::app::Alert;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

pub struct AlertPopup<'a> {
    alert: &'a Alert,
    theme: &'a Theme,
}

impl<'a> AlertPopup<'a> {
    pub fn new(alert: &'a Alert, theme: &'a Theme) -> Self {
        Self { alert, theme }
    }
}

impl Widget for AlertPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let popup = centered_rect(50, 25, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.alert.title))
            .border_style(
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(colors.bg()));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.alert.message.as_str(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[any key] OK",
                Style::default().fg(colors.accent()),
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}
