use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::lab::nav::Focus;
use crate::ui::components::field_spans;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

const COUNT_FIELD_WIDTH: usize = 4;

/// Count field plus the generate and calculate buttons.
pub struct Controls<'a> {
    count: &'a LineInput,
    focus: Focus,
    has_fields: bool,
    theme: &'a Theme,
}

impl<'a> Controls<'a> {
    pub fn new(count: &'a LineInput, focus: Focus, has_fields: bool, theme: &'a Theme) -> Self {
        Self {
            count,
            focus,
            has_fields,
            theme,
        }
    }
}

impl Widget for Controls<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let button = |label: &'static str, focused: bool, enabled: bool| {
            let style = if focused {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else if enabled {
                Style::default().fg(colors.accent())
            } else {
                Style::default().fg(colors.muted())
            };
            Span::styled(label, style)
        };

        let count_focused = self.focus == Focus::CaseCount;
        let label_style = Style::default().fg(if count_focused {
            colors.accent()
        } else {
            colors.fg()
        });

        let mut spans = vec![Span::styled(" Number of test cases (1-10): ", label_style)];
        spans.extend(field_spans(
            self.count,
            count_focused,
            COUNT_FIELD_WIDTH,
            colors,
        ));
        spans.push(Span::raw("   "));
        spans.push(button(
            "[ Generate ]",
            self.focus == Focus::GenerateButton,
            true,
        ));
        spans.push(Span::raw("  "));
        spans.push(button(
            "[ Calculate ]",
            self.focus == Focus::CalculateButton,
            self.has_fields,
        ));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
