use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::lab::constants::FIELDS_PER_CASE;
use crate::lab::form::InputForm;
use crate::ui::components::field_spans;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

const VALUE_WIDTH: usize = 12;

/// The generated reading fields, grouped by case and scrolled so the focused
/// field stays visible.
pub struct InputPanel<'a> {
    form: &'a InputForm,
    editors: &'a [LineInput],
    focused: Option<usize>,
    compact: bool,
    theme: &'a Theme,
}

impl<'a> InputPanel<'a> {
    pub fn new(
        form: &'a InputForm,
        editors: &'a [LineInput],
        focused: Option<usize>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            form,
            editors,
            focused,
            compact: false,
            theme,
        }
    }

    /// Use `V`, `I`, `T1`… instead of the long labels.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}

/// Line index of field `index`: each case takes a heading, its fields, and
/// a blank separator.
pub fn field_line(index: usize) -> usize {
    let case = index / FIELDS_PER_CASE;
    case * (FIELDS_PER_CASE + 2) + 1 + index % FIELDS_PER_CASE
}

/// First visible line so that `focused_line` sits near the middle of a
/// `height`-line viewport, without scrolling past the end.
pub fn scroll_offset(focused_line: usize, total_lines: usize, height: usize) -> usize {
    if height == 0 || total_lines <= height {
        return 0;
    }
    focused_line
        .saturating_sub(height / 2)
        .min(total_lines - height)
}

impl Widget for InputPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = format!(" Readings: {} case(s) ", self.form.case_count());
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(if self.focused.is_some() {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let label_width = if self.compact {
            3
        } else {
            self.form
                .fields()
                .iter()
                .map(|f| f.label.chars().count())
                .max()
                .unwrap_or(0)
        };

        let mut lines: Vec<Line> = Vec::new();
        for case in 1..=self.form.case_count() {
            lines.push(Line::from(Span::styled(
                format!(" Case {case}"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            for field in self.form.case_fields(case) {
                let index = field.id.index();
                let focused = self.focused == Some(index);
                let label = if self.compact {
                    field.id.kind().symbol()
                } else {
                    field.label.clone()
                };
                let marker = if focused { " > " } else { "   " };
                let label_style = if focused {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else if field.is_filled() {
                    Style::default().fg(colors.fg())
                } else {
                    Style::default().fg(colors.muted())
                };

                let mut spans = vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{label:<label_width$}  "), label_style),
                ];
                if let Some(editor) = self.editors.get(index) {
                    spans.extend(field_spans(editor, focused, VALUE_WIDTH, colors));
                }
                lines.push(Line::from(spans));
            }
            lines.push(Line::from(""));
        }

        let focused_line = self.focused.map_or(0, field_line);
        let offset = scroll_offset(focused_line, lines.len(), inner.height as usize);
        Paragraph::new(lines)
            .scroll((offset as u16, 0))
            .render(inner, buf);
    }
}
