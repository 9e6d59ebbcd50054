pub mod alert;
pub mod controls;
pub mod input_panel;
pub mod results_table;

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::ui::line_input::LineInput;
use crate::ui::theme::ThemeColors;

/// Spans for an editable field, padded to `width` columns. The cursor is
/// drawn only when the field has focus.
pub fn field_spans<'a>(
    input: &'a LineInput,
    focused: bool,
    width: usize,
    colors: &ThemeColors,
) -> Vec<Span<'a>> {
    let field = Style::default().fg(colors.fg()).bg(colors.field_bg());
    let cursor = Style::default()
        .fg(colors.cursor_fg())
        .bg(colors.cursor_bg())
        .add_modifier(Modifier::BOLD);

    let used = input.value().chars().count() + usize::from(focused);
    let pad = " ".repeat(width.saturating_sub(used));

    if !focused {
        return vec![
            Span::styled(input.value(), field),
            Span::styled(pad, field),
        ];
    }

    let (before, at, after) = input.render_parts();
    let mut spans = vec![Span::styled(before, field)];
    match at {
        Some(ch) => {
            spans.push(Span::styled(ch.to_string(), cursor));
            spans.push(Span::styled(after, field));
            // the cursor sits on an existing char, so one more pad column
            spans.push(Span::styled(format!("{pad} "), field));
        }
        None => {
            spans.push(Span::styled(" ", cursor));
            spans.push(Span::styled(pad, field));
        }
    }
    spans
}
