use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Cell, Row, Table, Widget};

use crate::lab::calc::CalculationResult;
use crate::lab::report::{HEADERS, row_cells};
use crate::ui::theme::Theme;

const COLUMN_GAP: u16 = 1;

pub struct ResultsTable<'a> {
    results: &'a [CalculationResult],
    theme: &'a Theme,
}

impl<'a> ResultsTable<'a> {
    pub fn new(results: &'a [CalculationResult], theme: &'a Theme) -> Self {
        Self { results, theme }
    }

    /// Rows needed to show every result in a pane `width` columns wide:
    /// borders, the (possibly wrapped) header, its gap and one line per case.
    pub fn required_height(&self, width: u16) -> u16 {
        let rows: Vec<[String; 8]> = self.results.iter().map(row_cells).collect();
        let (_, titles) = header_layout(width.saturating_sub(2), &rows);
        let header = titles.iter().map(Vec::len).max().unwrap_or(1) as u16;
        2 + header + 1 + rows.len() as u16
    }
}

/// Column widths. With `wrapped` the header only claims its longest word.
fn column_widths(rows: &[[String; 8]], wrapped: bool) -> [u16; 8] {
    let mut widths = HEADERS.map(|h| {
        let len = if wrapped {
            h.split(' ').map(|w| w.chars().count()).max().unwrap_or(0)
        } else {
            h.chars().count()
        };
        len as u16
    });
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count() as u16);
        }
    }
    widths
}

/// Greedy word wrap of a column title to `width` columns.
pub fn wrap_title(title: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    let mut lines: Vec<String> = Vec::new();
    for word in title.split(' ') {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 1 + word.chars().count() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }
    lines
}

/// Widths and header lines for a pane `available` columns wide. Titles stay
/// on one line when the whole table fits, otherwise they wrap.
pub fn header_layout(available: u16, rows: &[[String; 8]]) -> ([u16; 8], [Vec<String>; 8]) {
    let single = column_widths(rows, false);
    let needed = single.iter().sum::<u16>() + COLUMN_GAP * 7;
    let widths = if needed <= available {
        single
    } else {
        column_widths(rows, true)
    };
    let mut column = 0;
    let titles = HEADERS.map(|h| {
        let lines = wrap_title(h, widths[column]);
        column += 1;
        lines
    });
    (widths, titles)
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Results ")
            .border_style(Style::default().fg(colors.success()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);

        let rows: Vec<[String; 8]> = self.results.iter().map(row_cells).collect();
        let (widths, titles) = header_layout(inner.width, &rows);
        let header_height = titles.iter().map(Vec::len).max().unwrap_or(1) as u16;

        let header = Row::new(
            titles
                .into_iter()
                .map(|lines| Cell::from(Text::from(lines.join("\n")))),
        )
        .height(header_height)
        .style(
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

        let body = rows.into_iter().map(|cells| {
            let nan = cells.iter().any(|c| c == "NaN");
            let style = if nan {
                Style::default().fg(colors.error())
            } else {
                Style::default().fg(colors.fg())
            };
            Row::new(cells.into_iter().map(Cell::from)).style(style)
        });

        Table::new(body, widths.map(Constraint::Length))
            .header(header)
            .column_spacing(COLUMN_GAP)
            .block(block)
            .render(area, buf);
    }
}
