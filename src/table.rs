//! Plain-text table rendering for terminals.
//!
//! Columns are padded to the widest cell, separated by two spaces, and
//! trailing whitespace is dropped. Highlight colouring wraps a cell after its
//! padding is measured, so highlighted rows stay aligned.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::schedule::ScheduleGrid;

const HIGHLIGHT_START: &str = "\u{1b}[32m";
const HIGHLIGHT_END: &str = "\u{1b}[0m";

struct Layout {
    widths: Vec<usize>,
}

impl Layout {
    fn measure<'a>(headers: &[String], rows: impl Iterator<Item = &'a [String]>) -> Self {
        let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }
        for width in &mut widths {
            *width = (*width).max(1);
        }
        Self { widths }
    }

    fn separator(&self) -> String {
        let cells = self
            .widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>();
        self.line(&cells, None)
    }

    fn line(&self, values: &[String], colour: Option<&str>) -> String {
        let mut line = String::new();
        for (idx, (value, width)) in values.iter().zip(&self.widths).enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            let cell = sanitize_cell(value);
            let padding = width.saturating_sub(display_width(&cell));
            match colour {
                Some(code) => {
                    let _ = write!(line, "{code}{cell}{HIGHLIGHT_END}");
                }
                None => line.push_str(&cell),
            }
            line.push_str(&" ".repeat(padding));
        }
        line.truncate(line.trim_end().len());
        line
    }
}

/// Renders a header line, a dashed separator and one line per row.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let layout = Layout::measure(headers, rows.iter().map(Vec::as_slice));
    let mut output = String::new();
    let _ = writeln!(output, "{}", layout.line(headers, None));
    let _ = writeln!(output, "{}", layout.separator());
    for row in rows {
        let _ = writeln!(output, "{}", layout.line(row, None));
    }
    output
}

/// Renders a schedule grid; highlighted rows are coloured when `colour` is set.
pub fn render_grid(grid: &ScheduleGrid, colour: bool) -> String {
    let layout = Layout::measure(
        &grid.headers,
        grid.rows.iter().map(|row| row.cells.as_slice()),
    );
    let mut output = String::new();
    let _ = writeln!(output, "{}", layout.line(&grid.headers, None));
    let _ = writeln!(output, "{}", layout.separator());
    for row in &grid.rows {
        let code = (colour && row.highlight).then_some(HIGHLIGHT_START);
        let _ = writeln!(output, "{}", layout.line(&row.cells, code));
    }
    output
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

/// Replaces control characters (line breaks, tabs, stray escapes) with spaces
/// so sheet content cannot break the layout or drive the terminal.
fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if !value.chars().any(char::is_control) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .chars()
            .map(|ch| if ch.is_control() { ' ' } else { ch })
            .collect(),
    )
}
