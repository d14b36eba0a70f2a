//! Plain-text report, as printed on a terminal.

use kosmorro_search::EphemerisResult;

use crate::format::{
    EPHEMERIS_HEADERS, current_phase_line, ephemeris_row, long_date, next_phase_line,
    timezone_note,
};
use crate::{Payload, RenderOptions, Renderer};

/// Column separator of the rise/set table.
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, result: &EphemerisResult, _options: &RenderOptions) -> Payload {
        Payload::Text(render_text(result))
    }
}

/// Lay out a table with left-aligned columns and a dashed rule.
fn table_lines(rows: &[[String; 4]]) -> Vec<String> {
    let mut widths = EPHEMERIS_HEADERS.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let line = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(EPHEMERIS_HEADERS));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP),
    );
    for row in rows {
        lines.push(line([&row[0], &row[1], &row[2], &row[3]].map(String::as_str)));
    }
    lines
}

/// The text report.
///
/// Header date, blank, optional rise/set table followed by a blank, current
/// phase, next phase, blank, timezone note. Always ends with a newline.
pub fn render_text(result: &EphemerisResult) -> String {
    let mut lines = vec![long_date(result.header_date()), String::new()];

    if let Some(rows) = result.ephemerides() {
        let rows: Vec<_> = rows.iter().map(ephemeris_row).collect();
        lines.extend(table_lines(&rows));
        lines.push(String::new());
    }

    lines.push(current_phase_line(result));
    lines.push(next_phase_line(result));
    lines.push(String::new());
    lines.push(timezone_note(result));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [&str; 4]) -> [String; 4] {
        cells.map(str::to_string)
    }

    #[test]
    fn table_columns_align() {
        let lines = table_lines(&[
            row(["Sun", "07:58", "12:18", "16:38"]),
            row(["Moon", "18:03", "-", "10:54"]),
        ]);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Object  Rise time  Culmination time  Set time");
        assert_eq!(lines[1], "------  ---------  ----------------  --------");
        assert_eq!(lines[2], "Sun     07:58      12:18             16:38");
        assert_eq!(lines[3], "Moon    18:03      -                 10:54");
    }
}
