//! Single-page PDF report.
//!
//! Written directly as PDF 1.4 with the standard Helvetica fonts, so no font
//! is embedded. Layout: title, date, optional rise/set table, Moon phase,
//! optional 24-hour graph of the time each object spends above the horizon,
//! timezone note at the bottom.

use std::fmt::Write as _;

use chrono::Timelike;
use kosmorro_search::{EphemerisResult, LocalObjectEphemeris};
use kosmorro_time::LocalTime;

use crate::format::{
    EPHEMERIS_HEADERS, current_phase_line, ephemeris_row, long_date, next_phase_line,
    timezone_note,
};
use crate::{Payload, RenderOptions, Renderer};

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 56.0;

const GRAPH_X: f64 = 120.0;
const GRAPH_WIDTH: f64 = 408.0;
const GRAPH_BAR_HEIGHT: f64 = 14.0;

const TABLE_COLUMNS_X: [f64; 4] = [MARGIN, 150.0, 250.0, 390.0];

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl Renderer for PdfRenderer {
    fn render(&self, result: &EphemerisResult, options: &RenderOptions) -> Payload {
        Payload::Binary(render_pdf(result, options))
    }
}

#[derive(Debug, Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// Page content stream under construction.
#[derive(Debug, Default)]
struct Canvas {
    ops: String,
}

impl Canvas {
    fn text(&mut self, font: Font, size: f64, x: f64, y: f64, s: &str) {
        // Writing to a String cannot fail.
        let _ = writeln!(
            self.ops,
            "BT /{} {size:.1} Tf {x:.2} {y:.2} Td ({}) Tj ET",
            font.resource(),
            escape_text(s)
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, gray: f64) {
        let _ = writeln!(self.ops, "{gray:.2} g {x:.2} {y:.2} {w:.2} {h:.2} re f 0 g");
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let _ = writeln!(self.ops, "0.5 w {x1:.2} {y1:.2} m {x2:.2} {y2:.2} l S");
    }

    fn into_bytes(self) -> Vec<u8> {
        self.ops.into_bytes()
    }
}

/// Escape a string for a PDF literal; non-ASCII characters become `?`.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn stream_object(data: Vec<u8>) -> Vec<u8> {
    let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
    body.extend_from_slice(&data);
    body.extend_from_slice(b"\nendstream");
    body
}

/// Indirect objects, numbered from 1 in insertion order.
#[derive(Debug, Default)]
struct PdfDocument {
    objects: Vec<Vec<u8>>,
}

impl PdfDocument {
    fn add(&mut self, body: impl Into<Vec<u8>>) -> usize {
        self.objects.push(body.into());
        self.objects.len()
    }

    /// Allocate an object number now, for an object filled in by `set`.
    fn reserve(&mut self) -> usize {
        self.add(Vec::new())
    }

    fn set(&mut self, id: usize, body: impl Into<Vec<u8>>) {
        self.objects[id - 1] = body.into();
    }

    fn add_stream(&mut self, data: Vec<u8>) -> usize {
        self.add(stream_object(data))
    }

    /// Serialize with a cross-reference table and trailer.
    fn finish(self, root: usize, info: usize) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(self.objects.len());
        for (i, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1);
        for off in &offsets {
            let _ = writeln!(xref, "{off:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            offsets.len() + 1
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

fn hours_of_day(t: &LocalTime) -> f64 {
    f64::from(t.datetime().num_seconds_from_midnight()) / 3600.0
}

/// Spans of the day (in hours) during which the object is above the horizon.
///
/// Without both events the visibility cannot be told from the table alone:
/// a lone rise runs to midnight, a lone set starts at midnight, and no
/// event at all draws nothing.
pub(crate) fn visible_spans(rise: Option<f64>, set: Option<f64>) -> Vec<(f64, f64)> {
    match (rise, set) {
        (Some(r), Some(s)) if r <= s => vec![(r, s)],
        (Some(r), Some(s)) => vec![(0.0, s), (r, 24.0)],
        (Some(r), None) => vec![(r, 24.0)],
        (None, Some(s)) => vec![(0.0, s)],
        (None, None) => Vec::new(),
    }
}

fn draw_graph(canvas: &mut Canvas, rows: &[LocalObjectEphemeris], mut y: f64) {
    canvas.text(Font::Bold, 13.0, MARGIN, y, "Rise and set");
    y -= 24.0;

    let per_hour = GRAPH_WIDTH / 24.0;
    for row in rows {
        canvas.text(Font::Regular, 11.0, MARGIN, y + 3.0, row.object.name());
        canvas.fill_rect(GRAPH_X, y, GRAPH_WIDTH, GRAPH_BAR_HEIGHT, 0.9);
        let rise = row.rise.as_ref().map(hours_of_day);
        let set = row.set.as_ref().map(hours_of_day);
        for (from, to) in visible_spans(rise, set) {
            canvas.fill_rect(
                GRAPH_X + from * per_hour,
                y,
                (to - from) * per_hour,
                GRAPH_BAR_HEIGHT,
                0.35,
            );
        }
        y -= GRAPH_BAR_HEIGHT + 8.0;
    }

    canvas.line(GRAPH_X, y + 4.0, GRAPH_X + GRAPH_WIDTH, y + 4.0);
    for hour in (0..=24).step_by(3) {
        let x = GRAPH_X + f64::from(hour) * per_hour;
        canvas.line(x, y + 1.0, x, y + 7.0);
        canvas.text(Font::Regular, 8.0, x - 4.0, y - 8.0, &hour.to_string());
    }
}

fn page_content(result: &EphemerisResult, options: &RenderOptions) -> Canvas {
    let mut canvas = Canvas::default();
    let mut y = PAGE_HEIGHT - 62.0;

    canvas.text(Font::Bold, 20.0, MARGIN, y, "Overview of your sky");
    y -= 28.0;
    canvas.text(Font::Regular, 14.0, MARGIN, y, &long_date(result.header_date()));
    y -= 36.0;

    if let Some(rows) = result.ephemerides() {
        for (x, header) in TABLE_COLUMNS_X.iter().zip(EPHEMERIS_HEADERS) {
            canvas.text(Font::Bold, 11.0, *x, y, header);
        }
        canvas.line(MARGIN, y - 5.0, PAGE_WIDTH - MARGIN, y - 5.0);
        y -= 20.0;
        for row in rows {
            for (x, cell) in TABLE_COLUMNS_X.iter().zip(ephemeris_row(row)) {
                canvas.text(Font::Regular, 11.0, *x, y, &cell);
            }
            y -= 16.0;
        }
        y -= 20.0;
    }

    canvas.text(Font::Bold, 13.0, MARGIN, y, &current_phase_line(result));
    y -= 20.0;
    canvas.text(Font::Regular, 11.0, MARGIN, y, &next_phase_line(result));
    y -= 40.0;

    if options.graph {
        if let Some(rows) = result.ephemerides() {
            draw_graph(&mut canvas, rows, y);
        }
    }

    canvas.text(Font::Regular, 9.0, MARGIN, 48.0, &timezone_note(result));
    canvas
}

/// The PDF report.
pub fn render_pdf(result: &EphemerisResult, options: &RenderOptions) -> Vec<u8> {
    let mut doc = PdfDocument::default();
    let catalog = doc.reserve();
    let pages = doc.reserve();
    let page = doc.reserve();
    let regular = doc.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>");
    let bold = doc.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>");
    let content = doc.add_stream(page_content(result, options).into_bytes());
    let info = doc.add(format!(
        "<< /Title ({}) /Producer (kosmorro) >>",
        escape_text(&format!("Overview of your sky - {}", long_date(result.header_date())))
    ));
    doc.set(catalog, format!("<< /Type /Catalog /Pages {pages} 0 R >>"));
    doc.set(
        pages,
        format!("<< /Type /Pages /Kids [{page} 0 R] /Count 1 >>"),
    );
    doc.set(
        page,
        format!(
            "<< /Type /Page /Parent {pages} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 {regular} 0 R /F2 {bold} 0 R >> >> /Contents {content} 0 R >>"
        ),
    );
    doc.finish(catalog, info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kosmorro_ephem::GeoLocation;
    use kosmorro_search::{EphemerisRequest, MeanSynodicCycle, compute_ephemeris};
    use kosmorro_time::Instant;

    #[test]
    fn escapes_delimiters() {
        assert_eq!(escape_text(r"a(b)c\d"), r"a\(b\)c\\d");
        assert_eq!(escape_text("é"), "?");
    }

    #[test]
    fn spans_for_each_case() {
        assert_eq!(visible_spans(Some(6.0), Some(18.0)), vec![(6.0, 18.0)]);
        assert_eq!(
            visible_spans(Some(20.0), Some(9.5)),
            vec![(0.0, 9.5), (20.0, 24.0)]
        );
        assert_eq!(visible_spans(Some(23.0), None), vec![(23.0, 24.0)]);
        assert_eq!(visible_spans(None, Some(1.0)), vec![(0.0, 1.0)]);
        assert!(visible_spans(None, None).is_empty());
    }

    #[test]
    fn xref_points_at_objects() {
        let mut doc = PdfDocument::default();
        let a = doc.add("<< /Type /Catalog /Pages 2 0 R >>");
        let b = doc.add("<< /Producer (test) >>");
        let bytes = doc.finish(a, b);

        let marker = b"startxref\n";
        let at = bytes
            .windows(marker.len())
            .rposition(|w| w == marker)
            .unwrap();
        let tail = std::str::from_utf8(&bytes[at + marker.len()..]).unwrap();
        let startxref: usize = tail.lines().next().unwrap().parse().unwrap();

        let xref = std::str::from_utf8(&bytes[startxref..]).unwrap();
        assert!(xref.starts_with("xref\n0 3\n0000000000 65535 f \n"));
        let first_entry = &xref["xref\n0 3\n".len() + 20..][..20];
        let offset: usize = first_entry[..10].parse().unwrap();
        assert!(bytes[offset..].starts_with(b"1 0 obj\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    fn object_body(bytes: &[u8], id: usize) -> &str {
        let header = format!("\n{id} 0 obj\n");
        let at = bytes
            .windows(header.len())
            .position(|w| w == header.as_bytes())
            .unwrap()
            + header.len();
        let len = bytes[at..]
            .windows(b"\nendobj".len())
            .position(|w| w == b"\nendobj")
            .unwrap();
        std::str::from_utf8(&bytes[at..at + len]).unwrap()
    }

    fn reference_after(body: &str, key: &str) -> usize {
        let rest = &body[body.find(key).unwrap() + key.len()..];
        rest.trim_start().split(' ').next().unwrap().parse().unwrap()
    }

    #[test]
    fn references_resolve_to_the_right_objects() {
        let request = EphemerisRequest::new(Instant::from_utc(2021, 11, 23, 0, 0, 0.0).unwrap())
            .with_location(GeoLocation::new(50.0, 5.0).unwrap());
        let result = compute_ephemeris(&MeanSynodicCycle::default(), &request).unwrap();
        let bytes = render_pdf(&result, &RenderOptions::default());

        let catalog = object_body(&bytes, 1);
        let pages_id = reference_after(catalog, "/Pages");
        let pages = object_body(&bytes, pages_id);
        assert!(pages.starts_with("<< /Type /Pages"));
        let page_id = reference_after(pages, "/Kids [");
        let page = object_body(&bytes, page_id);
        assert!(page.starts_with("<< /Type /Page "));
        assert_eq!(reference_after(page, "/Parent"), pages_id);
        assert!(object_body(&bytes, reference_after(page, "/F1")).contains("/Helvetica "));
        assert!(object_body(&bytes, reference_after(page, "/F2")).contains("/Helvetica-Bold"));
        assert!(object_body(&bytes, reference_after(page, "/Contents")).contains("stream\nBT"));
    }

    #[test]
    fn reserved_objects_are_filled_in() {
        let mut doc = PdfDocument::default();
        let later = doc.reserve();
        let now = doc.add("<< /Producer (test) >>");
        doc.set(later, format!("<< /Type /Catalog /Info {now} 0 R >>"));
        assert_eq!((later, now), (1, 2));
        assert_eq!(doc.objects[0], b"<< /Type /Catalog /Info 2 0 R >>".to_vec());
    }

    #[test]
    fn stream_length_matches() {
        let mut doc = PdfDocument::default();
        doc.add_stream(b"BT ET".to_vec());
        assert!(String::from_utf8_lossy(&doc.objects[0]).starts_with("<< /Length 5 >>"));
    }
}
