//! Summary PDF rendering on top of `pdf-writer`.
//!
//! The document has exactly one page. The body is laid out by the paginator and drawn
//! with one standard Type1 font, so no font program is embedded.

use chrono::prelude::*;
use pdf_writer::{Content, Date as PDate, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::warn;

use crate::layout::font_metrics::win_ansi_byte;
use crate::layout::{draw, get_metrics, layout, PageGeometry, TextCanvas};

/// Caption drawn above every exported summary.
pub const SUMMARY_TITLE: &str = "Meeting Summary";

const FONT_RESOURCE: Name<'static> = Name(b"F1");

/// Content-stream canvas: every draw call becomes one black text object.
struct PdfCanvas {
    content: Content,
}

impl PdfCanvas {
    fn new() -> Self {
        let mut content = Content::new();
        content.set_fill_rgb(0.0, 0.0, 0.0);
        Self { content }
    }

    fn finish(self) -> Vec<u8> {
        self.content.finish()
    }
}

impl TextCanvas for PdfCanvas {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) {
        let encoded = encode_win_ansi(text);
        self.content
            .begin_text()
            .set_font(FONT_RESOURCE, font_size)
            .next_line(x, y)
            .show(Str(&encoded))
            .end_text();
    }
}

/// Encodes text for the WinAnsi font. Characters without a WinAnsi glyph become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

/// Renders `summary` onto a single page and returns the finished PDF bytes.
pub fn render_summary_pdf(summary: &str, geometry: &PageGeometry) -> Vec<u8> {
    let metrics = get_metrics(&geometry.font);
    let text_layout = layout(summary, SUMMARY_TITLE, geometry, metrics);

    if text_layout.overflowed {
        warn!(
            lines = text_layout.lines.len(),
            "Summary runs past the bottom margin; trailing lines are off the page"
        );
    }

    let mut canvas = PdfCanvas::new();
    draw(&text_layout, &mut canvas);
    let content = canvas.finish();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let font_id = Ref::new(4);
    let content_id = Ref::new(5);
    let info_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, geometry.page_width, geometry.page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().fonts().pair(FONT_RESOURCE, font_id);
    page.finish();

    pdf.type1_font(font_id)
        .base_font(Name(geometry.font.base_font().as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.stream(content_id, &content);
    write_info(&mut pdf, info_id);

    pdf.finish()
}

fn write_info(pdf: &mut Pdf, id: Ref) {
    let mut info = pdf.document_info(id);
    info.title(TextStr(SUMMARY_TITLE));
    info.creator(TextStr(concat!(
        env!("CARGO_PKG_NAME"),
        " v",
        env!("CARGO_PKG_VERSION")
    )));

    let now = Local::now();
    let offset = now.offset().fix();
    let offset_hours = offset.local_minus_utc() / (60 * 60);
    let offset_minutes = ((offset.local_minus_utc() - (offset_hours * (60 * 60))) / 60).abs();
    let date = PDate::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8);
    info.creation_date(date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_page_geometry;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_pdf_starts_with_signature() {
        let bytes = render_summary_pdf("Hello world", &default_page_geometry());
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn test_pdf_contains_title_and_body_text() {
        let bytes = render_summary_pdf("Hello world", &default_page_geometry());
        assert!(contains(&bytes, b"(Meeting Summary) Tj"));
        assert!(contains(&bytes, b"(Hello world) Tj"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_pdf_uses_configured_page_size() {
        let bytes = render_summary_pdf("", &default_page_geometry());
        assert!(contains(&bytes, b"/MediaBox"));
        assert!(contains(&bytes, b"/Type /Page"));
    }

    #[test]
    fn test_empty_summary_draws_title_only() {
        let bytes = render_summary_pdf("", &default_page_geometry());
        let count = bytes.windows(2).filter(|w| *w == b"Tj").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_overflowing_summary_still_renders() {
        let summary = "overflowing ".repeat(2_000);
        let bytes = render_summary_pdf(&summary, &default_page_geometry());
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_encode_win_ansi_replaces_unsupported_chars() {
        assert_eq!(encode_win_ansi("café"), b"caf\xe9".to_vec());
        assert_eq!(encode_win_ansi("→ ok"), b"? ok".to_vec());
    }

    #[test]
    fn test_bullets_dashes_and_quotes_keep_their_glyphs() {
        let summary = "• Decision — ship “today” €5";
        let encoded = encode_win_ansi(summary);
        assert_eq!(
            encoded,
            b"\x95 Decision \x97 ship \x93today\x94 \x805".to_vec()
        );

        // Non-ASCII strings are written as hex literals.
        let hex: String = encoded.iter().map(|b| format!("{b:02X}")).collect();
        let bytes = render_summary_pdf(summary, &default_page_geometry());
        assert!(contains(&bytes, format!("<{hex}> Tj").as_bytes()));
        assert!(!contains(&bytes, b"(? Decision"));
    }
}
