//! Text paginator: greedy word-wrap of a summary onto a single page under a title.
//!
//! # Algorithm
//! Words are taken from a whitespace split of the body. Each word is appended to the
//! current line together with one trailing space; if that candidate is wider than
//! `usable_width` and the line already holds a word, the line is emitted and the word
//! starts the next one. A word that is wider than the column on its own is still
//! placed alone on its line, never split.
//!
//! The paginator never breaks pages. When the last baseline falls below the bottom
//! margin the layout is marked `overflowed` and the caller decides what to do.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{GlyphMetrics, PageGeometry};

/// A line of text with its baseline position on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Result of laying out one title and one body on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLayout {
    pub title: PositionedLine,
    /// Body lines in top-to-bottom order.
    pub lines: Vec<PositionedLine>,
    /// True if the last body baseline lies below the bottom margin.
    pub overflowed: bool,
}

/// Drawing surface the layout is emitted onto.
pub trait TextCanvas {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32);
}

/// Lays out `title` and `text` according to `geometry`.
pub fn layout<M: GlyphMetrics + ?Sized>(
    text: &str,
    title: &str,
    geometry: &PageGeometry,
    metrics: &M,
) -> TextLayout {
    let title = PositionedLine {
        text: title.to_string(),
        x: geometry.margin,
        y: geometry.title_y,
        font_size: geometry.title_font_size,
    };

    let lines = wrap_lines(text, geometry, metrics);
    let overflowed = lines
        .last()
        .is_some_and(|line| line.y < geometry.margin);

    TextLayout {
        title,
        lines,
        overflowed,
    }
}

/// Greedy line fill of the body text. Returns an empty vec for blank input.
pub fn wrap_lines<M: GlyphMetrics + ?Sized>(
    text: &str,
    geometry: &PageGeometry,
    metrics: &M,
) -> Vec<PositionedLine> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut y = geometry.body_start_y;

    let mut emit = |line: &str, y: f32| {
        lines.push(PositionedLine {
            text: line.trim_end().to_string(),
            x: geometry.margin,
            y,
            font_size: geometry.body_font_size,
        });
    };

    for word in text.split_whitespace() {
        let candidate = format!("{current}{word} ");
        let width = metrics.measure_width(&candidate, geometry.body_font_size);

        if width > geometry.usable_width && !current.is_empty() {
            emit(&current, y);
            y -= geometry.line_height;
            current = format!("{word} ");
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        emit(&current, y);
    }

    lines
}

/// Issues the draw calls for a layout: the title first, then every body line top to bottom.
pub fn draw<C: TextCanvas + ?Sized>(layout: &TextLayout, canvas: &mut C) {
    let title = &layout.title;
    canvas.draw_text(&title.text, title.x, title.y, title.font_size);
    for line in &layout.lines {
        canvas.draw_text(&line.text, line.x, line.y, line.font_size);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{default_page_geometry, get_metrics, StandardFont};

    /// Every character is exactly `font_size / 2` wide, which keeps the arithmetic exact.
    struct HalfEm;

    impl GlyphMetrics for HalfEm {
        fn measure_width(&self, text: &str, font_size: f32) -> f32 {
            text.chars().count() as f32 * font_size / 2.0
        }
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(String, f32, f32, f32)>,
    }

    impl TextCanvas for RecordingCanvas {
        fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) {
            self.calls.push((text.to_string(), x, y, font_size));
        }
    }

    /// 10pt body under `HalfEm` → 5 units per character.
    fn geometry_with_chars_per_line(chars: usize) -> PageGeometry {
        PageGeometry {
            body_font_size: 10.0,
            usable_width: chars as f32 * 5.0,
            ..default_page_geometry()
        }
    }

    fn normalized_words(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn joined(lines: &[PositionedLine]) -> String {
        lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_two_words_per_line_scenario() {
        // "alpha beta " is 11 characters and fits exactly; adding "gamma " does not.
        let geometry = geometry_with_chars_per_line(11);
        let result = layout("alpha beta gamma", "Meeting Summary", &geometry, &HalfEm);
        let texts: Vec<&str> = result.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn test_empty_text_yields_title_only() {
        let geometry = default_page_geometry();
        let result = layout("", "Meeting Summary", &geometry, &HalfEm);
        assert!(result.lines.is_empty());
        assert!(!result.overflowed);

        let mut canvas = RecordingCanvas::default();
        draw(&result, &mut canvas);
        assert_eq!(canvas.calls.len(), 1);
        assert_eq!(canvas.calls[0].0, "Meeting Summary");
        assert_eq!(canvas.calls[0].2, geometry.title_y);
        assert_eq!(canvas.calls[0].3, geometry.title_font_size);
    }

    #[test]
    fn test_whitespace_only_text_yields_no_lines() {
        let geometry = default_page_geometry();
        let lines = wrap_lines("  \n\t  \r\n ", &geometry, &HalfEm);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_word_sequence() {
        let geometry = geometry_with_chars_per_line(24);
        let text = "  Key points:\n- budget approved\tfor Q3\n\n- Alice to draft   the \
                    roadmap by Friday\r\n- follow-up meeting next   week  ";
        let lines = wrap_lines(text, &geometry, &HalfEm);
        assert!(lines.len() > 1);
        assert_eq!(joined(&lines), normalized_words(text));
    }

    #[test]
    fn test_round_trip_with_helvetica_metrics() {
        let geometry = default_page_geometry();
        let metrics = get_metrics(&StandardFont::Helvetica);
        let text = "The team reviewed the quarterly roadmap and agreed to move the launch \
                    two weeks later. ".repeat(12);
        let lines = wrap_lines(&text, &geometry, metrics);
        assert_eq!(joined(&lines), normalized_words(&text));
    }

    #[test]
    fn test_every_line_fits_usable_width() {
        let geometry = default_page_geometry();
        let metrics = get_metrics(&StandardFont::Helvetica);
        let text = "Decisions: adopt the new release checklist, rotate the on-call schedule \
                    weekly, and publish meeting notes within one business day. "
            .repeat(6);
        for line in wrap_lines(&text, &geometry, metrics) {
            let width = metrics.measure_width(&line.text, geometry.body_font_size);
            assert!(
                width <= geometry.usable_width,
                "line {:?} measures {width}, wider than {}",
                line.text,
                geometry.usable_width
            );
        }
    }

    #[test]
    fn test_baselines_decrease_by_line_height() {
        let geometry = geometry_with_chars_per_line(12);
        let lines = wrap_lines(
            "one two three four five six seven eight nine ten eleven twelve",
            &geometry,
            &HalfEm,
        );
        assert!(lines.len() >= 4);
        assert_eq!(lines[0].y, geometry.body_start_y);
        for pair in lines.windows(2) {
            assert_eq!(pair[0].y - pair[1].y, geometry.line_height);
        }
        assert!(lines.iter().all(|l| l.x == geometry.margin));
    }

    #[test]
    fn test_oversized_word_is_emitted_alone_unmodified() {
        let geometry = geometry_with_chars_per_line(8);
        let long_word = "supercalifragilistic";
        let text = format!("short {long_word} tail");
        let lines = wrap_lines(&text, &geometry, &HalfEm);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["short", long_word, "tail"]);
    }

    #[test]
    fn test_leading_oversized_word_does_not_emit_empty_line() {
        let geometry = geometry_with_chars_per_line(4);
        let lines = wrap_lines("enormous ok", &geometry, &HalfEm);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["enormous", "ok"]);
        assert_eq!(lines[0].y, geometry.body_start_y);
    }

    #[test]
    fn test_draw_calls_are_top_to_bottom() {
        let geometry = geometry_with_chars_per_line(11);
        let result = layout("alpha beta gamma delta", "Meeting Summary", &geometry, &HalfEm);
        let mut canvas = RecordingCanvas::default();
        draw(&result, &mut canvas);

        assert_eq!(canvas.calls.len(), 1 + result.lines.len());
        assert_eq!(canvas.calls[0].0, "Meeting Summary");
        for pair in canvas.calls.windows(2) {
            assert!(pair[0].2 > pair[1].2, "draw calls must move down the page");
        }
    }

    #[test]
    fn test_overflow_is_reported_not_handled() {
        let geometry = geometry_with_chars_per_line(6);
        let text = "word ".repeat(60);
        let result = layout(&text, "Meeting Summary", &geometry, &HalfEm);
        assert_eq!(result.lines.len(), 60);
        assert!(result.overflowed);
        assert!(result.lines.last().is_some_and(|l| l.y < 0.0));
    }

    #[test]
    fn test_short_text_does_not_overflow() {
        let geometry = default_page_geometry();
        let metrics = get_metrics(&StandardFont::Helvetica);
        let result = layout("Hello world", "Meeting Summary", &geometry, metrics);
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].text, "Hello world");
        assert!(!result.overflowed);
    }
}
