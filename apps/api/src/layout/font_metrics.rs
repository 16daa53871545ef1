//! Static font-metric tables for the PDF standard fonts used by the summary export.
//!
//! Widths are the Adobe AFM advance widths divided by 1000, i.e. em units relative to
//! the font size. A standard Type1 font is never embedded, so these tables are the
//! same numbers a PDF viewer uses when it places the glyphs.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters, index = char - 32)
//! plus the WinAnsi punctuation block at 0x80..=0x9F.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Glyph-metrics capability
// ────────────────────────────────────────────────────────────────────────────

/// Reports the rendered width of a string at a font size, in page units (points).
///
/// Implementations must be deterministic and must not report a smaller width for a
/// string extended with more characters. The greedy line fill relies on both.
pub trait GlyphMetrics {
    fn measure_width(&self, text: &str, font_size: f32) -> f32;
}

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// PDF standard (base-14) fonts the exporter knows metrics for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFont {
    /// Proportional sans-serif. Default for summaries.
    Helvetica,
    /// Fixed pitch, every glyph 0.6em.
    Courier,
}

impl StandardFont {
    /// The `/BaseFont` name written into the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::Courier => "Courier",
        }
    }
}

impl std::str::FromStr for StandardFont {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Ok(StandardFont::Helvetica),
            "courier" => Ok(StandardFont::Courier),
            other => anyhow::bail!("unsupported PDF font '{other}' (expected helvetica or courier)"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Geometry of the single summary page, in points with the origin at the bottom left.
///
/// `usable_width` is configured independently of `page_width` and `margin`. With the
/// defaults it happens to equal `page_width - 2 * margin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageGeometry {
    pub font: StandardFont,
    pub page_width: f32,
    pub page_height: f32,
    /// Left inset of every line; also treated as the bottom margin for overflow reporting.
    pub margin: f32,
    pub usable_width: f32,
    pub body_font_size: f32,
    pub title_font_size: f32,
    /// Baseline of the title line.
    pub title_y: f32,
    /// Baseline of the first body line.
    pub body_start_y: f32,
    /// Distance between consecutive body baselines.
    pub line_height: f32,
}

impl PageGeometry {
    /// Rejects geometries where the title would collide with the body or the lines
    /// could never fit on the page.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.page_width > 0.0 && self.page_height > 0.0,
            "page dimensions must be positive"
        );
        ensure!(self.usable_width > 0.0, "usable_width must be positive");
        ensure!(self.line_height > 0.0, "line_height must be positive");
        ensure!(
            self.body_font_size > 0.0 && self.title_font_size > 0.0,
            "font sizes must be positive"
        );
        ensure!(
            self.title_y <= self.page_height,
            "title baseline {} lies above the page height {}",
            self.title_y,
            self.page_height
        );
        ensure!(
            self.title_y - self.body_start_y >= self.title_font_size,
            "body must start at least {}pt below the title baseline",
            self.title_font_size
        );
        Ok(())
    }
}

/// Returns the page geometry of the summary export.
///
/// 600 × 800pt page, 50pt margin, 500pt text column, Helvetica 20pt title at 750
/// and 12pt body starting at 700 with an 18pt line step.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        font: StandardFont::Helvetica,
        page_width: 600.0,
        page_height: 800.0,
        margin: 50.0,
        usable_width: 500.0,
        body_font_size: 12.0,
        title_font_size: 20.0,
        title_y: 750.0,
        body_start_y: 700.0,
        line_height: 18.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a standard font.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Widths of WinAnsi bytes 0x80..=0x9F; index = byte - 0x80. Unassigned slots are 0.
    win_ansi_high: [f32; 32],
    /// Fallback width for every other character.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the width of a string in em units.
    ///
    /// Printable ASCII and the WinAnsi punctuation block (bullets, dashes, curly
    /// quotes, ellipsis, euro) use AFM widths. Everything else falls back to
    /// `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| match win_ansi_byte(c) {
                Some(b @ 0x20..=0x7E) => self.widths[(b - 0x20) as usize],
                Some(b @ 0x80..=0x9F) => self.win_ansi_high[(b - 0x80) as usize],
                _ => self.average_char_width,
            })
            .sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// The characters WinAnsiEncoding places at 0x80..=0x9F (0x81, 0x8D, 0x8F, 0x90 and
/// 0x9D are unassigned).
const WIN_ANSI_HIGH: [(u8, char); 27] = [
    (0x80, '\u{20AC}'), // euro
    (0x82, '\u{201A}'), // quotesinglbase
    (0x83, '\u{0192}'), // florin
    (0x84, '\u{201E}'), // quotedblbase
    (0x85, '\u{2026}'), // ellipsis
    (0x86, '\u{2020}'), // dagger
    (0x87, '\u{2021}'), // daggerdbl
    (0x88, '\u{02C6}'), // circumflex
    (0x89, '\u{2030}'), // perthousand
    (0x8A, '\u{0160}'), // Scaron
    (0x8B, '\u{2039}'), // guilsinglleft
    (0x8C, '\u{0152}'), // OE
    (0x8E, '\u{017D}'), // Zcaron
    (0x91, '\u{2018}'), // quoteleft
    (0x92, '\u{2019}'), // quoteright
    (0x93, '\u{201C}'), // quotedblleft
    (0x94, '\u{201D}'), // quotedblright
    (0x95, '\u{2022}'), // bullet
    (0x96, '\u{2013}'), // endash
    (0x97, '\u{2014}'), // emdash
    (0x98, '\u{02DC}'), // tilde
    (0x99, '\u{2122}'), // trademark
    (0x9A, '\u{0161}'), // scaron
    (0x9B, '\u{203A}'), // guilsinglright
    (0x9C, '\u{0153}'), // oe
    (0x9E, '\u{017E}'), // zcaron
    (0x9F, '\u{0178}'), // Ydieresis
];

/// Maps a character to its WinAnsiEncoding byte, or `None` if the encoding has no
/// glyph for it. Control characters are not mapped.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(_, ch)| *ch == c)
            .map(|(byte, _)| *byte),
    }
}

impl GlyphMetrics for FontMetricTable {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        self.measure_str(text) * font_size
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    #[rustfmt::skip]
    win_ansi_high: [
        // €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.0,   0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.0,   0.611, 0.0,
        // -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.0,   0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.0,   0.500, 0.667,
    ],
    average_char_width: 0.556,
};

static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.6; 95],
    win_ansi_high: [0.6; 32],
    average_char_width: 0.6,
};

/// Returns the static metric table for a given standard font.
pub fn get_metrics(font: &StandardFont) -> &'static FontMetricTable {
    match font {
        StandardFont::Helvetica => &HELVETICA_TABLE,
        StandardFont::Courier => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
