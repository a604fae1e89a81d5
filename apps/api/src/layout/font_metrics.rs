//! Glyph metrics for worksheet export, plus the page configuration.
//!
//! Widths are estimated from a single average character width rather than
//! measured from a font. Nothing reflows based on these numbers; the column
//! width must stay above the widest problem (see the tests).
//!
//! All metric values are in em units (relative to font size); callers pass the
//! font size and get back user units.

use serde::{Deserialize, Serialize};

use crate::models::number::NumberValue;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for an exported worksheet page.
///
/// Lengths are in SVG user units unless the field name says `_em`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub font_size: f32,
    /// Problems per row. The grid is two columns wide.
    pub columns: u32,
    pub column_width: f32,
    pub row_height: f32,
    pub margin: f32,
    /// Space reserved above the first row of a group for its header.
    pub header_height: f32,
    /// Vertical space between consecutive variant groups.
    pub group_gap: f32,
    /// Horizontal gap after every token in a problem.
    pub token_gap_em: f32,
    /// Length of the blank answer line.
    pub answer_line_em: f32,
    /// Header text before the variant number ("Variant 3").
    pub header_prefix: String,
}

/// Returns the default export page config: 28-unit serif text, two 450-unit columns.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        font_size: 28.0,
        columns: 2,
        column_width: 450.0,
        row_height: 70.0,
        margin: 30.0,
        header_height: 50.0,
        group_gap: 24.0,
        token_gap_em: 0.25,
        answer_line_em: 3.0,
        header_prefix: "Variant".to_string(),
    }
}

impl PageConfig {
    pub fn page_width(&self) -> f32 {
        self.margin * 2.0 + self.columns as f32 * self.column_width
    }

    pub fn token_gap(&self) -> f32 {
        self.token_gap_em * self.font_size
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metrics
// ────────────────────────────────────────────────────────────────────────────

/// Width heuristics for the fixed serif face used in exports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Width of any single character.
    pub average_char_width: f32,
    /// Extra width added to a fraction beyond its wider part.
    pub fraction_padding: f32,
    /// Space between the whole part of a mixed number and its fraction.
    pub mixed_gap: f32,
}

pub static SERIF_METRICS: GlyphMetrics = GlyphMetrics {
    average_char_width: 0.6,
    fraction_padding: 0.2,
    mixed_gap: 0.15,
};

impl GlyphMetrics {
    /// Measures plain text. Every character counts as `average_char_width`.
    pub fn measure_str(&self, s: &str, font_size: f32) -> f32 {
        s.chars().count() as f32 * self.average_char_width * font_size
    }

    /// Width of a stacked fraction: the wider of numerator and denominator, plus padding.
    pub fn measure_fraction(&self, numerator: u32, denominator: u32, font_size: f32) -> f32 {
        let top = self.measure_str(&numerator.to_string(), font_size);
        let bottom = self.measure_str(&denominator.to_string(), font_size);
        top.max(bottom) + self.fraction_padding * font_size
    }

    /// Width of the whole part of a mixed number plus the gap before its fraction.
    pub fn mixed_fraction_offset(&self, whole: u32, font_size: f32) -> f32 {
        self.measure_str(&whole.to_string(), font_size) + self.mixed_gap * font_size
    }

    pub fn measure_number(&self, value: &NumberValue, font_size: f32) -> f32 {
        match *value {
            NumberValue::Whole { value } => self.measure_str(&value.to_string(), font_size),
            NumberValue::Fraction {
                numerator,
                denominator,
            } => self.measure_fraction(numerator, denominator, font_size),
            NumberValue::Mixed {
                whole,
                numerator,
                denominator,
            } => {
                self.mixed_fraction_offset(whole, font_size)
                    + self.measure_fraction(numerator, denominator, font_size)
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
