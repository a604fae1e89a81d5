//! Layout Engine — places selected problems on a page as absolute-coordinate primitives.
//!
//! # Placement rules
//! - Problems are grouped by variant (ascending), each group ordered by display index
//! - Every group starts with a bold "Variant N" header
//! - Inside a group, position `i` goes to `row = i / columns`, `column = i % columns`
//! - Tokens run left to right: label, left operand, operator, right operand, `=`, answer line
//!
//! Every coordinate is computed exactly once here. The serializer only formats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::font_metrics::{GlyphMetrics, PageConfig};
use crate::models::number::NumberValue;
use crate::models::problem::Problem;

const HEADER_FONT_SCALE: f32 = 1.2;
const FRACTION_FONT_SCALE: f32 = 0.9;
const NUMERATOR_RISE_EM: f32 = 0.25;
const DENOMINATOR_DROP_EM: f32 = 0.5;
const FRACTION_BAR_DROP_EM: f32 = 0.05;
const ANSWER_LINE_DROP_EM: f32 = 0.3;
const RULE_STROKE_EM: f32 = 0.07;

// ────────────────────────────────────────────────────────────────────────────
// Drawing primitives
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
}

/// Stroke colour class of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
    /// Fraction bars, same colour as the text.
    Ink,
    /// Blank answer lines, lighter.
    Guide,
}

/// A single positioned drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutNode {
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        anchor: TextAnchor,
        bold: bool,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke_width: f32,
        stroke: Stroke,
    },
}

/// One exported page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<LayoutNode>,
}

/// A problem selected for export, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportItem {
    pub variant_number: u32,
    /// Label printed before the problem. Kept from generation, not renumbered.
    pub display_index: u32,
    pub problem: Problem,
}

// ────────────────────────────────────────────────────────────────────────────
// Page assembly
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `items` into pages.
///
/// With `split_by_variant = false` all groups stack on one page. With `true`
/// every variant gets its own page. Empty input yields no pages.
pub fn layout(
    items: &[ExportItem],
    config: &PageConfig,
    metrics: &GlyphMetrics,
    split_by_variant: bool,
) -> Vec<PageLayout> {
    let groups = group_by_variant(items);
    let mut pages = Vec::new();
    let mut current: Option<PageBuilder> = None;

    for (variant_number, group) in &groups {
        if split_by_variant {
            if let Some(done) = current.take() {
                pages.push(done.finish(config));
            }
        }
        let page = current.get_or_insert_with(|| PageBuilder::new(config));
        page.push_group(*variant_number, group, config, metrics);
    }

    if let Some(done) = current {
        pages.push(done.finish(config));
    }

    debug!(
        groups = groups.len(),
        pages = pages.len(),
        "laid out {} problems",
        items.len()
    );
    pages
}

/// Groups by variant number, orders each group by display index, drops duplicates.
fn group_by_variant(items: &[ExportItem]) -> BTreeMap<u32, Vec<&ExportItem>> {
    let mut groups: BTreeMap<u32, Vec<&ExportItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.variant_number).or_default().push(item);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|item| item.display_index);
        group.dedup_by_key(|item| item.display_index);
    }
    groups
}

struct PageBuilder {
    nodes: Vec<LayoutNode>,
    /// Top edge of the next group.
    cursor_y: f32,
    /// Bottom edge of the last placed group.
    content_bottom: f32,
}

impl PageBuilder {
    fn new(config: &PageConfig) -> Self {
        PageBuilder {
            nodes: Vec::new(),
            cursor_y: config.margin,
            content_bottom: config.margin,
        }
    }

    fn push_group(
        &mut self,
        variant_number: u32,
        group: &[&ExportItem],
        config: &PageConfig,
        metrics: &GlyphMetrics,
    ) {
        let top = self.cursor_y;
        let fs = config.font_size;
        let header_size = fs * HEADER_FONT_SCALE;

        self.nodes.push(LayoutNode::Text {
            x: config.margin,
            y: top + header_size,
            text: format!("{} {}", config.header_prefix, variant_number),
            font_size: header_size,
            anchor: TextAnchor::Start,
            bold: true,
        });

        let columns = config.columns.max(1) as usize;
        for (i, item) in group.iter().enumerate() {
            let row = (i / columns) as f32;
            let column = (i % columns) as f32;
            let x = config.margin + column * config.column_width;
            let baseline = top + config.header_height + fs + row * config.row_height;
            draw_problem(&mut self.nodes, item, x, baseline, config, metrics);
        }

        let rows = group.len().div_ceil(columns) as f32;
        self.content_bottom = top + config.header_height + rows * config.row_height;
        self.cursor_y = self.content_bottom + config.group_gap;
    }

    fn finish(self, config: &PageConfig) -> PageLayout {
        PageLayout {
            width: config.page_width(),
            height: self.content_bottom + config.margin,
            nodes: self.nodes,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Problem and operand drawing
// ────────────────────────────────────────────────────────────────────────────

fn draw_problem(
    nodes: &mut Vec<LayoutNode>,
    item: &ExportItem,
    x: f32,
    baseline: f32,
    config: &PageConfig,
    metrics: &GlyphMetrics,
) {
    let fs = config.font_size;
    let gap = config.token_gap();
    let mut cursor = x;

    let label = format!("{})", item.display_index);
    cursor += draw_text(nodes, &label, cursor, baseline, fs, metrics) + gap;
    cursor += draw_number(nodes, &item.problem.left, cursor, baseline, fs, metrics) + gap;
    let symbol = item.problem.operator.symbol();
    cursor += draw_text(nodes, symbol, cursor, baseline, fs, metrics) + gap;
    cursor += draw_number(nodes, &item.problem.right, cursor, baseline, fs, metrics) + gap;
    cursor += draw_text(nodes, "=", cursor, baseline, fs, metrics) + gap;

    let answer_y = baseline + ANSWER_LINE_DROP_EM * fs;
    nodes.push(LayoutNode::Rule {
        x1: cursor,
        y1: answer_y,
        x2: cursor + config.answer_line_em * fs,
        y2: answer_y,
        stroke_width: RULE_STROKE_EM * fs,
        stroke: Stroke::Guide,
    });
}

/// Emits a left-anchored text run and returns its measured width.
fn draw_text(
    nodes: &mut Vec<LayoutNode>,
    text: &str,
    x: f32,
    baseline: f32,
    fs: f32,
    metrics: &GlyphMetrics,
) -> f32 {
    nodes.push(LayoutNode::Text {
        x,
        y: baseline,
        text: text.to_string(),
        font_size: fs,
        anchor: TextAnchor::Start,
        bold: false,
    });
    metrics.measure_str(text, fs)
}

/// Emits the nodes of one operand and returns its measured width.
fn draw_number(
    nodes: &mut Vec<LayoutNode>,
    value: &NumberValue,
    x: f32,
    baseline: f32,
    fs: f32,
    metrics: &GlyphMetrics,
) -> f32 {
    match *value {
        NumberValue::Whole { value } => {
            draw_text(nodes, &value.to_string(), x, baseline, fs, metrics);
        }
        NumberValue::Fraction {
            numerator,
            denominator,
        } => {
            draw_fraction(nodes, numerator, denominator, x, baseline, fs, metrics);
        }
        NumberValue::Mixed {
            whole,
            numerator,
            denominator,
        } => {
            draw_text(nodes, &whole.to_string(), x, baseline, fs, metrics);
            let fraction_x = x + metrics.mixed_fraction_offset(whole, fs);
            draw_fraction(nodes, numerator, denominator, fraction_x, baseline, fs, metrics);
        }
    }
    metrics.measure_number(value, fs)
}

/// Numerator over bar over denominator, centred on the unpadded body.
/// The padding trails the bar; the returned width includes it.
fn draw_fraction(
    nodes: &mut Vec<LayoutNode>,
    numerator: u32,
    denominator: u32,
    x: f32,
    baseline: f32,
    fs: f32,
    metrics: &GlyphMetrics,
) -> f32 {
    let width = metrics.measure_fraction(numerator, denominator, fs);
    let body = width - metrics.fraction_padding * fs;
    let center = x + body / 2.0;
    let part_size = fs * FRACTION_FONT_SCALE;
    let bar_y = baseline + FRACTION_BAR_DROP_EM * fs;

    nodes.push(LayoutNode::Text {
        x: center,
        y: baseline - NUMERATOR_RISE_EM * fs,
        text: numerator.to_string(),
        font_size: part_size,
        anchor: TextAnchor::Middle,
        bold: false,
    });
    nodes.push(LayoutNode::Rule {
        x1: x,
        y1: bar_y,
        x2: x + body,
        y2: bar_y,
        stroke_width: RULE_STROKE_EM * fs,
        stroke: Stroke::Ink,
    });
    nodes.push(LayoutNode::Text {
        x: center,
        y: baseline + DENOMINATOR_DROP_EM * fs,
        text: denominator.to_string(),
        font_size: part_size,
        anchor: TextAnchor::Middle,
        bold: false,
    });
    width
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
