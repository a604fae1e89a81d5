//! SVG serializer — formats laid-out pages as standalone SVG documents.
//!
//! Pure string formatting: no state, no randomness, no coordinate changes.
//! Identical pages always serialize to identical bytes.

use std::fmt::Write as _;

use crate::layout::{LayoutNode, PageLayout, Stroke, TextAnchor};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const FONT_FAMILY: &str = "Times New Roman, serif";
const INK_COLOR: &str = "#111827";
const GUIDE_COLOR: &str = "#9ca3af";

/// Serializes one page into an SVG document sized to the page.
pub fn serialize(page: &PageLayout) -> String {
    let width = fmt_num(page.width);
    let height = fmt_num(page.height);
    let mut out = String::with_capacity(128 + page.nodes.len() * 120);

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NAMESPACE}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for node in &page.nodes {
        out.push_str("  ");
        write_node(&mut out, node);
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

/// Serializes several pages, separated by a blank line.
pub fn serialize_pages(pages: &[PageLayout]) -> String {
    pages
        .iter()
        .map(serialize)
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_node(out: &mut String, node: &LayoutNode) {
    match node {
        LayoutNode::Text {
            x,
            y,
            text,
            font_size,
            anchor,
            bold,
        } => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}""#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*font_size),
            );
            if *bold {
                out.push_str(r#" font-weight="bold""#);
            }
            if *anchor == TextAnchor::Middle {
                out.push_str(r#" text-anchor="middle""#);
            }
            let _ = write!(out, r#" fill="{INK_COLOR}">{}</text>"#, escape_text(text));
        }
        LayoutNode::Rule {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            stroke,
        } => {
            let color = match stroke {
                Stroke::Ink => INK_COLOR,
                Stroke::Guide => GUIDE_COLOR,
            };
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{color}" stroke-width="{}"/>"#,
                fmt_num(*x1),
                fmt_num(*y1),
                fmt_num(*x2),
                fmt_num(*y2),
                fmt_num(*stroke_width),
            );
        }
    }
}

/// Plain decimal: integers print bare, otherwise at most two decimals without trailing zeros.
pub(crate) fn fmt_num(value: f32) -> String {
    let rounded = (f64::from(value) * 100.0).round() / 100.0;
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_string()
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
