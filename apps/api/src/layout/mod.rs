// Worksheet export layout.
// Implements: glyph width estimation, grid placement, fraction/mixed sub-layout.
// Pure and synchronous; runs inline in the export handlers.

pub mod engine;
pub mod font_metrics;

// Re-export the public API consumed by the export handlers.
pub use engine::{layout, ExportItem, LayoutNode, PageLayout, Stroke, TextAnchor};
pub use font_metrics::{default_page_config, PageConfig, SERIF_METRICS};
