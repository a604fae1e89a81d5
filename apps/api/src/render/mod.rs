// Worksheet export.
// Implements: SVG serialization of laid-out pages and the layout/export endpoints.

pub mod handlers;
pub mod svg;
