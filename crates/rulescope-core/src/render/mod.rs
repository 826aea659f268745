//! Rule outline rendering
//!
//! `build_outline` turns a rule map into an abstract outline tree; the text,
//! HTML and JSON functions materialise that tree for a particular target.

pub mod html_render;
pub mod outline;
pub mod text_render;

pub use html_render::render_outline_html;
pub use outline::{build_outline, render_rules, ArtifactRef, Outline, OutlineNode};
pub use text_render::render_outline_text;

/// Render an outline as pretty-printed JSON
///
/// # Errors
///
/// Returns `Serialization` if the outline cannot be encoded.
pub fn render_outline_json(outline: &Outline) -> crate::errors::Result<String> {
    Ok(serde_json::to_string_pretty(outline.items())?)
}
