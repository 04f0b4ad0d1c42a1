use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{FacewarpError, FacewarpResult};
use crate::frame::buffer::FrameRGBA;

/// Prompt shown while no capture session is active.
pub const PROMPT: &str = "Click \"Start Camera\" to begin";

const FONT_SIZE: u32 = 24;

/// SVG source of the idle card: black background, centred white prompt.
pub fn placeholder_svg(canvas: Canvas) -> String {
    let (w, h) = (canvas.width, canvas.height);
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect width="{w}" height="{h}" fill="#000000"/>
<text x="{cx}" y="{cy}" font-family="sans-serif" font-size="{FONT_SIZE}" fill="#ffffff" text-anchor="middle" dominant-baseline="central">{prompt}</text>
</svg>"##,
        cx = f64::from(w) / 2.0,
        cy = f64::from(h) / 2.0,
        prompt = escape_xml(PROMPT),
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rasterize the idle card for `canvas`.
///
/// Text is shaped with the system fonts; hosts without any fonts get the blank card.
pub fn render_placeholder(canvas: Canvas) -> FacewarpResult<FrameRGBA> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let opts = usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };
    let svg = placeholder_svg(canvas);
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse placeholder svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| FacewarpError::render("failed to allocate placeholder pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    FrameRGBA::from_premul(canvas.width, canvas.height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/render/placeholder.rs"]
mod tests;
