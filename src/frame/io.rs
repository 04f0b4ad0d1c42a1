use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{FacewarpError, FacewarpResult};
use crate::frame::buffer::FrameRGBA;

/// Decode encoded image bytes into a premultiplied frame.
pub fn decode_frame(bytes: &[u8]) -> FacewarpResult<FrameRGBA> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameRGBA::from_straight(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn read_frame(path: &Path) -> FacewarpResult<FrameRGBA> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_frame(&bytes)
}

/// Encode a frame as PNG, creating parent directories as needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> FacewarpResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
    .map_err(FacewarpError::from)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/io.rs"]
mod tests;
