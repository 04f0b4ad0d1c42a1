use std::ops::Deref;
use std::sync::Arc;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{FacewarpError, FacewarpResult};

/// A frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries. Camera frames are opaque, so for them premultiplied and straight bytes coincide.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A frame of `canvas` size filled with one color.
    pub fn filled(canvas: Canvas, color: Rgba8Premul) -> Self {
        let data = color.to_array().repeat(canvas.rgba_len() / 4);
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    /// Wrap premultiplied RGBA8 bytes, validating the buffer length.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> FacewarpResult<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(FacewarpError::validation(format!(
                "frame {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying in place.
    pub fn from_straight(width: u32, height: u32, mut data: Vec<u8>) -> FacewarpResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul(width, height, data)
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        let i = self.index(x as u32, y as u32);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Write a pixel; writes outside the frame are dropped.
    pub fn set_pixel(&mut self, x: i64, y: i64, px: [u8; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Overwrite this frame with `src`, which must have the same dimensions.
    pub fn copy_from(&mut self, src: &FrameRGBA) -> FacewarpResult<()> {
        if self.width != src.width || self.height != src.height {
            return Err(FacewarpError::render(format!(
                "copy_from expects {}x{}, got {}x{}",
                self.width, self.height, src.width, src.height
            )));
        }
        self.data.copy_from_slice(&src.data);
        self.premultiplied = src.premultiplied;
        Ok(())
    }

    /// Copy `rect` into a new offscreen frame of the rect's size.
    ///
    /// Pixels of `rect` that fall outside this frame are transparent in the result.
    pub fn crop(&self, rect: PixelRect) -> FacewarpResult<FrameRGBA> {
        let mut out = FrameRGBA::from_premul(
            rect.w,
            rect.h,
            vec![0u8; expected_len(rect.w, rect.h)?],
        )?;
        for y in 0..rect.h {
            for x in 0..rect.w {
                if let Some(px) = self.pixel(
                    i64::from(rect.x) + i64::from(x),
                    i64::from(rect.y) + i64::from(y),
                ) {
                    out.set_pixel(i64::from(x), i64::from(y), px);
                }
            }
        }
        Ok(out)
    }

    /// Write `src` with its top-left corner at `(x, y)`, clipped to this frame.
    ///
    /// Transparent source pixels leave the destination untouched.
    pub fn blit(&mut self, src: &FrameRGBA, x: i32, y: i32) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                let i = src.index(sx, sy);
                let px = [src.data[i], src.data[i + 1], src.data[i + 2], src.data[i + 3]];
                if px[3] == 0 {
                    continue;
                }
                self.set_pixel(
                    i64::from(x) + i64::from(sx),
                    i64::from(y) + i64::from(sy),
                    px,
                );
            }
        }
    }

    /// Straight-alpha copy of the pixel data, for encoders.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            for px in out.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 || a == 255 {
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
        out
    }
}

/// Immutable copy of the frame captured at the start of a draw cycle.
///
/// Strategies read only from the snapshot and write only to the live output, so an effect never
/// samples its own partially drawn pixels.
#[derive(Clone, Debug)]
pub struct FrameSnapshot(Arc<FrameRGBA>);

impl FrameSnapshot {
    /// Capture device that always returns `frame`.
    pub fn new(frame: FrameRGBA) -> Self {
        Self(Arc::new(frame))
    }

    /// A mutable copy to draw into.
    pub fn to_frame(&self) -> FrameRGBA {
        (*self.0).clone()
    }
}

impl Deref for FrameSnapshot {
    type Target = FrameRGBA;

    fn deref(&self) -> &FrameRGBA {
        &self.0
    }
}

impl From<FrameRGBA> for FrameSnapshot {
    fn from(frame: FrameRGBA) -> Self {
        Self::new(frame)
    }
}

/// Integer pixel rectangle; `x`/`y` may lie outside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl PixelRect {
    /// Truncate float geometry toward zero, the way the display surface's copy calls do.
    pub fn truncated(x: f64, y: f64, w: f64, h: f64) -> Self {
        fn to_i32(v: f64) -> i32 {
            if v.is_finite() {
                v.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
            } else {
                0
            }
        }
        Self {
            x: to_i32(x),
            y: to_i32(y),
            w: to_i32(w).max(0) as u32,
            h: to_i32(h).max(0) as u32,
        }
    }

    /// Zero width or height.
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Intersection with a `canvas`-sized frame anchored at the origin.
    pub fn clip_to(self, canvas: Canvas) -> PixelRect {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.w)).min(i64::from(canvas.width));
        let y1 = (i64::from(self.y) + i64::from(self.h)).min(i64::from(canvas.height));
        if x1 <= x0 || y1 <= y0 {
            return PixelRect {
                x: x0 as i32,
                y: y0 as i32,
                w: 0,
                h: 0,
            };
        }
        PixelRect {
            x: x0 as i32,
            y: y0 as i32,
            w: (x1 - x0) as u32,
            h: (y1 - y0) as u32,
        }
    }
}

fn expected_len(width: u32, height: u32) -> FacewarpResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FacewarpError::validation("frame buffer size overflow"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/buffer.rs"]
mod tests;
