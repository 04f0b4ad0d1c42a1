use kurbo::Shape;

use crate::effects::composite::over_in_place;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8Premul};
use crate::foundation::error::{FacewarpError, FacewarpResult};
use crate::frame::buffer::FrameRGBA;

#[derive(Clone, Copy, Debug)]
struct DrawState {
    transform: Affine,
    fill: Rgba8Premul,
}

/// Immediate-mode vector layer rasterized with `vello_cpu` and composited over a frame.
///
/// Mirrors a sketching API: a transform/fill state with `push`/`pop`, and `rect`, `ellipse`,
/// `triangle`, `quad`, `polygon` primitives in the current local coordinates. Everything is
/// filled; outlines are not drawn except through [`OverlayCanvas::line`].
pub struct OverlayCanvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    state: DrawState,
    stack: Vec<DrawState>,
    shapes: usize,
}

impl OverlayCanvas {
    /// Empty, fully transparent canvas.
    pub fn new(canvas: Canvas) -> FacewarpResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| FacewarpError::render("overlay width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| FacewarpError::render("overlay height exceeds u16"))?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(Self {
            ctx,
            width,
            height,
            state: DrawState {
                transform: Affine::IDENTITY,
                fill: Rgba8Premul::BLACK,
            },
            stack: Vec::new(),
            shapes: 0,
        })
    }

    /// Number of primitives filled so far.
    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    /// Save the current transform and fill.
    pub fn push(&mut self) {
        self.stack.push(self.state);
    }

    /// Restore the last pushed state; an unbalanced `pop` resets to the identity state.
    pub fn pop(&mut self) {
        self.state = self.stack.pop().unwrap_or(DrawState {
            transform: Affine::IDENTITY,
            fill: self.state.fill,
        });
    }

    /// Move the origin.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.state.transform *= Affine::translate((x, y));
    }

    /// Rotate by `angle` radians about the current origin.
    pub fn rotate(&mut self, angle: f64) {
        self.state.transform *= Affine::rotate(angle);
    }

    /// Colour used by subsequent shapes.
    pub fn fill(&mut self, color: Rgba8Premul) {
        self.state.fill = color;
    }

    /// Axis-aligned rectangle with its corner at `(x, y)`; negative sizes extend left/up.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.polygon(&[
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ]);
    }

    /// Ellipse centred on `(cx, cy)` with full width `w` and height `h`.
    pub fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64) {
        let (rx, ry) = ((w / 2.0).abs(), (h / 2.0).abs());
        if !(rx > 0.0 && ry > 0.0) {
            return;
        }
        let path = kurbo::Ellipse::new((cx, cy), (rx, ry), 0.0).to_path(0.1);
        self.fill_path(&path);
    }

    /// Filled triangle.
    pub fn triangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.polygon(&[Point::new(x1, y1), Point::new(x2, y2), Point::new(x3, y3)]);
    }

    /// Filled quadrilateral through four corners in order.
    pub fn quad(&mut self, a: Point, b: Point, c: Point, d: Point) {
        self.polygon(&[a, b, c, d]);
    }

    /// Closed polygon through `points`.
    pub fn polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        self.fill_path(&path);
    }

    /// Segment from `a` to `b`, `weight` pixels wide, in `color` (the fill is left unchanged).
    pub fn line(&mut self, a: Point, b: Point, weight: f64, color: Rgba8Premul) {
        let d = b - a;
        let len = d.hypot();
        if !(len > 0.0 && weight > 0.0) {
            return;
        }
        let n = kurbo::Vec2::new(-d.y, d.x) * (weight / 2.0 / len);
        let saved = self.state.fill;
        self.state.fill = color;
        self.polygon(&[a + n, b + n, b - n, a - n]);
        self.state.fill = saved;
    }

    fn fill_path(&mut self, path: &BezPath) {
        let c = self.state.fill;
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.shapes += 1;
    }

    /// Rasterize the layer and composite it over `out`.
    pub fn composite_onto(mut self, out: &mut FrameRGBA) -> FacewarpResult<()> {
        if u32::from(self.width) != out.width || u32::from(self.height) != out.height {
            return Err(FacewarpError::render(format!(
                "overlay {}x{} does not match frame {}x{}",
                self.width, self.height, out.width, out.height
            )));
        }
        if self.shapes == 0 {
            return Ok(());
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        over_in_place(&mut out.data, pixmap.data_as_u8_slice(), 1.0)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/overlay/canvas.rs"]
mod tests;
