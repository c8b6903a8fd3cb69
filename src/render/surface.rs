use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Canvas, Color, Point, Rect, Vec2};
use crate::foundation::error::CoverResult;

/// Flattening tolerance used when shapes are converted to paths.
pub(crate) const PATH_TOLERANCE: f64 = 0.1;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

/// Outline parameters for [`Surface::stroke_path`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub join: LineJoin,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            join: LineJoin::Miter,
            cap: LineCap::Butt,
        }
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

/// Font parameters for one line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub weight: f32,
}

/// Hard drop shadow: the same shape repeated at a device-space offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset: Vec2,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextPaint {
    Fill(Color),
    Stroke {
        color: Color,
        width: f64,
        shadow: Option<Shadow>,
    },
}

/// 2-D drawing surface with a canvas-style transform stack.
///
/// Every draw call uses the current transform. `save`/`restore` push and pop that transform;
/// a `restore` without a matching `save` is ignored.
pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Start a new frame. Commands issued before `finish_frame` make up the frame.
    fn begin_frame(&mut self);

    /// Rasterize (or otherwise commit) the frame started by `begin_frame`.
    fn finish_frame(&mut self) -> CoverResult<()>;

    fn save(&mut self);
    fn restore(&mut self);

    /// Post-multiply the current transform by `affine`.
    fn transform(&mut self, affine: Affine);

    fn fill_path(&mut self, path: &BezPath, color: Color);
    fn stroke_path(&mut self, path: &BezPath, color: Color, stroke: StrokeStyle);

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_path(&rect.to_path(PATH_TOLERANCE), color);
    }

    /// Draw one line of text centered (horizontally and vertically) on `center`.
    fn draw_text(&mut self, text: &str, style: TextStyle, center: Point, paint: TextPaint);

    /// Read back the last finished frame, if this surface holds pixels.
    fn read_pixels(&self) -> Option<FrameRGBA>;

    /// Number of frames committed through `finish_frame`.
    fn frames_rendered(&self) -> u64;
}

#[derive(Clone, Debug, Default)]
pub(crate) struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub(crate) fn current(&self) -> Affine {
        self.current
    }

    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }

    pub(crate) fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub(crate) fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        }
    }

    pub(crate) fn apply(&mut self, affine: Affine) {
        self.current = self.current * affine;
    }

    pub(crate) fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
