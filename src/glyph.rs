//! Stylized sticker icons.
//!
//! Every glyph is authored in a 100×100 local frame. [`glyph_transform`] maps that frame onto the
//! canvas so that the local center `(50, 50)` lands on the requested position, whatever the
//! rotation and size.

use kurbo::Shape;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, BezPath, Color, Point, Rect};
use crate::render::surface::{LineJoin, PATH_TOLERANCE, StrokeStyle, Surface};

/// Side of the local glyph frame.
pub const GLYPH_FRAME: f64 = 100.0;

const OUTLINE: Color = Color::BLACK;
const OUTLINE_WIDTH: f64 = 5.0;
const HEADPHONES_OUTLINE_WIDTH: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphKind {
    Bolt,
    Star,
    Vinyl,
    Headphones,
    Radio,
}

impl GlyphKind {
    pub const ALL: [GlyphKind; 5] = [
        GlyphKind::Bolt,
        GlyphKind::Star,
        GlyphKind::Vinyl,
        GlyphKind::Headphones,
        GlyphKind::Radio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GlyphKind::Bolt => "bolt",
            GlyphKind::Star => "star",
            GlyphKind::Vinyl => "vinyl",
            GlyphKind::Headphones => "headphones",
            GlyphKind::Radio => "radio",
        }
    }
}

/// Local-to-canvas transform: translate → rotate → scale(size/100) → translate(−50, −50).
pub fn glyph_transform(center: Point, size: f64, rotation: f64) -> Affine {
    let half = GLYPH_FRAME / 2.0;
    Affine::translate(center.to_vec2())
        * Affine::rotate(rotation)
        * Affine::scale(size / GLYPH_FRAME)
        * Affine::translate((-half, -half))
}

/// Draw `kind` centered on `center`, `size` canvas units wide, rotated by `rotation` radians.
///
/// The surface transform is saved before and restored after the glyph.
pub fn draw_glyph(
    surface: &mut dyn Surface,
    kind: GlyphKind,
    center: Point,
    size: f64,
    color: Color,
    rotation: f64,
) {
    surface.save();
    surface.transform(glyph_transform(center, size, rotation));
    match kind {
        GlyphKind::Bolt => draw_bolt(surface, color),
        GlyphKind::Star => draw_star(surface, color),
        GlyphKind::Vinyl => draw_vinyl(surface, color),
        GlyphKind::Headphones => draw_headphones(surface, color),
        GlyphKind::Radio => draw_radio(surface, color),
    }
    surface.restore();
}

fn outline(width: f64) -> StrokeStyle {
    StrokeStyle::new(width).with_join(LineJoin::Round)
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            path.move_to((x, y));
        } else {
            path.line_to((x, y));
        }
    }
    path.close_path();
    path
}

fn fill_and_stroke(surface: &mut dyn Surface, path: &BezPath, color: Color, width: f64) {
    surface.fill_path(path, color);
    surface.stroke_path(path, OUTLINE, outline(width));
}

fn draw_bolt(surface: &mut dyn Surface, color: Color) {
    let path = polygon(&[
        (40.0, 10.0),
        (30.0, 50.0),
        (50.0, 50.0),
        (40.0, 90.0),
        (70.0, 40.0),
        (50.0, 40.0),
        (60.0, 10.0),
    ]);
    fill_and_stroke(surface, &path, color, OUTLINE_WIDTH);
}

fn draw_star(surface: &mut dyn Surface, color: Color) {
    let path = polygon(&[
        (50.0, 10.0),
        (60.0, 40.0),
        (95.0, 40.0),
        (65.0, 60.0),
        (75.0, 90.0),
        (50.0, 70.0),
        (20.0, 90.0),
        (35.0, 60.0),
        (5.0, 40.0),
        (40.0, 40.0),
    ]);
    fill_and_stroke(surface, &path, color, OUTLINE_WIDTH);
}

fn draw_vinyl(surface: &mut dyn Surface, color: Color) {
    let center = Point::new(50.0, 50.0);
    let disc = kurbo::Circle::new(center, 40.0).to_path(PATH_TOLERANCE);
    fill_and_stroke(surface, &disc, color, OUTLINE_WIDTH);

    let label = kurbo::Circle::new(center, 15.0).to_path(PATH_TOLERANCE);
    surface.fill_path(&label, OUTLINE);
}

fn draw_headphones(surface: &mut dyn Surface, color: Color) {
    let mut band = BezPath::new();
    band.move_to((20.0, 60.0));
    band.quad_to((20.0, 15.0), (50.0, 15.0));
    band.quad_to((80.0, 15.0), (80.0, 60.0));
    surface.stroke_path(&band, OUTLINE, outline(HEADPHONES_OUTLINE_WIDTH));

    for x in [15.0, 70.0] {
        let cup = Rect::from_origin_size((x, 60.0), (15.0, 25.0)).to_path(PATH_TOLERANCE);
        fill_and_stroke(surface, &cup, color, HEADPHONES_OUTLINE_WIDTH);
    }
}

fn draw_radio(surface: &mut dyn Surface, color: Color) {
    let body = Rect::from_origin_size((10.0, 35.0), (80.0, 30.0)).to_path(PATH_TOLERANCE);
    fill_and_stroke(surface, &body, color, OUTLINE_WIDTH);

    surface.fill_rect(Rect::from_origin_size((20.0, 42.0), (35.0, 16.0)), OUTLINE);
    surface.fill_rect(Rect::from_origin_size((65.0, 42.0), (15.0, 6.0)), OUTLINE);
    surface.fill_rect(Rect::from_origin_size((65.0, 52.0), (15.0, 6.0)), OUTLINE);
}

#[cfg(test)]
#[path = "../tests/unit/glyph.rs"]
mod tests;
