//! Soft background bands: thick translucent cubic curves that cross the whole canvas.

use rand::Rng;

use crate::foundation::core::{BezPath, Color, Point, Size};
use crate::render::surface::{LineCap, LineJoin, StrokeStyle, Surface};

/// Distance beyond the canvas edge at which band endpoints are placed.
pub const EDGE_MARGIN: f64 = 100.0;

/// Inclusive band count range of one pattern.
pub const BAND_COUNT: std::ops::RangeInclusive<usize> = 5..=12;

/// Stroke width range, in canvas units (`min..=max`).
pub const BAND_WIDTH: std::ops::RangeInclusive<f64> = 5.0..=50.0;

/// Brightness threshold (×1000) above which a background counts as light.
const LIGHT_LUMA_MILLI: u32 = 128_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Bands enter at the top edge and leave at the bottom edge.
    Vertical,
    /// Bands enter at the left edge and leave at the right edge.
    Horizontal,
}

/// One cubic bezier stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub points: [Point; 4],
    pub width: f64,
    pub color: Color,
}

impl Band {
    pub fn path(&self) -> BezPath {
        let [p0, p1, p2, p3] = self.points;
        let mut path = BezPath::new();
        path.move_to(p0);
        path.curve_to(p1, p2, p3);
        path
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let stroke = StrokeStyle::new(self.width)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Round);
        surface.stroke_path(&self.path(), self.color, stroke);
    }
}

/// Decorative stroke color that stays visible on `background`.
///
/// Light backgrounds (`Y > 128`) get a half-value copy of the background at 40% opacity; dark
/// backgrounds get white at 15% opacity.
pub fn harmonize(background: Color) -> Color {
    if background.luma_milli() > LIGHT_LUMA_MILLI {
        Color::rgb(background.r / 2, background.g / 2, background.b / 2).with_alpha(0.4)
    } else {
        Color::WHITE.with_alpha(0.15)
    }
}

/// Build a fresh band set for `extent`, all colored `harmonize(background)`.
pub fn generate_band_pattern<R: Rng>(rng: &mut R, extent: Size, background: Color) -> Vec<Band> {
    let orientation = if rng.gen_bool(0.5) {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let count = rng.gen_range(BAND_COUNT);
    let color = harmonize(background);
    (0..count)
        .map(|_| random_band(rng, extent, orientation, color))
        .collect()
}

fn random_band<R: Rng>(rng: &mut R, extent: Size, orientation: Orientation, color: Color) -> Band {
    let w = extent.width.max(f64::EPSILON);
    let h = extent.height.max(f64::EPSILON);
    let points = match orientation {
        Orientation::Vertical => [
            Point::new(rng.gen_range(0.0..w), -EDGE_MARGIN),
            Point::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h)),
            Point::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h)),
            Point::new(rng.gen_range(0.0..w), h + EDGE_MARGIN),
        ],
        Orientation::Horizontal => [
            Point::new(-EDGE_MARGIN, rng.gen_range(0.0..h)),
            Point::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h)),
            Point::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h)),
            Point::new(w + EDGE_MARGIN, rng.gen_range(0.0..h)),
        ],
    };
    Band {
        points,
        width: rng.gen_range(BAND_WIDTH),
        color,
    }
}

#[cfg(test)]
#[path = "../tests/unit/band.rs"]
mod tests;
