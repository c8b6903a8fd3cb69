use std::collections::VecDeque;
use std::f64::consts::TAU;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::core::{Color, Point, Size};
use crate::glyph::{GlyphKind, draw_glyph};
use crate::palette::STICKER_PALETTE;
use crate::render::surface::Surface;

/// Rendered sticker size range, in canvas units (`min..max`).
pub const STICKER_SCALE_RANGE: std::ops::Range<f64> = 40.0..120.0;

/// Default number of stickers kept on screen.
pub const DEFAULT_STICKER_CAP: usize = 20;

/// One placed glyph. Immutable once generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sticker {
    pub kind: GlyphKind,
    pub position: Point,
    pub scale: f64,
    pub rotation: f64,
    pub color: Color,
}

impl Sticker {
    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_glyph(
            surface,
            self.kind,
            self.position,
            self.scale,
            self.color,
            self.rotation,
        );
    }
}

/// Generate one sticker with uniformly random kind, position, scale, rotation and color.
pub fn create_sticker<R: Rng>(rng: &mut R, extent: Size) -> Sticker {
    let kind = *GlyphKind::ALL.choose(rng).unwrap_or(&GlyphKind::Star);
    let color = *STICKER_PALETTE.choose(rng).unwrap_or(&Color::WHITE);
    Sticker {
        kind,
        position: Point::new(
            rng.gen_range(0.0..extent.width.max(f64::EPSILON)),
            rng.gen_range(0.0..extent.height.max(f64::EPSILON)),
        ),
        scale: rng.gen_range(STICKER_SCALE_RANGE),
        rotation: rng.gen_range(0.0..TAU),
        color,
    }
}

/// Rolling FIFO of the most recent stickers. Insertion order is draw order.
#[derive(Clone, Debug)]
pub struct StickerBuffer {
    items: VecDeque<Sticker>,
    cap: usize,
}

impl Default for StickerBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_STICKER_CAP)
    }
}

impl StickerBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(cap.min(64) + 1),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Append `sticker`, evicting the oldest entries beyond the cap.
    pub fn push(&mut self, sticker: Sticker) {
        self.items.push_back(sticker);
        while self.items.len() > self.cap {
            self.items.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sticker> {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "../tests/unit/sticker.rs"]
mod tests;
