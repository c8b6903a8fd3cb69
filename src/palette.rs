//! Fixed color sets offered by the cover editor.

use crate::foundation::core::Color;

/// Sticker fills. Stickers always draw from this set.
pub const STICKER_PALETTE: [Color; 6] = [
    Color::rgb(0x00, 0xFF, 0xCC),
    Color::rgb(0xFF, 0xFF, 0x00),
    Color::rgb(0xFF, 0x00, 0xFF),
    Color::rgb(0xFF, 0xFF, 0xFF),
    Color::rgb(0x00, 0xCC, 0xFF),
    Color::rgb(0x00, 0x00, 0x00),
];

/// Background swatches of the six-swatch picker.
pub const BACKGROUND_SWATCHES: [Color; 6] = [
    Color::rgb(0xFF, 0x00, 0x55),
    Color::rgb(0x00, 0xCC, 0xFF),
    Color::rgb(0xFF, 0xFF, 0x00),
    Color::rgb(0x11, 0x11, 0x11),
    Color::rgb(0xEE, 0xEE, 0xEE),
    Color::rgb(0x00, 0xFF, 0xCC),
];

/// Swatches for title text and visualizer bars.
pub const ACCENT_SWATCHES: [Color; 6] = [
    Color::rgb(0xFF, 0xFF, 0xFF),
    Color::rgb(0x0A, 0x0A, 0x0A),
    Color::rgb(0x00, 0x47, 0xAB),
    Color::rgb(0xFF, 0x14, 0x93),
    Color::rgb(0xCC, 0xFF, 0x00),
    Color::rgb(0x32, 0xFF, 0x7E),
];

pub const DEFAULT_BACKGROUND: Color = BACKGROUND_SWATCHES[0];
pub const DEFAULT_TEXT: Color = ACCENT_SWATCHES[0];
pub const DEFAULT_BARS: Color = ACCENT_SWATCHES[4];
