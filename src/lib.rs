//! popcover renders generative pop-art album covers.
//!
//! A cover is composed every frame from a fixed stack of layers:
//!
//! - a flat background
//! - soft translucent bands harmonized to the background
//! - a rolling set of randomly placed stickers
//! - a two-line outlined title with a hard drop shadow
//! - audio bars driven by a live frequency analyzer
//!
//! [`Compositor`] owns that state, [`CoverSession`] drives it from an animation loop and UI
//! actions, and [`export_current_frame`] saves the last frame as a PNG.
#![forbid(unsafe_code)]

mod foundation;

/// Audio analyzers, the shared playback handle and WAV decoding.
pub mod audio;
/// Soft background bands.
pub mod band;
/// Per-frame cover state and draw pass.
pub mod compositor;
/// JSON render configuration.
pub mod config;
/// PNG export.
pub mod export;
/// Sticker glyph shapes.
pub mod glyph;
/// Fixed color sets.
pub mod palette;
/// Drawing surfaces.
pub mod render;
/// Frame scheduling and the animation loop.
pub mod scheduler;
/// Mounted cover view and UI actions.
pub mod session;
/// Randomized stickers and the rolling sticker buffer.
pub mod sticker;
/// Audio bar visualizer.
pub mod visualizer;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Color, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{CoverError, CoverResult};

pub use crate::audio::analyzer::{AnalyzerOpts, FftAnalyzer, FrequencyAnalyzer};
pub use crate::audio::handle::{AudioHandle, SharedAnalyzer};
pub use crate::audio::source::PcmTrack;
pub use crate::compositor::Compositor;
pub use crate::config::CoverConfig;
pub use crate::export::{EXPORT_FILE_NAME, encode_png, export_current_frame, write_png};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::record::{DrawCommand, RecordingSurface};
pub use crate::render::surface::{FrameRGBA, Surface};
pub use crate::render::text::TextEngine;
pub use crate::scheduler::{AnimationLoop, FixedRateScheduler, FrameRequest, FrameScheduler};
pub use crate::session::CoverSession;
pub use crate::sticker::{Sticker, StickerBuffer};
pub use crate::visualizer::{BinMapping, Visualizer, VisualizerOpts};
