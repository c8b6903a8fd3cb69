//! Per-frame state of one cover and the fixed-order draw pass over it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::handle::AudioHandle;
use crate::band::{Band, generate_band_pattern};
use crate::config::{CoverConfig, TitleLine, TitleStyle};
use crate::foundation::core::{Canvas, Color, Vec2};
use crate::foundation::error::CoverResult;
use crate::render::surface::{Shadow, Surface, TextPaint, TextStyle};
use crate::sticker::{StickerBuffer, create_sticker};
use crate::visualizer::Visualizer;

/// Owns everything drawn on the cover and advances it over time.
///
/// `frame` is the only place where time moves the state forward: it steps the sticker clock and
/// reads the analyzer through the shared [`AudioHandle`] once. `draw` renders the state as it is.
pub struct Compositor<R = StdRng> {
    canvas: Canvas,
    title: TitleLine,
    subtitle: TitleLine,
    title_style: TitleStyle,
    interval_ms: f64,
    audio: AudioHandle,
    rng: R,
    stickers: StickerBuffer,
    bands: Vec<Band>,
    visualizer: Visualizer,
    background: Color,
    text_color: Color,
    bar_color: Color,
    running: bool,
    last_tick_ms: f64,
    clock_ms: f64,
}

impl Compositor<StdRng> {
    /// Compositor with an entropy-seeded random source.
    pub fn from_entropy(config: CoverConfig, audio: AudioHandle) -> CoverResult<Self> {
        Self::new(config, audio, StdRng::from_entropy())
    }
}

impl<R: Rng> Compositor<R> {
    pub fn new(config: CoverConfig, audio: AudioHandle, rng: R) -> CoverResult<Self> {
        config.validate()?;
        let visualizer = Visualizer::new(config.visualizer)?;
        Ok(Self {
            canvas: config.canvas,
            title: config.title,
            subtitle: config.subtitle,
            title_style: config.title_style,
            interval_ms: config.stickers.interval_ms,
            audio,
            rng,
            stickers: StickerBuffer::new(config.stickers.cap),
            bands: Vec::new(),
            visualizer,
            background: config.background,
            text_color: config.text_color,
            bar_color: config.bar_color,
            running: config.start_running,
            last_tick_ms: 0.0,
            clock_ms: 0.0,
        })
    }

    /// Advance time to `now_ms`; emits at most one sticker per interval while running.
    ///
    /// Returns whether a sticker was added.
    pub fn step(&mut self, now_ms: f64) -> bool {
        self.clock_ms = now_ms;
        if !self.running || now_ms - self.last_tick_ms < self.interval_ms {
            return false;
        }
        let sticker = create_sticker(&mut self.rng, self.canvas.size());
        tracing::trace!(kind = sticker.kind.name(), now_ms, "sticker added");
        self.stickers.push(sticker);
        self.last_tick_ms = now_ms;
        true
    }

    /// Render the whole cover as one frame.
    ///
    /// Order: background, bands, stickers, title block, audio bars.
    pub fn draw(&self, surface: &mut dyn Surface) -> CoverResult<()> {
        surface.begin_frame();
        surface.fill_rect(self.canvas.rect(), self.background);
        for band in &self.bands {
            band.draw(surface);
        }
        for sticker in self.stickers.iter() {
            sticker.draw(surface);
        }
        self.draw_title(surface);
        self.visualizer.render(surface, self.bar_color);
        surface.finish_frame()
    }

    /// One animation tick: `step`, one analyzer read, then `draw`. Drawing happens even while
    /// paused.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> CoverResult<()> {
        self.step(now_ms);
        self.visualizer.update(&self.audio);
        self.draw(surface)
    }

    fn draw_title(&self, surface: &mut dyn Surface) {
        let style = &self.title_style;
        for line in [&self.title, &self.subtitle] {
            if line.text.trim().is_empty() {
                continue;
            }
            let text_style = TextStyle {
                size_px: line.size_px,
                weight: line.weight,
            };
            let center = self.canvas.center() + Vec2::new(0.0, line.offset_y);
            surface.draw_text(
                &line.text,
                text_style,
                center,
                TextPaint::Stroke {
                    color: style.outline_color,
                    width: style.outline_width,
                    shadow: Some(Shadow {
                        offset: style.shadow_offset,
                        color: style.shadow_color,
                    }),
                },
            );
            surface.draw_text(&line.text, text_style, center, TextPaint::Fill(self.text_color));
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or pause sticker generation. Starting waits a full interval before the next sticker.
    pub fn set_running(&mut self, running: bool) {
        if running && !self.running {
            self.last_tick_ms = self.clock_ms;
        }
        self.running = running;
        tracing::debug!(running, "sticker generation toggled");
    }

    pub fn toggle_running(&mut self) -> bool {
        self.set_running(!self.running);
        self.running
    }

    /// Switch the background; stickers and bands are cleared together.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.stickers.clear();
        self.bands.clear();
        tracing::debug!(background = %color.to_hex(), "background changed");
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.bar_color = color;
    }

    /// Remove every sticker and band.
    pub fn clear(&mut self) {
        self.stickers.clear();
        self.bands.clear();
    }

    /// Replace the band set with a fresh pattern harmonized to the current background.
    pub fn regenerate_bands(&mut self) {
        self.bands = generate_band_pattern(&mut self.rng, self.canvas.size(), self.background);
        tracing::debug!(bands = self.bands.len(), "band pattern regenerated");
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn bar_color(&self) -> Color {
        self.bar_color
    }

    pub fn stickers(&self) -> &StickerBuffer {
        &self.stickers
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn audio(&self) -> &AudioHandle {
        &self.audio
    }
}

#[cfg(test)]
#[path = "../tests/unit/compositor.rs"]
mod tests;
