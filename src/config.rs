use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::analyzer::AnalyzerOpts;
use crate::foundation::core::{Canvas, Color, Vec2};
use crate::foundation::error::{CoverError, CoverResult};
use crate::palette;
use crate::visualizer::{VisualizerOpts, bar_width};

/// One line of the title block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleLine {
    pub text: String,
    pub size_px: f32,
    pub weight: f32,
    /// Vertical offset of the line center from the canvas center.
    #[serde(default)]
    pub offset_y: f64,
}

/// Outline and drop shadow shared by both title lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleStyle {
    pub outline_width: f64,
    pub outline_color: Color,
    pub shadow_offset: Vec2,
    pub shadow_color: Color,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            outline_width: 12.0,
            outline_color: Color::BLACK,
            shadow_offset: Vec2::new(6.0, 6.0),
            shadow_color: Color::BLACK,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StickerOpts {
    /// Most stickers kept on screen; the oldest is evicted first.
    pub cap: usize,
    /// Minimum time between two generated stickers.
    pub interval_ms: f64,
}

impl Default for StickerOpts {
    fn default() -> Self {
        Self {
            cap: crate::sticker::DEFAULT_STICKER_CAP,
            interval_ms: 400.0,
        }
    }
}

/// Everything the renderer needs besides the audio handle and the random source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverConfig {
    pub canvas: Canvas,
    pub background: Color,
    pub text_color: Color,
    pub bar_color: Color,
    pub title: TitleLine,
    pub subtitle: TitleLine,
    pub title_style: TitleStyle,
    pub stickers: StickerOpts,
    pub visualizer: VisualizerOpts,
    pub analyzer: AnalyzerOpts,
    /// Font file for the title block; the system sans-serif face is used when unset.
    pub font_path: Option<PathBuf>,
    /// Start generating stickers right away instead of waiting for a toggle.
    pub start_running: bool,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::COVER,
            background: palette::DEFAULT_BACKGROUND,
            text_color: palette::DEFAULT_TEXT,
            bar_color: palette::DEFAULT_BARS,
            title: TitleLine {
                text: "POP".to_owned(),
                size_px: 110.0,
                weight: 900.0,
                offset_y: -30.0,
            },
            subtitle: TitleLine {
                text: "COVER".to_owned(),
                size_px: 56.0,
                weight: 700.0,
                offset_y: 55.0,
            },
            title_style: TitleStyle::default(),
            stickers: StickerOpts::default(),
            visualizer: VisualizerOpts::default(),
            analyzer: AnalyzerOpts::default(),
            font_path: None,
            start_running: false,
        }
    }
}

impl CoverConfig {
    /// Read and validate a JSON config. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> CoverResult<Self> {
        let f = std::fs::File::open(path)?;
        let r = std::io::BufReader::new(f);
        let cfg: Self = serde_json::from_reader(r).map_err(|e| {
            CoverError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CoverResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        for (name, line) in [("title", &self.title), ("subtitle", &self.subtitle)] {
            if !line.size_px.is_finite() || line.size_px <= 0.0 {
                return Err(CoverError::validation(format!(
                    "{name} size_px must be finite and > 0"
                )));
            }
            if !(1.0..=1000.0).contains(&line.weight) {
                return Err(CoverError::validation(format!(
                    "{name} weight must be within 1..=1000"
                )));
            }
            if !line.offset_y.is_finite() {
                return Err(CoverError::validation(format!(
                    "{name} offset_y must be finite"
                )));
            }
        }
        let style = &self.title_style;
        if !style.outline_width.is_finite() || style.outline_width < 0.0 {
            return Err(CoverError::validation(
                "title outline_width must be finite and >= 0",
            ));
        }
        if !style.shadow_offset.is_finite() {
            return Err(CoverError::validation("title shadow_offset must be finite"));
        }
        if !self.stickers.interval_ms.is_finite() || self.stickers.interval_ms < 0.0 {
            return Err(CoverError::validation(
                "sticker interval_ms must be finite and >= 0",
            ));
        }
        self.visualizer.validate()?;
        let width = bar_width(
            f64::from(self.canvas.width),
            self.visualizer.bar_count,
            self.visualizer.gap,
        );
        if width <= 0.0 {
            return Err(CoverError::validation(format!(
                "{} bars with gap {} do not fit a {} px wide canvas",
                self.visualizer.bar_count, self.visualizer.gap, self.canvas.width
            )));
        }
        self.analyzer.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
