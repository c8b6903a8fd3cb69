//! Frequency bars along the bottom edge, smoothed toward the live spectrum.

use kurbo::{RoundedRect, RoundedRectRadii, Shape};
use serde::{Deserialize, Serialize};

use crate::audio::handle::AudioHandle;
use crate::foundation::core::{Canvas, Color, Rect};
use crate::foundation::error::{CoverError, CoverResult};
use crate::render::surface::{PATH_TOLERANCE, Surface};

/// Width of each of `count` bars spread over `canvas_width` with `gap` between neighbours.
pub fn bar_width(canvas_width: f64, count: usize, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    (canvas_width - (n - 1.0) * gap) / n
}

/// Which analyzer bin drives which bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinMapping {
    /// Low bins in the middle, mirrored outward: `bin = |i - count/2| * stride`.
    CenterWeighted { stride: usize },
    /// Left to right: `bin = i * stride + offset`.
    Direct { stride: usize, offset: usize },
}

impl Default for BinMapping {
    fn default() -> Self {
        Self::CenterWeighted { stride: 2 }
    }
}

impl BinMapping {
    pub fn bin_for(self, bar: usize, count: usize) -> usize {
        match self {
            Self::CenterWeighted { stride } => bar.abs_diff(count / 2) * stride,
            Self::Direct { stride, offset } => bar * stride + offset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizerOpts {
    pub bar_count: usize,
    pub gap: f64,
    pub max_height: f64,
    /// Fraction of the remaining distance covered per frame.
    pub smoothing: f64,
    /// Bars shorter than this are not drawn.
    pub threshold: f64,
    pub mapping: BinMapping,
}

impl Default for VisualizerOpts {
    fn default() -> Self {
        Self {
            bar_count: 30,
            gap: 4.0,
            max_height: 160.0,
            smoothing: 0.2,
            threshold: 1.0,
            mapping: BinMapping::default(),
        }
    }
}

impl VisualizerOpts {
    pub fn validate(&self) -> CoverResult<()> {
        if self.bar_count == 0 {
            return Err(CoverError::validation("visualizer bar_count must be > 0"));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(CoverError::validation("visualizer gap must be finite and >= 0"));
        }
        if !(140.0..=200.0).contains(&self.max_height) {
            return Err(CoverError::validation(
                "visualizer max_height must be within 140..=200",
            ));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(CoverError::validation(
                "visualizer smoothing must be within (0, 1]",
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(CoverError::validation(
                "visualizer threshold must be finite and >= 0",
            ));
        }
        let stride = match self.mapping {
            BinMapping::CenterWeighted { stride } | BinMapping::Direct { stride, .. } => stride,
        };
        if stride == 0 {
            return Err(CoverError::validation("visualizer bin stride must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Visualizer {
    opts: VisualizerOpts,
    bars: Vec<f64>,
    spectrum: Vec<u8>,
    targets: Vec<f64>,
}

impl Visualizer {
    pub fn new(opts: VisualizerOpts) -> CoverResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            bars: vec![0.0; opts.bar_count],
            spectrum: Vec::new(),
            targets: vec![0.0; opts.bar_count],
        })
    }

    pub fn opts(&self) -> &VisualizerOpts {
        &self.opts
    }

    /// Current smoothed bar heights, left to right.
    pub fn bars(&self) -> &[f64] {
        &self.bars
    }

    /// Pull one spectrum snapshot and move every bar toward it.
    ///
    /// Returns `false` and leaves the bars frozen when audio is paused or no analyzer is set.
    pub fn update(&mut self, audio: &AudioHandle) -> bool {
        if !audio.sample_into(&mut self.spectrum) {
            return false;
        }
        let count = self.opts.bar_count;
        for (i, target) in self.targets.iter_mut().enumerate() {
            let bin = self.opts.mapping.bin_for(i, count);
            let value = self.spectrum.get(bin).copied().unwrap_or(0);
            *target = f64::from(value) / 255.0 * self.opts.max_height;
        }
        let targets = std::mem::take(&mut self.targets);
        self.smooth_toward(&targets);
        self.targets = targets;
        true
    }

    /// One exponential smoothing step: `bar += (target - bar) * smoothing`.
    ///
    /// Missing targets count as zero.
    pub fn smooth_toward(&mut self, targets: &[f64]) {
        let alpha = self.opts.smoothing;
        for (i, bar) in self.bars.iter_mut().enumerate() {
            let target = targets.get(i).copied().unwrap_or(0.0);
            *bar += (target - *bar) * alpha;
        }
    }

    /// Draw visible bars anchored to the bottom edge with rounded top corners.
    pub fn render(&self, surface: &mut dyn Surface, color: Color) {
        let canvas = surface.canvas();
        for rect in self.bar_rects(canvas) {
            let radius = rect.width() / 2.0;
            let radii = RoundedRectRadii::new(radius, radius, 0.0, 0.0);
            let path = RoundedRect::from_rect(rect, radii).to_path(PATH_TOLERANCE);
            surface.fill_path(&path, color);
        }
    }

    fn bar_rects(&self, canvas: Canvas) -> impl Iterator<Item = Rect> + '_ {
        let size = canvas.size();
        let width = bar_width(size.width, self.opts.bar_count, self.opts.gap);
        let pitch = width + self.opts.gap;
        let threshold = self.opts.threshold;
        self.bars
            .iter()
            .enumerate()
            .filter(move |(_, h)| **h >= threshold)
            .map(move |(i, h)| {
                let x = i as f64 * pitch;
                Rect::new(x, size.height - h, x + width, size.height)
            })
    }
}

#[cfg(test)]
#[path = "../tests/unit/visualizer.rs"]
mod tests;
