use std::collections::VecDeque;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{CoverError, CoverResult};

/// Source of frequency-domain snapshots, polled once per drawn frame.
pub trait FrequencyAnalyzer {
    /// Number of frequency bins in one snapshot.
    fn frequency_bin_count(&self) -> usize;

    /// Write the current magnitude of each bin as `0..=255` into `out`.
    ///
    /// Writes `min(out.len(), frequency_bin_count())` entries.
    fn byte_frequency_data(&mut self, out: &mut [u8]);
}

/// Analyzer tuning, matching the browser analyser-node parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerOpts {
    /// Window length in samples; a power of two in `32..=32768`.
    pub fft_size: usize,
    /// Time smoothing between successive snapshots, `0..=1`.
    pub smoothing: f32,
    pub min_db: f32,
    pub max_db: f32,
}

impl Default for AnalyzerOpts {
    fn default() -> Self {
        Self {
            fft_size: 256,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

impl AnalyzerOpts {
    pub fn validate(&self) -> CoverResult<()> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(CoverError::validation(
                "analyzer fft_size must be a power of two in 32..=32768",
            ));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(CoverError::validation(
                "analyzer smoothing must be within 0..=1",
            ));
        }
        if !(self.min_db < self.max_db) {
            return Err(CoverError::validation(
                "analyzer min_db must be below max_db",
            ));
        }
        Ok(())
    }
}

/// Software spectrum analyzer over a stream of mono PCM samples.
///
/// Keeps the latest `fft_size` samples. Each snapshot applies a Blackman window, takes the FFT,
/// smooths magnitudes over time and maps `[min_db, max_db]` onto `0..=255`.
pub struct FftAnalyzer {
    opts: AnalyzerOpts,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    history: VecDeque<f32>,
    smoothed: Vec<f32>,
    buf: Vec<Complex<f32>>,
}

impl FftAnalyzer {
    pub fn new(opts: AnalyzerOpts) -> CoverResult<Self> {
        opts.validate()?;
        let n = opts.fft_size;
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n);
        Ok(Self {
            opts,
            fft,
            window: blackman_window(n),
            history: std::iter::repeat_n(0.0, n).collect(),
            smoothed: vec![0.0; n / 2],
            buf: vec![Complex::new(0.0, 0.0); n],
        })
    }

    pub fn opts(&self) -> AnalyzerOpts {
        self.opts
    }

    /// Append samples; only the most recent `fft_size` are kept.
    pub fn push_samples(&mut self, samples: &[f32]) {
        let n = self.opts.fft_size;
        let tail = &samples[samples.len().saturating_sub(n)..];
        for &s in tail {
            if self.history.len() == n {
                self.history.pop_front();
            }
            self.history.push_back(s);
        }
    }

    /// Drop buffered samples and smoothing memory.
    pub fn reset(&mut self) {
        self.history.iter_mut().for_each(|s| *s = 0.0);
        self.smoothed.iter_mut().for_each(|m| *m = 0.0);
    }

    fn update_spectrum(&mut self) {
        for ((slot, &sample), &w) in self
            .buf
            .iter_mut()
            .zip(self.history.iter())
            .zip(self.window.iter())
        {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.buf);

        let n = self.opts.fft_size as f32;
        let tau = self.opts.smoothing;
        for (m, c) in self.smoothed.iter_mut().zip(self.buf.iter()) {
            let magnitude = c.norm() / n;
            let next = tau * *m + (1.0 - tau) * magnitude;
            *m = if next.is_finite() { next } else { 0.0 };
        }
    }
}

impl FrequencyAnalyzer for FftAnalyzer {
    fn frequency_bin_count(&self) -> usize {
        self.opts.fft_size / 2
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.update_spectrum();
        let range = self.opts.max_db - self.opts.min_db;
        for (dst, &m) in out.iter_mut().zip(self.smoothed.iter()) {
            *dst = if m > 0.0 {
                let db = 20.0 * m.log10();
                (255.0 / range * (db - self.opts.min_db)).floor().clamp(0.0, 255.0) as u8
            } else {
                0
            };
        }
    }
}

fn blackman_window(n: usize) -> Vec<f32> {
    const A0: f32 = 0.42;
    const A1: f32 = 0.5;
    const A2: f32 = 0.08;
    let len = n as f32;
    (0..n)
        .map(|i| {
            let x = std::f32::consts::TAU * i as f32 / len;
            A0 - A1 * x.cos() + A2 * (2.0 * x).cos()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/audio/analyzer.rs"]
mod tests;
