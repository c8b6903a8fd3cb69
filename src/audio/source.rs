use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::foundation::error::{CoverError, CoverResult};

/// Decoded mono PCM track in `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PcmTrack {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl PcmTrack {
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> CoverResult<Self> {
        if sample_rate == 0 {
            return Err(CoverError::audio("sample rate must be > 0"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Load a WAV file and mix every channel down to mono.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn load_wav(path: &Path) -> CoverResult<Self> {
        let mut reader = WavReader::open(path).map_err(wav_err)?;
        let spec = reader.spec();
        let channels = usize::from(spec.channels);
        if channels == 0 {
            return Err(CoverError::audio("invalid channel count"));
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(wav_err)?,
            SampleFormat::Int => {
                let bits = u32::from(spec.bits_per_sample).clamp(2, 32);
                let max = ((1i64 << (bits - 1)) - 1) as f32;
                if bits <= 16 {
                    reader
                        .samples::<i16>()
                        .map(|s| s.map(|v| f32::from(v) / max))
                        .collect::<Result<_, _>>()
                        .map_err(wav_err)?
                } else {
                    reader
                        .samples::<i32>()
                        .map(|s| s.map(|v| v as f32 / max))
                        .collect::<Result<_, _>>()
                        .map_err(wav_err)?
                }
            }
        };

        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();
        tracing::debug!(
            sample_rate = spec.sample_rate,
            channels,
            frames = samples.len(),
            "loaded wav"
        );
        Self::from_samples(samples, spec.sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Samples played between `start_secs` and `end_secs`, clamped to the track.
    pub fn span(&self, start_secs: f64, end_secs: f64) -> &[f32] {
        let start = self.index_at(start_secs);
        let end = self.index_at(end_secs).max(start);
        &self.samples[start..end]
    }

    fn index_at(&self, secs: f64) -> usize {
        let idx = (secs.max(0.0) * f64::from(self.sample_rate)).round() as usize;
        idx.min(self.samples.len())
    }
}

fn wav_err(err: hound::Error) -> CoverError {
    match err {
        hound::Error::IoError(io) => CoverError::Io(io),
        other => CoverError::audio(format!("wav decode failed: {other}")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/source.rs"]
mod tests;
