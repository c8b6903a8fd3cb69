/// Frequency analyzers and the FFT implementation.
pub mod analyzer;
/// Shared playback state read by the compositor.
pub mod handle;
/// WAV decoding into mono PCM.
pub mod source;
