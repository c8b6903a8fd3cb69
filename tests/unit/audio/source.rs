use super::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "popcover_{name}_{}_{}.wav",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn stereo_int16_is_mixed_to_mono() {
    let path = temp_path("stereo");
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut w = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..4 {
        w.write_sample(i16::MAX).unwrap();
        w.write_sample(0i16).unwrap();
    }
    w.finalize().unwrap();

    let track = PcmTrack::load_wav(&path).unwrap();
    assert_eq!(track.sample_rate(), 8000);
    assert_eq!(track.samples().len(), 4);
    assert!(track.samples().iter().all(|&s| (s - 0.5).abs() < 1e-6));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn float_wav_loads_verbatim() {
    let path = temp_path("float");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut w = hound::WavWriter::create(&path, spec).unwrap();
    for v in [0.25f32, -0.5, 1.0] {
        w.write_sample(v).unwrap();
    }
    w.finalize().unwrap();

    let track = PcmTrack::load_wav(&path).unwrap();
    assert_eq!(track.samples(), &[0.25, -0.5, 1.0]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = PcmTrack::load_wav(std::path::Path::new("/nonexistent/popcover.wav")).unwrap_err();
    assert!(matches!(err, CoverError::Io(_)));
}

#[test]
fn span_clamps_to_track() {
    let track = PcmTrack::from_samples((0..100).map(|i| i as f32).collect(), 10).unwrap();
    assert_eq!(track.duration_secs(), 10.0);
    assert_eq!(track.span(1.0, 1.5), &[10.0, 11.0, 12.0, 13.0, 14.0]);
    assert_eq!(track.span(9.8, 20.0), &[98.0, 99.0]);
    assert!(track.span(3.0, 2.0).is_empty());
    assert!(track.span(-5.0, 0.0).is_empty());
}

#[test]
fn zero_sample_rate_is_rejected() {
    assert!(PcmTrack::from_samples(vec![0.0], 0).is_err());
}
