use super::*;
use crate::visualizer::BinMapping;

fn temp_json(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "popcover_cfg_{name}_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn defaults_are_valid_and_match_cover_layout() {
    let cfg = CoverConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas, Canvas::COVER);
    assert_eq!(cfg.stickers.cap, 20);
    assert_eq!(cfg.stickers.interval_ms, 400.0);
    assert_eq!(cfg.visualizer.bar_count, 30);
    assert_eq!(cfg.analyzer.fft_size, 256);
    assert!(!cfg.start_running);
}

#[test]
fn partial_json_fills_in_defaults() {
    let path = temp_json(
        "partial",
        r##"{
            "background": "#111111",
            "stickers": { "cap": 5 },
            "visualizer": { "mapping": { "kind": "direct", "stride": 1, "offset": 0 } }
        }"##,
    );
    let cfg = CoverConfig::from_path(&path).unwrap();
    assert_eq!(cfg.background, Color::rgb(0x11, 0x11, 0x11));
    assert_eq!(cfg.stickers.cap, 5);
    assert_eq!(cfg.stickers.interval_ms, 400.0);
    assert_eq!(
        cfg.visualizer.mapping,
        BinMapping::Direct {
            stride: 1,
            offset: 0
        }
    );
    assert_eq!(cfg.title, CoverConfig::default().title);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    let unknown = temp_json("unknown", r#"{ "bogus": 1 }"#);
    assert!(matches!(
        CoverConfig::from_path(&unknown),
        Err(CoverError::Validation(_))
    ));
    let _ = std::fs::remove_file(&unknown);

    let bad = temp_json("bad_interval", r#"{ "stickers": { "interval_ms": -1 } }"#);
    assert!(CoverConfig::from_path(&bad).is_err());
    let _ = std::fs::remove_file(&bad);
}

#[test]
fn validate_checks_nested_sections() {
    let mut cfg = CoverConfig::default();
    cfg.title.size_px = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = CoverConfig::default();
    cfg.visualizer.max_height = 300.0;
    assert!(cfg.validate().is_err());

    let mut cfg = CoverConfig::default();
    cfg.canvas.width = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = CoverConfig::default();
    let s = serde_json::to_string(&cfg).unwrap();
    let back: CoverConfig = serde_json::from_str(&s).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn bars_must_fit_the_canvas_width() {
    let mut cfg = CoverConfig::default();
    cfg.canvas = Canvas::new(100, 100).unwrap();
    assert!(matches!(cfg.validate(), Err(CoverError::Validation(_))));

    // 29 gaps of 4 px need more than 116 px.
    cfg.canvas = Canvas::new(116, 100).unwrap();
    assert!(cfg.validate().is_err());
    cfg.canvas = Canvas::new(117, 100).unwrap();
    cfg.validate().unwrap();

    cfg.visualizer.gap = 0.0;
    cfg.canvas = Canvas::new(100, 100).unwrap();
    cfg.validate().unwrap();
}
