use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::audio::analyzer::FrequencyAnalyzer;
use crate::render::record::{DrawCommand, RecordingSurface};

struct Flat {
    bins: usize,
    value: u8,
}

impl FrequencyAnalyzer for Flat {
    fn frequency_bin_count(&self) -> usize {
        self.bins
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        out.iter_mut().for_each(|b| *b = self.value);
    }
}

fn live_audio(bins: usize, value: u8) -> AudioHandle {
    let audio = AudioHandle::new();
    audio.set_analyzer(Rc::new(RefCell::new(Flat { bins, value })));
    audio.set_playing(true);
    audio
}

#[test]
fn bar_width_for_cover_layout() {
    assert!((bar_width(500.0, 30, 4.0) - 12.8).abs() < 1e-9);
    assert_eq!(bar_width(500.0, 0, 4.0), 0.0);
    assert_eq!(bar_width(100.0, 1, 4.0), 100.0);
}

#[test]
fn bin_mappings() {
    let center = BinMapping::default();
    assert_eq!(center.bin_for(15, 30), 0);
    assert_eq!(center.bin_for(0, 30), 30);
    assert_eq!(center.bin_for(29, 30), 28);
    assert_eq!(center.bin_for(14, 30), center.bin_for(16, 30));

    let direct = BinMapping::Direct {
        stride: 3,
        offset: 1,
    };
    assert_eq!(direct.bin_for(0, 30), 1);
    assert_eq!(direct.bin_for(2, 30), 7);
}

#[test]
fn invalid_opts_are_rejected() {
    let too_tall = VisualizerOpts {
        max_height: 250.0,
        ..VisualizerOpts::default()
    };
    assert!(Visualizer::new(too_tall).is_err());

    let no_bars = VisualizerOpts {
        bar_count: 0,
        ..VisualizerOpts::default()
    };
    assert!(no_bars.validate().is_err());

    let zero_stride = VisualizerOpts {
        mapping: BinMapping::Direct {
            stride: 0,
            offset: 0,
        },
        ..VisualizerOpts::default()
    };
    assert!(zero_stride.validate().is_err());
}

#[test]
fn smoothing_converges_geometrically() {
    let mut viz = Visualizer::new(VisualizerOpts::default()).unwrap();
    let target = vec![100.0; 30];
    for k in 1..=25 {
        viz.smooth_toward(&target);
        let expected = 100.0 * 0.8f64.powi(k);
        for &bar in viz.bars() {
            assert!(((100.0 - bar) - expected).abs() < 1e-9, "step {k}: {bar}");
        }
    }
}

#[test]
fn live_audio_drives_bars_toward_scaled_targets() {
    let mut viz = Visualizer::new(VisualizerOpts::default()).unwrap();
    let audio = live_audio(128, 255);
    assert!(viz.update(&audio));
    for &bar in viz.bars() {
        assert!((bar - 160.0 * 0.2).abs() < 1e-9);
    }
}

#[test]
fn bins_past_the_analyzer_read_as_silence() {
    let mut viz = Visualizer::new(VisualizerOpts::default()).unwrap();
    let audio = live_audio(4, 255);
    assert!(viz.update(&audio));
    // Center-weighted stride 2: only bars 14, 15, 16 map to bins 2, 0, 2.
    for (i, &bar) in viz.bars().iter().enumerate() {
        if (14..=16).contains(&i) {
            assert!(bar > 0.0, "bar {i}");
        } else {
            assert_eq!(bar, 0.0, "bar {i}");
        }
    }
}

#[test]
fn bars_freeze_while_paused() {
    let mut viz = Visualizer::new(VisualizerOpts::default()).unwrap();
    let audio = live_audio(128, 200);
    for _ in 0..5 {
        viz.update(&audio);
    }
    let frozen = viz.bars().to_vec();

    audio.set_playing(false);
    for _ in 0..12 {
        assert!(!viz.update(&audio));
    }
    assert_eq!(viz.bars(), frozen.as_slice());

    audio.set_playing(true);
    audio.clear_analyzer();
    for _ in 0..12 {
        assert!(!viz.update(&audio));
    }
    assert_eq!(viz.bars(), frozen.as_slice());
}

#[test]
fn render_skips_short_bars_and_anchors_to_bottom() {
    let mut viz = Visualizer::new(VisualizerOpts::default()).unwrap();
    let mut targets = vec![0.0; 30];
    targets[0] = 160.0;
    targets[3] = 4.0; // 0.8 after one step: below threshold
    targets[29] = 80.0;
    viz.smooth_toward(&targets);

    let mut surface = RecordingSurface::new(Canvas::COVER);
    surface.begin_frame();
    let bar_color = Color::rgb(0xCC, 0xFF, 0x00);
    viz.render(&mut surface, bar_color);

    let boxes: Vec<Rect> = surface
        .commands()
        .iter()
        .map(|cmd| match cmd {
            DrawCommand::FillPath { path, color, .. } => {
                assert_eq!(*color, bar_color);
                path.bounding_box()
            }
            other => panic!("unexpected command {other:?}"),
        })
        .collect();
    assert_eq!(boxes.len(), 2);

    let first = boxes[0];
    assert!((first.x0 - 0.0).abs() < 1e-6);
    assert!((first.x1 - 12.8).abs() < 1e-6);
    assert!((first.y0 - (500.0 - 32.0)).abs() < 1e-6);
    assert!((first.y1 - 500.0).abs() < 1e-6);

    let last = boxes[1];
    assert!((last.x0 - 29.0 * 16.8).abs() < 1e-6);
    assert!((last.x1 - 500.0).abs() < 1e-6);
    assert!((last.y0 - (500.0 - 16.0)).abs() < 1e-6);
}
