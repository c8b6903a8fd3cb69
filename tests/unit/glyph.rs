use super::*;
use crate::foundation::core::Canvas;
use crate::render::record::{DrawCommand, RecordingSurface};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn local_center_maps_to_position_for_any_rotation_and_scale() {
    let cases = [
        (Point::new(250.0, 250.0), 0.0, 100.0),
        (Point::new(12.5, 480.0), FRAC_PI_2, 40.0),
        (Point::new(-30.0, 77.0), PI, 120.0),
        (Point::new(499.0, 1.0), 5.3, 63.7),
        (Point::new(100.0, 200.0), TAU - 0.01, 1.0),
    ];
    for (p, r, s) in cases {
        let t = glyph_transform(p, s, r);
        assert!(close(t * Point::new(50.0, 50.0), p), "p={p:?} r={r} s={s}");
    }
}

#[test]
fn transform_scales_local_frame_to_size() {
    let t = glyph_transform(Point::new(0.0, 0.0), 40.0, 0.0);
    assert!(close(t * Point::new(0.0, 0.0), Point::new(-20.0, -20.0)));
    assert!(close(t * Point::new(100.0, 100.0), Point::new(20.0, 20.0)));

    let t = glyph_transform(Point::new(10.0, 10.0), 100.0, FRAC_PI_2);
    // A quarter turn sends local +x onto canvas +y.
    assert!(close(t * Point::new(100.0, 50.0), Point::new(10.0, 60.0)));
}

#[test]
fn every_glyph_balances_save_and_restore() {
    let mut surface = RecordingSurface::new(Canvas::COVER);
    surface.begin_frame();
    for kind in GlyphKind::ALL {
        draw_glyph(
            &mut surface,
            kind,
            Point::new(100.0, 100.0),
            80.0,
            Color::WHITE,
            1.0,
        );
        assert_eq!(surface.save_depth(), 0, "{}", kind.name());
        assert_eq!(surface.current_transform(), Affine::IDENTITY);
    }
}

#[test]
fn glyph_paths_stay_inside_local_frame_and_use_black_outline() {
    for kind in GlyphKind::ALL {
        let mut surface = RecordingSurface::new(Canvas::COVER);
        surface.begin_frame();
        draw_glyph(
            &mut surface,
            kind,
            Point::new(250.0, 250.0),
            60.0,
            Color::rgb(0, 255, 204),
            0.7,
        );

        let expected = glyph_transform(Point::new(250.0, 250.0), 60.0, 0.7);
        let mut strokes = 0;
        for cmd in surface.commands() {
            assert_eq!(cmd.transform(), expected);
            let (path, is_stroke) = match cmd {
                DrawCommand::FillPath { path, .. } => (path, false),
                DrawCommand::StrokePath { path, stroke, .. } => {
                    assert!((3.0..=8.0).contains(&stroke.width));
                    assert_eq!(cmd.color(), Color::BLACK);
                    (path, true)
                }
                DrawCommand::Text { .. } => panic!("glyphs never draw text"),
            };
            strokes += usize::from(is_stroke);
            let bb = path.bounding_box();
            assert!(bb.x0 >= 0.0 && bb.y0 >= 0.0, "{} {bb:?}", kind.name());
            assert!(bb.x1 <= 100.0 && bb.y1 <= 100.0, "{} {bb:?}", kind.name());
        }
        assert!(strokes >= 1, "{} has no outline", kind.name());
    }
}

#[test]
fn fill_uses_supplied_color() {
    let mut surface = RecordingSurface::new(Canvas::COVER);
    surface.begin_frame();
    draw_glyph(
        &mut surface,
        GlyphKind::Star,
        Point::new(50.0, 50.0),
        100.0,
        Color::rgb(255, 0, 255),
        0.0,
    );
    assert_eq!(surface.commands()[0].color(), Color::rgb(255, 0, 255));
}
