use super::*;
use crate::foundation::core::Rect;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn read_pixels_requires_a_finished_frame() {
    let surface = CpuSurface::new(Canvas::new(8, 8).unwrap()).unwrap();
    assert!(surface.read_pixels().is_none());
    assert_eq!(surface.frames_rendered(), 0);
}

#[test]
fn fill_rect_respects_current_transform() {
    let mut surface = CpuSurface::new(Canvas::new(32, 32).unwrap()).unwrap();
    surface.begin_frame();
    surface.save();
    surface.transform(Affine::translate((16.0, 16.0)));
    surface.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), Color::rgb(255, 0, 0));
    surface.restore();
    surface.finish_frame().unwrap();

    let frame = surface.read_pixels().unwrap();
    assert_eq!(frame.data.len(), 32 * 32 * 4);
    assert!(frame.premultiplied);
    assert_eq!(px(&frame, 24, 24), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 4, 4), [0, 0, 0, 0]);
}

#[test]
fn each_frame_starts_from_a_clean_pixmap() {
    let mut surface = CpuSurface::new(Canvas::new(16, 16).unwrap()).unwrap();
    surface.begin_frame();
    surface.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), Color::WHITE);
    surface.finish_frame().unwrap();

    surface.begin_frame();
    surface.finish_frame().unwrap();

    let frame = surface.read_pixels().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
    assert_eq!(surface.frames_rendered(), 2);
}

#[test]
fn text_without_engine_is_skipped() {
    let mut surface = CpuSurface::new(Canvas::new(16, 16).unwrap()).unwrap();
    assert!(!surface.has_text());
    surface.begin_frame();
    surface.draw_text(
        "HI",
        TextStyle {
            size_px: 12.0,
            weight: 900.0,
        },
        Point::new(8.0, 8.0),
        TextPaint::Fill(Color::WHITE),
    );
    surface.finish_frame().unwrap();
    assert!(surface.read_pixels().unwrap().data.iter().all(|&b| b == 0));
}

#[test]
fn reused_context_drops_previous_frame_state() {
    let mut surface = CpuSurface::new(Canvas::new(16, 16).unwrap()).unwrap();
    surface.begin_frame();
    surface.transform(Affine::translate((8.0, 8.0)));
    surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::WHITE);
    surface.finish_frame().unwrap();

    surface.begin_frame();
    surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::rgb(255, 0, 0));
    surface.finish_frame().unwrap();

    let frame = surface.read_pixels().unwrap();
    assert_eq!(px(&frame, 4, 4), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 12, 12), [0, 0, 0, 0]);
}
