use super::*;
use serde_json::json;

#[test]
fn parses_short_long_and_alpha_hex() {
    assert_eq!(Color::from_hex("#111").unwrap(), Color::rgb(0x11, 0x11, 0x11));
    assert_eq!(Color::from_hex("ff0055").unwrap(), Color::rgb(255, 0, 0x55));
    assert_eq!(
        Color::from_hex("#0000FF80").unwrap(),
        Color::rgba(0, 0, 255, 0x80)
    );
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#zzzzzz").is_err());
}

#[test]
fn hex_round_trips_through_serde() {
    let c: Color = serde_json::from_value(json!("#00CCFF")).unwrap();
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#00CCFF"));

    let c: Color = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 4));
    assert!(serde_json::from_value::<Color>(json!([1, 2])).is_err());
}

#[test]
fn brightness_uses_luma_weights() {
    assert_eq!(Color::BLACK.brightness(), 0.0);
    assert!((Color::WHITE.brightness() - 255.0).abs() < 1e-9);
    assert!((Color::rgb(255, 0, 0).brightness() - 76.245).abs() < 1e-9);
}

#[test]
fn with_alpha_rounds_to_u8() {
    assert_eq!(Color::WHITE.with_alpha(0.15).a, 38);
    assert_eq!(Color::WHITE.with_alpha(0.4).a, 102);
    assert_eq!(Color::WHITE.with_alpha(2.0).a, 255);
}

#[test]
fn canvas_validation_and_geometry() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(500, 500).unwrap();
    assert_eq!(c, Canvas::COVER);
    assert_eq!(c.center(), Point::new(250.0, 250.0));
}
