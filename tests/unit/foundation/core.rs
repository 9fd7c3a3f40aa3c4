use super::*;

#[test]
fn canvas_size_rejects_degenerate_values() {
    assert!(CanvasSize::new(0.0).is_err());
    assert!(CanvasSize::new(-10.0).is_err());
    assert!(CanvasSize::new(f64::NAN).is_err());
    assert_eq!(CanvasSize::new(320.0).unwrap().px(), 320.0);
}

#[test]
fn pixel_unit_mapping_flips_y() {
    let canvas = CanvasSize(200.0);
    assert_eq!(pixel_to_unit(Point::new(0.0, 200.0), canvas), Point::ZERO);
    assert_eq!(
        pixel_to_unit(Point::new(100.0, 0.0), canvas),
        Point::new(0.5, 1.0)
    );

    let p = Point::new(0.25, -0.4);
    let back = pixel_to_unit(unit_to_pixel(p, canvas), canvas);
    assert!((back.x - p.x).abs() < 1e-12);
    assert!((back.y - p.y).abs() < 1e-12);
}
