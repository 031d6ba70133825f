use ripple_text::pointer::{to_ndc, PointerPosition, SurfaceRect};

fn approx_eq2(a: (f32, f32), b: (f32, f32), eps: f32) -> bool {
    (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps
}

fn ndc(x: f32, y: f32, rect: SurfaceRect) -> (f32, f32) {
    let v = to_ndc(PointerPosition::new(x, y), rect).expect("rect has area");
    (v.x, v.y)
}

#[test]
fn corners_and_center() {
    // offset rect, as when the container sits below a header
    let rect = SurfaceRect::new(40.0, 120.0, 800.0, 200.0);

    assert!(approx_eq2(ndc(440.0, 220.0, rect), (0.0, 0.0), 1e-6));
    assert!(approx_eq2(ndc(40.0, 120.0, rect), (-1.0, 1.0), 1e-6));
    assert!(approx_eq2(ndc(840.0, 320.0, rect), (1.0, -1.0), 1e-6));
    assert!(approx_eq2(ndc(840.0, 120.0, rect), (1.0, 1.0), 1e-6));
}

#[test]
fn inside_points_stay_in_unit_square() {
    let rect = SurfaceRect::new(13.5, 7.25, 641.0, 199.0);
    for i in 1..40 {
        for j in 1..40 {
            let x = rect.left + rect.width * i as f32 / 40.0;
            let y = rect.top + rect.height * j as f32 / 40.0;
            let (nx, ny) = ndc(x, y, rect);
            assert!((-1.0..=1.0).contains(&nx), "x={x} -> {nx}");
            assert!((-1.0..=1.0).contains(&ny), "y={y} -> {ny}");
        }
    }
}

#[test]
fn y_axis_points_up() {
    let rect = SurfaceRect::new(0.0, 0.0, 100.0, 100.0);
    let (_, upper) = ndc(50.0, 10.0, rect);
    let (_, lower) = ndc(50.0, 90.0, rect);
    assert!(upper > lower);
}
