#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn surface() -> SurfaceSize {
    SurfaceSize::new(400, 200)
}

// --- SurfaceSize ---

#[test]
fn surface_size_keeps_nonzero_dimensions() {
    let size = SurfaceSize::new(640, 480);
    assert_eq!(size.width, 640);
    assert_eq!(size.height, 480);
}

#[test]
fn surface_size_clamps_zero_to_one() {
    let size = SurfaceSize::new(0, 0);
    assert_eq!(size, SurfaceSize::new(1, 1));
}

#[test]
fn surface_size_default_is_one_pixel() {
    assert_eq!(SurfaceSize::default(), SurfaceSize::new(1, 1));
}

#[test]
fn surface_size_float_accessors() {
    let size = surface();
    assert_eq!(size.width_f64(), 400.0);
    assert_eq!(size.height_f64(), 200.0);
}

// --- to_surface ---

#[test]
fn origin_maps_to_surface_center() {
    let p = to_surface(Point::new(0.0, 0.0), &Viewport::default(), surface());
    assert!(point_approx_eq(p, Point::new(200.0, 100.0)));
}

#[test]
fn top_left_corner_maps_to_pixel_origin() {
    let vp = Viewport::default();
    let p = to_surface(Point::new(vp.x_min(), vp.y_max()), &vp, surface());
    assert!(point_approx_eq(p, Point::new(0.0, 0.0)));
}

#[test]
fn bottom_right_corner_maps_to_surface_size() {
    let vp = Viewport::default();
    let p = to_surface(Point::new(vp.x_max(), vp.y_min()), &vp, surface());
    assert!(point_approx_eq(p, Point::new(400.0, 200.0)));
}

#[test]
fn y_axis_is_flipped() {
    let vp = Viewport::default();
    let low = to_surface(Point::new(0.0, -1.0), &vp, surface());
    let high = to_surface(Point::new(0.0, 1.0), &vp, surface());
    assert!(high.y < low.y);
}

#[test]
fn points_outside_viewport_map_off_surface() {
    let p = to_surface(Point::new(-20.0, 10.0), &Viewport::default(), surface());
    assert!(p.x < 0.0);
    assert!(p.y < 0.0);
}

// --- to_graph ---

#[test]
fn pixel_origin_maps_to_top_left_of_viewport() {
    let p = to_graph(Point::new(0.0, 0.0), &Viewport::default(), surface());
    assert!(point_approx_eq(p, Point::new(-10.0, 5.0)));
}

#[test]
fn to_graph_inverts_to_surface() {
    let vp = Viewport::new(-3.5, 7.25, -1.0, 12.0).unwrap();
    for graph in [Point::new(0.0, 0.0), Point::new(-3.5, 12.0), Point::new(2.2, -0.7), Point::new(100.0, -50.0)] {
        let back = to_graph(to_surface(graph, &vp, surface()), &vp, surface());
        assert!(point_approx_eq(back, graph), "{graph:?} came back as {back:?}");
    }
}

#[test]
fn to_surface_inverts_to_graph() {
    let vp = Viewport::default();
    let pixel = Point::new(123.0, 45.0);
    let back = to_surface(to_graph(pixel, &vp, surface()), &vp, surface());
    assert!(point_approx_eq(back, pixel));
}

// --- round trips across views ---

const REL_TOLERANCE: f64 = 1e-9;

/// Equal within `REL_TOLERANCE` of the larger of the two values and `span`,
/// the extent of the axis they were measured on.
fn rel_eq(a: f64, b: f64, span: f64) -> bool {
    (a - b).abs() <= REL_TOLERANCE * a.abs().max(b.abs()).max(span)
}

fn views() -> Vec<Viewport> {
    vec![
        Viewport::default(),
        Viewport::new(-3.5, 7.25, -1.0, 12.0).unwrap(),
        // Far from the origin.
        Viewport::new(1e6, 1e6 + 20.0, -1e6 - 10.0, -1e6).unwrap(),
        // Zoomed far in.
        Viewport::new(0.5, 0.5 + 1e-6, 2.0, 2.0 + 5e-7).unwrap(),
        // Zoomed far out.
        Viewport::new(-1e8, 1e8, -1.0, 1.0).unwrap(),
    ]
}

fn sizes() -> [SurfaceSize; 4] {
    [SurfaceSize::new(400, 200), SurfaceSize::new(1, 1), SurfaceSize::new(1920, 1080), SurfaceSize::new(3, 7)]
}

#[test]
fn graph_round_trip_holds_for_every_view_and_size() {
    for vp in views() {
        for size in sizes() {
            let graphs = [
                Point::new(vp.x_min(), vp.y_max()),
                Point::new(vp.x_max(), vp.y_min()),
                vp.center(),
                Point::new(vp.x_min() + 0.3 * vp.width(), vp.y_min() + 0.7 * vp.height()),
                Point::new(vp.x_max() + vp.width(), vp.y_min() - 2.0 * vp.height()),
            ];
            for graph in graphs {
                let back = to_graph(to_surface(graph, &vp, size), &vp, size);
                assert!(
                    rel_eq(back.x, graph.x, vp.width()) && rel_eq(back.y, graph.y, vp.height()),
                    "{graph:?} came back as {back:?} on {vp:?} at {size:?}"
                );
            }
        }
    }
}

#[test]
fn pixel_round_trip_holds_for_every_view_and_size() {
    for vp in views() {
        for size in sizes() {
            let (w, h) = (size.width_f64(), size.height_f64());
            let pixels = [Point::new(0.0, 0.0), Point::new(w, h), Point::new(0.37 * w, 0.81 * h), Point::new(-w, 3.0 * h)];
            for pixel in pixels {
                let back = to_surface(to_graph(pixel, &vp, size), &vp, size);
                assert!(
                    rel_eq(back.x, pixel.x, w) && rel_eq(back.y, pixel.y, h),
                    "{pixel:?} came back as {back:?} on {vp:?} at {size:?}"
                );
            }
        }
    }
}

// --- graph_x_of_pixel_x ---

#[test]
fn first_column_is_x_min() {
    let vp = Viewport::default();
    assert!(approx_eq(graph_x_of_pixel_x(0.0, &vp, surface()), vp.x_min()));
}

#[test]
fn column_step_is_viewport_width_over_surface_width() {
    let vp = Viewport::default();
    let a = graph_x_of_pixel_x(10.0, &vp, surface());
    let b = graph_x_of_pixel_x(11.0, &vp, surface());
    assert!(approx_eq(b - a, 20.0 / 400.0));
}

#[test]
fn graph_x_of_pixel_x_matches_to_graph() {
    let vp = Viewport::default();
    let p = to_graph(Point::new(77.0, 3.0), &vp, surface());
    assert!(approx_eq(graph_x_of_pixel_x(77.0, &vp, surface()), p.x));
}

#[test]
fn origin_on_800_by_400_surface() {
    let p = to_surface(Point::new(0.0, 0.0), &Viewport::default(), SurfaceSize::new(800, 400));
    assert!(point_approx_eq(p, Point::new(400.0, 200.0)));
}
