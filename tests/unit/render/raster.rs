use super::*;
use crate::foundation::core::Canvas;
use crate::geometry::shapes::{add_box, add_edge};

fn scene() -> SceneState {
    SceneState::new(Canvas::new(20, 20).unwrap(), Rgb8::WHITE)
}

fn painted(scene: &SceneState) -> usize {
    let mut n = 0;
    for y in 0..20 {
        for x in 0..20 {
            if scene.surface.pixel(x, y) != Some(Rgb8::WHITE) {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn front_facing_triangle_is_filled_inside_its_bounds() {
    let mut s = scene();
    let mut buf = PolygonBuffer::new();
    buf.triangles.push([
        DVec3::new(2.0, 2.0, 0.0),
        DVec3::new(12.0, 2.0, 0.0),
        DVec3::new(2.0, 12.0, 0.0),
    ]);
    CpuRasterizer::new().fill_polygons(&buf, &mut s, &Lighting::default(), &Material::WHITE);

    assert_ne!(s.surface.pixel(4, 4), Some(Rgb8::WHITE));
    assert_eq!(s.surface.pixel(11, 11), Some(Rgb8::WHITE));
    assert_eq!(s.surface.pixel(1, 1), Some(Rgb8::WHITE));
    assert!(painted(&s) > 40);
}

#[test]
fn back_facing_triangle_is_culled() {
    let mut s = scene();
    let mut buf = PolygonBuffer::new();
    buf.triangles.push([
        DVec3::new(2.0, 2.0, 0.0),
        DVec3::new(2.0, 12.0, 0.0),
        DVec3::new(12.0, 2.0, 0.0),
    ]);
    CpuRasterizer::new().fill_polygons(&buf, &mut s, &Lighting::default(), &Material::WHITE);
    assert_eq!(painted(&s), 0);
}

#[test]
fn nearer_box_occludes_farther_box() {
    let r = CpuRasterizer::new();
    let lighting = Lighting::default();
    let dark = Material {
        red: Reflectance::new(0.0, 0.0, 0.0),
        green: Reflectance::new(0.0, 0.0, 0.0),
        blue: Reflectance::new(0.0, 0.0, 0.0),
    };

    let mut near = PolygonBuffer::new();
    add_box(&mut near, [5.0, 15.0, 10.0], [10.0, 10.0, 5.0]);
    let mut far = PolygonBuffer::new();
    add_box(&mut far, [0.0, 19.0, 0.0], [19.0, 19.0, 5.0]);

    let mut a = scene();
    r.fill_polygons(&near, &mut a, &lighting, &dark);
    r.fill_polygons(&far, &mut a, &lighting, &Material::WHITE);

    let mut b = scene();
    r.fill_polygons(&far, &mut b, &lighting, &Material::WHITE);
    r.fill_polygons(&near, &mut b, &lighting, &dark);

    assert_eq!(a.surface, b.surface);
    assert_eq!(a.surface.pixel(10, 10), Some(Rgb8::BLACK));
    assert_ne!(a.surface.pixel(1, 1), Some(Rgb8::BLACK));
}

#[test]
fn edges_are_drawn_end_to_end() {
    let mut s = scene();
    let mut edges = EdgeBuffer::new();
    add_edge(&mut edges, [0.0, 0.0, 0.0], [19.0, 19.0, 0.0]);
    CpuRasterizer::new().draw_edges(&edges, &mut s, Rgb8::BLACK);
    for i in 0..20 {
        assert_eq!(s.surface.pixel(i, i), Some(Rgb8::BLACK));
    }
    assert_eq!(painted(&s), 20);
}

#[test]
fn shading_clamps_and_uses_ambient_only_when_facing_away_from_light() {
    let lighting = Lighting::default();
    let lit = lighting.shade(DVec3::new(0.0, 0.0, 1.0), &Material::WHITE);
    let away = lighting.shade(DVec3::new(0.0, 0.0, -1.0), &Material::WHITE);
    // 50 * 0.2 ambient only.
    assert_eq!(away, Rgb8::new(10, 10, 10));
    assert!(lit.r > away.r);
    assert_eq!(lit.r, lit.g);
}

#[test]
fn huge_lines_are_clipped_to_the_canvas() {
    let mut s = scene();
    let mut edges = EdgeBuffer::new();
    add_edge(&mut edges, [0.0, 5.0, 0.0], [1e12, 5.0, 0.0]);
    add_edge(&mut edges, [-1e12, -1e12, 0.0], [1e12, 1e12, 0.0]);
    add_edge(&mut edges, [1e9, 1e9, 0.0], [2e9, 1e9, 0.0]);

    let started = std::time::Instant::now();
    CpuRasterizer::new().draw_edges(&edges, &mut s, Rgb8::BLACK);
    assert!(started.elapsed() < std::time::Duration::from_secs(5));

    for i in 0..20 {
        assert_eq!(s.surface.pixel(i, 5), Some(Rgb8::BLACK));
        assert_eq!(s.surface.pixel(i, i), Some(Rgb8::BLACK));
    }
    assert_eq!(painted(&s), 39);
}

#[test]
fn visible_range_of_segments() {
    let (w, h) = (20.0, 20.0);
    assert_eq!(
        visible_range(DVec3::ZERO, DVec3::new(19.0, 19.0, 0.0), w, h),
        Some((0.0, 1.0))
    );
    let (t0, t1) = visible_range(DVec3::new(-10.0, 0.0, 0.0), DVec3::new(30.0, 0.0, 0.0), w, h)
        .unwrap();
    assert!((t0 - 9.5 / 40.0).abs() < 1e-12);
    assert!((t1 - 29.5 / 40.0).abs() < 1e-12);
    assert!(
        visible_range(DVec3::new(-5.0, 0.0, 0.0), DVec3::new(-1.0, 9.0, 0.0), w, h).is_none()
    );
    assert!(visible_range(DVec3::new(f64::NAN, 0.0, 0.0), DVec3::ONE, w, h).is_none());
}
