use std::f64::consts::{PI, TAU};

use crate::{
    foundation::core::DVec3,
    geometry::{EdgeBuffer, PolygonBuffer},
};

/// Smallest tessellation that still encloses a volume.
pub const MIN_STEPS: u32 = 3;

/// Append `a, b, c` wound so the face normal points away from `inside`.
/// Zero-area triangles (sphere poles, collapsed boxes) are dropped.
fn push_outward(buf: &mut PolygonBuffer, a: DVec3, b: DVec3, c: DVec3, inside: DVec3) {
    let n = (b - a).cross(c - a);
    if n.length_squared() == 0.0 {
        return;
    }
    if n.dot(a - inside) < 0.0 {
        buf.triangles.push([a, c, b]);
    } else {
        buf.triangles.push([a, b, c]);
    }
}

fn push_quad(buf: &mut PolygonBuffer, q: [DVec3; 4], inside: DVec3) {
    push_outward(buf, q[0], q[1], q[2], inside);
    push_outward(buf, q[0], q[2], q[3], inside);
}

/// Box with its top-left-front corner at `origin`, spanning `+x` by `dims[0]`, `-y` by
/// `dims[1]` and `-z` by `dims[2]`.
pub fn add_box(buf: &mut PolygonBuffer, origin: [f64; 3], dims: [f64; 3]) {
    let [x0, y0, z0] = origin;
    let [w, h, d] = dims;
    let (x1, y1, z1) = (x0 + w, y0 - h, z0 - d);
    let center = DVec3::new((x0 + x1) / 2.0, (y0 + y1) / 2.0, (z0 + z1) / 2.0);

    let p = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
    let faces = [
        [p(x0, y0, z0), p(x1, y0, z0), p(x1, y1, z0), p(x0, y1, z0)], // front
        [p(x0, y0, z1), p(x0, y1, z1), p(x1, y1, z1), p(x1, y0, z1)], // back
        [p(x0, y0, z1), p(x0, y0, z0), p(x0, y1, z0), p(x0, y1, z1)], // left
        [p(x1, y0, z0), p(x1, y0, z1), p(x1, y1, z1), p(x1, y1, z0)], // right
        [p(x0, y0, z1), p(x1, y0, z1), p(x1, y0, z0), p(x0, y0, z0)], // top
        [p(x0, y1, z0), p(x1, y1, z0), p(x1, y1, z1), p(x0, y1, z1)], // bottom
    ];
    for face in faces {
        push_quad(buf, face, center);
    }
}

/// Latitude/longitude sphere with `steps` rings and `steps` segments.
pub fn add_sphere(buf: &mut PolygonBuffer, center: [f64; 3], radius: f64, steps: u32) {
    let steps = steps.max(MIN_STEPS);
    let c = DVec3::from_array(center);
    let point = |ring: u32, seg: u32| {
        // Poles are pinned so their quads collapse exactly.
        let (sin_t, cos_t) = match ring {
            0 => (0.0, 1.0),
            r if r == steps => (0.0, -1.0),
            r => (PI * f64::from(r) / f64::from(steps)).sin_cos(),
        };
        let phi = TAU * f64::from(seg % steps) / f64::from(steps);
        c + radius * DVec3::new(sin_t * phi.cos(), cos_t, sin_t * phi.sin())
    };

    for ring in 0..steps {
        for seg in 0..steps {
            let q = [
                point(ring, seg),
                point(ring + 1, seg),
                point(ring + 1, seg + 1),
                point(ring, seg + 1),
            ];
            push_quad(buf, q, c);
        }
    }
}

/// Torus around the y axis through `center`: `minor` is the tube radius, `major` the
/// distance from `center` to the tube's centre line.
pub fn add_torus(buf: &mut PolygonBuffer, center: [f64; 3], minor: f64, major: f64, steps: u32) {
    let steps = steps.max(MIN_STEPS);
    let c = DVec3::from_array(center);
    let angle = |i: f64| TAU * i / f64::from(steps);
    let point = |tube: u32, ring: u32| {
        let theta = angle(f64::from(tube % steps));
        let phi = angle(f64::from(ring % steps));
        let r = minor * theta.cos() + major;
        c + DVec3::new(phi.cos() * r, minor * theta.sin(), -phi.sin() * r)
    };

    for ring in 0..steps {
        let mid = angle(f64::from(ring) + 0.5);
        let spine = c + DVec3::new(major * mid.cos(), 0.0, -major * mid.sin());
        for tube in 0..steps {
            let q = [
                point(tube, ring),
                point(tube + 1, ring),
                point(tube + 1, ring + 1),
                point(tube, ring + 1),
            ];
            push_quad(buf, q, spine);
        }
    }
}

pub fn add_edge(buf: &mut EdgeBuffer, p0: [f64; 3], p1: [f64; 3]) {
    buf.segments
        .push([DVec3::from_array(p0), DVec3::from_array(p1)]);
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shapes.rs"]
mod tests;
