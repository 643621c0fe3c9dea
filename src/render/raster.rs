use crate::{
    foundation::core::{DVec3, Rgb8},
    geometry::{EdgeBuffer, PolygonBuffer},
    render::surface::SceneState,
    script::symbols::{Material, Reflectance},
};

/// Point light used for the diffuse and specular terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: DVec3,
    pub color: DVec3,
}

/// Fixed lighting context shared by every shape in a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Direction towards the viewer; faces pointing away from it are culled.
    pub view: DVec3,
    pub ambient: DVec3,
    pub light: PointLight,
    pub specular_exponent: i32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            view: DVec3::new(0.0, 0.0, 1.0),
            ambient: DVec3::new(50.0, 50.0, 50.0),
            light: PointLight {
                position: DVec3::new(0.5, 0.75, 1.0),
                color: DVec3::new(255.0, 255.0, 255.0),
            },
            specular_exponent: 4,
        }
    }
}

impl Lighting {
    /// Flat colour of a face with (unnormalized) normal `n`.
    pub fn shade(&self, n: DVec3, material: &Material) -> Rgb8 {
        let n = n.normalize_or_zero();
        let l = self.light.position.normalize_or_zero();
        let v = self.view.normalize_or_zero();

        let n_dot_l = n.dot(l);
        let diffuse = n_dot_l.max(0.0);
        // No highlight on faces turned away from the light.
        let specular = if n_dot_l > 0.0 {
            let reflect = 2.0 * n_dot_l * n - l;
            reflect.dot(v).max(0.0).powi(self.specular_exponent)
        } else {
            0.0
        };

        let channel = |k: &Reflectance, ambient: f64, light: f64| {
            ambient * k.ambient + light * k.diffuse * diffuse + light * k.specular * specular
        };
        Rgb8::from_f64_clamped(
            channel(&material.red, self.ambient.x, self.light.color.x),
            channel(&material.green, self.ambient.y, self.light.color.y),
            channel(&material.blue, self.ambient.z, self.light.color.z),
        )
    }
}

/// Draws transformed geometry into a [`SceneState`].
pub trait Rasterizer: Send + Sync {
    /// Fill every front-facing triangle with depth testing.
    fn fill_polygons(
        &self,
        polygons: &PolygonBuffer,
        scene: &mut SceneState,
        lighting: &Lighting,
        material: &Material,
    );

    /// Draw every segment in a flat colour with depth testing.
    fn draw_edges(&self, edges: &EdgeBuffer, scene: &mut SceneState, color: Rgb8) {
        let w = f64::from(scene.surface.width());
        let h = f64::from(scene.surface.height());
        for &[a, b] in &edges.segments {
            let d = b - a;
            let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0);
            if !steps.is_finite() {
                continue;
            }
            let Some((t0, t1)) = visible_range(a, b, w, h) else {
                continue;
            };
            // Only the DDA steps that can land on the canvas are walked.
            let first = (t0 * steps).floor() as i64;
            let last = (t1 * steps).ceil() as i64;
            for i in first..=last {
                let p = a + d * (i as f64 / steps);
                scene.plot(p.x.round() as i64, p.y.round() as i64, p.z, color);
            }
        }
    }
}

/// Parameter range `[t0, t1]` of `a..b` whose points round onto a `w` x `h` canvas
/// (Liang-Barsky in x/y). `None` when no part of the segment does.
fn visible_range(a: DVec3, b: DVec3, w: f64, h: f64) -> Option<(f64, f64)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let bounds = [
        (-d.x, a.x + 0.5),
        (d.x, w - 0.5 - a.x),
        (-d.y, a.y + 0.5),
        (d.y, h - 0.5 - a.y),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
