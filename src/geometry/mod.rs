//! Transient geometry buffers and the shape generators that fill them.
//!
//! Generators append object-space data; the interpreter transforms a buffer by the current
//! CTM right before it is rasterized.

pub(crate) mod shapes;

use crate::foundation::core::{DMat4, DVec3};

/// Triangles, wound counter-clockwise when seen from outside the surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonBuffer {
    pub triangles: Vec<[DVec3; 3]>,
}

impl PolygonBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Apply `m` to every vertex in place.
    pub fn transform(&mut self, m: &DMat4) {
        for tri in &mut self.triangles {
            for p in tri.iter_mut() {
                *p = m.transform_point3(*p);
            }
        }
    }
}

/// Line segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeBuffer {
    pub segments: Vec<[DVec3; 2]>,
}

impl EdgeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn transform(&mut self, m: &DMat4) {
        for seg in &mut self.segments {
            for p in seg.iter_mut() {
                *p = m.transform_point3(*p);
            }
        }
    }
}
