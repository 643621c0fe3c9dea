//! Matrix builders for the transform stack.
//!
//! Points are treated as column vectors, so `a * b` applies `b` first. Composing a new
//! transform onto a CTM is therefore `ctm * m`.

use crate::foundation::core::{DMat4, DVec3};

/// Principal rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "x" | "X" => Some(Self::X),
            "y" | "Y" => Some(Self::Y),
            "z" | "Z" => Some(Self::Z),
            _ => None,
        }
    }
}

#[inline]
pub fn identity() -> DMat4 {
    DMat4::IDENTITY
}

#[inline]
pub fn translation(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_translation(DVec3::new(x, y, z))
}

#[inline]
pub fn scaling(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_scale(DVec3::new(x, y, z))
}

#[inline]
pub fn rotation(axis: Axis, radians: f64) -> DMat4 {
    match axis {
        Axis::X => DMat4::from_rotation_x(radians),
        Axis::Y => DMat4::from_rotation_y(radians),
        Axis::Z => DMat4::from_rotation_z(radians),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
