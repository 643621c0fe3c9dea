use std::path::PathBuf;

use crate::foundation::math::Axis;

/// One scene-script operation.
///
/// Commands are produced once by a reader and then only read, once per frame. Serialized as
/// an object tagged by `"op"`, e.g. `{"op": "move", "offset": [1, 0, 0], "knob": "k"}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    /// Axis-aligned box. `origin` is the top-left-front corner; `dims` extend along
    /// `+x`, `-y`, `-z`.
    Box {
        origin: [f64; 3],
        dims: [f64; 3],
        #[serde(default)]
        constants: Option<String>,
    },
    Sphere {
        center: [f64; 3],
        radius: f64,
        #[serde(default)]
        constants: Option<String>,
    },
    /// Torus around the y axis: `minor_radius` is the tube, `major_radius` the ring.
    Torus {
        center: [f64; 3],
        minor_radius: f64,
        major_radius: f64,
        #[serde(default)]
        constants: Option<String>,
    },
    Line {
        p0: [f64; 3],
        p1: [f64; 3],
    },
    Move {
        offset: [f64; 3],
        #[serde(default)]
        knob: Option<String>,
    },
    Scale {
        factors: [f64; 3],
        #[serde(default)]
        knob: Option<String>,
    },
    Rotate {
        axis: Axis,
        degrees: f64,
        #[serde(default)]
        knob: Option<String>,
    },
    Push,
    Pop,
    Frames {
        count: u64,
    },
    Basename {
        name: String,
    },
    /// Declares a knob interpolated from `start_value` at `start_frame` to `end_value` at
    /// `end_frame` (both inclusive).
    Vary {
        knob: String,
        start_frame: i64,
        end_frame: i64,
        start_value: f64,
        end_value: f64,
    },
    Display,
    Save {
        path: PathBuf,
    },
}

impl Command {
    /// Script keyword for this operation.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Torus { .. } => "torus",
            Self::Line { .. } => "line",
            Self::Move { .. } => "move",
            Self::Scale { .. } => "scale",
            Self::Rotate { .. } => "rotate",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Frames { .. } => "frames",
            Self::Basename { .. } => "basename",
            Self::Vary { .. } => "vary",
            Self::Display => "display",
            Self::Save { .. } => "save",
        }
    }

    /// Knob referenced by a transform command, if any.
    pub fn knob(&self) -> Option<&str> {
        match self {
            Self::Move { knob, .. } | Self::Scale { knob, .. } | Self::Rotate { knob, .. } => {
                knob.as_deref()
            }
            _ => None,
        }
    }
}
