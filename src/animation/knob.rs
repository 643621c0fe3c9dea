use crate::{
    foundation::core::FrameIndex,
    foundation::error::{KeysceneError, KeysceneResult},
    script::command::Command,
};

/// Base name used for animation frames when the script declares none.
pub const DEFAULT_BASENAME: &str = "anim_00";

/// A named scalar declared by `vary`, interpolated linearly over an inclusive frame range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Knob {
    pub name: String,
    pub start_frame: i64,
    pub end_frame: i64,
    pub start_value: f64,
    pub end_value: f64,
}

impl Knob {
    /// Whether `frame` lies in `[start_frame, end_frame]`. A reversed range covers nothing.
    pub fn covers(&self, frame: FrameIndex) -> bool {
        let f = frame.as_i64();
        self.start_frame <= f && f <= self.end_frame
    }

    /// Interpolated value at `frame`, or `None` outside the declared range.
    pub fn value_at(&self, frame: FrameIndex) -> Option<f64> {
        if !self.covers(frame) {
            return None;
        }
        let f = frame.as_i64();
        if f == self.start_frame {
            return Some(self.start_value);
        }
        if f == self.end_frame {
            return Some(self.end_value);
        }

        // Widened so declared frames anywhere in the i64 range cannot overflow.
        let start = i128::from(self.start_frame);
        let progress = (i128::from(f) - start) as f64;
        let span = (i128::from(self.end_frame) - start) as f64;
        Some(self.start_value + (self.end_value - self.start_value) * progress / span)
    }
}

/// Animation directives gathered from a command list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KnobSchedule {
    /// Base name for per-frame output files.
    pub basename: String,
    /// `true` when no `basename` was declared and [`DEFAULT_BASENAME`] was substituted.
    pub basename_defaulted: bool,
    /// Total frames; `1` means a static scene.
    pub num_frames: u64,
    /// Every `vary` declaration, in declaration order.
    pub knobs: Vec<Knob>,
}

impl KnobSchedule {
    pub fn is_animated(&self) -> bool {
        self.num_frames > 1
    }
}

/// Scan `commands` once for `frames`, `basename` and `vary`.
///
/// The last `frames` and the last `basename` win. Same-name knobs are kept as separate
/// entries; overlap is resolved per frame by declaration order.
pub fn build_schedule(commands: &[Command]) -> KeysceneResult<KnobSchedule> {
    let mut num_frames = None;
    let mut basename = None;
    let mut knobs = Vec::new();

    for cmd in commands {
        match cmd {
            Command::Frames { count } => num_frames = Some(*count),
            Command::Basename { name } => basename = Some(name.clone()),
            Command::Vary {
                knob,
                start_frame,
                end_frame,
                start_value,
                end_value,
            } => knobs.push(Knob {
                name: knob.clone(),
                start_frame: *start_frame,
                end_frame: *end_frame,
                start_value: *start_value,
                end_value: *end_value,
            }),
            _ => {}
        }
    }

    let num_frames = num_frames.unwrap_or(1);
    if num_frames == 0 {
        return Err(KeysceneError::config("'frames' must be at least 1"));
    }
    if num_frames == 1 && !knobs.is_empty() {
        return Err(KeysceneError::config(
            "'vary' command present but frames set to 1 or frames not set",
        ));
    }

    let basename_defaulted = basename.is_none();
    Ok(KnobSchedule {
        basename: basename.unwrap_or_else(|| DEFAULT_BASENAME.to_string()),
        basename_defaulted,
        num_frames,
        knobs,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/knob.rs"]
mod tests;
