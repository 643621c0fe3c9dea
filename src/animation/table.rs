use std::collections::BTreeMap;

use crate::{animation::knob::Knob, foundation::core::FrameIndex};

/// Resolved knob values for one frame. Immutable once built.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameValueTable {
    frame: FrameIndex,
    values: BTreeMap<String, f64>,
}

impl FrameValueTable {
    /// Evaluate every knob at `frame`; later declarations overwrite earlier ones.
    pub fn evaluate(frame: FrameIndex, knobs: &[Knob]) -> Self {
        let mut values = BTreeMap::new();
        for knob in knobs {
            if let Some(v) = knob.value_at(frame) {
                values.insert(knob.name.clone(), v);
            }
        }
        Self { frame, values }
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn get(&self, knob: &str) -> Option<f64> {
        self.values.get(knob).copied()
    }
}

/// One table per frame, indexed `0..num_frames`.
pub fn build_frame_tables(num_frames: u64, knobs: &[Knob]) -> Vec<FrameValueTable> {
    (0..num_frames)
        .map(|f| FrameValueTable::evaluate(FrameIndex(f), knobs))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/table.rs"]
mod tests;
