//! Knob schedules and per-frame value tables.

pub(crate) mod knob;
pub(crate) mod table;
