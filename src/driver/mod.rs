//! Run orchestration: static passes, per-frame animated passes and frame persistence.

pub(crate) mod pipeline;
