use crate::{
    foundation::core::DMat4,
    foundation::error::{KeysceneError, KeysceneResult},
    script::command::Command,
};

/// Stack of cumulative transformation matrices; never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformStack {
    entries: Vec<DMat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// A stack holding only the identity.
    pub fn new() -> Self {
        Self {
            entries: vec![DMat4::IDENTITY],
        }
    }

    /// The CTM applied to geometry drawn at the current nesting level.
    pub fn top(&self) -> &DMat4 {
        // `entries` is never empty: `pop` refuses to remove the base entry.
        &self.entries[self.entries.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self) {
        let top = *self.top();
        self.entries.push(top);
    }

    /// Remove the top entry. Returns `false`, leaving the stack untouched, when only the
    /// base entry remains.
    #[must_use]
    pub fn pop(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop();
        true
    }

    /// Replace the top with `top * m`.
    pub fn apply(&mut self, m: &DMat4) {
        let last = self.entries.len() - 1;
        self.entries[last] = self.entries[last] * *m;
    }
}

/// Replay only `push`/`pop` depth and report the first `pop` that would remove the base
/// transform, so a run can be rejected before anything is drawn or written.
pub fn check_stack_ops(commands: &[Command]) -> KeysceneResult<()> {
    let mut depth = 1usize;
    for (index, cmd) in commands.iter().enumerate() {
        match cmd {
            Command::Push => depth += 1,
            Command::Pop if depth == 1 => return Err(KeysceneError::StackUnderflow { index }),
            Command::Pop => depth -= 1,
            _ => {}
        }
    }
    Ok(())
}
