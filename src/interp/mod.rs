//! Transform-stack command interpreter.

pub(crate) mod interpreter;
pub(crate) mod stack;
