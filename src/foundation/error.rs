/// Convenience result type used across keyscene.
pub type KeysceneResult<T> = Result<T, KeysceneError>;

/// Top-level error taxonomy used by interpreter and driver APIs.
#[derive(thiserror::Error, Debug)]
pub enum KeysceneError {
    /// Animation directives that cannot describe a valid run (e.g. `vary` without `frames`).
    #[error("configuration error: {0}")]
    Config(String),

    /// `pop` issued while only the base transform remains on the stack.
    #[error("stack underflow: pop at command {index} would remove the base transform")]
    StackUnderflow {
        /// Zero-based position of the offending command in the command list.
        index: usize,
    },

    /// A named symbol (material) is not present in the symbol table.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Malformed script input.
    #[error("parse error at line {line}: {msg}")]
    Parse {
        /// One-based source line (0 when the input has no line structure, e.g. JSON).
        line: usize,
        /// Human-readable description.
        msg: String,
    },

    /// Invalid user-provided options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or output failures.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeysceneError {
    /// Build a [`KeysceneError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`KeysceneError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`KeysceneError::Parse`] value.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// Build a [`KeysceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeysceneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
