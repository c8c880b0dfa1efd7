use serde::Serialize;
use thiserror::Error;

/// Reason a cleaned value was classified as Invalid.
///
/// Rules are checked in a fixed order (format, adjacency, letter run, digit
/// run) and only the first failure is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Rejection {
    #[error("value does not match the PAN layout of 5 letters, 4 digits, 1 letter")]
    Format,

    #[error("repeated character '{ch}' at position {index}")]
    AdjacentRepeat { index: usize, ch: char },

    #[error("letter block is an ascending sequence")]
    SequentialLetters,

    #[error("digit block is an ascending sequence")]
    SequentialDigits,
}

impl Rejection {
    /// Short machine-readable label, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::Format => "format",
            Rejection::AdjacentRepeat { .. } => "adjacent_repeat",
            Rejection::SequentialLetters => "sequential_letters",
            Rejection::SequentialDigits => "sequential_digits",
        }
    }
}
