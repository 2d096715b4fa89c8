use thiserror::Error;

use crate::session::QuizState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// No examples to draw from. The corpus is seeded at startup, so this
    /// means it was built without the fallback set.
    #[error("No examples available")]
    EmptyCorpus,

    #[error("Cannot {operation} while the session is {state}")]
    InvalidState {
        state: QuizState,
        operation: &'static str,
    },
}
