pub mod error;
pub mod remote;
pub mod session;

pub use error::QuizError;
pub use remote::RemoteCorpus;
pub use session::{Feedback, QuizRound, QuizSession, QuizState, OPTION_COUNT};
