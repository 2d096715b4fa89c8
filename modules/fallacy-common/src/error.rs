use thiserror::Error;

#[derive(Error, Debug)]
pub enum FallacyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown fallacy category: {0}")]
    UnknownCategory(String),
}
