pub mod types;
pub mod fallback;
pub mod config;
pub mod error;

pub use types::*;
pub use fallback::fallback_examples;
pub use config::{Config, EmbedConfig, SourceKind};
pub use error::FallacyError;
