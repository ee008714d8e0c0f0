pub mod client;
pub mod error;
pub mod generator;
pub mod protocol;
pub mod provider;

pub use client::GeminiClient;
pub use error::ProviderError;
pub use generator::{ContentGenerator, UNKNOWN_FAILURE_MESSAGE};
pub use provider::TextProvider;
