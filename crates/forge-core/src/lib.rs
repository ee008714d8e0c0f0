pub mod config;
pub mod content;
pub mod error;
pub mod instruction;

pub use config::ForgeConfig;
pub use content::{ContentType, GenerationOutcome, GenerationRequest, Length, Tone};
pub use error::{ForgeError, Result, EMPTY_PROMPT_MESSAGE};
pub use instruction::compose_instruction;
