use thiserror::Error;

/// User-visible message for a submission without a prompt.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt to generate content.";

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please enter a prompt to generate content.")]
    EmptyPrompt,

    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
