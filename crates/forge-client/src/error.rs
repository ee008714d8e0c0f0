use thiserror::Error;

/// Failure of a single call to the text-generation service.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed response from the model service: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("The model returned no content{}", reason_suffix(.finish_reason))]
    EmptyResponse { finish_reason: Option<String> },

    #[error("Unrecognized error response (HTTP {status})")]
    Unrecognized { status: u16 },
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" (reason: {r})"))
        .unwrap_or_default()
}

impl ProviderError {
    /// Human-readable message for errors that carry one.
    ///
    /// `Unrecognized` returns `None`: the service answered with something
    /// that is neither a result nor a documented error.
    pub fn message(&self) -> Option<String> {
        match self {
            ProviderError::Unrecognized { .. } => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_is_passed_through() {
        let err = ProviderError::Api {
            status: 400,
            message: "Invalid API key".into(),
        };
        assert_eq!(err.message().as_deref(), Some("Invalid API key"));
    }

    #[test]
    fn empty_response_mentions_reason() {
        let err = ProviderError::EmptyResponse {
            finish_reason: Some("SAFETY".into()),
        };
        assert_eq!(
            err.message().as_deref(),
            Some("The model returned no content (reason: SAFETY)")
        );
        let err = ProviderError::EmptyResponse { finish_reason: None };
        assert_eq!(err.message().as_deref(), Some("The model returned no content"));
    }

    #[test]
    fn unrecognized_has_no_message() {
        assert_eq!(ProviderError::Unrecognized { status: 502 }.message(), None);
    }
}
