//! Turns a [`GenerationRequest`] into a [`GenerationOutcome`].
//!
//! Every failure path ends in a `Failure` value; nothing here returns an
//! error type to the caller.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use forge_core::{compose_instruction, GenerationOutcome, GenerationRequest};

use crate::provider::TextProvider;

/// Used when the provider error carries no message of its own.
pub const UNKNOWN_FAILURE_MESSAGE: &str = "An unknown error occurred while generating content.";

/// Build the user-visible failure text for a provider message.
pub fn failure_message(detail: &str) -> String {
    format!(
        "An error occurred while generating content: {detail}. \
         This could be due to an invalid API key or network issues."
    )
}

pub struct ContentGenerator {
    provider: Arc<dyn TextProvider>,
    model: String,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Compose the instruction and make exactly one provider call.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let instruction = compose_instruction(request);
        info!(
            model = %self.model,
            content_type = %request.content_type(),
            tone = %request.tone(),
            length = request.length().short_label(),
            "Generating content"
        );

        match self.provider.complete(&self.model, &instruction).await {
            Ok(text) => GenerationOutcome::Success(text),
            Err(e) => {
                error!("Error generating content: {e}");
                match e.message() {
                    Some(detail) => GenerationOutcome::Failure(failure_message(&detail)),
                    None => GenerationOutcome::Failure(UNKNOWN_FAILURE_MESSAGE.to_string()),
                }
            }
        }
    }

    /// Like [`generate`](Self::generate), but gives up as soon as `cancel`
    /// fires. Returns `None` when cancelled; the in-flight request future is
    /// dropped.
    pub async fn generate_cancellable(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Option<GenerationOutcome> {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Generation cancelled");
                None
            }
            outcome = self.generate(request) => Some(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use forge_core::{ContentType, Length, Tone};
    use std::sync::Mutex;

    /// Records the instruction it receives and replies with a canned result.
    struct Canned {
        reply: fn() -> Result<String, ProviderError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl Canned {
        fn new(reply: fn() -> Result<String, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextProvider for Canned {
        async fn complete(&self, model: &str, instruction: &str) -> Result<String, ProviderError> {
            self.seen
                .lock()
                .unwrap()
                .push((model.to_string(), instruction.to_string()));
            (self.reply)()
        }
    }

    struct Never;

    #[async_trait]
    impl TextProvider for Never {
        async fn complete(&self, _: &str, _: &str) -> Result<String, ProviderError> {
            std::future::pending().await
        }
    }

    fn sneakers() -> GenerationRequest {
        GenerationRequest::new(
            ContentType::BlogPost,
            "eco sneakers",
            Tone::Witty,
            Length::Short,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn success_is_returned_untouched() {
        let provider = Canned::new(|| Ok("  Step into sustainability.\n".into()));
        let generator = ContentGenerator::new(provider.clone(), "gemini-2.5-flash");

        let outcome = generator.generate(&sneakers()).await;
        assert_eq!(
            outcome,
            GenerationOutcome::Success("  Step into sustainability.\n".into())
        );

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (model, instruction) = &seen[0];
        assert_eq!(model, "gemini-2.5-flash");
        for needle in ["Blog Post", "Witty", "Short (approx. 50 words)", "eco sneakers"] {
            assert!(instruction.contains(needle), "missing {needle}");
        }
    }

    #[tokio::test]
    async fn error_message_is_wrapped() {
        let provider = Canned::new(|| {
            Err(ProviderError::Api {
                status: 400,
                message: "Invalid API key".into(),
            })
        });
        let generator = ContentGenerator::new(provider, "m");

        let outcome = generator.generate(&sneakers()).await;
        let GenerationOutcome::Failure(text) = outcome else {
            panic!("expected failure");
        };
        assert!(text.contains("Invalid API key"));
        assert!(text.ends_with("This could be due to an invalid API key or network issues."));
        assert_eq!(
            text,
            "An error occurred while generating content: Invalid API key. \
             This could be due to an invalid API key or network issues."
        );
    }

    #[tokio::test]
    async fn messageless_error_is_generic() {
        let provider = Canned::new(|| Err(ProviderError::Unrecognized { status: 500 }));
        let generator = ContentGenerator::new(provider, "m");

        assert_eq!(
            generator.generate(&sneakers()).await,
            GenerationOutcome::Failure(UNKNOWN_FAILURE_MESSAGE.into())
        );
    }

    #[tokio::test]
    async fn cancellation_abandons_the_call() {
        let generator = ContentGenerator::new(Arc::new(Never), "m");
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(generator.generate_cancellable(&sneakers(), &cancel).await, None);
    }

    #[tokio::test]
    async fn uncancelled_call_completes() {
        let generator = ContentGenerator::new(Canned::new(|| Ok("done".into())), "m");
        let cancel = CancellationToken::new();

        assert_eq!(
            generator.generate_cancellable(&sneakers(), &cancel).await,
            Some(GenerationOutcome::Success("done".into()))
        );
    }
}
