use async_trait::async_trait;

use crate::error::ProviderError;

/// A hosted text-completion service.
///
/// One call is one stateless exchange: an instruction goes in, plain text
/// comes back. No streaming and no conversation history.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn complete(&self, model: &str, instruction: &str) -> Result<String, ProviderError>;
}
