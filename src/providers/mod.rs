mod anthropic;
mod factory;
mod google;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::RECIPE_PROMPT;

use crate::images::PreparedImage;
use async_trait::async_trait;
use std::error::Error;

/// Unified trait for all multimodal model providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send one image plus the instruction prompt and return the model's raw text answer
    async fn generate(
        &self,
        image: &PreparedImage,
        prompt: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}
