use std::error::Error;
use std::time::Duration;

use log::{debug, info};

use crate::config::{AppConfig, ProviderConfig};
use crate::error::ChefCamError;
use crate::extractor::extract_recipe;
use crate::images::{prepare_image, ImageConfig, ImageSource};
use crate::model::Recipe;
use crate::providers::{LlmProvider, ProviderFactory, RECIPE_PROMPT};

/// Model providers selectable through the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProvider {
    Google,
    OpenAI,
    Anthropic,
}

impl ModelProvider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::Google => "google",
            ModelProvider::OpenAI => "openai",
            ModelProvider::Anthropic => "anthropic",
        }
    }
}

/// Turns dish photos into recipes with one injected model provider
pub struct RecipeAnalyzer {
    provider: Box<dyn LlmProvider>,
    image_config: ImageConfig,
}

impl RecipeAnalyzer {
    pub fn new(provider: Box<dyn LlmProvider>, image_config: ImageConfig) -> Self {
        Self {
            provider,
            image_config,
        }
    }

    /// Build an analyzer from loaded configuration.
    ///
    /// Uses `provider_name` when given, otherwise the configured default provider.
    pub fn from_config(
        config: &AppConfig,
        provider_name: Option<&str>,
    ) -> Result<Self, ChefCamError> {
        let name = provider_name.unwrap_or(&config.default_provider);
        let provider_config = config.provider_config(name);
        let provider =
            ProviderFactory::create(name, &provider_config, Duration::from_secs(config.timeout))
                .map_err(|e| ChefCamError::BuilderError(e.to_string()))?;

        Ok(Self::new(provider, config.image.clone()))
    }

    /// Creates a new builder for configuring an analyzer
    ///
    /// # Example
    /// ```
    /// use chefcam::{ModelProvider, RecipeAnalyzer};
    ///
    /// let analyzer = RecipeAnalyzer::builder()
    ///     .provider(ModelProvider::Google)
    ///     .api_key("your-api-key")
    ///     .build();
    /// assert!(analyzer.is_ok());
    /// ```
    pub fn builder() -> RecipeAnalyzerBuilder {
        RecipeAnalyzerBuilder::default()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Identify the dish in a photo and return its recipe.
    ///
    /// Makes exactly one model request; retrying is left to the caller.
    ///
    /// # Errors
    /// Returns `ChefCamError` if:
    /// - The image is unreadable, too large or of an unsupported type
    /// - The model request fails or returns no text
    /// - The model's answer contains no parseable JSON (`MalformedResponse`)
    pub async fn analyze(&self, source: &ImageSource) -> Result<Recipe, ChefCamError> {
        let image = prepare_image(source, &self.image_config).await?;

        info!(
            "Requesting recipe from {} ({} byte image)",
            self.provider.provider_name(),
            image.bytes.len()
        );
        let raw = self
            .provider
            .generate(&image, RECIPE_PROMPT)
            .await
            .map_err(provider_error)?;
        debug!("Model answered with {} characters", raw.len());

        let recipe = extract_recipe(&raw)?;
        info!("Identified dish: {}", recipe.dish_name);

        Ok(recipe)
    }
}

fn provider_error(error: Box<dyn Error + Send + Sync>) -> ChefCamError {
    match error.downcast::<reqwest::Error>() {
        Ok(fetch_error) => ChefCamError::FetchError(*fetch_error),
        Err(other) => ChefCamError::ProviderError(other.to_string()),
    }
}

/// Builder for configuring a [`RecipeAnalyzer`]
#[derive(Debug, Default)]
pub struct RecipeAnalyzerBuilder {
    config: Option<AppConfig>,
    provider: Option<ModelProvider>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    image_config: Option<ImageConfig>,
}

impl RecipeAnalyzerBuilder {
    /// Start from a loaded configuration instead of the built-in defaults
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the model provider
    pub fn provider(mut self, provider: ModelProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Send requests to a custom or proxy endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for the model request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Override the upload limits
    pub fn image_config(mut self, image_config: ImageConfig) -> Self {
        self.image_config = Some(image_config);
        self
    }

    /// Build the analyzer
    ///
    /// # Errors
    /// Returns `ChefCamError::BuilderError` if the provider cannot be created,
    /// e.g. it is disabled or no API key is available.
    pub fn build(self) -> Result<RecipeAnalyzer, ChefCamError> {
        let config = self.config.unwrap_or_default();

        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config: ProviderConfig = config.provider_config(&provider_name);
        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }

        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));
        let provider = ProviderFactory::create(&provider_name, &provider_config, timeout)
            .map_err(|e| ChefCamError::BuilderError(e.to_string()))?;

        Ok(RecipeAnalyzer::new(
            provider,
            self.image_config.unwrap_or(config.image),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::PreparedImage;
    use async_trait::async_trait;

    struct CannedProvider {
        answer: Result<String, String>,
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn generate(
            &self,
            _image: &PreparedImage,
            prompt: &str,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            assert_eq!(prompt, RECIPE_PROMPT);
            self.answer.clone().map_err(|e| e.into())
        }
    }

    fn tiny_png() -> Vec<u8> {
        let image = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 200, 10]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn analyzer(answer: Result<String, String>) -> RecipeAnalyzer {
        RecipeAnalyzer::new(Box::new(CannedProvider { answer }), ImageConfig::default())
    }

    #[test]
    fn test_model_provider_names() {
        assert_eq!(ModelProvider::Google.as_str(), "google");
        assert_eq!(ModelProvider::OpenAI.as_str(), "openai");
        assert_eq!(ModelProvider::Anthropic.as_str(), "anthropic");
    }

    #[tokio::test]
    async fn test_analyze_extracts_recipe() {
        let analyzer = analyzer(Ok(
            "Sure!\n```json\n{\"dishName\": \"Shakshuka\", \"difficulty\": \"Easy\"}\n```"
                .to_string(),
        ));

        let recipe = analyzer
            .analyze(&ImageSource::Bytes(tiny_png()))
            .await
            .unwrap();

        assert_eq!(recipe.dish_name, "Shakshuka");
        assert_eq!(recipe.difficulty, crate::model::Difficulty::Easy);
        assert_eq!(recipe.cuisine, "Fusion");
    }

    #[tokio::test]
    async fn test_analyze_malformed_response() {
        let analyzer = analyzer(Ok("I could not identify this dish.".to_string()));

        let result = analyzer.analyze(&ImageSource::Bytes(tiny_png())).await;
        assert!(matches!(result, Err(ChefCamError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_analyze_provider_failure() {
        let analyzer = analyzer(Err("quota exceeded".to_string()));

        let result = analyzer.analyze(&ImageSource::Bytes(tiny_png())).await;
        match result {
            Err(ChefCamError::ProviderError(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("Expected ProviderError, got {:?}", other.map(|r| r.dish_name)),
        }
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_image_before_calling_model() {
        let analyzer = analyzer(Err("must not be called".to_string()));

        let result = analyzer
            .analyze(&ImageSource::Bytes(b"not an image".to_vec()))
            .await;
        assert!(matches!(result, Err(ChefCamError::UnsupportedMediaType(_))));
    }

    #[test]
    fn test_builder_with_api_key() {
        let analyzer = RecipeAnalyzer::builder()
            .provider(ModelProvider::Anthropic)
            .api_key("test-key")
            .model("claude-sonnet-4-5")
            .build()
            .unwrap();
        assert_eq!(analyzer.provider_name(), "anthropic");
    }

    #[test]
    fn test_builder_rejects_disabled_provider() {
        let mut config = AppConfig::default();
        let mut provider_config = ProviderConfig::for_model("gemini-2.5-flash");
        provider_config.enabled = false;
        config.providers.insert("google".to_string(), provider_config);

        let result = RecipeAnalyzer::builder()
            .config(config)
            .api_key("test-key")
            .build();

        match result {
            Err(ChefCamError::BuilderError(message)) => {
                assert!(message.contains("not enabled"))
            }
            _ => panic!("Expected BuilderError"),
        }
    }

    #[test]
    fn test_from_config_uses_requested_provider() {
        let mut config = AppConfig::default();
        let mut provider_config = ProviderConfig::for_model("gpt-4o-mini");
        provider_config.api_key = Some("test-key".to_string());
        config.providers.insert("openai".to_string(), provider_config);

        let analyzer = RecipeAnalyzer::from_config(&config, Some("openai")).unwrap();
        assert_eq!(analyzer.provider_name(), "openai");
    }
}
