use crate::images::ImageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Application configuration, loaded once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used when none is requested explicitly
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Upload limits for dish photos
    #[serde(default)]
    pub image: ImageConfig,
    /// Model request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific model provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash", "gpt-4o-mini"); empty means the provider default
    #[serde(default)]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Configuration with defaults for everything but the model
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            enabled: default_enabled(),
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            image: ImageConfig::default(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CHEFCAM__ prefix
    /// 2. chefcam.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CHEFCAM__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config("chefcam")
    }

    /// Provider configuration by name, falling back to the provider's default model
    pub fn provider_config(&self, name: &str) -> ProviderConfig {
        let mut config = self
            .providers
            .get(name)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::for_model(""));
        if config.model.is_empty() {
            config.model = default_model(name).to_string();
        }
        config
    }
}

/// Default model for each known provider
pub fn default_model(provider_name: &str) -> &'static str {
    match provider_name {
        "openai" => "gpt-4o-mini",
        "anthropic" => "claude-sonnet-4-5",
        _ => "gemini-2.5-flash",
    }
}

/// Load configuration from `<file_stem>.toml` (optional) and `CHEFCAM__` environment variables
pub fn load_config(file_stem: &str) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file_stem).required(false))
        // Use double underscore for nested: CHEFCAM__PROVIDERS__GOOGLE__API_KEY
        .add_source(
            Environment::with_prefix("CHEFCAM")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
