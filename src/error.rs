use thiserror::Error;

/// Errors that can occur while turning a dish photo into a recipe
#[derive(Error, Debug)]
pub enum ChefCamError {
    /// The model's answer contained no parseable JSON object
    #[error("Malformed model response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// Failed to reach the model API
    #[error("Failed to call model API: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The model API answered with an error or without any text
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The upload is not one of the accepted image formats
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The upload exceeds the configured byte limit
    #[error("Image is {size} bytes, the limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },

    /// Failed to decode or re-encode the image
    #[error("Image processing failed: {0}")]
    ImageError(#[from] image::ImageError),

    /// Failed to read the image from disk
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),
}

impl ChefCamError {
    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            ChefCamError::MalformedResponse(_) | ChefCamError::ProviderError(_) => {
                "Failed to produce a recipe from this photo. Please try again.".to_string()
            }
            ChefCamError::FetchError(_) => {
                "Could not reach the recipe service. Check your connection.".to_string()
            }
            ChefCamError::UnsupportedMediaType(_) => {
                "Please upload a JPEG, PNG, WebP or GIF image.".to_string()
            }
            ChefCamError::ImageTooLarge { limit, .. } => {
                format!("Image is too large (max {} MB).", limit / (1024 * 1024))
            }
            ChefCamError::ImageError(_) | ChefCamError::IoError(_) => {
                "Could not read this image.".to_string()
            }
            ChefCamError::ConfigError(_) | ChefCamError::BuilderError(_) => self.to_string(),
        }
    }
}
