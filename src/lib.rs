//! Turn a photo of a dish into a structured recipe.
//!
//! The photo is downscaled and re-encoded, sent to a multimodal model with an
//! instruction prompt, and the model's loosely formatted answer is extracted
//! into a fully populated [`Recipe`].

pub mod analyzer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod images;
pub mod model;
pub mod providers;

pub use analyzer::{ModelProvider, RecipeAnalyzer, RecipeAnalyzerBuilder};
pub use config::{AppConfig, ProviderConfig};
pub use error::ChefCamError;
pub use extractor::extract_recipe;
pub use images::{ImageConfig, ImageSource, PreparedImage};
pub use model::{Difficulty, Ingredient, Recipe};

/// Analyze a photo on disk with the provider named in `config`.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = chefcam::AppConfig::load()?;
/// let recipe = chefcam::recipe_from_photo("dinner.jpg", &config).await?;
/// println!("{}", recipe.to_text());
/// # Ok(())
/// # }
/// ```
pub async fn recipe_from_photo(
    path: impl Into<std::path::PathBuf>,
    config: &AppConfig,
) -> Result<Recipe, ChefCamError> {
    let analyzer = RecipeAnalyzer::from_config(config, None)?;
    analyzer.analyze(&ImageSource::Path(path.into())).await
}
