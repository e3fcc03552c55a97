use std::path::PathBuf;
use std::process::ExitCode;

use chefcam::{AppConfig, ImageSource, RecipeAnalyzer};
use clap::{Parser, ValueEnum};
use log::error;

/// Identify a dish from a photo and print its recipe
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the dish photo (JPEG, PNG, WebP or GIF)
    image: PathBuf,
    /// Model provider to use instead of the configured default
    #[arg(short, long)]
    provider: Option<Provider>,
    /// Model name to use instead of the configured one
    #[arg(short, long)]
    model: Option<String>,
    /// Print the recipe as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Provider {
    Google,
    Openai,
    Anthropic,
}

impl From<Provider> for chefcam::ModelProvider {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Google => chefcam::ModelProvider::Google,
            Provider::Openai => chefcam::ModelProvider::OpenAI,
            Provider::Anthropic => chefcam::ModelProvider::Anthropic,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), chefcam::ChefCamError> {
    let config = AppConfig::load()?;

    let mut builder = RecipeAnalyzer::builder().config(config);
    if let Some(provider) = args.provider {
        builder = builder.provider(provider.into());
    }
    if let Some(model) = args.model {
        builder = builder.model(model);
    }
    let analyzer = builder.build()?;

    let recipe = analyzer.analyze(&ImageSource::Path(args.image)).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&recipe).map_err(std::io::Error::from)?;
        println!("{}", json);
    } else {
        print!("{}", recipe.to_text());
    }

    Ok(())
}
