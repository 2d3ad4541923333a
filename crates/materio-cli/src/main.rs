mod config;
mod export;
mod suggest_cmd;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "materio", about = "AI-assisted material suggestions for engineering projects")]
struct Cli {
    /// API key for the generation service (overrides MATERIO_API_KEY env var)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a materio config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Fetch material suggestions for a project description
    Suggest {
        /// Free-text project description
        description: String,
        /// Request detailed explanations instead of the main key points
        #[arg(long)]
        detailed: bool,
        /// Write a CSV export (Material, Properties, Pros, Cons) to this path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Override the text-generation model
        #[arg(long)]
        model: Option<String>,
        /// Maximum number of concurrent image requests
        #[arg(long)]
        image_concurrency: Option<usize>,
    },
}

/// Execute the `materio init` command: write the config file.
fn cmd_init(cli_api_key: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let key = cli_api_key
        .map(str::to_string)
        .or_else(|| std::env::var("MATERIO_API_KEY").ok())
        .context("no API key provided; pass --api-key or set MATERIO_API_KEY")?;

    let cfg = config::ConfigFile {
        api: config::ApiSection {
            key,
            base_url: None,
        },
        pipeline: config::PipelineSection::default(),
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!();
    println!("Next: run `materio suggest \"<project description>\"`.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.api_key.as_deref(), force)?;
        }
        Commands::Suggest {
            description,
            detailed,
            csv,
            model,
            image_concurrency,
        } => {
            let args = suggest_cmd::SuggestArgs {
                description,
                detailed,
                csv,
                model,
                image_concurrency,
            };
            suggest_cmd::run_suggest(cli.api_key.as_deref(), args).await?;
        }
    }

    Ok(())
}
