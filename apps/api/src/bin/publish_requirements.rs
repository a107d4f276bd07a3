use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use interview_api::publisher::{
    GitHubPublisher, PublishOutcome, PublishRequest, GITHUB_API_BASE, SAMPLE_REQUIREMENTS_MD,
};

/// Publish a requirements document to a GitHub repository.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long)]
    owner: String,

    #[arg(long)]
    repo: String,

    /// Destination path inside the repository
    #[arg(long, default_value = "docs/requirements.md")]
    path: String,

    #[arg(long, default_value = "main")]
    branch: String,

    #[arg(long, default_value = "Update functional requirements")]
    message: String,

    /// Markdown file to publish; the built-in sample is used when omitted
    #[arg(long)]
    file: Option<PathBuf>,

    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_BASE)]
    api_base: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let token = std::env::var("GITHUB_TOKEN")
        .context("Required environment variable 'GITHUB_TOKEN' is not set")?;

    let markdown = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => SAMPLE_REQUIREMENTS_MD.to_string(),
    };

    let publisher = GitHubPublisher::new(token, args.api_base)?;
    let outcome = publisher
        .publish(&PublishRequest {
            owner: args.owner,
            repo: args.repo,
            path: args.path,
            branch: args.branch,
            message: args.message,
            markdown,
        })
        .await?;

    match outcome {
        PublishOutcome::Created => println!("Documentation created successfully!"),
        PublishOutcome::Updated => println!("Documentation updated successfully!"),
    }
    Ok(())
}
