use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vacancy_client::{FallbackFetcher, SelectorExtractor};
use vacancy_core::ExtractService;

#[derive(Parser)]
#[command(name = "vacancy", version, about = "Job posting extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a job description and company name from a posting URL
    Extract {
        /// Job posting URL (scheme optional, https assumed)
        #[arg(short, long)]
        url: String,

        /// Allow fetching private/reserved IPs (local testing)
        #[arg(long, default_value_t = false)]
        allow_private: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vacancy=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { url, allow_private } => cmd_extract(&url, allow_private).await?,
    }

    Ok(())
}

async fn cmd_extract(url: &str, allow_private: bool) -> Result<()> {
    let mut fetcher = FallbackFetcher::new().context("Failed to create HTTP client")?;
    if allow_private {
        fetcher = fetcher.allow_private_urls();
    }

    let service = ExtractService::new(fetcher, SelectorExtractor::new());
    let posting = service.extract(url).await?;

    if posting.degraded {
        tracing::warn!("Description did not pass full validation; returning best-effort text");
    }

    println!("{}", serde_json::to_string_pretty(&posting)?);

    Ok(())
}
