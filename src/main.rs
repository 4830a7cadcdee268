use clap::Parser;
use grm::di::ConsoleReporter;
use grm::{Config, FetchRequest, Fetcher, GitHubClient, GrmResult, TagStore};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grm")]
#[command(about = "Fetch the latest GitHub release asset or source tarball")]
#[command(version)]
struct Cli {
    /// Asset name to download from the release
    #[arg(short, long)]
    asset: Option<String>,

    /// Path to write the downloaded asset
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Repository to fetch, as owner/repo
    repo: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Every fetch failure exits 1, including the benign
            // already-up-to-date case
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> GrmResult<()> {
    let config = Config::load()?;
    let client = GitHubClient::new(&config)?;

    let fetcher = Fetcher::new(
        Arc::new(client),
        Arc::new(ConsoleReporter),
        TagStore::new(config.work_dir),
        FetchRequest {
            repo: cli.repo,
            asset: cli.asset,
            output: cli.output,
        },
    );

    fetcher.fetch().await
}
