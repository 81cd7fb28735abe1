//! Barometer CLI binary.
//!
//! Runs the daily index update and inspects the history artifact.

mod cmd;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use barometer::{BarometerError, Date, PipelineConfig, config::CREDENTIAL_ENV};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{
    components::list_components, migrate::migrate_artifact, status::show_status,
    update::run_update,
};

#[derive(Parser)]
#[command(name = "barometer")]
#[command(about = "Daily composite market regime indices", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// History artifact path
    #[arg(long, global = true, default_value = barometer::config::DEFAULT_ARTIFACT_PATH)]
    artifact: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch data, compute the indices and merge the latest record
    Update {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Print the snapshot without writing the artifact
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the history artifact
    Status {
        /// Number of most recent records to print
        #[arg(short = 'n', long, default_value = "1")]
        last: usize,
    },

    /// Rewrite the artifact in the current record format
    Migrate,

    /// List input series and component definitions (descriptions with --verbose)
    Components,
}

/// Pipeline parameters for `update`.
#[derive(Args)]
struct PipelineArgs {
    /// FRED API key
    #[arg(long, env = CREDENTIAL_ENV, hide_env_values = true)]
    fred_api_key: Option<String>,

    /// Rolling Z-score window in trading days
    #[arg(long, default_value = "252")]
    z_window: usize,

    /// Rolling Min-Max window for sentiment scores
    #[arg(long, default_value = "252")]
    sentiment_window: usize,

    /// Defined samples required before a sentiment score is reported
    #[arg(long, default_value = "20")]
    sentiment_min_periods: usize,

    /// Calendar days of history to fetch
    #[arg(long, default_value = "1095")]
    lookback_days: u32,

    /// Last date to fetch (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    as_of: Option<Date>,
}

impl PipelineArgs {
    fn into_config(self, artifact: PathBuf) -> PipelineConfig {
        PipelineConfig {
            credential: self.fred_api_key,
            artifact_path: artifact,
            z_score_window: self.z_window,
            sentiment_window: self.sentiment_window,
            sentiment_min_periods: self.sentiment_min_periods,
            lookback_days: self.lookback_days,
            as_of: self.as_of,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads FRED_API_KEY (ignore errors if not found)
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BarometerError>()
        .map_or(1, BarometerError::exit_code)
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Update { pipeline, dry_run } => {
            run_update(pipeline.into_config(cli.artifact), dry_run).await?;
        }
        Commands::Status { last } => {
            show_status(&cli.artifact, last)?;
        }
        Commands::Migrate => {
            migrate_artifact(&cli.artifact)?;
        }
        Commands::Components => {
            list_components(cli.verbose);
        }
    }

    Ok(())
}
