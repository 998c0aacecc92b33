use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use moodwire_common::Config;
use moodwire_pipeline::sentiment::Analyzer;
use moodwire_pipeline::source::{RedditSource, SourceAdapter, TwitterSource};
use moodwire_pipeline::stages;

/// Subjects used when none are given, matching the scheduled run.
const DEFAULT_SUBJECTS: [&str; 3] = ["climate change", "renewable energy", "sustainability"];

#[derive(Parser)]
#[command(name = "moodwire", about = "Social text sentiment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceKind {
    Reddit,
    Twitter,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch raw items and write the raw batch artifact.
    Extract {
        #[arg(long = "subject")]
        subjects: Vec<String>,
        #[arg(long, default_value_t = 100)]
        limit: usize,
        #[arg(long, value_enum, default_value = "reddit")]
        source: SourceKind,
    },
    /// Score a raw artifact into its processed counterpart.
    Score { artifact: PathBuf },
    /// Load a processed artifact into the destination table.
    Load { artifact: PathBuf },
    /// Extract, score, and load in one process.
    Run {
        #[arg(long = "subject")]
        subjects: Vec<String>,
        #[arg(long, default_value_t = 100)]
        limit: usize,
        #[arg(long, value_enum, default_value = "reddit")]
        source: SourceKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("moodwire=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.log_redacted();

    match cli.command {
        Command::Extract {
            subjects,
            limit,
            source,
        } => {
            let adapter = build_adapter(&config, source);
            let path = stages::extract(&adapter, &subjects_or_default(subjects), limit, &config.data_dir).await?;
            println!("{}", path.display());
        }
        Command::Score { artifact } => {
            let analyzer = Analyzer::new();
            let path = stages::score(&artifact, &analyzer)?;
            println!("{}", path.display());
        }
        Command::Load { artifact } => {
            let pool = connect(&config).await?;
            let result =
                stages::load(&pool, &artifact, &config.destination, config.load_mode).await?;
            info!(
                rows_written = result.rows_written,
                table = result.table.qualified().as_str(),
                "Load complete"
            );
        }
        Command::Run {
            subjects,
            limit,
            source,
        } => {
            let adapter = build_adapter(&config, source);
            let raw = stages::extract(&adapter, &subjects_or_default(subjects), limit, &config.data_dir).await?;

            let analyzer = Analyzer::new();
            let scored = stages::score(&raw, &analyzer)?;

            let pool = connect(&config).await?;
            let result =
                stages::load(&pool, &scored, &config.destination, config.load_mode).await?;
            info!(
                rows_written = result.rows_written,
                table = result.table.qualified().as_str(),
                "Pipeline run complete"
            );
        }
    }

    Ok(())
}

fn subjects_or_default(subjects: Vec<String>) -> Vec<String> {
    if subjects.is_empty() {
        DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect()
    } else {
        subjects
    }
}

fn build_adapter(config: &Config, kind: SourceKind) -> SourceAdapter {
    match kind {
        SourceKind::Twitter => SourceAdapter::new(Box::new(TwitterSource::new(
            config.twitter_bearer_token.clone(),
        ))),
        SourceKind::Reddit => SourceAdapter::new(Box::new(RedditSource::new(
            config.reddit_user_agent.clone(),
        ))),
    }
}

async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url())
        .await
        .context("failed to connect to Postgres")
}
