//! YouTube Comment Tally CLI - main entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use youtube_tally::commands;
use youtube_tally::config::Config;
use youtube_tally::crawl::CancelToken;

#[derive(Parser)]
#[command(name = "youtube_tally")]
#[command(about = "Tally top-level YouTube comments per author", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count comments per author and write the JSON report
    Tally {
        /// Channel id (falls back to youtube.channel_id from config)
        channel: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of pages to fetch
        #[arg(short, long)]
        max_pages: Option<usize>,
    },

    /// Print the top comment authors without writing a file
    Top {
        /// Channel id (falls back to youtube.channel_id from config)
        channel: Option<String>,

        /// Number of authors to display
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Maximum number of pages to fetch
        #[arg(short, long)]
        max_pages: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("youtube_tally=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::new();

    // Ctrl-C stops the crawl between pages; the partial tally is still
    // reported.
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Ctrl-C received, stopping after the current page");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Tally {
            channel,
            output,
            max_pages,
        } => {
            let options = commands::tally::TallyOptions {
                channel_id: channel,
                output,
                max_pages,
            };
            let summary = commands::tally::run(&config, options, &cancel).await?;

            println!("Pages fetched: {}", summary.pages);
            println!("Top-level comments: {}", summary.processed);
            if summary.skipped > 0 {
                println!("Skipped malformed items: {}", summary.skipped);
            }
            println!("Unique authors: {}", summary.unique_authors);
            if summary.truncated {
                println!("Stopped early; the report covers the pages fetched so far.");
            }
            println!("Report written to {}", summary.output_path.display());
        }
        Commands::Top {
            channel,
            top,
            max_pages,
        } => {
            commands::top::run(&config, channel.as_deref(), top, max_pages, &cancel).await?;
        }
    }

    Ok(())
}
