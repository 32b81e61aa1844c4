//! Full pipeline: crawl a channel's comment threads and write the JSON
//! report.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::api::YouTubeClient;
use crate::config::Config;
use crate::crawl::{crawl_channel, CancelToken, CrawlOptions};
use crate::error::{Error, Result};
use crate::report::TallyReport;

#[derive(Debug, Clone, Default)]
pub struct TallyOptions {
    /// Channel override; falls back to the configured channel id.
    pub channel_id: Option<String>,
    /// Output override; falls back to the configured output path.
    pub output: Option<PathBuf>,
    /// Page budget override; falls back to the configured limit.
    pub max_pages: Option<usize>,
}

#[derive(Debug)]
pub struct TallySummary {
    pub pages: usize,
    pub processed: u64,
    pub skipped: u64,
    pub unique_authors: usize,
    pub truncated: bool,
    pub output_path: PathBuf,
}

pub async fn run(
    config: &Config,
    options: TallyOptions,
    cancel: &CancelToken,
) -> Result<TallySummary> {
    let client = YouTubeClient::new(config.require_api_key()?)?.with_page_size(config.page_size);
    run_with_client(&client, config, options, cancel).await
}

/// Like [`run`], with a caller-supplied client (tests point it at a mock
/// server).
pub async fn run_with_client(
    client: &YouTubeClient,
    config: &Config,
    options: TallyOptions,
    cancel: &CancelToken,
) -> Result<TallySummary> {
    let channel_id = resolve_channel(config, options.channel_id.as_deref())?;
    let output_path = options.output.unwrap_or_else(|| config.output_path.clone());

    info!("Tallying top-level comments for channel {}", channel_id);
    let start = Instant::now();

    let crawl_options = CrawlOptions {
        max_pages: options.max_pages.or(config.max_pages),
    };
    let outcome = crawl_channel(client, &channel_id, &crawl_options, cancel).await?;

    let report = TallyReport::from_tally(outcome.tally);
    let unique_authors = report.len();
    report.write_to(&output_path)?;

    info!(
        "Wrote {} authors to {} in {:.1}s",
        unique_authors,
        output_path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(TallySummary {
        pages: outcome.pages,
        processed: outcome.processed,
        skipped: outcome.skipped,
        unique_authors,
        truncated: outcome.truncated,
        output_path,
    })
}

pub(crate) fn resolve_channel(config: &Config, channel_override: Option<&str>) -> Result<String> {
    let channel = channel_override.unwrap_or(&config.channel_id);
    if channel.trim().is_empty() {
        return Err(Error::ConfigError(
            "Channel not configured; pass CHANNEL or set youtube.channel_id in config.yml"
                .to_string(),
        ));
    }
    Ok(channel.to_string())
}
