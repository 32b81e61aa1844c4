//! Console leaderboard: top comment authors for a channel, no file output.

use crate::api::YouTubeClient;
use crate::config::Config;
use crate::crawl::{crawl_channel, CancelToken, CrawlOptions};
use crate::error::Result;
use crate::report::TallyReport;

pub async fn run(
    config: &Config,
    channel: Option<&str>,
    top: usize,
    max_pages: Option<usize>,
    cancel: &CancelToken,
) -> Result<()> {
    let client = YouTubeClient::new(config.require_api_key()?)?.with_page_size(config.page_size);
    run_with_client(&client, config, channel, top, max_pages, cancel).await
}

/// Like [`run`], with a caller-supplied client (tests point it at a mock
/// server).
pub async fn run_with_client(
    client: &YouTubeClient,
    config: &Config,
    channel: Option<&str>,
    top: usize,
    max_pages: Option<usize>,
    cancel: &CancelToken,
) -> Result<()> {
    let channel_id = super::tally::resolve_channel(config, channel)?;

    println!("Analyzing comments for channel: {}...\n", channel_id);

    let crawl_options = CrawlOptions {
        max_pages: max_pages.or(config.max_pages),
    };
    let outcome = crawl_channel(client, &channel_id, &crawl_options, cancel).await?;
    let report = TallyReport::from_tally(outcome.tally);

    println!("=== Comment Statistics ===\n");
    println!("Pages fetched: {}", outcome.pages);
    println!("Top-level comments: {}", outcome.processed);
    if outcome.skipped > 0 {
        println!("Skipped malformed items: {}", outcome.skipped);
    }
    println!("Unique authors: {}", report.len());
    if outcome.truncated {
        println!("(stopped early; counts cover the pages fetched so far)");
    }

    println!("\n=== Top {} Authors ===\n", top);
    println!("{:<4} {:<30} {:>8}", "#", "Author", "Comments");
    println!("{}", "-".repeat(44));

    for (i, (author, count)) in report.top(top).iter().enumerate() {
        println!("{:<4} {:<30} {:>8}", i + 1, truncate(author, 29), count);
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    }
}
