//! Pagination driver for a channel's comment threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::api::YouTubeClient;
use crate::error::Result;
use crate::tally::AuthorTally;

/// Cooperative cancellation flag, checked between pages only.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Stop after this many pages even if a continuation token remains.
    pub max_pages: Option<usize>,
}

/// Result of walking a channel's comment threads.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub tally: AuthorTally,
    pub pages: usize,
    pub processed: u64,
    pub skipped: u64,
    /// True when the crawl stopped on the page budget or cancellation
    /// rather than the end of the listing.
    pub truncated: bool,
}

/// Fetch pages of comment threads and feed each one to the tally until no
/// continuation token remains, the page budget runs out, or cancellation
/// is requested.
///
/// Errors from the client (API or connection) propagate and abort the
/// crawl; budget and cancellation are normal returns so the partial tally
/// can still be reported.
pub async fn crawl_channel(
    client: &YouTubeClient,
    channel_id: &str,
    options: &CrawlOptions,
    cancel: &CancelToken,
) -> Result<CrawlOutcome> {
    let mut tally = AuthorTally::new();
    let mut pages = 0usize;
    let mut processed = 0u64;
    let mut skipped = 0u64;
    let mut truncated = false;
    let mut page_token: Option<String> = None;

    loop {
        if cancel.is_cancelled() {
            info!("Cancellation requested, stopping after {} pages", pages);
            truncated = true;
            break;
        }
        if options.max_pages.is_some_and(|max| pages >= max) {
            info!("Page budget of {} reached", pages);
            truncated = true;
            break;
        }

        let page = client
            .list_comment_threads(channel_id, page_token.as_deref())
            .await?;
        pages += 1;

        let stats = tally.ingest_page(&page);
        processed += stats.processed;
        skipped += stats.skipped;
        info!(
            "Page {}: {} comments ({} skipped), {} total",
            pages, stats.processed, stats.skipped, processed
        );

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(CrawlOutcome {
        tally,
        pages,
        processed,
        skipped,
        truncated,
    })
}
