//! Per-author tally of top-level comments.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::api::CommentThreadPage;

#[derive(Debug, Clone)]
struct AuthorEntry {
    count: u64,
    // Rank assigned on first insertion; breaks count ties in the report.
    first_seen: usize,
}

/// Running tally of top-level comments per author display name.
///
/// Keyed by `authorDisplayName`, so distinct accounts that share a display
/// name collapse into one entry.
#[derive(Debug, Default)]
pub struct AuthorTally {
    entries: HashMap<String, AuthorEntry>,
}

/// Outcome of ingesting one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStats {
    pub processed: u64,
    pub skipped: u64,
}

impl AuthorTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one comment for `author` and return the author's updated
    /// running count.
    pub fn record(&mut self, author: &str) -> u64 {
        let first_seen = self.entries.len();
        let entry = self
            .entries
            .entry(author.to_string())
            .or_insert(AuthorEntry {
                count: 0,
                first_seen,
            });
        entry.count += 1;
        entry.count
    }

    /// Tally every well-formed item in a page. Items missing the nested
    /// author field are skipped with a warning instead of aborting the run.
    pub fn ingest_page(&mut self, page: &CommentThreadPage) -> PageStats {
        let mut stats = PageStats::default();

        for item in &page.items {
            match item.author_display_name() {
                Some(author) => {
                    let count = self.record(author);
                    debug!("{}: {}", author, count);
                    stats.processed += 1;
                }
                None => {
                    warn!(
                        "Skipping comment thread {} without an author display name",
                        item.id.as_deref().unwrap_or("<no id>")
                    );
                    stats.skipped += 1;
                }
            }
        }

        stats
    }

    /// Sum of all counts; equals the number of well-formed items processed.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|e| e.count).sum()
    }

    pub fn unique_authors(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_for(&self, author: &str) -> Option<u64> {
        self.entries.get(author).map(|e| e.count)
    }

    /// Consume the tally into `(author, count)` pairs ordered by count
    /// descending; equal counts keep first-seen order.
    pub fn into_sorted(self) -> Vec<(String, u64)> {
        let mut rows: Vec<(String, AuthorEntry)> = self.entries.into_iter().collect();
        rows.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        rows.into_iter().map(|(name, e)| (name, e.count)).collect()
    }
}
