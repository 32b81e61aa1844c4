//! YouTube Channel Comment Tally Library
//!
//! This library provides tools to:
//! - Fetch a channel's top-level comment threads from the YouTube Data API
//! - Tally comments per author display name across paginated responses
//! - Sort authors by comment count and export the result to a JSON file

pub mod api;
pub mod commands;
pub mod config;
pub mod crawl;
pub mod error;
pub mod report;
pub mod tally;

// Re-export common types
pub use api::{CommentThread, CommentThreadPage, YouTubeClient};
pub use config::Config;
pub use crawl::{crawl_channel, CancelToken, CrawlOptions, CrawlOutcome};
pub use error::{Error, Result};
pub use report::TallyReport;
pub use tally::{AuthorTally, PageStats};
