//! YouTube Data API client (commentThreads.list endpoint).

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::warn;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{Error, Result};

const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Per-request timeout; the API otherwise has none and a dead endpoint
/// would stall the run forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay before the single retry on a transport-level failure.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// YouTube Data API client.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: Client,
    api_key: String,
    base_url: String,
    page_size: u32,
}

impl YouTubeClient {
    /// Create client with provided API key.
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidArgument("API key is empty".to_string()));
        }

        let http = Client::builder()
            .user_agent(format!("youtube_tally/{}", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: YOUTUBE_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Create client with custom base url (primarily for tests).
    pub fn with_base_url<S1: Into<String>, S2: Into<String>>(
        api_key: S1,
        base_url: S2,
    ) -> Result<Self> {
        let mut client = Self::new(api_key)?;
        client.base_url = base_url.into();
        Ok(client)
    }

    /// Set the page size, clamped to the API's 1..=100 range.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, 100);
        self
    }

    /// Fetch one page of comment threads for a channel.
    ///
    /// `page_token` is the continuation token from the previous page, or
    /// `None` for the first page. A transport failure is retried once; a
    /// non-success HTTP status aborts with `Error::ApiError`.
    pub async fn list_comment_threads(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadPage> {
        if channel_id.trim().is_empty() {
            return Err(Error::InvalidArgument("channel id is empty".to_string()));
        }

        let url = format!("{}/commentThreads", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("part", "snippet,replies".to_string()),
            ("allThreadsRelatedToChannelId", channel_id.to_string()),
            ("maxResults", self.page_size.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = match self.http.get(&url).query(&query).send().await {
            Ok(response) => response,
            Err(first) => {
                warn!("commentThreads request failed, retrying once: {}", first);
                sleep(RETRY_DELAY).await;
                self.http.get(&url).query(&query).send().await.map_err(|e| {
                    Error::ConnectionError(format!(
                        "commentThreads request failed after retry: {}",
                        e
                    ))
                })?
            }
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::ConnectionError(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(Error::ApiError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                api_error_message(&text)
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::SerializationError(format!("Invalid commentThreads response: {}", e))
        })
    }
}

/// Extract the message from a YouTube error body, falling back to the raw
/// text when it is not the usual `{"error": {"message": ...}}` envelope.
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}

// === Response structures ===

/// One page of the commentThreads.list response.
#[derive(Debug, Deserialize)]
pub struct CommentThreadPage {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub id: Option<String>,
    pub snippet: Option<ThreadSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "authorDisplayName")]
    pub author_display_name: Option<String>,
}

impl CommentThread {
    /// Display name of the top-level comment's author, if the nested
    /// structure is intact.
    pub fn author_display_name(&self) -> Option<&str> {
        self.snippet
            .as_ref()?
            .top_level_comment
            .as_ref()?
            .snippet
            .as_ref()?
            .author_display_name
            .as_deref()
    }
}
