//! Tracker feed sources.
//!
//! A `FeedSource` yields the raw items of one tracker RSS feed. Fetching and
//! XML parsing stay here so the catalog only ever sees `FeedItem` values.

mod http;
mod parser;
mod types;

pub use http::HttpFeedSource;
pub use parser::parse_feed;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Tracker answered with a non-success status.
    #[error("Feed returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Document is not valid RSS.
    #[error("Failed to parse feed: {0}")]
    Parse(String),

    /// Source is not usable with the given configuration.
    #[error("Feed not configured: {0}")]
    NotConfigured(String),
}

/// A source of tracker feed items.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &str;

    /// Fetch the current items of this feed.
    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError>;
}
