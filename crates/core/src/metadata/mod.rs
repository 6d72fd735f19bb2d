//! External movie metadata used to enrich the catalog.
//!
//! A `MetadataSource` answers "what is this title/year?" with an IMDb id,
//! rating, vote count and poster. The merge step walks the catalog once and
//! applies whatever the source can answer.

mod merge;
mod omdb;

pub use merge::{enrich_catalog, EnrichmentSummary};
pub use omdb::{OmdbClient, OmdbConfig};

pub use crate::catalog::Enrichment;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when looking up metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// No match for the title.
    #[error("Movie not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Source of movie metadata.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up a movie by title and year (0 = unknown year).
    async fn lookup(&self, title: &str, year: u32) -> Result<Enrichment, MetadataError>;
}
