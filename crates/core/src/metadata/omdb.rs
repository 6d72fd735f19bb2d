//! OMDb (Open Movie Database) API client.
//!
//! OMDb requires an API key. Lookups are by exact title, optionally
//! narrowed by year.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Enrichment, MetadataError, MetadataSource};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required).
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_empty() {
            return Err(MetadataError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl MetadataSource for OmdbClient {
    async fn lookup(&self, title: &str, year: u32) -> Result<Enrichment, MetadataError> {
        debug!("OMDb lookup: title='{}', year={}", title, year);

        let mut request = self.client.get(&self.base_url).query(&[
            ("apikey", self.api_key.as_str()),
            ("t", title),
            ("type", "movie"),
        ]);

        if year > 0 {
            request = request.query(&[("y", &year.to_string())]);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == 401 {
            return Err(MetadataError::NotConfigured(
                "Invalid OMDb API key".to_string(),
            ));
        }
        if status == 429 {
            return Err(MetadataError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let result: OmdbTitleResponse = response.json().await.map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse title response: {}", e))
        })?;

        result.into_enrichment(title)
    }
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct OmdbTitleResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl OmdbTitleResponse {
    fn into_enrichment(self, title: &str) -> Result<Enrichment, MetadataError> {
        if self.response != "True" {
            return Err(MetadataError::NotFound(format!(
                "{} ({})",
                title,
                self.error.unwrap_or_else(|| "no error message".to_string())
            )));
        }

        let external_id = present(self.imdb_id).ok_or_else(|| {
            MetadataError::ParseError(format!("Response for '{}' has no imdbID", title))
        })?;

        Ok(Enrichment {
            external_id,
            rating: present(self.imdb_rating).and_then(|r| r.parse().ok()),
            vote_count: present(self.imdb_votes).and_then(|v| v.replace(',', "").parse().ok()),
            poster_url: present(self.poster),
        })
    }
}

/// OMDb uses "N/A" for missing values.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "N/A")
}
