//! HTTP tracker feed source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::FeedSourceConfig;

use super::parser::parse_feed;
use super::{FeedError, FeedItem, FeedSource};

/// Fetches a tracker RSS feed over HTTP.
pub struct HttpFeedSource {
    client: Client,
    name: String,
    url: String,
}

impl HttpFeedSource {
    /// Create a new feed source from its configuration.
    pub fn new(config: FeedSourceConfig) -> Result<Self, FeedError> {
        if config.url.is_empty() {
            return Err(FeedError::NotConfigured(format!(
                "feed '{}' has no url",
                config.name
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let url = build_feed_url(&config.url, config.passkey.as_deref());

        Ok(Self {
            client,
            name: config.name,
            url,
        })
    }
}

/// Append the passkey query parameter, if any.
fn build_feed_url(url: &str, passkey: Option<&str>) -> String {
    match passkey.filter(|p| !p.is_empty()) {
        Some(passkey) => {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!(
                "{}{}passkey={}",
                url,
                separator,
                urlencoding::encode(passkey)
            )
        }
        None => url.to_string(),
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
        debug!(feed = %self.name, "Fetching tracker feed");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await?;
        let items = parse_feed(&bytes)?;

        debug!(feed = %self.name, count = items.len(), "Parsed tracker feed");
        Ok(items)
    }
}
