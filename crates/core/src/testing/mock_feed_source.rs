//! Mock feed source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::feed::{FeedError, FeedItem, FeedSource};

/// Mock implementation of the FeedSource trait.
///
/// Returns a fixed list of items, or fails every fetch once
/// [`MockFeedSource::set_failure`] has been called.
///
/// # Example
///
/// ```rust,ignore
/// use moviefeed_core::testing::{fixtures, MockFeedSource};
///
/// let source = MockFeedSource::with_items("hdc", vec![fixtures::dawn_wall_item()]);
/// let items = source.fetch().await?;
/// assert_eq!(source.fetch_count().await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockFeedSource {
    name: String,
    items: Arc<RwLock<Vec<FeedItem>>>,
    /// When set, every fetch fails with this message.
    failure: Arc<RwLock<Option<String>>>,
    fetches: Arc<RwLock<usize>>,
}

impl MockFeedSource {
    /// Create an empty source.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_items(name, Vec::new())
    }

    /// Create a source that returns `items` on every fetch.
    pub fn with_items(name: impl Into<String>, items: Vec<FeedItem>) -> Self {
        Self {
            name: name.into(),
            items: Arc::new(RwLock::new(items)),
            failure: Arc::new(RwLock::new(None)),
            fetches: Arc::new(RwLock::new(0)),
        }
    }

    /// Create a source whose fetches always fail.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut source = Self::new(name);
        source.failure = Arc::new(RwLock::new(Some(message.into())));
        source
    }

    /// Add an item to return.
    pub async fn add_item(&self, item: FeedItem) {
        self.items.write().await.push(item);
    }

    /// Make every subsequent fetch fail.
    pub async fn set_failure(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }

    /// Clear a configured failure.
    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Number of fetches made, including failed ones.
    pub async fn fetch_count(&self) -> usize {
        *self.fetches.read().await
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
        *self.fetches.write().await += 1;

        if let Some(message) = self.failure.read().await.clone() {
            return Err(FeedError::ApiError {
                status: 503,
                message,
            });
        }

        Ok(self.items.read().await.clone())
    }
}
