//! Feed item type.

use serde::{Deserialize, Serialize};

/// One entry of a tracker RSS feed.
///
/// Timestamps are kept as the feed wrote them; they are copied verbatim
/// into the catalog and never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Raw release title.
    pub title: String,
    /// Details page URL.
    pub link: String,
    /// Publication timestamp (`pubDate`).
    #[serde(default)]
    pub published: String,
    /// Update timestamp, empty when the feed has none.
    #[serde(default)]
    pub updated: String,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            published: String::new(),
            updated: String::new(),
        }
    }

    /// Set the publication timestamp.
    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    /// Set the update timestamp.
    pub fn with_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = updated.into();
        self
    }
}
