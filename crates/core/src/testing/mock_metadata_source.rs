//! Mock metadata source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::metadata::{Enrichment, MetadataError, MetadataSource};

/// Mock implementation of the MetadataSource trait.
///
/// Answers lookups from a `(title, year)` table; unknown movies are
/// `NotFound`. Every lookup is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockMetadataSource {
    entries: Arc<RwLock<HashMap<(String, u32), Enrichment>>>,
    lookups: Arc<RwLock<Vec<(String, u32)>>>,
    /// If set, the next lookup fails with this error.
    next_error: Arc<RwLock<Option<MetadataError>>>,
}

impl MockMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the metadata returned for `title`/`year`.
    pub async fn add(&self, title: &str, year: u32, enrichment: Enrichment) {
        self.entries
            .write()
            .await
            .insert((title.to_string(), year), enrichment);
    }

    /// Recorded `(title, year)` lookups in call order.
    pub async fn recorded_lookups(&self) -> Vec<(String, u32)> {
        self.lookups.read().await.clone()
    }

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: MetadataError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl MetadataSource for MockMetadataSource {
    async fn lookup(&self, title: &str, year: u32) -> Result<Enrichment, MetadataError> {
        self.lookups.write().await.push((title.to_string(), year));

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        self.entries
            .read()
            .await
            .get(&(title.to_string(), year))
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(format!("{} ({})", title, year)))
    }
}
