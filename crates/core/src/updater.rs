//! One feed update run: fetch, parse, ingest, enrich, publish.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::OutputConfig;
use crate::feed::{FeedItem, FeedSource};
use crate::metadata::{enrich_catalog, EnrichmentSummary, MetadataSource};
use crate::metrics;
use crate::output::{self, OutputError};
use crate::release::{SceneTitleParser, TitleParser};
use crate::render::FeedRenderer;

/// Errors that abort an update run.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Failed to publish feed: {0}")]
    Publish(#[from] OutputError),
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub sources_ok: usize,
    pub sources_failed: usize,
    pub items_fetched: usize,
    pub items_rejected: usize,
    pub movies: usize,
    pub releases: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentSummary>,
    /// False when the JSON snapshot could not be written.
    pub snapshot_written: bool,
}

/// Parse every item title and ingest the ones the parser accepts.
///
/// Returns the catalog and the number of rejected titles.
pub fn build_catalog(items: &[FeedItem], parser: &dyn TitleParser) -> (Catalog, usize) {
    let mut catalog = Catalog::new();
    let mut rejected = 0;

    for item in items {
        match parser.parse(&item.title) {
            Some(descriptor) => catalog.ingest(item, descriptor),
            None => {
                warn!(title = %item.title, link = %item.link, "Skipping unparsable release title");
                metrics::TITLES_REJECTED.inc();
                rejected += 1;
            }
        }
    }

    (catalog, rejected)
}

/// Runs feed updates.
pub struct FeedUpdater {
    sources: Vec<Box<dyn FeedSource>>,
    parser: Box<dyn TitleParser>,
    metadata: Option<Arc<dyn MetadataSource>>,
    renderer: FeedRenderer,
    output: OutputConfig,
}

impl FeedUpdater {
    /// Create an updater using [`SceneTitleParser`] and no enrichment.
    pub fn new(
        sources: Vec<Box<dyn FeedSource>>,
        renderer: FeedRenderer,
        output: OutputConfig,
    ) -> Self {
        Self {
            sources,
            parser: Box::new(SceneTitleParser),
            metadata: None,
            renderer,
            output,
        }
    }

    pub fn with_parser(mut self, parser: impl TitleParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_metadata(mut self, metadata: Arc<dyn MetadataSource>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Fetch all sources in order. A failing source is logged and skipped.
    async fn fetch_all(&self, report: &mut UpdateReport) -> Vec<FeedItem> {
        let mut items = Vec::new();

        for source in &self.sources {
            match source.fetch().await {
                Ok(fetched) => {
                    info!(feed = %source.name(), items = fetched.len(), "Fetched feed");
                    metrics::FEED_ITEMS_FETCHED
                        .with_label_values(&[source.name()])
                        .inc_by(fetched.len() as u64);
                    report.sources_ok += 1;
                    items.extend(fetched);
                }
                Err(e) => {
                    warn!(feed = %source.name(), error = %e, "Skipping feed that failed to load");
                    metrics::FEED_FAILURES
                        .with_label_values(&[source.name()])
                        .inc();
                    report.sources_failed += 1;
                }
            }
        }

        report.items_fetched = items.len();
        items
    }

    /// Run one update and write the outputs.
    ///
    /// Only a failure to write the RSS document is an error. A failed JSON
    /// snapshot is logged and recorded in the report.
    pub async fn run(&self) -> Result<UpdateReport, UpdateError> {
        let mut report = UpdateReport::default();

        let items = self.fetch_all(&mut report).await;
        let (mut catalog, rejected) = build_catalog(&items, self.parser.as_ref());
        report.items_rejected = rejected;

        if let Some(metadata) = &self.metadata {
            report.enrichment = Some(enrich_catalog(&mut catalog, metadata.as_ref()).await);
        }

        report.movies = catalog.len();
        report.releases = catalog.release_count();
        metrics::CATALOG_MOVIES.set(report.movies as i64);
        metrics::CATALOG_RELEASES.set(report.releases as i64);

        match output::write_json_snapshot(&self.output.json_path, &catalog) {
            Ok(()) => report.snapshot_written = true,
            Err(e) => warn!(
                path = %self.output.json_path.display(),
                error = %e,
                "Failed to write catalog snapshot"
            ),
        }

        output::write_rss(&self.output.rss_path, &self.renderer, &catalog)?;

        if let Some(path) = &self.output.metrics_path {
            if let Err(e) = output::write_metrics(path) {
                warn!(path = %path.display(), error = %e, "Failed to write metrics file");
            }
        }

        info!(
            movies = report.movies,
            releases = report.releases,
            rejected = report.items_rejected,
            failed_sources = report.sources_failed,
            "Feed update complete"
        );

        Ok(report)
    }
}
