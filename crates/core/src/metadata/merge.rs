//! Enrichment pass over a built catalog.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::metrics;

use super::MetadataSource;

/// Outcome of one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentSummary {
    pub enriched: usize,
    pub failed: usize,
}

/// Look up every movie once and apply the metadata that was found.
///
/// Lookups run one after another in catalog order. A failed lookup leaves
/// that movie unenriched and does not stop the pass.
pub async fn enrich_catalog(
    catalog: &mut Catalog,
    source: &dyn MetadataSource,
) -> EnrichmentSummary {
    let mut summary = EnrichmentSummary::default();

    for index in 0..catalog.len() {
        let (title, year) = {
            let movie = &catalog.movies()[index];
            (movie.title.clone(), movie.year)
        };

        match source.lookup(&title, year).await {
            Ok(enrichment) => {
                info!(
                    title = %title,
                    year = year,
                    external_id = %enrichment.external_id,
                    "Found metadata for movie"
                );
                catalog.enrich(index, enrichment);
                metrics::ENRICHMENT_LOOKUPS
                    .with_label_values(&["success"])
                    .inc();
                summary.enriched += 1;
            }
            Err(e) => {
                warn!(title = %title, year = year, error = %e, "Metadata lookup failed");
                metrics::ENRICHMENT_LOOKUPS
                    .with_label_values(&["error"])
                    .inc();
                summary.failed += 1;
            }
        }
    }

    summary
}
