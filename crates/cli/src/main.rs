use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviefeed_core::{
    load_config, validate_config, Config, FeedMetadata, FeedRenderer, FeedSource, FeedUpdater,
    HttpFeedSource, MetadataSource, OmdbClient, SanitizedConfig,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("MOVIEFEED_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    debug!(
        "Configuration: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    let updater = build_updater(&config);
    let report = updater.run().await.context("Feed update failed")?;

    info!(
        "Published {} movies ({} releases) to {:?}",
        report.movies, report.releases, config.output.rss_path
    );
    if !report.snapshot_written {
        warn!("Catalog snapshot was not written, see earlier errors");
    }

    Ok(())
}

fn build_sources(config: &Config) -> Vec<Box<dyn FeedSource>> {
    let mut sources: Vec<Box<dyn FeedSource>> = Vec::new();
    for feed in &config.feeds {
        match HttpFeedSource::new(feed.clone()) {
            Ok(source) => {
                info!("Using feed '{}'", feed.name);
                sources.push(Box::new(source));
            }
            Err(e) => error!("Failed to create feed '{}': {}", feed.name, e),
        }
    }
    sources
}

fn build_metadata(config: &Config) -> Option<Arc<dyn MetadataSource>> {
    match &config.omdb {
        Some(omdb_config) => match OmdbClient::new(omdb_config.clone()) {
            Ok(client) => {
                info!("OMDb enrichment enabled");
                Some(Arc::new(client))
            }
            Err(e) => {
                error!("Failed to create OMDb client: {}", e);
                None
            }
        },
        None => {
            info!("No OMDb config, movies will not be enriched");
            None
        }
    }
}

fn build_updater(config: &Config) -> FeedUpdater {
    let renderer = FeedRenderer::new(FeedMetadata::from_channel(&config.channel, Utc::now()));
    let updater = FeedUpdater::new(build_sources(config), renderer, config.output.clone());

    match build_metadata(config) {
        Some(metadata) => updater.with_metadata(metadata),
        None => updater,
    }
}
