pub mod catalog;
pub mod config;
pub mod feed;
pub mod metadata;
pub mod metrics;
pub mod output;
pub mod release;
pub mod render;
pub mod testing;
pub mod updater;

pub use catalog::{Catalog, CatalogError, Enrichment, Movie, Release, Site};
pub use config::{
    load_config, load_config_from_str, validate_config, ChannelConfig, Config, ConfigError,
    FeedSourceConfig, OutputConfig, SanitizedConfig,
};
pub use feed::{parse_feed, FeedError, FeedItem, FeedSource, HttpFeedSource};
pub use metadata::{
    enrich_catalog, EnrichmentSummary, MetadataError, MetadataSource, OmdbClient, OmdbConfig,
};
pub use output::{write_json_snapshot, write_rss, OutputError};
pub use release::{
    parse_release_title, ReleaseDescriptor, Resolution, SceneTitleParser, Source, TitleParser,
};
pub use render::{ContentTemplate, DefaultContentTemplate, FeedEntry, FeedMetadata, FeedRenderer, RenderError};
pub use updater::{build_catalog, FeedUpdater, UpdateError, UpdateReport};
