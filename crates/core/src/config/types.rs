use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metadata::OmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Tracker feeds, fetched in this order.
    #[serde(default)]
    pub feeds: Vec<FeedSourceConfig>,
    /// OMDb enrichment; movies stay unenriched when absent.
    #[serde(default)]
    pub omdb: Option<OmdbConfig>,
    pub output: OutputConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
}

/// A tracker RSS feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedSourceConfig {
    /// Short name used in logs and metrics (e.g., "hdc").
    pub name: String,
    /// RSS URL without the passkey.
    pub url: String,
    /// Tracker passkey, appended as a `passkey` query parameter.
    #[serde(default)]
    pub passkey: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Output file locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// JSON snapshot of the catalog.
    pub json_path: PathBuf,
    /// Rendered RSS document.
    pub rss_path: PathBuf,
    /// Prometheus text exposition of the run metrics, skipped when unset.
    #[serde(default)]
    pub metrics_path: Option<PathBuf>,
}

/// Channel-level fields of the published RSS document
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChannelConfig {
    #[serde(default = "default_channel_title")]
    pub title: String,
    #[serde(default = "default_channel_description")]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: default_channel_title(),
            description: default_channel_description(),
            link: String::new(),
        }
    }
}

fn default_channel_title() -> String {
    "private torrent feeds".to_string()
}

fn default_channel_description() -> String {
    "pt".to_string()
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub feeds: Vec<SanitizedFeedSourceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omdb: Option<SanitizedOmdbConfig>,
    pub output: OutputConfig,
    pub channel: ChannelConfig,
}

/// Sanitized feed config (passkey hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedFeedSourceConfig {
    pub name: String,
    pub url: String,
    pub passkey_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized OMDb config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedOmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            feeds: config
                .feeds
                .iter()
                .map(|f| SanitizedFeedSourceConfig {
                    name: f.name.clone(),
                    url: f.url.clone(),
                    passkey_configured: f.passkey.as_ref().is_some_and(|p| !p.is_empty()),
                    timeout_secs: f.timeout_secs,
                })
                .collect(),
            omdb: config.omdb.as_ref().map(|o| SanitizedOmdbConfig {
                base_url: o.base_url.clone(),
                api_key_configured: !o.api_key.is_empty(),
                timeout_secs: o.timeout_secs,
            }),
            output: config.output.clone(),
            channel: config.channel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[output]
json_path = "out/movies.json"
rss_path = "out/movies.xml"
"#;

    #[test]
    fn test_deserialize_minimal_config() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert!(config.feeds.is_empty());
        assert!(config.omdb.is_none());
        assert_eq!(config.output.json_path.to_str().unwrap(), "out/movies.json");
        assert!(config.output.metrics_path.is_none());
        assert_eq!(config.channel, ChannelConfig::default());
        assert_eq!(config.channel.title, "private torrent feeds");
        assert_eq!(config.channel.description, "pt");
    }

    #[test]
    fn test_deserialize_missing_output_fails() {
        let toml = r#"
[[feeds]]
name = "putao"
url = "https://pt.sjtu.edu.cn/torrentrss.php?rows=50"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_feeds_and_omdb() {
        let toml = r#"
[[feeds]]
name = "hdc"
url = "https://hdchina.org/torrentrss.php?rows=50"
passkey = "secret"

[[feeds]]
name = "putao"
url = "https://pt.sjtu.edu.cn/torrentrss.php?rows=50"
timeout_secs = 10

[omdb]
api_key = "omdb-key"

[output]
json_path = "movies.json"
rss_path = "movies.xml"

[channel]
title = "my movies"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[0].passkey.as_deref(), Some("secret"));
        assert_eq!(config.feeds[0].timeout_secs, 30); // default
        assert_eq!(config.feeds[1].timeout_secs, 10);

        let omdb = config.omdb.as_ref().unwrap();
        assert_eq!(omdb.api_key, "omdb-key");
        assert!(omdb.base_url.is_none());

        assert_eq!(config.channel.title, "my movies");
        assert_eq!(config.channel.description, "pt");
    }

    #[test]
    fn test_sanitized_config_hides_secrets() {
        let toml = r#"
[[feeds]]
name = "hdc"
url = "https://hdchina.org/torrentrss.php"
passkey = "secret-passkey"

[omdb]
api_key = "secret-key"

[output]
json_path = "movies.json"
rss_path = "movies.xml"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let sanitized = SanitizedConfig::from(&config);

        assert!(sanitized.feeds[0].passkey_configured);
        assert!(sanitized.omdb.as_ref().unwrap().api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-passkey"));
        assert!(!json.contains("secret-key"));
    }
}
