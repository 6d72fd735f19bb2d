use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - At least one feed, with unique non-empty names and http(s) URLs
/// - OMDb API key is set when the section is present
/// - Output paths are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.feeds.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one [[feeds]] entry is required".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for feed in &config.feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "feeds.name cannot be empty".to_string(),
            ));
        }
        if !names.insert(feed.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate feed name '{}'",
                feed.name
            )));
        }
        if !(feed.url.starts_with("http://") || feed.url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "feed '{}' url must start with http:// or https://",
                feed.name
            )));
        }
    }

    if let Some(omdb) = &config.omdb {
        if omdb.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "omdb.api_key cannot be empty".to_string(),
            ));
        }
    }

    if config.output.json_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.json_path cannot be empty".to_string(),
        ));
    }
    if config.output.rss_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.rss_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
