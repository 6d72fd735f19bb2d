use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("MOVIEFEED_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[[feeds]]
name = "putao"
url = "https://pt.sjtu.edu.cn/torrentrss.php?rows=50"

[output]
json_path = "movies.json"
rss_path = "movies.xml"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.feeds.len(), 1);
        assert_eq!(config.feeds[0].name, "putao");
    }

    #[test]
    fn test_load_config_from_str_missing_output() {
        let toml = r#"
[omdb]
api_key = "key"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[[feeds]]
name = "hdc"
url = "https://hdchina.org/torrentrss.php?rows=50"
passkey = "abc"

[output]
json_path = "/tmp/movies.json"
rss_path = "/tmp/movies.xml"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.feeds[0].passkey.as_deref(), Some("abc"));
        assert_eq!(config.output.rss_path.to_str().unwrap(), "/tmp/movies.xml");
    }

    #[test]
    fn test_env_overrides_nested_fields() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[[feeds]]
name = "hdc"
url = "https://hdchina.org/torrentrss.php?rows=50"

[omdb]
api_key = "from-file"

[output]
json_path = "movies.json"
rss_path = "movies.xml"
"#,
            )?;
            jail.set_env("MOVIEFEED_OMDB__API_KEY", "from-env");
            jail.set_env("MOVIEFEED_OMDB__TIMEOUT_SECS", "5");
            jail.set_env("MOVIEFEED_OUTPUT__RSS_PATH", "public/feed.xml");

            let config = load_config(Path::new("config.toml")).unwrap();
            let omdb = config.omdb.unwrap();
            assert_eq!(omdb.api_key, "from-env");
            assert_eq!(omdb.timeout_secs, 5);
            assert_eq!(config.output.rss_path.to_str().unwrap(), "public/feed.xml");
            assert_eq!(config.output.json_path.to_str().unwrap(), "movies.json");
            Ok(())
        });
    }
}
