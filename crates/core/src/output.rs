//! Writing run artifacts to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, CatalogError};
use crate::metrics;
use crate::render::{FeedRenderer, RenderError};

/// Errors that can occur while writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

fn create(path: &Path) -> Result<BufWriter<File>, OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    Ok(BufWriter::new(file))
}

fn flush(mut writer: BufWriter<File>, path: &Path) -> Result<(), OutputError> {
    writer.flush().map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Write the catalog as a JSON array of movies.
pub fn write_json_snapshot(path: &Path, catalog: &Catalog) -> Result<(), OutputError> {
    let mut writer = create(path)?;
    catalog.write_json(&mut writer)?;
    flush(writer, path)?;
    info!(path = %path.display(), movies = catalog.len(), "Wrote catalog snapshot");
    Ok(())
}

/// Render the catalog as RSS into `path`.
pub fn write_rss(path: &Path, renderer: &FeedRenderer, catalog: &Catalog) -> Result<(), OutputError> {
    let mut writer = create(path)?;
    renderer.render(catalog, &mut writer)?;
    flush(writer, path)?;
    info!(path = %path.display(), items = catalog.len(), "Wrote RSS feed");
    Ok(())
}

/// Dump the current metrics in the Prometheus text format.
pub fn write_metrics(path: &Path) -> Result<(), OutputError> {
    let mut writer = create(path)?;
    writer
        .write_all(metrics::gather_text().as_bytes())
        .map_err(|source| OutputError::Io {
            path: path.display().to_string(),
            source,
        })?;
    flush(writer, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Movie;
    use crate::config::ChannelConfig;
    use crate::feed::FeedItem;
    use crate::release::ReleaseDescriptor;
    use crate::render::FeedMetadata;
    use chrono::Utc;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.ingest(
            &FeedItem::new("Heat", "https://hdchina.org/details.php?id=7"),
            ReleaseDescriptor::new("Heat", 1995),
        );
        catalog
    }

    #[test]
    fn test_json_snapshot_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("movies.json");

        write_json_snapshot(&path, &catalog()).unwrap();

        let movies: Vec<Movie> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Heat");
    }

    #[test]
    fn test_rss_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        let renderer = FeedRenderer::new(FeedMetadata::from_channel(
            &ChannelConfig::default(),
            Utc::now(),
        ));

        write_rss(&path, &renderer, &catalog()).unwrap();

        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.contains("<title>Heat (1995)</title>"));
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file.
        let result = write_json_snapshot(dir.path(), &catalog());
        assert!(matches!(result, Err(OutputError::Io { .. })));
    }

    #[test]
    fn test_metrics_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviefeed.prom");
        metrics::CATALOG_MOVIES.set(1);

        write_metrics(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("moviefeed_catalog_movies"));
    }
}
