//! Movie catalog - the deduplicated set of movies built from feed items.
//!
//! Movies are keyed by their parsed title. The first feed item for a title
//! creates the movie; every later item with the same title only appends a
//! release to it.

mod types;

pub use types::*;

use std::collections::HashMap;
use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::feed::FeedItem;
use crate::release::ReleaseDescriptor;

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Snapshot could not be serialized or written.
    #[error("Failed to write catalog snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Metadata applied to a movie after the catalog is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    /// IMDb id (e.g., "tt7286916").
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// In-memory movie catalog.
///
/// `movies` owns the records in first-seen order; `index` maps a title to its
/// position in `movies`. Movies are never removed, so positions stay valid.
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one feed item with its parsed descriptor.
    ///
    /// A known title gets a new release appended; its title, year and
    /// timestamps are left untouched. An unknown title creates a movie.
    pub fn ingest(&mut self, item: &FeedItem, descriptor: ReleaseDescriptor) {
        match self.index.get(&descriptor.title) {
            Some(&idx) => {
                let movie = &mut self.movies[idx];
                movie.releases.push(Release::from_link(descriptor, &item.link));
                debug!(
                    title = %movie.title,
                    releases = movie.releases.len(),
                    "Added release to existing movie"
                );
            }
            None => {
                let movie = Movie {
                    title: descriptor.title.clone(),
                    year: descriptor.year,
                    external_id: None,
                    published: item.published.clone(),
                    updated: item.updated.clone(),
                    releases: vec![Release::from_link(descriptor, &item.link)],
                    rating: None,
                    vote_count: None,
                    poster_url: None,
                };
                debug!(title = %movie.title, year = movie.year, "Added new movie");
                self.insert(movie);
            }
        }
    }

    fn insert(&mut self, movie: Movie) {
        self.index.insert(movie.title.clone(), self.movies.len());
        self.movies.push(movie);
    }

    /// Movies in first-seen order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Mutable view of the movies. Fields can change, the set cannot.
    pub fn movies_mut(&mut self) -> &mut [Movie] {
        &mut self.movies
    }

    /// Look up a movie by exact title.
    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.index.get(title).map(|&idx| &self.movies[idx])
    }

    /// Apply enrichment metadata to the movie at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn enrich(&mut self, index: usize, enrichment: Enrichment) {
        let movie = &mut self.movies[index];
        movie.external_id = Some(enrichment.external_id);
        movie.rating = enrichment.rating;
        movie.vote_count = enrichment.vote_count;
        movie.poster_url = enrichment.poster_url;
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Total releases across all movies.
    pub fn release_count(&self) -> usize {
        self.movies.iter().map(|m| m.releases.len()).sum()
    }

    /// Write the movies as a JSON array.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), CatalogError> {
        serde_json::to_writer(writer, &self.movies)?;
        Ok(())
    }
}
