//! Types for the movie catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::release::ReleaseDescriptor;

/// Tracker a release link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Site {
    #[serde(rename = "HDC")]
    Hdc,
    #[serde(rename = "Putao")]
    Putao,
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

/// Host fragments checked in order; the first match wins.
const SITE_HOSTS: &[(&str, Site)] = &[("hdchina.org", Site::Hdc), ("pt.sjtu.edu.cn", Site::Putao)];

impl Site {
    /// Classify a link by the tracker host it contains.
    pub fn from_link(link: &str) -> Self {
        SITE_HOSTS
            .iter()
            .find(|(host, _)| link.contains(host))
            .map(|(_, site)| *site)
            .unwrap_or(Site::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Hdc => "HDC",
            Site::Putao => "Putao",
            Site::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the tracker's torrent id: everything after the last `id=`.
pub fn site_id_from_link(link: &str) -> String {
    link.rfind("id=")
        .map(|i| link[i + 3..].trim().to_string())
        .unwrap_or_default()
}

/// One torrent of a movie, as seen on a tracker feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// What the parser extracted from the release name.
    pub descriptor: ReleaseDescriptor,
    /// Tracker the link points to.
    pub site: Site,
    /// Details page URL, verbatim from the feed.
    pub link: String,
    /// Direct .torrent URL. Nothing fills it yet.
    #[serde(default)]
    pub torrent_url: String,
    /// Tracker-side torrent id.
    #[serde(default)]
    pub site_id: String,
}

impl Release {
    /// Build a release for a feed link, deriving site and site id.
    pub fn from_link(descriptor: ReleaseDescriptor, link: &str) -> Self {
        Self {
            descriptor,
            site: Site::from_link(link),
            link: link.to_string(),
            torrent_url: String::new(),
            site_id: site_id_from_link(link),
        }
    }
}

/// A movie and every release seen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    /// 0 when unknown.
    #[serde(default)]
    pub year: u32,
    /// IMDb id, set by enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Timestamps of the feed item that first introduced this movie.
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub updated: String,
    pub releases: Vec<Release>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl Movie {
    /// Feed entry title: `Title (2017)`, or the bare title when the year is unknown.
    pub fn display_title(&self) -> String {
        if self.year > 0 {
            format!("{} ({})", self.title, self.year)
        } else {
            self.title.clone()
        }
    }

    /// Stable entry id: spaces become dashes, year appended when known.
    pub fn slug(&self) -> String {
        let slug = self.title.replace(' ', "-");
        if self.year > 0 {
            format!("{}-{}", slug, self.year)
        } else {
            slug
        }
    }

    /// Link of the first release seen, empty if there is none.
    pub fn first_link(&self) -> &str {
        self.releases.first().map(|r| r.link.as_str()).unwrap_or("")
    }

    /// External id, if enrichment set a non-empty one.
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Poster URL, if enrichment set a non-empty one.
    pub fn poster_url(&self) -> Option<&str> {
        self.poster_url.as_deref().filter(|url| !url.is_empty())
    }
}
