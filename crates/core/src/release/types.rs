//! Types describing a single torrent release.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Release source medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    BluRay,
    Remux,
    WebDl,
    WebRip,
    Hdtv,
    Dvd,
    #[default]
    Unknown,
}

impl Source {
    /// Conventional release tag for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::BluRay => "BluRay",
            Source::Remux => "Remux",
            Source::WebDl => "WEB-DL",
            Source::WebRip => "WEBRip",
            Source::Hdtv => "HDTV",
            Source::Dvd => "DVD",
            Source::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Video resolution class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// 480p/576p.
    Sd,
    /// 720p.
    Hd,
    /// 1080p.
    FullHd,
    /// 2160p.
    Uhd,
    #[default]
    Unknown,
}

impl Resolution {
    /// Conventional release tag for this resolution.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Sd => "SD",
            Resolution::Hd => "720p",
            Resolution::FullHd => "1080p",
            Resolution::Uhd => "2160p",
            Resolution::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured metadata extracted from a release title.
///
/// `title` and `year` describe what the release claims to be; a movie
/// record keeps its own copy because the first release defines it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    /// Movie title as parsed from the release name.
    pub title: String,
    /// Release year, 0 when unknown.
    #[serde(default)]
    pub year: u32,
    /// Source medium.
    #[serde(default)]
    pub source: Source,
    /// Video resolution.
    #[serde(default)]
    pub resolution: Resolution,
    /// Release group, empty when the name carries none.
    #[serde(default)]
    pub group: String,
    /// Total size in bytes, 0 when unknown.
    #[serde(default)]
    pub size_bytes: u64,
}

impl ReleaseDescriptor {
    /// Descriptor with only a title and year set.
    pub fn new(title: impl Into<String>, year: u32) -> Self {
        Self {
            title: title.into(),
            year,
            source: Source::Unknown,
            resolution: Resolution::Unknown,
            group: String::new(),
            size_bytes: 0,
        }
    }
}

/// Format a byte count with decimal units ("8.16 GB").
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
