//! Release title parser.
//!
//! Turns scene-style release names such as
//! `The.Dawn.Wall.2017.1080p.BluRay.x264-HANDJOB[8.16 GB]` into a
//! [`ReleaseDescriptor`].

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::types::{ReleaseDescriptor, Resolution, Source};

/// Trailing bracketed size, as appended by tracker feeds.
static SIZE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\s*(\d+(?:\.\d+)?)\s*(KB|MB|GB|TB|KiB|MiB|GiB|TiB)\s*\]\s*$").unwrap()
});

/// Leading bracketed tags such as `[Putao]`.
static LEADING_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\s*\[[^\]]*\]\s*)+").unwrap());

const CODEC_TAGS: &[&str] = &[
    "x264", "x265", "h264", "h265", "hevc", "avc", "xvid", "av1", "10bit", "hdr", "hdr10", "dv",
    "dts", "atmos", "truehd", "aac", "ac3", "proper", "repack",
];

/// Parses raw feed titles into release descriptors.
pub trait TitleParser: Send + Sync {
    /// Returns `None` when no movie title can be extracted.
    fn parse(&self, raw: &str) -> Option<ReleaseDescriptor>;
}

/// Default parser for dot/space separated scene release names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneTitleParser;

impl TitleParser for SceneTitleParser {
    fn parse(&self, raw: &str) -> Option<ReleaseDescriptor> {
        parse_release_title(raw)
    }
}

/// Parse a release name into a descriptor.
///
/// The movie title ends at the last plausible year that precedes the first
/// quality tag, or at the first quality tag when there is no year.
pub fn parse_release_title(raw: &str) -> Option<ReleaseDescriptor> {
    let (name, size_bytes) = split_size(raw.trim());
    let name = LEADING_TAGS.replace(name, "");
    let (body, group) = split_group(name.trim());

    let tokens: Vec<&str> = split_tokens(body).collect();

    let first_tag = tokens
        .iter()
        .position(|t| is_release_tag(t))
        .unwrap_or(tokens.len());

    let year = (1..first_tag)
        .rev()
        .find_map(|i| parse_year(tokens[i]).map(|y| (i, y)));

    let title_end = year.map(|(i, _)| i).unwrap_or(first_tag);
    let title = tokens[..title_end].join(" ");
    if title.is_empty() {
        return None;
    }

    Some(ReleaseDescriptor {
        title,
        year: year.map(|(_, y)| y).unwrap_or(0),
        source: source_from_tokens(&tokens),
        resolution: tokens
            .iter()
            .find_map(|t| resolution_tag(t))
            .unwrap_or_default(),
        group: group.unwrap_or_default().to_string(),
        size_bytes,
    })
}

fn split_tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == '.' || c == '_' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

/// Strip the trailing `[8.16 GB]` suffix and convert it to bytes.
fn split_size(raw: &str) -> (&str, u64) {
    let Some(caps) = SIZE_SUFFIX.captures(raw) else {
        return (raw, 0);
    };

    let value: f64 = caps[1].parse().unwrap_or(0.0);
    let multiplier = match caps[2].to_ascii_lowercase().as_str() {
        "kb" => 1e3,
        "mb" => 1e6,
        "gb" => 1e9,
        "tb" => 1e12,
        "kib" => 1024.0,
        "mib" => 1024.0 * 1024.0,
        "gib" => 1024.0 * 1024.0 * 1024.0,
        _ => 1024.0 * 1024.0 * 1024.0 * 1024.0,
    };

    let start = caps.get(0).map(|m| m.start()).unwrap_or(raw.len());
    (raw[..start].trim_end(), (value * multiplier).round() as u64)
}

/// Split `Name.2017.1080p.x264-GROUP` into the name part and the group.
///
/// A trailing dash segment only counts as a group when the part before it
/// already carries release tags, so `Spider-Man` keeps its dash.
fn split_group(name: &str) -> (&str, Option<&str>) {
    if split_tokens(name).last().is_some_and(is_release_tag) {
        return (name, None);
    }

    let Some(idx) = name.rfind('-') else {
        return (name, None);
    };

    let (body, candidate) = (&name[..idx], name[idx + 1..].trim());
    let plausible = !candidate.is_empty()
        && !candidate.contains(|c: char| c == '.' || c.is_whitespace())
        && split_tokens(body)
            .any(|t| is_release_tag(t) || parse_year(t).is_some());

    if plausible {
        (body, Some(candidate))
    } else {
        (name, None)
    }
}

fn parse_year(token: &str) -> Option<u32> {
    let token = token.trim_matches(|c| c == '(' || c == ')');
    if token.len() != 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|y| (1900..=2099).contains(y))
}

fn resolution_tag(token: &str) -> Option<Resolution> {
    match token.to_ascii_lowercase().as_str() {
        "2160p" | "4k" | "uhd" => Some(Resolution::Uhd),
        "1080p" | "1080i" => Some(Resolution::FullHd),
        "720p" => Some(Resolution::Hd),
        "480p" | "576p" => Some(Resolution::Sd),
        _ => None,
    }
}

fn source_tag(token: &str) -> Option<Source> {
    match token.to_ascii_lowercase().as_str() {
        "remux" => Some(Source::Remux),
        "bluray" | "blu-ray" | "bdrip" | "brrip" => Some(Source::BluRay),
        "web-dl" | "webdl" => Some(Source::WebDl),
        "webrip" | "web-rip" => Some(Source::WebRip),
        "hdtv" => Some(Source::Hdtv),
        "dvd" | "dvdrip" => Some(Source::Dvd),
        _ => None,
    }
}

/// Remux wins over the BluRay tag that usually accompanies it.
fn source_from_tokens(tokens: &[&str]) -> Source {
    let mut found = tokens.iter().filter_map(|t| source_tag(t));
    let first = found.next().unwrap_or_default();
    if first == Source::Remux || found.any(|s| s == Source::Remux) {
        Source::Remux
    } else {
        first
    }
}

fn is_release_tag(token: &str) -> bool {
    resolution_tag(token).is_some()
        || source_tag(token).is_some()
        || CODEC_TAGS.contains(&token.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_scene_title() {
        let d = parse_release_title("The.Dawn.Wall.2017.1080p.BluRay.x264-HANDJOB[8.16 GB]")
            .unwrap();

        assert_eq!(d.title, "The Dawn Wall");
        assert_eq!(d.year, 2017);
        assert_eq!(d.resolution, Resolution::FullHd);
        assert_eq!(d.source, Source::BluRay);
        assert_eq!(d.group, "HANDJOB");
        assert_eq!(d.size_bytes, 8_160_000_000);
    }

    #[test]
    fn test_parse_group_after_audio_tag() {
        let d = parse_release_title("Aquaman.2018.720p.BluRay.x264.DTS-HDChina[7.03 GB]").unwrap();

        assert_eq!(d.title, "Aquaman");
        assert_eq!(d.year, 2018);
        assert_eq!(d.resolution, Resolution::Hd);
        assert_eq!(d.group, "HDChina");
        assert_eq!(d.size_bytes, 7_030_000_000);
    }

    #[test]
    fn test_year_inside_title() {
        let d = parse_release_title(
            "Blade.Runner.2049.2017.2160p.UHD.BluRay.REMUX.HDR.HEVC.Atmos-EPSiLON",
        )
        .unwrap();

        assert_eq!(d.title, "Blade Runner 2049");
        assert_eq!(d.year, 2017);
        assert_eq!(d.resolution, Resolution::Uhd);
        assert_eq!(d.source, Source::Remux);
        assert_eq!(d.group, "EPSiLON");
        assert_eq!(d.size_bytes, 0);
    }

    #[test]
    fn test_numeric_title_with_leading_tag() {
        let d = parse_release_title("[Putao] 2012.2009.BluRay.720p-GRP").unwrap();

        assert_eq!(d.title, "2012");
        assert_eq!(d.year, 2009);
        assert_eq!(d.group, "GRP");
    }

    #[test]
    fn test_dash_in_title_is_not_a_group() {
        let d = parse_release_title("Spider-Man 2002 1080p WEB-DL").unwrap();

        assert_eq!(d.title, "Spider-Man");
        assert_eq!(d.year, 2002);
        assert_eq!(d.source, Source::WebDl);
        assert_eq!(d.group, "");
    }

    #[test]
    fn test_title_without_year() {
        let d = parse_release_title("Free Solo Documentary 1080p HDTV [3 GiB]").unwrap();

        assert_eq!(d.title, "Free Solo Documentary");
        assert_eq!(d.year, 0);
        assert_eq!(d.source, Source::Hdtv);
        assert_eq!(d.size_bytes, 3 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_unparsable_titles() {
        assert!(parse_release_title("").is_none());
        assert!(parse_release_title("1080p.BluRay.x264").is_none());
        assert!(parse_release_title("[only tags]").is_none());
    }

    #[test]
    fn test_scene_parser_trait() {
        let parser: Box<dyn TitleParser> = Box::new(SceneTitleParser);
        let d = parser.parse("Heat.1995.1080p.BluRay").unwrap();
        assert_eq!(d.title, "Heat");
        assert_eq!(d.year, 1995);
    }
}
