//! HTML body of a feed entry.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::catalog::{Movie, Release};
use crate::release::format_size;

use super::RenderError;

/// Renders the HTML body of one movie's feed entry.
pub trait ContentTemplate: Send + Sync {
    /// Checked once before any movie is rendered; an error aborts the render.
    fn validate(&self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Render one movie. An error only blanks this movie's body.
    fn render(&self, movie: &Movie) -> Result<String, RenderError>;
}

/// The default entry body:
///
/// 1. IMDb rating line, when the movie has an IMDb id
/// 2. poster image, when the movie has a poster
/// 3. a "Download:" label
/// 4. one line per release
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContentTemplate;

impl ContentTemplate for DefaultContentTemplate {
    fn render(&self, movie: &Movie) -> Result<String, RenderError> {
        let mut out = String::new();

        if let Some(imdb_id) = movie.external_id() {
            let rating = movie
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let votes = movie
                .vote_count
                .map(|v| v.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            writeln!(
                out,
                r#"<p>IMDB: <a href="https://www.imdb.com/title/{}"><span>{} / {}</span></a></p>"#,
                escape(imdb_id),
                rating,
                votes
            )?;
        }

        if let Some(poster) = movie.poster_url() {
            let title = escape(&movie.title);
            writeln!(
                out,
                r#"<div><img alt="{} Poster" title="{}" src="{}"/></div>"#,
                title,
                title,
                escape(poster)
            )?;
        }

        writeln!(out, "<br/>")?;
        writeln!(out, "<p>Download:</p>")?;

        for release in &movie.releases {
            writeln!(
                out,
                r#"<div><a href="{}"><span>{}</span></a></div>"#,
                escape(&release.link),
                escape(&release_summary(release))
            )?;
        }

        Ok(out)
    }
}

/// `HDC BluRay 1080p HANDJOB 8.16 GB`; empty parts are left out.
pub fn release_summary(release: &Release) -> String {
    let d = &release.descriptor;
    let size = if d.size_bytes > 0 {
        format_size(d.size_bytes)
    } else {
        String::new()
    };

    [
        release.site.as_str(),
        d.source.as_str(),
        d.resolution.as_str(),
        d.group.as_str(),
        size.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Site;
    use crate::release::{ReleaseDescriptor, Resolution, Source};

    fn movie() -> Movie {
        Movie {
            title: "The Dawn Wall".to_string(),
            year: 2017,
            external_id: None,
            published: String::new(),
            updated: String::new(),
            releases: vec![Release {
                descriptor: ReleaseDescriptor {
                    title: "The Dawn Wall".to_string(),
                    year: 2017,
                    source: Source::BluRay,
                    resolution: Resolution::FullHd,
                    group: "HANDJOB".to_string(),
                    size_bytes: 8_160_000_000,
                },
                site: Site::Hdc,
                link: "https://hdchina.org/details.php?id=309608".to_string(),
                torrent_url: String::new(),
                site_id: "309608".to_string(),
            }],
            rating: None,
            vote_count: None,
            poster_url: None,
        }
    }

    #[test]
    fn test_unenriched_movie_has_only_downloads() {
        let body = DefaultContentTemplate.render(&movie()).unwrap();

        assert!(!body.contains("IMDB"));
        assert!(!body.contains("<img"));
        assert!(body.contains("<p>Download:</p>"));
        assert!(body.contains(
            r#"<a href="https://hdchina.org/details.php?id=309608"><span>HDC BluRay 1080p HANDJOB 8.16 GB</span></a>"#
        ));
    }

    #[test]
    fn test_enriched_movie_sections_in_order() {
        let mut m = movie();
        m.external_id = Some("tt7286916".to_string());
        m.rating = Some(8.1);
        m.vote_count = Some(5123);
        m.poster_url = Some("https://img.example/dawn.jpg".to_string());

        let body = DefaultContentTemplate.render(&m).unwrap();

        let imdb = body.find("https://www.imdb.com/title/tt7286916").unwrap();
        let poster = body.find(r#"src="https://img.example/dawn.jpg""#).unwrap();
        let download = body.find("Download:").unwrap();
        let release = body.find("HDC BluRay").unwrap();
        assert!(imdb < poster && poster < download && download < release);
        assert!(body.contains("<span>8.1 / 5123</span>"));
        assert!(body.contains(r#"alt="The Dawn Wall Poster""#));
    }

    #[test]
    fn test_releases_render_in_order() {
        let mut m = movie();
        let mut second = m.releases[0].clone();
        second.site = Site::Putao;
        second.link = "https://pt.sjtu.edu.cn/details.php?id=1".to_string();
        m.releases.push(second);

        let body = DefaultContentTemplate.render(&m).unwrap();
        let first = body.find("hdchina.org").unwrap();
        let second = body.find("pt.sjtu.edu.cn").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_values_are_escaped() {
        let mut m = movie();
        m.title = "Tom & Jerry".to_string();
        m.poster_url = Some("https://img.example/p.jpg?a=1&b=2".to_string());
        m.releases[0].link = "https://hdchina.org/details.php?id=1&x=\"y\"".to_string();

        let body = DefaultContentTemplate.render(&m).unwrap();
        assert!(body.contains("Tom &amp; Jerry Poster"));
        assert!(body.contains("p.jpg?a=1&amp;b=2"));
        assert!(body.contains("id=1&amp;x=&quot;y&quot;"));
    }

    #[test]
    fn test_release_summary_skips_empty_parts() {
        let mut release = movie().releases.remove(0);
        release.descriptor.group.clear();
        release.descriptor.size_bytes = 0;
        release.site = Site::Unknown;
        assert_eq!(release_summary(&release), "Unknown BluRay 1080p");
    }
}
