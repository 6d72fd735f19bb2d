//! RSS 2.0 rendering of the movie catalog.
//!
//! One `<item>` per movie in catalog order. The item body is HTML produced
//! by a [`ContentTemplate`] and carried in `content:encoded`.

mod content;

pub use content::{release_summary, ContentTemplate, DefaultContentTemplate};

use std::io::Write;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;
use tracing::warn;

use crate::catalog::{Catalog, Movie};
use crate::config::ChannelConfig;

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Errors that can occur while rendering the feed.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The content template cannot be used at all.
    #[error("Invalid content template: {0}")]
    Template(String),

    /// Formatting a movie body failed.
    #[error("Failed to format content: {0}")]
    Format(#[from] std::fmt::Error),

    /// Writing the XML document failed.
    #[error("Failed to write feed: {0}")]
    Write(String),
}

/// Channel-level fields of the rendered feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Rendered as the channel `pubDate`.
    pub created: DateTime<Utc>,
}

impl FeedMetadata {
    pub fn from_channel(channel: &ChannelConfig, created: DateTime<Utc>) -> Self {
        Self {
            title: channel.title.clone(),
            description: channel.description.clone(),
            link: channel.link.clone(),
            created,
        }
    }
}

/// One rendered feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    /// Unique within a feed: the movie slug.
    pub id: String,
    pub link: String,
    pub content: String,
}

/// Renders a catalog as an RSS 2.0 document.
pub struct FeedRenderer {
    metadata: FeedMetadata,
    template: Box<dyn ContentTemplate>,
}

impl FeedRenderer {
    /// Create a renderer using [`DefaultContentTemplate`].
    pub fn new(metadata: FeedMetadata) -> Self {
        Self {
            metadata,
            template: Box::new(DefaultContentTemplate),
        }
    }

    /// Replace the content template.
    pub fn with_template(mut self, template: impl ContentTemplate + 'static) -> Self {
        self.template = Box::new(template);
        self
    }

    /// Build the entry for one movie.
    ///
    /// A template failure is logged and yields an empty body; the entry
    /// itself is still produced.
    pub fn entry(&self, movie: &Movie) -> FeedEntry {
        let content = match self.template.render(movie) {
            Ok(content) => content,
            Err(e) => {
                warn!(title = %movie.title, error = %e, "Failed to render movie content");
                String::new()
            }
        };

        FeedEntry {
            title: movie.display_title(),
            id: movie.slug(),
            link: movie.first_link().to_string(),
            content,
        }
    }

    /// Entries for every movie, in catalog order.
    pub fn entries(&self, catalog: &Catalog) -> Vec<FeedEntry> {
        catalog.movies().iter().map(|m| self.entry(m)).collect()
    }

    /// Write the whole feed document to `out`.
    pub fn render<W: Write>(&self, catalog: &Catalog, out: W) -> Result<(), RenderError> {
        self.template.validate()?;

        let mut writer = Writer::new_with_indent(out, b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:content", CONTENT_NAMESPACE));
        writer.write_event(Event::Start(rss)).map_err(write_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("channel")))
            .map_err(write_error)?;

        write_text_element(&mut writer, "title", &self.metadata.title)?;
        write_text_element(&mut writer, "link", &self.metadata.link)?;
        write_text_element(&mut writer, "description", &self.metadata.description)?;
        write_text_element(&mut writer, "pubDate", &self.metadata.created.to_rfc2822())?;

        for entry in self.entries(catalog) {
            write_item(&mut writer, &entry)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("channel")))
            .map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("rss")))
            .map_err(write_error)?;

        writer.into_inner().flush().map_err(write_error)?;
        Ok(())
    }

    /// Render the feed into a string.
    pub fn render_to_string(&self, catalog: &Catalog) -> Result<String, RenderError> {
        let mut buffer = Vec::new();
        self.render(catalog, &mut buffer)?;
        String::from_utf8(buffer).map_err(write_error)
    }
}

fn write_item<W: Write>(writer: &mut Writer<W>, entry: &FeedEntry) -> Result<(), RenderError> {
    writer
        .write_event(Event::Start(BytesStart::new("item")))
        .map_err(write_error)?;

    write_text_element(writer, "title", &entry.title)?;
    write_text_element(writer, "link", &entry.link)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    writer.write_event(Event::Start(guid)).map_err(write_error)?;
    writer
        .write_event(Event::Text(BytesText::new(&entry.id)))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("guid")))
        .map_err(write_error)?;

    write_text_element(writer, "content:encoded", &entry.content)?;

    writer
        .write_event(Event::End(BytesEnd::new("item")))
        .map_err(write_error)?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), RenderError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)?;
    Ok(())
}

fn write_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::Write(e.to_string())
}
