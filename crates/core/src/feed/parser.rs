//! RSS document parsing.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::types::FeedItem;
use super::FeedError;

/// Parse the `<item>` entries of an RSS document.
///
/// Items without a title or a link are dropped.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedItem>, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut current_item: Option<FeedItemBuilder> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    current_item = Some(FeedItemBuilder::default());
                }
                current_element = name;
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current_item.take().and_then(FeedItemBuilder::build) {
                        items.push(item);
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = e
                        .unescape()
                        .map_err(|e| FeedError::Parse(format!("Invalid text: {}", e)))?;
                    item.push(&current_element, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    item.push(&current_element, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FeedError::Parse(format!(
                    "XML parse error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

#[derive(Default)]
struct FeedItemBuilder {
    title: String,
    link: String,
    published: String,
    updated: String,
}

impl FeedItemBuilder {
    fn push(&mut self, element: &str, text: &str) {
        let field = match element {
            "title" => &mut self.title,
            "link" => &mut self.link,
            "pubDate" => &mut self.published,
            "updated" | "atom:updated" => &mut self.updated,
            _ => return,
        };
        field.push_str(text);
    }

    fn build(self) -> Option<FeedItem> {
        let title = self.title.trim();
        let link = self.link.trim();
        if title.is_empty() || link.is_empty() {
            return None;
        }

        Some(FeedItem {
            title: title.to_string(),
            link: link.to_string(),
            published: self.published.trim().to_string(),
            updated: self.updated.trim().to_string(),
        })
    }
}
