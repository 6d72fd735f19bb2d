//! Testing utilities and mock implementations of the collaborator traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use moviefeed_core::testing::{fixtures, MockFeedSource, MockMetadataSource};
//!
//! let feed = MockFeedSource::with_items("hdc", vec![fixtures::dawn_wall_item()]);
//! let metadata = MockMetadataSource::new();
//! metadata.add("The Dawn Wall", 2017, fixtures::enrichment("tt7286916")).await;
//! ```

mod mock_feed_source;
mod mock_metadata_source;

pub use mock_feed_source::MockFeedSource;
pub use mock_metadata_source::MockMetadataSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::feed::FeedItem;
    use crate::metadata::Enrichment;

    /// The HDC release of "The Dawn Wall".
    pub fn dawn_wall_item() -> FeedItem {
        FeedItem::new(
            "The.Dawn.Wall.2017.1080p.BluRay.x264-HANDJOB[8.16 GB]",
            "https://hdchina.org/details.php?id=309608",
        )
        .with_published("Mon, 02 Apr 2018 10:00:00 +0800")
        .with_updated("Mon, 02 Apr 2018 10:00:00 +0800")
    }

    /// A second, later release of "The Dawn Wall" on Putao.
    pub fn dawn_wall_putao_item() -> FeedItem {
        FeedItem::new(
            "[Putao] The.Dawn.Wall.2017.720p.WEB-DL.AAC-NTb[3.2 GB]",
            "https://pt.sjtu.edu.cn/details.php?id=171234",
        )
        .with_published("Tue, 03 Apr 2018 08:00:00 +0800")
        .with_updated("Tue, 03 Apr 2018 08:00:00 +0800")
    }

    /// A feed item for `title`/`year` on HDC.
    pub fn movie_item(title: &str, year: u32, id: u32) -> FeedItem {
        FeedItem::new(
            format!("{}.{}.1080p.BluRay.x264-GRP[10 GB]", title.replace(' ', "."), year),
            format!("https://hdchina.org/details.php?id={}", id),
        )
    }

    /// Metadata with a rating, votes and a poster.
    pub fn enrichment(external_id: &str) -> Enrichment {
        Enrichment {
            external_id: external_id.to_string(),
            rating: Some(8.1),
            vote_count: Some(12_345),
            poster_url: Some(format!("https://img.example/{}.jpg", external_id)),
        }
    }
}
