//! Catalog properties over many ingestion orders.

use std::collections::HashSet;

use moviefeed_core::{
    feed::FeedItem, Catalog, ChannelConfig, Enrichment, FeedMetadata, FeedRenderer,
    ReleaseDescriptor,
};

use chrono::{TimeZone, Utc};

fn items() -> Vec<(FeedItem, ReleaseDescriptor)> {
    let titles = [
        ("Heat", 1995),
        ("Alien", 1979),
        ("Heat", 1995),
        ("heat", 1995),
        ("Brazil", 1985),
        ("Alien", 1979),
        ("Untitled", 0),
        ("Heat", 1995),
    ];
    titles
        .iter()
        .enumerate()
        .map(|(i, (title, year))| {
            (
                FeedItem::new(*title, format!("https://hdchina.org/details.php?id={}", i)),
                ReleaseDescriptor::new(*title, *year),
            )
        })
        .collect()
}

/// Deterministic orderings: every rotation, forwards and reversed.
fn orderings() -> Vec<Vec<(FeedItem, ReleaseDescriptor)>> {
    let base = items();
    let mut all = Vec::new();
    for shift in 0..base.len() {
        let mut rotated = base.clone();
        rotated.rotate_left(shift);
        all.push(rotated.clone());
        rotated.reverse();
        all.push(rotated);
    }
    all
}

fn build(items: &[(FeedItem, ReleaseDescriptor)]) -> Catalog {
    let mut catalog = Catalog::new();
    for (item, descriptor) in items {
        catalog.ingest(item, descriptor.clone());
    }
    catalog
}

#[test]
fn test_one_movie_per_distinct_title_in_any_order() {
    for ordering in orderings() {
        let distinct: HashSet<&str> = ordering.iter().map(|(_, d)| d.title.as_str()).collect();
        let catalog = build(&ordering);

        assert_eq!(catalog.len(), distinct.len());
        assert_eq!(catalog.release_count(), ordering.len());
        for title in distinct {
            assert!(catalog.get(title).is_some());
        }
    }
}

#[test]
fn test_releases_follow_ingestion_order() {
    for ordering in orderings() {
        let catalog = build(&ordering);
        let heat = catalog.get("Heat").unwrap();

        let expected: Vec<&str> = ordering
            .iter()
            .filter(|(_, d)| d.title == "Heat")
            .map(|(item, _)| item.link.as_str())
            .collect();
        let actual: Vec<&str> = heat.releases.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(actual, expected);
        assert!(catalog.movies().iter().all(|m| !m.releases.is_empty()));
    }
}

#[test]
fn test_enriching_one_movie_leaves_others_unchanged() {
    let catalog = build(&items());
    for i in 0..catalog.len() {
        let mut enriched = build(&items());
        enriched.enrich(
            i,
            Enrichment {
                external_id: "tt0000001".to_string(),
                rating: Some(6.5),
                vote_count: Some(10),
                poster_url: Some("https://img.example/p.jpg".to_string()),
            },
        );

        for (j, (before, after)) in catalog.movies().iter().zip(enriched.movies()).enumerate() {
            if i == j {
                assert_eq!(after.external_id(), Some("tt0000001"));
                assert_eq!(before.releases, after.releases);
            } else {
                assert_eq!(before, after);
            }
        }
    }
}

#[test]
fn test_year_zero_entry_has_bare_title_and_slug() {
    let renderer = FeedRenderer::new(FeedMetadata::from_channel(
        &ChannelConfig::default(),
        Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap(),
    ));
    let catalog = build(&items());

    let entry = renderer.entry(catalog.get("Untitled").unwrap());
    assert_eq!(entry.title, "Untitled");
    assert_eq!(entry.id, "Untitled");

    let xml = renderer.render_to_string(&catalog).unwrap();
    assert!(xml.contains("<title>Untitled</title>"));
    assert!(!xml.contains("Untitled-0"));
}
