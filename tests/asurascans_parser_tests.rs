//! Fixture tests pinning the AsuraScans page layout the parsers expect.

use std::path::PathBuf;

use asura_scraper::models::PublicationStatus;
use asura_scraper::sources::asurascans::parser;
use asura_scraper::ScraperError;

/// Loads a saved page from the fixtures directory.
fn fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);
    std::fs::read_to_string(path).expect("Failed to read fixture file")
}

#[test]
fn test_search_results_page() {
    let page = parser::parse_series_page(&fixture("search_results.html"), 1);

    assert_eq!(page.current_page, 1);
    assert!(!page.has_next_page, "Next anchor is disabled");
    assert_eq!(page.results.len(), 2);

    let first = &page.results[0];
    assert_eq!(first.id, "solo-leveling-1a2b3c4d");
    assert_eq!(first.title, "Solo Leveling");
    assert_eq!(
        first.image.as_deref(),
        Some("https://gg.asuracomic.net/storage/media/1/solo-leveling.webp")
    );
    assert_eq!(first.status, Some(PublicationStatus::Completed));
    assert_eq!(first.latest_chapter.as_deref(), Some("Chapter 200"));
    assert_eq!(first.rating.as_deref(), Some("9.8"));

    assert_eq!(page.results[1].id, "solo-max-level-newbie-5e6f7a8b");
    assert_eq!(page.results[1].status, Some(PublicationStatus::Ongoing));
}

#[test]
fn test_series_catalog_page() {
    let page = parser::parse_series_page(&fixture("series_page.html"), 2);

    assert_eq!(page.current_page, 2);
    assert!(page.has_next_page);

    let statuses: Vec<_> = page.results.iter().filter_map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            PublicationStatus::Ongoing,
            PublicationStatus::Cancelled,
            PublicationStatus::Unknown,
        ]
    );
}

#[test]
fn test_latest_updates_page() {
    let page = parser::parse_latest_updates(&fixture("latest_updates.html"), 1);

    assert!(page.has_next_page);
    assert_eq!(page.results.len(), 2, "Only the first section is read");

    let solo = &page.results[0];
    assert_eq!(solo.id, "solo-leveling-1a2b3c4d");
    assert_eq!(solo.title, "Solo Leveling");
    assert_eq!(
        solo.image.as_deref(),
        Some("https://gg.asuracomic.net/storage/media/1/solo-leveling-thumb.webp")
    );
    assert_eq!(solo.latest_chapter.as_deref(), Some("201 (2 hours ago)"));

    let chapters = solo.chapters.as_ref().expect("latest cards carry chapters");
    assert_eq!(chapters.len(), 2, "Non-chapter links are skipped");
    assert_eq!(chapters[0].id, "201");
    assert_eq!(chapters[0].title, "Chapter 201 - Epilogue");
    assert_eq!(chapters[1].id, "200");
    assert_eq!(chapters[1].title, "Chapter 200");
    assert_eq!(chapters[1].release_date.as_deref(), Some("3 days ago"));

    let nano = &page.results[1];
    assert_eq!(nano.latest_chapter, None);
    assert_eq!(nano.chapters, Some(vec![]));
}

#[test]
fn test_popular_today_page() {
    let page = parser::parse_popular_today(&fixture("popular_today.html"));

    assert_eq!(page.current_page, 1);
    assert!(!page.has_next_page);

    let ids: Vec<&str> = page.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["solo-leveling-1a2b3c4d", "nano-machine-2b3c4d5e"],
        "Duplicates and inactive tabs are dropped"
    );
    assert_eq!(page.results[1].rating.as_deref(), Some("9.6"));
}

#[test]
fn test_series_detail_page() {
    let detail = parser::parse_manga_info(&fixture("series_detail.html"), "solo-leveling-1a2b3c4d");

    assert_eq!(detail.id, "solo-leveling-1a2b3c4d");
    assert_eq!(detail.title, "Solo Leveling");
    assert_eq!(
        detail.image.as_deref(),
        Some("https://gg.asuracomic.net/storage/media/1/solo-leveling-cover.webp")
    );
    assert_eq!(detail.status, PublicationStatus::Completed);
    assert_eq!(detail.rating.as_deref(), Some("9.8"));
    assert!(detail
        .description
        .as_deref()
        .is_some_and(|d| d.starts_with("10 years ago")));
    assert_eq!(detail.authors, vec!["Chugong", "h-goon"]);
    assert_eq!(detail.artist.as_deref(), Some("DUBU (REDICE STUDIO)"));
    assert_eq!(detail.updated_on.as_deref(), Some("March 1st 2025"));
    assert_eq!(detail.genres, vec!["Action", "Adventure", "Fantasy"]);

    let chapters = detail.chapters.expect("chapter list is embedded");
    assert_eq!(chapters.len(), 3);
    assert_eq!(chapters[0].id, "201");
    assert_eq!(chapters[0].title, "Epilogue");
    assert_eq!(
        chapters[0].release_date.as_deref(),
        Some("2025-03-01T10:00:00.000000Z")
    );
    assert_eq!(chapters[1].id, "200");
    assert_eq!(chapters[1].title, "Chapter 200");
    assert_eq!(chapters[2].title, "Chapter 199");
    assert_eq!(chapters[2].release_date, None);

    assert_eq!(detail.recommendations.len(), 1);
    let rec = &detail.recommendations[0];
    assert_eq!(rec.id, "nano-machine-2b3c4d5e");
    assert_eq!(rec.title, "Nano Machine");
    assert_eq!(rec.status, Some(PublicationStatus::Ongoing));
    assert_eq!(rec.latest_chapter.as_deref(), Some("Chapter 230"));
    assert_eq!(rec.rating.as_deref(), Some("9.6"));
}

#[test]
fn test_series_detail_without_chapters() {
    let detail = parser::parse_manga_info(
        &fixture("series_detail_no_chapters.html"),
        "nano-machine-2b3c4d5e",
    );

    assert_eq!(detail.title, "Nano Machine");
    assert_eq!(detail.status, PublicationStatus::Ongoing);
    assert_eq!(detail.chapters, None);
    assert_eq!(detail.rating, None);
    assert!(detail.authors.is_empty());
    assert!(detail.recommendations.is_empty());
}

#[test]
fn test_chapter_pages() {
    let pages = parser::parse_chapter_pages(&fixture("chapter_pages.html")).unwrap();

    let numbers: Vec<u32> = pages.iter().map(|p| p.page).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(
        pages[2].img,
        "https://gg.asuracomic.net/storage/media/9001/03.webp"
    );
}

#[test]
fn test_detail_page_is_not_a_chapter() {
    let result = parser::parse_chapter_pages(&fixture("series_detail.html"));
    assert!(matches!(result, Err(ScraperError::Parse { .. })));
}
