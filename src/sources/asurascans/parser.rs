//! Page payload to record conversion. Every function here is pure: the same
//! payload always produces the same records, and missing markup only ever
//! produces absent fields or shorter lists.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use super::embedded::{extract_array, ChapterEntry, EmbeddedArray, EmbeddedJsonError, PageEntry};
use super::schema::*;
use crate::error::ScraperError;
use crate::helpers::{
    chapter_title_or_default, determine_status, non_empty, split_chapter_label,
    strip_series_prefix,
};
use crate::models::{
    ChapterPage, ChapterSummary, PageResult, PublicationStatus, SearchResult, TitleDetail,
};

/// Concatenated, trimmed text of every match under `el`
fn text_of(el: ElementRef, selector: &Selector) -> String {
    el.select(selector)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn text_in(scope: Option<ElementRef>, selector: &Selector) -> String {
    scope.map(|s| text_of(s, selector)).unwrap_or_default()
}

fn attr_of(el: ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    el.select(selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .and_then(non_empty)
}

fn own_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Search results and the series catalog share the same grid markup
pub fn parse_series_page(html: &str, page: u32) -> PageResult<SearchResult> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let results = root
        .select(&SERIES_CARD)
        .filter_map(parse_series_card)
        .collect::<Vec<_>>();

    log::debug!("AsuraScans: Found {} series cards", results.len());

    PageResult {
        current_page: page,
        has_next_page: series_has_next_page(root),
        results,
    }
}

fn parse_series_card(card: ElementRef) -> Option<SearchResult> {
    let id = strip_series_prefix(card.value().attr("href")?);
    if id.is_empty() {
        return None;
    }

    Some(SearchResult {
        id: id.to_string(),
        title: text_of(card, &SERIES_CARD_TITLE),
        image: attr_of(card, &SERIES_CARD_IMAGE, "src"),
        status: Some(determine_status(&text_of(card, &SERIES_CARD_STATUS))),
        latest_chapter: non_empty(&text_of(card, &SERIES_CARD_LATEST)),
        rating: non_empty(&text_of(card, &SERIES_CARD_RATING)),
        chapters: None,
    })
}

fn series_has_next_page(root: ElementRef) -> bool {
    let anchors = root.select(&SERIES_PAGINATION).collect::<Vec<_>>();

    // Prefer the anchor labelled "Next"; otherwise any enabled anchor counts
    let labelled_next = anchors
        .iter()
        .copied()
        .filter(|a| own_text(*a).to_lowercase().contains("next"))
        .collect::<Vec<_>>();
    let candidates = if labelled_next.is_empty() {
        anchors
    } else {
        labelled_next
    };

    candidates.into_iter().any(pagination_enabled)
}

fn pagination_enabled(anchor: ElementRef) -> bool {
    anchor
        .value()
        .attr("style")
        .map(|style| {
            style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .contains(PAGINATION_ENABLED_MARKER)
        })
        .unwrap_or(false)
}

pub fn parse_latest_updates(html: &str, page: u32) -> PageResult<SearchResult> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let results = match root.select(&LATEST_SECTION).next() {
        Some(section) => section
            .select(&LATEST_CARD)
            .filter_map(parse_latest_card)
            .collect(),
        None => {
            log::debug!("AsuraScans: latest updates section not found");
            Vec::new()
        }
    };

    PageResult {
        current_page: page,
        has_next_page: root.select(&LATEST_NEXT_PAGE).next().is_some(),
        results,
    }
}

fn parse_latest_card(card: ElementRef) -> Option<SearchResult> {
    let href = card
        .select(&LATEST_TITLE_LINK)
        .next()?
        .value()
        .attr("href")
        .unwrap_or_default();
    let id = strip_series_prefix(href);
    if id.is_empty() {
        return None;
    }

    let chapters = card
        .select(&LATEST_CHAPTER_ROW)
        .filter_map(parse_latest_chapter_row)
        .collect::<Vec<_>>();

    let latest_chapter = chapters.first().map(|c| match &c.release_date {
        Some(date) => format!("{} ({})", c.id, date),
        None => c.id.clone(),
    });

    Some(SearchResult {
        id: id.to_string(),
        title: text_of(card, &LATEST_TITLE_LINK),
        image: attr_of(card, &LATEST_IMAGE, "src"),
        status: Some(PublicationStatus::Unknown),
        latest_chapter,
        rating: None,
        chapters: Some(chapters),
    })
}

fn parse_latest_chapter_row(row: ElementRef) -> Option<ChapterSummary> {
    let href = row.select(&LATEST_CHAPTER_LINK).next()?.value().attr("href")?;
    if !href.contains(CHAPTER_LINK_MARKER) {
        return None;
    }

    // Desktop and mobile layouts render the label in different nodes
    let label = non_empty(&text_of(row, &LATEST_CHAPTER_TEXT_DESKTOP))
        .or_else(|| non_empty(&text_of(row, &LATEST_CHAPTER_TEXT_MOBILE)))?;
    let release_date = non_empty(&text_of(row, &LATEST_CHAPTER_TIME));

    Some(split_chapter_label(&label, release_date))
}

pub fn parse_popular_today(html: &str) -> PageResult<SearchResult> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut results = Vec::new();
    let mut seen = HashSet::new();

    if let Some(section) = root.select(&POPULAR_SECTION).next() {
        for card in section.select(&POPULAR_CARD) {
            let Some(entry) = parse_popular_card(card) else {
                continue;
            };
            if seen.insert(entry.id.clone()) {
                results.push(entry);
            }
        }
    }

    PageResult {
        current_page: 1,
        has_next_page: false,
        results,
    }
}

fn parse_popular_card(card: ElementRef) -> Option<SearchResult> {
    let href = card
        .select(&POPULAR_LINK)
        .next()?
        .value()
        .attr("href")
        .unwrap_or_default();
    let id = strip_series_prefix(href);
    let title = text_of(card, &POPULAR_TITLE);
    if id.is_empty() || title.is_empty() {
        return None;
    }

    Some(SearchResult {
        id: id.to_string(),
        title,
        image: attr_of(card, &POPULAR_IMAGE, "src"),
        status: Some(PublicationStatus::Unknown),
        latest_chapter: None,
        rating: non_empty(&text_of(card, &POPULAR_RATING)),
        chapters: None,
    })
}

pub fn parse_manga_info(html: &str, id: &str) -> TitleDetail {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let top_info = root.select(&DETAIL_TOP_INFO).next();

    let authors = text_of(root, &DETAIL_AUTHORS)
        .split('/')
        .filter_map(non_empty)
        .collect();

    let genres = root
        .select(&DETAIL_GENRE)
        .map(own_text)
        .filter(|g| !g.is_empty())
        .collect();

    let recommendations = root
        .select(&SERIES_CARD)
        .filter_map(parse_recommendation_card)
        .collect();

    TitleDetail {
        id: id.to_string(),
        title: text_of(root, &DETAIL_TITLE),
        image: top_info.and_then(|t| attr_of(t, &DETAIL_IMAGE, "src")),
        status: determine_status(&text_in(top_info, &DETAIL_STATUS)),
        rating: non_empty(&text_in(top_info, &DETAIL_RATING)),
        description: non_empty(&text_of(root, &DETAIL_DESCRIPTION)),
        authors,
        artist: non_empty(&text_of(root, &DETAIL_ARTIST)),
        updated_on: non_empty(&text_of(root, &DETAIL_UPDATED_ON)),
        genres,
        chapters: parse_embedded_chapters(html),
        recommendations,
    }
}

fn parse_recommendation_card(card: ElementRef) -> Option<SearchResult> {
    let id = strip_series_prefix(card.value().attr("href")?);
    if id.is_empty() {
        return None;
    }

    Some(SearchResult {
        id: id.to_string(),
        title: text_of(card, &RECOMMENDATION_TITLE),
        image: attr_of(card, &RECOMMENDATION_IMAGE, "src"),
        status: Some(determine_status(&text_of(card, &RECOMMENDATION_STATUS))),
        latest_chapter: non_empty(&text_of(card, &RECOMMENDATION_LATEST)),
        rating: non_empty(&text_of(card, &RECOMMENDATION_RATING)),
        chapters: None,
    })
}

/// The chapter list is optional on a detail page: a missing or broken array yields `None`
fn parse_embedded_chapters(html: &str) -> Option<Vec<ChapterSummary>> {
    match extract_array::<ChapterEntry>(html, EmbeddedArray::Chapters) {
        Ok(entries) => Some(
            entries
                .into_iter()
                .map(|entry| {
                    let number = entry.name.to_string();
                    ChapterSummary {
                        title: chapter_title_or_default(entry.title.as_deref(), &number),
                        release_date: entry.published_at.as_deref().and_then(non_empty),
                        id: number,
                    }
                })
                .collect(),
        ),
        Err(e @ EmbeddedJsonError::NotFound(_)) => {
            log::debug!("AsuraScans: {}", e);
            None
        }
        Err(e) => {
            log::warn!("AsuraScans: {}", e);
            None
        }
    }
}

/// Pages are the whole point of a chapter fetch, so a missing array is an error
pub fn parse_chapter_pages(html: &str) -> Result<Vec<ChapterPage>, ScraperError> {
    let entries = extract_array::<PageEntry>(html, EmbeddedArray::Pages)
        .map_err(|e| ScraperError::parse("chapter pages", e.to_string()))?;

    Ok(entries
        .into_iter()
        .zip(1u32..)
        .map(|(entry, page)| ChapterPage {
            page,
            img: entry.url,
        })
        .collect())
}
