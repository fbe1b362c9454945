//! Helper functions shared by the scraper
//!
//! - Publication status classification
//! - Catalog identifier normalization
//! - Chapter label splitting
//!
//! # Examples
//!
//! ```
//! use asura_scraper::helpers::{determine_status, format_series_id};
//! use asura_scraper::models::PublicationStatus;
//!
//! assert_eq!(determine_status(" Ongoing "), PublicationStatus::Ongoing);
//! assert_eq!(format_series_id("solo-leveling"), "series/solo-leveling");
//! ```

use crate::models::{ChapterSummary, PublicationStatus};

const SERIES_PREFIX: &str = "series/";

/// Map the free-text status shown upstream onto [`PublicationStatus`]
pub fn determine_status(state: &str) -> PublicationStatus {
    match state.trim().to_lowercase().as_str() {
        "completed" => PublicationStatus::Completed,
        "ongoing" => PublicationStatus::Ongoing,
        "dropped" => PublicationStatus::Cancelled,
        _ => PublicationStatus::Unknown,
    }
}

/// Prefix an identifier with the collection path unless it already has it
pub fn format_series_id(id: &str) -> String {
    if id.starts_with(SERIES_PREFIX) {
        id.to_string()
    } else {
        format!("{}{}", SERIES_PREFIX, id)
    }
}

/// Turn a link such as `/series/solo-leveling-1a2b` into `solo-leveling-1a2b`
pub fn strip_series_prefix(href: &str) -> &str {
    match href.split_once(SERIES_PREFIX) {
        Some((_, rest)) => rest,
        None => href.trim_start_matches('/'),
    }
}

/// Trimmed text, or `None` when nothing is left
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a label like `Chapter 12 - Finale` into a chapter summary.
///
/// Best effort: labels that do not start with `Chapter ` keep their text as the id.
pub fn split_chapter_label(label: &str, release_date: Option<String>) -> ChapterSummary {
    let label = label.trim();
    let number = label.replacen("Chapter ", "", 1);
    let number = number.split(" - ").next().unwrap_or_default().trim().to_string();
    let title = if label.contains(" - ") {
        label.to_string()
    } else {
        format!("Chapter {}", number)
    };

    ChapterSummary {
        id: number,
        title,
        release_date,
    }
}

/// Chapter title, falling back to `Chapter {number}` when upstream sent an empty one
pub fn chapter_title_or_default(title: Option<&str>, number: &str) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => format!("Chapter {}", number),
    }
}
