use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PublicationStatus {
    Ongoing,
    Completed,
    Cancelled,
    #[default]
    Unknown,
}

/// One entry of a listing page (search, catalog, popular, latest updates)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<PublicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latest_chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<String>,
    // Only latest-update cards carry their recent chapters
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chapters: Option<Vec<ChapterSummary>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChapterPage {
    /// 1-based position in the chapter
    pub page: u32,
    pub img: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitleDetail {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: PublicationStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chapters: Option<Vec<ChapterSummary>>,
    #[serde(default)]
    pub recommendations: Vec<SearchResult>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub current_page: u32,
    pub has_next_page: bool,
    pub results: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub name: String,
    pub base_url: String,
    pub logo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_result_serializes_camel_case() {
        let page = PageResult {
            current_page: 2,
            has_next_page: true,
            results: vec![SearchResult {
                id: "solo-leveling-1a2b".to_string(),
                title: "Solo Leveling".to_string(),
                image: None,
                status: Some(PublicationStatus::Completed),
                latest_chapter: Some("Chapter 200".to_string()),
                rating: None,
                chapters: None,
            }],
        };

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["results"][0]["status"], "Completed");
        assert_eq!(json["results"][0]["latestChapter"], "Chapter 200");
        assert!(json["results"][0].get("image").is_none());
        assert!(json["results"][0].get("chapters").is_none());
    }

    #[test]
    fn test_status_defaults_to_unknown() {
        assert_eq!(PublicationStatus::default(), PublicationStatus::Unknown);
    }
}
