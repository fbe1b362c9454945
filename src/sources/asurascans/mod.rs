//! Asura Scans - Next.js site with HTML-rendered listings and chapter data
//! embedded in inline flight scripts.

pub mod embedded;
pub mod parser;
pub mod schema;

use crate::access_path::{AccessPathSelector, Fetched};
use crate::config::Config;
use crate::error::ScraperError;
use crate::helpers::format_series_id;
use crate::models::{ChapterPage, PageResult, SearchResult, SourceInfo, TitleDetail};

pub const NAME: &str = "AsuraScans";
pub const LOGO: &str = "https://asuracomic.net/images/logo.png";

pub struct AsuraScans {
    fetcher: AccessPathSelector,
}

impl AsuraScans {
    /// Adapter with the built-in defaults (live site, default proxy)
    pub fn new() -> Result<Self, ScraperError> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self, ScraperError> {
        let base_url = config.source.base_url.trim_end_matches('/');
        let client = config
            .bot_detection
            .create_http_client(Some(format!("{}/", base_url)))?;

        Ok(Self {
            fetcher: AccessPathSelector::new(
                client,
                base_url,
                config.source.fallback_proxies.clone(),
            ),
        })
    }

    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            name: NAME.to_string(),
            base_url: self.fetcher.base_url().to_string(),
            logo: LOGO.to_string(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<String, ScraperError> {
        let Fetched { body, path: access } = self.fetcher.fetch(path).await?;
        log::debug!(
            "{}: Fetched {} bytes for /{} via {:?}",
            NAME,
            body.len(),
            path,
            access
        );
        Ok(body)
    }

    pub async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> Result<PageResult<SearchResult>, ScraperError> {
        if query.trim().is_empty() {
            return Err(ScraperError::Validation(
                "Query parameter is required".to_string(),
            ));
        }
        validate_page(page)?;

        let formatted_query = urlencoding::encode(&query.to_lowercase()).into_owned();
        let html = self
            .fetch(&format!("series?page={}&name={}", page, formatted_query))
            .await?;

        Ok(parser::parse_series_page(&html, page))
    }

    pub async fn get_latest_updates(
        &self,
        page: u32,
    ) -> Result<PageResult<SearchResult>, ScraperError> {
        validate_page(page)?;
        let html = self.fetch(&format!("page/{}", page)).await?;
        Ok(parser::parse_latest_updates(&html, page))
    }

    pub async fn get_popular_today(&self) -> Result<PageResult<SearchResult>, ScraperError> {
        let html = self.fetch("").await?;
        Ok(parser::parse_popular_today(&html))
    }

    pub async fn get_series(&self, page: u32) -> Result<PageResult<SearchResult>, ScraperError> {
        validate_page(page)?;
        let html = self.fetch(&format!("series?page={}", page)).await?;
        Ok(parser::parse_series_page(&html, page))
    }

    pub async fn fetch_manga_info(&self, manga_id: &str) -> Result<TitleDetail, ScraperError> {
        let manga_id = validate_id(manga_id)?;
        let html = self.fetch(&format_series_id(manga_id)).await?;
        Ok(parser::parse_manga_info(&html, manga_id))
    }

    pub async fn fetch_chapter_pages(
        &self,
        chapter_id: &str,
    ) -> Result<Vec<ChapterPage>, ScraperError> {
        let chapter_id = validate_id(chapter_id)?;
        let html = self.fetch(&format_series_id(chapter_id)).await?;
        let pages = parser::parse_chapter_pages(&html)?;
        log::debug!("{}: Found {} pages for {}", NAME, pages.len(), chapter_id);
        Ok(pages)
    }
}

fn validate_page(page: u32) -> Result<(), ScraperError> {
    if page < 1 {
        return Err(ScraperError::Validation("Invalid page number".to_string()));
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<&str, ScraperError> {
    let id = id.trim().trim_start_matches('/');
    if id.is_empty() {
        return Err(ScraperError::Validation("Identifier is required".to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_page() {
        assert!(validate_page(1).is_ok());
        assert!(matches!(validate_page(0), Err(ScraperError::Validation(_))));
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id(" /series/example ").unwrap(), "series/example");
        assert!(matches!(validate_id("  "), Err(ScraperError::Validation(_))));
    }

    #[test]
    fn test_info() {
        let source = AsuraScans::new().unwrap();
        let info = source.info();
        assert_eq!(info.name, "AsuraScans");
        assert_eq!(info.base_url, "https://asuracomic.net");
    }
}
