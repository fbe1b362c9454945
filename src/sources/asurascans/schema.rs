//! Every selector and pattern that encodes the current AsuraScans layout.
//!
//! The site is a Tailwind/Next.js app, so anchors are class combinations and
//! `nth-child` positions. When the upstream markup changes this is the only
//! file that should need editing; the fixture tests under `tests/` pin the
//! layout these selectors expect.

use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector `{}`: {:?}", css, e))
}

fn pattern(re: &'static str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid pattern `{}`: {}", re, e))
}

macro_rules! selectors {
    ($($(#[$meta:meta])* $name:ident = $css:expr;)+) => {
        $(
            $(#[$meta])*
            pub static $name: LazyLock<Selector> = LazyLock::new(|| selector($css));
        )+

        #[cfg(test)]
        pub(crate) fn all_selectors() -> Vec<&'static LazyLock<Selector>> {
            vec![$(&$name),+]
        }
    };
}

selectors! {
    // Series grid shared by search, the catalog and detail recommendations
    /// One card of the series grid
    SERIES_CARD = ".grid.grid-cols-2.gap-3.p-4 > a";
    SERIES_CARD_TITLE = "div > div > div:nth-child(2) > span:nth-child(1)";
    SERIES_CARD_IMAGE = "div > div > div:nth-child(1) > img";
    SERIES_CARD_STATUS = "div > div > div:nth-child(1) > span";
    SERIES_CARD_LATEST = "div > div > div:nth-child(2) > span:nth-child(2)";
    SERIES_CARD_RATING = "div > div > div:nth-child(2) > span:nth-child(3) > label";
    /// Prev/next anchors under the series grid; enabled ones carry `pointer-events:auto`
    SERIES_PAGINATION = ".flex.items-center.justify-center > a";

    // Latest updates (`/page/{n}`)
    LATEST_SECTION = ".text-white.mb-1.md\\:mb-5.mt-5";
    LATEST_CARD = ".w-full.p-1.pt-1.pb-3";
    LATEST_TITLE_LINK = ".text-\\[15px\\].font-medium a";
    LATEST_IMAGE = "img.rounded-md";
    LATEST_CHAPTER_ROW = ".flex.flex-col.gap-y-1\\.5.list-disc .flex-1";
    LATEST_CHAPTER_LINK = "a";
    LATEST_CHAPTER_TEXT_DESKTOP = ".hidden.sm\\:flex p";
    LATEST_CHAPTER_TEXT_MOBILE = "p.w-\\[80px\\]";
    LATEST_CHAPTER_TIME = ".text-\\[12px\\].text-\\[\\#555555\\]";
    LATEST_NEXT_PAGE = ".pagination .next";

    // Popular today (home page side panel, active tab only)
    POPULAR_SECTION = ".bg-\\[\\#222\\].rounded-\\[3px\\].mb-\\[18px\\]";
    POPULAR_CARD = "[data-state=\"active\"][role=\"tabpanel\"] .flex.px-\\[15px\\].py-3";
    POPULAR_LINK = "a";
    POPULAR_TITLE = ".text-\\[13px\\].font-\\[500\\].text-\\[\\#fff\\]";
    POPULAR_IMAGE = "img";
    POPULAR_RATING = ".text-\\[12px\\].leading-normal.italic.text-\\[\\#999\\]";

    // Series detail page
    DETAIL_TOP_INFO = ".relative.col-span-12.space-y-3.px-6";
    DETAIL_TITLE = ".text-xl.font-bold:nth-child(1)";
    DETAIL_IMAGE = "img";
    DETAIL_RATING = "div > div.px-2.py-1 > p";
    DETAIL_STATUS = "div > div.flex.flex-row > div:nth-child(1) > h3:nth-child(2)";
    DETAIL_DESCRIPTION = "span.font-medium.text-sm";
    DETAIL_AUTHORS = ".grid.grid-cols-1.gap-5.mt-8 > div:nth-child(2) > h3:nth-child(2)";
    DETAIL_ARTIST = ".grid.grid-cols-1.gap-5.mt-8 > div:nth-child(3) > h3:nth-child(2)";
    DETAIL_UPDATED_ON = ".grid.grid-cols-1.gap-5.mt-8 > div:nth-child(5) > h3:nth-child(2)";
    DETAIL_GENRE = ".space-y-1.pt-4 > div > button";

    // Recommendation cards on the detail page
    RECOMMENDATION_TITLE = "div > h2.font-bold";
    RECOMMENDATION_IMAGE = "div > div > img";
    RECOMMENDATION_LATEST = "div > h2:nth-child(3)";
    RECOMMENDATION_STATUS = "div > div:nth-child(1) > span";
    RECOMMENDATION_RATING = "div > div.block > span > label";
}

/// Path fragment that marks a chapter link in listing cards
pub const CHAPTER_LINK_MARKER: &str = "/chapter/";

/// Inline style marker of an enabled pagination anchor (whitespace removed)
pub const PAGINATION_ENABLED_MARKER: &str = "pointer-events:auto";

/// `"chapters": [{...}],` inside the series page flight data
pub static CHAPTERS_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#""chapters".*:(\[\{.*?\}\]),"#));

/// `pages: [{"order": ...}]` inside the chapter page flight data
pub static PAGES_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"pages.*:(\[\{['"]order["'].*?\}\])"#));
