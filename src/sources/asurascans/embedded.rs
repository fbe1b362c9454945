use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;

use super::schema::{CHAPTERS_ARRAY, PAGES_ARRAY};

/// JSON arrays the site ships inside inline `<script>` flight data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbeddedArray {
    Chapters,
    Pages,
}

impl EmbeddedArray {
    pub fn name(self) -> &'static str {
        match self {
            Self::Chapters => "chapters",
            Self::Pages => "pages",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Chapters => &CHAPTERS_ARRAY,
            Self::Pages => &PAGES_ARRAY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmbeddedJsonError {
    #[error("no `{0}` array found in page scripts")]
    NotFound(&'static str),

    #[error("`{key}` array is not valid JSON: {source}")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A JSON scalar the site sometimes sends as a string and sometimes as a number
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChapterEntry {
    pub name: Scalar,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    #[serde(default)]
    pub order: Option<Scalar>,
    pub url: String,
}

/// Locate `array` inside the raw payload and deserialize it.
///
/// The flight data is an escaped JS string, so newlines and backslashes are
/// dropped before matching. Callers decide whether `NotFound` is fatal.
pub fn extract_array<T: DeserializeOwned>(
    payload: &str,
    array: EmbeddedArray,
) -> Result<Vec<T>, EmbeddedJsonError> {
    let cleaned: String = payload.chars().filter(|c| *c != '\n' && *c != '\\').collect();

    let literal = array
        .pattern()
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .ok_or(EmbeddedJsonError::NotFound(array.name()))?;

    serde_json::from_str(literal.as_str()).map_err(|source| EmbeddedJsonError::Malformed {
        key: array.name(),
        source,
    })
}
