//! Raw shapes handed over by the extraction collaborator.
//!
//! The extraction side (feed polling, crawling, the language-model call)
//! writes a JSON document of [`ExtractedArticle`]s; this is the narrow
//! interface the pipeline consumes. Field names follow the extraction
//! schema, so absent fields deserialize to empty defaults.

use serde::{Deserialize, Serialize};

/// One source article together with the raw events extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedArticle {
    /// Originating blog/feed name, e.g. `"sassymamasg"`.
    pub source_id: String,
    /// Stable article identifier: a feed GUID, or a canonicalized-URL hash
    /// (see [`crate::article_id_from_url`]).
    pub article_id: String,
    /// URL of the article the events were extracted from.
    pub source_url: String,
    #[serde(default)]
    pub events: Vec<RawEventPayload>,
}

/// Raw event fields as emitted by the language-model extraction step.
///
/// Everything is optional except what [`crate::normalize`] enforces: a
/// usable title, and a source URL (falling back to the article URL).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEventPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub description: String,
    /// Event page URL when the extractor found one.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub full_address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Local ISO datetime strings, e.g. `"2025-07-01T10:00:00"`.
    #[serde(default)]
    pub start_datetime: String,
    #[serde(default)]
    pub end_datetime: String,
    #[serde(default)]
    pub datetime_display: String,
    #[serde(default)]
    pub price_display: String,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub organiser: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

/// Raw image reference from the extraction output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImage {
    #[serde(alias = "url")]
    pub original_url: String,
    #[serde(default)]
    pub local_path: Option<std::path::PathBuf>,
}

/// Article-level context threaded through normalization.
#[derive(Debug, Clone)]
pub struct ArticleContext {
    pub source_id: String,
    pub article_id: String,
    pub article_url: String,
}

impl ArticleContext {
    #[must_use]
    pub fn for_article(article: &ExtractedArticle) -> Self {
        Self {
            source_id: article.source_id.clone(),
            article_id: article.article_id.clone(),
            article_url: article.source_url.clone(),
        }
    }
}
