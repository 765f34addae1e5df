//! The canonical normalized event shape shared by every pipeline stage.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One downloaded (or downloadable) image attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImage {
    /// URL the image was (or would be) downloaded from.
    #[serde(alias = "url")]
    pub original_url: String,
    /// Local filesystem path once downloaded; `None` until the image-storage
    /// collaborator has fetched it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

/// Relevance decision for a candidate. `Unknown` until the filter has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceLabel {
    #[default]
    Unknown,
    Relevant,
    NonRelevant,
}

/// Deduplication decision for a candidate. `Unknown` until a dedup pass
/// has covered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStatus {
    #[default]
    Unknown,
    Kept,
    DroppedDuplicate,
}

/// A normalized, not-yet-finalized extracted event record.
///
/// Created by [`crate::normalize`]; the relevance filter sets
/// `relevance_label`, the deduplicator sets `dedup_status`, the review stage
/// (external) may set `reviewed`. Terminal state is either "written to an
/// event collection" or "discarded".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateEvent {
    /// Non-empty, whitespace-canonicalized title.
    pub title: String,
    /// Short one-or-two sentence summary.
    #[serde(default)]
    pub blurb: String,
    /// Full description, possibly empty.
    #[serde(default)]
    pub description: String,
    /// Venue display name with original casing. Compare via [`Self::venue_key`].
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub full_address: String,
    /// Present only together with `longitude`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Local event times without zone, as the extraction collaborator emits them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<NaiveDateTime>,
    /// Human-formatted date/time line, e.g. "1 July 2025, 10am - 5pm".
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
    /// Originating blog/feed name.
    pub source_id: String,
    /// Non-empty URL of the event page or, failing that, the source article.
    pub source_url: String,
    #[serde(default)]
    pub images: Vec<EventImage>,
    pub extracted_at: DateTime<Utc>,
    #[serde(default)]
    pub relevance_label: RelevanceLabel,
    #[serde(default)]
    pub dedup_status: DedupStatus,
    /// Set by the review stage; a reviewed event is never dropped in favor
    /// of an unreviewed duplicate during a merge.
    #[serde(default)]
    pub reviewed: bool,
    /// Transient embedding vector, recomputed per run. Never persisted.
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,
}

impl CandidateEvent {
    /// Case-folded, whitespace-collapsed venue name for comparisons.
    /// Empty when the venue is unknown; an empty key never matches anything.
    #[must_use]
    pub fn venue_key(&self) -> String {
        fold_for_compare(&self.venue_name)
    }

    /// Case-folded, whitespace-collapsed address for containment checks.
    #[must_use]
    pub fn address_key(&self) -> String {
        fold_for_compare(&self.full_address)
    }

    /// Text embedded for semantic comparison: title, blurb and description
    /// joined, skipping empty parts.
    #[must_use]
    pub fn embed_text(&self) -> String {
        let parts: Vec<&str> = [
            self.title.as_str(),
            self.blurb.as_str(),
            self.description.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        parts.join(" ")
    }

    /// Coordinates, present only when both halves are.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Short stable identifier for logs and reports, derived from the
    /// source URL and title.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source_url.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.title.as_bytes());
        let digest = hasher.finalize();
        hex_prefix(&digest, 6)
    }
}

/// Lowercase and collapse all whitespace runs to single spaces.
fn fold_for_compare(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Hex-encode the first `n` bytes of a digest.
fn hex_prefix(bytes: &[u8], n: usize) -> String {
    bytes
        .iter()
        .take(n)
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minimal_event(title: &str, venue: &str) -> CandidateEvent {
        CandidateEvent {
            title: title.to_owned(),
            blurb: String::new(),
            description: String::new(),
            venue_name: venue.to_owned(),
            full_address: String::new(),
            latitude: None,
            longitude: None,
            start_datetime: None,
            end_datetime: None,
            datetime_display: String::new(),
            price_display: String::new(),
            is_free: false,
            organiser: String::new(),
            categories: Vec::new(),
            source_id: "testblog".to_owned(),
            source_url: "https://example.com/post".to_owned(),
            images: Vec::new(),
            extracted_at: Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap(),
            relevance_label: RelevanceLabel::Unknown,
            dedup_status: DedupStatus::Unknown,
            reviewed: false,
            embedding: None,
        }
    }

    #[test]
    fn venue_key_folds_case_and_whitespace() {
        let event = minimal_event("Lights Show", "  Gardens   BY the Bay ");
        assert_eq!(event.venue_key(), "gardens by the bay");
    }

    #[test]
    fn venue_key_empty_for_unknown_venue() {
        let event = minimal_event("Lights Show", "   ");
        assert_eq!(event.venue_key(), "");
    }

    #[test]
    fn coordinates_require_both_halves() {
        let mut event = minimal_event("Lights Show", "Gardens by the Bay");
        event.latitude = Some(1.28);
        assert_eq!(event.coordinates(), None);
        event.longitude = Some(103.86);
        assert_eq!(event.coordinates(), Some((1.28, 103.86)));
    }

    #[test]
    fn embed_text_skips_empty_parts() {
        let mut event = minimal_event("Lights Show", "");
        event.description = "An evening light display.".to_owned();
        assert_eq!(event.embed_text(), "Lights Show An evening light display.");
    }

    #[test]
    fn fingerprint_is_stable() {
        let event = minimal_event("Lights Show", "Gardens by the Bay");
        assert_eq!(event.fingerprint(), event.clone().fingerprint());
        assert_eq!(event.fingerprint().len(), 12);
    }

    #[test]
    fn embedding_is_not_serialized() {
        let mut event = minimal_event("Lights Show", "Gardens by the Bay");
        event.embedding = Some(vec![1.0, 0.0]);
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("embedding").is_none());
    }

    #[test]
    fn image_url_alias_accepted() {
        let img: EventImage =
            serde_json::from_str(r#"{"url": "https://cdn.example.com/a.jpg"}"#).unwrap();
        assert_eq!(img.original_url, "https://cdn.example.com/a.jpg");
        assert!(img.local_path.is_none());
    }
}
