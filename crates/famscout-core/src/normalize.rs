//! Normalization from raw extraction payloads to [`CandidateEvent`].
//!
//! Datetime parsing is lenient (a bad string becomes `None`); title and
//! source URL are the only hard requirements. A candidate failing those is
//! rejected with [`NormalizeError::MalformedCandidate`] — dropped from the
//! batch and logged, never silently coerced.

use chrono::{NaiveDateTime, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::event::{CandidateEvent, DedupStatus, EventImage, RelevanceLabel};
use crate::payload::{ArticleContext, RawEventPayload};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed candidate from {source_url}: {reason}")]
    MalformedCandidate { source_url: String, reason: String },
}

/// Normalizes one raw extracted event into the canonical candidate shape.
///
/// Whitespace runs are collapsed in every text field; venue casing is
/// preserved for display (comparison goes through
/// [`CandidateEvent::venue_key`]). The payload's own event-page URL wins
/// over the article URL when present. Coordinates are kept only when both
/// halves are present.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedCandidate`] when the title, or both
/// the event URL and article URL, are empty after trimming.
pub fn normalize(
    raw: RawEventPayload,
    ctx: &ArticleContext,
) -> Result<CandidateEvent, NormalizeError> {
    let title = collapse_whitespace(&raw.title);
    if title.is_empty() {
        return Err(NormalizeError::MalformedCandidate {
            source_url: ctx.article_url.clone(),
            reason: "empty title".to_owned(),
        });
    }

    let source_url = {
        let event_url = raw.url.trim();
        if event_url.is_empty() {
            ctx.article_url.trim().to_owned()
        } else {
            event_url.to_owned()
        }
    };
    if source_url.is_empty() {
        return Err(NormalizeError::MalformedCandidate {
            source_url: ctx.article_url.clone(),
            reason: format!("no source URL for \"{title}\""),
        });
    }

    let (latitude, longitude) = match (raw.latitude, raw.longitude) {
        (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
        // A lone half is useless for mapping and misleading in comparisons.
        _ => (None, None),
    };

    Ok(CandidateEvent {
        title,
        blurb: collapse_whitespace(&raw.blurb),
        description: collapse_whitespace(&raw.description),
        venue_name: collapse_whitespace(&raw.venue_name),
        full_address: collapse_whitespace(&raw.full_address),
        latitude,
        longitude,
        start_datetime: parse_local_datetime(&raw.start_datetime),
        end_datetime: parse_local_datetime(&raw.end_datetime),
        datetime_display: collapse_whitespace(&raw.datetime_display),
        price_display: collapse_whitespace(&raw.price_display),
        is_free: raw.is_free,
        organiser: collapse_whitespace(&raw.organiser),
        categories: raw
            .categories
            .iter()
            .map(|c| collapse_whitespace(c))
            .filter(|c| !c.is_empty())
            .collect(),
        source_id: ctx.source_id.clone(),
        source_url,
        images: raw
            .images
            .into_iter()
            .filter(|img| !img.original_url.trim().is_empty())
            .map(|img| EventImage {
                original_url: img.original_url.trim().to_owned(),
                local_path: img.local_path,
            })
            .collect(),
        extracted_at: Utc::now(),
        relevance_label: RelevanceLabel::Unknown,
        dedup_status: DedupStatus::Unknown,
        reviewed: false,
        embedding: None,
    })
}

/// Derives a stable article identifier from a canonicalized URL, for feeds
/// that supply no GUID. Same URL (modulo trailing slash and surrounding
/// whitespace) always produces the same identifier.
#[must_use]
pub fn article_id_from_url(url: &str) -> String {
    let canonical = url.trim().trim_end_matches('/');
    let digest = Sha256::digest(canonical.as_bytes());
    digest
        .iter()
        .take(8)
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses the extractor's local ISO datetime format. Tolerates a trailing
/// seconds field being absent. Anything else becomes `None`.
fn parse_local_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
