//! The duplicate-decision engine.
//!
//! Pure and deterministic given identical inputs (and an identical embedding
//! model version), so dedup runs are reproducible. The decision ladder, in
//! priority order:
//!
//! 1. Same non-empty `source_url` ⇒ duplicate, unless both venues are known
//!    and differ (one article can legitimately yield two events only at two
//!    different places).
//! 2. Venue-match signal AND title similarity ≥ the venue-assisted threshold
//!    ⇒ duplicate. Venue identity is the stronger signal for recurring
//!    events at the same place.
//! 3. Embedding cosine over title+description ≥ the primary threshold ⇒
//!    duplicate. Skipped when either embedding is missing — an unscored
//!    candidate is kept, never silently dropped.
//! 4. Otherwise not a duplicate.

use famscout_core::CandidateEvent;

/// Thresholds driving the duplicate decision. Defaults carry the documented
/// production values; override via `AppConfig` rather than editing here.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityConfig {
    /// Combined-text cosine threshold (rule 3).
    pub primary_threshold: f32,
    /// Title-similarity threshold applied when the venue-match signal is set
    /// (rule 2).
    pub venue_title_threshold: f32,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            primary_threshold: 0.85,
            venue_title_threshold: 0.5,
        }
    }
}

pub struct SimilarityEngine {
    config: SimilarityConfig,
}

impl SimilarityEngine {
    #[must_use]
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// Combined-text similarity in `[0, 1]`, or `None` when either
    /// candidate has no embedding.
    #[must_use]
    pub fn score(&self, a: &CandidateEvent, b: &CandidateEvent) -> Option<f32> {
        let (va, vb) = (a.embedding.as_ref()?, b.embedding.as_ref()?);
        // Negative cosine means "unrelated" as far as dedup is concerned.
        Some(cosine_similarity(va, vb).max(0.0))
    }

    /// Whether `a` and `b` describe the same event.
    #[must_use]
    pub fn is_duplicate(&self, a: &CandidateEvent, b: &CandidateEvent) -> bool {
        let url_a = a.source_url.trim();
        if !url_a.is_empty() && url_a == b.source_url.trim() {
            let (key_a, key_b) = (a.venue_key(), b.venue_key());
            let venues_differ = !key_a.is_empty() && !key_b.is_empty() && key_a != key_b;
            if !venues_differ {
                return true;
            }
        }

        if venue_match(a, b)
            && dice_title_similarity(&a.title, &b.title) >= self.config.venue_title_threshold
        {
            return true;
        }

        match self.score(a, b) {
            Some(score) => score >= self.config.primary_threshold,
            None => {
                tracing::warn!(
                    a = %a.fingerprint(),
                    b = %b.fingerprint(),
                    "embedding missing — semantic comparison skipped, candidates kept"
                );
                false
            }
        }
    }
}

/// The venue-match signal: equal non-empty venue keys, or one non-empty
/// normalized address containing the other. An empty venue is unknown, not
/// "equal" to another empty venue.
fn venue_match(a: &CandidateEvent, b: &CandidateEvent) -> bool {
    let (venue_a, venue_b) = (a.venue_key(), b.venue_key());
    if !venue_a.is_empty() && venue_a == venue_b {
        return true;
    }

    let (addr_a, addr_b) = (a.address_key(), b.address_key());
    !addr_a.is_empty()
        && !addr_b.is_empty()
        && (addr_a.contains(&addr_b) || addr_b.contains(&addr_a))
}

/// Sørensen–Dice coefficient over lowercase title tokens.
fn dice_title_similarity(a: &str, b: &str) -> f32 {
    let tokens_a: std::collections::BTreeSet<String> =
        a.split_whitespace().map(str::to_lowercase).collect();
    let tokens_b: std::collections::BTreeSet<String> =
        b.split_whitespace().map(str::to_lowercase).collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let common = tokens_a.intersection(&tokens_b).count();
    #[allow(clippy::cast_precision_loss)]
    let dice = (2 * common) as f32 / (tokens_a.len() + tokens_b.len()) as f32;
    dice
}

/// Cosine similarity of two vectors. Zero for mismatched lengths or
/// zero-norm inputs.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
