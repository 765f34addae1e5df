//! The relevance decision.

use famscout_core::{CandidateEvent, RelevanceLabel};

use crate::lexicon::{CATEGORIES, CATEGORY_HINTS, EXCLUSION_KEYWORDS};

/// A candidate whose combined text has fewer words than this cannot be
/// classified and defaults to non-relevant.
const MIN_WORDS: usize = 3;

/// Category score by number of matched hint phrases. More matches mean a
/// stronger signal; the steps mirror the production boost caps.
const SCORE_ONE_HINT: f32 = 0.80;
const SCORE_TWO_HINTS: f32 = 0.85;
const SCORE_MANY_HINTS: f32 = 0.90;

/// Binary relevance classifier over normalized candidate text.
pub struct RelevanceFilter {
    threshold: f32,
}

impl RelevanceFilter {
    /// A candidate is relevant when its best category score reaches
    /// `threshold` (documented default 0.60) and no exclusion keyword fires.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Classifies one candidate. Total and deterministic: every candidate
    /// gets exactly one of `Relevant` / `NonRelevant`.
    #[must_use]
    pub fn classify(&self, event: &CandidateEvent) -> RelevanceLabel {
        let exclusion_text = exclusion_text(event);
        if let Some(keyword) = matched_exclusion(&exclusion_text) {
            tracing::debug!(
                event = %event.fingerprint(),
                keyword,
                "excluded by keyword"
            );
            return RelevanceLabel::NonRelevant;
        }

        let text = classification_text(event);
        if text.split_whitespace().count() < MIN_WORDS {
            tracing::debug!(event = %event.fingerprint(), "too little text to classify");
            return RelevanceLabel::NonRelevant;
        }

        match best_category(&text) {
            Some((category, score)) if score >= self.threshold => {
                tracing::debug!(event = %event.fingerprint(), category, score, "relevant");
                RelevanceLabel::Relevant
            }
            _ => RelevanceLabel::NonRelevant,
        }
    }

    /// Labels every candidate in place. Returns `(relevant, non_relevant)`
    /// counts for the run summary.
    pub fn label_batch(&self, events: &mut [CandidateEvent]) -> (usize, usize) {
        let mut relevant = 0usize;
        let mut non_relevant = 0usize;
        for event in events.iter_mut() {
            event.relevance_label = self.classify(event);
            match event.relevance_label {
                RelevanceLabel::Relevant => relevant += 1,
                _ => non_relevant += 1,
            }
        }
        (relevant, non_relevant)
    }
}

/// Text searched for exclusion keywords: everything descriptive, including
/// organiser names (tuition centres advertise events under their own name).
fn exclusion_text(event: &CandidateEvent) -> String {
    [
        event.title.as_str(),
        event.blurb.as_str(),
        event.description.as_str(),
        event.venue_name.as_str(),
        event.organiser.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Text scored against the category lexicon: title, description and venue.
fn classification_text(event: &CandidateEvent) -> String {
    [
        event.title.as_str(),
        event.description.as_str(),
        event.venue_name.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

fn matched_exclusion(text: &str) -> Option<&'static str> {
    EXCLUSION_KEYWORDS
        .iter()
        .find(|keyword| text.contains(**keyword))
        .copied()
}

/// Best-scoring category for the given lowercase text, or `None` when no
/// hint matches at all.
fn best_category(text: &str) -> Option<(&'static str, f32)> {
    let mut best: Option<(&'static str, f32)> = None;
    for (category, hints) in CATEGORIES.into_iter().zip(CATEGORY_HINTS) {
        let matches = hints.iter().filter(|hint| text.contains(**hint)).count();
        let score = match matches {
            0 => continue,
            1 => SCORE_ONE_HINT,
            2 => SCORE_TWO_HINTS,
            _ => SCORE_MANY_HINTS,
        };
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((category, score)),
        }
    }
    best
}
