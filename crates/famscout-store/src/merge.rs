//! The merge coordinator: folds a batch of incoming events into an
//! existing collection.

use famscout_core::CandidateEvent;
use famscout_dedup::{sweep, KeepPolicy};
use famscout_similarity::SimilarityEngine;

use crate::collection::EventCollection;
use crate::error::StoreError;

/// Result of a successful merge. `dropped` is handed back so the caller can
/// clean up images — after this function returns the merged collection is
/// already durable, so the drop decisions are safe to act on.
#[derive(Debug)]
pub struct MergeOutcome {
    pub collection: EventCollection,
    pub dropped: Vec<CandidateEvent>,
}

/// Folds `incoming` into `existing` (loaded via [`EventCollection::load`])
/// and writes the result atomically to the collection's directory.
///
/// The no-duplicate invariant is re-validated across existing ∪ incoming
/// even when the incoming batch was already deduplicated against history —
/// manual review between runs may have edited the existing collection into
/// new collisions. Events the reviewer has marked `reviewed` are protected:
/// a reviewed event is never dropped in favor of an unreviewed duplicate,
/// overriding the deduplicator's first-seen-wins default.
///
/// Callers that want the semantic (embedding-cosine) rule to participate in
/// re-validation must backfill embeddings for both sides first; the
/// URL and venue rules apply regardless.
///
/// # Errors
///
/// Returns [`StoreError::MergeConflict`] when two reviewed events are
/// mutual duplicates — nothing is written and no images may be deleted.
/// Returns other [`StoreError`] variants on write failure; any failure
/// before the final rename leaves the on-disk collection untouched.
pub fn merge(
    existing: EventCollection,
    incoming: Vec<CandidateEvent>,
    engine: &SimilarityEngine,
) -> Result<MergeOutcome, StoreError> {
    let dir = existing.dir.clone();
    let existing_count = existing.events.len();
    let incoming_count = incoming.len();

    let mut combined = existing.events;
    combined.extend(incoming);

    let outcome = sweep(engine, combined, KeepPolicy::ProtectReviewed);

    if let Some(conflict) = outcome.conflicts.first() {
        return Err(StoreError::MergeConflict {
            first: conflict.first.clone(),
            second: conflict.second.clone(),
        });
    }

    let collection = EventCollection {
        dir: dir.clone(),
        events: outcome.kept,
    };
    collection.save()?;

    tracing::info!(
        dir = %dir.display(),
        existing = existing_count,
        incoming = incoming_count,
        merged = collection.events.len(),
        dropped = outcome.dropped.len(),
        "collection merged"
    );

    Ok(MergeOutcome {
        collection,
        dropped: outcome.dropped,
    })
}
