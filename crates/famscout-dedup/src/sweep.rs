//! Pairwise duplicate sweeps with deterministic ordering.

use std::cmp::Ordering;

use famscout_core::{CandidateEvent, DedupStatus};
use famscout_similarity::SimilarityEngine;

/// The comparison universe for one deduplication pass.
pub enum DedupScope<'a> {
    /// Pairwise across the current batch only.
    WithinBatch,
    /// Each batch candidate against the events of an existing collection.
    /// Existing events always outrank incoming ones and are never modified;
    /// batch candidates are not compared with each other in this scope.
    AgainstHistory(&'a [CandidateEvent]),
}

/// Which of a duplicate pair survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepPolicy {
    /// The earlier-ordered (first-seen) candidate wins. Used by all plain
    /// dedup passes.
    FirstSeen,
    /// A reviewed event outranks an unreviewed one regardless of order;
    /// two reviewed duplicates are recorded as a conflict and both kept
    /// (the merge coordinator aborts on any conflict). Otherwise
    /// first-seen-wins.
    ProtectReviewed,
}

/// Two reviewed events that are mutual duplicates — automatic resolution
/// cannot settle this, an operator has to.
#[derive(Debug, Clone)]
pub struct ReviewedConflict {
    pub first: String,
    pub second: String,
}

/// Result of one sweep: survivors and casualties in stable order, each with
/// its `dedup_status` set, plus any reviewed conflicts encountered.
pub struct DedupOutcome {
    pub kept: Vec<CandidateEvent>,
    pub dropped: Vec<CandidateEvent>,
    pub conflicts: Vec<ReviewedConflict>,
}

/// Cross-folder result, keeping the per-collection partition so each source
/// folder can be rewritten without its dropped events.
pub struct CrossFolderOutcome {
    pub collections: Vec<Vec<CandidateEvent>>,
    pub dropped: Vec<CandidateEvent>,
}

/// Index-level result of a sweep over a borrowed slice.
struct SweepFlags {
    /// Stable visit order (indices into the input slice).
    order: Vec<usize>,
    dropped: Vec<bool>,
    conflicts: Vec<ReviewedConflict>,
}

/// Stable processing order: `extracted_at`, then title. Ties beyond that
/// keep input order (stable sort), so the kept/dropped partition is
/// identical across runs.
fn stable_order(events: &[CandidateEvent]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| compare_events(&events[a], &events[b]));
    order
}

fn compare_events(a: &CandidateEvent, b: &CandidateEvent) -> Ordering {
    a.extracted_at
        .cmp(&b.extracted_at)
        .then_with(|| a.title.cmp(&b.title))
}

fn run_sweep(events: &[CandidateEvent], engine: &SimilarityEngine, policy: KeepPolicy) -> SweepFlags {
    let order = stable_order(events);
    let mut dropped = vec![false; events.len()];
    let mut conflicts = Vec::new();

    for (pos, &i) in order.iter().enumerate() {
        if dropped[i] {
            continue;
        }
        for &j in &order[pos + 1..] {
            if dropped[j] {
                continue;
            }
            if !engine.is_duplicate(&events[i], &events[j]) {
                continue;
            }
            match policy {
                KeepPolicy::FirstSeen => {
                    tracing::debug!(
                        kept = %events[i].fingerprint(),
                        dropped = %events[j].fingerprint(),
                        "duplicate — first seen wins"
                    );
                    dropped[j] = true;
                }
                KeepPolicy::ProtectReviewed => match (events[i].reviewed, events[j].reviewed) {
                    (true, true) => {
                        conflicts.push(ReviewedConflict {
                            first: events[i].title.clone(),
                            second: events[j].title.clone(),
                        });
                    }
                    (false, true) => {
                        tracing::debug!(
                            kept = %events[j].fingerprint(),
                            dropped = %events[i].fingerprint(),
                            "duplicate — reviewed event protected"
                        );
                        dropped[i] = true;
                    }
                    _ => {
                        dropped[j] = true;
                    }
                },
            }
            if dropped[i] {
                break;
            }
        }
    }

    SweepFlags {
        order,
        dropped,
        conflicts,
    }
}

/// Splits `events` into kept and dropped (both in stable order), setting
/// `dedup_status` on every event.
fn partition(events: Vec<CandidateEvent>, flags: SweepFlags) -> DedupOutcome {
    let mut slots: Vec<Option<CandidateEvent>> = events.into_iter().map(Some).collect();
    let mut kept = Vec::new();
    let mut dropped = Vec::new();

    for &i in &flags.order {
        let mut event = slots[i].take().expect("each index is visited exactly once");
        if flags.dropped[i] {
            event.dedup_status = DedupStatus::DroppedDuplicate;
            dropped.push(event);
        } else {
            event.dedup_status = DedupStatus::Kept;
            kept.push(event);
        }
    }

    DedupOutcome {
        kept,
        dropped,
        conflicts: flags.conflicts,
    }
}

/// Runs one pairwise sweep over `events` under the given keep policy.
///
/// Candidates are visited in stable order; each still-kept candidate is
/// compared against all later-ordered still-kept candidates, and the policy
/// decides which of a duplicate pair is dropped. Deterministic for fixed
/// inputs and engine outputs.
#[must_use]
pub fn sweep(
    engine: &SimilarityEngine,
    events: Vec<CandidateEvent>,
    policy: KeepPolicy,
) -> DedupOutcome {
    let flags = run_sweep(&events, engine, policy);
    partition(events, flags)
}

/// Deduplicates `batch` in the given scope, first-seen-wins.
#[must_use]
pub fn deduplicate(
    engine: &SimilarityEngine,
    batch: Vec<CandidateEvent>,
    scope: DedupScope<'_>,
) -> DedupOutcome {
    match scope {
        DedupScope::WithinBatch => sweep(engine, batch, KeepPolicy::FirstSeen),
        DedupScope::AgainstHistory(history) => {
            let order = stable_order(&batch);
            let mut dropped = vec![false; batch.len()];

            for &i in &order {
                for existing in history {
                    if engine.is_duplicate(existing, &batch[i]) {
                        tracing::debug!(
                            existing = %existing.fingerprint(),
                            dropped = %batch[i].fingerprint(),
                            "duplicate of an already-collected event"
                        );
                        dropped[i] = true;
                        break;
                    }
                }
            }

            partition(
                batch,
                SweepFlags {
                    order,
                    dropped,
                    conflicts: Vec::new(),
                },
            )
        }
    }
}

/// Cross-folder deduplication over an explicitly supplied list of
/// collections. First-seen-wins across the whole union; ties on
/// `(extracted_at, title)` fall back to collection order, then position
/// within the collection.
#[must_use]
pub fn deduplicate_cross_folder(
    engine: &SimilarityEngine,
    collections: Vec<Vec<CandidateEvent>>,
) -> CrossFolderOutcome {
    let sizes: Vec<usize> = collections.iter().map(Vec::len).collect();
    let mut flat: Vec<CandidateEvent> = collections.into_iter().flatten().collect();

    let flags = run_sweep(&flat, engine, KeepPolicy::FirstSeen);

    for (i, event) in flat.iter_mut().enumerate() {
        event.dedup_status = if flags.dropped[i] {
            DedupStatus::DroppedDuplicate
        } else {
            DedupStatus::Kept
        };
    }

    // Regroup survivors by their source collection, preserving each
    // collection's internal order. Dropped events lose their folder
    // association — the caller only needs them for image cleanup and
    // reporting.
    let mut regrouped: Vec<Vec<CandidateEvent>> = sizes.iter().map(|_| Vec::new()).collect();
    let mut dropped_events = Vec::new();

    let mut folder = 0usize;
    let mut remaining_in_folder = sizes.first().copied().unwrap_or(0);
    for (i, event) in flat.into_iter().enumerate() {
        while remaining_in_folder == 0 && folder + 1 < sizes.len() {
            folder += 1;
            remaining_in_folder = sizes[folder];
        }
        remaining_in_folder = remaining_in_folder.saturating_sub(1);

        if flags.dropped[i] {
            dropped_events.push(event);
        } else {
            regrouped[folder].push(event);
        }
    }

    CrossFolderOutcome {
        collections: regrouped,
        dropped: dropped_events,
    }
}

#[cfg(test)]
#[path = "sweep_test.rs"]
mod tests;
