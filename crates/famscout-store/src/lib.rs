//! On-disk event collections and the merge coordinator.
//!
//! A collection is a directory owning an ordered sequence of candidate
//! events, split into `relevant.json` and `non_relevant.json` (both groups
//! are persisted so the relevance filter stays auditable), plus an
//! `images/` subtree. Writes are atomic: documents are serialized to a
//! same-directory temp file and renamed into place, so a failure mid-merge
//! leaves the previous state byte-identical.

mod collection;
mod error;
mod merge;

pub use collection::{
    CollectionBucket, EventCollection, NON_RELEVANT_FILE, RELEVANT_FILE,
};
pub use error::StoreError;
pub use merge::{merge, MergeOutcome};
