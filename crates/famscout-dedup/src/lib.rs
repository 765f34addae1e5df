//! Event deduplication across the three comparison scopes.
//!
//! The deduplicator drives the similarity engine pairwise over a batch
//! (within-batch), against an existing collection (against-history), or
//! across an explicitly supplied set of collections (cross-folder). The
//! first-seen candidate always wins; dropping a candidate later triggers
//! deletion of its downloaded images, but only after the drop decision has
//! been durably persisted by the caller.

mod images;
mod sweep;

pub use images::{cleanup_dropped_images, FsImageStore, ImageStore};
pub use sweep::{
    deduplicate, deduplicate_cross_folder, sweep, CrossFolderOutcome, DedupOutcome, DedupScope,
    KeepPolicy, ReviewedConflict,
};
