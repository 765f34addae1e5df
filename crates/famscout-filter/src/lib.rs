//! Relevance filtering for candidate events.
//!
//! A total, pure, deterministic binary decision: is this a family event
//! worth publishing, or not. Exclusion keywords veto first; otherwise the
//! candidate's text is scored against the category hint lexicon and
//! compared to the relevance threshold. When the filter cannot decide
//! (too little text) it answers non-relevant — a false negative is cheaper
//! than a false positive reaching publication.

mod classify;
mod lexicon;

pub use classify::RelevanceFilter;
pub use lexicon::CATEGORIES;
