//! Semantic similarity for event deduplication.
//!
//! Two halves: an HTTP client for a text-embeddings service (vectors are
//! recomputed per run and never persisted), and a pure, deterministic
//! [`SimilarityEngine`] that turns a pair of candidates into a duplicate
//! verdict using embedding cosine plus venue-aware tie-breaking.

pub mod embed;
pub mod engine;
pub mod error;

mod retry;

pub use embed::{backfill_embeddings, EmbedClient};
pub use engine::{cosine_similarity, SimilarityConfig, SimilarityEngine};
pub use error::EmbedError;
