//! Canonical types and normalization for the famscout pipeline.
//!
//! Everything downstream of extraction — relevance filtering, deduplication,
//! merging — operates on the [`CandidateEvent`] shape defined here. The
//! extraction collaborator's raw output enters through [`normalize`], which
//! rejects malformed candidates instead of letting half-empty records leak
//! into comparisons.

pub mod app_config;
pub mod config;
pub mod event;
pub mod normalize;
pub mod payload;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use event::{CandidateEvent, DedupStatus, EventImage, RelevanceLabel};
pub use normalize::{article_id_from_url, normalize, NormalizeError};
pub use payload::{ArticleContext, ExtractedArticle, RawEventPayload, RawImage};
