use std::path::PathBuf;

/// Application configuration, loaded from environment variables by
/// [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of all persisted state (ledger database, event collections).
    pub data_dir: PathBuf,
    /// Path to the processed-articles ledger database.
    pub ledger_db_path: PathBuf,
    /// Base URL of the text-embedding service.
    pub embed_url: String,
    /// Embedding model label recorded for reproducibility; dedup runs are
    /// only comparable across identical model versions.
    pub embed_model: String,
    pub embed_timeout_secs: u64,
    pub embed_max_retries: u32,
    pub embed_backoff_base_secs: u64,
    /// Combined-text cosine threshold above which two events are duplicates.
    pub similarity_threshold: f32,
    /// Title-similarity threshold used when the venue-match signal is set.
    pub venue_title_threshold: f32,
    /// Minimum category score for a candidate to count as relevant.
    pub relevance_threshold: f32,
    pub log_level: String,
}

impl AppConfig {
    /// Directory holding one event-collection folder per run timestamp,
    /// plus the long-lived `evergreen` / `non-evergreen` buckets.
    #[must_use]
    pub fn events_output_dir(&self) -> PathBuf {
        self.data_dir.join("events_output")
    }
}
