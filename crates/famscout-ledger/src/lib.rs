//! Persistent ledger of processed source articles.
//!
//! One row per (source_id, article_id); the ledger is the sole defense
//! against re-extracting an article, so any storage error here is fatal for
//! the current run — callers must abort rather than proceed unguarded.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use thiserror::Error;

// Path relative to crates/famscout-ledger/Cargo.toml; resolves to
// <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid ledger path {0:?}")]
    InvalidPath(std::path::PathBuf),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// One processed-article row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProcessedArticleRecord {
    pub source_id: String,
    pub article_id: String,
    pub processed_at: DateTime<Utc>,
    pub event_count: i64,
}

/// Per-source aggregate for the audit report.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SourceSummary {
    pub source_id: String,
    pub article_count: i64,
    pub event_total: i64,
}

/// Overall ledger totals.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct LedgerTotals {
    pub article_count: i64,
    pub event_total: i64,
}

/// Handle to the processed-articles ledger database.
#[derive(Clone)]
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    /// Opens (creating if missing) the ledger database at `path` and runs
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the file cannot be opened or migrations
    /// fail. Either is fatal for the run.
    pub async fn open(path: &Path) -> Result<Self, LedgerError> {
        let Some(path_str) = path.to_str() else {
            return Err(LedgerError::InvalidPath(path.to_path_buf()));
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| LedgerError::Sqlx(sqlx::Error::Io(e)))?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{path_str}"))
            .map_err(LedgerError::Sqlx)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&pool).await?;
        tracing::debug!(path = %path.display(), "ledger opened");
        Ok(Self { pool })
    }

    /// Opens an in-memory ledger, for tests.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the pool cannot be created.
    pub async fn open_in_memory() -> Result<Self, LedgerError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // A second connection would see a different empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    /// Whether `(source_id, article_id)` has already been processed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sqlx`] on query failure.
    pub async fn has_processed(
        &self,
        source_id: &str,
        article_id: &str,
    ) -> Result<bool, LedgerError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM processed_articles WHERE source_id = ?1 AND article_id = ?2",
        )
        .bind(source_id)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    /// Records that an article finished extraction with `event_count` events
    /// yielded (zero-yield included — that is what makes the skip check
    /// meaningful for empty articles).
    ///
    /// Idempotent upsert: a repeat call refreshes `processed_at` and
    /// `event_count` without creating a second row.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sqlx`] on write failure.
    pub async fn record(
        &self,
        source_id: &str,
        article_id: &str,
        event_count: i64,
    ) -> Result<(), LedgerError> {
        sqlx::query(
            "INSERT INTO processed_articles (source_id, article_id, processed_at, event_count) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT (source_id, article_id) \
             DO UPDATE SET processed_at = excluded.processed_at, \
                           event_count = excluded.event_count",
        )
        .bind(source_id)
        .bind(article_id)
        .bind(Utc::now())
        .bind(event_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All processed-article rows for one source, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sqlx`] on query failure.
    pub async fn history_for(
        &self,
        source_id: &str,
    ) -> Result<Vec<ProcessedArticleRecord>, LedgerError> {
        let rows = sqlx::query_as::<_, ProcessedArticleRecord>(
            "SELECT source_id, article_id, processed_at, event_count \
             FROM processed_articles \
             WHERE source_id = ?1 \
             ORDER BY processed_at DESC, article_id",
        )
        .bind(source_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Per-source article and event totals, most articles first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sqlx`] on query failure.
    pub async fn source_summaries(&self) -> Result<Vec<SourceSummary>, LedgerError> {
        let rows = sqlx::query_as::<_, SourceSummary>(
            "SELECT source_id, \
                    COUNT(*) AS article_count, \
                    COALESCE(SUM(event_count), 0) AS event_total \
             FROM processed_articles \
             GROUP BY source_id \
             ORDER BY article_count DESC, source_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Overall article and event totals.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sqlx`] on query failure.
    pub async fn totals(&self) -> Result<LedgerTotals, LedgerError> {
        let totals = sqlx::query_as::<_, LedgerTotals>(
            "SELECT COUNT(*) AS article_count, \
                    COALESCE(SUM(event_count), 0) AS event_total \
             FROM processed_articles",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }

    /// Deletes every ledger row. Explicit reset only — nothing else removes
    /// rows. Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sqlx`] on write failure.
    pub async fn reset(&self) -> Result<u64, LedgerError> {
        let result = sqlx::query("DELETE FROM processed_articles")
            .execute(&self.pool)
            .await?;
        tracing::warn!(rows = result.rows_affected(), "ledger reset");
        Ok(result.rows_affected())
    }
}
