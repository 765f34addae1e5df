//! The `run` command: full pipeline over one extraction batch.
//!
//! Stages run strictly in sequence over fully materialized batches:
//! ledger gate → normalize → relevance filter → embedding backfill →
//! within-batch dedup → against-history dedup → merge → ledger record →
//! image cleanup. Image cleanup comes last on purpose: images are deleted
//! only once the drop decisions are durable in the merged collection.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use famscout_core::{normalize, AppConfig, ArticleContext, ExtractedArticle};
use famscout_dedup::{
    cleanup_dropped_images, deduplicate, DedupScope, FsImageStore,
};
use famscout_filter::RelevanceFilter;
use famscout_ledger::Ledger;
use famscout_similarity::{backfill_embeddings, EmbedClient, SimilarityConfig, SimilarityEngine};
use famscout_store::{merge, CollectionBucket, EventCollection};

use crate::summary::RunSummary;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Extraction output file: a JSON array of articles with raw events.
    #[arg(long)]
    pub articles: PathBuf,

    /// Target bucket: a run-folder name, "evergreen" or "non-evergreen".
    /// Defaults to a fresh folder named after the current timestamp.
    #[arg(long)]
    pub bucket: Option<String>,

    /// Existing collection directory to dedup against before merging.
    /// Repeatable.
    #[arg(long = "against")]
    pub against: Vec<PathBuf>,

    /// Re-process articles already recorded in the ledger.
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(config: &AppConfig, args: RunArgs) -> anyhow::Result<()> {
    // The ledger is the sole defense against unbounded re-extraction;
    // without it the run must not proceed.
    let ledger = Ledger::open(&config.ledger_db_path)
        .await
        .context("ledger unavailable — aborting run")?;

    let raw = std::fs::read_to_string(&args.articles)
        .with_context(|| format!("reading {}", args.articles.display()))?;
    let articles: Vec<ExtractedArticle> =
        serde_json::from_str(&raw).context("parsing extraction batch")?;

    let filter = RelevanceFilter::new(config.relevance_threshold);
    let engine = SimilarityEngine::new(SimilarityConfig {
        primary_threshold: config.similarity_threshold,
        venue_title_threshold: config.venue_title_threshold,
    });
    let embed_client = EmbedClient::new(
        &config.embed_url,
        config.embed_timeout_secs,
        config.embed_max_retries,
        config.embed_backoff_base_secs,
    )
    .context("building embedding client")?;

    let mut summary = RunSummary {
        articles_total: articles.len(),
        ..RunSummary::default()
    };

    // Ledger gate.
    let mut to_process = Vec::new();
    for article in articles {
        if !args.force
            && ledger
                .has_processed(&article.source_id, &article.article_id)
                .await?
        {
            tracing::debug!(
                source = %article.source_id,
                article = %article.article_id,
                "already processed — skipping"
            );
            summary.articles_skipped += 1;
            continue;
        }
        to_process.push(article);
    }
    summary.articles_processed = to_process.len();

    // Normalize. Per-article yields are remembered for the ledger record
    // at the end of the run.
    let mut batch = Vec::new();
    let mut yields: Vec<(String, String, i64)> = Vec::new();
    for article in &to_process {
        let ctx = ArticleContext::for_article(article);
        let mut count: i64 = 0;
        for raw_event in article.events.clone() {
            match normalize(raw_event, &ctx) {
                Ok(event) => {
                    batch.push(event);
                    count += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        source = %article.source_id,
                        article = %article.article_id,
                        error = %e,
                        "dropping malformed candidate"
                    );
                    summary.malformed += 1;
                }
            }
        }
        yields.push((article.source_id.clone(), article.article_id.clone(), count));
    }
    summary.candidates = batch.len();

    // Relevance first: it is the cheaper pure predicate, and both groups
    // are persisted either way.
    let (relevant, non_relevant) = filter.label_batch(&mut batch);
    summary.relevant = relevant;
    summary.non_relevant = non_relevant;

    // Embedding backfill; candidates a failed batch leaves unscored are
    // kept conservatively by the engine.
    backfill_embeddings(&embed_client, &mut batch).await;
    summary.unscored = batch.iter().filter(|e| e.embedding.is_none()).count();

    // Within-batch dedup.
    let outcome = deduplicate(&engine, batch, DedupScope::WithinBatch);
    let mut kept = outcome.kept;
    let mut dropped = outcome.dropped;

    // Against-history dedup over each supplied collection.
    for dir in &args.against {
        let mut history = EventCollection::load(dir)
            .with_context(|| format!("loading history collection {}", dir.display()))?;
        backfill_embeddings(&embed_client, &mut history.events).await;
        let outcome = deduplicate(&engine, kept, DedupScope::AgainstHistory(&history.events));
        kept = outcome.kept;
        dropped.extend(outcome.dropped);
    }

    // Merge into the target collection (re-validated internally).
    let bucket_name = args
        .bucket
        .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string());
    let bucket = CollectionBucket::parse(&bucket_name);
    let target_dir = bucket.dir(&config.events_output_dir());

    let mut existing = EventCollection::load(&target_dir)
        .with_context(|| format!("loading target collection {}", target_dir.display()))?;
    backfill_embeddings(&embed_client, &mut existing.events).await;

    let merge_outcome = merge(existing, kept, &engine)
        .with_context(|| format!("merging into {}", target_dir.display()))?;
    summary.merged = merge_outcome.collection.events.len();
    dropped.extend(merge_outcome.dropped);
    summary.dropped_duplicate = dropped.len();

    // Record every processed article, zero-yield included, now that the
    // merge is durable. An aborted run leaves articles re-processable.
    for (source_id, article_id, count) in &yields {
        ledger.record(source_id, article_id, *count).await?;
    }

    // Images go last: every owner of these files is now durably dropped.
    summary.images_deleted = cleanup_dropped_images(&dropped, &FsImageStore);

    tracing::info!(
        bucket = bucket.dir_name(),
        merged = summary.merged,
        dropped = summary.dropped_duplicate,
        "run complete"
    );
    println!("{summary}");
    Ok(())
}
