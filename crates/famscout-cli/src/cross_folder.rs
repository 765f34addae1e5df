//! The `dedup` command: periodic cleanup across an explicit set of
//! collection folders.
//!
//! Loads every named collection, runs one cross-folder pass
//! (first-seen-wins across the union), rewrites each source collection
//! without its dropped events, and only then deletes the dropped events'
//! images. Optionally folds all survivors into a fresh merged collection.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use famscout_core::AppConfig;
use famscout_dedup::{cleanup_dropped_images, deduplicate_cross_folder, FsImageStore};
use famscout_similarity::{backfill_embeddings, EmbedClient, SimilarityConfig, SimilarityEngine};
use famscout_store::{merge, EventCollection};

#[derive(Debug, Args)]
pub struct DedupArgs {
    /// Collection directory to include in the pass. Repeatable; at least
    /// one required. Folder selection is deliberate and explicit — this
    /// command never scans for folders on its own.
    #[arg(long = "folder", required = true)]
    pub folders: Vec<PathBuf>,

    /// Fold all survivors into a fresh merged collection at this directory.
    #[arg(long = "merge-into")]
    pub merge_into: Option<PathBuf>,
}

pub async fn execute(config: &AppConfig, args: DedupArgs) -> anyhow::Result<()> {
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

    // Materialize every collection up front; the pass runs against a
    // consistent snapshot, never against folders being mutated.
    let mut collections = Vec::with_capacity(args.folders.len());
    for dir in &args.folders {
        let mut collection = EventCollection::load(dir)
            .with_context(|| format!("loading collection {}", dir.display()))?;
        backfill_embeddings(&embed_client, &mut collection.events).await;
        tracing::info!(
            dir = %dir.display(),
            events = collection.events.len(),
            "collection loaded"
        );
        collections.push(collection);
    }

    let event_sets: Vec<_> = collections.iter().map(|c| c.events.clone()).collect();
    let outcome = deduplicate_cross_folder(&engine, event_sets);

    // Rewrite each source collection without its dropped events, atomically
    // per document.
    for (collection, kept) in collections.iter_mut().zip(outcome.collections) {
        let before = collection.events.len();
        collection.events = kept;
        collection
            .save()
            .with_context(|| format!("rewriting {}", collection.dir.display()))?;
        println!(
            "{}: {} events kept, {} removed",
            collection.dir.display(),
            collection.events.len(),
            before - collection.events.len()
        );
    }

    // Every dropped event is now durably out of its source collection.
    let images_deleted = cleanup_dropped_images(&outcome.dropped, &FsImageStore);
    println!(
        "{} duplicates removed across {} folders, {} images deleted",
        outcome.dropped.len(),
        args.folders.len(),
        images_deleted
    );

    if let Some(target) = args.merge_into {
        let survivors: Vec<_> = collections
            .into_iter()
            .flat_map(|c| c.events)
            .collect();
        let target_collection = EventCollection::load(&target)
            .with_context(|| format!("loading merge target {}", target.display()))?;
        let merge_outcome = merge(target_collection, survivors, &engine)
            .with_context(|| format!("merging into {}", target.display()))?;
        println!(
            "merged {} events into {}",
            merge_outcome.collection.events.len(),
            target.display()
        );
    }

    Ok(())
}
