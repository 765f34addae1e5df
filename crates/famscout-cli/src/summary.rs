//! End-of-run accounting, printed so an operator can audit a run without
//! re-reading every file.

use std::fmt;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub articles_total: usize,
    pub articles_skipped: usize,
    pub articles_processed: usize,
    pub candidates: usize,
    pub malformed: usize,
    pub relevant: usize,
    pub non_relevant: usize,
    pub unscored: usize,
    pub dropped_duplicate: usize,
    pub merged: usize,
    pub images_deleted: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "run summary")?;
        writeln!(
            f,
            "  articles: {} total, {} processed, {} skipped (already in ledger)",
            self.articles_total, self.articles_processed, self.articles_skipped
        )?;
        writeln!(
            f,
            "  candidates: {} normalized, {} malformed",
            self.candidates, self.malformed
        )?;
        writeln!(
            f,
            "  relevance: {} relevant, {} non-relevant",
            self.relevant, self.non_relevant
        )?;
        writeln!(
            f,
            "  dedup: {} dropped as duplicates, {} unscored (kept conservatively)",
            self.dropped_duplicate, self.unscored
        )?;
        writeln!(f, "  collection: {} events after merge", self.merged)?;
        write!(f, "  images deleted: {}", self.images_deleted)
    }
}
