//! Event-collection persistence.

use std::fs;
use std::path::{Path, PathBuf};

use famscout_core::{CandidateEvent, RelevanceLabel};

use crate::error::StoreError;

/// Publication-facing document. Only events explicitly labeled relevant
/// land here.
pub const RELEVANT_FILE: &str = "relevant.json";
/// Audit document for everything the filter rejected (or never labeled).
pub const NON_RELEVANT_FILE: &str = "non_relevant.json";

/// A named storage bucket: a dated run folder, or one of the two
/// long-lived collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionBucket {
    /// A run-timestamp folder, e.g. `20250701_081500`.
    Run(String),
    /// Recurring venues and activities not tied to a single run.
    Evergreen,
    NonEvergreen,
}

impl CollectionBucket {
    /// Parses a bucket name. The two long-lived names are recognized in
    /// either spelling; anything else is a run-folder name.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "evergreen" => Self::Evergreen,
            "non-evergreen" | "non_evergreen" => Self::NonEvergreen,
            other => Self::Run(other.to_owned()),
        }
    }

    #[must_use]
    pub fn dir_name(&self) -> &str {
        match self {
            Self::Run(name) => name,
            Self::Evergreen => "evergreen",
            Self::NonEvergreen => "non-evergreen",
        }
    }

    /// The collection directory under the events-output root.
    #[must_use]
    pub fn dir(&self, events_output_root: &Path) -> PathBuf {
        events_output_root.join(self.dir_name())
    }
}

/// An ordered sequence of candidate events owned by one directory.
#[derive(Debug, Clone)]
pub struct EventCollection {
    pub dir: PathBuf,
    pub events: Vec<CandidateEvent>,
}

impl EventCollection {
    /// Loads the collection at `dir`. A missing directory or missing
    /// documents mean an empty (sub)set, not an error: collections come
    /// into existence with their first merge.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a document exists but cannot be read or
    /// parsed.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let mut events = read_events(&dir.join(RELEVANT_FILE))?;
        events.extend(read_events(&dir.join(NON_RELEVANT_FILE))?);
        Ok(Self {
            dir: dir.to_path_buf(),
            events,
        })
    }

    /// Writes both documents atomically (temp file + rename, one document
    /// at a time). The relevant document only ever contains events
    /// explicitly labeled relevant; unlabeled events are kept out of the
    /// publication-facing set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on serialization or filesystem failure. A
    /// failure before a rename leaves the previous document untouched.
    pub fn save(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let relevant: Vec<&CandidateEvent> = self
            .events
            .iter()
            .filter(|e| e.relevance_label == RelevanceLabel::Relevant)
            .collect();
        let non_relevant: Vec<&CandidateEvent> = self
            .events
            .iter()
            .filter(|e| e.relevance_label != RelevanceLabel::Relevant)
            .collect();

        write_json_atomic(&self.dir.join(RELEVANT_FILE), &relevant)?;
        write_json_atomic(&self.dir.join(NON_RELEVANT_FILE), &non_relevant)?;

        tracing::debug!(
            dir = %self.dir.display(),
            relevant = relevant.len(),
            non_relevant = non_relevant.len(),
            "collection saved"
        );
        Ok(())
    }

    /// Events in the publication-facing subset.
    pub fn relevant(&self) -> impl Iterator<Item = &CandidateEvent> {
        self.events
            .iter()
            .filter(|e| e.relevance_label == RelevanceLabel::Relevant)
    }

    /// Directory holding this collection's downloaded images.
    #[must_use]
    pub fn images_dir(&self) -> PathBuf {
        self.dir.join("images")
    }
}

fn read_events(path: &Path) -> Result<Vec<CandidateEvent>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    serde_json::from_str(&content).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serializes fully in memory, writes to a same-directory temp file, then
/// renames over the target. Readers either see the old document or the new
/// one, never a truncated write.
fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.json".to_owned());
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp_path, &json).map_err(|e| StoreError::Io {
        path: tmp_path.clone(),
        source: e,
    })?;
    fs::rename(&tmp_path, path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_parse_recognizes_long_lived_names() {
        assert_eq!(CollectionBucket::parse("evergreen"), CollectionBucket::Evergreen);
        assert_eq!(
            CollectionBucket::parse("non-evergreen"),
            CollectionBucket::NonEvergreen
        );
        assert_eq!(
            CollectionBucket::parse("non_evergreen"),
            CollectionBucket::NonEvergreen
        );
    }

    #[test]
    fn bucket_parse_treats_everything_else_as_run_folder() {
        assert_eq!(
            CollectionBucket::parse("20250701_081500"),
            CollectionBucket::Run("20250701_081500".to_owned())
        );
    }

    #[test]
    fn bucket_dir_is_under_the_events_root() {
        let root = Path::new("/data/events_output");
        assert_eq!(
            CollectionBucket::Evergreen.dir(root),
            PathBuf::from("/data/events_output/evergreen")
        );
        assert_eq!(
            CollectionBucket::parse("20250701_081500").dir(root),
            PathBuf::from("/data/events_output/20250701_081500")
        );
    }
}
