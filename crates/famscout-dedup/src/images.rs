//! Image cleanup for dropped duplicates.
//!
//! Deletion goes through the [`ImageStore`] capability so tests can record
//! instead of touching the filesystem. Callers must only invoke
//! [`cleanup_dropped_images`] after the drop decision is durable — never
//! before, or a candidate a later step decides to keep loses its images.

use std::io;
use std::path::Path;

use famscout_core::CandidateEvent;

/// Deletion capability provided by the image-storage collaborator.
pub trait ImageStore {
    /// Deletes the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the file exists but cannot be removed.
    fn delete(&self, path: &Path) -> io::Result<()>;
}

/// Filesystem-backed image store. A missing file is not an error — the
/// image may never have been downloaded, or a previous cleanup already
/// removed it.
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn delete(&self, path: &Path) -> io::Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "image already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Deletes the locally stored images of every dropped candidate.
///
/// Individual failures are logged and skipped — a stray undeletable file
/// must not abort the batch. Returns the number of images deleted.
pub fn cleanup_dropped_images(dropped: &[CandidateEvent], store: &dyn ImageStore) -> usize {
    let mut deleted = 0usize;
    for event in dropped {
        for image in &event.images {
            let Some(path) = image.local_path.as_deref() else {
                continue;
            };
            match store.delete(path) {
                Ok(()) => deleted += 1,
                Err(e) => {
                    tracing::warn!(
                        event = %event.fingerprint(),
                        path = %path.display(),
                        error = %e,
                        "failed to delete image of dropped duplicate"
                    );
                }
            }
        }
    }
    deleted
}
