// Append-only record of words the matcher could not resolve, kept for human
// review.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::types::UnresolvedReason;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEntry {
    pub word: String,
    /// The stem that was looked up last, or the word itself.
    pub stem: String,
    pub reason: UnresolvedReason,
}

/// Thread-safe unresolved-word log. Shared matchers append to it concurrently.
#[derive(Debug, Default)]
pub struct UnresolvedLog {
    entries: Mutex<Vec<UnresolvedEntry>>,
}

impl UnresolvedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, word: &str, stem: &str, reason: UnresolvedReason) {
        log::warn!("unresolved {word:?} (stem {stem:?}): {reason}");
        self.lock().push(UnresolvedEntry {
            word: word.to_string(),
            stem: stem.to_string(),
            reason,
        });
    }

    /// Snapshot of everything recorded so far, in order.
    pub fn entries(&self) -> Vec<UnresolvedEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return all entries.
    pub fn take(&self) -> Vec<UnresolvedEntry> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave a half-pushed entry, so a
    // poisoned log is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<UnresolvedEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
