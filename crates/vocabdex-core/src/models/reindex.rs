use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use super::term::TermId;

#[derive(Debug, Clone, Default)]
pub struct ReindexOptions {
    /// Resume after this term id (exclusive).
    pub start_after: Option<TermId>,
    /// Checked between terms; once set, the batch stops before the next term.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ReindexOptions {
    #[must_use]
    pub fn resume_after(term_id: TermId) -> Self {
        Self {
            start_after: Some(term_id),
            cancel: None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexFailure {
    pub term_id: TermId,
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexReport {
    pub rebuilt: usize,
    pub words_written: usize,
    pub failed: Vec<ReindexFailure>,
    /// Highest term id processed, successfully or not; pass it back as `start_after` to resume.
    pub last_completed: Option<TermId>,
    pub interrupted: bool,
}
