use tracing::{info, warn};

use crate::error::Result;
use crate::index::rebuild_index;
use crate::models::{ReindexFailure, ReindexOptions, ReindexReport, TermId};
use crate::store::list_term_ids_after;

use super::Vocabulary;

impl Vocabulary {
    /// Rebuilds one term's words in its own transaction.
    pub fn reindex_term(&self, term_id: TermId) -> Result<usize> {
        self.store
            .with_tx(|conn| rebuild_index(conn, &self.tokenizer, term_id))
    }

    /// Rebuilds every term in ascending id order, one transaction per term.
    ///
    /// A failing term is recorded and skipped. Cancellation is honoured between terms; the
    /// report's `last_completed` is the resume point.
    pub fn reindex_all(&self, options: &ReindexOptions) -> Result<ReindexReport> {
        let batch_size = self.config.indexing.reindex_batch_size.max(1);
        let mut report = ReindexReport::default();
        let mut cursor = options.start_after;

        'pages: loop {
            let page = self
                .store
                .with_conn(|conn| list_term_ids_after(conn, cursor, batch_size))?;
            if page.is_empty() {
                break;
            }
            for term_id in page {
                if options.is_cancelled() {
                    report.interrupted = true;
                    break 'pages;
                }
                match self.reindex_term(term_id) {
                    Ok(words) => {
                        report.rebuilt += 1;
                        report.words_written += words;
                    }
                    Err(err) => {
                        warn!(
                            term_id = term_id.0,
                            code = err.code(),
                            error = %err,
                            "term reindex failed"
                        );
                        report.failed.push(ReindexFailure {
                            term_id,
                            code: err.code().to_string(),
                            message: err.to_string(),
                            retryable: err.is_retryable(),
                        });
                    }
                }
                report.last_completed = Some(term_id);
                cursor = Some(term_id);
            }
        }

        info!(
            rebuilt = report.rebuilt,
            failed = report.failed.len(),
            words = report.words_written,
            interrupted = report.interrupted,
            last_completed = report.last_completed.map(|id| id.0),
            "reindex batch finished"
        );
        Ok(report)
    }
}
