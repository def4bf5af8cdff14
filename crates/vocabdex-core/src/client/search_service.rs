use tracing::debug;

use crate::error::Result;
use crate::models::{SearchPage, SearchRequest, TermId};
use crate::query;
use crate::text::truncate_text;

use super::Vocabulary;

const LOG_PHRASE_MAX_CHARS: usize = 64;

impl Vocabulary {
    pub fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let page = self.store.with_conn(|conn| {
            query::search(conn, &self.tokenizer, &self.config.search, request)
        })?;
        debug!(
            phrase = %truncate_text(&request.phrase, LOG_PHRASE_MAX_CHARS),
            locales = request.locales.len(),
            total = page.total,
            returned = page.hits.len(),
            "search completed"
        );
        Ok(page)
    }

    /// Searches only among the coded answers of `question`.
    pub fn search_answers(&self, question: TermId, request: &SearchRequest) -> Result<SearchPage> {
        let mut scoped = request.clone();
        scoped.answer_to = Some(question);
        self.search(&scoped)
    }
}
