//! Phrase search over the word index.

use rusqlite::Connection;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{Result, VocabError};
use crate::locale::Locale;
use crate::models::{SearchPage, SearchRequest};
use crate::store::{find_word_candidates, list_answers, term_exists};
use crate::text::Tokenizer;

mod filter;
mod pattern;
mod rank;

pub(crate) use pattern::WordPattern;

use filter::StructuralFilter;
use pattern::{is_wildcard_only, word_pattern};
use rank::RankAccumulator;

/// Ranks terms whose live words satisfy every query word of the phrase.
///
/// A phrase with no words yields an empty page. Limits outside `1..=max_limit` and phrases longer
/// than `max_phrase_chars` are rejected.
pub(crate) fn search(
    conn: &Connection,
    tokenizer: &Tokenizer,
    config: &SearchConfig,
    request: &SearchRequest,
) -> Result<SearchPage> {
    let (offset, limit) = resolve_page(request, config)?;
    if request.phrase.chars().count() > config.max_phrase_chars {
        return Err(VocabError::Validation(format!(
            "search phrase exceeds {} characters",
            config.max_phrase_chars
        )));
    }

    let words = query_words(tokenizer, request)?;
    if words.is_empty() {
        return Ok(SearchPage::empty(offset, limit));
    }

    let mode = request.match_mode.unwrap_or(config.match_mode);
    let answers = request
        .answer_to
        .map(|question| {
            if !term_exists(conn, question)? {
                return Err(VocabError::NotFound(format!("question term {question}")));
            }
            list_answers(conn, question)
        })
        .transpose()?;
    let filter = StructuralFilter::new(request, answers);

    let mut accumulator = RankAccumulator::new(words.len());
    let mut candidate_count = 0_usize;
    for (index, word) in words.iter().enumerate() {
        let pattern = word_pattern(word, mode, request.wildcards);
        for candidate in find_word_candidates(conn, &pattern, request.include_voided)? {
            candidate_count += 1;
            if Locale::any_accepts(&request.locales, &candidate.locale)
                && filter.accepts(&candidate)
            {
                accumulator.add(index, candidate);
            }
        }
    }

    let ranked = accumulator.into_ranked();
    let total = ranked.len();
    debug!(
        words = words.len(),
        candidates = candidate_count,
        matched = total,
        match_mode = mode.as_str(),
        "search evaluated"
    );

    Ok(SearchPage {
        hits: ranked
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(rank::RankedTerm::into_hit)
            .collect(),
        total,
        offset,
        limit,
    })
}

fn resolve_page(request: &SearchRequest, config: &SearchConfig) -> Result<(usize, usize)> {
    let Some(page) = request.page else {
        return Ok((0, config.default_limit));
    };
    if page.limit == 0 || page.limit > config.max_limit {
        return Err(VocabError::Validation(format!(
            "page limit must be between 1 and {}",
            config.max_limit
        )));
    }
    Ok((page.offset, page.limit))
}

/// Wildcard-only words match everything and are dropped; a phrase made only of them is
/// rejected.
fn query_words(tokenizer: &Tokenizer, request: &SearchRequest) -> Result<Vec<String>> {
    let words = tokenizer.query_words(&request.phrase);
    if words.is_empty() {
        return Ok(words);
    }
    let constraining = words
        .into_iter()
        .filter(|word| !is_wildcard_only(word, request.wildcards))
        .collect::<Vec<_>>();
    if constraining.is_empty() {
        return Err(VocabError::Validation(
            "search phrase contains only wildcards".to_string(),
        ));
    }
    Ok(constraining)
}
