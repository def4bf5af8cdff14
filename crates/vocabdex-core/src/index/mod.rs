//! Derived word index over term names.
//!
//! Words are a rebuildable cache: after any successful [`rebuild_index`] the words stored for a
//! term are exactly the tokenization of its live names.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, VocabError};
use crate::models::{Term, TermId, TermName, Word};
use crate::text::Tokenizer;

mod weight;

pub use weight::{NamePrecedence, format_weight, word_weight};

use weight::{NameShape, weigh};

/// Read side of the record store, seen from inside the caller's transaction.
pub trait TermSource {
    fn get_term(&self, term_id: TermId) -> Result<Option<Term>>;
    fn get_live_names(&self, term_id: TermId) -> Result<Vec<TermName>>;
}

/// Write side of the word index. Each call must be atomic for its term.
pub trait WordStore {
    fn replace_words(&self, term_id: TermId, words: &[Word]) -> Result<()>;
    fn delete_words(&self, term_id: TermId) -> Result<usize>;
}

/// Tokenizes and weighs every live name. Pure and total; voided names contribute nothing and a
/// word repeated inside one name is kept once, at its first position.
#[must_use]
pub fn build_words(term_id: TermId, names: &[TermName], tokenizer: &Tokenizer) -> Vec<Word> {
    let mut words = Vec::new();
    for name in names.iter().filter(|name| !name.voided) {
        let tokens = tokenizer.tokenize(&name.text);
        let shape = NameShape::new(
            NamePrecedence::of(name.name_type, name.locale_preferred),
            &tokens,
        );
        let mut seen = HashSet::new();
        for token in &tokens {
            if !seen.insert(token.text.as_str()) {
                continue;
            }
            words.push(Word {
                term_id,
                name_id: name.id,
                word: token.text.clone(),
                locale: name.locale.clone(),
                position: token.position,
                weight: weigh(token, shape),
            });
        }
    }
    words.sort_by(|a, b| {
        a.name_id
            .cmp(&b.name_id)
            .then_with(|| a.position.cmp(&b.position))
    });
    words
}

/// Replaces the stored words of `term_id` with a fresh build from its live names.
///
/// A term that no longer exists yields `NotFound` and writes nothing.
pub fn rebuild_index<S>(store: &S, tokenizer: &Tokenizer, term_id: TermId) -> Result<usize>
where
    S: TermSource + WordStore + ?Sized,
{
    if store.get_term(term_id)?.is_none() {
        return Err(VocabError::NotFound(format!("term {term_id}")));
    }
    let names = store.get_live_names(term_id)?;
    let words = build_words(term_id, &names, tokenizer);
    store.replace_words(term_id, &words)?;
    let top_weight = words.iter().map(|word| word.weight).fold(0.0, f64::max);
    debug!(
        term_id = term_id.0,
        names = names.len(),
        words = words.len(),
        top_weight = %format_weight(top_weight),
        "rebuilt term index"
    );
    Ok(words.len())
}

/// Drops every stored word of a purged term.
pub fn remove_index<S>(store: &S, term_id: TermId) -> Result<usize>
where
    S: WordStore + ?Sized,
{
    let removed = store.delete_words(term_id)?;
    debug!(term_id = term_id.0, removed, "removed term index");
    Ok(removed)
}
