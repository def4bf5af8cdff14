use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{NameId, SearchHit, TermId};
use crate::store::WordCandidate;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct RankedTerm {
    pub(super) term_id: TermId,
    pub(super) rank: f64,
    pub(super) name_id: NameId,
    pub(super) word: String,
}

impl RankedTerm {
    pub(super) fn into_hit(self) -> SearchHit {
        SearchHit {
            term_id: self.term_id,
            matched_name_id: self.name_id,
            matched_word: self.word,
            rank: self.rank,
        }
    }

    /// Heavier word wins; equal weights fall back to the older name, then the word text.
    fn improves_on(&self, other: &Self) -> bool {
        self.rank
            .partial_cmp(&other.rank)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.name_id.cmp(&self.name_id))
            .then_with(|| other.word.cmp(&self.word))
            == Ordering::Greater
    }
}

pub(super) fn rank_ordering(a: &RankedTerm, b: &RankedTerm) -> Ordering {
    b.rank
        .partial_cmp(&a.rank)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.term_id.cmp(&b.term_id))
}

#[derive(Debug)]
struct TermMatches {
    satisfied: Vec<bool>,
    best: RankedTerm,
}

/// Folds per-query-word candidates into one best word per term, keeping only terms where every
/// query word matched.
#[derive(Debug)]
pub(super) struct RankAccumulator {
    query_words: usize,
    terms: BTreeMap<TermId, TermMatches>,
}

impl RankAccumulator {
    pub(super) fn new(query_words: usize) -> Self {
        Self {
            query_words,
            terms: BTreeMap::new(),
        }
    }

    pub(super) fn add(&mut self, word_index: usize, candidate: WordCandidate) {
        let ranked = RankedTerm {
            term_id: candidate.term_id,
            rank: candidate.weight,
            name_id: candidate.name_id,
            word: candidate.word,
        };
        let query_words = self.query_words;
        let entry = self
            .terms
            .entry(candidate.term_id)
            .or_insert_with(|| TermMatches {
                satisfied: vec![false; query_words],
                best: ranked.clone(),
            });
        if let Some(slot) = entry.satisfied.get_mut(word_index) {
            *slot = true;
        }
        if ranked.improves_on(&entry.best) {
            entry.best = ranked;
        }
    }

    pub(super) fn into_ranked(self) -> Vec<RankedTerm> {
        let mut out = self
            .terms
            .into_values()
            .filter(|matches| matches.satisfied.iter().all(|hit| *hit))
            .map(|matches| matches.best)
            .collect::<Vec<_>>();
        out.sort_by(rank_ordering);
        out
    }
}
