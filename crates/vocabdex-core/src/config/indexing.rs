use serde::Deserialize;

use crate::text::{DEFAULT_PUNCTUATION, DEFAULT_STOP_WORDS, Tokenizer};

use super::env::{EnvLookup, read_env_list, read_env_usize, read_non_empty_env};

const ENV_PUNCTUATION: &str = "VOCABDEX_PUNCTUATION";
const ENV_STOP_WORDS: &str = "VOCABDEX_STOP_WORDS";
const ENV_REINDEX_BATCH_SIZE: &str = "VOCABDEX_REINDEX_BATCH_SIZE";

const DEFAULT_REINDEX_BATCH_SIZE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingConfig {
    /// Characters that separate words in addition to whitespace.
    pub punctuation: String,
    pub stop_words: Vec<String>,
    /// Term ids fetched per page while reindexing everything.
    pub reindex_batch_size: usize,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            punctuation: DEFAULT_PUNCTUATION.to_string(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(ToString::to_string).collect(),
            reindex_batch_size: DEFAULT_REINDEX_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct IndexingFile {
    pub(super) punctuation: Option<String>,
    pub(super) stop_words: Option<Vec<String>>,
    pub(super) reindex_batch_size: Option<usize>,
}

impl IndexingConfig {
    #[must_use]
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(&self.punctuation, &self.stop_words)
    }

    pub(super) fn apply_file(&mut self, file: IndexingFile) {
        if let Some(punctuation) = file.punctuation {
            self.punctuation = punctuation;
        }
        if let Some(stop_words) = file.stop_words {
            self.stop_words = stop_words;
        }
        if let Some(batch_size) = file.reindex_batch_size {
            self.reindex_batch_size = batch_size;
        }
    }

    pub(super) fn apply_env(&mut self, lookup: EnvLookup<'_>) {
        if let Some(punctuation) = read_non_empty_env(lookup, ENV_PUNCTUATION) {
            self.punctuation = punctuation;
        }
        if let Some(stop_words) = read_env_list(lookup, ENV_STOP_WORDS) {
            self.stop_words = stop_words;
        }
        self.reindex_batch_size =
            read_env_usize(lookup, ENV_REINDEX_BATCH_SIZE, self.reindex_batch_size, 1);
    }
}
