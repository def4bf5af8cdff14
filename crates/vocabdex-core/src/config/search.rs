use serde::Deserialize;

use crate::error::{Result, VocabError};
use crate::models::MatchMode;

use super::env::{EnvLookup, read_env_usize, read_non_empty_env};

const ENV_DEFAULT_LIMIT: &str = "VOCABDEX_SEARCH_DEFAULT_LIMIT";
const ENV_MAX_LIMIT: &str = "VOCABDEX_SEARCH_MAX_LIMIT";
const ENV_MAX_PHRASE_CHARS: &str = "VOCABDEX_SEARCH_MAX_PHRASE_CHARS";
const ENV_MATCH_MODE: &str = "VOCABDEX_MATCH_MODE";

const DEFAULT_LIMIT: usize = 20;
const DEFAULT_MAX_LIMIT: usize = 500;
const DEFAULT_MAX_PHRASE_CHARS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    pub max_phrase_chars: usize,
    pub match_mode: MatchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            max_phrase_chars: DEFAULT_MAX_PHRASE_CHARS,
            match_mode: MatchMode::Start,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct SearchFile {
    pub(super) default_limit: Option<usize>,
    pub(super) max_limit: Option<usize>,
    pub(super) max_phrase_chars: Option<usize>,
    pub(super) match_mode: Option<String>,
}

impl SearchConfig {
    pub(super) fn apply_file(&mut self, file: SearchFile) -> Result<()> {
        if let Some(limit) = file.default_limit {
            self.default_limit = limit;
        }
        if let Some(limit) = file.max_limit {
            self.max_limit = limit;
        }
        if let Some(chars) = file.max_phrase_chars {
            self.max_phrase_chars = chars;
        }
        if let Some(raw) = file.match_mode {
            self.match_mode = parse_match_mode("search.match_mode", &raw)?;
        }
        Ok(())
    }

    pub(super) fn apply_env(&mut self, lookup: EnvLookup<'_>) -> Result<()> {
        self.default_limit = read_env_usize(lookup, ENV_DEFAULT_LIMIT, self.default_limit, 1);
        self.max_limit = read_env_usize(lookup, ENV_MAX_LIMIT, self.max_limit, 1);
        self.max_phrase_chars =
            read_env_usize(lookup, ENV_MAX_PHRASE_CHARS, self.max_phrase_chars, 1);
        if let Some(raw) = read_non_empty_env(lookup, ENV_MATCH_MODE) {
            self.match_mode = parse_match_mode(ENV_MATCH_MODE, &raw)?;
        }
        Ok(())
    }

    pub(super) fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 || self.max_phrase_chars == 0 {
            return Err(VocabError::Validation(
                "search limits must be at least 1".to_string(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(VocabError::Validation(format!(
                "search default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

fn parse_match_mode(source: &str, raw: &str) -> Result<MatchMode> {
    raw.parse::<MatchMode>().map_err(|_| {
        VocabError::Validation(format!(
            "invalid {source}: {} (expected start|anywhere|exact)",
            raw.trim()
        ))
    })
}
