use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabError};
use crate::locale::Locale;

use super::term::{ClassId, DatatypeId, NameId, TermId};

/// How one query word is compared against indexed words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Indexed word begins with the query word.
    #[default]
    Start,
    /// Query word occurs anywhere inside the indexed word.
    Anywhere,
    /// Indexed word equals the query word.
    Exact,
}

impl MatchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Anywhere => "anywhere",
            Self::Exact => "exact",
        }
    }
}

impl Display for MatchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "prefix" => Ok(Self::Start),
            "anywhere" | "substring" => Ok(Self::Anywhere),
            "exact" => Ok(Self::Exact),
            other => Err(VocabError::Validation(format!(
                "invalid match mode: {other} (expected start|anywhere|exact)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub phrase: String,
    /// Empty means any locale.
    #[serde(default)]
    pub locales: Vec<Locale>,
    #[serde(default)]
    pub include_voided: bool,
    #[serde(default)]
    pub class_filters: Vec<ClassId>,
    #[serde(default)]
    pub exclude_classes: Vec<ClassId>,
    #[serde(default)]
    pub datatype_filters: Vec<DatatypeId>,
    #[serde(default)]
    pub exclude_datatypes: Vec<DatatypeId>,
    #[serde(default)]
    pub answer_to: Option<TermId>,
    /// Falls back to the configured default match mode when absent.
    #[serde(default)]
    pub match_mode: Option<MatchMode>,
    /// Treat `*` in the phrase as a deliberate wildcard.
    #[serde(default)]
    pub wildcards: bool,
    #[serde(default)]
    pub page: Option<PageRequest>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            ..Self::default()
        }
    }

    /// Parses caller-supplied locale tags, rejecting the request on the first bad tag.
    pub fn with_locale_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Result<Self> {
        self.locales = tags
            .iter()
            .map(|tag| Locale::parse(tag.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub term_id: TermId,
    pub matched_name_id: NameId,
    pub matched_word: String,
    pub rank: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    /// Size of the filtered, ranked result before pagination.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

impl SearchPage {
    #[must_use]
    pub const fn empty(offset: usize, limit: usize) -> Self {
        Self {
            hits: Vec::new(),
            total: 0,
            offset,
            limit,
        }
    }
}
