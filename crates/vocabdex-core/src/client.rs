use std::fs;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::error::Result;
use crate::store::SqliteTermStore;
use crate::text::Tokenizer;

mod reindex_service;
mod search_service;
mod term_service;

/// Database file created inside the data root.
pub const DATABASE_FILE_NAME: &str = "vocabdex.sqlite3";

/// Terminology dictionary with its synchronously maintained word index.
///
/// Every record mutation rebuilds the affected term's words inside the same transaction, so a
/// committed change is visible to the next search.
#[derive(Clone)]
pub struct Vocabulary {
    pub store: SqliteTermStore,
    config: AppConfig,
    tokenizer: Tokenizer,
}

impl std::fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vocabulary").finish_non_exhaustive()
    }
}

impl Vocabulary {
    /// Opens (or creates) the dictionary stored under `root_dir`, reading `vocabdex.toml` and
    /// `VOCABDEX_*` overrides.
    pub fn new(root_dir: impl Into<PathBuf>) -> Result<Self> {
        let root = root_dir.into();
        fs::create_dir_all(&root)?;
        let config = AppConfig::load(&root)?;
        let store = SqliteTermStore::open(root.join(DATABASE_FILE_NAME))?;
        Self::with_store(store, config)
    }

    pub fn open_in_memory(config: AppConfig) -> Result<Self> {
        Self::with_store(SqliteTermStore::open_in_memory()?, config)
    }

    pub fn with_store(store: SqliteTermStore, config: AppConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = config.indexing.tokenizer();
        Ok(Self {
            store,
            config,
            tokenizer,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

#[cfg(test)]
mod tests;
