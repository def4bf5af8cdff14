use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, VocabError};

mod env;
mod indexing;
mod search;

pub use indexing::IndexingConfig;
pub use search::SearchConfig;

use env::EnvLookup;
use indexing::IndexingFile;
use search::SearchFile;

/// Optional settings file inside the data root.
pub const CONFIG_FILE_NAME: &str = "vocabdex.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub indexing: IndexingConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    indexing: IndexingFile,
    search: SearchFile,
}

impl AppConfig {
    /// Defaults, then `<root>/vocabdex.toml` when present, then `VOCABDEX_*` variables.
    pub fn load(root: &Path) -> Result<Self> {
        Self::resolve(Some(&root.join(CONFIG_FILE_NAME)), &env::process_env)
    }

    fn resolve(file_path: Option<&Path>, lookup: EnvLookup<'_>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = file_path
            && path.exists()
        {
            let raw = std::fs::read_to_string(path)?;
            config.apply_file(toml::from_str(&raw)?)?;
        }
        config.indexing.apply_env(lookup);
        config.search.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<()> {
        self.indexing.apply_file(file.indexing);
        self.search.apply_file(file.search)
    }

    pub fn validate(&self) -> Result<()> {
        if self.indexing.reindex_batch_size == 0 {
            return Err(VocabError::Validation(
                "indexing reindex_batch_size must be at least 1".to_string(),
            ));
        }
        self.search.validate()
    }
}
