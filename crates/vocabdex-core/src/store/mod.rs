use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rusqlite::types::Type;

use crate::error::{Result, VocabError};
use crate::index::TermSource;
use crate::locale::Locale;
use crate::models::{NameType, Term, TermId, Word};

mod migration;
mod search;
mod terms;
mod words;

pub(crate) use search::{WordCandidate, find_word_candidates};
pub(crate) use terms::{
    delete_term, insert_name, insert_term, list_answers, list_members, list_questions,
    list_term_ids_after, load_name, replace_answers, replace_members, set_name_voided,
    set_term_voided, term_exists, touch_term, update_name,
};
pub(crate) use words::list_words;

/// SQLite record store for terms, their names and the derived word index.
///
/// One connection behind a mutex: every writer is serialized, which also serializes concurrent
/// rebuilds of the same term.
#[derive(Clone)]
pub struct SqliteTermStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteTermStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTermStore").finish_non_exhaustive()
    }
}

impl SqliteTermStore {
    pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| VocabError::mutex_poisoned("sqlite"))?;
        f(&conn)
    }

    /// Runs `f` in one transaction; any error rolls back everything `f` wrote.
    pub(crate) fn with_tx<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| VocabError::mutex_poisoned("sqlite"))?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        drop(conn);
        Ok(value)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        #[cfg(unix)]
        harden_sqlite_permissions(path)?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(Connection::open_in_memory()?)),
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn get_term(&self, term_id: TermId) -> Result<Option<Term>> {
        self.with_conn(|conn| conn.get_term(term_id))
    }

    pub fn words_for(&self, term_id: TermId) -> Result<Vec<Word>> {
        self.with_conn(|conn| list_words(conn, term_id))
    }

    pub fn term_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM terms", [], |row| {
                row.get::<_, i64>(0)
            })?;
            Ok(i64_to_usize_saturating(count))
        })
    }
}

pub(crate) fn parse_locale_column(idx: usize, raw: &str) -> rusqlite::Result<Locale> {
    Locale::parse(raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

pub(crate) fn parse_name_type_column(idx: usize, raw: &str) -> rusqlite::Result<NameType> {
    raw.parse::<NameType>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

pub(crate) const fn bool_to_i64(value: bool) -> i64 {
    if value { 1 } else { 0 }
}

pub(crate) fn usize_to_i64_saturating(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn i64_to_usize_saturating(value: i64) -> usize {
    if value <= 0 {
        0
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

#[cfg(unix)]
fn harden_sqlite_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    for suffix in ["", "-wal", "-shm"] {
        let mut os = path.as_os_str().to_os_string();
        os.push(suffix);
        let candidate = PathBuf::from(os);
        if candidate.exists() {
            std::fs::set_permissions(candidate, std::fs::Permissions::from_mode(0o600))?;
        }
    }
    Ok(())
}
