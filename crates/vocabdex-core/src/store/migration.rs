use rusqlite::Connection;

use crate::error::{Result, VocabError};

use super::SqliteTermStore;

const MIGRATION_SCHEMA_SQL: &str = r"
    PRAGMA journal_mode = WAL;
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS terms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        uuid TEXT NOT NULL UNIQUE,
        class_id INTEGER NOT NULL,
        datatype_id INTEGER NOT NULL,
        voided INTEGER NOT NULL DEFAULT 0,
        void_reason TEXT,
        date_created TEXT NOT NULL,
        date_changed TEXT
    );

    CREATE TABLE IF NOT EXISTS term_names (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        text TEXT NOT NULL,
        locale TEXT NOT NULL,
        name_type TEXT NOT NULL,
        locale_preferred INTEGER NOT NULL DEFAULT 0,
        voided INTEGER NOT NULL DEFAULT 0,
        void_reason TEXT,
        date_created TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_term_names_term
    ON term_names(term_id);

    CREATE TABLE IF NOT EXISTS term_answers (
        question_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        answer_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        sort_weight INTEGER NOT NULL,
        PRIMARY KEY (question_id, answer_id)
    );

    CREATE INDEX IF NOT EXISTS idx_term_answers_answer
    ON term_answers(answer_id);

    CREATE TABLE IF NOT EXISTS term_set_members (
        set_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        member_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        sort_weight INTEGER NOT NULL,
        PRIMARY KEY (set_id, member_id)
    );

    CREATE TABLE IF NOT EXISTS term_words (
        term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
        name_id INTEGER NOT NULL REFERENCES term_names(id) ON DELETE CASCADE,
        word TEXT NOT NULL,
        locale TEXT NOT NULL,
        position INTEGER NOT NULL,
        weight REAL NOT NULL,
        PRIMARY KEY (name_id, word)
    );

    CREATE INDEX IF NOT EXISTS idx_term_words_word
    ON term_words(word);

    CREATE INDEX IF NOT EXISTS idx_term_words_term
    ON term_words(term_id);
";

impl SqliteTermStore {
    pub fn migrate(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(MIGRATION_SCHEMA_SQL)?;
            ensure_required_column(
                conn,
                "term_names",
                "locale_preferred",
                "unsupported term_names schema: locale_preferred is missing; rebuild the vocabulary database",
            )?;
            ensure_required_column(
                conn,
                "term_words",
                "weight",
                "unsupported term_words schema: weight is missing; rebuild the vocabulary database",
            )?;
            ensure_required_column(
                conn,
                "term_words",
                "position",
                "unsupported term_words schema: position is missing; rebuild the vocabulary database",
            )?;
            Ok(())
        })
    }
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for row in rows {
        if row? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn ensure_required_column(
    conn: &Connection,
    table: &str,
    column: &str,
    error_message: &'static str,
) -> Result<()> {
    if has_column(conn, table, column)? {
        Ok(())
    } else {
        Err(VocabError::Validation(error_message.to_string()))
    }
}
