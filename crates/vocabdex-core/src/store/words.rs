use rusqlite::{Connection, params};
use tracing::warn;

use crate::error::Result;
use crate::index::WordStore;
use crate::models::{NameId, TermId, Word};

use super::{i64_to_usize_saturating, parse_locale_column, usize_to_i64_saturating};

impl WordStore for Connection {
    /// Delete and insert run under one savepoint, so a failed insert restores the previous
    /// words even when the caller holds no transaction of its own.
    fn replace_words(&self, term_id: TermId, words: &[Word]) -> Result<()> {
        self.execute_batch("SAVEPOINT replace_words")?;
        match write_words(self, term_id, words) {
            Ok(()) => {
                self.execute_batch("RELEASE replace_words")?;
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) =
                    self.execute_batch("ROLLBACK TO replace_words; RELEASE replace_words")
                {
                    warn!(term_id = term_id.0, error = %rollback_err, "word savepoint rollback failed");
                }
                Err(err)
            }
        }
    }

    fn delete_words(&self, term_id: TermId) -> Result<usize> {
        let removed = self.execute("DELETE FROM term_words WHERE term_id = ?1", params![term_id.0])?;
        Ok(removed)
    }
}

fn write_words(conn: &Connection, term_id: TermId, words: &[Word]) -> Result<()> {
    conn.execute("DELETE FROM term_words WHERE term_id = ?1", params![term_id.0])?;
    let mut stmt = conn.prepare(
        r"
        INSERT INTO term_words(term_id, name_id, word, locale, position, weight)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ",
    )?;
    for word in words {
        stmt.execute(params![
            term_id.0,
            word.name_id.0,
            word.word,
            word.locale.to_string(),
            usize_to_i64_saturating(word.position),
            word.weight,
        ])?;
    }
    Ok(())
}

pub(crate) fn list_words(conn: &Connection, term_id: TermId) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(
        r"
        SELECT term_id, name_id, word, locale, position, weight
        FROM term_words
        WHERE term_id = ?1
        ORDER BY name_id ASC, position ASC
        ",
    )?;
    let rows = stmt.query_map(params![term_id.0], |row| {
        let locale_raw = row.get::<_, String>(3)?;
        Ok(Word {
            term_id: TermId(row.get(0)?),
            name_id: NameId(row.get(1)?),
            word: row.get(2)?,
            locale: parse_locale_column(3, &locale_raw)?,
            position: i64_to_usize_saturating(row.get::<_, i64>(4)?),
            weight: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
