use rusqlite::{Connection, params};

use crate::error::Result;
use crate::locale::Locale;
use crate::models::{ClassId, DatatypeId, NameId, TermId};
use crate::query::WordPattern;

use super::{bool_to_i64, parse_locale_column};

const CANDIDATES_EQUAL_SQL: &str = r"
    SELECT w.term_id, w.name_id, w.word, w.locale, w.weight, t.class_id, t.datatype_id
    FROM term_words w
    JOIN terms t ON t.id = w.term_id
    WHERE w.word = ?1
      AND (?2 = 1 OR t.voided = 0)
";

const CANDIDATES_LIKE_SQL: &str = r"
    SELECT w.term_id, w.name_id, w.word, w.locale, w.weight, t.class_id, t.datatype_id
    FROM term_words w
    JOIN terms t ON t.id = w.term_id
    WHERE w.word LIKE ?1 ESCAPE '\'
      AND (?2 = 1 OR t.voided = 0)
";

/// One indexed word that matched one query word, with the term facts the filters need.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WordCandidate {
    pub(crate) term_id: TermId,
    pub(crate) name_id: NameId,
    pub(crate) word: String,
    pub(crate) locale: Locale,
    pub(crate) weight: f64,
    pub(crate) class_id: ClassId,
    pub(crate) datatype_id: DatatypeId,
}

pub(crate) fn find_word_candidates(
    conn: &Connection,
    pattern: &WordPattern,
    include_voided: bool,
) -> Result<Vec<WordCandidate>> {
    let (sql, value) = match pattern {
        WordPattern::Equals(word) => (CANDIDATES_EQUAL_SQL, word.as_str()),
        WordPattern::Like(like) => (CANDIDATES_LIKE_SQL, like.as_str()),
    };
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params![value, bool_to_i64(include_voided)], |row| {
        let locale_raw = row.get::<_, String>(3)?;
        Ok(WordCandidate {
            term_id: TermId(row.get(0)?),
            name_id: NameId(row.get(1)?),
            word: row.get(2)?,
            locale: parse_locale_column(3, &locale_raw)?,
            weight: row.get(4)?,
            class_id: ClassId(row.get(5)?),
            datatype_id: DatatypeId(row.get(6)?),
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
