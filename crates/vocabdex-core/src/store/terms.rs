use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;
use crate::index::TermSource;
use crate::models::{ClassId, DatatypeId, NameDraft, NameId, Term, TermId, TermName};

use super::{bool_to_i64, parse_locale_column, parse_name_type_column, usize_to_i64_saturating};

const NAME_COLUMNS: &str = r"
    id, term_id, text, locale, name_type, locale_preferred, voided, void_reason, date_created
";

pub(crate) fn insert_term(
    conn: &Connection,
    uuid: &str,
    class_id: ClassId,
    datatype_id: DatatypeId,
) -> Result<TermId> {
    conn.execute(
        r"
        INSERT INTO terms(uuid, class_id, datatype_id, voided, date_created)
        VALUES (?1, ?2, ?3, 0, ?4)
        ",
        params![uuid, class_id.0, datatype_id.0, Utc::now().to_rfc3339()],
    )?;
    Ok(TermId(conn.last_insert_rowid()))
}

pub(crate) fn insert_name(conn: &Connection, term_id: TermId, draft: &NameDraft) -> Result<NameId> {
    conn.execute(
        r"
        INSERT INTO term_names(
            term_id, text, locale, name_type, locale_preferred, voided, date_created
        )
        VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
        ",
        params![
            term_id.0,
            draft.text.trim(),
            draft.locale.to_string(),
            draft.name_type.as_str(),
            bool_to_i64(draft.locale_preferred),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(NameId(conn.last_insert_rowid()))
}

pub(crate) fn update_name(conn: &Connection, name_id: NameId, draft: &NameDraft) -> Result<()> {
    conn.execute(
        r"
        UPDATE term_names
        SET text = ?2, locale = ?3, name_type = ?4, locale_preferred = ?5
        WHERE id = ?1
        ",
        params![
            name_id.0,
            draft.text.trim(),
            draft.locale.to_string(),
            draft.name_type.as_str(),
            bool_to_i64(draft.locale_preferred),
        ],
    )?;
    Ok(())
}

/// `Some(reason)` voids the name, `None` restores it.
pub(crate) fn set_name_voided(conn: &Connection, name_id: NameId, reason: Option<&str>) -> Result<()> {
    conn.execute(
        "UPDATE term_names SET voided = ?2, void_reason = ?3 WHERE id = ?1",
        params![name_id.0, bool_to_i64(reason.is_some()), reason],
    )?;
    Ok(())
}

/// `Some(reason)` retires the term, `None` restores it.
pub(crate) fn set_term_voided(conn: &Connection, term_id: TermId, reason: Option<&str>) -> Result<()> {
    conn.execute(
        r"
        UPDATE terms
        SET voided = ?2, void_reason = ?3, date_changed = ?4
        WHERE id = ?1
        ",
        params![
            term_id.0,
            bool_to_i64(reason.is_some()),
            reason,
            Utc::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

pub(crate) fn touch_term(conn: &Connection, term_id: TermId) -> Result<()> {
    conn.execute(
        "UPDATE terms SET date_changed = ?2 WHERE id = ?1",
        params![term_id.0, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Deletes the term row; names, answers, set memberships and words cascade.
pub(crate) fn delete_term(conn: &Connection, term_id: TermId) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM terms WHERE id = ?1", params![term_id.0])?;
    Ok(deleted > 0)
}

pub(crate) fn term_exists(conn: &Connection, term_id: TermId) -> Result<bool> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM terms WHERE id = ?1 LIMIT 1",
            params![term_id.0],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    Ok(exists)
}

pub(crate) fn load_name(conn: &Connection, name_id: NameId) -> Result<Option<TermName>> {
    let name = conn
        .query_row(
            &format!("SELECT {NAME_COLUMNS} FROM term_names WHERE id = ?1"),
            params![name_id.0],
            read_name_row,
        )
        .optional()?;
    Ok(name)
}

fn load_names(conn: &Connection, term_id: TermId, live_only: bool) -> Result<Vec<TermName>> {
    let sql = if live_only {
        format!("SELECT {NAME_COLUMNS} FROM term_names WHERE term_id = ?1 AND voided = 0 ORDER BY id")
    } else {
        format!("SELECT {NAME_COLUMNS} FROM term_names WHERE term_id = ?1 ORDER BY id")
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![term_id.0], read_name_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn read_name_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TermName> {
    let locale_raw = row.get::<_, String>(3)?;
    let name_type_raw = row.get::<_, String>(4)?;
    Ok(TermName {
        id: NameId(row.get(0)?),
        term_id: TermId(row.get(1)?),
        text: row.get(2)?,
        locale: parse_locale_column(3, &locale_raw)?,
        name_type: parse_name_type_column(4, &name_type_raw)?,
        locale_preferred: row.get::<_, i64>(5)? != 0,
        voided: row.get::<_, i64>(6)? != 0,
        void_reason: row.get(7)?,
        date_created: row.get(8)?,
    })
}

impl TermSource for Connection {
    fn get_term(&self, term_id: TermId) -> Result<Option<Term>> {
        let term = self
            .query_row(
                r"
                SELECT id, uuid, class_id, datatype_id, voided, void_reason, date_created, date_changed
                FROM terms
                WHERE id = ?1
                ",
                params![term_id.0],
                |row| {
                    Ok(Term {
                        id: TermId(row.get(0)?),
                        uuid: row.get(1)?,
                        class_id: ClassId(row.get(2)?),
                        datatype_id: DatatypeId(row.get(3)?),
                        voided: row.get::<_, i64>(4)? != 0,
                        void_reason: row.get(5)?,
                        date_created: row.get(6)?,
                        date_changed: row.get(7)?,
                        names: Vec::new(),
                    })
                },
            )
            .optional()?;
        let Some(mut term) = term else {
            return Ok(None);
        };
        term.names = load_names(self, term_id, false)?;
        Ok(Some(term))
    }

    fn get_live_names(&self, term_id: TermId) -> Result<Vec<TermName>> {
        load_names(self, term_id, true)
    }
}

pub(crate) fn replace_answers(conn: &Connection, question: TermId, answers: &[TermId]) -> Result<()> {
    replace_links(conn, "term_answers", "question_id", "answer_id", question, answers)
}

pub(crate) fn list_answers(conn: &Connection, question: TermId) -> Result<Vec<TermId>> {
    list_links(
        conn,
        "SELECT answer_id FROM term_answers WHERE question_id = ?1 ORDER BY sort_weight, answer_id",
        question,
    )
}

pub(crate) fn list_questions(conn: &Connection, answer: TermId) -> Result<Vec<TermId>> {
    list_links(
        conn,
        "SELECT question_id FROM term_answers WHERE answer_id = ?1 ORDER BY question_id",
        answer,
    )
}

pub(crate) fn replace_members(conn: &Connection, set: TermId, members: &[TermId]) -> Result<()> {
    replace_links(conn, "term_set_members", "set_id", "member_id", set, members)
}

pub(crate) fn list_members(conn: &Connection, set: TermId) -> Result<Vec<TermId>> {
    list_links(
        conn,
        "SELECT member_id FROM term_set_members WHERE set_id = ?1 ORDER BY sort_weight, member_id",
        set,
    )
}

fn replace_links(
    conn: &Connection,
    table: &str,
    owner_column: &str,
    target_column: &str,
    owner: TermId,
    targets: &[TermId],
) -> Result<()> {
    conn.execute(
        &format!("DELETE FROM {table} WHERE {owner_column} = ?1"),
        params![owner.0],
    )?;
    let mut stmt = conn.prepare(&format!(
        "INSERT OR IGNORE INTO {table}({owner_column}, {target_column}, sort_weight) VALUES (?1, ?2, ?3)"
    ))?;
    for (sort_weight, target) in targets.iter().enumerate() {
        stmt.execute(params![
            owner.0,
            target.0,
            usize_to_i64_saturating(sort_weight)
        ])?;
    }
    Ok(())
}

fn list_links(conn: &Connection, sql: &str, owner: TermId) -> Result<Vec<TermId>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![owner.0], |row| row.get::<_, i64>(0))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(TermId(row?));
    }
    Ok(out)
}

/// Next page of term ids strictly after `after`, ascending.
pub(crate) fn list_term_ids_after(
    conn: &Connection,
    after: Option<TermId>,
    limit: usize,
) -> Result<Vec<TermId>> {
    let mut stmt = conn.prepare("SELECT id FROM terms WHERE id > ?1 ORDER BY id ASC LIMIT ?2")?;
    let rows = stmt.query_map(
        params![after.map_or(i64::MIN, |id| id.0), usize_to_i64_saturating(limit)],
        |row| row.get::<_, i64>(0),
    )?;

    let mut out = Vec::new();
    for row in rows {
        out.push(TermId(row?));
    }
    Ok(out)
}
