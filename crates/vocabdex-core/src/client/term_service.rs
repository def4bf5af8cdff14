use rusqlite::Connection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, VocabError};
use crate::index::{TermSource, rebuild_index, remove_index};
use crate::models::{NameDraft, NameId, NameType, Term, TermDraft, TermId, TermName, Word};
use crate::store::{
    delete_term, insert_name, insert_term, list_answers, list_members, list_questions, load_name,
    replace_answers, replace_members, set_name_voided, set_term_voided, term_exists, touch_term,
    update_name,
};
use crate::text::Tokenizer;

use super::Vocabulary;

impl Vocabulary {
    /// Creates a term with its names and answers and indexes it.
    pub fn create_term(&self, draft: TermDraft) -> Result<Term> {
        let names = draft
            .names
            .iter()
            .map(|name| validate_name_draft(name, &self.tokenizer))
            .collect::<Result<Vec<_>>>()?;
        if !names
            .iter()
            .any(|name| name.name_type == NameType::FullySpecified)
        {
            return Err(VocabError::Validation(
                "a term needs at least one fully specified name".to_string(),
            ));
        }

        let term = self.store.with_tx(|conn| {
            ensure_terms_exist(conn, &draft.answers)?;
            let term_id = insert_term(
                conn,
                &Uuid::new_v4().to_string(),
                draft.class_id,
                draft.datatype_id,
            )?;
            for name in &names {
                insert_name(conn, term_id, name)?;
            }
            if !draft.answers.is_empty() {
                replace_answers(conn, term_id, &draft.answers)?;
            }
            rebuild_index(conn, &self.tokenizer, term_id)?;
            require_term(conn, term_id)
        })?;
        info!(term_id = term.id.0, names = term.names.len(), "created term");
        Ok(term)
    }

    pub fn get_term(&self, term_id: TermId) -> Result<Option<Term>> {
        self.store.get_term(term_id)
    }

    pub fn words_for(&self, term_id: TermId) -> Result<Vec<Word>> {
        self.store.words_for(term_id)
    }

    pub fn add_name(&self, term_id: TermId, draft: NameDraft) -> Result<NameId> {
        let draft = validate_name_draft(&draft, &self.tokenizer)?;
        let name_id = self.store.with_tx(|conn| {
            require_term(conn, term_id)?;
            let name_id = insert_name(conn, term_id, &draft)?;
            touch_term(conn, term_id)?;
            rebuild_index(conn, &self.tokenizer, term_id)?;
            Ok(name_id)
        })?;
        debug!(term_id = term_id.0, name_id = name_id.0, "added name");
        Ok(name_id)
    }

    /// Rewrites a name's text, locale, type and preferred flag.
    pub fn update_name(&self, name_id: NameId, draft: NameDraft) -> Result<TermName> {
        let draft = validate_name_draft(&draft, &self.tokenizer)?;
        self.store.with_tx(|conn| {
            let current = require_name(conn, name_id)?;
            if current.is_live_fully_specified() && draft.name_type != NameType::FullySpecified {
                guard_last_fully_specified(conn, &current)?;
            }
            update_name(conn, name_id, &draft)?;
            touch_term(conn, current.term_id)?;
            rebuild_index(conn, &self.tokenizer, current.term_id)?;
            require_name(conn, name_id)
        })
    }

    /// Voids a name and drops its words. Voiding an already voided name changes nothing.
    pub fn void_name(&self, name_id: NameId, reason: &str) -> Result<()> {
        let reason = required_reason(reason)?;
        self.store.with_tx(|conn| {
            let current = require_name(conn, name_id)?;
            if current.voided {
                return Ok(());
            }
            if current.is_live_fully_specified() {
                guard_last_fully_specified(conn, &current)?;
            }
            set_name_voided(conn, name_id, Some(reason))?;
            touch_term(conn, current.term_id)?;
            rebuild_index(conn, &self.tokenizer, current.term_id)?;
            Ok(())
        })
    }

    pub fn unvoid_name(&self, name_id: NameId) -> Result<()> {
        self.store.with_tx(|conn| {
            let current = require_name(conn, name_id)?;
            if !current.voided {
                return Ok(());
            }
            set_name_voided(conn, name_id, None)?;
            touch_term(conn, current.term_id)?;
            rebuild_index(conn, &self.tokenizer, current.term_id)?;
            Ok(())
        })
    }

    /// Retires a term. Its words stay indexed and searches skip it unless voided terms are
    /// requested.
    pub fn void_term(&self, term_id: TermId, reason: &str) -> Result<()> {
        let reason = required_reason(reason)?;
        self.store.with_tx(|conn| {
            require_term(conn, term_id)?;
            set_term_voided(conn, term_id, Some(reason))?;
            rebuild_index(conn, &self.tokenizer, term_id)?;
            Ok(())
        })?;
        info!(term_id = term_id.0, "voided term");
        Ok(())
    }

    pub fn unvoid_term(&self, term_id: TermId) -> Result<()> {
        self.store.with_tx(|conn| {
            let term = require_term(conn, term_id)?;
            if term.live_fully_specified_count() == 0 {
                return Err(VocabError::Conflict(format!(
                    "term {term_id} has no live fully specified name"
                )));
            }
            set_term_voided(conn, term_id, None)?;
            rebuild_index(conn, &self.tokenizer, term_id)?;
            Ok(())
        })?;
        info!(term_id = term_id.0, "unvoided term");
        Ok(())
    }

    /// Deletes a term with its names, answer and set links, and every indexed word.
    pub fn purge_term(&self, term_id: TermId) -> Result<()> {
        let removed = self.store.with_tx(|conn| {
            if !term_exists(conn, term_id)? {
                return Err(VocabError::NotFound(format!("term {term_id}")));
            }
            let removed = remove_index(conn, term_id)?;
            delete_term(conn, term_id)?;
            Ok(removed)
        })?;
        info!(term_id = term_id.0, removed_words = removed, "purged term");
        Ok(())
    }

    /// Replaces the coded answers of `question`, keeping the given order.
    pub fn set_answers(&self, question: TermId, answers: &[TermId]) -> Result<()> {
        self.store.with_tx(|conn| {
            require_term(conn, question)?;
            ensure_terms_exist(conn, answers)?;
            replace_answers(conn, question, answers)?;
            touch_term(conn, question)
        })
    }

    pub fn answers_for(&self, question: TermId) -> Result<Vec<TermId>> {
        self.store.with_conn(|conn| list_answers(conn, question))
    }

    pub fn questions_for_answer(&self, answer: TermId) -> Result<Vec<TermId>> {
        self.store.with_conn(|conn| list_questions(conn, answer))
    }

    /// Replaces the members of a compound term. A set cannot contain itself.
    pub fn set_members(&self, set: TermId, members: &[TermId]) -> Result<()> {
        if members.contains(&set) {
            return Err(VocabError::Validation(format!(
                "term {set} cannot be a member of itself"
            )));
        }
        self.store.with_tx(|conn| {
            require_term(conn, set)?;
            ensure_terms_exist(conn, members)?;
            replace_members(conn, set, members)?;
            touch_term(conn, set)
        })
    }

    pub fn set_members_of(&self, set: TermId) -> Result<Vec<TermId>> {
        self.store.with_conn(|conn| list_members(conn, set))
    }
}

fn validate_name_draft(draft: &NameDraft, tokenizer: &Tokenizer) -> Result<NameDraft> {
    let text = draft.text.trim();
    if text.is_empty() {
        return Err(VocabError::Validation(
            "name text must not be empty".to_string(),
        ));
    }
    if tokenizer.tokenize(text).is_empty() {
        return Err(VocabError::Validation(format!(
            "name text has no indexable words: {text}"
        )));
    }
    Ok(NameDraft {
        text: text.to_string(),
        ..draft.clone()
    })
}

fn required_reason(reason: &str) -> Result<&str> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(VocabError::Validation(
            "void reason must not be empty".to_string(),
        ));
    }
    Ok(reason)
}

fn require_term(conn: &Connection, term_id: TermId) -> Result<Term> {
    conn.get_term(term_id)?
        .ok_or_else(|| VocabError::NotFound(format!("term {term_id}")))
}

fn require_name(conn: &Connection, name_id: NameId) -> Result<TermName> {
    load_name(conn, name_id)?.ok_or_else(|| VocabError::NotFound(format!("name {name_id}")))
}

fn ensure_terms_exist(conn: &Connection, term_ids: &[TermId]) -> Result<()> {
    for term_id in term_ids {
        if !term_exists(conn, *term_id)? {
            return Err(VocabError::NotFound(format!("term {term_id}")));
        }
    }
    Ok(())
}

/// A non-voided term must keep at least one live fully specified name.
fn guard_last_fully_specified(conn: &Connection, name: &TermName) -> Result<()> {
    let term = require_term(conn, name.term_id)?;
    if !term.voided && term.live_fully_specified_count() <= 1 {
        return Err(VocabError::Conflict(format!(
            "name {} is the last fully specified name of term {}",
            name.id, term.id
        )));
    }
    Ok(())
}
