use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tempfile::tempdir;

use super::*;
use crate::error::VocabError;
use crate::locale::Locale;
use crate::models::{
    ClassId, DatatypeId, NameDraft, NameType, ReindexOptions, SearchRequest, TermDraft, TermId,
};

fn en() -> Locale {
    Locale::parse("en").expect("locale")
}

fn app() -> Vocabulary {
    Vocabulary::open_in_memory(AppConfig::default()).expect("vocabulary")
}

fn draft(names: Vec<NameDraft>) -> TermDraft {
    TermDraft {
        class_id: ClassId(1),
        datatype_id: DatatypeId(4),
        names,
        answers: Vec::new(),
    }
}

fn fsn(text: &str) -> NameDraft {
    NameDraft::new(text, en(), NameType::FullySpecified).preferred()
}

fn hits(app: &Vocabulary, phrase: &str) -> Vec<TermId> {
    app.search(&SearchRequest::new(phrase))
        .expect("search")
        .hits
        .into_iter()
        .map(|hit| hit.term_id)
        .collect()
}

#[test]
fn new_creates_root_and_reads_config_file() {
    let temp = tempdir().expect("tempdir");
    let root = temp.path().join("data");
    std::fs::create_dir_all(&root).expect("mkdir");
    std::fs::write(
        root.join(crate::config::CONFIG_FILE_NAME),
        "[search]\ndefault_limit = 3\n",
    )
    .expect("write config");

    let app = Vocabulary::new(&root).expect("app new");
    assert_eq!(app.config().search.default_limit, 3);
    assert!(root.join(DATABASE_FILE_NAME).exists());
}

#[test]
fn create_term_indexes_names_and_assigns_uuid() {
    let app = app();
    let term = app
        .create_term(draft(vec![
            fsn("Malaria smear"),
            NameDraft::new("  MS  ", en(), NameType::Short),
        ]))
        .expect("create");

    assert_eq!(term.names.len(), 2);
    assert_eq!(term.names[1].text, "MS");
    uuid::Uuid::parse_str(&term.uuid).expect("uuid v4");
    assert_eq!(app.words_for(term.id).expect("words").len(), 3);
    assert_eq!(hits(&app, "smear"), vec![term.id]);
    assert_eq!(hits(&app, "ms"), vec![term.id]);
}

#[test]
fn create_term_rejects_blank_names_and_missing_fully_specified_name() {
    let app = app();
    let blank = app
        .create_term(draft(vec![fsn("  ")]))
        .expect_err("blank name");
    assert!(matches!(blank, VocabError::Validation(_)));

    let no_fsn = app
        .create_term(draft(vec![NameDraft::new("Fever", en(), NameType::Synonym)]))
        .expect_err("no fsn");
    assert!(matches!(no_fsn, VocabError::Validation(_)));

    let mut unknown_answer = draft(vec![fsn("Fever")]);
    unknown_answer.answers = vec![TermId(77)];
    let missing = app.create_term(unknown_answer).expect_err("missing answer");
    assert!(matches!(missing, VocabError::NotFound(_)));
    assert_eq!(app.store.term_count().expect("count"), 0);
}

#[test]
fn names_without_indexable_words_are_rejected() {
    let app = app();
    let punctuation_only = app
        .create_term(draft(vec![fsn("...")]))
        .expect_err("punctuation-only fsn");
    assert!(matches!(punctuation_only, VocabError::Validation(_)));
    assert_eq!(app.store.term_count().expect("count"), 0);

    let term = app.create_term(draft(vec![fsn("Jaundice")])).expect("create");
    let added = app
        .add_name(term.id, NameDraft::new("(;)", en(), NameType::Synonym))
        .expect_err("punctuation-only synonym");
    assert!(matches!(added, VocabError::Validation(_)));

    let updated = app
        .update_name(
            term.names[0].id,
            NameDraft::new(" / ", en(), NameType::FullySpecified),
        )
        .expect_err("punctuation-only rewrite");
    assert!(matches!(updated, VocabError::Validation(_)));
    assert_eq!(
        app.get_term(term.id).expect("get").expect("term").names.len(),
        1
    );
    assert_eq!(hits(&app, "jaundice"), vec![term.id]);
}

#[test]
fn name_edits_are_reflected_in_the_next_search() {
    let app = app();
    let term = app.create_term(draft(vec![fsn("Pyrexia")])).expect("create");
    let synonym = app
        .add_name(term.id, NameDraft::new("Fever", en(), NameType::Synonym))
        .expect("add name");
    assert_eq!(hits(&app, "fever"), vec![term.id]);

    app.update_name(synonym, NameDraft::new("High temperature", en(), NameType::Synonym))
        .expect("update");
    assert!(hits(&app, "fever").is_empty());
    assert_eq!(hits(&app, "temperature"), vec![term.id]);

    app.void_name(synonym, "duplicate").expect("void");
    assert!(hits(&app, "temperature").is_empty());
    app.void_name(synonym, "again").expect("void twice is a no-op");

    app.unvoid_name(synonym).expect("unvoid");
    assert_eq!(hits(&app, "temperature"), vec![term.id]);
}

#[test]
fn last_fully_specified_name_cannot_be_voided_or_retyped() {
    let app = app();
    let term = app.create_term(draft(vec![fsn("Cough")])).expect("create");
    let fsn_id = term.names[0].id;

    let voided = app.void_name(fsn_id, "typo").expect_err("last fsn");
    assert!(matches!(voided, VocabError::Conflict(_)));
    let retyped = app
        .update_name(fsn_id, NameDraft::new("Cough", en(), NameType::Synonym))
        .expect_err("retype last fsn");
    assert!(matches!(retyped, VocabError::Conflict(_)));

    app.add_name(term.id, NameDraft::new("Tussis", en(), NameType::FullySpecified))
        .expect("second fsn");
    app.void_name(fsn_id, "replaced").expect("no longer the last");
    assert_eq!(hits(&app, "tussis"), vec![term.id]);
    assert!(hits(&app, "cough").is_empty());
}

#[test]
fn void_name_requires_a_reason_and_an_existing_name() {
    let app = app();
    let term = app.create_term(draft(vec![fsn("Rash")])).expect("create");
    assert!(matches!(
        app.void_name(term.names[0].id, "  "),
        Err(VocabError::Validation(_))
    ));
    let missing = app
        .void_name(crate::models::NameId(999), "gone")
        .expect_err("missing");
    assert!(missing.is_retryable());
}

#[test]
fn voided_terms_are_hidden_unless_requested() {
    let app = app();
    let term = app.create_term(draft(vec![fsn("Dropsy")])).expect("create");
    app.void_term(term.id, "obsolete").expect("void term");
    assert!(hits(&app, "dropsy").is_empty());

    let mut request = SearchRequest::new("dropsy");
    request.include_voided = true;
    let page = app.search(&request).expect("search voided");
    assert_eq!(page.total, 1);

    app.unvoid_term(term.id).expect("unvoid");
    assert_eq!(hits(&app, "dropsy"), vec![term.id]);
}

#[test]
fn purge_removes_every_word_of_the_term() {
    let app = app();
    let question = app.create_term(draft(vec![fsn("Outcome")])).expect("q");
    let answer = app
        .create_term(draft(vec![fsn("Lost to follow up")]))
        .expect("a");
    app.set_answers(question.id, &[answer.id]).expect("answers");

    app.purge_term(answer.id).expect("purge");
    assert!(app.words_for(answer.id).expect("words").is_empty());
    assert!(app.get_term(answer.id).expect("get").is_none());
    assert!(app.answers_for(question.id).expect("answers").is_empty());
    assert!(matches!(
        app.purge_term(answer.id),
        Err(VocabError::NotFound(_))
    ));
}

#[test]
fn answers_and_set_members_round_trip() {
    let app = app();
    let question = app.create_term(draft(vec![fsn("HIV test result")])).expect("q");
    let positive = app.create_term(draft(vec![fsn("Positive")])).expect("pos");
    let negative = app.create_term(draft(vec![fsn("Negative")])).expect("neg");

    app.set_answers(question.id, &[positive.id, negative.id])
        .expect("answers");
    assert_eq!(
        app.answers_for(question.id).expect("answers"),
        vec![positive.id, negative.id]
    );
    assert_eq!(
        app.questions_for_answer(negative.id).expect("questions"),
        vec![question.id]
    );
    let scoped = app
        .search_answers(question.id, &SearchRequest::new("pos"))
        .expect("search answers");
    assert_eq!(scoped.hits.len(), 1);
    assert_eq!(scoped.hits[0].term_id, positive.id);

    app.set_members(question.id, &[negative.id, positive.id])
        .expect("members");
    assert_eq!(
        app.set_members_of(question.id).expect("members"),
        vec![negative.id, positive.id]
    );
    assert!(matches!(
        app.set_members(question.id, &[question.id]),
        Err(VocabError::Validation(_))
    ));
}

#[test]
fn reindex_all_isolates_failures_and_reports_resume_point() {
    let app = app();
    let first = app.create_term(draft(vec![fsn("Anemia")])).expect("first");
    let broken = app.create_term(draft(vec![fsn("Asthma")])).expect("broken");
    let last = app.create_term(draft(vec![fsn("Arthritis")])).expect("last");
    app.store
        .with_conn(|conn| {
            conn.execute(
                "UPDATE term_names SET locale = 'en_' WHERE term_id = ?1",
                [broken.id.0],
            )?;
            conn.execute("DELETE FROM term_words", [])?;
            Ok(())
        })
        .expect("corrupt");

    let report = app
        .reindex_all(&ReindexOptions::default())
        .expect("reindex all");
    assert_eq!(report.rebuilt, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].term_id, broken.id);
    assert_eq!(report.last_completed, Some(last.id));
    assert!(!report.interrupted);
    assert_eq!(report.failed[0].code, "SQLITE_ERROR");
    assert!(!app.words_for(first.id).expect("first words").is_empty());
    assert!(app.words_for(broken.id).expect("broken words").is_empty());
    assert_eq!(hits(&app, "arthritis"), vec![last.id]);
}

#[test]
fn reindex_all_resumes_after_cursor_and_stops_when_cancelled() {
    let temp = tempdir().expect("tempdir");
    let app = Vocabulary::new(temp.path()).expect("app");
    let ids = ["Goitre", "Gout", "Gastritis"]
        .into_iter()
        .map(|text| app.create_term(draft(vec![fsn(text)])).expect("create").id)
        .collect::<Vec<_>>();

    let resumed = app
        .reindex_all(&ReindexOptions::resume_after(ids[0]))
        .expect("resume");
    assert_eq!(resumed.rebuilt, 2);
    assert_eq!(resumed.last_completed, Some(ids[2]));

    let cancel = Arc::new(AtomicBool::new(false));
    cancel.store(true, Ordering::Relaxed);
    let cancelled = app
        .reindex_all(&ReindexOptions {
            start_after: None,
            cancel: Some(Arc::clone(&cancel)),
        })
        .expect("cancelled");
    assert!(cancelled.interrupted);
    assert_eq!(cancelled.rebuilt, 0);
    assert_eq!(cancelled.last_completed, None);
    assert_eq!(app.words_for(ids[1]).expect("words").len(), 1);
}

#[test]
fn reindex_term_reports_missing_term_as_retryable() {
    let app = app();
    let err = app.reindex_term(TermId(5)).expect_err("missing");
    assert_eq!(err.code(), "NOT_FOUND");
    assert!(err.is_retryable());
}
