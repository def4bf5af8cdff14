use vocabdex_core::index::{NamePrecedence, format_weight, word_weight};
use vocabdex_core::models::{
    ClassId, DatatypeId, MatchMode, NameDraft, NameType, PageRequest, SearchRequest, TermDraft,
    TermId,
};
use vocabdex_core::text::Tokenizer;
use vocabdex_core::{AppConfig, Locale, VocabError, Vocabulary};

fn locale(tag: &str) -> Locale {
    Locale::parse(tag).expect("locale")
}

fn vocabulary() -> Vocabulary {
    Vocabulary::open_in_memory(AppConfig::default()).expect("vocabulary")
}

fn term(app: &Vocabulary, class: i64, names: Vec<NameDraft>) -> TermId {
    app.create_term(TermDraft {
        class_id: ClassId(class),
        datatype_id: DatatypeId(4),
        names,
        answers: Vec::new(),
    })
    .expect("create term")
    .id
}

fn fsn(text: &str, tag: &str) -> NameDraft {
    NameDraft::new(text, locale(tag), NameType::FullySpecified).preferred()
}

fn ids(app: &Vocabulary, request: &SearchRequest) -> Vec<TermId> {
    app.search(request)
        .expect("search")
        .hits
        .into_iter()
        .map(|hit| hit.term_id)
        .collect()
}

#[test]
fn whole_word_name_outranks_prefix_match() {
    let tokenizer = Tokenizer::default();
    let to = word_weight("TO", "to", NamePrecedence::PreferredFullySpecified, &tokenizer);
    let toy = word_weight("TOY", "toy", NamePrecedence::PreferredFullySpecified, &tokenizer);
    assert!(to > toy);

    let app = vocabulary();
    let toy_term = term(&app, 1, vec![fsn("toy", "en")]);
    let to_term = term(&app, 1, vec![fsn("to", "en")]);
    assert_eq!(ids(&app, &SearchRequest::new("to")), vec![to_term, toy_term]);
}

#[test]
fn synonym_outranks_short_name_with_same_text() {
    let tokenizer = Tokenizer::default();
    assert!(
        word_weight("MY", "my depot", NamePrecedence::Synonym, &tokenizer)
            > word_weight("MY", "my depot", NamePrecedence::Short, &tokenizer)
    );

    let app = vocabulary();
    let short = term(
        &app,
        1,
        vec![
            fsn("Regional storage facility", "en"),
            NameDraft::new("my depot", locale("en"), NameType::Short),
        ],
    );
    let synonym = term(
        &app,
        1,
        vec![
            fsn("District storage facility", "en"),
            NameDraft::new("my depot", locale("en"), NameType::Synonym),
        ],
    );
    let page = app
        .search(&SearchRequest::new("my depot"))
        .expect("search");
    let order = page.hits.iter().map(|hit| hit.term_id).collect::<Vec<_>>();
    assert_eq!(order, vec![synonym, short]);
    assert!(page.hits[0].rank > page.hits[1].rank);
}

#[test]
fn every_query_word_must_match_and_stop_words_are_ignored() {
    let app = vocabulary();
    let chest_pain = term(&app, 1, vec![fsn("Pain of the chest", "en")]);
    let _back_pain = term(&app, 1, vec![fsn("Back pain", "en")]);

    assert_eq!(
        ids(&app, &SearchRequest::new("the chest pain")),
        vec![chest_pain]
    );
    let both = ids(&app, &SearchRequest::new("pai"));
    assert_eq!(both.len(), 2);
}

#[test]
fn literal_metacharacters_never_widen_the_match() {
    let app = vocabulary();
    let percent = term(&app, 1, vec![fsn("Dextrose 50%", "en")]);
    let _five_hundred = term(&app, 1, vec![fsn("Dextrose 500", "en")]);
    let underscore = term(&app, 1, vec![fsn("HIV_1 viral load", "en")]);
    let _hiv11 = term(&app, 1, vec![fsn("HIV11 antigen", "en")]);
    let star = term(&app, 1, vec![fsn("Grade 3* lesion", "en")]);
    let _grade_30 = term(&app, 1, vec![fsn("Grade 30 lesion", "en")]);

    let mut anywhere = SearchRequest::new("50%");
    anywhere.match_mode = Some(MatchMode::Anywhere);
    assert_eq!(ids(&app, &anywhere), vec![percent]);
    assert_eq!(ids(&app, &SearchRequest::new("hiv_")), vec![underscore]);
    assert_eq!(ids(&app, &SearchRequest::new("3*")), vec![star]);
}

#[test]
fn locale_filter_and_pagination_report_filtered_total() {
    let app = vocabulary();
    for i in 0..4 {
        term(&app, 1, vec![fsn(&format!("Fracture type {i}"), "en_GB")]);
    }
    term(&app, 1, vec![fsn("Fracture", "fr")]);

    let mut request = SearchRequest::new("fracture")
        .with_locale_tags(&["en"])
        .expect("tags");
    request.page = Some(PageRequest {
        offset: 1,
        limit: 2,
    });
    let page = app.search(&request).expect("search");
    assert_eq!(page.total, 4);
    assert_eq!(page.hits.len(), 2);
    assert_eq!(page.offset, 1);
    assert_eq!(page.limit, 2);
}

#[test]
fn invalid_locale_tag_is_reported_with_payload() {
    let err = SearchRequest::new("fever")
        .with_locale_tags(&["en__US"])
        .expect_err("bad tag");
    assert!(matches!(err, VocabError::InvalidLocale(_)));
    let payload = err.to_payload("search", Some("en__US".to_string()));
    assert_eq!(payload.code, "INVALID_LOCALE");
    assert!(!payload.retryable);
    assert_eq!(payload.target.as_deref(), Some("en__US"));
}

#[test]
fn weight_formatting_is_locale_invariant() {
    let weight = word_weight(
        "FEVER",
        "fever",
        NamePrecedence::IndexTerm,
        &Tokenizer::default(),
    );
    let rendered = format_weight(weight);
    assert!(rendered.ends_with(".0"));
    assert!(!rendered.contains(','));
    assert_eq!(rendered.parse::<f64>().expect("parse"), weight);
}
