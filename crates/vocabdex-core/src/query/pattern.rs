use crate::models::MatchMode;

const LIKE_ESCAPE: char = '\\';
const LIKE_ANY: char = '%';
const LIKE_ONE: char = '_';
const USER_WILDCARD: char = '*';

/// How one normalized query word is matched against `term_words.word`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WordPattern {
    /// Plain equality; no metacharacters are involved.
    Equals(String),
    /// A `LIKE` pattern escaped with `\`.
    Like(String),
}

/// True for a word made only of user wildcards, which would match every indexed word.
pub(super) fn is_wildcard_only(word: &str, wildcards: bool) -> bool {
    wildcards && !word.is_empty() && word.chars().all(|c| c == USER_WILDCARD)
}

/// Escapes `\`, `%` and `_` so they match literally. `*` becomes `%` only when `wildcards` is
/// set; otherwise it is an ordinary character.
pub(super) fn escape_like(word: &str, wildcards: bool) -> String {
    let mut out = String::with_capacity(word.len() + 2);
    for c in word.chars() {
        match c {
            LIKE_ESCAPE | LIKE_ANY | LIKE_ONE => {
                out.push(LIKE_ESCAPE);
                out.push(c);
            }
            USER_WILDCARD if wildcards => out.push(LIKE_ANY),
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn word_pattern(word: &str, mode: MatchMode, wildcards: bool) -> WordPattern {
    let deliberate_wildcard = wildcards && word.contains(USER_WILDCARD);
    match mode {
        MatchMode::Exact if !deliberate_wildcard => WordPattern::Equals(word.to_string()),
        MatchMode::Exact => WordPattern::Like(escape_like(word, wildcards)),
        MatchMode::Start => WordPattern::Like(format!("{}{LIKE_ANY}", escape_like(word, wildcards))),
        MatchMode::Anywhere => WordPattern::Like(format!(
            "{LIKE_ANY}{}{LIKE_ANY}",
            escape_like(word, wildcards)
        )),
    }
}
