use std::collections::HashSet;

/// Separator characters besides whitespace. `%`, `_`, `*` and `-` stay inside words so they can
/// be searched literally.
pub const DEFAULT_PUNCTUATION: &str = ",.;:!?'\"()[]{}<>/\\|`~^+=&#@$";

/// Words ignored in search phrases unless the phrase has nothing else.
pub const DEFAULT_STOP_WORDS: [&str; 10] =
    ["A", "AND", "AT", "BUT", "BY", "FOR", "HAS", "OF", "THE", "TO"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Number of tokens preceding this one in the same name.
    pub position: usize,
}

/// Splits names and phrases into uppercase word tokens.
///
/// Case folding uses Unicode default case mapping, so output never depends on the host locale.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    punctuation: HashSet<char>,
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_PUNCTUATION, DEFAULT_STOP_WORDS)
    }
}

impl Tokenizer {
    #[must_use]
    pub fn new<I, S>(punctuation: &str, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            punctuation: punctuation.chars().filter(|c| !c.is_whitespace()).collect(),
            stop_words: stop_words
                .into_iter()
                .map(|word| word.as_ref().trim().to_uppercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split(|c: char| c.is_whitespace() || self.punctuation.contains(&c))
            .filter(|raw| !raw.is_empty())
            .enumerate()
            .map(|(position, raw)| Token {
                text: raw.to_uppercase(),
                position,
            })
            .collect()
    }

    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Distinct words of a search phrase in first-seen order, stop words dropped unless the
    /// phrase consists only of stop words.
    #[must_use]
    pub fn query_words(&self, phrase: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let unique = self
            .tokenize(phrase)
            .into_iter()
            .map(|token| token.text)
            .filter(|word| seen.insert(word.clone()))
            .collect::<Vec<_>>();
        let content = unique
            .iter()
            .filter(|word| !self.is_stop_word(word))
            .cloned()
            .collect::<Vec<_>>();
        if content.is_empty() { unique } else { content }
    }
}

#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let Some((clip_idx, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let mut out = text[..clip_idx].to_string();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn tokenize_uppercases_and_records_positions() {
        let tokens = Tokenizer::default().tokenize("  Malaria, blood\tsmear ");
        assert_eq!(texts(&tokens), vec!["MALARIA", "BLOOD", "SMEAR"]);
        assert_eq!(
            tokens.iter().map(|t| t.position).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn tokenize_splits_on_configured_punctuation_only() {
        let tokens = Tokenizer::default().tokenize("CD4(count)/x-ray 50%_rate*");
        assert_eq!(texts(&tokens), vec!["CD4", "COUNT", "X-RAY", "50%_RATE*"]);

        let custom = Tokenizer::new("-", DEFAULT_STOP_WORDS).tokenize("x-ray(a)");
        assert_eq!(texts(&custom), vec!["X", "RAY(A)"]);
    }

    #[test]
    fn case_folding_ignores_turkish_dotless_rules() {
        let tokens = Tokenizer::default().tokenize("istanbul ılık");
        assert_eq!(texts(&tokens), vec!["ISTANBUL", "ILIK"]);
    }

    #[test]
    fn separator_only_text_has_no_tokens() {
        let tokenizer = Tokenizer::default();
        assert_eq!(texts(&tokenizer.tokenize(" my...depot ")), vec!["MY", "DEPOT"]);
        assert!(tokenizer.tokenize(",; ...").is_empty());
    }

    #[test]
    fn query_words_drop_stop_words_and_duplicates() {
        let words = Tokenizer::default().query_words("the pain of pain in the chest");
        assert_eq!(words, vec!["PAIN", "IN", "CHEST"]);
    }

    #[test]
    fn query_words_keep_stop_words_when_nothing_else_remains() {
        assert_eq!(Tokenizer::default().query_words("to a"), vec!["TO", "A"]);
        assert!(Tokenizer::default().query_words("  ,, ").is_empty());
    }

    #[test]
    fn truncate_text_preserves_utf8_char_boundaries() {
        let input = "\u{C548}\u{B155}\u{D558}\u{C138}\u{C694}-hello";
        let clipped = truncate_text(input, 5);
        let expected = format!("{}...", "\u{C548}\u{B155}\u{D558}\u{C138}\u{C694}");
        assert_eq!(clipped, expected);
    }

    #[test]
    fn truncate_text_returns_original_when_input_fits_limit() {
        assert_eq!(truncate_text("hello", 5), "hello");
    }
}
