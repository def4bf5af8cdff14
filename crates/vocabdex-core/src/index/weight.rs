//! Single-scalar word weight.
//!
//! The weight is an integer-valued `f64` built from decimal digit fields, highest priority
//! first:
//!
//! ```text
//! E T NNNN PPP LLL
//! | |  |    |   +-- 999 - word length
//! | |  |    +------ 999 - word position in its name
//! | |  +----------- 9999 - normalized name length
//! | +-------------- name precedence tier (1..=7)
//! +---------------- 1 when the word is the whole name
//! ```
//!
//! Every field is clamped to its width, so a field can never carry into the one above it and a
//! higher field always dominates all lower ones. The largest value stays below 2^53, which keeps
//! every weight exactly representable and bit-for-bit reproducible.

use crate::models::NameType;
use crate::text::{Token, Tokenizer};

const EXACT_MATCH_UNIT: u64 = 100_000_000_000;
const TIER_UNIT: u64 = 10_000_000_000;
const NAME_LENGTH_UNIT: u64 = 1_000_000;
const POSITION_UNIT: u64 = 1_000;

const MAX_NAME_LENGTH: u64 = 9_999;
const MAX_POSITION: u64 = 999;
const MAX_WORD_LENGTH: u64 = 999;

/// Name-type precedence, lowest first so that `Ord` follows desirability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NamePrecedence {
    Untyped,
    Short,
    Synonym,
    FullySpecified,
    /// Locale-preferred name that is not fully specified.
    Preferred,
    PreferredFullySpecified,
    IndexTerm,
}

impl NamePrecedence {
    #[must_use]
    pub const fn of(name_type: NameType, locale_preferred: bool) -> Self {
        match (name_type, locale_preferred) {
            (NameType::IndexTerm, _) => Self::IndexTerm,
            (NameType::FullySpecified, true) => Self::PreferredFullySpecified,
            (NameType::FullySpecified, false) => Self::FullySpecified,
            (_, true) => Self::Preferred,
            (NameType::Synonym, false) => Self::Synonym,
            (NameType::Short, false) => Self::Short,
            (NameType::Untyped, false) => Self::Untyped,
        }
    }

    const fn tier(self) -> u64 {
        self as u64 + 1
    }
}

/// Shape of one name as seen by the weight function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NameShape {
    pub(crate) precedence: NamePrecedence,
    pub(crate) normalized_chars: usize,
    pub(crate) token_count: usize,
}

impl NameShape {
    pub(crate) fn new(precedence: NamePrecedence, tokens: &[Token]) -> Self {
        let token_chars = tokens
            .iter()
            .map(|token| token.text.chars().count())
            .sum::<usize>();
        Self {
            precedence,
            normalized_chars: token_chars + tokens.len().saturating_sub(1),
            token_count: tokens.len(),
        }
    }
}

pub(crate) fn weigh(token: &Token, shape: NameShape) -> f64 {
    let exact = u64::from(shape.token_count == 1);
    let name_length = clamp(shape.normalized_chars, MAX_NAME_LENGTH);
    let position = clamp(token.position, MAX_POSITION);
    let word_length = clamp(token.text.chars().count(), MAX_WORD_LENGTH);

    let packed = exact * EXACT_MATCH_UNIT
        + shape.precedence.tier() * TIER_UNIT
        + (MAX_NAME_LENGTH - name_length) * NAME_LENGTH_UNIT
        + (MAX_POSITION - position) * POSITION_UNIT
        + (MAX_WORD_LENGTH - word_length);
    u64_to_f64(packed)
}

/// Weight of `word` as a token of `name_text`, or `0.0` when the normalized name does not
/// contain it. Total: never fails for any input.
#[must_use]
pub fn word_weight(
    word: &str,
    name_text: &str,
    precedence: NamePrecedence,
    tokenizer: &Tokenizer,
) -> f64 {
    let wanted = word.trim().to_uppercase();
    if wanted.is_empty() {
        return 0.0;
    }
    let tokens = tokenizer.tokenize(name_text);
    let shape = NameShape::new(precedence, &tokens);
    tokens
        .iter()
        .find(|token| token.text == wanted)
        .map_or(0.0, |token| weigh(token, shape))
}

/// Locale-independent rendering used in log fields.
#[must_use]
pub fn format_weight(weight: f64) -> String {
    format!("{weight:.1}")
}

fn clamp(value: usize, max: u64) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX).min(max)
}

#[allow(
    clippy::cast_precision_loss,
    reason = "packed weights stay below 2^53 and convert exactly"
)]
const fn u64_to_f64(value: u64) -> f64 {
    value as f64
}
