use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, VocabError};

/// A `language[_REGION[_VARIANT]]` tag in canonical form (`en`, `en_GB`, `pt_BR_AO1990`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    region: Option<String>,
    variant: Option<String>,
}

impl Locale {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || VocabError::InvalidLocale(value.to_string());
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut parts = trimmed.split(['_', '-']);
        let language = parts.next().ok_or_else(invalid)?;
        if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        let region = match parts.next() {
            None => None,
            Some(raw) if is_region(raw) => Some(raw.to_ascii_uppercase()),
            Some(_) => return Err(invalid()),
        };

        let variant = match parts.next() {
            None => None,
            Some(raw) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) => {
                Some(raw.to_string())
            }
            Some(_) => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
            variant,
        })
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Whether a word indexed under `candidate` is eligible for a search requested in `self`.
    ///
    /// A bare language accepts every regional form of itself. A regional request accepts the
    /// exact tag and the bare language, but not sibling regions. A variant request also accepts
    /// its plain region.
    #[must_use]
    pub fn accepts(&self, candidate: &Self) -> bool {
        if self.language != candidate.language {
            return false;
        }
        if self.region.is_none() {
            return true;
        }
        if candidate.region.is_none() {
            return true;
        }
        self.region == candidate.region
            && (self.variant.is_none()
                || candidate.variant.is_none()
                || self.variant == candidate.variant)
    }

    /// True when any of `requested` accepts `candidate`; an empty request accepts everything.
    #[must_use]
    pub fn any_accepts(requested: &[Self], candidate: &Self) -> bool {
        requested.is_empty() || requested.iter().any(|locale| locale.accepts(candidate))
    }
}

fn is_region(raw: &str) -> bool {
    (raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_alphabetic()))
        || (raw.len() == 3 && raw.bytes().all(|b| b.is_ascii_digit()))
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.language)?;
        if let Some(region) = &self.region {
            write!(f, "_{region}")?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "_{variant}")?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_region_and_variant() {
        let locale = Locale::parse("pt_br_AO1990").expect("parse");
        assert_eq!(locale.language(), "pt");
        assert_eq!(locale.region(), Some("BR"));
        assert_eq!(locale.variant(), Some("AO1990"));
        assert_eq!(locale.to_string(), "pt_BR_AO1990");
    }

    #[test]
    fn accepts_hyphenated_tags_and_numeric_regions() {
        assert_eq!(Locale::parse("EN-gb").expect("parse").to_string(), "en_GB");
        assert_eq!(Locale::parse("es_419").expect("parse").to_string(), "es_419");
    }

    #[test]
    fn rejects_dangling_and_doubled_separators() {
        for raw in ["en_", "en__US", "_US", "", "  ", "e", "engl", "en_U", "en_US_", "en_US_x_y"] {
            assert!(
                matches!(Locale::parse(raw), Err(VocabError::InvalidLocale(_))),
                "{raw:?} must be rejected"
            );
        }
    }

    #[test]
    fn variant_requires_a_region() {
        assert!(Locale::parse("en__POSIX").is_err());
        let locale = Locale::parse("en_US_POSIX").expect("parse");
        assert_eq!(locale.to_string(), "en_US_POSIX");
    }

    #[test]
    fn bare_language_accepts_all_regions() {
        let en = Locale::parse("en").expect("en");
        assert!(en.accepts(&Locale::parse("en_GB").expect("en_GB")));
        assert!(en.accepts(&Locale::parse("en").expect("en")));
        assert!(!en.accepts(&Locale::parse("fr").expect("fr")));
    }

    #[test]
    fn regional_request_accepts_bare_language_but_not_siblings() {
        let en_gb = Locale::parse("en_GB").expect("en_GB");
        assert!(en_gb.accepts(&Locale::parse("en").expect("en")));
        assert!(en_gb.accepts(&Locale::parse("en_GB").expect("en_GB")));
        assert!(!en_gb.accepts(&Locale::parse("en_US").expect("en_US")));
    }

    #[test]
    fn variant_request_falls_back_to_region_and_language() {
        let posix = Locale::parse("en_US_POSIX").expect("en_US_POSIX");
        assert!(posix.accepts(&Locale::parse("en_US_POSIX").expect("en_US_POSIX")));
        assert!(posix.accepts(&Locale::parse("en_US").expect("en_US")));
        assert!(posix.accepts(&Locale::parse("en").expect("en")));
        assert!(!posix.accepts(&Locale::parse("en_GB").expect("en_GB")));
        assert!(!posix.accepts(&Locale::parse("en_US_OTHER").expect("en_US_OTHER")));
    }

    #[test]
    fn empty_request_accepts_any_locale() {
        assert!(Locale::any_accepts(&[], &Locale::parse("sw").expect("sw")));
    }

    #[test]
    fn serde_uses_canonical_string_form() {
        let locale: Locale = serde_json::from_str("\"fr-ca\"").expect("deserialize");
        assert_eq!(serde_json::to_string(&locale).expect("serialize"), "\"fr_CA\"");
        assert!(serde_json::from_str::<Locale>("\"fr_\"").is_err());
    }
}
