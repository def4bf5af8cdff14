use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabError};
use crate::locale::Locale;

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = VocabError;

            fn from_str(s: &str) -> Result<Self> {
                s.trim().parse::<i64>().map(Self).map_err(|_| {
                    VocabError::Validation(format!(
                        "invalid {}: {s}",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

surrogate_id!(
    /// Surrogate key of a dictionary term.
    TermId
);
surrogate_id!(
    /// Surrogate key of one localized name.
    NameId
);
surrogate_id!(ClassId);
surrogate_id!(DatatypeId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameType {
    FullySpecified,
    Short,
    Synonym,
    IndexTerm,
    /// Legacy names recorded before name types existed.
    #[default]
    Untyped,
}

impl NameType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullySpecified => "fully_specified",
            Self::Short => "short",
            Self::Synonym => "synonym",
            Self::IndexTerm => "index_term",
            Self::Untyped => "untyped",
        }
    }
}

impl Display for NameType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameType {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fully_specified" | "fsn" => Ok(Self::FullySpecified),
            "short" => Ok(Self::Short),
            "synonym" => Ok(Self::Synonym),
            "index_term" => Ok(Self::IndexTerm),
            "untyped" | "" => Ok(Self::Untyped),
            other => Err(VocabError::Validation(format!(
                "invalid name type: {other} (expected fully_specified|short|synonym|index_term|untyped)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermName {
    pub id: NameId,
    pub term_id: TermId,
    pub text: String,
    pub locale: Locale,
    pub name_type: NameType,
    pub locale_preferred: bool,
    pub voided: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,
    pub date_created: String,
}

impl TermName {
    #[must_use]
    pub fn is_live_fully_specified(&self) -> bool {
        !self.voided && self.name_type == NameType::FullySpecified
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub uuid: String,
    pub class_id: ClassId,
    pub datatype_id: DatatypeId,
    pub voided: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,
    pub date_created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_changed: Option<String>,
    pub names: Vec<TermName>,
}

impl Term {
    pub fn live_names(&self) -> impl Iterator<Item = &TermName> {
        self.names.iter().filter(|name| !name.voided)
    }

    #[must_use]
    pub fn live_fully_specified_count(&self) -> usize {
        self.names
            .iter()
            .filter(|name| name.is_live_fully_specified())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDraft {
    pub text: String,
    pub locale: Locale,
    #[serde(default)]
    pub name_type: NameType,
    #[serde(default)]
    pub locale_preferred: bool,
}

impl NameDraft {
    #[must_use]
    pub fn new(text: impl Into<String>, locale: Locale, name_type: NameType) -> Self {
        Self {
            text: text.into(),
            locale,
            name_type,
            locale_preferred: false,
        }
    }

    #[must_use]
    pub const fn preferred(mut self) -> Self {
        self.locale_preferred = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDraft {
    pub class_id: ClassId,
    pub datatype_id: DatatypeId,
    pub names: Vec<NameDraft>,
    #[serde(default)]
    pub answers: Vec<TermId>,
}

/// One token of one live name, with the weight it ranks by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub term_id: TermId,
    pub name_id: NameId,
    pub word: String,
    pub locale: Locale,
    pub position: usize,
    pub weight: f64,
}
