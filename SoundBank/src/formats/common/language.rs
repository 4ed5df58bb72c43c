//! Fixed language table
//!
//! Localized asset records list the languages they ship in by name. Each
//! name maps to a single-letter code; the mapping is a fixed bijection.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// One of the ten languages an asset can be localized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    EnglishUs,
    FrenchFrance,
    German,
    Italian,
    Japanese,
    Polish,
    PortugueseBrazil,
    Russian,
    SpanishMexico,
    SpanishSpain,
}

lazy_static::lazy_static! {
    static ref BY_NAME: HashMap<&'static str, Language> =
        Language::ALL.iter().map(|&lang| (lang.name(), lang)).collect();
}

impl Language {
    /// All languages, in table order.
    pub const ALL: [Language; 10] = [
        Language::EnglishUs,
        Language::FrenchFrance,
        Language::German,
        Language::Italian,
        Language::Japanese,
        Language::Polish,
        Language::PortugueseBrazil,
        Language::Russian,
        Language::SpanishMexico,
        Language::SpanishSpain,
    ];

    /// Name as stored in the catalog.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Language::EnglishUs => "English(US)",
            Language::FrenchFrance => "French(France)",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Polish => "Polish",
            Language::PortugueseBrazil => "Portuguese(Brazil)",
            Language::Russian => "Russian",
            Language::SpanishMexico => "Spanish(Mexico)",
            Language::SpanishSpain => "Spanish(Spain)",
        }
    }

    /// Single-letter code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Language::EnglishUs => 'E',
            Language::FrenchFrance => 'F',
            Language::German => 'G',
            Language::Italian => 'I',
            Language::Japanese => 'J',
            Language::Polish => 'P',
            Language::PortugueseBrazil => 'B',
            Language::Russian => 'R',
            Language::SpanishMexico => 'M',
            Language::SpanishSpain => 'S',
        }
    }

    /// Look up a language by its catalog name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }

    /// Look up a language by its single-letter code.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.code() == code)
    }
}

/// A language name that is not in the fixed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguageName(pub String);

impl fmt::Display for UnknownLanguageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language '{}'", self.0)
    }
}

impl std::error::Error for UnknownLanguageName {}

impl FromStr for Language {
    type Err = UnknownLanguageName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownLanguageName(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concatenate the codes of `langs`, e.g. `"EFG"`.
#[must_use]
pub fn code_string<I: IntoIterator<Item = Language>>(langs: I) -> String {
    langs.into_iter().map(Language::code).collect()
}
