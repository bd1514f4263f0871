//! The fixed set of supported languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Pt,
    Fr,
    De,
    Nl,
}

impl Language {
    /// Every supported language, in the order sections are visited.
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Pt,
        Language::Fr,
        Language::De,
        Language::Nl,
    ];

    /// The language every other section is translated from.
    pub const SOURCE: Language = Language::En;

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Pt => "pt",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Nl => "nl",
        }
    }

    pub fn is_source(self) -> bool {
        self == Self::SOURCE
    }

    /// Every language except the source.
    pub fn targets() -> impl Iterator<Item = Language> {
        Self::ALL.into_iter().filter(|lang| !lang.is_source())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLanguage {
                code: s.to_string(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
