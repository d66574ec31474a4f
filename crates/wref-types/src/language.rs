use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-letter language codes understood by the dictionary service.
///
/// The codes follow the service's own URL scheme, which differs from ISO 639-1
/// in a couple of places (`cz` for Czech, `gr` for Greek).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Ar,
    Ca,
    Cz,
    De,
    En,
    Es,
    Fr,
    Gr,
    Is,
    It,
    Ja,
    Ko,
    Nl,
    Pl,
    Pt,
    Ro,
    Ru,
    Sv,
    Tr,
    Zh,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 20] = [
        Self::Ar,
        Self::Ca,
        Self::Cz,
        Self::De,
        Self::En,
        Self::Es,
        Self::Fr,
        Self::Gr,
        Self::Is,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::Nl,
        Self::Pl,
        Self::Pt,
        Self::Ro,
        Self::Ru,
        Self::Sv,
        Self::Tr,
        Self::Zh,
    ];

    /// Look up a lowercase two-letter code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::Ca => "ca",
            Self::Cz => "cz",
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Gr => "gr",
            Self::Is => "is",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Nl => "nl",
            Self::Pl => "pl",
            Self::Pt => "pt",
            Self::Ro => "ro",
            Self::Ru => "ru",
            Self::Sv => "sv",
            Self::Tr => "tr",
            Self::Zh => "zh",
        }
    }

    /// English display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Ar => "Arabic",
            Self::Ca => "Catalan",
            Self::Cz => "Czech",
            Self::De => "German",
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::Gr => "Greek",
            Self::Is => "Icelandic",
            Self::It => "Italian",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
            Self::Nl => "Dutch",
            Self::Pl => "Polish",
            Self::Pt => "Portuguese",
            Self::Ro => "Romanian",
            Self::Ru => "Russian",
            Self::Sv => "Swedish",
            Self::Tr => "Turkish",
            Self::Zh => "Chinese",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
