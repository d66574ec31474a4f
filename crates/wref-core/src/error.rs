use wref_types::LanguagePair;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no word to translate after {pair}")]
    MissingWord { pair: LanguagePair },

    #[error("expected a 4-letter language pair, got '{token}'")]
    InvalidPairFormat { token: String },

    #[error("unsupported language pair: {token}")]
    UnsupportedLanguagePair { token: String },
}
