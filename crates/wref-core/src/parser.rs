use wref_types::{LanguageCode, LanguagePair, Query};

use crate::error::ParseError;

/// Split raw trigger input (`enfr hello`) into a validated query.
///
/// The pair token is case-insensitive. The word is everything after the first
/// whitespace run, trimmed, with inner spacing kept (`enfr ice cream`).
/// Same-language pairs such as `enen` are rejected as unsupported.
pub fn parse(raw: &str) -> Result<Query, ParseError> {
    let trimmed = raw.trim();
    let (token, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (trimmed, ""),
    };

    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ParseError::InvalidPairFormat {
            token: token.to_string(),
        });
    }

    let token = token.to_ascii_lowercase();
    let (source, target) = token.split_at(2);
    let pair = match (LanguageCode::from_code(source), LanguageCode::from_code(target)) {
        (Some(source), Some(target)) if source != target => LanguagePair::new(source, target),
        _ => return Err(ParseError::UnsupportedLanguagePair { token }),
    };

    if rest.is_empty() {
        return Err(ParseError::MissingWord { pair });
    }

    Ok(Query {
        pair,
        word: rest.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_fr() -> LanguagePair {
        LanguagePair::new(LanguageCode::En, LanguageCode::Fr)
    }

    #[test]
    fn parses_pair_and_word() {
        let query = parse("enfr hello").unwrap();
        assert_eq!(query.pair, en_fr());
        assert_eq!(query.word, "hello");
    }

    #[test]
    fn trims_word_and_keeps_inner_spaces() {
        let query = parse("  enfr \t ice cream  ").unwrap();
        assert_eq!(query.word, "ice cream");
    }

    #[test]
    fn pair_token_is_case_insensitive() {
        assert_eq!(parse("ENfr hello").unwrap().pair, en_fr());
    }

    #[test]
    fn every_supported_pair_round_trips() {
        for source in LanguageCode::ALL {
            for target in LanguageCode::ALL {
                if source == target {
                    continue;
                }
                let raw = format!("{}{} mot juste ", source.code(), target.code());
                let query = parse(&raw).unwrap();
                assert_eq!(query.pair, LanguagePair::new(source, target));
                assert_eq!(query.word, "mot juste");
            }
        }
    }

    #[test]
    fn missing_word() {
        for raw in ["enfr", "enfr ", "  enfr   \t"] {
            assert_eq!(
                parse(raw),
                Err(ParseError::MissingWord { pair: en_fr() }),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn pair_token_must_be_four_letters() {
        for raw in ["", "   ", "en hello", "enfrde hello", "en1r hello", "énfr hello", "enf hello"] {
            assert!(
                matches!(parse(raw), Err(ParseError::InvalidPairFormat { .. })),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn unknown_codes_are_unsupported() {
        assert_eq!(
            parse("xxen car"),
            Err(ParseError::UnsupportedLanguagePair {
                token: "xxen".to_string()
            })
        );
        assert!(matches!(
            parse("enqq car"),
            Err(ParseError::UnsupportedLanguagePair { .. })
        ));
    }

    #[test]
    fn same_language_pairs_are_rejected() {
        assert_eq!(
            parse("enen hello"),
            Err(ParseError::UnsupportedLanguagePair {
                token: "enen".to_string()
            })
        );
    }
}
