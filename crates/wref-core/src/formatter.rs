//! Turns lookup outcomes into display items.
//!
//! Output depends only on the inputs and the display config, so the same
//! `(query, outcome)` always renders the same items.

use wref_config::display::DisplayConfig;
use wref_fetcher::{FetchError, FetchOutcome};
use wref_types::{Action, DisplayItem, LanguageCode, LanguagePair, Query, TranslationEntry};

use crate::error::ParseError;
use crate::lookup::lookup_url;

const EXAMPLE_INPUT: &str = "enfr hello";
const EXAMPLE_ARROW: &str = " ⟹ ";
const EXAMPLE_PAIRS: [(LanguageCode, LanguageCode); 4] = [
    (LanguageCode::En, LanguageCode::Fr),
    (LanguageCode::Fr, LanguageCode::En),
    (LanguageCode::En, LanguageCode::De),
    (LanguageCode::Es, LanguageCode::En),
];

#[derive(Debug, Clone)]
pub struct ResultFormatter {
    lookup_base_url: String,
    separator: String,
    full_page_item: bool,
}

impl ResultFormatter {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            lookup_base_url: config.lookup_base_url.clone(),
            separator: config.separator.clone(),
            full_page_item: config.full_page_item,
        }
    }

    pub fn lookup_url(&self, query: &Query) -> String {
        lookup_url(&self.lookup_base_url, query)
    }

    /// Render a finished lookup. Cancelled lookups render nothing.
    pub fn format(&self, query: &Query, outcome: &FetchOutcome) -> Vec<DisplayItem> {
        match outcome {
            Ok(entries) if !entries.is_empty() => self.format_entries(query, entries),
            Ok(_) | Err(FetchError::NotFound) => vec![self.not_found_item(query)],
            Err(FetchError::NetworkError(reason)) => vec![DisplayItem {
                title: "Network error".to_string(),
                subtitle: format!("Could not reach the dictionary service ({reason})"),
                actions: vec![],
            }],
            Err(FetchError::ServiceFormatError(_)) => vec![DisplayItem {
                title: "Translation error".to_string(),
                subtitle: "The dictionary service returned an unexpected response".to_string(),
                actions: vec![],
            }],
            Err(FetchError::Cancelled) => vec![],
        }
    }

    pub fn format_parse_error(&self, err: &ParseError) -> DisplayItem {
        match err {
            ParseError::InvalidPairFormat { .. } => DisplayItem {
                title: "WordReference Translation".to_string(),
                subtitle: format!("Format: [language_pair] [word] (e.g., '{EXAMPLE_INPUT}')"),
                actions: vec![Action::CopyToClipboard(EXAMPLE_INPUT.to_string())],
            },
            ParseError::UnsupportedLanguagePair { token } => {
                let examples: Vec<String> = EXAMPLE_PAIRS
                    .iter()
                    .map(|&(source, target)| {
                        let pair = LanguagePair::new(source, target);
                        format!("{} ({} to {})", pair.code(), source.name(), target.name())
                    })
                    .collect();
                DisplayItem {
                    title: format!("Invalid language pair: {token}"),
                    subtitle: format!("Try {}", examples.join(", ")),
                    actions: vec![],
                }
            }
            ParseError::MissingWord { pair } => DisplayItem {
                title: "Type a word to translate".to_string(),
                subtitle: format!(
                    "{} to {} (e.g., '{} hello')",
                    pair.source.name(),
                    pair.target.name(),
                    pair.code()
                ),
                actions: vec![],
            },
        }
    }

    fn format_entries(&self, query: &Query, entries: &[TranslationEntry]) -> Vec<DisplayItem> {
        let url = self.lookup_url(query);
        let mut items: Vec<DisplayItem> = entries
            .iter()
            .map(|entry| {
                let subtitle = self.subtitle(entry);
                let mut actions = Vec::with_capacity(2);
                if !subtitle.is_empty() {
                    actions.push(Action::CopyToClipboard(subtitle.clone()));
                }
                actions.push(Action::OpenInBrowser(url.clone()));
                DisplayItem {
                    title: title(entry),
                    subtitle,
                    actions,
                }
            })
            .collect();

        if self.full_page_item {
            items.push(DisplayItem {
                title: "Open full page".to_string(),
                subtitle: url.clone(),
                actions: vec![Action::OpenInBrowser(url)],
            });
        }

        items
    }

    fn not_found_item(&self, query: &Query) -> DisplayItem {
        DisplayItem {
            title: format!("No translation found for '{}'", query.word),
            subtitle: format!(
                "{} to {}, open the dictionary page to check manually",
                query.pair.source.name(),
                query.pair.target.name()
            ),
            actions: vec![Action::OpenInBrowser(self.lookup_url(query))],
        }
    }

    fn subtitle(&self, entry: &TranslationEntry) -> String {
        let translations = entry
            .translations
            .iter()
            .map(|t| match &t.context {
                Some(context) if !context.is_empty() => format!("{} ({context})", t.text),
                _ => t.text.clone(),
            })
            .collect::<Vec<_>>()
            .join(&self.separator);

        let mut lines = Vec::with_capacity(entry.examples.len() + 1);
        if !translations.is_empty() {
            lines.push(translations);
        }
        for example in &entry.examples {
            if example.target_sentence.is_empty() {
                lines.push(example.source_sentence.clone());
            } else {
                lines.push(format!(
                    "{}{EXAMPLE_ARROW}{}",
                    example.source_sentence, example.target_sentence
                ));
            }
        }

        lines.join("\n")
    }
}

fn title(entry: &TranslationEntry) -> String {
    let pos = entry.part_of_speech.trim();
    if pos.is_empty() {
        entry.headword.clone()
    } else {
        format!("{} ({pos})", entry.headword)
    }
}
