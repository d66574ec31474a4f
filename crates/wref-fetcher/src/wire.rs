//! JSON shape returned by the dictionary lookup service.
//!
//! The service groups entries into sections ("Principal Translations",
//! "Additional Translations", ...). Sections are flattened in order, so the
//! resulting entry list keeps the service's ranking.

use serde::Deserialize;
use wref_types::{ExampleSentence, Translation, TranslationEntry};

#[derive(Debug, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub translations: Vec<WireSection>,
}

#[derive(Debug, Deserialize)]
pub struct WireSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub entries: Vec<WireEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WireEntry {
    /// Sense hint shared by all translations of the entry
    #[serde(default)]
    pub context: String,
    pub from_word: WireSourceWord,
    #[serde(default)]
    pub to_word: Vec<WireTargetWord>,
    #[serde(default)]
    pub from_example: String,
    #[serde(default)]
    pub to_example: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireSourceWord {
    pub source: String,
    #[serde(default)]
    pub grammar: String,
}

#[derive(Debug, Deserialize)]
pub struct WireTargetWord {
    pub meaning: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub grammar: String,
}

impl WireResponse {
    pub fn into_entries(self) -> Vec<TranslationEntry> {
        self.translations
            .into_iter()
            .flat_map(|section| section.entries)
            .map(WireEntry::into_entry)
            .collect()
    }
}

impl WireEntry {
    fn into_entry(self) -> TranslationEntry {
        let entry_context = non_empty(self.context);

        let translations = self
            .to_word
            .into_iter()
            .filter(|word| !word.meaning.trim().is_empty())
            .map(|word| {
                let text = join_nonempty(&[word.meaning.trim(), word.grammar.trim()]);
                let context = non_empty(word.notes).or_else(|| entry_context.clone());
                Translation { text, context }
            })
            .collect();

        let from_example = self.from_example.trim().to_string();
        let examples = if from_example.is_empty() {
            Vec::new()
        } else if self.to_example.is_empty() {
            vec![ExampleSentence {
                source_sentence: from_example,
                target_sentence: String::new(),
            }]
        } else {
            self.to_example
                .into_iter()
                .map(|target| ExampleSentence {
                    source_sentence: from_example.clone(),
                    target_sentence: target.trim().to_string(),
                })
                .collect()
        };

        TranslationEntry {
            headword: self.from_word.source.trim().to_string(),
            part_of_speech: self.from_word.grammar.trim().to_string(),
            translations,
            examples,
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn join_nonempty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
