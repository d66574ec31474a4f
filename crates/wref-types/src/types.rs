use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw trigger remainder typed by the user, e.g. `enfr hello`
    TextInput(String),
    InvokeAction { item: usize, kind: ActionKind },
}

/// Translate-from / translate-to pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: LanguageCode, target: LanguageCode) -> Self {
        Self { source, target }
    }

    /// Four-letter form used in trigger input and lookup URLs (`enfr`)
    pub fn code(&self) -> String {
        format!("{}{}", self.source.code(), self.target.code())
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub pair: LanguagePair,
    pub word: String,
}

/// One grammatical sense of a headword, as ranked by the dictionary service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub headword: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub examples: Vec<ExampleSentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Translation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }

    pub fn with_context(text: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: Some(context.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub source_sentence: String,
    pub target_sentence: String,
}

/// Unit of output handed to the host UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub title: String,
    pub subtitle: String,
    pub actions: Vec<Action>,
}

impl DisplayItem {
    pub fn copy_text(&self) -> Option<&str> {
        self.actions.iter().find_map(|action| match action {
            Action::CopyToClipboard(text) => Some(text.as_str()),
            Action::OpenInBrowser(_) => None,
        })
    }

    pub fn open_url(&self) -> Option<&str> {
        self.actions.iter().find_map(|action| match action {
            Action::OpenInBrowser(url) => Some(url.as_str()),
            Action::CopyToClipboard(_) => None,
        })
    }

    pub fn action(&self, kind: ActionKind) -> Option<&Action> {
        self.actions.iter().find(|action| action.kind() == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Action {
    CopyToClipboard(String),
    OpenInBrowser(String),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::CopyToClipboard(_) => ActionKind::Copy,
            Action::OpenInBrowser(_) => ActionKind::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Copy,
    Open,
}
