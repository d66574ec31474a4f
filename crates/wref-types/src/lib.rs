pub mod language;
pub mod types;

pub use language::LanguageCode;
pub use types::*;
