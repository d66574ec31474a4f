pub mod controller;
pub mod error;
pub mod formatter;
pub mod lookup;
pub mod parser;

pub use controller::{FetchCompletion, QueryController};
pub use error::ParseError;
pub use formatter::ResultFormatter;
pub use parser::parse;
