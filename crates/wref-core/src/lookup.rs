use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use wref_types::Query;

/// Canonical page for `query` on the dictionary site: `{base}/{pair}/{word}`
pub fn lookup_url(base_url: &str, query: &Query) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        query.pair.code(),
        utf8_percent_encode(&query.word, NON_ALPHANUMERIC)
    )
}
