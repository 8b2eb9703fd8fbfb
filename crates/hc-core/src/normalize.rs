//! Header and key normalization
//!
//! Exports from the game often carry a byte-order mark on the first header,
//! non-breaking spaces, or stray line endings inside header cells. Column
//! lookups are exact and case-sensitive, so these invisible artifacts have to
//! go before anything is matched against the catalog.

const BOM: char = '\u{feff}';
const NBSP: char = '\u{a0}';

/// Strip invisible artifacts from a header name or record key.
///
/// Letter case and every visible character are preserved. Idempotent.
pub fn normalize(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter_map(|c| match c {
            BOM | '\r' | '\n' => None,
            NBSP | '\t' => Some(' '),
            other => Some(other),
        })
        .collect();

    cleaned.trim().to_string()
}
