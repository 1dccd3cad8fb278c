//! Keyword document parsing.
//!
//! # Responsibilities
//! - Parse the plain-text keyword format: one keyword per line, or several
//!   per line separated by commas
//! - Discard blank lines and `#` comment lines
//! - Lowercase every keyword so matching is case-insensitive by construction
//!
//! # Design Decisions
//! - Order-preserving: keyword-set order is document order, and the match
//!   engine tie-breaks on it
//! - Duplicates are harmless and kept as-is

/// Parse raw keyword document text into an ordered keyword list.
///
/// Returns an empty vector when no usable keywords are present; callers
/// treat that as a failed reload, not as a valid set.
pub fn parse_keywords(text: &str) -> Vec<String> {
    let mut keywords = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.contains(',') {
            for segment in line.split(',') {
                let segment = segment.trim();
                if !segment.is_empty() {
                    keywords.push(segment.to_lowercase());
                }
            }
        } else {
            keywords.push(line.to_lowercase());
        }
    }

    keywords
}

/// Normalize a configured keyword list the same way parsed documents are:
/// trimmed, lowercased, empties dropped.
pub fn normalize_keywords<I>(words: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .filter_map(|w| {
            let w = w.as_ref().trim();
            if w.is_empty() {
                None
            } else {
                Some(w.to_lowercase())
            }
        })
        .collect()
}

/// Serialize a keyword list back into the recognized document format.
///
/// Used to seed a missing local keyword file with the default list.
pub fn serialize_keywords(keywords: &[String]) -> String {
    let mut out = String::from("# One keyword per line; commas separate multiple keywords on a line.\n");
    for keyword in keywords {
        out.push_str(keyword);
        out.push('\n');
    }
    out
}
