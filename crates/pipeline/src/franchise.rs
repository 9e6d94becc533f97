//! Franchise key extraction.
//!
//! Sequels, seasons, movies and specials of the same franchise carry near
//! identical metadata, so a naive top-K list for "Attack on Titan" is just
//! its own seasons. The franchise key groups those under one identity: the
//! title with the usual sequel markers stripped, lowercased.
//!
//! This is a heuristic. It can both under-merge (franchises whose entries
//! share no title stem) and over-merge (distinct shows with a common
//! prefix); both are accepted approximations, not defects to correct
//! per-title.
//!
//! ## Algorithm
//! Lowercase the title, then strip the first occurrence of each pattern,
//! in this order:
//! 1. anything after a colon
//! 2. "season N" and its suffix
//! 3. "Nth season" and its suffix
//! 4. "part N" and its suffix
//! 5. "movie"/"film"/"ova"/"ona"/"special"/"recap" and its suffix
//! 6. trailing parenthesized text
//! 7. a trailing standalone number
//! 8. trailing roman numerals (ii/iii/iv/v)
//!
//! then collapse whitespace and trim. A result shorter than 3 characters
//! falls back to the first 3 words of the lowercased original title.

use regex::Regex;
use std::sync::LazyLock;

static STRIP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r":.*$",
        r"\bseason\s+\d+.*$",
        r"\b\d+(?:st|nd|rd|th)\s+season.*$",
        r"\bpart\s+\d+.*$",
        r"\b(?:movie|film|ova|ona|special|recap)\b.*$",
        r"\s*\([^)]*\)\s*$",
        r"\s+\d+\s*$",
        r"\s+(?:ii|iii|iv|v)\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Minimum key length before falling back to a word prefix of the title.
const MIN_KEY_LEN: usize = 3;

/// Number of leading words used by the fallback key.
const FALLBACK_WORDS: usize = 3;

/// Derive the canonical franchise key for a title.
///
/// The key is always non-empty for a non-empty title: if stripping leaves
/// fewer than 3 characters, the first 3 words of the lowercased title are
/// used instead (fewer if the title is shorter).
pub fn franchise_key(title: &str) -> String {
    let lowered = title.to_lowercase();

    let mut key = lowered.clone();
    for pattern in STRIP_PATTERNS.iter() {
        key = pattern.replace(&key, "").into_owned();
    }
    let key = WHITESPACE.replace_all(&key, " ").trim().to_string();

    if key.chars().count() >= MIN_KEY_LEN {
        key
    } else {
        lowered
            .split_whitespace()
            .take(FALLBACK_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Secondary same-franchise check by title containment.
///
/// Treats the candidate as the same franchise as the source when the
/// source's franchise key is a literal substring of the candidate's
/// lowercased title, or the candidate's key is a substring of the source's
/// lowercased title. Only consulted by the ranker when the containment
/// check is enabled in the configuration; it is deliberately not part of
/// the key itself.
pub fn containment_match(
    source_key: &str,
    source_title_lower: &str,
    candidate_key: &str,
    candidate_title_lower: &str,
) -> bool {
    candidate_title_lower.contains(source_key) || source_title_lower.contains(candidate_key)
}
