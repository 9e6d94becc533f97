//! Text normalization for free-text synopsis fields.
//!
//! Synopses arrive with embedded markup (`<br>`, `<i>...</i>` and worse).
//! Normalization is best-effort tag-boundary stripping, not a full HTML
//! parse: anything between `<` and the next `>` is removed, then runs of
//! whitespace collapse to single spaces. Malformed markup never errors; an
//! unclosed `<` simply survives as text.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup tags and collapse whitespace.
///
/// `None` and empty input both normalize to the empty string.
pub fn normalize(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };

    let stripped = TAG.replace_all(raw, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
