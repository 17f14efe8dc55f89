//! Title extraction from listing page markup.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)$").expect("valid year regex"));

/// Collapse whitespace runs (newlines included) to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"Show Name (1998)"` -> `"Show Name"`. Only a trailing 4-digit year is removed.
pub fn normalize_title(raw: &str) -> String {
    let title = normalize_ws(raw);
    TRAILING_YEAR.replace(&title, "").trim_end().to_string()
}

/// Normalized text of every element matching `selector`, in document order.
///
/// One entry per matched element, even if its text is empty, so callers can
/// tell "no matches" from "matches without text".
pub fn extract_titles(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .map(|el| normalize_title(&el.text().collect::<String>()))
        .collect()
}
