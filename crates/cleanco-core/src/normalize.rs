//! Text folding used to compare company names against known terms.
//!
//! Three pure steps, composed differently by each caller:
//! - [`fold`]: lowercase + NFKD + exception table + combining mark removal
//! - [`strip_punct`]: drop `.`, `,` and `-`
//! - [`strip_tail`]: drop a trailing run of non-letter, non-dot characters

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::non_nfkd;

/// Trailing run of anything that is neither a letter nor a dot.
static RE_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{L}.]+$").unwrap());

// ── Folding ───────────────────────────────────────────────────────────

/// Fold text to a case- and accent-insensitive form.
///
/// Lowercases, substitutes characters from the exception table (both before
/// and after NFKD) and drops combining diacritical marks (U+0300..U+036F).
pub fn fold(text: &str) -> String {
    // Table entries that NFKD would otherwise decompose (ŀ → l·) apply first.
    let mut lower = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        match non_nfkd::replacement(c) {
            Some(rep) => lower.push_str(rep),
            None => lower.push(c),
        }
    }
    let mut result = String::with_capacity(lower.len());

    for c in lower.nfkd() {
        if let Some(rep) = non_nfkd::replacement(c) {
            result.push_str(rep);
        } else if !is_combining_mark(c) {
            result.push(c);
        }
    }

    result
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

// ── Punctuation ───────────────────────────────────────────────────────

/// Remove literal dots, commas and hyphens. Other punctuation is kept.
pub fn strip_punct(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '.' | ',' | '-')).collect()
}

// ── Tail stripping ────────────────────────────────────────────────────

/// Remove trailing characters that are neither letters nor `.`.
///
/// Trailing whitespace, commas and digits go; an abbreviation dot stays.
pub fn strip_tail(name: &str) -> &str {
    match RE_TAIL.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}
