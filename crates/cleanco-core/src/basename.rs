use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::normalize::{fold, strip_punct, strip_tail};
use crate::prepare::{default_terms, NormalizedTerm, PreparedTerms};

bitflags! {
    /// Name positions from which terms are removed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Positions: u8 {
        /// Trailing terms ("Hello World Oy").
        const SUFFIX = 0b0000_0001;
        /// Leading terms ("Oy Hello World").
        const PREFIX = 0b0000_0010;
        /// Interior terms ("Hello Oy World"). Most prone to false positives.
        const MIDDLE = 0b0000_0100;
    }
}

impl Default for Positions {
    fn default() -> Self {
        Positions::SUFFIX
    }
}

/// Serializable form of [`Positions`], used in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasenameOptions {
    pub suffix: bool,
    pub prefix: bool,
    pub middle: bool,
}

impl Default for BasenameOptions {
    fn default() -> Self {
        Self {
            suffix: true,
            prefix: false,
            middle: false,
        }
    }
}

impl From<BasenameOptions> for Positions {
    fn from(opts: BasenameOptions) -> Self {
        let mut p = Positions::empty();
        p.set(Positions::SUFFIX, opts.suffix);
        p.set(Positions::PREFIX, opts.prefix);
        p.set(Positions::MIDDLE, opts.middle);
        p
    }
}

impl From<Positions> for BasenameOptions {
    fn from(p: Positions) -> Self {
        Self {
            suffix: p.contains(Positions::SUFFIX),
            prefix: p.contains(Positions::PREFIX),
            middle: p.contains(Positions::MIDDLE),
        }
    }
}

/// Display tokens and their normalized counterparts, index-aligned.
///
/// All removals go through this type so both sequences shrink together.
#[derive(Debug, Clone)]
struct NameBuffer<'a> {
    display: Vec<&'a str>,
    normalized: Vec<String>,
}

impl<'a> NameBuffer<'a> {
    /// `name` must already be tail-stripped.
    fn new(name: &'a str) -> Self {
        let display: Vec<&str> = name.split_whitespace().collect();
        let normalized: Vec<String> = display.iter().map(|t| normalize_token(t)).collect();
        let buf = Self {
            display,
            normalized,
        };
        buf.check();
        buf
    }

    fn len(&self) -> usize {
        self.normalized.len()
    }

    fn check(&self) {
        debug_assert_eq!(self.display.len(), self.normalized.len());
    }

    fn ends_with(&self, term: &NormalizedTerm) -> bool {
        self.normalized.ends_with(term.tokens())
    }

    fn starts_with(&self, term: &NormalizedTerm) -> bool {
        self.normalized.starts_with(term.tokens())
    }

    /// First contiguous occurrence of `term` at any offset.
    fn find(&self, term: &NormalizedTerm) -> Option<usize> {
        self.normalized
            .windows(term.len())
            .position(|w| w == term.tokens())
    }

    /// First occurrence of a single token, excluding the first and last token.
    fn find_interior(&self, token: &str) -> Option<usize> {
        if self.len() < 3 {
            return None;
        }
        self.normalized[1..self.len() - 1]
            .iter()
            .position(|t| t == token)
            .map(|i| i + 1)
    }

    fn remove_range(&mut self, start: usize, len: usize) {
        self.normalized.drain(start..start + len);
        self.display.drain(start..start + len);
        self.check();
    }

    fn remove_suffix(&mut self, len: usize) {
        let start = self.len() - len;
        self.remove_range(start, len);
    }

    fn remove_prefix(&mut self, len: usize) {
        self.remove_range(0, len);
    }

    fn into_display(self) -> String {
        self.display.join(" ")
    }
}

/// Fold one display token for matching.
///
/// Compatibility decomposition can produce spaces (`¨` becomes a space plus
/// a combining mark), which are squeezed out so one display token always
/// yields exactly one normalized token.
fn normalize_token(token: &str) -> String {
    strip_punct(&fold(token)).split_whitespace().collect()
}

/// Remove known organizational-form terms from a company name.
///
/// Each enabled position is scanned once over `terms` in prepared order
/// (most tokens first); every term removes at most one occurrence, so names
/// with stacked terms in one position may need another call.
/// The casing and diacritics of the remaining tokens are untouched.
pub fn custom_basename(name: &str, terms: &PreparedTerms, positions: Positions) -> String {
    let mut buf = NameBuffer::new(strip_tail(name));
    // The interior gate counts tokens as they were before any removal.
    let initial_len = buf.len();

    if positions.contains(Positions::SUFFIX) {
        for term in terms {
            if buf.ends_with(term) {
                tracing::trace!(term = %term.joined(), "Removing suffix");
                buf.remove_suffix(term.len());
            }
        }
    }

    if positions.contains(Positions::PREFIX) {
        for term in terms {
            if buf.starts_with(term) {
                tracing::trace!(term = %term.joined(), "Removing prefix");
                buf.remove_prefix(term.len());
            }
        }
    }

    if positions.contains(Positions::MIDDLE) {
        for term in terms {
            let found = if term.len() > 1 {
                if initial_len > term.len() + 1 {
                    buf.find(term)
                } else {
                    None
                }
            } else {
                buf.find_interior(&term.tokens()[0])
            };
            if let Some(start) = found {
                tracing::trace!(term = %term.joined(), start, "Removing interior term");
                buf.remove_range(start, term.len());
            }
        }
    }

    strip_tail(&buf.into_display()).trim().to_string()
}

/// [`custom_basename`] over the embedded term dictionaries.
///
/// # Example
/// ```
/// use cleanco_core::{basename, Positions};
///
/// assert_eq!(basename("Hello World Oy", Positions::default()), "Hello World");
/// assert_eq!(basename("Some Big Pharma, LLC", Positions::default()), "Some Big Pharma");
/// assert_eq!(basename("Oy Hello World Ab", Positions::all()), "Hello World");
/// ```
pub fn basename(name: &str, positions: Positions) -> String {
    custom_basename(name, default_terms(), positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termdb::TermCategory;

    const ALL: Positions = Positions::all();

    fn terms(list: &[&str]) -> PreparedTerms {
        let cat = TermCategory {
            name: "Test".into(),
            terms: list.iter().map(|t| t.to_string()).collect(),
        };
        PreparedTerms::new(&[cat], &[])
    }

    // ── NameBuffer ────────────────────────────────────────────────────

    #[test]
    fn buffer_aligned_on_creation() {
        let buf = NameBuffer::new("Łoś  spółka z o.o");
        assert_eq!(buf.display, vec!["Łoś", "spółka", "z", "o.o"]);
        assert_eq!(buf.normalized, vec!["los", "spolka", "z", "oo"]);
    }

    #[test]
    fn buffer_keeps_empty_normalized_tokens() {
        // A lone dash folds to an empty token but still occupies a slot.
        let buf = NameBuffer::new("Hello - World");
        assert_eq!(buf.normalized, vec!["hello", "", "world"]);
        assert_eq!(buf.display.len(), 3);
    }

    #[test]
    fn buffer_aligned_when_folding_adds_spaces() {
        let buf = NameBuffer::new("Foo\u{00A8}Bar Oy");
        assert_eq!(buf.display.len(), 2);
        assert_eq!(buf.normalized, vec!["foobar", "oy"]);
    }

    #[test]
    fn buffer_stays_aligned_through_removals() {
        let mut buf = NameBuffer::new("Ab Oy Hello Pty Ltd World Oy Ab");
        buf.remove_prefix(1);
        assert_eq!(buf.display.len(), buf.normalized.len());
        buf.remove_suffix(2);
        assert_eq!(buf.display.len(), buf.normalized.len());
        buf.remove_range(2, 2);
        assert_eq!(buf.display.len(), buf.normalized.len());
        assert_eq!(buf.display, vec!["Oy", "Hello", "World"]);
        assert_eq!(buf.normalized, vec!["oy", "hello", "world"]);
    }

    #[test]
    fn buffer_find_interior_excludes_edges() {
        let buf = NameBuffer::new("Oy Hello Oy");
        assert_eq!(buf.find_interior("oy"), None);
        let buf = NameBuffer::new("Oy Hello Oy World");
        assert_eq!(buf.find_interior("oy"), Some(2));
        let buf = NameBuffer::new("Oy Oy");
        assert_eq!(buf.find_interior("oy"), None);
    }

    #[test]
    fn buffer_empty_name() {
        let buf = NameBuffer::new("");
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.into_display(), "");
    }

    // ── Positions ─────────────────────────────────────────────────────

    #[test]
    fn default_positions_is_suffix_only() {
        assert_eq!(Positions::default(), Positions::SUFFIX);
        assert_eq!(Positions::from(BasenameOptions::default()), Positions::SUFFIX);
    }

    #[test]
    fn options_conversion() {
        let opts = BasenameOptions {
            suffix: false,
            prefix: true,
            middle: true,
        };
        let p = Positions::from(opts);
        assert_eq!(p, Positions::PREFIX | Positions::MIDDLE);
        assert_eq!(BasenameOptions::from(p), opts);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: BasenameOptions = serde_json::from_str(r#"{"middle": true}"#).unwrap();
        assert!(opts.suffix);
        assert!(!opts.prefix);
        assert!(opts.middle);
    }

    // ── Embedded terms ────────────────────────────────────────────────

    #[test]
    fn basic_cleanup() {
        let variations = [
            "Hello World Oy",
            "Hello World, ltd.",
            "Hello    World ltd",
            "Hello World ltd ",
            "Hello World ltd. ",
            " Hello World ltd. ",
        ];
        for v in variations {
            assert_eq!(basename(v, Positions::default()), "Hello World", "input: {v:?}");
        }
    }

    #[test]
    fn llc_suffix_with_comma() {
        assert_eq!(
            basename("Some Big Pharma, LLC", Positions::default()),
            "Some Big Pharma"
        );
    }

    #[test]
    fn multi_position_cleanup() {
        let variations = [
            "Hello World Oy",
            "Hello World sro",
            "Oy Hello World",
            "Oy Hello World Ab",
            "Hello Oy World",
            "Hello pty ltd World",
            "Hello Oy World Ab",
        ];
        for v in variations {
            assert_eq!(basename(v, ALL), "Hello World", "input: {v:?}");
        }
    }

    #[test]
    fn double_cleanup_needs_two_passes() {
        let variations = ["Ab Oy Hello World", "Hello World Ab Oy", "Hello Ab Oy World"];
        for v in variations {
            let once = basename(v, ALL);
            assert_eq!(basename(&once, ALL), "Hello World", "input: {v:?}");
        }
    }

    #[test]
    fn stacked_suffixes_not_reduced_in_one_pass() {
        let once = basename("Hello World Ab Oy", Positions::default());
        assert_eq!(once, "Hello World Ab");
        assert_eq!(basename(&once, Positions::default()), "Hello World");
    }

    #[test]
    fn preserving_cleanup() {
        assert_eq!(basename("Hello, World, ltd.", Positions::default()), "Hello, World");
        assert_eq!(basename("Hello. World, Oy", Positions::default()), "Hello. World");
    }

    #[test]
    fn unicode_umlauts() {
        let p = Positions::SUFFIX | Positions::PREFIX;
        let cases = [
            ("Säätämö Oy", "Säätämö"),
            ("Säätämö, Oy", "Säätämö"),
            ("Säätämo Oy", "Säätämo"),
            ("Äätämo Oy", "Äätämo"),
            ("Äätämö", "Äätämö"),
            (
                "ОАО Новороссийский морской торговый порт",
                "Новороссийский морской торговый порт",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(basename(input, p), expected, "input: {input:?}");
        }
    }

    #[test]
    fn terms_with_accents() {
        assert_eq!(basename("Łoś spółka z o.o", Positions::SUFFIX), "Łoś");
        assert_eq!(basename("Łoś spolka z o.o", Positions::SUFFIX), "Łoś");
    }

    #[test]
    fn no_match_returns_tail_stripped_name() {
        assert_eq!(basename("Äätämö, ", ALL), "Äätämö");
        assert_eq!(basename("Plain Name", ALL), "Plain Name");
    }

    #[test]
    fn stable_after_reduction() {
        for name in ["Hello World Oy", "Oy Hello World Ab", "Hello pty ltd World"] {
            let once = basename(name, ALL);
            assert_eq!(basename(&once, ALL), once);
        }
    }

    // ── Custom term lists ─────────────────────────────────────────────

    #[test]
    fn empty_term_list_only_strips_tail() {
        let empty = PreparedTerms::default();
        assert_eq!(custom_basename("Hello World Oy, ", &empty, ALL), "Hello World Oy");
    }

    #[test]
    fn empty_name() {
        assert_eq!(custom_basename("", &terms(&["oy"]), ALL), "");
        assert_eq!(custom_basename("  ", &terms(&["oy"]), ALL), "");
    }

    #[test]
    fn longest_term_wins() {
        let t = terms(&["sp", "sp zoo", "zoo"]);
        assert_eq!(custom_basename("Acme sp zoo", &t, Positions::SUFFIX), "Acme");
        assert_eq!(custom_basename("sp zoo Acme", &t, Positions::PREFIX), "Acme");
    }

    #[test]
    fn disabled_positions_untouched() {
        let t = terms(&["oy"]);
        assert_eq!(custom_basename("Oy Hello Oy", &t, Positions::empty()), "Oy Hello Oy");
        assert_eq!(custom_basename("Oy Hello Oy", &t, Positions::PREFIX), "Hello Oy");
        assert_eq!(custom_basename("Oy Hello Oy", &t, Positions::SUFFIX), "Oy Hello");
    }

    #[test]
    fn suffix_match_is_fold_insensitive() {
        let t = terms(&["osakeyhtiö"]);
        assert_eq!(
            custom_basename("Pörssi OSAKEYHTIO", &t, Positions::SUFFIX),
            "Pörssi"
        );
    }

    #[test]
    fn each_term_removes_one_occurrence_per_position() {
        let t = terms(&["oy"]);
        assert_eq!(custom_basename("Hello Oy Oy", &t, Positions::SUFFIX), "Hello Oy");
    }

    #[test]
    fn middle_multi_token_needs_room() {
        let t = terms(&["pty ltd"]);
        // Only one other token in the original name: interior removal is not attempted.
        assert_eq!(custom_basename("Hello pty ltd", &t, Positions::MIDDLE), "Hello pty ltd");
        assert_eq!(custom_basename("pty ltd Hello", &t, Positions::MIDDLE), "pty ltd Hello");
        assert_eq!(
            custom_basename("Hello pty ltd World", &t, Positions::MIDDLE),
            "Hello World"
        );
    }

    #[test]
    fn middle_gate_uses_length_before_other_passes() {
        let t = terms(&["oy", "pty ltd"]);
        // The prefix pass leaves only three tokens, but the name started with four.
        assert_eq!(custom_basename("Oy pty ltd Hello", &t, ALL), "Hello");
        assert_eq!(
            custom_basename("Oy pty ltd Hello", &t, Positions::PREFIX),
            "pty ltd Hello"
        );
    }

    #[test]
    fn middle_multi_token_removes_first_occurrence_only() {
        let t = terms(&["pty ltd"]);
        assert_eq!(
            custom_basename("A pty ltd B pty ltd C", &t, Positions::MIDDLE),
            "A B pty ltd C"
        );
    }

    #[test]
    fn middle_single_token_removes_first_interior_occurrence() {
        let t = terms(&["oy"]);
        assert_eq!(
            custom_basename("Oy Hello Oy World Oy Inc", &t, Positions::MIDDLE),
            "Oy Hello World Oy Inc"
        );
        assert_eq!(custom_basename("Hello Oy", &t, Positions::MIDDLE), "Hello Oy");
    }

    #[test]
    fn removal_exposes_new_tail() {
        let t = terms(&["oy"]);
        assert_eq!(custom_basename("Hello World, Oy", &t, Positions::SUFFIX), "Hello World");
        assert_eq!(custom_basename("Hello World 3 Oy", &t, Positions::SUFFIX), "Hello World");
    }

    #[test]
    fn whole_name_can_be_a_term() {
        let t = terms(&["oy"]);
        assert_eq!(custom_basename("Oy", &t, Positions::SUFFIX), "");
    }

    #[test]
    fn punctuation_in_name_tokens_ignored() {
        let t = terms(&["s.r.o."]);
        assert_eq!(custom_basename("Firma s.r.o", &t, Positions::SUFFIX), "Firma");
        assert_eq!(custom_basename("Firma S.R.O.", &t, Positions::SUFFIX), "Firma");
        assert_eq!(custom_basename("Firma sro", &t, Positions::SUFFIX), "Firma");
    }
}
