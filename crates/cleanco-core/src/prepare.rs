use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::normalize::{fold, strip_punct};
use crate::termdb::{TermCategory, TermDatabase};

static DEFAULT_TERMS: LazyLock<PreparedTerms> =
    LazyLock::new(|| PreparedTerms::from_database(TermDatabase::embedded()));

/// A term folded, stripped of `.,-` and split into tokens. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTerm {
    tokens: Vec<String>,
}

impl NormalizedTerm {
    /// Normalize a surface term. Returns `None` if nothing is left.
    pub fn new(term: &str) -> Option<Self> {
        let tokens: Vec<String> = strip_punct(&fold(term))
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

/// All known terms, longest (most tokens) first, then in lexical order.
///
/// Built once from the dictionaries and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedTerms {
    terms: Vec<NormalizedTerm>,
}

impl PreparedTerms {
    /// Prepare terms from a business-type and a country dictionary.
    ///
    /// Surface terms are deduplicated across both dictionaries before
    /// normalization, so two spellings that fold to the same tokens are
    /// both kept.
    pub fn new(business_types: &[TermCategory], countries: &[TermCategory]) -> Self {
        let unique: BTreeSet<&str> = business_types
            .iter()
            .chain(countries)
            .flat_map(|cat| cat.terms.iter().map(String::as_str))
            .collect();

        let mut keyed: Vec<(String, NormalizedTerm)> = Vec::with_capacity(unique.len());
        for term in unique {
            match NormalizedTerm::new(term) {
                Some(nt) => keyed.push((nt.joined(), nt)),
                None => tracing::warn!(term, "Skipping term with no tokens after normalization"),
            }
        }

        keyed.sort_by(|(ja, a), (jb, b)| b.len().cmp(&a.len()).then_with(|| ja.cmp(jb)));
        let terms: Vec<NormalizedTerm> = keyed.into_iter().map(|(_, nt)| nt).collect();

        tracing::debug!(
            terms = terms.len(),
            longest = terms.first().map_or(0, NormalizedTerm::len),
            "Prepared term list"
        );

        Self { terms }
    }

    pub fn from_database(db: &TermDatabase) -> Self {
        Self::new(&db.business_types, &db.countries)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedTerm> {
        self.terms.iter()
    }
}

impl<'a> IntoIterator for &'a PreparedTerms {
    type Item = &'a NormalizedTerm;
    type IntoIter = std::slice::Iter<'a, NormalizedTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Terms prepared from the embedded dictionaries, computed on first use.
pub fn default_terms() -> &'static PreparedTerms {
    &DEFAULT_TERMS
}
