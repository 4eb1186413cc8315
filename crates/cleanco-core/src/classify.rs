use serde::Serialize;

use crate::normalize::{fold, strip_tail};
use crate::termdb::{self, Source, TermDatabase};

/// Business types and countries a company name points to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub business_types: Vec<String>,
    pub countries: Vec<String>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.business_types.is_empty() && self.countries.is_empty()
    }
}

/// Report every category whose term appears as a whole token in `name`.
///
/// Tokens and terms are folded but keep their punctuation, and each term is
/// compared against single tokens, so only one-word terms can match.
/// Categories are listed in first-match order over `sources`, each once.
///
/// # Example
/// ```
/// use cleanco_core::{business_type_sources, matches};
///
/// let types = matches("Some Big Pharma, LLC", &business_type_sources());
/// assert!(types.iter().any(|t| t == "Limited Liability Company"));
/// ```
pub fn matches(name: &str, sources: &[Source]) -> Vec<String> {
    let tokens: Vec<String> = strip_tail(name).split_whitespace().map(fold).collect();
    let mut result: Vec<String> = Vec::new();

    for (category, term) in sources {
        if result.contains(category) {
            continue;
        }
        let folded = fold(term);
        if tokens.contains(&folded) {
            result.push(category.clone());
        }
    }

    result
}

/// Classify a name against a term database.
pub fn classify_with(name: &str, db: &TermDatabase) -> Classification {
    Classification {
        business_types: matches(name, &db.business_type_sources()),
        countries: matches(name, &db.country_sources()),
    }
}

/// Classify a name against the embedded dictionaries.
pub fn classify(name: &str) -> Classification {
    Classification {
        business_types: matches(name, &termdb::business_type_sources()),
        countries: matches(name, &termdb::country_sources()),
    }
}
