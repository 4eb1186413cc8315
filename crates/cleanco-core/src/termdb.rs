use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::CleancoError;

/// Embedded term dictionaries.
const EMBEDDED_DB: &str = include_str!("../data/terms.toml");

static EMBEDDED: LazyLock<TermDatabase> = LazyLock::new(|| {
    TermDatabase::from_toml(EMBEDDED_DB).expect("embedded terms.toml should be valid")
});

/// A classification category and the surface terms that indicate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCategory {
    /// Category label (e.g., "Limited Liability Company", "Finland").
    pub name: String,
    /// Surface forms as they appear in company names (e.g., "Oy", "s.r.o.").
    #[serde(default)]
    pub terms: Vec<String>,
}

/// A (category, term) pair used as a classification source.
pub type Source = (String, String);

/// Business-type and country dictionaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDatabase {
    #[serde(rename = "business_type", default)]
    pub business_types: Vec<TermCategory>,
    #[serde(rename = "country", default)]
    pub countries: Vec<TermCategory>,
}

impl TermDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in dictionaries.
    pub fn embedded() -> &'static TermDatabase {
        &EMBEDDED
    }

    /// Load a database from a TOML string.
    ///
    /// Either of the `[[business_type]]` / `[[country]]` tables may be absent.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load a database from a TOML file on disk.
    pub fn from_path(path: &Path) -> Result<Self, CleancoError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Merge a user database into this one.
    /// Categories with matching names are replaced; new categories are appended.
    pub fn merge_user(&mut self, user_db: &TermDatabase) {
        merge_categories(&mut self.business_types, &user_db.business_types);
        merge_categories(&mut self.countries, &user_db.countries);
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0
    }

    /// Total number of surface terms across both dictionaries, duplicates included.
    pub fn term_count(&self) -> usize {
        self.business_types
            .iter()
            .chain(&self.countries)
            .map(|c| c.terms.len())
            .sum()
    }

    /// Flattened business-type sources, longest terms first.
    pub fn business_type_sources(&self) -> Vec<Source> {
        sources(&self.business_types)
    }

    /// Flattened country sources, longest terms first.
    pub fn country_sources(&self) -> Vec<Source> {
        sources(&self.countries)
    }
}

fn merge_categories(base: &mut Vec<TermCategory>, user: &[TermCategory]) {
    for user_cat in user {
        if let Some(existing) = base.iter_mut().find(|c| c.name == user_cat.name) {
            *existing = user_cat.clone();
        } else {
            base.push(user_cat.clone());
        }
    }
}

/// Flatten categories into (category, term) pairs in dictionary order, then
/// stable-sort by descending term length in characters.
pub fn sources(categories: &[TermCategory]) -> Vec<Source> {
    let mut out: Vec<Source> = categories
        .iter()
        .flat_map(|cat| {
            cat.terms
                .iter()
                .map(move |term| (cat.name.clone(), term.clone()))
        })
        .collect();
    out.sort_by_key(|(_, term)| std::cmp::Reverse(term.chars().count()));
    out
}

/// Business-type sources from the embedded dictionaries.
pub fn business_type_sources() -> Vec<Source> {
    TermDatabase::embedded().business_type_sources()
}

/// Country sources from the embedded dictionaries.
pub fn country_sources() -> Vec<Source> {
    TermDatabase::embedded().country_sources()
}
