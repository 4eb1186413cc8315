//! Company name cleanup: strip legal-form terms ("Oy", "Ltd.", "s.r.o.") from
//! names and classify names by business type and country.

pub mod basename;
pub mod classify;
pub mod config;
pub mod error;
pub mod non_nfkd;
pub mod normalize;
pub mod prepare;
pub mod termdb;

pub use basename::{basename, custom_basename, BasenameOptions, Positions};
pub use classify::{classify, classify_with, matches, Classification};
pub use config::CleancoConfig;
pub use error::CleancoError;
pub use prepare::{default_terms, NormalizedTerm, PreparedTerms};
pub use termdb::{business_type_sources, country_sources, Source, TermCategory, TermDatabase};
