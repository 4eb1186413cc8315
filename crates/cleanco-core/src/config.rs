use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::basename::{BasenameOptions, Positions};
use crate::error::CleancoError;
use crate::termdb::TermDatabase;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleancoConfig {
    #[serde(default)]
    pub basename: BasenameOptions,
    #[serde(default)]
    pub terms: TermsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermsConfig {
    /// User dictionary merged over the embedded one.
    pub path: Option<PathBuf>,
}

impl CleancoConfig {
    /// Load config from `path`, else the user config file (if it exists),
    /// else the built-in defaults.
    #[tracing::instrument(name = "load_config")]
    pub fn load(path: Option<&Path>) -> Result<Self, CleancoError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let user_path = Self::config_path();
                if !user_path.exists() {
                    tracing::debug!("No user config, using defaults");
                    return Self::from_toml(DEFAULT_CONFIG);
                }
                user_path
            }
        };

        tracing::debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| CleancoError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, CleancoError> {
        toml::from_str(toml_str).map_err(|e| CleancoError::Config(e.to_string()))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "cleanco")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("cleanco.toml"))
    }

    pub fn positions(&self) -> Positions {
        self.basename.into()
    }

    /// Embedded dictionaries with the configured user dictionary merged in.
    pub fn term_database(&self) -> Result<TermDatabase, CleancoError> {
        let mut db = TermDatabase::embedded().clone();
        if let Some(path) = &self.terms.path {
            let user = TermDatabase::from_path(path)?;
            tracing::debug!(
                path = %path.display(),
                terms = user.term_count(),
                "Merging user dictionary"
            );
            db.merge_user(&user);
        }
        Ok(db)
    }
}

impl Default for CleancoConfig {
    fn default() -> Self {
        Self::from_toml(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
