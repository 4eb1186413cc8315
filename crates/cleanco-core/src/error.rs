use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleancoError {
    #[error("dictionary error: {0}")]
    Dictionary(#[from] toml::de::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
