//! Error types for patcher-content

/// Result type for patcher-content operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown language code: {code}")]
    UnknownLanguage { code: String },

    #[error("Content document is not a JSON object")]
    NotAnObject,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Fs(#[from] patcher_fs::Error),
}
