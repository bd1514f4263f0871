//! Error types for patcher-core

/// Result type for patcher-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a whole batch. Per-document failures are recorded in the
/// [`BatchReport`](crate::BatchReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Recipe is well-formed config but cannot be run
    #[error("Invalid recipe '{name}': {reason}")]
    InvalidRecipe { name: String, reason: String },

    /// No built-in recipe has this name
    #[error("Unknown recipe: {name}")]
    UnknownRecipe { name: String },

    #[error(transparent)]
    Blocks(#[from] patcher_blocks::Error),

    #[error(transparent)]
    Content(#[from] patcher_content::Error),

    #[error(transparent)]
    Fs(#[from] patcher_fs::Error),
}

impl Error {
    pub fn invalid_recipe(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecipe {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
