//! Error types for patcher-blocks

/// Result type for patcher-blocks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort patching of a document.
///
/// Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Block `{key}` opened at line {line} never closes")]
    UnbalancedBlock { key: String, line: usize },

    #[error("Block at line {line} opens and closes on the same line")]
    InlineBlock { line: usize },

    #[error("Markup opened by `{open}` at line {line} has no closing `{close}`")]
    UnterminatedMarkup {
        open: String,
        close: String,
        line: usize,
    },

    #[error("Edit would shift brace balance by {delta}: {content}")]
    UnbalancedEdit { content: String, delta: i64 },

    #[error("Block range {start}..={end} is outside a document of {len} lines")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Invalid edit: {reason}")]
    InvalidEdit { reason: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub fn invalid_edit(reason: impl Into<String>) -> Self {
        Self::InvalidEdit {
            reason: reason.into(),
        }
    }

    /// True when the document itself is malformed, as opposed to the edit
    /// request being invalid.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedBlock { .. } | Self::InlineBlock { .. } | Self::UnterminatedMarkup { .. }
        )
    }
}
