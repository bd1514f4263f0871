//! Batch results.

use std::fmt;

use patcher_content::Language;
use patcher_fs::NormalizedPath;

/// What one step did to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepNote {
    /// `line` is 1-based
    PropertyInserted { name: String, lang: Language, line: usize },
    PropertyPresent { name: String, lang: Language },
    /// `line` is 1-based
    PropertyUpdated { name: String, lang: Language, line: usize },
    PropertyUnchanged { name: String, lang: Language },
    PropertyMissing { name: String, lang: Language },
    BlockNotFound { lang: Language },
    ScopeNotFound { key: String },
    MarkupInserted { line: usize, count: usize },
    MarkupPresent,
    AnchorNotFound,
    PreconditionMissing,
    LiteralReplaced { count: usize },
    MarkupRemoved { blocks: usize, lines: usize },
    PreconditionHolds,
    MarkupNotFound,
    LabelsTranslated { lang: Language, count: usize },
    SectionSeeded { lang: Language },
    /// Labels a table still knows as English source text
    Untranslated { lang: Language, labels: Vec<String> },
}

impl StepNote {
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::PropertyInserted { .. }
                | Self::PropertyUpdated { .. }
                | Self::MarkupInserted { .. }
                | Self::LiteralReplaced { .. }
                | Self::MarkupRemoved { .. }
                | Self::LabelsTranslated { .. }
                | Self::SectionSeeded { .. }
        )
    }
}

impl fmt::Display for StepNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropertyInserted { name, lang, line } => {
                write!(f, "Inserted {name} into {lang} (line {line})")
            }
            Self::PropertyPresent { name, lang } => write!(f, "{name} already in {lang}"),
            Self::PropertyUpdated { name, lang, line } => {
                write!(f, "Updated {name} in {lang} (line {line})")
            }
            Self::PropertyUnchanged { name, lang } => write!(f, "{name} in {lang} kept"),
            Self::PropertyMissing { name, lang } => write!(f, "No {name} in {lang}"),
            Self::BlockNotFound { lang } => write!(f, "No {lang} block"),
            Self::ScopeNotFound { key } => write!(f, "No {key} block"),
            Self::MarkupInserted { line, count } => {
                write!(f, "Inserted {count} lines of markup at line {line}")
            }
            Self::MarkupPresent => f.write_str("Markup already present"),
            Self::AnchorNotFound => f.write_str("Anchor not found"),
            Self::PreconditionMissing => f.write_str("Required binding missing, markup not inserted"),
            Self::LiteralReplaced { count } => write!(f, "Replaced {count} literal(s)"),
            Self::MarkupRemoved { blocks, lines } => {
                write!(f, "Removed {blocks} block(s), {lines} lines")
            }
            Self::PreconditionHolds => f.write_str("Binding present, markup kept"),
            Self::MarkupNotFound => f.write_str("No matching markup"),
            Self::LabelsTranslated { lang, count } => {
                write!(f, "Translated {count} label(s) to {lang}")
            }
            Self::SectionSeeded { lang } => write!(f, "Added {lang} section from en"),
            Self::Untranslated { lang, labels } => {
                write!(f, "{} untranslated {lang} label(s): {}", labels.len(), labels.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Modified,
    Skipped,
    Errored,
}

/// Result for a single document
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: NormalizedPath,
    pub status: FileStatus,
    pub notes: Vec<StepNote>,
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(path: NormalizedPath, modified: bool, notes: Vec<StepNote>) -> Self {
        let status = if modified {
            FileStatus::Modified
        } else {
            FileStatus::Skipped
        };
        Self {
            path,
            status,
            notes,
            error: None,
        }
    }

    pub fn errored(path: NormalizedPath, error: impl fmt::Display) -> Self {
        Self {
            path,
            status: FileStatus::Errored,
            notes: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }
}

/// Every processed document, bucketed by status
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// No file was written
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, file: FileReport) {
        self.files.push(file);
    }

    pub fn with_status(&self, status: FileStatus) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |file| file.status == status)
    }

    pub fn modified(&self) -> impl Iterator<Item = &FileReport> {
        self.with_status(FileStatus::Modified)
    }

    pub fn errored(&self) -> impl Iterator<Item = &FileReport> {
        self.with_status(FileStatus::Errored)
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.with_status(status).count()
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn has_errors(&self) -> bool {
        self.errored().next().is_some()
    }
}
