//! Translate command implementation

use std::path::Path;

use colored::Colorize;

use patcher_content::{LabelTable, Language};
use patcher_core::{BatchEngine, BatchOptions};
use patcher_fs::NormalizedPath;

use super::summary::{print_audit, print_report};
use crate::error::{CliError, Result};

/// What the translate command does with each content file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateMode {
    /// Rewrite labels, first seeding missing sections when `seed` is set
    Translate { seed: bool },
    /// Report labels still in English; write nothing
    Check,
}

fn parse_languages(codes: &[String]) -> Result<Vec<Language>> {
    if codes.is_empty() {
        return Ok(Language::targets().collect());
    }
    codes
        .iter()
        .map(|code| code.parse::<Language>().map_err(CliError::from))
        .collect()
}

/// Run the translate command
///
/// Uses the built-in label tables, with `labels` merged over them when given.
pub fn run_translate(
    dir: &Path,
    labels: Option<&Path>,
    languages: &[String],
    mode: TranslateMode,
    options: BatchOptions,
) -> Result<()> {
    let root = NormalizedPath::new(dir);
    if !root.is_dir() {
        return Err(CliError::user(format!("Not a directory: {}", root)));
    }
    let languages = parse_languages(languages)?;

    let mut table = LabelTable::builtin()?;
    if let Some(path) = labels {
        let path = NormalizedPath::new(path);
        if !path.is_file() {
            return Err(CliError::user(format!("Label table not found: {}", path)));
        }
        table.merge(LabelTable::load(&path)?);
    }

    let codes: Vec<_> = languages.iter().map(|lang| lang.code()).collect();
    let engine = BatchEngine::new(options.clone());

    match mode {
        TranslateMode::Check => {
            println!(
                "{} Checking content in {} [{}]",
                "=>".blue().bold(),
                root,
                codes.join(", ")
            );
            let report = engine.audit_directory(&root, &table, &languages)?;
            print_audit(&report);
        }
        TranslateMode::Translate { seed } => {
            let dry = if options.dry_run { " (dry run)" } else { "" };
            println!(
                "{} Translating content in {} [{}]{}",
                "=>".blue().bold(),
                root,
                codes.join(", "),
                dry.yellow()
            );
            let report = engine.translate_directory(&root, &table, &languages, seed)?;
            print_report(&report);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_languages_are_targets() {
        let langs = parse_languages(&[]).unwrap();
        assert_eq!(langs.len(), 5);
        assert!(!langs.contains(&Language::En));
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = parse_languages(&["es".into(), "xx".into()]).unwrap_err();
        assert!(err.to_string().contains("xx"));
    }
}
