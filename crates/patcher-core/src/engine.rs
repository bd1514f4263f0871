//! BatchEngine implementation
//!
//! Drives a recipe (or the content translator) over every selected file in a
//! directory. Directory-level problems are errors; per-file problems land in
//! the report and the batch moves on.

use patcher_blocks::Document;
use patcher_content::{ContentDocument, LabelTable, Language};
use patcher_fs::{NormalizedPath, io};

use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::recipe::{Recipe, Selection};
use crate::report::{BatchReport, FileReport, StepNote};

/// Options for batch runs
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Compute every edit but write nothing
    pub dry_run: bool,
    /// Process at most this many selected files
    pub limit: Option<usize>,
}

/// Applies patches to the files of one directory
#[derive(Debug, Clone, Default)]
pub struct BatchEngine {
    options: BatchOptions,
}

impl BatchEngine {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    /// Files directly inside `dir` that `selection` accepts, sorted by name
    /// and cut to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a readable directory.
    pub fn select(&self, dir: &NormalizedPath, selection: &Selection) -> Result<Vec<NormalizedPath>> {
        let mut files: Vec<_> = io::list_files(dir)?
            .into_iter()
            .filter(|path| selection.matches(path))
            .collect();
        if let Some(limit) = self.options.limit {
            files.truncate(limit);
        }
        Ok(files)
    }

    /// Runs `recipe` against every selected file.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe is invalid or the directory cannot be
    /// listed. Failures inside a file are reported, not returned.
    pub fn apply_recipe(&self, dir: &NormalizedPath, recipe: &Recipe) -> Result<BatchReport> {
        let pipeline = Pipeline::compile(recipe)?;
        let files = self.select(dir, &recipe.selection)?;
        tracing::info!(recipe = pipeline.name(), files = files.len(), dir = %dir, "applying recipe");

        let mut report = BatchReport::new(self.options.dry_run);
        for path in files {
            let file = match self.patch_file(&path, &pipeline) {
                Ok((modified, notes)) => FileReport::new(path, modified, notes),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "file left untouched");
                    FileReport::errored(path, e)
                }
            };
            report.push(file);
        }
        Ok(report)
    }

    fn patch_file(&self, path: &NormalizedPath, pipeline: &Pipeline) -> Result<(bool, Vec<StepNote>)> {
        let mut doc = Document::parse(&io::read_text(path)?);
        let notes = pipeline.apply(&mut doc)?;

        let modified = doc.is_modified();
        if modified && !self.options.dry_run {
            io::write_text(path, &doc.render())?;
        }
        tracing::debug!(path = %path, modified, notes = notes.len(), "patched");
        Ok((modified, notes))
    }

    /// Translates the labels of every `*.json` content document in `dir`.
    ///
    /// With `seed_missing`, listed languages without a section first get a
    /// copy of the `en` section, which is then translated like the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn translate_directory(
        &self,
        dir: &NormalizedPath,
        table: &LabelTable,
        languages: &[Language],
        seed_missing: bool,
    ) -> Result<BatchReport> {
        let files = self.select(dir, &Selection::extension("json"))?;
        tracing::info!(files = files.len(), dir = %dir, seed_missing, "translating content");

        let mut report = BatchReport::new(self.options.dry_run);
        for path in files {
            let file = match self.translate_file(&path, table, languages, seed_missing) {
                Ok(notes) => FileReport::new(path, !notes.is_empty(), notes),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "content left untouched");
                    FileReport::errored(path, e)
                }
            };
            report.push(file);
        }
        Ok(report)
    }

    fn translate_file(
        &self,
        path: &NormalizedPath,
        table: &LabelTable,
        languages: &[Language],
        seed_missing: bool,
    ) -> Result<Vec<StepNote>> {
        let mut doc = ContentDocument::parse(&io::read_text(path)?)?;

        let mut notes = Vec::new();
        if seed_missing {
            notes.extend(
                doc.seed_sections(languages)
                    .into_iter()
                    .map(|lang| StepNote::SectionSeeded { lang }),
            );
        }
        let summary = doc.translate(table, languages);
        notes.extend(
            summary
                .changed
                .into_iter()
                .map(|(lang, count)| StepNote::LabelsTranslated { lang, count }),
        );

        if !notes.is_empty() && !self.options.dry_run {
            io::write_text(path, &doc.render()?)?;
        }
        Ok(notes)
    }

    /// Lists labels still in English in every `*.json` content document in
    /// `dir`. Nothing is written; every readable file is reported as
    /// skipped, with one [`StepNote::Untranslated`] per affected language.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn audit_directory(
        &self,
        dir: &NormalizedPath,
        table: &LabelTable,
        languages: &[Language],
    ) -> Result<BatchReport> {
        let files = self.select(dir, &Selection::extension("json"))?;
        tracing::info!(files = files.len(), dir = %dir, "auditing content");

        let mut report = BatchReport::new(true);
        for path in files {
            let file = match Self::audit_file(&path, table, languages) {
                Ok(notes) => FileReport::new(path, false, notes),
                Err(e) => FileReport::errored(path, e),
            };
            report.push(file);
        }
        Ok(report)
    }

    fn audit_file(
        path: &NormalizedPath,
        table: &LabelTable,
        languages: &[Language],
    ) -> Result<Vec<StepNote>> {
        let doc = ContentDocument::parse(&io::read_text(path)?)?;
        Ok(doc
            .untranslated(table, languages)
            .into_iter()
            .map(|(lang, labels)| StepNote::Untranslated { lang, labels })
            .collect())
    }
}
