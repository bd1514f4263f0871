//! JSON content documents.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::component::{component_labels, translate_component};
use crate::error::{Error, Result};
use crate::labels::LabelTable;
use crate::language::Language;

const COMPONENT_KEY: &str = "calculatorComponent";

/// Fields changed per language by one translation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSummary {
    pub changed: BTreeMap<Language, usize>,
}

impl TranslationSummary {
    pub fn total(&self) -> usize {
        self.changed.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A calculator content file, key order preserved.
#[derive(Debug, Clone)]
pub struct ContentDocument {
    original: String,
    value: Value,
}

impl ContentDocument {
    pub fn parse(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)?;
        if !value.is_object() {
            return Err(Error::NotAnObject);
        }
        Ok(Self {
            original: source.to_string(),
            value,
        })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    fn component(&self, lang: Language) -> Option<&Value> {
        self.value.get(lang.code())?.get(COMPONENT_KEY)
    }

    /// Adds a copy of the `en` section for each listed language that has no
    /// section yet, returning the languages added.
    ///
    /// Copies start out in English; a [`translate`](Self::translate) pass
    /// afterwards localizes their labels.
    pub fn seed_sections(&mut self, languages: &[Language]) -> Vec<Language> {
        let Some(source) = self.value.get(Language::En.code()).cloned() else {
            tracing::debug!("no en section to seed from");
            return Vec::new();
        };
        let Some(sections) = self.value.as_object_mut() else {
            return Vec::new();
        };

        let mut seeded = Vec::new();
        for &lang in languages {
            if lang.is_source() || sections.contains_key(lang.code()) {
                continue;
            }
            sections.insert(lang.code().to_string(), source.clone());
            seeded.push(lang);
        }
        if !seeded.is_empty() {
            tracing::debug!(?seeded, "seeded sections");
        }
        seeded
    }

    /// Labels of each listed language that still read exactly as a label of
    /// the `en` section.
    ///
    /// A label the table maps to itself for that language is the same word
    /// in both and is not reported. Languages with nothing to report are
    /// left out.
    pub fn untranslated(
        &self,
        table: &LabelTable,
        languages: &[Language],
    ) -> BTreeMap<Language, Vec<String>> {
        let english: BTreeSet<&str> = self
            .component(Language::En)
            .map(component_labels)
            .unwrap_or_default()
            .into_iter()
            .collect();

        let mut report = BTreeMap::new();
        for &lang in languages {
            if lang.is_source() {
                continue;
            }
            let Some(component) = self.component(lang) else {
                continue;
            };
            let labels: Vec<String> = component_labels(component)
                .into_iter()
                .filter(|label| english.contains(label))
                .filter(|label| table.lookup(label, lang) != Some(*label))
                .map(String::from)
                .collect();
            if !labels.is_empty() {
                report.insert(lang, labels);
            }
        }
        report
    }

    /// Translates the `calculatorComponent` of each listed language section.
    ///
    /// The source language and sections without a component are skipped.
    pub fn translate(&mut self, table: &LabelTable, languages: &[Language]) -> TranslationSummary {
        let mut summary = TranslationSummary::default();
        for &lang in languages {
            if lang.is_source() {
                continue;
            }
            let Some(component) = self
                .value
                .get_mut(lang.code())
                .and_then(|section| section.get_mut(COMPONENT_KEY))
            else {
                continue;
            };

            let changed = translate_component(component, lang, table);
            if changed > 0 {
                tracing::debug!(lang = %lang, changed, "translated section");
                summary.changed.insert(lang, changed);
            }
        }
        summary
    }

    /// Renders with two-space indentation and raw non-ASCII text, keeping a
    /// trailing newline if the source had one.
    pub fn render(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.value)?;
        if self.original.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            ContentDocument::parse("[1, 2]"),
            Err(Error::NotAnObject)
        ));
    }

    #[test]
    fn render_keeps_key_order_and_unicode() {
        let source = "{\n  \"zeta\": \"ü\",\n  \"alpha\": [\n    1,\n    2\n  ]\n}\n";
        let doc = ContentDocument::parse(source).unwrap();
        assert_eq!(doc.render().unwrap(), source);
    }
}
