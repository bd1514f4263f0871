//! Static label translation tables.

use std::collections::BTreeMap;

use patcher_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::Language;

const BUILTIN_LABELS: &str = include_str!("../data/labels.toml");

/// Maps `(source label, target language)` to a translated label.
///
/// On disk a table is a map of language code to `source = target` pairs:
///
/// ```toml
/// [es]
/// "Loan Amount ($)" = "Monto del Préstamo ($)"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    tables: BTreeMap<Language, BTreeMap<String, String>>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tables shipped with the crate.
    pub fn builtin() -> Result<Self> {
        let origin = NormalizedPath::new("<builtin>/labels.toml");
        Ok(ConfigStore::parse(&origin, "toml", BUILTIN_LABELS)?)
    }

    /// Load a table from a TOML, JSON, or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Adds `other`'s entries, replacing any existing translation.
    pub fn merge(&mut self, other: LabelTable) {
        for (lang, entries) in other.tables {
            self.tables.entry(lang).or_default().extend(entries);
        }
    }

    pub fn insert(&mut self, lang: Language, source: impl Into<String>, target: impl Into<String>) {
        self.tables
            .entry(lang)
            .or_default()
            .insert(source.into(), target.into());
    }

    /// The mapped translation, if any.
    pub fn lookup(&self, label: &str, lang: Language) -> Option<&str> {
        self.tables
            .get(&lang)
            .and_then(|entries| entries.get(label))
            .map(String::as_str)
    }

    /// Translates a label, passing unmapped labels through unchanged.
    pub fn translate<'a>(&'a self, label: &'a str, lang: Language) -> &'a str {
        self.lookup(label, lang).unwrap_or(label)
    }

    /// Number of entries for a language.
    pub fn len(&self, lang: Language) -> usize {
        self.tables.get(&lang).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_target_language() {
        let table = LabelTable::builtin().unwrap();
        for lang in Language::targets() {
            assert!(table.len(lang) > 0, "no labels for {lang}");
        }
        assert_eq!(table.len(Language::En), 0);
    }

    #[test]
    fn builtin_translates_known_labels() {
        let table = LabelTable::builtin().unwrap();
        assert_eq!(
            table.translate("Loan Amount ($)", Language::Es),
            "Monto del Préstamo ($)"
        );
        assert_eq!(table.translate("Interest Rate (%)", Language::Fr), "Taux d'Intérêt (%)");
    }

    #[test]
    fn unmapped_label_passes_through() {
        let table = LabelTable::builtin().unwrap();
        assert_eq!(table.translate("Llama Count", Language::De), "Llama Count");
        assert_eq!(table.translate("Loan Amount ($)", Language::En), "Loan Amount ($)");
    }

    #[test]
    fn merge_overrides() {
        let mut table = LabelTable::new();
        table.insert(Language::Es, "Result", "Resultado");
        let mut extra = LabelTable::new();
        extra.insert(Language::Es, "Result", "El Resultado");
        extra.insert(Language::Nl, "Goal", "Doel");
        table.merge(extra);

        assert_eq!(table.lookup("Result", Language::Es), Some("El Resultado"));
        assert_eq!(table.lookup("Goal", Language::Nl), Some("Doel"));
    }
}
