//! Recipe configuration model
//!
//! A recipe names a repeatable patch: which files it applies to, which
//! languages it covers, and the ordered steps run against each document.
//! Recipes are plain config and load from TOML, JSON, or YAML:
//!
//! ```toml
//! name = "recalculate"
//! languages = ["en", "es"]
//!
//! [selection]
//! extension = "tsx"
//! exclude_prefixes = ["fix_"]
//!
//! [[steps]]
//! kind = "insert_property"
//! name = "recalculate"
//! values = { en = "🔄 Recalculate", es = "🔄 Recalcular" }
//! ```

use std::collections::BTreeMap;

use patcher_blocks::Placement;
use patcher_content::Language;
use patcher_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const BUILTINS: &[(&str, &str)] = &[
    ("recalculate", include_str!("../data/recalculate.toml")),
    (
        "repair-recalculate",
        include_str!("../data/repair-recalculate.toml"),
    ),
    (
        "recalculate-captions",
        include_str!("../data/recalculate-captions.toml"),
    ),
];

/// A named, config-described patch pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub selection: Selection,
    /// Languages visited by `insert_property` steps, in order
    #[serde(default = "all_languages")]
    pub languages: Vec<Language>,
    pub steps: Vec<Step>,
}

fn all_languages() -> Vec<Language> {
    Language::ALL.to_vec()
}

impl Recipe {
    /// Names of the recipes shipped with the crate.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().map(|(name, _)| *name)
    }

    /// Looks up a built-in recipe by name.
    pub fn builtin(name: &str) -> Result<Self> {
        let (_, source) = BUILTINS
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .ok_or_else(|| Error::UnknownRecipe {
                name: name.to_string(),
            })?;
        let origin = NormalizedPath::new(format!("<builtin>/{name}.toml"));
        Ok(ConfigStore::parse(&origin, "toml", source)?)
    }

    /// Loads a recipe file; the format follows the file extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let recipe: Recipe = ConfigStore::new().load(path)?;
        tracing::debug!(name = %recipe.name, path = %path, "loaded recipe");
        Ok(recipe)
    }
}

/// Which files in a directory a recipe applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// File extension without the dot
    pub extension: String,
    /// Exact file names to leave alone
    #[serde(default)]
    pub exclude: Vec<String>,
    /// File name prefixes to leave alone
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::extension("tsx")
    }
}

impl Selection {
    pub fn extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            exclude: Vec::new(),
            exclude_prefixes: Vec::new(),
        }
    }

    pub fn matches(&self, path: &NormalizedPath) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        path.extension() == Some(self.extension.as_str())
            && !self.exclude.iter().any(|name| name == file_name)
            && !self
                .exclude_prefixes
                .iter()
                .any(|prefix| file_name.starts_with(prefix.as_str()))
    }
}

/// One edit applied to every selected document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    InsertProperty(PropertyStep),
    UpdateProperty(UpdateStep),
    InsertMarkup(MarkupStep),
    ReplaceLiteral(ReplaceStep),
    RemoveMarkup(RemovalStep),
}

impl Step {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsertProperty(_) => "insert_property",
            Self::UpdateProperty(_) => "update_property",
            Self::InsertMarkup(_) => "insert_markup",
            Self::ReplaceLiteral(_) => "replace_literal",
            Self::RemoveMarkup(_) => "remove_markup",
        }
    }
}

/// Add `name: "<value>"` to each language's block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyStep {
    pub name: String,
    /// Value per language. A language without a value is skipped.
    pub values: BTreeMap<Language, String>,
    /// Only touch language blocks nested in the first block with this key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
    #[serde(default)]
    pub trailing_comma: bool,
}

/// Rewrite the value of an existing `name: "..."` in each language's block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStep {
    pub name: String,
    pub values: BTreeMap<Language, String>,
    /// Current values that may be overwritten, per language. A language not
    /// listed here has any value overwritten.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub replacing: BTreeMap<Language, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within: Option<String>,
}

/// Insert a markup template next to an anchor line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupStep {
    pub anchors: Vec<String>,
    pub marker: String,
    pub template: Vec<String>,
    #[serde(default)]
    pub placement: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_indent: Option<String>,
    /// Regex that must match somewhere in the document for the markup to go in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Before,
    After,
}

impl From<Position> for Placement {
    fn from(position: Position) -> Self {
        match position {
            Position::Before => Placement::Before,
            Position::After => Placement::After,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceStep {
    pub literal: String,
    pub replacement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followed_by: Option<String>,
}

/// Remove markup blocks carrying `signature` unless `binding` matches elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalStep {
    pub open: String,
    pub close: String,
    pub signature: String,
    pub binding: String,
}
