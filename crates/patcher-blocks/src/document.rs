//! Line-oriented document model

use std::fmt;

use crate::anchor::{AnchorInsert, AnchorOutcome, insert_at_anchor};
use crate::error::Result;
use crate::locator::{BlockRange, brace_balance, find_block};
use crate::property::{
    PropertyInsert, PropertyOutcome, PropertyUpdate, UpdateOutcome, insert_property,
    insert_property_all, update_property_all,
};
use crate::removal::{
    CompensatingRemoval, RemovalOutcome, Removed, compensating_remove, remove_markup_block,
};
use crate::replace::{LiteralReplace, replace_literal};

/// A text file held as lines.
///
/// Splitting happens on `\n` only, so carriage returns and the trailing
/// newline survive a parse/render round trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    original: String,
    lines: Vec<String>,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            original: source.to_string(),
            lines: source.split('\n').map(String::from).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// Current text.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the current text differs from the parsed source.
    pub fn is_modified(&self) -> bool {
        self.render() != self.original
    }

    pub fn brace_balance(&self) -> i64 {
        brace_balance(&self.lines)
    }

    pub fn contains(&self, needle: &str) -> bool {
        if needle.contains('\n') {
            self.render().contains(needle)
        } else {
            self.lines.iter().any(|line| line.contains(needle))
        }
    }

    pub fn find_block(&self, key: &str, search_from: usize) -> Result<Option<BlockRange>> {
        find_block(&self.lines, key, search_from)
    }

    pub fn insert_property(
        &mut self,
        range: BlockRange,
        insert: &PropertyInsert,
    ) -> Result<PropertyOutcome> {
        insert_property(&mut self.lines, range, insert)
    }

    pub fn insert_property_all(
        &mut self,
        key: &str,
        scope: Option<BlockRange>,
        insert: &PropertyInsert,
    ) -> Result<Vec<PropertyOutcome>> {
        insert_property_all(&mut self.lines, key, scope, insert)
    }

    pub fn update_property_all(
        &mut self,
        key: &str,
        scope: Option<BlockRange>,
        update: &PropertyUpdate,
    ) -> Result<Vec<UpdateOutcome>> {
        update_property_all(&mut self.lines, key, scope, update)
    }

    pub fn insert_at_anchor(&mut self, insert: &AnchorInsert) -> Result<AnchorOutcome> {
        insert_at_anchor(&mut self.lines, insert)
    }

    pub fn remove_markup_block(&mut self, open: &str, close: &str) -> Result<Option<Removed>> {
        remove_markup_block(&mut self.lines, open, close)
    }

    pub fn compensating_remove(&mut self, removal: &CompensatingRemoval) -> Result<RemovalOutcome> {
        compensating_remove(&mut self.lines, removal)
    }

    pub fn replace_literal(&mut self, replace: &LiteralReplace) -> Result<usize> {
        replace_literal(&mut self.lines, replace)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Document {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}
