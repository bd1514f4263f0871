//! Property lookup, insertion, and update inside a block.

use regex::Regex;

use crate::error::{Error, Result};
use crate::locator::{BlockRange, brace_delta, find_block, leading_whitespace, line_ending};

/// A `name: "value"` property to insert before a block's closing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInsert {
    pub name: String,
    pub value: String,
    /// Explicit indentation. When `None` the indentation of the block's last
    /// property is reused, or the closing line's indent plus two spaces for
    /// an empty block.
    pub indent: Option<String>,
    /// Whether the inserted (now last) property carries a trailing comma.
    pub trailing_comma: bool,
}

impl PropertyInsert {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            indent: None,
            trailing_comma: false,
        }
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    pub fn with_trailing_comma(mut self, trailing_comma: bool) -> Self {
        self.trailing_comma = trailing_comma;
        self
    }

    fn render(&self, indent: &str, eol: &str) -> String {
        let comma = if self.trailing_comma { "," } else { "" };
        format!(
            "{indent}{}: \"{}\"{comma}{eol}",
            self.name,
            escape_value(&self.value)
        )
    }

    pub fn validate(&self) -> Result<()> {
        check_name(&self.name)?;
        if let Some(indent) = &self.indent
            && !indent.chars().all(|c| c == ' ' || c == '\t')
        {
            return Err(Error::invalid_edit("indent must be spaces or tabs"));
        }
        Ok(())
    }
}

/// A new value for an existing `name: "value"` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyUpdate {
    pub name: String,
    pub value: String,
    /// Current values that may be overwritten. Empty means any value; a
    /// value outside a non-empty list is left as is.
    pub replacing: Vec<String>,
}

impl PropertyUpdate {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            replacing: Vec::new(),
        }
    }

    pub fn replacing<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replacing = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_name(&self.name)
    }

    fn pattern(&self) -> Result<Regex> {
        Ok(Regex::new(&format!(
            r#"^\s*{}:\s*"((?:[^"\\]|\\.)*)""#,
            regex::escape(&self.name)
        ))?)
    }
}

/// Result of a single property insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyOutcome {
    /// The property line now sits at `line`; `comma_added` is set when the
    /// previous last property had to gain a trailing comma.
    Inserted { line: usize, comma_added: bool },
    /// The block already mentions the property; nothing changed.
    AlreadyPresent,
}

impl PropertyOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Result of a single property update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The value on `line` was rewritten.
    Updated { line: usize },
    /// The property already has the value, or a value the update may not
    /// replace.
    Unchanged,
    /// The block has no such property at its top level.
    Missing,
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

fn check_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if !valid {
        return Err(Error::invalid_edit(format!(
            "`{name}` is not a property identifier"
        )));
    }
    Ok(())
}

/// Escapes a value for a double-quoted string literal.
fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Whole-line `//` comments and lines of a `/* ... */` comment.
fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

fn check_bounds(len: usize, range: BlockRange) -> Result<()> {
    if range.start > range.end || range.end >= len {
        return Err(Error::RangeOutOfBounds {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}

/// Tests whether `<name>:` appears anywhere in the block's text.
///
/// This is a substring test, not a parse: a string value that happens to
/// contain `<name>:` counts as a hit. Property names are identifiers that are
/// not expected inside values, and callers rely on this coarse behavior.
pub fn block_has_property<S: AsRef<str>>(lines: &[S], range: BlockRange, name: &str) -> bool {
    let needle = format!("{name}:");
    lines
        .get(range.start..=range.end)
        .is_some_and(|block| block.iter().any(|line| line.as_ref().contains(&needle)))
}

/// Inserts a property as the last entry of the block at `range`.
///
/// The last property line strictly inside the block gains a trailing comma
/// if it lacks one. The new property goes after the last non-blank line, so
/// a trailing comment stays above it. An empty block receives the property
/// as its only line. Every line after the
/// insertion point shifts down by one.
///
/// # Example
/// ```
/// use patcher_blocks::{BlockRange, PropertyInsert, PropertyOutcome, insert_property};
///
/// let mut lines: Vec<String> = ["  en: {", "    foo: \"bar\"", "  }"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let outcome = insert_property(
///     &mut lines,
///     BlockRange::new(0, 2),
///     &PropertyInsert::new("baz", "qux"),
/// )
/// .unwrap();
///
/// assert!(outcome.is_inserted());
/// assert_eq!(lines, ["  en: {", "    foo: \"bar\",", "    baz: \"qux\"", "  }"]);
/// ```
pub fn insert_property(
    lines: &mut Vec<String>,
    range: BlockRange,
    insert: &PropertyInsert,
) -> Result<PropertyOutcome> {
    insert.validate()?;
    check_bounds(lines.len(), range)?;

    if block_has_property(lines.as_slice(), range, &insert.name) {
        tracing::debug!(property = %insert.name, line = range.start + 1, "property already present");
        return Ok(PropertyOutcome::AlreadyPresent);
    }
    if range.is_inline() {
        return Err(Error::InlineBlock {
            line: range.start + 1,
        });
    }

    let inner = range.start + 1..range.end;
    let last_content = inner.clone().rev().find(|&idx| !lines[idx].trim().is_empty());
    let last_prop = inner
        .rev()
        .find(|&idx| !lines[idx].trim().is_empty() && !is_comment(&lines[idx]));

    let indent = match (&insert.indent, last_prop.or(last_content)) {
        (Some(indent), _) => indent.clone(),
        (None, Some(idx)) => leading_whitespace(&lines[idx]).to_string(),
        (None, None) => format!("{}  ", leading_whitespace(&lines[range.end])),
    };
    let new_line = insert.render(&indent, line_ending(&lines[range.end]));
    let delta = brace_delta(&new_line);
    if delta != 0 {
        return Err(Error::UnbalancedEdit {
            content: new_line,
            delta,
        });
    }

    let mut comma_added = false;
    if let Some(idx) = last_prop {
        let line = &lines[idx];
        let trimmed = line.trim_end();
        if !trimmed.ends_with(',') {
            lines[idx] = format!("{},{}", trimmed, line_ending(line));
            comma_added = true;
        }
    }
    let at = last_content.map_or(range.start + 1, |idx| idx + 1);

    lines.insert(at, new_line);
    tracing::debug!(property = %insert.name, line = at + 1, comma_added, "inserted property");

    Ok(PropertyOutcome::Inserted {
        line: at,
        comma_added,
    })
}

/// Inserts the property into every block opened by `key`.
///
/// Blocks are visited top to bottom and re-located after each insertion, so
/// index drift from earlier edits never points a later edit at the wrong
/// line. With a `scope`, only blocks opening strictly inside that range are
/// visited; the scope's end is tracked as lines are added.
pub fn insert_property_all(
    lines: &mut Vec<String>,
    key: &str,
    scope: Option<BlockRange>,
    insert: &PropertyInsert,
) -> Result<Vec<PropertyOutcome>> {
    let (mut from, mut limit) = match scope {
        Some(scope) => (scope.start + 1, Some(scope.end)),
        None => (0, None),
    };

    let mut outcomes = Vec::new();
    while let Some(range) = find_block(lines.as_slice(), key, from)? {
        if limit.is_some_and(|end| range.start >= end) {
            break;
        }

        let outcome = insert_property(lines, range, insert)?;
        from = range.end + 1;
        if outcome.is_inserted() {
            from += 1;
            limit = limit.map(|end| end + 1);
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Rewrites the quoted value of `<name>:` among the block's own properties.
///
/// Properties of nested blocks are not considered. Only the text between
/// the quotes changes, so trailing commas and comments survive.
pub fn update_property(
    lines: &mut [String],
    range: BlockRange,
    update: &PropertyUpdate,
) -> Result<UpdateOutcome> {
    update.validate()?;
    check_bounds(lines.len(), range)?;
    if range.is_inline() {
        return Ok(UpdateOutcome::Missing);
    }

    let pattern = update.pattern()?;
    let escaped = escape_value(&update.value);

    let mut depth = brace_delta(&lines[range.start]);
    for idx in range.start + 1..range.end {
        let line = &lines[idx];
        let found = if depth == 1 {
            pattern.captures(line).and_then(|caps| caps.get(1))
        } else {
            None
        };
        depth += brace_delta(line);
        let Some(current) = found else {
            continue;
        };

        if current.as_str() == escaped {
            return Ok(UpdateOutcome::Unchanged);
        }
        if !update.replacing.is_empty()
            && !update
                .replacing
                .iter()
                .any(|old| escape_value(old) == current.as_str())
        {
            tracing::debug!(property = %update.name, line = idx + 1, "value not replaceable, kept");
            return Ok(UpdateOutcome::Unchanged);
        }

        let mut updated = line.clone();
        updated.replace_range(current.range(), &escaped);
        let delta = brace_delta(&updated) - brace_delta(line);
        if delta != 0 {
            return Err(Error::UnbalancedEdit {
                content: updated,
                delta,
            });
        }

        lines[idx] = updated;
        tracing::debug!(property = %update.name, line = idx + 1, "updated property");
        return Ok(UpdateOutcome::Updated { line: idx });
    }

    Ok(UpdateOutcome::Missing)
}

/// Updates the property in every block opened by `key`, optionally only
/// those opening strictly inside `scope`.
pub fn update_property_all(
    lines: &mut [String],
    key: &str,
    scope: Option<BlockRange>,
    update: &PropertyUpdate,
) -> Result<Vec<UpdateOutcome>> {
    let (mut from, limit) = match scope {
        Some(scope) => (scope.start + 1, Some(scope.end)),
        None => (0, None),
    };

    let mut outcomes = Vec::new();
    while let Some(range) = find_block(&*lines, key, from)? {
        if limit.is_some_and(|end| range.start >= end) {
            break;
        }
        outcomes.push(update_property(lines, range, update)?);
        from = range.end + 1;
    }
    Ok(outcomes)
}
