//! Marker-anchored markup insertion.
//!
//! Markup such as a button has no key to hang off, so it is placed relative
//! to a recognizable anchor line (a marker comment, typically) and guarded by
//! a marker substring that only the inserted markup contains.

use regex::Regex;

use crate::error::{Error, Result};
use crate::locator::{brace_balance, leading_whitespace, line_ending};

/// Indentation used when the line next to the anchor has none to copy.
pub const DEFAULT_INDENT: &str = "          ";

/// Where inserted lines go relative to the anchor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Before,
    After,
}

/// A block of lines to insert next to the first matching anchor.
#[derive(Debug, Clone)]
pub struct AnchorInsert {
    /// Literal substrings; the first line containing any of them is the anchor.
    pub anchors: Vec<String>,
    /// Substring unique to the inserted markup. Its presence anywhere in the
    /// document means the insertion already happened.
    pub marker: String,
    /// Lines to insert, without base indentation. Blank lines stay blank.
    pub template: Vec<String>,
    pub placement: Placement,
    pub default_indent: String,
    /// Binding the markup depends on. When set and nothing in the document
    /// matches it, the markup is not inserted.
    pub requires: Option<Regex>,
}

impl AnchorInsert {
    pub fn new<I, S>(anchor: impl Into<String>, marker: impl Into<String>, template: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            anchors: vec![anchor.into()],
            marker: marker.into(),
            template: template.into_iter().map(Into::into).collect(),
            placement: Placement::Before,
            default_indent: DEFAULT_INDENT.to_string(),
            requires: None,
        }
    }

    /// Adds an alternative anchor literal.
    pub fn or_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchors.push(anchor.into());
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_default_indent(mut self, indent: impl Into<String>) -> Self {
        self.default_indent = indent.into();
        self
    }

    pub fn requires(mut self, binding: &str) -> Result<Self> {
        self.requires = Some(Regex::new(binding)?);
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchors.is_empty() || self.anchors.iter().any(String::is_empty) {
            return Err(Error::invalid_edit("anchor literals must be non-empty"));
        }
        if self.marker.is_empty() {
            return Err(Error::invalid_edit("idempotence marker must be non-empty"));
        }
        // Without the marker in the markup, every run would insert again.
        if !self.template.join("\n").contains(&self.marker) {
            return Err(Error::invalid_edit(format!(
                "template does not contain marker `{}`",
                self.marker
            )));
        }
        let delta = brace_balance(&self.template);
        if delta != 0 {
            return Err(Error::UnbalancedEdit {
                content: self.template.join("\n"),
                delta,
            });
        }
        Ok(())
    }
}

/// Outcome of an anchored insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// `count` lines were inserted starting at index `line`.
    Inserted { line: usize, count: usize },
    /// The marker is already somewhere in the document.
    AlreadyPresent,
    /// No line contains any anchor literal. Not every document has one.
    AnchorNotFound,
    /// The required binding is absent, so the markup would be broken.
    PreconditionMissing,
}

impl AnchorOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Index of the first line containing any of `anchors`.
pub fn find_anchor<S: AsRef<str>>(lines: &[S], anchors: &[String]) -> Option<usize> {
    lines.iter().position(|line| {
        let line = line.as_ref();
        anchors.iter().any(|anchor| line.contains(anchor.as_str()))
    })
}

/// Inserts the template next to the first anchor line.
///
/// An existing marker wins over a missing binding: markup already in place
/// is reported as present, never as broken.
///
/// Indentation comes from the line right after the anchor, falling back to
/// `default_indent` when that line is missing or unindented.
pub fn insert_at_anchor(lines: &mut Vec<String>, insert: &AnchorInsert) -> Result<AnchorOutcome> {
    insert.validate()?;

    let text = lines.join("\n");
    if text.contains(&insert.marker) {
        tracing::debug!(marker = %insert.marker, "markup already present");
        return Ok(AnchorOutcome::AlreadyPresent);
    }
    if let Some(binding) = &insert.requires
        && !binding.is_match(&text)
    {
        tracing::debug!(binding = %binding, "required binding missing");
        return Ok(AnchorOutcome::PreconditionMissing);
    }

    let Some(anchor) = find_anchor(lines.as_slice(), &insert.anchors) else {
        tracing::debug!(anchors = ?insert.anchors, "anchor not found");
        return Ok(AnchorOutcome::AnchorNotFound);
    };

    let indent = lines
        .get(anchor + 1)
        .map(|next| leading_whitespace(next))
        .filter(|ws| !ws.is_empty())
        .unwrap_or(insert.default_indent.as_str())
        .to_string();
    let eol = line_ending(&lines[anchor]);

    let rendered: Vec<String> = insert
        .template
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                eol.to_string()
            } else {
                format!("{indent}{line}{eol}")
            }
        })
        .collect();

    let at = match insert.placement {
        Placement::Before => anchor,
        Placement::After => anchor + 1,
    };
    let count = rendered.len();
    lines.splice(at..at, rendered);

    tracing::debug!(line = at + 1, count, "inserted markup at anchor");
    Ok(AnchorOutcome::Inserted { line: at, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Vec<String> {
        text.split('\n').map(String::from).collect()
    }

    fn button() -> AnchorInsert {
        AnchorInsert::new(
            "{/* Results */}",
            "{t.recalculate}",
            ["<button>", "  {t.recalculate}", "</button>", ""],
        )
    }

    #[test]
    fn test_insert_before_copies_next_line_indent() {
        let mut lines = doc("      <form/>\n      {/* Results */}\n      <div>\n      </div>");
        let outcome = insert_at_anchor(&mut lines, &button()).unwrap();
        assert_eq!(outcome, AnchorOutcome::Inserted { line: 1, count: 4 });
        assert_eq!(
            lines,
            doc(concat!(
                "      <form/>\n",
                "      <button>\n",
                "        {t.recalculate}\n",
                "      </button>\n",
                "\n",
                "      {/* Results */}\n",
                "      <div>\n",
                "      </div>"
            ))
        );
    }

    #[test]
    fn test_insert_after_anchor() {
        let mut lines = doc("  {/* Results */}\n  <div/>");
        let insert = button().with_placement(Placement::After);
        insert_at_anchor(&mut lines, &insert).unwrap();
        assert_eq!(lines[0], "  {/* Results */}");
        assert_eq!(lines[1], "  <button>");
    }

    #[test]
    fn test_default_indent_when_anchor_is_last_line() {
        let mut lines = doc("{/* Results */}");
        let insert = button().with_default_indent("    ");
        insert_at_anchor(&mut lines, &insert).unwrap();
        assert_eq!(lines[0], "    <button>");
    }

    #[test]
    fn test_alternative_anchor() {
        let mut lines = doc("  {/* Results Section */}\n  <div/>");
        let insert = button().or_anchor("{/* Results Section */}");
        assert!(insert_at_anchor(&mut lines, &insert).unwrap().is_inserted());
    }

    #[test]
    fn test_marker_anywhere_means_present() {
        let mut lines = doc("  <span>{t.recalculate}</span>\n  {/* Results */}");
        let before = lines.clone();
        let outcome = insert_at_anchor(&mut lines, &button()).unwrap();
        assert_eq!(outcome, AnchorOutcome::AlreadyPresent);
        assert_eq!(lines, before);
    }

    #[test]
    fn test_anchor_not_found_is_unchanged() {
        let mut lines = doc("  <div/>");
        let outcome = insert_at_anchor(&mut lines, &button()).unwrap();
        assert_eq!(outcome, AnchorOutcome::AnchorNotFound);
        assert_eq!(lines, doc("  <div/>"));
    }

    #[test]
    fn test_template_without_marker_is_rejected() {
        let insert = AnchorInsert::new("{/* Results */}", "{t.other}", ["<button/>"]);
        let err = insert_at_anchor(&mut doc("{/* Results */}"), &insert).unwrap_err();
        assert!(matches!(err, Error::InvalidEdit { .. }));
    }

    #[test]
    fn test_unbalanced_template_is_rejected() {
        let insert = AnchorInsert::new("{/* Results */}", "marker", ["<div marker={"]);
        let err = insert_at_anchor(&mut doc("{/* Results */}"), &insert).unwrap_err();
        assert!(matches!(err, Error::UnbalancedEdit { delta: 1, .. }));
    }

    #[test]
    fn test_missing_binding_blocks_insertion() {
        let source = "  const results = compute();\n  {/* Results */}\n  <div/>";
        let mut lines = doc(source);
        let insert = button().requires(r"\bsetResults\s*\]\s*=\s*useState").unwrap();
        let outcome = insert_at_anchor(&mut lines, &insert).unwrap();
        assert_eq!(outcome, AnchorOutcome::PreconditionMissing);
        assert_eq!(lines, doc(source));

        let mut lines = doc(concat!(
            "  const [results, setResults] = useState({});\n",
            "  {/* Results */}\n",
            "  <div/>"
        ));
        assert!(insert_at_anchor(&mut lines, &insert).unwrap().is_inserted());
    }

    #[test]
    fn test_invalid_binding_pattern() {
        assert!(matches!(button().requires("(open"), Err(Error::Pattern(_))));
    }
}
