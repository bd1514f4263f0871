//! In-context literal replacement.

use crate::error::{Error, Result};
use crate::locator::brace_delta;

/// Replaces a hard-coded literal with an expression, e.g. a button caption
/// with its translation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralReplace {
    pub literal: String,
    pub replacement: String,
    /// Only replace occurrences followed (after optional whitespace, possibly
    /// on the next non-blank line) by this text.
    pub followed_by: Option<String>,
}

impl LiteralReplace {
    pub fn new(literal: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            replacement: replacement.into(),
            followed_by: None,
        }
    }

    pub fn followed_by(mut self, context: impl Into<String>) -> Self {
        self.followed_by = Some(context.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.literal.is_empty() {
            return Err(Error::invalid_edit("literal must be non-empty"));
        }
        if self.replacement.contains(&self.literal) {
            return Err(Error::invalid_edit(
                "replacement must not contain the literal it replaces",
            ));
        }
        let delta = brace_delta(&self.replacement) - brace_delta(&self.literal);
        if delta != 0 {
            return Err(Error::UnbalancedEdit {
                content: self.replacement.clone(),
                delta,
            });
        }
        Ok(())
    }
}

fn context_matches(lines: &[String], idx: usize, rest: &str, context: &str) -> bool {
    let rest = rest.trim_start();
    if !rest.is_empty() {
        return rest.starts_with(context);
    }
    lines[idx + 1..]
        .iter()
        .map(|line| line.trim_start())
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with(context))
}

/// Replaces every qualifying occurrence of the literal, returning how many
/// were replaced.
pub fn replace_literal(lines: &mut [String], replace: &LiteralReplace) -> Result<usize> {
    replace.validate()?;
    let literal = replace.literal.as_str();

    let mut total = 0;
    for idx in 0..lines.len() {
        if !lines[idx].contains(literal) {
            continue;
        }

        let line = &lines[idx];
        let mut updated = String::with_capacity(line.len());
        let mut cursor = 0;
        let mut count = 0;
        while let Some(found) = line[cursor..].find(literal) {
            let pos = cursor + found;
            let end = pos + literal.len();
            updated.push_str(&line[cursor..pos]);

            let qualifies = match &replace.followed_by {
                Some(context) => context_matches(&*lines, idx, &line[end..], context),
                None => true,
            };
            if qualifies {
                updated.push_str(&replace.replacement);
                count += 1;
            } else {
                updated.push_str(literal);
            }
            cursor = end;
        }
        updated.push_str(&line[cursor..]);

        if count > 0 {
            lines[idx] = updated;
            total += count;
        }
    }

    if total > 0 {
        tracing::debug!(literal, count = total, "replaced literal");
    }
    Ok(total)
}
