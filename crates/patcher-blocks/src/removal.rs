//! Removal of markup blocks, plain and gated.
//!
//! The gated form is a compensating action for an earlier optimistic
//! insertion: markup that references a binding is removed only when the
//! rest of the document proves the binding does not exist.

use regex::Regex;

use crate::error::{Error, Result};
use crate::locator::{BlockRange, brace_balance};

/// Lines deleted by a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    /// Index of the first deleted line.
    pub start: usize,
    /// Number of deleted lines, trailing blank lines included.
    pub lines: usize,
}

/// True when the tag opened just before `rest` ends with `/>` on this line.
///
/// A `>` inside `{...}` belongs to an expression (`() => ...`), not the tag.
fn self_closes(rest: &str) -> bool {
    let mut depth = 0i64;
    let mut prev = None;
    for c in rest.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            '>' if depth == 0 => return prev == Some('/'),
            _ => {}
        }
        prev = Some(c);
    }
    false
}

/// Finds the first markup block at or after `from`.
///
/// The block runs from a line containing `open` to the next line containing
/// `close`. A self-closing tag, or a close marker later on the opener line,
/// makes a one-line block. An opener followed by another `open` before any
/// `close` has no close of its own; the scan restarts at the later opener so
/// two tags never merge into one block.
pub fn find_markup_block<S: AsRef<str>>(
    lines: &[S],
    open: &str,
    close: &str,
    from: usize,
) -> Result<Option<BlockRange>> {
    if open.is_empty() || close.is_empty() {
        return Err(Error::invalid_edit("markup markers must be non-empty"));
    }

    let Some(mut start) = (from..lines.len()).find(|&idx| lines[idx].as_ref().contains(open))
    else {
        return Ok(None);
    };

    'scan: loop {
        let opener = lines[start].as_ref();
        let rest = opener
            .find(open)
            .map(|pos| &opener[pos + open.len()..])
            .unwrap_or_default();
        if self_closes(rest) || rest.contains(close) {
            return Ok(Some(BlockRange::new(start, start)));
        }

        for idx in start + 1..lines.len() {
            let line = lines[idx].as_ref();
            if line.contains(close) {
                return Ok(Some(BlockRange::new(start, idx)));
            }
            if line.contains(open) {
                tracing::debug!(line = start + 1, "markup opener without its own close");
                start = idx;
                continue 'scan;
            }
        }

        return Err(Error::UnterminatedMarkup {
            open: open.to_string(),
            close: close.to_string(),
            line: start + 1,
        });
    }
}

/// Deletes `range` plus any blank lines directly after it.
///
/// The final element of a document split on `\n` stands for its trailing
/// newline and is never consumed.
fn remove_range(lines: &mut Vec<String>, range: BlockRange) -> Result<Removed> {
    let delta = brace_balance(&lines[range.start..=range.end]);
    if delta != 0 {
        return Err(Error::UnbalancedEdit {
            content: range.text(lines.as_slice()),
            delta,
        });
    }

    let mut end = range.end;
    while end + 2 < lines.len() && lines[end + 1].trim().is_empty() {
        end += 1;
    }
    lines.drain(range.start..=end);

    Ok(Removed {
        start: range.start,
        lines: end - range.start + 1,
    })
}

/// Removes the first markup block delimited by `open` and `close`.
///
/// Returns `Ok(None)` when no line contains `open`.
pub fn remove_markup_block(
    lines: &mut Vec<String>,
    open: &str,
    close: &str,
) -> Result<Option<Removed>> {
    match find_markup_block(lines.as_slice(), open, close, 0)? {
        Some(range) => remove_range(lines, range).map(Some),
        None => Ok(None),
    }
}

/// A removal that only runs when a required binding is missing.
#[derive(Debug, Clone)]
pub struct CompensatingRemoval {
    open: String,
    close: String,
    signature: String,
    binding: Regex,
}

impl CompensatingRemoval {
    /// `signature` selects which markup blocks are candidates; `binding` is a
    /// regex that, when it matches the document outside those blocks, proves
    /// the markup is valid and must stay.
    pub fn new(
        open: impl Into<String>,
        close: impl Into<String>,
        signature: impl Into<String>,
        binding: &str,
    ) -> Result<Self> {
        let signature = signature.into();
        if signature.is_empty() {
            return Err(Error::invalid_edit("removal signature must be non-empty"));
        }
        Ok(Self {
            open: open.into(),
            close: close.into(),
            signature,
            binding: Regex::new(binding)?,
        })
    }
}

/// Outcome of a gated removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// `blocks` candidate blocks were deleted, `lines` lines in total.
    Removed { blocks: usize, lines: usize },
    /// The binding exists, so the markup is valid and was kept.
    PreconditionHolds,
    /// No markup block carries the signature.
    NotFound,
}

/// Removes every signature-bearing markup block unless the binding exists
/// elsewhere in the document.
pub fn compensating_remove(
    lines: &mut Vec<String>,
    removal: &CompensatingRemoval,
) -> Result<RemovalOutcome> {
    let mut candidates = Vec::new();
    let mut from = 0;
    while let Some(range) =
        find_markup_block(lines.as_slice(), &removal.open, &removal.close, from)?
    {
        if range.text(lines.as_slice()).contains(&removal.signature) {
            candidates.push(range);
        }
        from = range.end + 1;
    }

    if candidates.is_empty() {
        return Ok(RemovalOutcome::NotFound);
    }

    let outside = lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| !candidates.iter().any(|range| range.contains(*idx)))
        .map(|(_, line)| line.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    if removal.binding.is_match(&outside) {
        tracing::debug!(binding = %removal.binding, "binding exists, keeping markup");
        return Ok(RemovalOutcome::PreconditionHolds);
    }

    let mut removed_lines = 0;
    for range in candidates.iter().rev() {
        removed_lines += remove_range(lines, *range)?.lines;
    }

    tracing::debug!(blocks = candidates.len(), lines = removed_lines, "removed markup");
    Ok(RemovalOutcome::Removed {
        blocks: candidates.len(),
        lines: removed_lines,
    })
}
