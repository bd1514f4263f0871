//! Locating brace-delimited blocks by key.
//!
//! A block opens on a line matching `^\s+<key>:\s*\{` and closes on the first
//! line at which the running count of `{` minus `}` (starting with the opener
//! line) returns to zero. Braces inside string literals are counted like any
//! other; a document whose strings carry unbalanced braces will be reported as
//! malformed rather than guessed at.

use regex::Regex;

use crate::error::{Error, Result};

/// An inclusive line range `[start, end]` of a block, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRange {
    /// Index of the opener line.
    pub start: usize,
    /// Index of the line that brings the brace count back to zero.
    pub end: usize,
}

impl BlockRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True when the opener line also closes the block (`en: {}`).
    pub fn is_inline(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }

    /// The block's lines joined with `\n`.
    pub fn text<S: AsRef<str>>(&self, lines: &[S]) -> String {
        lines
            .get(self.start..=self.end)
            .unwrap_or_default()
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Net brace count of one line: `{` occurrences minus `}` occurrences.
pub fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Net brace count of a whole document.
pub fn brace_balance<S: AsRef<str>>(lines: &[S]) -> i64 {
    lines.iter().map(|line| brace_delta(line.as_ref())).sum()
}

fn opener(key: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"^\s+{}:\s*\{{", regex::escape(key)))?)
}

/// Finds the first block opened by `key` at or after line `search_from`.
///
/// Returns `Ok(None)` when no opener matches. An opener whose braces never
/// balance is an [`Error::UnbalancedBlock`]; callers must not guess a
/// boundary in that case.
///
/// # Example
/// ```
/// use patcher_blocks::find_block;
///
/// let lines = [
///     "const t = {",
///     "  en: {",
///     "    title: \"Loan\"",
///     "  },",
///     "};",
/// ];
/// let block = find_block(&lines, "en", 0).unwrap().unwrap();
/// assert_eq!((block.start, block.end), (1, 3));
/// assert!(find_block(&lines, "en", 2).unwrap().is_none());
/// ```
pub fn find_block<S: AsRef<str>>(
    lines: &[S],
    key: &str,
    search_from: usize,
) -> Result<Option<BlockRange>> {
    let opener = opener(key)?;
    let Some(start) =
        (search_from..lines.len()).find(|&idx| opener.is_match(lines[idx].as_ref()))
    else {
        return Ok(None);
    };

    let mut depth = 0;
    for (offset, line) in lines[start..].iter().enumerate() {
        depth += brace_delta(line.as_ref());
        if depth == 0 {
            return Ok(Some(BlockRange::new(start, start + offset)));
        }
        if depth < 0 {
            break;
        }
    }

    Err(Error::UnbalancedBlock {
        key: key.to_string(),
        line: start + 1,
    })
}

/// Finds every block opened by `key`, top to bottom.
pub fn find_blocks<S: AsRef<str>>(lines: &[S], key: &str) -> Result<Vec<BlockRange>> {
    let mut blocks = Vec::new();
    let mut from = 0;
    while let Some(block) = find_block(lines, key, from)? {
        from = block.end + 1;
        blocks.push(block);
    }
    Ok(blocks)
}

/// Leading whitespace of a line, ignoring a trailing `\r`.
pub(crate) fn leading_whitespace(line: &str) -> &str {
    let line = line.trim_end_matches('\r');
    &line[..line.len() - line.trim_start().len()]
}

/// `"\r"` when the line uses CRLF endings, so inserted lines can match it.
pub(crate) fn line_ending(line: &str) -> &'static str {
    if line.ends_with('\r') { "\r" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  en: {", 1)]
    #[case("  },", -1)]
    #[case("onClick={() => { run(); }}", 0)]
    #[case("plain text", 0)]
    #[case("}}} {", -2)]
    fn test_brace_delta(#[case] line: &str, #[case] expected: i64) {
        assert_eq!(brace_delta(line), expected);
    }

    #[test]
    fn test_opener_requires_leading_whitespace() {
        let lines = ["en: {", "}"];
        assert!(find_block(&lines, "en", 0).unwrap().is_none());
    }

    #[test]
    fn test_opener_does_not_match_longer_key() {
        let lines = ["  ena: {", "  }", "  en: {", "  }"];
        let block = find_block(&lines, "en", 0).unwrap().unwrap();
        assert_eq!(block.start, 2);
    }

    #[test]
    fn test_key_is_escaped() {
        let lines = ["  a.b: {", "  }", "  axb: {", "  }"];
        let block = find_block(&lines, "a.b", 0).unwrap().unwrap();
        assert_eq!(block, BlockRange::new(0, 1));
        let block = find_block(&lines, "a.b", 1).unwrap();
        assert!(block.is_none());
    }

    #[test]
    fn test_inline_block() {
        let lines = ["  en: {}"];
        let block = find_block(&lines, "en", 0).unwrap().unwrap();
        assert!(block.is_inline());
    }

    #[test]
    fn test_nested_block_end() {
        let lines = [
            "  en: {",
            "    nested: {",
            "      a: \"b\",",
            "    },",
            "    c: \"d\"",
            "  },",
        ];
        let block = find_block(&lines, "en", 0).unwrap().unwrap();
        assert_eq!(block, BlockRange::new(0, 5));
    }

    #[test]
    fn test_negative_count_is_unbalanced() {
        let lines = ["  en: {", "  }}", "}"];
        let err = find_block(&lines, "en", 0).unwrap_err();
        assert!(matches!(err, Error::UnbalancedBlock { line: 1, .. }));
    }

    #[test]
    fn test_leading_whitespace_ignores_cr() {
        assert_eq!(leading_whitespace("    a\r"), "    ");
        assert_eq!(leading_whitespace("  \r"), "  ");
        assert_eq!(leading_whitespace("a"), "");
    }
}
