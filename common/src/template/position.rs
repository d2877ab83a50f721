use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based line/column of a byte offset in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    /// Counted in characters, not bytes.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Maps byte offsets of one source text to line/column positions.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (idx, ch) in text.char_indices() {
            if ch == '\n' {
                line_starts.push(idx + ch.len_utf8());
            }
        }
        Self { text, line_starts }
    }

    pub(crate) fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self
            .text
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);
        Position {
            offset,
            line: line + 1,
            column: column + 1,
        }
    }
}

/// Source line of `position` with a caret under its column.
pub fn snippet(source: &str, position: &Position) -> String {
    let line = source
        .lines()
        .nth(position.line.saturating_sub(1))
        .unwrap_or("");
    let caret_column = position
        .column
        .saturating_sub(1)
        .min(line.chars().count());
    format!(
        "{:>3} | {}\n    | {}^",
        position.line,
        line,
        " ".repeat(caret_column)
    )
}
