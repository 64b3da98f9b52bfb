//! Line start index for offset to line/column conversion

use crate::types::Location;

/// Character offsets at which each line of a text begins
///
/// Built with one scan of the text; lookups are a binary search over the
/// line starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// `line_starts[i]` is the offset of the first character of line `i`
    line_starts: Vec<usize>,

    /// Total length of the text in characters
    total_length: usize,
}

impl LineIndex {
    /// Index the lines of `text`
    ///
    /// ```
    /// use retrace::LineIndex;
    ///
    /// let index = LineIndex::new("ab\ncd");
    /// assert_eq!(index.line_count(), 2);
    /// ```
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut total_length = 0;
        for (idx, ch) in text.chars().enumerate() {
            if ch == '\n' {
                line_starts.push(idx + 1);
            }
            total_length = idx + 1;
        }

        LineIndex {
            line_starts,
            total_length,
        }
    }

    /// Convert a character offset to a line and column
    ///
    /// The line is the last one whose start is at or before `offset`. A
    /// newline character belongs to the line it terminates. Returns `None`
    /// past the end of the text.
    ///
    /// ```
    /// use retrace::{LineIndex, Location};
    ///
    /// let index = LineIndex::new("hello\nworld");
    /// assert_eq!(index.location(6), Some(Location::new(1, 0)));
    /// ```
    pub fn location(&self, offset: usize) -> Option<Location> {
        if offset > self.total_length {
            return None;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Some(Location {
            line,
            column: offset - self.line_starts[line],
        })
    }

    /// Offset of the first character of `line`
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn total_length(&self) -> usize {
        self.total_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let index = LineIndex::new("");
        assert_eq!(index.total_length(), 0);
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.location(0), Some(Location::new(0, 0)));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new("line 1\nline 2\nline 3");
        assert_eq!(index.line_count(), 3);

        assert_eq!(index.location(0), Some(Location::new(0, 0)));
        // the first newline
        assert_eq!(index.location(6), Some(Location::new(0, 6)));
        assert_eq!(index.location(7), Some(Location::new(1, 0)));
        assert_eq!(index.location(14), Some(Location::new(2, 0)));
        assert_eq!(index.location(20), Some(Location::new(2, 6)));
        assert_eq!(index.location(21), None);
    }

    #[test]
    fn test_consecutive_newlines() {
        let index = LineIndex::new("a\n\n\nb");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.location(2), Some(Location::new(1, 0)));
        assert_eq!(index.location(3), Some(Location::new(2, 0)));
        assert_eq!(index.location(4), Some(Location::new(3, 0)));
        assert_eq!(index.line_start(3), Some(4));
        assert_eq!(index.line_start(4), None);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let index = LineIndex::new("café\nwörld");
        assert_eq!(index.total_length(), 10);
        assert_eq!(index.location(5), Some(Location::new(1, 0)));
        assert_eq!(index.location(7), Some(Location::new(1, 2)));
    }
}
