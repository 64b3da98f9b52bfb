//! Editable text with original-position tracking
//!
//! An [`EditableText`] keeps the text it was created from, the text as it
//! looks after the edits applied so far, and a mapping array with one entry
//! per original character. Each entry holds the character's offset in the
//! edited text, or a sentinel once the character has been replaced, removed
//! or trimmed away.
//!
//! Edit operations take offsets in original coordinates, so a caller can keep
//! using positions from the untouched input (for example from a parser) no
//! matter how many edits came before.
//!
//! Entries that are still mapped never collide and keep their relative
//! order, and an unmapped entry stays unmapped. All offsets are counted in
//! characters.

use std::fmt;

use retrace_util::{guess_indent, relative_path};
use tracing::{debug, trace};

use crate::encode::{MappingOffsets, Segment, collect_segments, encode_mappings};
use crate::error::{EditError, Result};
use crate::options::{IndentOptions, MapOptions};
use crate::source_map::SourceMap;
use crate::types::UNMAPPED;
use crate::utils::{byte_offset, char_len, is_line_terminator, is_whitespace};

/// A string under incremental edit that remembers where each surviving
/// character came from
///
/// ```
/// use retrace::EditableText;
///
/// let mut text = EditableText::new("function foo() {\n  return 42;\n}");
/// text.replace(9, 12, "bar").unwrap();
///
/// assert_eq!(text.as_str(), "function bar() {\n  return 42;\n}");
/// assert_eq!(text.locate(13).unwrap(), Some(13));
/// assert_eq!(text.locate(10).unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableText {
    original: String,
    current: String,
    /// One entry per original character: its current offset, or `UNMAPPED`
    mapping: Vec<i64>,
    indent_unit: String,
}

impl EditableText {
    /// Start tracking `text`
    ///
    /// The indentation unit used by [`EditableText::indent`] is guessed from
    /// the text here, once.
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        let mapping = (0..char_len(&original) as i64).collect();

        EditableText {
            indent_unit: guess_indent(&original),
            current: original.clone(),
            mapping,
            original,
        }
    }

    /// The text this value was created from
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The text after all edits so far
    pub fn as_str(&self) -> &str {
        &self.current
    }

    /// The guessed indentation unit of the original text
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    /// The mapping array, indexed by original offset
    ///
    /// Entries are current offsets; `-1` marks characters that no longer
    /// exist.
    pub fn mapping(&self) -> &[i64] {
        &self.mapping
    }

    /// Length of the original text in characters
    pub fn original_len(&self) -> usize {
        self.mapping.len()
    }

    /// Length of the current text in characters
    pub fn len(&self) -> usize {
        char_len(&self.current)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Add `text` to the end
    pub fn append(&mut self, text: &str) -> &mut Self {
        trace!(len = text.len(), "append");
        self.current.push_str(text);
        self
    }

    /// Add `text` to the front, ahead of anything inserted before
    pub fn prepend(&mut self, text: &str) -> &mut Self {
        trace!(len = text.len(), "prepend");
        self.current.insert_str(0, text);
        self.shift(0, char_len(text) as i64);
        self
    }

    /// Insert `text` before the original character at `at`
    ///
    /// Inserting at the very start or end is the same as
    /// [`prepend`](Self::prepend) or [`append`](Self::append). Anywhere else
    /// the character at `at` must still exist; the text goes right in front
    /// of it, after any text inserted at the same point earlier.
    pub fn insert(&mut self, at: usize, text: &str) -> Result<&mut Self> {
        let len = self.original_len();
        if at > len {
            return Err(EditError::OutOfBounds { offset: at, len });
        }

        if at == 0 {
            Ok(self.prepend(text))
        } else if at == len {
            Ok(self.append(text))
        } else {
            self.replace(at, at, text)
        }
    }

    /// Replace the original range `[start, end)` with `text`
    ///
    /// Fails with [`EditError::RangeAlreadyReplaced`] if any character in the
    /// range was already edited away; a range can only be replaced once.
    /// Text inserted between characters of the range is replaced along with
    /// them.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<&mut Self> {
        self.check_range(start, end)?;

        if start == end {
            return self.insert_at(start, text);
        }

        if self.mapping[start..end].contains(&UNMAPPED) {
            return Err(EditError::RangeAlreadyReplaced { start, end });
        }

        let first_char = self.mapping[start] as usize;
        let last_char = self.mapping[end - 1] as usize;

        let from = byte_offset(&self.current, first_char);
        let to = byte_offset(&self.current, last_char + 1);
        self.current.replace_range(from..to, text);

        let delta = char_len(text) as i64 - (last_char + 1 - first_char) as i64;
        self.mapping[start..end].fill(UNMAPPED);
        self.shift(end, delta);

        trace!(start, end, delta, "replace");
        Ok(self)
    }

    /// Remove the original range `[start, end)`
    pub fn remove(&mut self, start: usize, end: usize) -> Result<&mut Self> {
        self.replace(start, end, "")
    }

    /// Current offset of the original character at `offset`
    ///
    /// Returns `None` if the character was replaced, removed or trimmed.
    /// `offset` may equal the original length, which never holds a
    /// character and so yields `None`.
    pub fn locate(&self, offset: usize) -> Result<Option<usize>> {
        let len = self.original_len();
        if offset > len {
            return Err(EditError::OutOfBounds { offset, len });
        }

        Ok(self
            .mapping
            .get(offset)
            .filter(|&&current| current != UNMAPPED)
            .map(|&current| current as usize))
    }

    /// Original offset of the character at current `offset`
    ///
    /// Returns `None` for characters that were inserted.
    pub fn locate_origin(&self, offset: usize) -> Result<Option<usize>> {
        let len = self.len();
        if offset >= len {
            return Err(EditError::OutOfBounds { offset, len });
        }

        Ok(self.mapping.iter().rposition(|&current| current == offset as i64))
    }

    /// The current text spanned by the original range `[start, end)`
    ///
    /// Both boundary characters must still exist. Anything inserted between
    /// them is part of the slice.
    pub fn slice(&self, start: usize, end: usize) -> Result<&str> {
        self.check_range(start, end)?;
        if start == end {
            return Ok("");
        }

        match (self.locate(start)?, self.locate(end - 1)?) {
            (Some(first_char), Some(last_char)) => {
                let from = byte_offset(&self.current, first_char);
                let to = byte_offset(&self.current, last_char + 1);
                Ok(&self.current[from..to])
            }
            _ => Err(EditError::UnmappableRange { start, end }),
        }
    }

    /// Strip leading and trailing whitespace
    pub fn trim(&mut self) -> &mut Self {
        self.trim_start().trim_end()
    }

    /// Strip leading whitespace
    pub fn trim_start(&mut self) -> &mut Self {
        let remaining = self.current.trim_start_matches(is_whitespace).len();
        let stripped_bytes = self.current.len() - remaining;
        if stripped_bytes == 0 {
            return self;
        }

        let stripped = char_len(&self.current[..stripped_bytes]) as i64;
        self.current.drain(..stripped_bytes);

        for current in self.mapping.iter_mut().filter(|c| **c != UNMAPPED) {
            if *current < stripped {
                *current = UNMAPPED;
            } else {
                *current -= stripped;
            }
        }

        trace!(stripped, "trim start");
        self
    }

    /// Strip trailing whitespace
    pub fn trim_end(&mut self) -> &mut Self {
        let kept_bytes = self.current.trim_end_matches(is_whitespace).len();
        if kept_bytes == self.current.len() {
            return self;
        }

        let kept = char_len(&self.current[..kept_bytes]) as i64;
        self.current.truncate(kept_bytes);

        for current in self.mapping.iter_mut() {
            if *current >= kept {
                *current = UNMAPPED;
            }
        }

        trace!(kept, "trim end");
        self
    }

    /// Indent every non-empty line with the guessed indentation unit
    pub fn indent(&mut self) -> &mut Self {
        let unit = self.indent_unit.clone();
        self.indent_lines(&unit, &[]);
        self
    }

    /// Indent every non-empty line with `unit`
    pub fn indent_by(&mut self, unit: &str) -> &mut Self {
        self.indent_lines(unit, &[]);
        self
    }

    /// Indent every non-empty line with `unit` (default: the guessed unit),
    /// leaving lines that start inside an excluded range untouched
    ///
    /// ```
    /// use retrace::{EditableText, IndentOptions};
    ///
    /// let mut text = EditableText::new("a\nb\nc");
    /// text.indent_with(Some(">"), &IndentOptions::default().exclude(2, 3)).unwrap();
    /// assert_eq!(text.as_str(), ">a\nb\n>c");
    /// ```
    pub fn indent_with(&mut self, unit: Option<&str>, options: &IndentOptions) -> Result<&mut Self> {
        let exclusions = self.resolve_exclusions(&options.exclude)?;
        let unit = unit.map_or_else(|| self.indent_unit.clone(), str::to_string);
        self.indent_lines(&unit, &exclusions);
        Ok(self)
    }

    /// The segments this text contributes to a source map, per line
    pub fn segments(&self, hires: bool, source_index: usize) -> Vec<Vec<Segment>> {
        collect_segments(
            &self.original,
            &self.current,
            &self.mapping,
            hires,
            source_index,
        )
    }

    /// Encode the `mappings` field for this text, continuing from `offsets`
    pub fn mappings(&self, hires: bool, source_index: usize, offsets: &mut MappingOffsets) -> String {
        encode_mappings(
            &self.original,
            &self.current,
            &self.mapping,
            hires,
            source_index,
            offsets,
        )
    }

    /// Generate a source map from the current text back to the original
    ///
    /// ```
    /// use retrace::{EditableText, MapOptions};
    ///
    /// let mut text = EditableText::new("abcdefghijkl");
    /// text.remove(3, 9).unwrap();
    ///
    /// let map = text.generate_map(&MapOptions::new().file("out.js").source("in.js"));
    /// assert_eq!(map.mappings, "AAAA,GAAS");
    /// assert_eq!(map.sources, vec![Some("in.js".to_string())]);
    /// ```
    pub fn generate_map(&self, options: &MapOptions) -> SourceMap {
        let mappings = self.mappings(options.hires, 0, &mut MappingOffsets::new());
        let source = options
            .source
            .as_deref()
            .map(|source| relative_path(options.file.as_deref().unwrap_or(""), source));
        let content = options.include_content.then(|| self.original.clone());

        debug!(
            file = ?options.file,
            hires = options.hires,
            mappings_len = mappings.len(),
            "Generated source map"
        );

        SourceMap::new(options.file_name(), vec![source], vec![content], mappings)
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        let len = self.original_len();
        if end > len {
            return Err(EditError::OutOfBounds { offset: end, len });
        }
        if start > end {
            return Err(EditError::OutOfBounds { offset: start, len: end });
        }
        Ok(())
    }

    /// Zero-width replace: insert in front of original character `at`
    ///
    /// Both neighbours of the insertion point must still exist.
    fn insert_at(&mut self, at: usize, text: &str) -> Result<&mut Self> {
        if at > 0 && self.mapping[at - 1] == UNMAPPED {
            return Err(EditError::RangeAlreadyReplaced { start: at, end: at });
        }

        let position = if at == self.original_len() {
            self.len()
        } else {
            match self.mapping[at] {
                UNMAPPED => return Err(EditError::RangeAlreadyReplaced { start: at, end: at }),
                current => current as usize,
            }
        };

        let from = byte_offset(&self.current, position);
        self.current.insert_str(from, text);
        self.shift(at, char_len(text) as i64);

        trace!(at, len = text.len(), "insert");
        Ok(self)
    }

    /// Add `delta` to every live entry from original offset `start` on
    fn shift(&mut self, start: usize, delta: i64) {
        if delta == 0 {
            return;
        }
        for current in self.mapping[start..].iter_mut().filter(|c| **c != UNMAPPED) {
            *current += delta;
        }
    }

    /// Translate exclusion ranges into sorted, disjoint current ranges
    fn resolve_exclusions(&self, ranges: &[(usize, usize)]) -> Result<Vec<(usize, usize)>> {
        let mut resolved = Vec::with_capacity(ranges.len());

        for &(start, end) in ranges {
            self.check_range(start, end)?;
            if start == end {
                continue;
            }

            let from = self
                .locate(start)?
                .ok_or(EditError::UnmappableExclusionBoundary { offset: start })?;
            let to = self
                .locate(end - 1)?
                .ok_or(EditError::UnmappableExclusionBoundary { offset: end - 1 })?;
            resolved.push(((from, to + 1), (start, end)));
        }

        resolved.sort_by_key(|(current, _)| current.0);
        for pair in resolved.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.0.0 < previous.0.1 {
                return Err(EditError::OverlappingExclusions {
                    first: previous.1,
                    second: next.1,
                });
            }
        }

        Ok(resolved.into_iter().map(|(current, _)| current).collect())
    }

    fn indent_lines(&mut self, unit: &str, exclusions: &[(usize, usize)]) {
        if unit.is_empty() {
            return;
        }

        let is_excluded = |offset: usize| {
            let idx = exclusions.partition_point(|range| range.0 <= offset);
            idx > 0 && offset < exclusions[idx - 1].1
        };

        let mut inserts = Vec::new();
        let mut indented = String::with_capacity(self.current.len());
        let mut at_line_start = true;

        for (offset, ch) in self.current.chars().enumerate() {
            if at_line_start && !is_line_terminator(ch) && !is_excluded(offset) {
                inserts.push(offset as i64);
                indented.push_str(unit);
            }
            indented.push(ch);
            at_line_start = ch == '\n';
        }

        if inserts.is_empty() {
            return;
        }
        self.current = indented;

        // Live entries increase with original offset, so one pass over the
        // insertion points is enough.
        let width = char_len(unit) as i64;
        let mut passed = 0;
        for current in self.mapping.iter_mut().filter(|c| **c != UNMAPPED) {
            while passed < inserts.len() && inserts[passed] <= *current {
                passed += 1;
            }
            *current += passed as i64 * width;
        }

        trace!(lines = inserts.len(), "indent");
    }
}

impl fmt::Display for EditableText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.current)
    }
}

impl From<&str> for EditableText {
    fn from(text: &str) -> Self {
        EditableText::new(text)
    }
}

impl From<String> for EditableText {
    fn from(text: String) -> Self {
        EditableText::new(text)
    }
}
