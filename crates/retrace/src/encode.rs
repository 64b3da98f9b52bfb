//! Mapping encoder
//!
//! Turns an original text, its edited form and the mapping array between
//! them into the `mappings` field of a V3 source map.
//!
//! Encoding happens in two steps. [`collect_segments`] walks the edited
//! text and decides where segments start. [`encode_segments`] delta-encodes
//! them against a set of running [`MappingOffsets`]; keeping those offsets
//! outside the encoder lets a bundle chain several texts into one
//! continuous `mappings` string.

use retrace_util::vlq;

use crate::line_index::LineIndex;
use crate::types::UNMAPPED;

/// One source map record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Column in the generated line
    pub generated_column: usize,
    /// Index into the map's `sources`
    pub source_index: usize,
    /// Line in the original text
    pub source_line: usize,
    /// Column in the original line
    pub source_column: usize,
}

/// Running state of a delta encoding
///
/// Source fields carry across generated lines and across chained encoder
/// calls. `generated_column` is relative to the current generated line and
/// has to be reset by whoever starts a new line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingOffsets {
    /// Source index of the last segment written
    pub source_index: i64,
    /// Original line of the last segment written
    pub source_line: i64,
    /// Original column of the last segment written
    pub source_column: i64,
    /// Generated column of the last segment on the current line
    pub generated_column: i64,
}

impl MappingOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a new generated line
    pub fn start_line(&mut self) {
        self.generated_column = 0;
    }

    fn encode(&mut self, segment: &Segment, out: &mut String) {
        let generated_column = segment.generated_column as i64;
        let source_index = segment.source_index as i64;
        let source_line = segment.source_line as i64;
        let source_column = segment.source_column as i64;

        vlq::encode_value(generated_column - self.generated_column, out);
        vlq::encode_value(source_index - self.source_index, out);
        vlq::encode_value(source_line - self.source_line, out);
        vlq::encode_value(source_column - self.source_column, out);

        self.generated_column = generated_column;
        self.source_index = source_index;
        self.source_line = source_line;
        self.source_column = source_column;
    }
}

/// Build the inverse of `mapping`: for every current offset, the original
/// offset it came from or [`UNMAPPED`]
pub(crate) fn invert(mapping: &[i64], current_len: usize) -> Vec<i64> {
    let mut inverse = vec![UNMAPPED; current_len];
    for (original, &current) in mapping.iter().enumerate() {
        if current != UNMAPPED {
            inverse[current as usize] = original as i64;
        }
    }
    inverse
}

/// Decide which characters of `current` start a segment, per generated line
///
/// A segment starts wherever mapped text begins or jumps (every mapped
/// character when `hires` is set). Where mapped text gives way to inserted
/// text a marker segment pointing at line 0, column 0 closes the previous
/// span; runs of inserted text produce nothing further. The first character
/// of each line always starts a segment.
pub fn collect_segments(
    original: &str,
    current: &str,
    mapping: &[i64],
    hires: bool,
    source_index: usize,
) -> Vec<Vec<Segment>> {
    let lines = LineIndex::new(original);
    let current_len = current.chars().count();
    let inverse = invert(mapping, current_len);

    let mut result = Vec::new();
    let mut segments = Vec::new();
    // None until the first character of a line has been seen
    let mut last_origin: Option<i64> = None;
    let mut column = 0usize;

    for (offset, ch) in current.chars().enumerate() {
        if ch == '\n' {
            result.push(std::mem::take(&mut segments));
            last_origin = None;
            column = 0;
            continue;
        }

        let origin = inverse[offset];

        if origin == UNMAPPED {
            if last_origin != Some(UNMAPPED) {
                segments.push(Segment {
                    generated_column: column,
                    source_index,
                    source_line: 0,
                    source_column: 0,
                });
            }
        } else {
            let continues_run = matches!(last_origin, Some(last) if last != UNMAPPED && last + 1 == origin);
            if hires || !continues_run {
                // origins always come from the mapping, so they are in range
                if let Some(location) = lines.location(origin as usize) {
                    segments.push(Segment {
                        generated_column: column,
                        source_index,
                        source_line: location.line,
                        source_column: location.column,
                    });
                }
            }
        }

        last_origin = Some(origin);
        column += 1;
    }

    result.push(segments);
    result
}

/// Delta-encode segment lines against `offsets`
///
/// Returns one comma-joined string per line. The generated column resets at
/// every line after the first; the first line continues whatever line
/// `offsets` describes.
pub fn encode_segments(lines: &[Vec<Segment>], offsets: &mut MappingOffsets) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, segments)| {
            if idx > 0 {
                offsets.start_line();
            }
            let mut encoded = String::new();
            for (n, segment) in segments.iter().enumerate() {
                if n > 0 {
                    encoded.push(',');
                }
                offsets.encode(segment, &mut encoded);
            }
            encoded
        })
        .collect()
}

/// Encode the `mappings` field for a single text
///
/// `offsets` is read and updated, so consecutive calls can share it.
pub fn encode_mappings(
    original: &str,
    current: &str,
    mapping: &[i64],
    hires: bool,
    source_index: usize,
    offsets: &mut MappingOffsets,
) -> String {
    let lines = collect_segments(original, current, mapping, hires, source_index);
    encode_segments(&lines, offsets).join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(len: usize) -> Vec<i64> {
        (0..len as i64).collect()
    }

    #[test]
    fn test_unedited_text_has_one_segment_per_line() {
        let text = "abc\ndef";
        let lines = collect_segments(text, text, &identity(7), false, 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            vec![Segment {
                generated_column: 0,
                source_index: 0,
                source_line: 1,
                source_column: 0
            }]
        );

        let encoded = encode_mappings(text, text, &identity(7), false, 0, &mut MappingOffsets::new());
        assert_eq!(encoded, "AAAA;AACA");
    }

    #[test]
    fn test_hires_emits_every_character() {
        let text = "abc";
        let encoded = encode_mappings(text, text, &identity(3), true, 0, &mut MappingOffsets::new());
        assert_eq!(encoded, "AAAA,CAAC,CAAC");
    }

    #[test]
    fn test_removed_range_starts_new_segment() {
        // "abcdef" with "cd" removed
        let mapping = vec![0, 1, UNMAPPED, UNMAPPED, 2, 3];
        let encoded = encode_mappings("abcdef", "abef", &mapping, false, 0, &mut MappingOffsets::new());
        assert_eq!(encoded, "AAAA,EAAI");
    }

    #[test]
    fn test_inserted_text_gets_a_marker() {
        // "abc" with "XY" appended
        let lines = collect_segments("abc", "abcXY", &identity(3), false, 0);
        assert_eq!(lines[0].len(), 2);
        assert_eq!(
            lines[0][1],
            Segment {
                generated_column: 3,
                source_index: 0,
                source_line: 0,
                source_column: 0
            }
        );
    }

    #[test]
    fn test_leading_inserted_text_gets_a_marker() {
        // "abc" with "X" prepended
        let lines = collect_segments("abc", "Xabc", &[1, 2, 3], false, 0);
        assert_eq!(
            lines[0],
            vec![
                Segment {
                    generated_column: 0,
                    source_index: 0,
                    source_line: 0,
                    source_column: 0
                },
                Segment {
                    generated_column: 1,
                    source_index: 0,
                    source_line: 0,
                    source_column: 0
                },
            ]
        );
    }

    #[test]
    fn test_blank_lines_become_bare_semicolons() {
        let lines = collect_segments("a", "a\n\n\n", &[0], false, 0);
        assert_eq!(lines.len(), 4);
        let encoded = encode_segments(&lines, &mut MappingOffsets::new()).join(";");
        assert_eq!(encoded, "AAAA;;;");
    }

    #[test]
    fn test_offsets_chain_across_calls() {
        let mut offsets = MappingOffsets::new();
        let first = encode_mappings("ab\ncd", "ab\ncd", &identity(5), false, 0, &mut offsets);
        assert_eq!(first, "AAAA;AACA");
        assert_eq!(offsets.source_line, 1);

        offsets.start_line();
        let second = encode_mappings("xy", "xy", &identity(2), false, 1, &mut offsets);
        // next source, back to line 0
        assert_eq!(second, "ACDA");
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert(&[1, UNMAPPED, 2], 4), vec![UNMAPPED, 0, 2, UNMAPPED]);
    }
}
