//! Character-offset helpers for working with `String` buffers

/// Convert a character offset into a byte offset in `text`
///
/// Offsets at or past the end map to `text.len()`.
pub fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Number of characters in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Number of characters after the last `\n` in `text`
pub fn last_line_width(text: &str) -> usize {
    match text.rfind('\n') {
        Some(idx) => char_len(&text[idx + 1..]),
        None => char_len(text),
    }
}

/// Whitespace as matched by the ECMAScript `\s` class
///
/// This is Unicode `White_Space` minus U+0085, plus the byte order mark.
pub fn is_whitespace(ch: char) -> bool {
    ch == '\u{feff}' || (ch != '\u{85}' && ch.is_whitespace())
}

/// Characters that end a line
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Insert `unit` after every `\n` that is followed by a non-empty line
pub(crate) fn indent_following_lines(text: &str, unit: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if ch == '\n' && chars.peek().is_some_and(|next| !is_line_terminator(*next)) {
            out.push_str(unit);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset() {
        let text = "héllo";
        assert_eq!(byte_offset(text, 0), 0);
        assert_eq!(byte_offset(text, 1), 1);
        assert_eq!(byte_offset(text, 2), 3);
        assert_eq!(byte_offset(text, 5), 6);
        assert_eq!(byte_offset(text, 50), 6);
    }

    #[test]
    fn test_last_line_width() {
        assert_eq!(last_line_width(""), 0);
        assert_eq!(last_line_width("abc"), 3);
        assert_eq!(last_line_width("abc\n"), 0);
        assert_eq!(last_line_width("abc\nxé"), 2);
    }

    #[test]
    fn test_whitespace_class() {
        for ch in [' ', '\t', '\n', '\r', '\u{b}', '\u{c}', '\u{a0}', '\u{2028}', '\u{feff}'] {
            assert!(is_whitespace(ch), "{:?} should be whitespace", ch);
        }
        for ch in ['a', '\u{85}', '\u{200b}'] {
            assert!(!is_whitespace(ch), "{:?} should not be whitespace", ch);
        }
    }

    #[test]
    fn test_indent_following_lines() {
        assert_eq!(indent_following_lines("a\nb\n\nc\n", "  "), "a\n  b\n\n  c\n");
        assert_eq!(indent_following_lines("no newline", "\t"), "no newline");
    }
}
