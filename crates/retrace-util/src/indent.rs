//! Indentation guessing

/// Guess the indentation unit used by `text`
///
/// Lines starting with a tab are counted against lines starting with a
/// space. Tabs win ties, including the case where nothing is indented at
/// all. Otherwise the unit is the shortest leading run of spaces.
///
/// ```
/// use retrace_util::guess_indent;
///
/// assert_eq!(guess_indent("a\n  b\n    c"), "  ");
/// assert_eq!(guess_indent("a\n\tb"), "\t");
/// ```
pub fn guess_indent(text: &str) -> String {
    let mut tabbed = 0usize;
    let mut min_spaces: Option<usize> = None;
    let mut spaced = 0usize;

    for line in text.split('\n') {
        if line.starts_with('\t') {
            tabbed += 1;
        } else if line.starts_with(' ') {
            spaced += 1;
            let count = line.bytes().take_while(|b| *b == b' ').count();
            min_spaces = Some(min_spaces.map_or(count, |min| min.min(count)));
        }
    }

    match min_spaces {
        Some(count) if spaced > tabbed => " ".repeat(count),
        _ => "\t".to_string(),
    }
}
