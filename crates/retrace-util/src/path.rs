//! Relative paths between logical files
//!
//! Paths here are `/`-separated names as they appear in a source map, not
//! filesystem paths, so nothing is canonicalized or touched on disk.

/// Compute the path of `to` relative to the directory containing `from`
///
/// ```
/// use retrace_util::relative_path;
///
/// assert_eq!(relative_path("dist/bundle.js", "src/main.js"), "../src/main.js");
/// assert_eq!(relative_path("bundle.js", "src/main.js"), "src/main.js");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let mut from_parts: Vec<&str> = from.split('/').collect();
    let to_parts: Vec<&str> = to.split('/').collect();

    // dirname
    from_parts.pop();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::with_capacity(from_parts.len() - common + to_parts.len());
    parts.extend(std::iter::repeat_n("..", from_parts.len() - common));
    parts.extend(&to_parts[common..]);
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_directory() {
        assert_eq!(relative_path("out/bundle.js", "out/a.js"), "a.js");
    }

    #[test]
    fn test_sibling_directory() {
        assert_eq!(relative_path("dist/bundle.js", "src/a.js"), "../src/a.js");
    }

    #[test]
    fn test_deeper_source() {
        assert_eq!(
            relative_path("dist/bundle.js", "dist/lib/util/a.js"),
            "lib/util/a.js"
        );
    }

    #[test]
    fn test_shallower_source() {
        assert_eq!(relative_path("a/b/c/out.js", "a/x.js"), "../../x.js");
    }

    #[test]
    fn test_file_without_directory() {
        assert_eq!(relative_path("bundle.js", "src/a.js"), "src/a.js");
        assert_eq!(relative_path("", "a.js"), "a.js");
    }

    #[test]
    fn test_target_is_the_directory_itself() {
        assert_eq!(relative_path("a/out.js", "a"), "");
    }
}
