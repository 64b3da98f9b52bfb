//! Configuration for map generation, indentation and bundles
//!
//! All option structs deserialize from JSON with every field optional, so
//! they can be read straight out of edit scripts and bundle manifests.

use serde::{Deserialize, Serialize};

/// Options for generating a source map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    /// Path of the generated file; only its basename ends up in the map's
    /// `file` field, the full path anchors the relative `sources` entries
    pub file: Option<String>,

    /// Path of the original file (single-text maps only)
    pub source: Option<String>,

    /// Embed the original text as `sourcesContent`
    pub include_content: bool,

    /// Emit one segment per character instead of one per unbroken run
    pub hires: bool,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn include_content(mut self, include_content: bool) -> Self {
        self.include_content = include_content;
        self
    }

    pub fn hires(mut self, hires: bool) -> Self {
        self.hires = hires;
        self
    }

    /// Basename of [`MapOptions::file`]
    pub(crate) fn file_name(&self) -> Option<String> {
        self.file
            .as_deref()
            .map(|file| file.rsplit('/').next().unwrap_or(file).to_string())
    }
}

/// Options for [`EditableText::indent_with`](crate::EditableText::indent_with)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentOptions {
    /// `[start, end)` ranges in original coordinates whose lines are left
    /// unindented
    pub exclude: Vec<(usize, usize)>,
}

impl IndentOptions {
    pub fn exclude(mut self, start: usize, end: usize) -> Self {
        self.exclude.push((start, end));
        self
    }
}

/// Options for constructing a [`Bundle`](crate::Bundle)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleOptions {
    /// Text placed before the first source
    pub intro: String,

    /// Text placed after the last source
    pub outro: String,

    /// Text placed between consecutive sources
    pub separator: String,
}

impl Default for BundleOptions {
    fn default() -> Self {
        BundleOptions {
            intro: String::new(),
            outro: String::new(),
            separator: "\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_options_from_json() {
        let options: MapOptions =
            serde_json::from_str(r#"{"file": "dist/out.js", "includeContent": true}"#).unwrap();
        assert_eq!(options.file.as_deref(), Some("dist/out.js"));
        assert!(options.include_content);
        assert!(!options.hires);
        assert_eq!(options.source, None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            MapOptions::new().file("a/b/out.js").file_name().as_deref(),
            Some("out.js")
        );
        assert_eq!(MapOptions::new().file("out.js").file_name().as_deref(), Some("out.js"));
        assert_eq!(MapOptions::new().file_name(), None);
    }

    #[test]
    fn test_bundle_options_default_separator() {
        let options: BundleOptions = serde_json::from_str(r#"{"intro": "// hi\n"}"#).unwrap();
        assert_eq!(options.separator, "\n");
        assert_eq!(options.intro, "// hi\n");

        let options: BundleOptions = serde_json::from_str(r#"{"separator": ""}"#).unwrap();
        assert_eq!(options.separator, "");
    }

    #[test]
    fn test_indent_options_from_json() {
        let options: IndentOptions = serde_json::from_str(r#"{"exclude": [[0, 4], [9, 12]]}"#).unwrap();
        assert_eq!(options, IndentOptions::default().exclude(0, 4).exclude(9, 12));
    }
}
