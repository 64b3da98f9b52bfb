//! Concatenation of several editable texts into one output
//!
//! A [`Bundle`] joins the current text of its sources with a separator,
//! wrapped in an intro and an outro, and produces a single source map whose
//! `sources` list follows the order in which sources were added.

use std::fmt;

use retrace_util::relative_path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encode::{MappingOffsets, encode_segments};
use crate::error::{EditError, Result};
use crate::options::{BundleOptions, MapOptions};
use crate::source_map::SourceMap;
use crate::text::EditableText;
use crate::utils::{char_len, indent_following_lines, is_whitespace, last_line_width};

/// One entry of a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSource {
    /// Path of the original file, written to the map's `sources`
    pub filename: Option<String>,
    pub content: EditableText,
}

impl BundleSource {
    pub fn new(filename: impl Into<String>, content: impl Into<EditableText>) -> Self {
        BundleSource {
            filename: Some(filename.into()),
            content: content.into(),
        }
    }

    /// A source with no file name; its `sources` entry is `null`
    pub fn anonymous(content: impl Into<EditableText>) -> Self {
        BundleSource {
            filename: None,
            content: content.into(),
        }
    }
}

/// A loosely specified source, as read from configuration
///
/// Converting it into a [`BundleSource`] fails if it carries no content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceDescriptor {
    pub filename: Option<String>,
    pub content: Option<String>,
}

/// Anything that can become a bundle entry
pub trait IntoSource {
    fn into_source(self) -> Result<BundleSource>;
}

impl IntoSource for BundleSource {
    fn into_source(self) -> Result<BundleSource> {
        Ok(self)
    }
}

impl IntoSource for SourceDescriptor {
    fn into_source(self) -> Result<BundleSource> {
        match self.content {
            Some(content) => Ok(BundleSource {
                filename: self.filename,
                content: EditableText::new(content),
            }),
            None => Err(EditError::InvalidSource {
                filename: self.filename,
            }),
        }
    }
}

impl<S: Into<String>> IntoSource for (S, EditableText) {
    fn into_source(self) -> Result<BundleSource> {
        Ok(BundleSource::new(self.0, self.1))
    }
}

/// An ordered concatenation of editable texts
///
/// ```
/// use retrace::{Bundle, BundleSource, EditableText, MapOptions};
///
/// let mut bundle = Bundle::new();
/// bundle.add_source(BundleSource::new("a.js", "var a = 1;")).unwrap();
/// bundle.add_source(BundleSource::new("b.js", "var b = 2;")).unwrap();
///
/// assert_eq!(bundle.to_string(), "var a = 1;\nvar b = 2;");
///
/// let map = bundle.generate_map(&MapOptions::new().file("bundle.js"));
/// assert_eq!(map.mappings, "AAAA;ACAA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    intro: String,
    outro: String,
    separator: String,
    sources: Vec<BundleSource>,
}

impl Bundle {
    /// An empty bundle joining sources with newlines
    pub fn new() -> Self {
        Self::with_options(BundleOptions::default())
    }

    pub fn with_options(options: BundleOptions) -> Self {
        Bundle {
            intro: options.intro,
            outro: options.outro,
            separator: options.separator,
            sources: Vec::new(),
        }
    }

    /// Add a source after the ones already present
    pub fn add_source(&mut self, source: impl IntoSource) -> Result<&mut Self> {
        let source = source.into_source()?;
        debug!(filename = ?source.filename, index = self.sources.len(), "Added bundle source");
        self.sources.push(source);
        Ok(self)
    }

    pub fn sources(&self) -> &[BundleSource] {
        &self.sources
    }

    /// Mutable access to the sources, for editing them in place
    pub fn sources_mut(&mut self) -> &mut [BundleSource] {
        &mut self.sources
    }

    pub fn intro(&self) -> &str {
        &self.intro
    }

    pub fn outro(&self) -> &str {
        &self.outro
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Add `text` to the front of the intro
    pub fn prepend(&mut self, text: &str) -> &mut Self {
        self.intro.insert_str(0, text);
        self
    }

    /// Add `text` to the end of the outro
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.outro.push_str(text);
        self
    }

    /// Generate one source map covering every source
    ///
    /// Sources are encoded in order with shared running offsets, so the
    /// result is one continuous `mappings` string. Entries in `sources` are
    /// relative to the directory of `options.file`.
    pub fn generate_map(&self, options: &MapOptions) -> SourceMap {
        let mut writer = MappingsWriter::default();

        writer.advance(&self.intro);
        for (idx, source) in self.sources.iter().enumerate() {
            if idx > 0 {
                writer.advance(&self.separator);
            }
            writer.write_source(&source.content, options.hires, idx);
        }
        writer.advance(&self.outro);

        let file = options.file.as_deref().unwrap_or("");
        let sources = self
            .sources
            .iter()
            .map(|source| {
                source
                    .filename
                    .as_deref()
                    .map(|filename| relative_path(file, filename))
            })
            .collect();
        let sources_content = self
            .sources
            .iter()
            .map(|source| {
                options
                    .include_content
                    .then(|| source.content.original().to_string())
            })
            .collect();

        let mappings = writer.finish();
        debug!(
            file = ?options.file,
            sources = self.sources.len(),
            mappings_len = mappings.len(),
            "Generated bundle source map"
        );

        SourceMap::new(options.file_name(), sources, sources_content, mappings)
    }

    /// The indentation unit used by most sources
    ///
    /// Ties go to the unit seen first. A bundle without sources indents
    /// with a tab.
    pub fn indent_string(&self) -> String {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for source in &self.sources {
            let unit = source.content.indent_unit();
            match counts.iter_mut().find(|(seen, _)| *seen == unit) {
                Some((_, count)) => *count += 1,
                None => counts.push((unit, 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (unit, count) in counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((unit, count));
            }
        }

        best.map_or_else(|| "\t".to_string(), |(unit, _)| unit.to_string())
    }

    /// Indent every source, the intro and the outro
    ///
    /// Without a `unit` (or with an empty one) the bundle's
    /// [`indent_string`](Self::indent_string) is used. Every non-empty line
    /// following a newline gets indented; the intro's first line is indented
    /// as well when the intro is not empty.
    pub fn indent(&mut self, unit: Option<&str>) -> &mut Self {
        let unit = match unit {
            Some(unit) if !unit.is_empty() => unit.to_string(),
            _ => self.indent_string(),
        };

        for source in &mut self.sources {
            source.content.indent_by(&unit);
        }

        let intro_prefix = if self.intro.is_empty() { "" } else { unit.as_str() };
        self.intro = format!("{}{}", intro_prefix, indent_following_lines(&self.intro, &unit));
        self.outro = indent_following_lines(&self.outro, &unit);

        self
    }

    /// Strip whitespace from the outside of the bundle
    ///
    /// The intro loses its leading whitespace and the outro its trailing
    /// whitespace. If the intro ends up empty the first source is trimmed at
    /// the start, then the next one while the trimmed source is left empty;
    /// the same happens from the back when the outro is empty. When every
    /// source has been emptied, the opposite end of the outro (or intro) is
    /// trimmed too.
    pub fn trim(&mut self) -> &mut Self {
        self.intro = self.intro.trim_start_matches(is_whitespace).to_string();
        self.outro = self.outro.trim_end_matches(is_whitespace).to_string();

        if self.intro.is_empty() {
            let mut all_empty = true;
            for source in self.sources.iter_mut() {
                source.content.trim_start();
                if !source.content.is_empty() {
                    all_empty = false;
                    break;
                }
            }
            if all_empty {
                self.outro = self.outro.trim_start_matches(is_whitespace).to_string();
            }
        }

        if self.outro.is_empty() {
            let mut all_empty = true;
            for source in self.sources.iter_mut().rev() {
                source.content.trim_end();
                if !source.content.is_empty() {
                    all_empty = false;
                    break;
                }
            }
            if all_empty {
                self.intro = self.intro.trim_end_matches(is_whitespace).to_string();
            }
        }

        self
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.intro)?;
        for (idx, source) in self.sources.iter().enumerate() {
            if idx > 0 {
                f.write_str(&self.separator)?;
            }
            f.write_str(source.content.as_str())?;
        }
        f.write_str(&self.outro)
    }
}

/// Accumulates a `mappings` string line by line while text is laid out
#[derive(Debug, Default)]
struct MappingsWriter {
    finished: Vec<String>,
    open: String,
    offsets: MappingOffsets,
    /// Column at which the next text starts on the open line
    column: usize,
}

impl MappingsWriter {
    /// Lay out unmapped text: each newline becomes an empty mappings line
    fn advance(&mut self, text: &str) {
        for _ in text.matches('\n') {
            self.new_line();
        }
        self.move_column(text);
    }

    fn write_source(&mut self, content: &EditableText, hires: bool, source_index: usize) {
        let mut lines = content.segments(hires, source_index);
        if let Some(first) = lines.first_mut() {
            for segment in first.iter_mut() {
                segment.generated_column += self.column;
            }
        }

        for (idx, line) in encode_segments(&lines, &mut self.offsets)
            .into_iter()
            .enumerate()
        {
            if idx > 0 {
                // encode_segments already reset the running column
                self.finished.push(std::mem::take(&mut self.open));
            }
            if !line.is_empty() {
                if !self.open.is_empty() {
                    self.open.push(',');
                }
                self.open.push_str(&line);
            }
        }

        self.move_column(content.as_str());
    }

    fn new_line(&mut self) {
        self.finished.push(std::mem::take(&mut self.open));
        self.offsets.start_line();
        self.column = 0;
    }

    fn move_column(&mut self, text: &str) {
        self.column = if text.contains('\n') {
            last_line_width(text)
        } else {
            self.column + char_len(text)
        };
    }

    fn finish(mut self) -> String {
        self.finished.push(self.open);
        self.finished.join(";")
    }
}
