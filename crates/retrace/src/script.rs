//! Edit scripts: a serializable sequence of edits
//!
//! Scripts let a sequence of edits be stored in a JSON file and replayed
//! against a text, which is how the command-line tool drives the engine.
//!
//! ```
//! use retrace::{EditScript, EditableText};
//!
//! let script: EditScript = serde_json::from_str(r#"{
//!     "edits": [
//!         { "op": "replace", "start": 9, "end": 12, "text": "bar" },
//!         { "op": "prepend", "text": "// generated\n" }
//!     ]
//! }"#).unwrap();
//!
//! let mut text = EditableText::new("function foo() {}");
//! script.apply(&mut text).unwrap();
//! assert_eq!(text.as_str(), "// generated\nfunction bar() {}");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::options::IndentOptions;
use crate::text::EditableText;

/// One edit, in original coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Edit {
    Append {
        text: String,
    },
    Prepend {
        text: String,
    },
    Insert {
        at: usize,
        text: String,
    },
    Replace {
        start: usize,
        end: usize,
        text: String,
    },
    Remove {
        start: usize,
        end: usize,
    },
    Indent {
        #[serde(default)]
        unit: Option<String>,
        #[serde(default)]
        exclude: Vec<(usize, usize)>,
    },
    Trim,
    TrimStart,
    TrimEnd,
}

impl Edit {
    pub fn apply(&self, text: &mut EditableText) -> Result<()> {
        match self {
            Edit::Append { text: content } => {
                text.append(content);
            }
            Edit::Prepend { text: content } => {
                text.prepend(content);
            }
            Edit::Insert { at, text: content } => {
                text.insert(*at, content)?;
            }
            Edit::Replace {
                start,
                end,
                text: content,
            } => {
                text.replace(*start, *end, content)?;
            }
            Edit::Remove { start, end } => {
                text.remove(*start, *end)?;
            }
            Edit::Indent { unit, exclude } => {
                let options = IndentOptions {
                    exclude: exclude.clone(),
                };
                text.indent_with(unit.as_deref(), &options)?;
            }
            Edit::Trim => {
                text.trim();
            }
            Edit::TrimStart => {
                text.trim_start();
            }
            Edit::TrimEnd => {
                text.trim_end();
            }
        }
        Ok(())
    }
}

/// An ordered list of edits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditScript {
    pub edits: Vec<Edit>,
}

impl EditScript {
    /// Apply every edit in order, stopping at the first failure
    ///
    /// Edits before the failing one stay applied.
    pub fn apply(&self, text: &mut EditableText) -> Result<()> {
        for (idx, edit) in self.edits.iter().enumerate() {
            debug!(index = idx, ?edit, "Applying edit");
            edit.apply(text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;

    #[test]
    fn test_parse_all_ops() {
        let script: EditScript = serde_json::from_str(
            r#"{"edits": [
                {"op": "append", "text": "a"},
                {"op": "prepend", "text": "b"},
                {"op": "insert", "at": 1, "text": "c"},
                {"op": "replace", "start": 0, "end": 1, "text": "d"},
                {"op": "remove", "start": 0, "end": 1},
                {"op": "indent"},
                {"op": "indent", "unit": "  ", "exclude": [[0, 2]]},
                {"op": "trim"},
                {"op": "trimStart"},
                {"op": "trimEnd"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(script.edits.len(), 10);
        assert_eq!(
            script.edits[6],
            Edit::Indent {
                unit: Some("  ".to_string()),
                exclude: vec![(0, 2)]
            }
        );
        assert_eq!(script.edits[8], Edit::TrimStart);
    }

    #[test]
    fn test_apply_stops_at_first_error() {
        let script = EditScript {
            edits: vec![
                Edit::Remove { start: 0, end: 2 },
                Edit::Insert {
                    at: 1,
                    text: "x".to_string(),
                },
                Edit::Append {
                    text: "never".to_string(),
                },
            ],
        };

        let mut text = EditableText::new("abcd");
        let err = script.apply(&mut text).unwrap_err();
        assert_eq!(err, EditError::RangeAlreadyReplaced { start: 1, end: 1 });
        assert_eq!(text.as_str(), "cd");
    }

    #[test]
    fn test_indent_with_exclusions() {
        let mut text = EditableText::new("a\nb\nc");
        Edit::Indent {
            unit: Some("- ".to_string()),
            exclude: vec![(2, 3)],
        }
        .apply(&mut text)
        .unwrap();
        assert_eq!(text.as_str(), "- a\nb\n- c");
    }
}
