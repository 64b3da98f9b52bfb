//! Incremental text editing with source maps
//!
//! This crate rewrites text through a series of small edits (insert,
//! replace, remove, indent, trim) while keeping track of where every
//! surviving character came from. From that record it produces version 3
//! source maps, and it can concatenate several edited texts into one output
//! with one combined map.
//!
//! # Overview
//!
//! The core types are:
//! - [`EditableText`]: a text under edit plus its original-to-current mapping
//! - [`Bundle`]: an ordered concatenation of editable texts
//! - [`SourceMap`]: the serializable map, rendered as JSON or a data URL
//!
//! # Example
//!
//! ```rust
//! use retrace::*;
//!
//! let mut text = EditableText::new("var answer = 42;");
//! text.replace(4, 10, "x").unwrap();
//! text.prepend("'use strict';\n");
//!
//! assert_eq!(text.to_string(), "'use strict';\nvar x = 42;");
//!
//! let map = text.generate_map(&MapOptions::new().file("out.js").source("in.js"));
//! assert_eq!(map.version, 3);
//! assert_eq!(map.sources, vec![Some("in.js".to_string())]);
//! ```

pub mod bundle;
pub mod encode;
pub mod error;
pub mod line_index;
pub mod options;
pub mod script;
pub mod source_map;
pub mod text;
pub mod types;
pub mod utils;

// Re-export main types
pub use bundle::{Bundle, BundleSource, IntoSource, SourceDescriptor};
pub use encode::{MappingOffsets, Segment};
pub use error::{EditError, Result};
pub use line_index::LineIndex;
pub use options::{BundleOptions, IndentOptions, MapOptions};
pub use script::{Edit, EditScript};
pub use source_map::SourceMap;
pub use text::EditableText;
pub use types::Location;
