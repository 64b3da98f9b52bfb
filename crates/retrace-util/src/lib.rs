//! Shared utilities for retrace
//!
//! These are the small, stateless helpers the edit engine and the map
//! encoder lean on:
//! - [`vlq`]: base64 variable-length quantities as used by source maps
//! - [`guess_indent`]: the dominant indentation unit of a text
//! - [`relative_path`]: `../`-relative paths between two logical files

pub mod indent;
pub mod path;
pub mod vlq;

pub use indent::guess_indent;
pub use path::relative_path;
pub use vlq::VlqError;
