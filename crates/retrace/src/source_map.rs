//! Version 3 source maps

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// A version 3 source map
///
/// Built once from the outputs of the mapping encoder; `names` is always
/// empty because no symbol information is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u32,
    pub file: Option<String>,
    pub sources: Vec<Option<String>>,
    pub sources_content: Vec<Option<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    pub fn new(
        file: Option<String>,
        sources: Vec<Option<String>>,
        sources_content: Vec<Option<String>>,
        mappings: String,
    ) -> Self {
        SourceMap {
            version: 3,
            file,
            sources,
            sources_content,
            names: Vec::new(),
            mappings,
        }
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Render as a `data:` URL suitable for a `sourceMappingURL` comment
    pub fn to_url(&self) -> serde_json::Result<String> {
        let json = self.to_json()?;
        Ok(format!(
            "data:application/json;charset=utf-8;base64,{}",
            STANDARD.encode(json)
        ))
    }
}

impl fmt::Display for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
