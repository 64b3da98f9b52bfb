//! Command implementations for the retrace CLI
//!
//! Each command module reads its inputs, drives the `retrace` library and
//! writes the results.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use retrace::SourceMap;
use tracing::info;

pub mod bundle;
pub mod edit;

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write `text` to `output`, or to stdout when no output file is given
pub(crate) fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

pub(crate) fn write_map(path: &Path, map: &SourceMap) -> Result<()> {
    let json = map.to_json().context("Failed to serialize source map")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote source map {}", path.display());
    Ok(())
}

/// The `file` recorded in a map: the output path when there is one
pub(crate) fn map_file(output: Option<&Path>) -> Option<String> {
    output.map(|path| path.to_string_lossy().replace('\\', "/"))
}
