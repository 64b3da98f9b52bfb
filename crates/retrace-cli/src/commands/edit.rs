//! Edit command implementation
//!
//! Reads one file, applies an optional JSON edit script and writes the
//! result together with its source map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use retrace::{EditScript, EditableText, MapOptions};
use tracing::debug;

use super::{map_file, read_text, write_map, write_output};

/// Arguments for the edit command
#[derive(Debug)]
pub struct EditArgs {
    pub input: PathBuf,
    pub script: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub map: Option<PathBuf>,
    pub inline_map: bool,
    pub hires: bool,
    pub include_content: bool,
    pub source: Option<String>,
}

/// Execute the edit command
pub fn execute(args: EditArgs) -> Result<()> {
    let mut text = EditableText::new(read_text(&args.input)?);

    if let Some(script_path) = &args.script {
        let script: EditScript = serde_json::from_str(&read_text(script_path)?)
            .with_context(|| format!("Invalid edit script {}", script_path.display()))?;
        debug!(edits = script.edits.len(), "Loaded edit script");
        script
            .apply(&mut text)
            .with_context(|| format!("Failed to apply {}", script_path.display()))?;
    }

    let mut options = MapOptions::new()
        .source(
            args.source
                .clone()
                .unwrap_or_else(|| args.input.to_string_lossy().replace('\\', "/")),
        )
        .hires(args.hires)
        .include_content(args.include_content);
    options.file = map_file(args.output.as_deref());

    let map = text.generate_map(&options);

    let mut output = text.to_string();
    if args.inline_map {
        let url = map.to_url().context("Failed to serialize source map")?;
        output.push_str("\n//# sourceMappingURL=");
        output.push_str(&url);
        output.push('\n');
    }

    write_output(args.output.as_deref(), &output)?;
    if let Some(map_path) = &args.map {
        write_map(map_path, &map)?;
    }

    Ok(())
}
