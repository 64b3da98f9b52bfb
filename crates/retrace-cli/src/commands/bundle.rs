//! Bundle command implementation
//!
//! A manifest lists the sources to concatenate, each given inline or by
//! path and optionally edited before it is added:
//!
//! ```json
//! {
//!   "intro": "(function () {\n",
//!   "outro": "\n}());",
//!   "sources": [
//!     { "path": "a.js" },
//!     { "filename": "b.js", "content": "var b;", "edits": [{ "op": "trim" }] }
//!   ]
//! }
//! ```
//!
//! Paths are resolved against the manifest's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use retrace::{Bundle, BundleOptions, Edit, EditScript, MapOptions, SourceDescriptor};
use serde::Deserialize;
use tracing::debug;

use super::{map_file, read_text, write_map, write_output};

/// Arguments for the bundle command
#[derive(Debug)]
pub struct BundleArgs {
    pub manifest: PathBuf,
    pub output: Option<PathBuf>,
    pub map: Option<PathBuf>,
    pub hires: bool,
    pub include_content: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BundleManifest {
    #[serde(flatten)]
    pub options: BundleOptions,
    pub sources: Vec<ManifestSource>,
}

/// One manifest entry
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ManifestSource {
    /// Name recorded in the map; defaults to `path`
    pub filename: Option<String>,
    pub path: Option<PathBuf>,
    /// Inline text, used instead of reading `path`
    pub content: Option<String>,
    pub edits: Vec<Edit>,
}

impl BundleManifest {
    /// Build the bundle, reading and editing each source
    pub fn into_bundle(self, base_dir: &Path) -> Result<Bundle> {
        let mut bundle = Bundle::with_options(self.options);

        for entry in self.sources {
            let content = match (entry.content, &entry.path) {
                (Some(content), _) => Some(content),
                (None, Some(path)) => Some(read_text(&base_dir.join(path))?),
                (None, None) => None,
            };
            let filename = entry.filename.or_else(|| {
                entry
                    .path
                    .as_ref()
                    .map(|path| path.to_string_lossy().replace('\\', "/"))
            });

            bundle.add_source(SourceDescriptor {
                filename: filename.clone(),
                content,
            })?;

            let script = EditScript {
                edits: entry.edits,
            };
            if let Some(source) = bundle.sources_mut().last_mut() {
                script.apply(&mut source.content).with_context(|| {
                    format!(
                        "Failed to edit {}",
                        filename.as_deref().unwrap_or("<anonymous>")
                    )
                })?;
            }
        }

        Ok(bundle)
    }
}

/// Execute the bundle command
pub fn execute(args: BundleArgs) -> Result<()> {
    let manifest: BundleManifest = serde_json::from_str(&read_text(&args.manifest)?)
        .with_context(|| format!("Invalid bundle manifest {}", args.manifest.display()))?;
    debug!(sources = manifest.sources.len(), "Loaded bundle manifest");

    let base_dir = args.manifest.parent().unwrap_or(Path::new("."));
    let bundle = manifest.into_bundle(base_dir)?;

    let mut options = MapOptions::new()
        .hires(args.hires)
        .include_content(args.include_content);
    options.file = map_file(args.output.as_deref());
    let map = bundle.generate_map(&options);

    write_output(args.output.as_deref(), &bundle.to_string())?;
    if let Some(map_path) = &args.map {
        write_map(map_path, &map)?;
    }

    Ok(())
}
