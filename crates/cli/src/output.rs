//! Output records on disk.

use outliner_core::{DocumentOutline, OutlineResult};
use std::path::{Path, PathBuf};

/// Output file for a document: `<output_dir>/<stem>.json`.
pub fn output_path(output_dir: &Path, document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{stem}.json"))
}

/// Write the outline as pretty-printed UTF-8 JSON.
pub async fn write_outline(
    output_dir: &Path,
    document: &Path,
    outline: &DocumentOutline,
) -> OutlineResult<PathBuf> {
    let path = output_path(output_dir, document);
    let json = serde_json::to_string_pretty(outline)?;
    tokio::fs::write(&path, json).await?;
    Ok(path)
}
