//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Saves generated Markdown to `path` atomically via a sibling temp file and rename.
///
/// Missing parent directories are created. An interrupted write never leaves a
/// half-written file at `path`.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Not a file path: {}", path.display()))?
        .to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
