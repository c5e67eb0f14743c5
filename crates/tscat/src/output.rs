//! Bundle output writing
//!
//! The only fatal I/O in the pipeline: failing to create the output
//! directory or to write a bundle aborts the whole run.

use std::path::Path;

use anyhow::{Context, Result};

/// Write one assembled bundle, creating the output directory if needed
pub fn write_bundle(output_path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    std::fs::write(output_path, content)
        .with_context(|| format!("failed writing '{}'", output_path.display()))?;
    log::info!("Successfully wrote {}", output_path.display());
    Ok(())
}
