//! Materialize the goal-card template as the output workbook

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Byte-for-byte copy of the template to the output path. No-op when both
/// paths are the same file; the caller may regenerate in place.
pub fn copy_template(template_path: &Path, output_path: &Path) -> Result<()> {
    if template_path == output_path {
        return Ok(());
    }
    fs::copy(template_path, output_path).with_context(|| {
        format!(
            "Failed to copy template '{}' to '{}'",
            template_path.display(),
            output_path.display()
        )
    })?;
    Ok(())
}
