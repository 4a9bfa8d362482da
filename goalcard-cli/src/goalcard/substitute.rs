//! Stamp scalar metadata over placeholder markers in the goal card
//!
//! Placeholders like `gcfloor` are matched by exact cell value, no trimming
//! and no case folding. This is deliberately stricter than the region
//! locators; templates carry the placeholder text verbatim.

use anyhow::{Context, Result};
use std::path::Path;

/// Replace the first row-major cell equal to `marker` with `new_value` and
/// save. A missing sheet or marker is reported and leaves the file unmodified.
pub fn replace_marker(
    path: &Path,
    sheet_name: &str,
    marker: &str,
    new_value: &str,
) -> Result<()> {
    let mut book = umya_spreadsheet::reader::xlsx::read(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let Some(sheet) = book.get_sheet_by_name_mut(sheet_name) else {
        log::warn!("Sheet '{}' not found in '{}'.", sheet_name, path.display());
        return Ok(());
    };

    let max_row = sheet.get_highest_row();
    let max_col = sheet.get_highest_column();
    let mut found = false;

    'scan: for row in 1..=max_row {
        for col in 1..=max_col {
            if sheet.get_value((col, row)) == marker {
                sheet.get_cell_mut((col, row)).set_value_string(new_value);
                found = true;
                break 'scan;
            }
        }
    }

    if !found {
        log::warn!("Marker '{}' not found in '{}'.", marker, sheet_name);
        return Ok(());
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;
    Ok(())
}
