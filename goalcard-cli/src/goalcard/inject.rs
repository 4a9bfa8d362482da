//! Inject expanded operations into the goal-card template
//!
//! The template brackets its data region with `gcstart`/`gcend` sentinel
//! cells in one column. Operations overwrite rows from `gcstart` down, one
//! record per row, name in the marker column and standard time in the column
//! to its right. Leftover blank template rows and the `gcend` sentinel are
//! deleted afterwards so the printed card has no gaps.

use anyhow::{Context, Result};
use std::path::Path;
use umya_spreadsheet::Worksheet;

use super::types::{GC_END, GC_START, OperationRecord};

/// `gcstart`/`gcend` positions, 1-indexed worksheet coordinates
struct InjectionRegion {
    col: u32,
    start_row: u32,
    end_row: u32,
}

/// Single row-major pass over the used area, early exit once both markers are
/// found. Matching is lowercase-trim equality; the end marker must share the
/// start marker's column.
fn locate_injection_region(sheet: &Worksheet) -> Option<InjectionRegion> {
    let max_row = sheet.get_highest_row();
    let max_col = sheet.get_highest_column();
    let mut start: Option<(u32, u32)> = None;

    for row in 1..=max_row {
        for col in 1..=max_col {
            let val = sheet.get_value((col, row)).trim().to_lowercase();
            match start {
                None => {
                    if val == GC_START {
                        start = Some((col, row));
                    }
                }
                Some((marker_col, start_row)) => {
                    if val == GC_END && col == marker_col {
                        return Some(InjectionRegion {
                            col: marker_col,
                            start_row,
                            end_row: row,
                        });
                    }
                }
            }
        }
    }

    None
}

/// Write `operations` into the `gcstart`/`gcend` region of `sheet_name` and
/// clean up the template rows the data did not use.
///
/// Truncates to the region's capacity when the list is too long; an empty
/// list leaves the file untouched. Missing sheet or markers are reported and
/// leave the file unmodified.
pub fn inject_operations(
    operations: &[OperationRecord],
    output_path: &Path,
    sheet_name: &str,
) -> Result<()> {
    if operations.is_empty() {
        log::info!("No operations to inject into '{}'. Skipping.", sheet_name);
        return Ok(());
    }

    let mut book = umya_spreadsheet::reader::xlsx::read(output_path)
        .with_context(|| format!("Failed to open Excel file: {}", output_path.display()))?;

    let Some(sheet) = book.get_sheet_by_name_mut(sheet_name) else {
        log::warn!(
            "Sheet '{}' not found in '{}'.",
            sheet_name,
            output_path.display()
        );
        return Ok(());
    };

    let Some(region) = locate_injection_region(sheet) else {
        log::warn!("Start and End markers not found in the same column.");
        return Ok(());
    };

    let capacity = (region.end_row - region.start_row + 1) as usize;
    let operations = if operations.len() > capacity {
        log::warn!(
            "Only {} rows available, but {} operations provided. Truncating.",
            capacity,
            operations.len()
        );
        &operations[..capacity]
    } else {
        operations
    };

    for (i, op) in operations.iter().enumerate() {
        let row = region.start_row + i as u32;
        sheet
            .get_cell_mut((region.col, row))
            .set_value_string(op.name.clone());
        sheet
            .get_cell_mut((region.col + 1, row))
            .set_value_number(op.std_time);
    }
    let next_row = region.start_row + operations.len() as u32;

    // Drop unused template rows between the data and gcend, bottom-up so
    // earlier indices stay valid while later rows are removed.
    let mut deleted_rows: u32 = 0;
    for row in (next_row..region.end_row).rev() {
        let name = sheet.get_value((region.col, row));
        let time = sheet.get_value((region.col + 1, row));
        if name.trim().is_empty() && time.trim().is_empty() {
            sheet.remove_row(&row, &1);
            deleted_rows += 1;
        }
    }

    // gcend has shifted up by the rows removed above it
    sheet.remove_row(&(region.end_row - deleted_rows), &1);

    umya_spreadsheet::writer::xlsx::write(&book, output_path)
        .with_context(|| format!("Failed to save Excel file: {}", output_path.display()))?;

    log::info!(
        "Injected {} operations into '{}' starting from row {}. Deleted leftover rows and removed gcend row.",
        operations.len(),
        sheet_name,
        region.start_row
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn op(name: &str, std_time: f64) -> OperationRecord {
        OperationRecord::new(name, std_time)
    }

    /// Template fixture with gcstart/gcend in column B of a "frontback" sheet
    fn write_template(dir: &TempDir, start_row: u32, end_row: u32) -> PathBuf {
        let path = dir.path().join("gcoutput.xlsx");
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        sheet.set_name("frontback");
        sheet.get_cell_mut("A1").set_value_string("Goal Card");
        sheet
            .get_cell_mut((2, start_row))
            .set_value_string("gcstart");
        sheet.get_cell_mut((2, end_row)).set_value_string("gcend");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path
    }

    fn read_sheet(path: &Path) -> umya_spreadsheet::Spreadsheet {
        umya_spreadsheet::reader::xlsx::read(path).unwrap()
    }

    #[test]
    fn test_inject_writes_rows_and_removes_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(&dir, 20, 30);

        let mut ops = vec![op("PANEL INSPECTION", 2.0); 4];
        ops.extend(vec![op("Solder check", 4.0); 2]);
        inject_operations(&ops, &path, "frontback").unwrap();

        let book = read_sheet(&path);
        let sheet = book.get_sheet_by_name("frontback").unwrap();

        for row in 20..=23 {
            assert_eq!(sheet.get_value((2, row)), "PANEL INSPECTION");
            assert_eq!(sheet.get_value((3, row)), "2");
        }
        for row in 24..=25 {
            assert_eq!(sheet.get_value((2, row)), "Solder check");
            assert_eq!(sheet.get_value((3, row)), "4");
        }

        // Blank rows 26..=29 and the shifted gcend row are gone
        let max_row = sheet.get_highest_row();
        for row in 1..=max_row {
            for col in 1..=sheet.get_highest_column() {
                let val = sheet.get_value((col, row)).trim().to_lowercase();
                assert_ne!(val, "gcstart");
                assert_ne!(val, "gcend");
            }
        }
        // Surrounding layout survives
        assert_eq!(sheet.get_value("A1"), "Goal Card");
    }

    #[test]
    fn test_inject_truncates_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        // Rows 2..=6: capacity 5
        let path = write_template(&dir, 2, 6);

        let ops: Vec<OperationRecord> =
            (1..=8).map(|i| op(&format!("Op {}", i), i as f64)).collect();
        inject_operations(&ops, &path, "frontback").unwrap();

        let book = read_sheet(&path);
        let sheet = book.get_sheet_by_name("frontback").unwrap();

        // First four records remain; the fifth landed on the gcend row, which
        // the cleanup pass deletes at its shifted position.
        for (i, row) in (2..=5).enumerate() {
            assert_eq!(sheet.get_value((2, row)), format!("Op {}", i + 1));
        }
        for dropped in ["Op 6", "Op 7", "Op 8"] {
            for row in 1..=sheet.get_highest_row() {
                assert_ne!(sheet.get_value((2, row)), dropped);
            }
        }
    }

    #[test]
    fn test_inject_keeps_nonempty_template_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gcoutput.xlsx");

        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        sheet.set_name("frontback");
        sheet.get_cell_mut((2, 10)).set_value_string("gcstart");
        sheet.get_cell_mut((2, 13)).set_value_string("note"); // not blank
        sheet.get_cell_mut((2, 15)).set_value_string("gcend");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        inject_operations(&[op("Only op", 1.0)], &path, "frontback").unwrap();

        let book = read_sheet(&path);
        let sheet = book.get_sheet_by_name("frontback").unwrap();
        assert_eq!(sheet.get_value((2, 10)), "Only op");
        // Blank rows 11, 12 and 14 deleted; the note row kept, gcend removed
        assert_eq!(sheet.get_value((2, 11)), "note");
        for row in 1..=sheet.get_highest_row() {
            assert_ne!(sheet.get_value((2, row)).trim().to_lowercase(), "gcend");
        }
    }

    #[test]
    fn test_inject_empty_list_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(&dir, 20, 30);

        let before = fs::read(&path).unwrap();
        inject_operations(&[], &path, "frontback").unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_inject_missing_markers_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gcoutput.xlsx");

        let mut book = umya_spreadsheet::new_file();
        book.get_active_sheet_mut().set_name("frontback");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let before = fs::read(&path).unwrap();
        inject_operations(&[op("Op", 1.0)], &path, "frontback").unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_inject_missing_sheet_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(&dir, 20, 30);

        let before = fs::read(&path).unwrap();
        inject_operations(&[op("Op", 1.0)], &path, "assembly").unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_inject_markers_in_different_columns_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gcoutput.xlsx");

        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        sheet.set_name("frontback");
        sheet.get_cell_mut((2, 20)).set_value_string("gcstart");
        sheet.get_cell_mut((4, 30)).set_value_string("gcend");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let before = fs::read(&path).unwrap();
        inject_operations(&[op("Op", 1.0)], &path, "frontback").unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}
