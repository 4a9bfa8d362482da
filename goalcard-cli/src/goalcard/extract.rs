//! Extract operation records from an engineering sheet
//!
//! The engineering sheet carries two inspection sections in one column:
//! front/back runs from PANEL INSPECTION through MIDDLE INSPECTION, assembly
//! from MIDDLE INSPECTION through END LINE INSPECTION. Standard times live in
//! a separate column whose header contains "STD". The source workbook is read
//! with cached formula results, never formula text.

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use std::path::Path;

use super::types::{
    END_LINE_INSPECTION, MIDDLE_INSPECTION, OperationRecord, PANEL_INSPECTION, repeat_count,
};

/// Row span between two markers sharing a column. Indices are relative to the
/// worksheet range they were resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRegion {
    pub col: usize,
    pub start_row: usize,
    pub end_row: usize,
}

/// Cell as display text, mirroring how the mapping reader flattens cells
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Standard time as a number; string cells parse after trimming
fn parse_std_time(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Locate a start/end marker pair in one row-major pass with early exit.
///
/// The start marker is the first cell whose trimmed text equals `start_marker`
/// case-insensitively; the end marker is the first later cell matching
/// `end_marker` in the same column. Returns `None` if either is missing or
/// the only end matches sit in other columns.
pub fn locate_marker_region(
    range: &Range<Data>,
    start_marker: &str,
    end_marker: &str,
) -> Option<MarkerRegion> {
    let mut start: Option<(usize, usize)> = None;

    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let text = cell_text(cell);
            let val = text.trim().to_uppercase();
            match start {
                None => {
                    if val == start_marker {
                        start = Some((col_idx, row_idx));
                    }
                }
                Some((marker_col, start_row)) => {
                    if val == end_marker && col_idx == marker_col {
                        return Some(MarkerRegion {
                            col: marker_col,
                            start_row,
                            end_row: row_idx,
                        });
                    }
                }
            }
        }
    }

    None
}

/// Column of the first cell, row-major, whose text contains "STD"
/// case-insensitively. The header need not sit inside the marker region.
pub fn find_std_column(range: &Range<Data>) -> Option<usize> {
    for row in range.rows() {
        for (col_idx, cell) in row.iter().enumerate() {
            if cell_text(cell).to_uppercase().contains("STD") {
                return Some(col_idx);
            }
        }
    }
    None
}

/// Pull (name, std-time) pairs from `rows`, expanded by the repeat count.
///
/// Rows with an empty trimmed name, an unparsable time, or a non-positive
/// time are skipped without a diagnostic.
fn collect_operations(
    range: &Range<Data>,
    rows: impl Iterator<Item = usize>,
    marker_col: usize,
    std_col: usize,
    target: Option<f64>,
) -> Vec<OperationRecord> {
    let empty = Data::Empty;
    let mut results = Vec::new();

    for row in rows {
        let name_cell = range.get((row, marker_col)).unwrap_or(&empty);
        let std_cell = range.get((row, std_col)).unwrap_or(&empty);

        let name = cell_text(name_cell).trim().to_string();
        if name.is_empty() {
            continue;
        }
        let std_time = match parse_std_time(std_cell) {
            Some(t) if t > 0.0 => t,
            _ => continue,
        };

        let record = OperationRecord::new(name, std_time);
        for _ in 0..repeat_count(std_time, target) {
            results.push(record.clone());
        }
    }

    results
}

fn read_sheet_range(path: &Path, sheet_name: &str) -> Result<Range<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;
    workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))
}

/// Extract the front/back section: PANEL INSPECTION through MIDDLE INSPECTION,
/// both marker rows included.
pub fn extract_frontback(
    path: &Path,
    sheet_name: &str,
    target: Option<f64>,
) -> Result<Vec<OperationRecord>> {
    let range = read_sheet_range(path, sheet_name)?;

    let Some(region) = locate_marker_region(&range, PANEL_INSPECTION, MIDDLE_INSPECTION) else {
        log::warn!("Could not find PANEL INSPECTION and MIDDLE INSPECTION in the same column.");
        return Ok(Vec::new());
    };
    let Some(std_col) = find_std_column(&range) else {
        log::warn!("STD column not found.");
        return Ok(Vec::new());
    };

    Ok(collect_operations(
        &range,
        region.start_row..=region.end_row,
        region.col,
        std_col,
        target,
    ))
}

/// Extract the assembly section: the row after MIDDLE INSPECTION through
/// END LINE INSPECTION inclusive.
pub fn extract_assembly(
    path: &Path,
    sheet_name: &str,
    target: Option<f64>,
) -> Result<Vec<OperationRecord>> {
    let range = read_sheet_range(path, sheet_name)?;

    let Some(region) = locate_marker_region(&range, MIDDLE_INSPECTION, END_LINE_INSPECTION) else {
        log::warn!("Could not find MIDDLE INSPECTION and END LINE INSPECTION in the same column.");
        return Ok(Vec::new());
    };
    let Some(std_col) = find_std_column(&range) else {
        log::warn!("STD column not found.");
        return Ok(Vec::new());
    };

    Ok(collect_operations(
        &range,
        region.start_row + 1..=region.end_row,
        region.col,
        std_col,
        target,
    ))
}
