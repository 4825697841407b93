//! Reference table loading from a spreadsheet workbook or CSV.
//!
//! Columns are positional: unit, cost center, subprocess, manager, post,
//! role, requester. The header row is skipped, short rows are padded by the
//! engine, extra columns are dropped here. `.xlsx`, `.xlsm`, `.xls` and
//! `.ods` files are read from their first sheet; anything else is CSV.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::constants::REFERENCE_COLUMNS;
use crate::errors::DataSourceError;
use crate::hierarchy::RawRow;

const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Read every data row of the reference table at `path`.
pub fn load_reference_table(path: &Path) -> Result<Vec<RawRow>, DataSourceError> {
    if !path.exists() {
        return Err(DataSourceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let rows = if is_workbook(path) {
        read_workbook(path)?
    } else {
        read_csv(path)?
    };

    debug!(path = %path.display(), rows = rows.len(), "read reference table");
    Ok(rows)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn read_csv(path: &Path) -> Result<Vec<RawRow>, DataSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let cells = record
            .iter()
            .take(REFERENCE_COLUMNS)
            .map(|cell| Some(cell.to_string()))
            .collect();
        rows.push(RawRow::new(cells));
    }
    Ok(rows)
}

/// First sheet of the workbook. Sheet row 1 is the header.
fn read_workbook(path: &Path) -> Result<Vec<RawRow>, DataSourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataSourceError::Malformed {
            path: path.to_path_buf(),
            line: 0,
            message: "workbook has no sheets".to_string(),
        })?
        .map_err(|e| workbook_error(path, e))?;

    // The range begins at the first used cell, not at A1.
    let Some((first_row, first_col)) = range.start() else {
        return Ok(Vec::new());
    };
    let first_col = first_col as usize;

    let mut rows = Vec::new();
    for (offset, cells) in range.rows().enumerate() {
        if first_row as usize + offset == 0 {
            continue;
        }
        let cells = (0..REFERENCE_COLUMNS)
            .map(|col| {
                col.checked_sub(first_col)
                    .and_then(|idx| cells.get(idx))
                    .and_then(cell_text)
            })
            .collect();
        rows.push(RawRow::new(cells));
    }
    Ok(rows)
}

/// Render a cell the way it reads in the sheet. Integral numbers drop the
/// fractional part, so cost center 1001 reads "1001", not "1001.0".
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        other => Some(other.to_string()),
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn workbook_error(path: &Path, error: calamine::Error) -> DataSourceError {
    match error {
        calamine::Error::Io(source) => DataSourceError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
        other => DataSourceError::Malformed {
            path: path.to_path_buf(),
            line: 0,
            message: other.to_string(),
        },
    }
}

fn csv_error(path: &Path, error: csv::Error) -> DataSourceError {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => DataSourceError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
        _ => DataSourceError::Malformed {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(format_number(1001.0), "1001");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2001.5), "2001.5");
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Int(42)).as_deref(), Some("42"));
    }

    #[test]
    fn workbook_detection_is_case_insensitive() {
        assert!(is_workbook(Path::new("parametros.xlsx")));
        assert!(is_workbook(Path::new("PARAMETROS.XLSX")));
        assert!(is_workbook(Path::new("tabela.ods")));
        assert!(!is_workbook(Path::new("parametros.csv")));
        assert!(!is_workbook(Path::new("parametros")));
    }
}
