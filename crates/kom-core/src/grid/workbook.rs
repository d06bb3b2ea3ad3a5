//! Workbook loading using calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use super::{CellValue, SheetGrid};
use crate::error::{Result, WorkbookError};

/// File extensions the loader accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Opens a spreadsheet file and materializes one sheet as a [`SheetGrid`].
#[derive(Debug, Clone, Default)]
pub struct WorkbookLoader {
    sheet: Option<String>,
}

impl WorkbookLoader {
    /// Loader that reads the first worksheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the named worksheet instead of the first one.
    pub fn with_sheet(mut self, name: impl Into<String>) -> Self {
        self.sheet = Some(name.into());
        self
    }

    /// Load the selected sheet. The workbook handle is dropped before
    /// returning; the grid owns copies of the cell values.
    pub fn load(&self, path: &Path) -> Result<SheetGrid> {
        if !path.exists() {
            return Err(WorkbookError::NotFound(path.to_path_buf()).into());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(WorkbookError::UnsupportedFormat(extension).into());
        }

        let mut workbook = open_workbook_auto(path).map_err(|e| WorkbookError::Open {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let names = workbook.sheet_names();
        let name = match &self.sheet {
            Some(wanted) => names
                .iter()
                .find(|n| n.eq_ignore_ascii_case(wanted))
                .cloned()
                .ok_or_else(|| WorkbookError::SheetNotFound {
                    name: wanted.clone(),
                    available: names.join(", "),
                })?,
            None => names.first().cloned().ok_or(WorkbookError::NoSheets)?,
        };

        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| WorkbookError::Open {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        let grid = range_to_grid(&range);
        debug!(
            "Loaded sheet '{}' from {} ({} cells, {} rows)",
            name,
            path.display(),
            grid.len(),
            grid.max_row
        );

        Ok(grid)
    }
}

/// Load the first worksheet of a spreadsheet file.
pub fn open_sheet(path: &Path) -> Result<SheetGrid> {
    WorkbookLoader::new().load(path)
}

fn range_to_grid(range: &Range<Data>) -> SheetGrid {
    let mut grid = SheetGrid::new();
    // calamine ranges are 0-based and may not start at A1
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    for (r, c, data) in range.used_cells() {
        let row = start_row + r as u32 + 1;
        let col = start_col + c as u32 + 1;
        let value = convert(data);
        if value != CellValue::Empty {
            grid.set(row, col, value);
        }
    }

    grid
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s).map_or_else(|| CellValue::Text(s.clone()), CellValue::DateTime),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => {
            trace!("Cell error value {:?} read as empty", e);
            CellValue::Empty
        }
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KomError;
    use crate::grid::Grid;
    use pretty_assertions::assert_eq;

    fn write_xlsx(path: &Path) {
        let mut book = umya_spreadsheet::new_file();
        {
            let sheet = book.get_sheet_mut(&0).unwrap();
            sheet.get_cell_mut((3, 2)).set_value("35371");
            sheet.get_cell_mut((8, 2)).set_value("JOHN O'HEHIR");
            sheet.get_cell_mut((4, 33)).set_value_number(25.5);
            sheet.get_cell_mut((6, 143)).set_value_number(2);
        }
        umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
    }

    #[test]
    fn test_load_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kom.xlsx");
        write_xlsx(&path);

        let grid = open_sheet(&path).unwrap();

        assert_eq!(grid.text(2, 3), "35371");
        assert_eq!(grid.text(2, 8), "JOHN O'HEHIR");
        assert_eq!(grid.number(33, 4), Some(25.5));
        assert_eq!(grid.text(143, 6), "2");
    }

    #[test]
    fn test_missing_file() {
        let err = open_sheet(Path::new("/nonexistent/kom.xlsx")).unwrap_err();
        assert!(matches!(err, KomError::Workbook(WorkbookError::NotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kom.csv");
        std::fs::write(&path, "a,b").unwrap();

        let err = open_sheet(&path).unwrap_err();
        assert!(matches!(
            err,
            KomError::Workbook(WorkbookError::UnsupportedFormat(ext)) if ext == "csv"
        ));
    }

    #[test]
    fn test_corrupt_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kom.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = open_sheet(&path).unwrap_err();
        assert!(matches!(err, KomError::Workbook(WorkbookError::Open { .. })));
    }

    #[test]
    fn test_unknown_sheet_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kom.xlsx");
        write_xlsx(&path);

        let err = WorkbookLoader::new()
            .with_sheet("Missing")
            .load(&path)
            .unwrap_err();
        assert!(matches!(
            err,
            KomError::Workbook(WorkbookError::SheetNotFound { .. })
        ));
    }
}
