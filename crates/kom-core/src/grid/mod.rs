//! Read-only cell grid abstraction.
//!
//! Extractors never touch a spreadsheet library directly; they read through
//! the [`Grid`] trait, which is addressed by 1-indexed (row, column) pairs the
//! same way the form template is described. Every accessor is total: an
//! out-of-range or unset cell reads as empty.

mod workbook;

pub use workbook::{open_sheet, WorkbookLoader, SUPPORTED_EXTENSIONS};

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

/// Native content of a single cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Nothing stored in the cell.
    #[default]
    Empty,
    /// Text content, untrimmed.
    Text(String),
    /// Any numeric content (integers included).
    Number(f64),
    /// Boolean content.
    Bool(bool),
    /// Date or date-time content.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Whether the cell carries no visible content.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell the way a user reads it, trimmed.
    ///
    /// Integral numbers drop their fractional part so `2.0` reads as `"2"`,
    /// and dates without a time of day read as `YYYY-MM-DD`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
            CellValue::DateTime(dt) if dt.time() == chrono::NaiveTime::MIN => {
                dt.format("%Y-%m-%d").to_string()
            }
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Numeric content, if the cell holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::DateTime(d.and_time(chrono::NaiveTime::MIN))
    }
}

/// Read access to one sheet of cells.
pub trait Grid {
    /// Native cell at a 1-indexed position, `None` when unset or out of range.
    fn cell(&self, row: u32, col: u32) -> Option<&CellValue>;

    /// Last row holding any content (0 for an empty sheet).
    fn max_row(&self) -> u32;

    /// Last column holding any content (0 for an empty sheet).
    fn max_col(&self) -> u32;

    /// Trimmed, stringified cell content; `""` on any fault.
    fn text(&self, row: u32, col: u32) -> String {
        self.cell(row, col).map(CellValue::to_text).unwrap_or_default()
    }

    /// Native cell content; [`CellValue::Empty`] on any fault.
    fn raw(&self, row: u32, col: u32) -> CellValue {
        self.cell(row, col).cloned().unwrap_or_default()
    }

    /// Numeric cell content, `None` for anything that is not a number.
    fn number(&self, row: u32, col: u32) -> Option<f64> {
        self.cell(row, col).and_then(CellValue::as_number)
    }
}

/// In-memory sparse grid.
///
/// This is what a loaded worksheet becomes, and what tests build fixtures
/// with.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    cells: BTreeMap<(u32, u32), CellValue>,
    max_row: u32,
    max_col: u32,
}

impl SheetGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value at a 1-indexed position. Row or column 0 is ignored.
    pub fn set(&mut self, row: u32, col: u32, value: impl Into<CellValue>) -> &mut Self {
        if row == 0 || col == 0 {
            return self;
        }
        let value = value.into();
        if value == CellValue::Empty {
            self.cells.remove(&(row, col));
            return self;
        }
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.cells.insert((row, col), value);
        self
    }

    /// Builder-style variant of [`SheetGrid::set`].
    pub fn with(mut self, row: u32, col: u32, value: impl Into<CellValue>) -> Self {
        self.set(row, col, value);
        self
    }

    /// Remove every cell in a row.
    pub fn clear_row(&mut self, row: u32) -> &mut Self {
        self.cells.retain(|&(r, _), _| r != row);
        self
    }

    /// Move every cell at or below `from_row` down by `by` rows.
    pub fn insert_rows(&mut self, from_row: u32, by: u32) -> &mut Self {
        let moved: Vec<_> = self
            .cells
            .iter()
            .filter(|((r, _), _)| *r >= from_row)
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        for (key, _) in &moved {
            self.cells.remove(key);
        }
        for ((r, c), v) in moved {
            self.cells.insert((r + by, c), v);
        }
        self.max_row = self.cells.keys().map(|(r, _)| *r).max().unwrap_or(0);
        self
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), &CellValue)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }
}

impl Grid for SheetGrid {
    fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        if row == 0 || col == 0 {
            return None;
        }
        self.cells.get(&(row, col))
    }

    fn max_row(&self) -> u32 {
        self.max_row
    }

    fn max_col(&self) -> u32 {
        self.max_col
    }
}
