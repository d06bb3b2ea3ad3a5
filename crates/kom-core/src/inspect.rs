//! Structure inspection of KOM sheets.
//!
//! Reports where section headers actually sit in a sheet and compares those
//! positions across files, which is how template drift shows up before it
//! breaks an extraction.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::grid::Grid;

/// Keywords reported as section headers. A cell is tagged with the first
/// keyword it contains, so more specific keywords come first.
pub const SECTION_KEYWORDS: &[&str] = &[
    "TO BE COMPLETED BY SALES",
    "TO BE COMPLETED BY APPS",
    "TO BE COMPLETED BY ENG",
    "TO BE COMPLETED BY ACCT",
    "BILL TO",
    "SHIP TO",
    "TAX",
    "PAYMENT MILESTONES",
    "SHIPPING",
    "SPECIFICATIONS",
    "APPROVAL PRINTS",
    "EQUIPMENT",
    "HTR - 1",
    "HTR - 2",
    "STK ECON",
    "STACK",
    "HR",
    "TANKS",
    "PUMPS",
    "STEAM HEATERS",
    "SOFTENER",
    "PANEL",
    "OTHER",
    "UTILITIES",
    "LABOR HOURS",
    "CAPITAL",
    "INSTALL",
    "PROJECT NAME",
];

/// Default number of rows scanned for headers.
pub const DEFAULT_MAX_ROW: u32 = 200;

const SCAN_COLS: u32 = 14;
const TANK_WINDOW: u32 = 10;
const TANK_COLS: u32 = 15;
const TANK_LABELS: &[&str] = &["TYPE:", "DIA (IN):", "HT (FT):", "GA:", "MAT'L:"];

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHeader {
    pub row: u32,
    pub col: u32,
    pub text: String,
    pub keyword: &'static str,
}

/// A marked row in the tanks section, with its non-label cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerRow {
    pub row: u32,
    pub marker: String,
    pub cells: BTreeMap<u32, String>,
}

/// Structure of one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub file: String,
    pub max_row: u32,
    pub max_col: u32,
    pub sections: Vec<SectionHeader>,
    pub tank_markers: Vec<MarkerRow>,
}

impl SheetReport {
    /// First header tagged with `keyword`.
    pub fn section(&self, keyword: &str) -> Option<&SectionHeader> {
        self.sections.iter().find(|s| s.keyword == keyword)
    }
}

/// Where one file has a given header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionPosition {
    pub file: String,
    pub row: u32,
    pub col: u32,
}

/// Header positions across files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriftReport {
    pub files: usize,
    pub positions: BTreeMap<&'static str, Vec<SectionPosition>>,
    /// Keywords whose first occurrence is not at the same cell in every file.
    pub drifting: Vec<&'static str>,
}

/// Every cell in rows `1..max_row` (first 14 columns) that contains a
/// section keyword.
pub fn find_section_headers(grid: &dyn Grid, max_row: u32) -> Vec<SectionHeader> {
    let mut sections = Vec::new();
    for row in 1..max_row.min(grid.max_row() + 1) {
        for col in 1..=SCAN_COLS {
            let text = grid.text(row, col);
            if text.is_empty() {
                continue;
            }
            let upper = text.to_uppercase();
            if let Some(keyword) = SECTION_KEYWORDS.iter().copied().find(|k| upper.contains(k)) {
                sections.push(SectionHeader {
                    row,
                    col,
                    text,
                    keyword,
                });
            }
        }
    }
    sections
}

/// Rows under the tanks header that carry a `#` marker in column A.
pub fn tank_markers(grid: &dyn Grid, tanks_row: u32) -> Vec<MarkerRow> {
    (tanks_row..tanks_row + TANK_WINDOW)
        .filter_map(|row| {
            let marker = grid.text(row, 1);
            if !marker.starts_with('#') {
                return None;
            }
            let cells = (2..=TANK_COLS)
                .filter_map(|col| {
                    let text = grid.text(row, col);
                    let label = TANK_LABELS.contains(&text.to_uppercase().as_str());
                    (!text.is_empty() && !label).then_some((col, text))
                })
                .collect();
            Some(MarkerRow { row, marker, cells })
        })
        .collect()
}

/// Inspect one sheet.
pub fn inspect(grid: &dyn Grid, file: impl Into<String>, max_row: u32) -> SheetReport {
    let sections = find_section_headers(grid, max_row);
    let tank_markers = sections
        .iter()
        .find(|s| s.keyword == "TANKS")
        .map(|s| tank_markers(grid, s.row))
        .unwrap_or_default();

    SheetReport {
        file: file.into(),
        max_row: grid.max_row(),
        max_col: grid.max_col(),
        sections,
        tank_markers,
    }
}

/// Compare the first occurrence of every keyword across reports.
pub fn compare(reports: &[SheetReport]) -> DriftReport {
    let mut positions: BTreeMap<&'static str, Vec<SectionPosition>> = BTreeMap::new();
    for report in reports {
        for &keyword in SECTION_KEYWORDS {
            if let Some(header) = report.section(keyword) {
                positions.entry(keyword).or_default().push(SectionPosition {
                    file: report.file.clone(),
                    row: header.row,
                    col: header.col,
                });
            }
        }
    }

    let drifting = positions
        .iter()
        .filter(|(_, found)| {
            found.len() != reports.len()
                || found
                    .windows(2)
                    .any(|w| (w[0].row, w[0].col) != (w[1].row, w[1].col))
        })
        .map(|(keyword, _)| *keyword)
        .collect();

    DriftReport {
        files: reports.len(),
        positions,
        drifting,
    }
}
