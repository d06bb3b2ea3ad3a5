//! Per-field strategy chains.

use crate::coerce::positive_quantity;
use crate::grid::{CellValue, Grid};

use super::label::LabelFinder;
use super::CellPos;

/// One way of finding a field's cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// The cell at a known position, unless it is empty or reads as a label.
    Fixed { row: u32, col: u32 },

    /// The value following `label` in `first_col..=last_col`.
    Label {
        row: u32,
        label: String,
        first_col: u32,
        last_col: u32,
    },

    /// Slot `slot` of the first column set whose first column holds a
    /// positive quantity and which holds no label text.
    ColumnShift {
        row: u32,
        sets: Vec<Vec<u32>>,
        slot: usize,
    },
}

impl Strategy {
    fn locate(&self, grid: &dyn Grid, labels: &LabelFinder) -> Option<CellPos> {
        match self {
            Strategy::Fixed { row, col } => {
                let text = grid.text(*row, *col);
                (!text.is_empty() && !labels.is_label_like(&text)).then_some((*row, *col))
            }
            Strategy::Label {
                row,
                label,
                first_col,
                last_col,
            } => labels
                .find_cell(grid, *row, label, *first_col, *last_col)
                .map(|col| (*row, col)),
            Strategy::ColumnShift { row, sets, slot } => sets
                .iter()
                .find(|set| {
                    set.first().is_some_and(|&qty_col| {
                        positive_quantity(&grid.raw(*row, qty_col)).is_some()
                    }) && set
                        .iter()
                        .all(|&col| !labels.is_label_like(&grid.text(*row, col)))
                })
                .and_then(|set| set.get(*slot))
                .map(|&col| (*row, col))
                .filter(|&(r, c)| !grid.text(r, c).is_empty()),
        }
    }
}

/// Ordered strategies for one field; the first that finds a cell wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldLocator {
    strategies: Vec<Strategy>,
}

impl FieldLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixed(mut self, row: u32, col: u32) -> Self {
        self.strategies.push(Strategy::Fixed { row, col });
        self
    }

    pub fn label(mut self, row: u32, label: &str, first_col: u32, last_col: u32) -> Self {
        self.strategies.push(Strategy::Label {
            row,
            label: label.to_string(),
            first_col,
            last_col,
        });
        self
    }

    pub fn column_shift(mut self, row: u32, sets: &[&[u32]], slot: usize) -> Self {
        self.strategies.push(Strategy::ColumnShift {
            row,
            sets: sets.iter().map(|s| s.to_vec()).collect(),
            slot,
        });
        self
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Position of the field's cell.
    pub fn locate(&self, grid: &dyn Grid, labels: &LabelFinder) -> Option<CellPos> {
        self.strategies.iter().find_map(|s| s.locate(grid, labels))
    }

    /// Trimmed text of the field, `""` when no strategy succeeds.
    pub fn text(&self, grid: &dyn Grid, labels: &LabelFinder) -> String {
        self.locate(grid, labels)
            .map(|(r, c)| grid.text(r, c))
            .unwrap_or_default()
    }

    /// Native value of the field, [`CellValue::Empty`] when no strategy
    /// succeeds.
    pub fn raw(&self, grid: &dyn Grid, labels: &LabelFinder) -> CellValue {
        self.locate(grid, labels)
            .map(|(r, c)| grid.raw(r, c))
            .unwrap_or_default()
    }
}
