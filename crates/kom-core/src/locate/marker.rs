//! Instance markers for repeated groups.
//!
//! A row only belongs to instance `i` of a group when it carries the
//! instance's marker. Rows without one yield nothing, so a visually absent
//! instance never inherits data from its neighbours.

use tracing::trace;

use crate::grid::Grid;
use crate::models::{GroupLayout, MarkerStyle};

/// Whether the marker column of `row` reads like `#<index>:`.
pub fn has_numbered_marker(grid: &dyn Grid, row: u32, col: u32, index: usize) -> bool {
    let text = grid.text(row, col);
    text.starts_with('#') && text.contains(&index.to_string())
}

/// Row at or within `tolerance` rows of `row` whose leading columns carry
/// `<prefix> - <index>`. Spacing around the dash is ignored.
pub fn find_titled_marker(
    grid: &dyn Grid,
    row: u32,
    prefix: &str,
    index: usize,
    scan_cols: u32,
    tolerance: u32,
) -> Option<u32> {
    let wanted = squash(&format!("{}-{}", prefix, index));

    let mut rows = vec![row];
    for delta in 1..=tolerance {
        if row > delta {
            rows.push(row - delta);
        }
        rows.push(row + delta);
    }

    rows.into_iter().find(|&r| {
        (1..=scan_cols).any(|col| {
            let cell = squash(&grid.text(r, col));
            // "HTR-1" must not match "HTR-12"
            cell.match_indices(&wanted).any(|(at, _)| {
                !cell[at + wanted.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit())
            })
        })
    })
}

/// Uppercase `text` with all whitespace removed.
pub(super) fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// A repeated group bound to its resolved anchor row.
#[derive(Debug, Clone, Copy)]
pub struct MarkerGroup<'a> {
    layout: &'a GroupLayout,
    anchor_row: u32,
}

impl<'a> MarkerGroup<'a> {
    pub fn new(layout: &'a GroupLayout, anchor_row: u32) -> Self {
        Self { layout, anchor_row }
    }

    pub fn layout(&self) -> &'a GroupLayout {
        self.layout
    }

    pub fn anchor_row(&self) -> u32 {
        self.anchor_row
    }

    /// Candidate rows for a 1-based instance: anchor offset first, then the
    /// fallback row.
    pub fn candidates(&self, index: usize) -> Vec<u32> {
        let mut rows = Vec::with_capacity(2);
        if let Some(offset) = index.checked_sub(1).and_then(|i| self.layout.instance_offsets.get(i)) {
            rows.push(self.anchor_row + offset);
        }
        if let Some(&fallback) = index.checked_sub(1).and_then(|i| self.layout.fallback_rows.get(i)) {
            if !rows.contains(&fallback) {
                rows.push(fallback);
            }
        }
        rows
    }

    /// Row of instance `index`, if any candidate carries its marker.
    pub fn locate(&self, grid: &dyn Grid, index: usize) -> Option<u32> {
        let found = self
            .candidates(index)
            .into_iter()
            .find_map(|row| match &self.layout.marker {
                MarkerStyle::Numbered { column } => {
                    has_numbered_marker(grid, row, *column, index).then_some(row)
                }
                MarkerStyle::Titled {
                    prefix,
                    scan_cols,
                    row_tolerance,
                } => find_titled_marker(grid, row, prefix, index, *scan_cols, *row_tolerance),
            });

        if found.is_none() {
            trace!("No marker for {} #{}", self.layout.name, index);
        }
        found
    }

    /// Rows of every declared instance, in order.
    pub fn locate_all(&self, grid: &dyn Grid) -> Vec<Option<u32>> {
        (1..=self.layout.instances())
            .map(|i| self.locate(grid, i))
            .collect()
    }
}
