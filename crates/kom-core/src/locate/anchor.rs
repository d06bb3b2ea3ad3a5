//! Section header lookup.

use tracing::debug;

use crate::grid::Grid;
use crate::models::AnchorLayout;
use crate::validation::ValidationLog;

use super::marker::squash;

const DEFAULT_SCAN_COLS: u32 = 15;

/// First row in `start..=end` where any of the leading columns contains
/// `keyword`, ignoring case and whitespace.
pub fn find_section(grid: &dyn Grid, keyword: &str, start: u32, end: u32) -> Option<u32> {
    AnchorResolver::new(DEFAULT_SCAN_COLS).find(grid, keyword, start, end)
}

/// Finds section headers, substituting a default row when one is missing.
#[derive(Debug, Clone, Copy)]
pub struct AnchorResolver {
    scan_cols: u32,
}

impl Default for AnchorResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_COLS)
    }
}

impl AnchorResolver {
    pub fn new(scan_cols: u32) -> Self {
        Self { scan_cols }
    }

    /// Scan rows in ascending order; the first row that matches wins.
    pub fn find(&self, grid: &dyn Grid, keyword: &str, start: u32, end: u32) -> Option<u32> {
        let keyword = squash(keyword);
        if keyword.is_empty() {
            return None;
        }

        let end = end.min(grid.max_row());
        let cols = self.scan_cols.min(grid.max_col());

        (start.max(1)..=end).find(|&row| {
            (1..=cols).any(|col| squash(&grid.text(row, col)).contains(&keyword))
        })
    }

    /// Row of the anchor, or its default row with a recorded warning.
    pub fn resolve(&self, grid: &dyn Grid, anchor: &AnchorLayout, log: &mut ValidationLog) -> u32 {
        self.resolve_within(grid, anchor, anchor.search_start, anchor.search_end, log)
    }

    /// Like [`AnchorResolver::resolve`] but over an explicit row window.
    pub fn resolve_within(
        &self,
        grid: &dyn Grid,
        anchor: &AnchorLayout,
        start: u32,
        end: u32,
        log: &mut ValidationLog,
    ) -> u32 {
        match self.find(grid, &anchor.keyword, start, end) {
            Some(row) => {
                debug!("Section '{}' found at row {}", anchor.keyword, row);
                row
            }
            None => {
                log.section_defaulted(&anchor.keyword, start, end, anchor.default_row);
                anchor.default_row
            }
        }
    }
}
