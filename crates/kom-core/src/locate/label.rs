//! Label-directed value lookup.
//!
//! Labels and values drift between template revisions, but a value always
//! follows its label within a short run of cells on the same row.

use tracing::trace;

use crate::grid::Grid;
use crate::models::ExtractionConfig;

/// Label text that is never a value.
const NOISE_TOKENS: &[&str] = &[
    "Type:",
    "Qty:",
    "Mat'l:",
    "Dia (in):",
    "Ht (ft):",
    "GA:",
    "KN:",
    "Description:",
    "Flow (gpm):",
    "TDH (ft):",
];

/// Instance markers `#1:` .. `#N:` are noise too.
const MARKER_NOISE_COUNT: u32 = 5;

/// Value after `label` on `row`, scanning columns `1..=max_col` with the
/// default noise set. `""` when nothing qualifies.
pub fn find_value_after_label(grid: &dyn Grid, row: u32, label: &str, max_col: u32) -> String {
    LabelFinder::default().find_value(grid, row, label, max_col)
}

/// Finds label cells and the value cell that follows them.
#[derive(Debug, Clone)]
pub struct LabelFinder {
    lookahead: u32,
    separators: Vec<char>,
    noise: Vec<String>,
}

impl Default for LabelFinder {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl LabelFinder {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut noise: Vec<String> = NOISE_TOKENS.iter().map(|t| t.to_uppercase()).collect();
        noise.extend((1..=MARKER_NOISE_COUNT).map(|i| format!("#{}:", i)));
        noise.extend(config.extra_noise_tokens.iter().map(|t| t.trim().to_uppercase()));
        noise.retain(|t| !t.is_empty());

        Self {
            lookahead: config.value_lookahead,
            separators: config.separators.clone(),
            noise,
        }
    }

    /// Whether `text` reads as a label rather than a value.
    pub fn is_label_like(&self, text: &str) -> bool {
        let text = text.trim();
        if text.ends_with(self.separators.as_slice()) {
            return true;
        }
        let upper = text.to_uppercase();
        self.noise.iter().any(|n| upper.contains(n.as_str()))
    }

    /// Column of the first cell in `first_col..=last_col` that carries `label`.
    ///
    /// Matching is case-insensitive on the label with trailing separators
    /// removed: the cell must equal the label or continue it with a
    /// non-alphanumeric character, so `Qty` matches `QTY:` but `GA` does not
    /// match `GAS`.
    pub fn find_label(
        &self,
        grid: &dyn Grid,
        row: u32,
        label: &str,
        first_col: u32,
        last_col: u32,
    ) -> Option<u32> {
        let wanted = self.strip_separators(label).to_uppercase();
        if wanted.is_empty() {
            return None;
        }

        (first_col.max(1)..=last_col).find(|&col| {
            let cell = grid.text(row, col).to_uppercase();
            match cell.strip_prefix(wanted.as_str()) {
                Some(rest) => rest.chars().next().is_none_or(|c| !c.is_alphanumeric()),
                None => false,
            }
        })
    }

    /// Column of the value that follows `label` on `row`.
    pub fn find_cell(
        &self,
        grid: &dyn Grid,
        row: u32,
        label: &str,
        first_col: u32,
        last_col: u32,
    ) -> Option<u32> {
        let label_col = self.find_label(grid, row, label, first_col, last_col)?;
        let own = self.strip_separators(label).to_uppercase();

        let found = (label_col + 1..=label_col + self.lookahead)
            .find(|&col| self.accepts(&grid.text(row, col), &own));

        if found.is_none() {
            trace!("Label '{}' at ({}, {}) has no value", label, row, label_col);
        }
        found
    }

    /// Text of the value that follows `label`, or `""`.
    pub fn find_value(&self, grid: &dyn Grid, row: u32, label: &str, max_col: u32) -> String {
        self.find_cell(grid, row, label, 1, max_col)
            .map(|col| grid.text(row, col))
            .unwrap_or_default()
    }

    fn accepts(&self, text: &str, own_label: &str) -> bool {
        if text.is_empty() || self.is_label_like(text) {
            return false;
        }
        let upper = text.to_uppercase();
        upper != own_label
            && !self
                .separators
                .iter()
                .any(|sep| upper.contains(&format!("{}{}", own_label, sep)))
    }

    fn strip_separators<'s>(&self, text: &'s str) -> &'s str {
        text.trim().trim_end_matches(self.separators.as_slice()).trim_end()
    }
}
