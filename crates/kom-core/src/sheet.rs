//! Read context handed to every section extractor.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::coerce;
use crate::grid::{CellValue, Grid};
use crate::locate::{AnchorResolver, FieldLocator, LabelFinder, MarkerGroup};
use crate::models::{AnchorLayout, GroupLayout, KomConfig, TemplateLayout};
use crate::validation::ValidationLog;

/// A grid together with the layout and scanning settings used to read it.
pub struct Sheet<'a> {
    grid: &'a dyn Grid,
    config: &'a KomConfig,
    anchors: AnchorResolver,
    labels: LabelFinder,
}

impl<'a> Sheet<'a> {
    pub fn new(grid: &'a dyn Grid, config: &'a KomConfig) -> Self {
        Self {
            grid,
            config,
            anchors: AnchorResolver::new(config.extraction.section_scan_cols),
            labels: LabelFinder::from_config(&config.extraction),
        }
    }

    pub fn grid(&self) -> &'a dyn Grid {
        self.grid
    }

    pub fn layout(&self) -> &'a TemplateLayout {
        &self.config.layout
    }

    pub fn labels(&self) -> &LabelFinder {
        &self.labels
    }

    pub fn anchors(&self) -> &AnchorResolver {
        &self.anchors
    }

    /// Last column searched for field labels.
    pub fn label_scan_cols(&self) -> u32 {
        self.config.extraction.label_scan_cols
    }

    pub fn text(&self, row: u32, col: u32) -> String {
        self.grid.text(row, col)
    }

    pub fn raw(&self, row: u32, col: u32) -> CellValue {
        self.grid.raw(row, col)
    }

    pub fn decimal(&self, row: u32, col: u32) -> Option<Decimal> {
        coerce::parse_decimal(&self.grid.raw(row, col))
    }

    pub fn percent(&self, row: u32, col: u32) -> Option<Decimal> {
        coerce::parse_percent(&self.grid.raw(row, col))
    }

    pub fn flag(&self, row: u32, col: u32) -> bool {
        coerce::parse_bool(&self.grid.raw(row, col))
    }

    pub fn date(&self, row: u32, col: u32) -> Option<NaiveDate> {
        coerce::parse_date(&self.grid.raw(row, col))
    }

    /// Locator that searches `label` across the label scan window.
    pub fn label_locator(&self, row: u32, label: &str) -> FieldLocator {
        FieldLocator::new().label(row, label, 1, self.label_scan_cols())
    }

    /// The fixed cell, falling back to a label search on the same row.
    pub fn fixed_or_label(&self, row: u32, col: u32, label: &str) -> FieldLocator {
        FieldLocator::new()
            .fixed(row, col)
            .label(row, label, 1, self.label_scan_cols())
    }

    /// A label search, falling back to the fixed cell.
    pub fn label_or_fixed(&self, row: u32, label: &str, col: u32) -> FieldLocator {
        self.label_locator(row, label).fixed(row, col)
    }

    pub fn locate_text(&self, locator: &FieldLocator) -> String {
        locator.text(self.grid, &self.labels)
    }

    pub fn locate_raw(&self, locator: &FieldLocator) -> CellValue {
        locator.raw(self.grid, &self.labels)
    }

    /// Row of a section header, or its default with a warning.
    pub fn anchor(&self, anchor: &AnchorLayout, log: &mut ValidationLog) -> u32 {
        self.anchors.resolve(self.grid, anchor, log)
    }

    /// Row of a section header searched only from `start`, or its default
    /// with a warning.
    pub fn anchor_from(&self, anchor: &AnchorLayout, start: u32, log: &mut ValidationLog) -> u32 {
        let start = start.max(anchor.search_start);
        let end = anchor.search_end.max(start);
        self.anchors.resolve_within(self.grid, anchor, start, end, log)
    }

    /// Header row without recording anything when it is missing.
    pub fn find_section(&self, keyword: &str, start: u32, end: u32) -> Option<u32> {
        self.anchors.find(self.grid, keyword, start, end)
    }

    /// A repeated group bound to its resolved anchor.
    pub fn group(&self, layout: &'a GroupLayout, log: &mut ValidationLog) -> MarkerGroup<'a> {
        MarkerGroup::new(layout, self.anchor(&layout.anchor, log))
    }
}
