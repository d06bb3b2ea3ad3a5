//! Core library for Kick-Off-Meeting (KOM) spreadsheet extraction.
//!
//! This crate provides:
//! - Workbook loading into a typed, 1-indexed cell grid
//! - Cell coercion (dates, decimals, percents, booleans)
//! - Field location by section anchors, labels, and instance markers
//! - Section extractors producing a flat, schema-complete record
//! - Structure inspection for spotting template drift across files

pub mod coerce;
pub mod error;
pub mod extractor;
pub mod grid;
pub mod inspect;
pub mod locate;
pub mod models;
pub mod patterns;
pub mod sections;
pub mod sheet;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use error::{KomError, Result, WorkbookError};
pub use extractor::KomExtractor;
pub use grid::{open_sheet, CellValue, Grid, SheetGrid, WorkbookLoader};
pub use inspect::{DriftReport, SheetReport};
pub use locate::{AnchorResolver, FieldLocator, LabelFinder, MarkerGroup};
pub use models::{
    EquipmentRequired, FieldKind, FieldValue, KomConfig, KomRecord, LineItem, TemplateLayout,
};
pub use validation::ValidationLog;
