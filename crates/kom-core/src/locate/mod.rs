//! Locating cells inside a loosely structured sheet.
//!
//! - [`anchor`] finds section headers by keyword.
//! - [`label`] finds the value that follows a text label.
//! - [`marker`] confirms which row belongs to an instance of a repeated group.
//! - [`locator`] chains those strategies per field.

pub mod anchor;
pub mod label;
pub mod locator;
pub mod marker;

pub use anchor::{find_section, AnchorResolver};
pub use label::{find_value_after_label, LabelFinder};
pub use locator::{FieldLocator, Strategy};
pub use marker::{find_titled_marker, has_numbered_marker, MarkerGroup};

/// A 1-indexed (row, column) position.
pub type CellPos = (u32, u32);
