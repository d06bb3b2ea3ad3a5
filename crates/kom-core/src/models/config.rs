//! Configuration structures for the extraction pipeline.
//!
//! Every row number, anchor keyword and instance offset the extractors rely
//! on lives in [`TemplateLayout`], so a template revision can be followed by
//! editing the JSON config instead of the code.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KomError, Result};

/// Main configuration for the kom pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KomConfig {
    /// Scanning behaviour shared by all sections.
    pub extraction: ExtractionConfig,

    /// Section anchors and repeated-group geometry.
    pub layout: TemplateLayout,
}

/// Scanning behaviour of the locators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Columns inspected per row when looking for a section header.
    pub section_scan_cols: u32,

    /// Columns inspected per row when looking for a field label.
    pub label_scan_cols: u32,

    /// Cells after a label that may hold its value.
    pub value_lookahead: u32,

    /// Characters that mark a cell as a label when they end it.
    pub separators: Vec<char>,

    /// Tokens never accepted as a value, on top of the built-in set.
    pub extra_noise_tokens: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            section_scan_cols: 15,
            label_scan_cols: 12,
            value_lookahead: 3,
            separators: vec![':'],
            extra_noise_tokens: Vec::new(),
        }
    }
}

/// A section header located by keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorLayout {
    /// Upper-case text the header row contains.
    pub keyword: String,

    /// Row used when the keyword is not found.
    pub default_row: u32,

    /// First row searched (inclusive).
    pub search_start: u32,

    /// Last row searched (inclusive).
    pub search_end: u32,
}

impl AnchorLayout {
    pub fn new(keyword: &str, default_row: u32, search_start: u32, search_end: u32) -> Self {
        Self {
            keyword: keyword.to_string(),
            default_row,
            search_start,
            search_end,
        }
    }
}

/// How the row of a repeated-group instance identifies itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerStyle {
    /// `#1:`, `#2:` ... in a single marker column.
    Numbered { column: u32 },

    /// `<prefix> - 1`, `<prefix> - 2` ... somewhere in the leading columns,
    /// on the candidate row or within `row_tolerance` rows of it.
    Titled {
        prefix: String,
        scan_cols: u32,
        row_tolerance: u32,
    },
}

/// Geometry of one repeated group (tanks, pumps, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLayout {
    /// Plural name used in warnings.
    pub name: String,

    /// Header the instances hang off.
    pub anchor: AnchorLayout,

    /// Instance rows relative to the anchor row, one per instance.
    pub instance_offsets: Vec<u32>,

    /// Absolute rows tried when the offset row has no marker.
    pub fallback_rows: Vec<u32>,

    /// Marker used to confirm an instance row.
    pub marker: MarkerStyle,

    /// Record a warning when no instance is found.
    pub warn_when_empty: bool,
}

impl GroupLayout {
    /// Number of instances this group declares.
    pub fn instances(&self) -> usize {
        self.instance_offsets.len()
    }
}

fn numbered(
    name: &str,
    anchor: AnchorLayout,
    offsets: &[u32],
    fallback: &[u32],
    warn_when_empty: bool,
) -> GroupLayout {
    GroupLayout {
        name: name.to_string(),
        anchor,
        instance_offsets: offsets.to_vec(),
        fallback_rows: fallback.to_vec(),
        marker: MarkerStyle::Numbered { column: 1 },
        warn_when_empty,
    }
}

/// Anchors and group geometry of the KOM template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
    pub payment_milestones: GroupLayout,
    pub heaters: GroupLayout,
    pub tanks: GroupLayout,
    pub pumps: GroupLayout,
    pub steam_heaters: GroupLayout,

    /// Header of the line-item table.
    pub line_items: AnchorLayout,

    /// Header closing the line-item table; searched after `line_items`.
    pub labor_hours: AnchorLayout,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            payment_milestones: numbered(
                "payment milestones",
                AnchorLayout::new("PAYMENT MILESTONES", 32, 28, 40),
                &[1, 2, 3, 4, 5],
                &[33, 34, 35, 36, 37],
                false,
            ),
            heaters: GroupLayout {
                name: "heaters".to_string(),
                anchor: AnchorLayout::new("HTR - 1", 61, 56, 68),
                instance_offsets: vec![0, 4],
                fallback_rows: vec![61, 65],
                marker: MarkerStyle::Titled {
                    prefix: "HTR".to_string(),
                    scan_cols: 3,
                    row_tolerance: 1,
                },
                warn_when_empty: false,
            },
            tanks: numbered(
                "tanks",
                AnchorLayout::new("TANKS", 75, 70, 90),
                &[2, 4, 6],
                &[77, 79, 81],
                true,
            ),
            pumps: numbered(
                "pumps",
                AnchorLayout::new("PUMPS", 83, 80, 95),
                &[2, 4, 6, 8],
                &[85, 87, 89, 91],
                true,
            ),
            steam_heaters: numbered(
                "steam heaters",
                AnchorLayout::new("STEAM HEATERS", 93, 88, 100),
                &[1, 3],
                &[94, 96],
                false,
            ),
            line_items: AnchorLayout::new("TO BE COMPLETED BY APPS", 125, 115, 140),
            labor_hours: AnchorLayout::new("LABOR HOURS", 141, 126, 170),
        }
    }
}

impl KomConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| KomError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
