//! Top-level KOM extraction.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::grid::{Grid, WorkbookLoader};
use crate::models::{KomConfig, KomRecord};
use crate::sections::{default_sections, SectionExtractor};
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

/// Runs every section extractor over a sheet and collects the record.
///
/// The extractor holds no per-document state, so one instance can serve
/// any number of documents, from any number of threads.
pub struct KomExtractor {
    config: KomConfig,
    sections: Vec<Box<dyn SectionExtractor>>,
}

impl KomExtractor {
    /// Create an extractor with the default template layout.
    pub fn new() -> Self {
        Self::with_config(KomConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: KomConfig) -> Self {
        Self {
            config,
            sections: default_sections(),
        }
    }

    pub fn config(&self) -> &KomConfig {
        &self.config
    }

    /// Extract a record from an already loaded sheet. Never fails; problems
    /// end up in the record's validation warnings.
    pub fn extract(&self, grid: &dyn Grid) -> KomRecord {
        let start = Instant::now();
        let sheet = Sheet::new(grid, &self.config);
        let mut record = KomRecord::new();
        let mut log = ValidationLog::new();

        for section in &self.sections {
            let before = log.len();
            section.extract(&sheet, &mut record, &mut log);
            debug!(
                "Section {} done ({} new warnings)",
                section.name(),
                log.len() - before
            );
        }

        record.validation_warnings = log.into_vec();

        info!(
            "Extracted proposal '{}': {} line items, {} equipment rows, {} warnings in {}ms",
            record.text("proposal_number"),
            record.line_items.len(),
            record.equipment_required.len(),
            record.validation_warnings.len(),
            start.elapsed().as_millis()
        );

        record
    }

    /// Load the first worksheet of a file and extract it.
    pub fn extract_file(&self, path: &Path) -> Result<KomRecord> {
        self.extract_file_with(path, &WorkbookLoader::new())
    }

    /// Load a file with a specific loader (e.g. a named sheet) and extract it.
    pub fn extract_file_with(&self, path: &Path, loader: &WorkbookLoader) -> Result<KomRecord> {
        info!("Processing {}", path.display());
        let grid = loader.load(path)?;
        Ok(self.extract(&grid))
    }
}

impl Default for KomExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{canonical_grid, scenario_grid};
    use crate::grid::SheetGrid;
    use crate::models::{schema, EquipmentRequired, FieldKind, FieldValue};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Option<Decimal> {
        s.parse().ok()
    }

    #[test]
    fn test_canonical_template_reads_every_field() {
        let record = KomExtractor::new().extract(&canonical_grid());

        for (name, expected) in crate::fixtures::canonical_values() {
            assert_eq!(record.get(name), Some(&expected), "field {name}");
        }
        assert!(
            record.validation_warnings.is_empty(),
            "{:?}",
            record.validation_warnings
        );
    }

    #[test]
    fn test_canonical_template_covers_schema() {
        let covered: Vec<_> = crate::fixtures::canonical_values()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        for (name, kind) in schema() {
            // a filled template leaves no text field empty
            if *kind == FieldKind::Text {
                assert!(covered.contains(&name.as_str()), "fixture misses {name}");
            }
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let record = KomExtractor::new().extract(&scenario_grid());

        assert_eq!(record.text("proposal_number"), "35371");
        assert_eq!(record.text("job_number"), "35371");
        assert_eq!(record.text("sales_rep"), "JOHN O'HEHIR");
        assert_eq!(record.decimal("discount"), Some(Decimal::from(5)));
        assert_eq!(record.date("proposal_date"), NaiveDate::from_ymd_opt(2025, 9, 19));

        assert_eq!(record.line_items.len(), 3);
        let items: Vec<_> = record.line_items.iter().map(|i| i.item_number.as_str()).collect();
        assert_eq!(items, vec!["35371-01", "35371-02", "35371-03"]);

        assert_eq!(record.equipment_required.len(), 3);
        assert_eq!(
            record.equipment_required[0],
            EquipmentRequired {
                equipment_type: "Burner".to_string(),
                qty: Some(2),
                kn_number: "890-01-012".to_string(),
                description: "BURNER, GAS, EB-7".to_string(),
            }
        );
        assert_eq!(record.equipment_required[1].qty, Some(1));
        assert_eq!(record.equipment_required[2].qty, Some(153));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = KomExtractor::new();
        let grid = scenario_grid();

        let first = extractor.extract(&grid).to_json(false).unwrap();
        let second = extractor.extract(&grid).to_json(false).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_rows_inserted_above_tanks_are_followed() {
        let mut grid = canonical_grid();
        grid.insert_rows(74, 1);

        let record = KomExtractor::new().extract(&grid);

        let expected = crate::fixtures::canonical_values();
        for name in ["tank_1_type", "tank_2_dia_in", "tank_3_material", "pump_4_tdh_ft"] {
            let value = expected.iter().find(|(n, _)| *n == name).map(|(_, v)| v);
            assert_eq!(record.get(name), value, "field {name}");
        }
        assert_eq!(record.line_items.len(), 3);
    }

    #[test]
    fn test_empty_sheet_still_yields_full_record() {
        let record = KomExtractor::new().extract(&SheetGrid::new());

        assert_eq!(record.fields().count(), schema().len());
        assert_eq!(record.get("tank_1_type"), Some(&FieldValue::Text(String::new())));
        assert_eq!(record.get("tax_exempt"), Some(&FieldValue::Bool(false)));
        assert!(record.line_items.is_empty());
        assert!(record
            .validation_warnings
            .contains(&"Critical field 'proposal_number' is empty".to_string()));
        assert!(record
            .validation_warnings
            .contains(&"Section 'TANKS' not found in rows 70-90; using default row 75".to_string()));
        assert!(record
            .validation_warnings
            .contains(&"No line items found".to_string()));
    }

    #[test]
    fn test_missing_tanks_header_uses_default_rows() {
        let mut grid = canonical_grid();
        grid.clear_row(75);

        let record = KomExtractor::new().extract(&grid);

        assert_eq!(
            record.validation_warnings,
            vec!["Section 'TANKS' not found in rows 70-90; using default row 75".to_string()]
        );
        assert_eq!(record.text("tank_1_type"), "ATMOSPHERIC");
        assert_eq!(record.decimal("tank_3_dia_in"), dec("48"));
    }
}
