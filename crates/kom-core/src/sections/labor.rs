//! Labor hours and the equipment-required block beside them.
//!
//! Equipment quantity, KN number and description moved one column to the
//! right in a later template revision. A positive quantity decides which
//! column set a row uses. Rows without one are read by label, then from the
//! set whose own cells still fit the row.

use crate::coerce::{parse_decimal, positive_quantity};
use crate::locate::FieldLocator;
use crate::models::{EquipmentRequired, KomRecord};
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

const VALUE_COL: u32 = 3;

/// Empty labor-hours cells read as this placeholder.
const NO_HOURS: &str = "-";

/// Equipment categories and their row offset from the labor header.
const EQUIPMENT_ROWS: [(&str, u32); 3] = [("Burner", 2), ("Blower", 3), ("Media", 4)];

/// (qty, KN, description) columns, original layout first.
const COLUMN_SETS: &[&[u32]] = &[&[7, 8, 9], &[8, 9, 10]];

pub struct LaborSection;

impl SectionExtractor for LaborSection {
    fn name(&self) -> &'static str {
        "labor/equipment required"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let layout = sheet.layout();
        let items_row = sheet
            .find_section(
                &layout.line_items.keyword,
                layout.line_items.search_start,
                layout.line_items.search_end,
            )
            .unwrap_or(layout.line_items.default_row);
        let header = sheet.anchor_from(&layout.labor_hours, items_row + 1, log);

        let hours = sheet.text(header + 1, VALUE_COL);
        record.set_text("labor_hr", if hours.is_empty() { NO_HOURS.to_string() } else { hours });
        record.set_decimal("labor_pkg", parse_decimal(&sheet.raw(header + 2, VALUE_COL)));
        record.set_decimal("labor_fab", parse_decimal(&sheet.raw(header + 3, VALUE_COL)));
        record.set_decimal("labor_wiring", parse_decimal(&sheet.raw(header + 4, VALUE_COL)));

        for (equipment_type, offset) in EQUIPMENT_ROWS {
            if let Some(entry) = equipment_row(sheet, header + offset, equipment_type) {
                record.equipment_required.push(entry);
            }
        }
    }
}

fn equipment_row(sheet: &Sheet<'_>, row: u32, equipment_type: &str) -> Option<EquipmentRequired> {
    let unquantified = unquantified_set(sheet, row);
    let locator = |slot: usize, label: &str| -> FieldLocator {
        let locator = FieldLocator::new()
            .column_shift(row, COLUMN_SETS, slot)
            .label(row, label, 1, sheet.label_scan_cols());
        match unquantified {
            Some(set) => locator.fixed(row, set[slot]),
            None => locator,
        }
    };

    let qty = positive_quantity(&sheet.locate_raw(&locator(0, "Qty")));
    let kn_number = sheet.locate_text(&locator(1, "KN"));
    let description = sheet.locate_text(&locator(2, "Description"));

    if qty.is_none() && kn_number.is_empty() && description.is_empty() {
        return None;
    }

    Some(EquipmentRequired {
        equipment_type: equipment_type.to_string(),
        qty,
        kn_number,
        description,
    })
}

/// Column set for a row without a positive quantity.
///
/// The set's quantity cell must be blank or numeric and none of its cells
/// may hold label text. A numeric quantity cell ranks first, then the number
/// of filled KN and description cells; ties go to the earlier set.
fn unquantified_set(sheet: &Sheet<'_>, row: u32) -> Option<&'static [u32]> {
    COLUMN_SETS
        .iter()
        .copied()
        .filter(|set| {
            set.iter()
                .all(|&col| !sheet.labels().is_label_like(&sheet.text(row, col)))
        })
        .filter_map(|set| {
            let qty = sheet.raw(row, set[0]);
            let numeric = parse_decimal(&qty).is_some();
            if !numeric && !qty.is_empty() {
                return None;
            }
            let filled = set[1..]
                .iter()
                .filter(|&&col| !sheet.text(row, col).is_empty())
                .count();
            (filled > 0).then_some(((numeric, filled), set))
        })
        .rev()
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, set)| set)
}
