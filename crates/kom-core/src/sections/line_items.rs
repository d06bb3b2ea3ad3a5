//! Line-item table between the apps header and the labor-hours header.
//!
//! The table has a header row but no labels, so values are read from fixed
//! columns on every row that looks like an item.

use tracing::debug;

use crate::coerce::parse_decimal;
use crate::models::{KomRecord, LineItem};
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

const ITEM_COL: u32 = 1;
const DESCRIPTION_COL: u32 = 3;
const DESCRIPTION_FALLBACK_COL: u32 = 4;
const VALUE_COLS: [u32; 4] = [6, 7, 8, 9];

/// Cell text that marks a header row rather than an item. Only these exact
/// words are checked in the description column.
const HEADING_TOKENS: &[&str] = &["ITEM", "ITEM #", "DESCRIPTION", "LABOR HOURS", "EQUIPMENT REQUIRED"];

pub struct LineItemsSection;

impl SectionExtractor for LineItemsSection {
    fn name(&self) -> &'static str {
        "line items"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let layout = sheet.layout();
        let start = sheet.anchor(&layout.line_items, log);
        // a missing labor header is reported by the labor section
        let table_height = layout
            .labor_hours
            .default_row
            .saturating_sub(layout.line_items.default_row);
        let end = sheet
            .find_section(
                &layout.labor_hours.keyword,
                start + 1,
                layout.labor_hours.search_end.max(start + 1),
            )
            .unwrap_or_else(|| layout.labor_hours.default_row.max(start + table_height));

        for row in start + 1..end {
            let item_number = sheet.text(row, ITEM_COL);
            let mut description = sheet.text(row, DESCRIPTION_COL);
            if description.is_empty() {
                description = sheet.text(row, DESCRIPTION_FALLBACK_COL);
            }

            if item_number.is_empty() && description.is_empty() {
                continue;
            }
            let heading = if item_number.is_empty() {
                HEADING_TOKENS.contains(&description.to_uppercase().as_str())
            } else {
                is_heading(&item_number)
            };
            if heading {
                continue;
            }

            let [value_1, value_2, value_3, value_4] =
                VALUE_COLS.map(|col| parse_decimal(&sheet.raw(row, col)));

            record.line_items.push(LineItem {
                item_number,
                description,
                value_1,
                value_2,
                value_3,
                value_4,
            });
        }

        debug!(
            "Read {} line items from rows {}-{}",
            record.line_items.len(),
            start + 1,
            end.saturating_sub(1)
        );

        if record.line_items.is_empty() {
            log.push("No line items found");
        }
    }
}

fn is_heading(text: &str) -> bool {
    let upper = text.trim().to_uppercase();
    upper.ends_with(':')
        || upper.contains("TO BE COMPLETED BY")
        || HEADING_TOKENS.contains(&upper.as_str())
}
