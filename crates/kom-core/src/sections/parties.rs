//! Bill-to and ship-to addresses.

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

const PARTS: [&str; 8] = ["name", "phone", "email", "company", "address", "city", "state", "zip"];

/// Cell of each part, in `PARTS` order.
const BILL_TO: [(u32, u32); 8] = [
    (12, 2),
    (14, 2),
    (16, 2),
    (18, 2),
    (20, 2),
    (22, 3),
    (24, 3),
    (24, 4),
];

const SHIP_TO: [(u32, u32); 8] = [
    (12, 6),
    (14, 6),
    (16, 6),
    (18, 6),
    (20, 6),
    (22, 6),
    (24, 6),
    (24, 9),
];

pub struct PartiesSection;

impl SectionExtractor for PartiesSection {
    fn name(&self) -> &'static str {
        "bill_to/ship_to"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        for (prefix, cells) in [("bill_to", &BILL_TO), ("ship_to", &SHIP_TO)] {
            for (part, &(row, col)) in PARTS.iter().zip(cells.iter()) {
                record.set_text(&format!("{}_{}", prefix, part), sheet.text(row, col));
            }
        }
    }
}
