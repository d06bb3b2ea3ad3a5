//! Heater units `HTR - 1` and `HTR - 2`.
//!
//! Each unit spans two rows: quantity, type and emissions on the marker row,
//! size, pump/gravity and material two rows below. A unit whose marker is
//! missing stays empty instead of borrowing its neighbour's rows.

use crate::coerce::parse_decimal;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::{join_nonempty, SectionExtractor};

/// Rows between a unit's marker row and its detail row.
const DETAIL_OFFSET: u32 = 2;

pub struct HeatersSection;

impl SectionExtractor for HeatersSection {
    fn name(&self) -> &'static str {
        "heaters"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let group = sheet.group(&sheet.layout().heaters, log);

        for (i, row) in group.locate_all(sheet.grid()).into_iter().enumerate() {
            let Some(row) = row else { continue };
            let n = i + 1;
            let detail = row + DETAIL_OFFSET;

            let qty = sheet.locate_raw(&sheet.label_or_fixed(row, "Qty", 4));
            record.set_decimal(&format!("htr_{n}_qty"), parse_decimal(&qty));
            record.set_text(
                &format!("htr_{n}_type"),
                sheet.locate_text(&sheet.label_or_fixed(row, "Type", 6)),
            );
            record.set_text(
                &format!("htr_{n}_emissions"),
                sheet.locate_text(&sheet.label_or_fixed(row, "Emissions", 9)),
            );

            let size = join_nonempty(&[sheet.text(detail, 2), sheet.text(detail, 3)], " ");
            record.set_text(&format!("htr_{n}_size"), size);
            record.set_text(
                &format!("htr_{n}_pump_grav"),
                sheet.locate_text(&sheet.label_or_fixed(detail, "Pump/Grav", 6)),
            );
            record.set_text(
                &format!("htr_{n}_material"),
                sheet.locate_text(&sheet.label_or_fixed(detail, "Mat'l", 8)),
            );
        }
    }
}
