//! Utilities block.

use crate::coerce::parse_decimal;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::{join_nonempty, SectionExtractor};

pub struct UtilitiesSection;

impl SectionExtractor for UtilitiesSection {
    fn name(&self) -> &'static str {
        "utilities"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_decimal("city_water_meter_in", sheet.decimal(107, 8));
        record.set_text("electrical", sheet.text(109, 3));
        record.set_text("fuel_type", sheet.text(109, 6));

        // pressure value and its unit sit in adjacent cells
        let pressure = sheet.text(109, 9);
        let gas_pressure = if pressure.is_empty() {
            String::new()
        } else {
            join_nonempty(&[pressure, sheet.text(109, 10)], " ")
        };
        record.set_text("gas_pressure_psi", gas_pressure);

        record.set_decimal(
            "onsite_gas_supply_diameter_in",
            parse_decimal(&sheet.raw(111, 5)),
        );
        record.set_text("gas_train_orientation", sheet.text(111, 9));
        record.set_flag("utilities_match_proposal", sheet.flag(113, 8));
    }
}
