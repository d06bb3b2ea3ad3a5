//! Steam heaters `#1:` and `#2:`.

use crate::coerce::split_dimensions;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

pub struct SteamHeatersSection;

impl SectionExtractor for SteamHeatersSection {
    fn name(&self) -> &'static str {
        "steam heaters"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let group = sheet.group(&sheet.layout().steam_heaters, log);

        for (i, row) in group.locate_all(sheet.grid()).into_iter().enumerate() {
            let Some(row) = row else { continue };
            let n = i + 1;

            let dims = sheet.locate_text(&sheet.label_or_fixed(row, "Dia(in) x L(in)", 4));
            let (dia, length) = split_dimensions(&dims).unwrap_or((None, None));
            record.set_decimal(&format!("steam_heater_{n}_dia_in"), dia);
            record.set_decimal(&format!("steam_heater_{n}_length_in"), length);

            record.set_text(
                &format!("steam_heater_{n}_material"),
                sheet.locate_text(&sheet.label_or_fixed(row, "Mat'l", 6)),
            );
            record.set_text(
                &format!("steam_heater_{n}_valve_type"),
                sheet.locate_text(&sheet.label_or_fixed(row, "Valve", 9)),
            );
        }
    }
}
