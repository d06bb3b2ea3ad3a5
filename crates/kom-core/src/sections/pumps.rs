//! Pumps `#1:` .. `#4:` and the packaging row on the section header.

use crate::coerce::parse_decimal;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::tanks::missing_instances_warning;
use super::SectionExtractor;

pub struct PumpsSection;

impl SectionExtractor for PumpsSection {
    fn name(&self) -> &'static str {
        "pumps"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let layout = &sheet.layout().pumps;
        let group = sheet.group(layout, log);
        let header = group.anchor_row();

        record.set_text("pump_packaging", sheet.text(header, 3));
        record.set_text("pump_piping_material", sheet.text(header, 6));

        let mut found = 0;
        for (i, row) in group.locate_all(sheet.grid()).into_iter().enumerate() {
            let Some(row) = row else { continue };
            let n = i + 1;
            found += 1;

            let number = |label: &str, col: u32| {
                parse_decimal(&sheet.locate_raw(&sheet.label_or_fixed(row, label, col)))
            };

            record.set_text(
                &format!("pump_{n}_type"),
                sheet.locate_text(&sheet.label_or_fixed(row, "Type", 3)),
            );
            record.set_decimal(&format!("pump_{n}_qty"), number("Qty", 5));
            record.set_decimal(&format!("pump_{n}_flow_gpm"), number("Flow (gpm)", 7));
            record.set_decimal(&format!("pump_{n}_tdh_ft"), number("TDH (ft)", 9));
        }

        if found == 0 && layout.warn_when_empty {
            log.push(missing_instances_warning(&layout.name, layout.instances()));
        }
    }
}
