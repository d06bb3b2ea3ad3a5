//! Tanks `#1:` .. `#3:`.

use crate::coerce::parse_decimal;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

pub struct TanksSection;

impl SectionExtractor for TanksSection {
    fn name(&self) -> &'static str {
        "tanks"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let layout = &sheet.layout().tanks;
        let group = sheet.group(layout, log);
        let mut found = 0;

        for (i, row) in group.locate_all(sheet.grid()).into_iter().enumerate() {
            let Some(row) = row else { continue };
            let n = i + 1;
            found += 1;

            let field = |label: &str, col: u32| sheet.label_or_fixed(row, label, col);

            record.set_text(&format!("tank_{n}_type"), sheet.locate_text(&field("Type", 3)));
            record.set_decimal(
                &format!("tank_{n}_dia_in"),
                parse_decimal(&sheet.locate_raw(&field("Dia (in)", 5))),
            );
            record.set_decimal(
                &format!("tank_{n}_ht_ft"),
                parse_decimal(&sheet.locate_raw(&field("Ht (ft)", 7))),
            );
            record.set_text(&format!("tank_{n}_ga"), sheet.locate_text(&field("GA", 9)));
            record.set_text(&format!("tank_{n}_material"), sheet.locate_text(&field("Mat'l", 11)));
        }

        if found == 0 && layout.warn_when_empty {
            log.push(missing_instances_warning(&layout.name, layout.instances()));
        }
    }
}

/// `No tanks found with markers #1/#2/#3`
pub(crate) fn missing_instances_warning(group: &str, instances: usize) -> String {
    let markers = (1..=instances)
        .map(|i| format!("#{}", i))
        .collect::<Vec<_>>()
        .join("/");
    format!("No {} found with markers {}", group, markers)
}
