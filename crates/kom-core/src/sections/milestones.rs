//! Payment milestones `#1:` .. `#5:`.

use crate::coerce::parse_percent;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

pub struct PaymentMilestonesSection;

impl SectionExtractor for PaymentMilestonesSection {
    fn name(&self) -> &'static str {
        "payment milestones"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let group = sheet.group(&sheet.layout().payment_milestones, log);

        for (i, row) in group.locate_all(sheet.grid()).into_iter().enumerate() {
            let Some(row) = row else { continue };
            let n = i + 1;
            record.set_text(&format!("payment_milestone_{n}_event"), sheet.text(row, 3));
            record.set_decimal(
                &format!("payment_milestone_{n}_percent"),
                parse_percent(&sheet.raw(row, 4)),
            );
            record.set_text(&format!("payment_milestone_{n}_terms"), sheet.text(row, 5));
            record.set_text(&format!("payment_milestone_{n}_notes"), sheet.text(row, 6));
        }
    }
}
