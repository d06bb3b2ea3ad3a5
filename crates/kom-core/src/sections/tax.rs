//! Tax status block.

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

pub struct TaxSection;

impl SectionExtractor for TaxSection {
    fn name(&self) -> &'static str {
        "tax"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_flag("tax_exempt", sheet.flag(26, 4));
        record.set_flag("exempt_cert_in_hand", sheet.flag(26, 8));
        record.set_text("tax_action_who", sheet.text(26, 11));
        record.set_date("tax_action_when", sheet.date(27, 11));
        record.set_flag("confirm_tax_status_noted", sheet.flag(30, 4));
        record.set_flag("customer_in_sage", sheet.flag(30, 6));
    }
}
