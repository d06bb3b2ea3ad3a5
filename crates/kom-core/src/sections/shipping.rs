//! Project parties, delivery and shipping.

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

pub struct ShippingSection;

impl SectionExtractor for ShippingSection {
    fn name(&self) -> &'static str {
        "shipping"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_text("consultant", sheet.text(43, 3));
        record.set_text("contractor_name", sheet.text(43, 6));
        record.set_text("desired_delivery", sheet.text(45, 3));

        record.set_text("freight", sheet.text(48, 3));
        record.set_flag("international", sheet.flag(48, 6));
        record.set_text("international_freight_method", sheet.text(48, 10));
        record.set_text("shipping_instructions", sheet.text(50, 3));
    }
}
