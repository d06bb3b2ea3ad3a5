//! Specifications, liquidated damages, passivation and approval prints.

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

pub struct SpecificationsSection;

impl SectionExtractor for SpecificationsSection {
    fn name(&self) -> &'static str {
        "specifications"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_flag("specifications_provided", sheet.flag(53, 4));
        record.set_flag("specifications_agreed", sheet.flag(53, 6));
        record.set_flag("liquidated_damages", sheet.flag(53, 10));
        record.set_text("liquidated_damages_rate_cap", sheet.text(54, 10));
        record.set_flag("passivation", sheet.flag(55, 3));
        record.set_text("passivation_in_out_both", sheet.text(55, 6));

        let approval = sheet.text(57, 7);
        record.set_text("approval_prints_elect", electrical_approval(&approval));
        record.set_text("approval_prints_ll_mech", approval);

        record.set_flag("approval_prints_required", sheet.flag(58, 4));
        record.set_flag("approval_prints_electrical", sheet.flag(58, 6));
        record.set_flag("engineering_order_prior_to_approval", sheet.flag(59, 6));
    }
}

/// Electrical date out of `"LL & Mech: 10/17 ; Elect: 10/22"`.
fn electrical_approval(combined: &str) -> String {
    let Some(segment) = combined.split(';').nth(1) else {
        return String::new();
    };
    let segment = segment.trim();
    segment
        .to_ascii_uppercase()
        .find("ELECT:")
        .map(|at| segment[at + "ELECT:".len()..].trim().to_string())
        .unwrap_or_default()
}
