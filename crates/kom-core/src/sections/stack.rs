//! Stack economizer, stack and heat-recovery rows.

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

const STK_ECON_ROW: u32 = 69;
const STACK_ROW: u32 = 71;
const HR_ROW: u32 = 73;

pub struct StackSection;

impl SectionExtractor for StackSection {
    fn name(&self) -> &'static str {
        "stack/economizer"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_text("stk_econ_size_bhp", sheet.text(STK_ECON_ROW, 3));
        record.set_text("stk_econ_pump_grav", sheet.text(STK_ECON_ROW, 6));
        record.set_text("stk_econ_material", sheet.text(STK_ECON_ROW, 8));

        record.set_decimal("stack_length_ft", sheet.decimal(STACK_ROW, 4));
        record.set_text("stack_total", sheet.text(STACK_ROW, 6));
        record.set_flag("stack_caps", sheet.flag(STACK_ROW, 9));
    }
}

pub struct HrSection;

impl SectionExtractor for HrSection {
    fn name(&self) -> &'static str {
        "hr"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_decimal("hr_sections", sheet.decimal(HR_ROW, 3));
        record.set_decimal("hr_diam_in", sheet.decimal(HR_ROW, 5));
        record.set_text("hr_tubes", sheet.text(HR_ROW, 7));
        record.set_text("hr_material", sheet.text(HR_ROW, 9));
    }
}
