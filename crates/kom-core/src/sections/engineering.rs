//! Engineering checklist at the bottom of the form.

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

const CHECKLIST: [(&str, u32, u32); 8] = [
    ("eng_weld_in_out", 161, 3),
    ("eng_height_greater_than_20ft", 161, 6),
    ("eng_crane_reqd", 161, 9),
    ("eng_hi_temp_htr", 163, 3),
    ("eng_large_hp_or_excessive_ll_pumps", 163, 6),
    ("eng_generator_need", 163, 9),
    ("eng_special_testing_reqd", 165, 3),
    ("eng_extra_forklift_or_scissor_lift_reqd", 165, 6),
];

pub struct EngineeringSection;

impl SectionExtractor for EngineeringSection {
    fn name(&self) -> &'static str {
        "engineering"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        for (field, row, col) in CHECKLIST {
            record.set_flag(field, sheet.flag(row, col));
        }
    }
}
