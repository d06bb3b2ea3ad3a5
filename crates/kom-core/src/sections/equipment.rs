//! Softener, panel and other-equipment rows.

use crate::coerce::parse_decimal;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

const SOFTENER_ROW: u32 = 99;
const PANEL_ROW: u32 = 102;
const OTHER_ROW: u32 = 105;

/// Answers that switch an "other" item off even though the cell is filled.
const NEGATIVE_TOKENS: &[&str] = &["NO", "N", "FALSE", "0", "-"];

pub struct SoftenerSection;

impl SectionExtractor for SoftenerSection {
    fn name(&self) -> &'static str {
        "softener"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_flag("softener_asme_coded", sheet.flag(SOFTENER_ROW, 3));
        record.set_text("softener_tank_material", sheet.text(SOFTENER_ROW, 6));
        record.set_text("softener_face_plumbing_material", sheet.text(SOFTENER_ROW, 9));
    }
}

pub struct PanelSection;

impl SectionExtractor for PanelSection {
    fn name(&self) -> &'static str {
        "panel"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_decimal("panel_qty", parse_decimal(&sheet.raw(PANEL_ROW, 3)));
        record.set_text("panel_plc", sheet.text(PANEL_ROW, 6));
        record.set_text("panel_split_volt", sheet.text(PANEL_ROW, 9));
    }
}

/// Vent condenser and shaker screen are ticked by writing anything in
/// their cell.
pub struct OtherEquipmentSection;

impl SectionExtractor for OtherEquipmentSection {
    fn name(&self) -> &'static str {
        "other equipment"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        record.set_flag("other_vent_condenser", is_ticked(&sheet.text(OTHER_ROW, 2)));
        record.set_flag("other_shaker_screen", is_ticked(&sheet.text(OTHER_ROW, 4)));
    }
}

fn is_ticked(text: &str) -> bool {
    !text.is_empty() && !NEGATIVE_TOKENS.contains(&text.to_uppercase().as_str())
}
