//! Free-form notes and project identification.

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

pub struct NotesSection;

impl SectionExtractor for NotesSection {
    fn name(&self) -> &'static str {
        "notes/project"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        let notes = sheet.text(116, 3);
        let other_info = sheet.text(118, 2);
        let combined = if other_info.is_empty() {
            notes
        } else {
            format!("{}\n{}", notes, other_info).trim().to_string()
        };
        record.set_text("notes", combined);

        record.set_text("project_name", sheet.text(123, 4));
        record.set_text("project_type", sheet.text(123, 8));
    }
}
