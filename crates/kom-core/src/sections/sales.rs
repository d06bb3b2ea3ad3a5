//! Sales and commission block at the top of the form.

use tracing::debug;

use crate::coerce::{parse_date, parse_decimal};
use crate::models::KomRecord;
use crate::patterns::extract_job_number;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

const HEADER_ROW: u32 = 2;
const INDUSTRY_ROW: u32 = 4;
const COMM_1_ROW: u32 = 6;
const COMM_2_ROW: u32 = 8;

pub struct SalesSection;

impl SectionExtractor for SalesSection {
    fn name(&self) -> &'static str {
        "sales"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog) {
        let proposal = sheet.locate_text(&sheet.fixed_or_label(HEADER_ROW, 3, "Proposal #"));
        let proposal_date = sheet.locate_raw(&sheet.fixed_or_label(HEADER_ROW, 6, "Proposal Date"));
        let sales_rep = sheet.locate_text(&sheet.fixed_or_label(HEADER_ROW, 8, "Sales Rep"));
        let date_of_oc = sheet.locate_raw(&sheet.fixed_or_label(HEADER_ROW, 11, "Date of OC"));

        record.set_date("proposal_date", parse_date(&proposal_date));
        record.set_text("sales_rep", sales_rep);
        record.set_date("date_of_oc", parse_date(&date_of_oc));

        record.set_text("industry", sheet.text(INDUSTRY_ROW, 3));
        record.set_text("industry_subcategory", sheet.text(INDUSTRY_ROW, 5));
        // the "%" sign sits in its own cell after the number
        record.set_decimal("discount", sheet.percent(INDUSTRY_ROW, 8));
        let po = sheet.locate_text(&sheet.fixed_or_label(INDUSTRY_ROW, 11, "PO#"));
        record.set_text("po_number", po);

        record.set_decimal("comm_1_inside_percent", sheet.percent(COMM_1_ROW, 4));
        record.set_text("comm_1_inside_name", sheet.text(COMM_1_ROW, 6));
        record.set_decimal("comm_outside_amount", parse_decimal(&sheet.raw(COMM_1_ROW, 10)));
        record.set_decimal("comm_2_inside_percent", sheet.percent(COMM_2_ROW, 4));
        record.set_text("comm_2_inside_name", sheet.text(COMM_2_ROW, 6));
        record.set_text("comm_outside_name", sheet.text(COMM_2_ROW, 9));

        if proposal.is_empty() {
            log.critical_empty("proposal_number");
        } else {
            match extract_job_number(&proposal) {
                Some(job) => {
                    debug!("Job number {} from proposal {}", job, proposal);
                    record.set_text("job_number", job);
                }
                None => log.push(format!(
                    "Could not extract 5-digit job number from proposal number: {}",
                    proposal
                )),
            }
        }
        record.set_text("proposal_number", proposal);
    }
}
