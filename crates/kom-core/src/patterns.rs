//! Regex patterns applied to extracted text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Job number: five digits not touching other digits
    pub static ref JOB_NUMBER: Regex = Regex::new(
        r"(?:^|\D)(\d{5})(?:\D|$)"
    ).unwrap();

    pub static ref JOB_NUMBER_LOOSE: Regex = Regex::new(
        r"\d{5}"
    ).unwrap();
}

/// Pull the 5-digit job number out of a proposal number.
///
/// ```
/// use kom_core::patterns::extract_job_number;
///
/// assert_eq!(extract_job_number("P-35371-A").as_deref(), Some("35371"));
/// assert_eq!(extract_job_number("Rev 2"), None);
/// ```
pub fn extract_job_number(proposal: &str) -> Option<String> {
    if let Some(caps) = JOB_NUMBER.captures(proposal) {
        return Some(caps[1].to_string());
    }

    JOB_NUMBER_LOOSE
        .find(proposal)
        .map(|m| m.as_str().to_string())
}
