//! Non-fatal extraction warnings.

use tracing::warn;

/// Ordered list of warnings collected during one extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationLog {
    warnings: Vec<String>,
}

impl ValidationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// A section header was not found and its default row was used instead.
    pub fn section_defaulted(&mut self, keyword: &str, start: u32, end: u32, default_row: u32) {
        self.push(format!(
            "Section '{}' not found in rows {}-{}; using default row {}",
            keyword, start, end, default_row
        ));
    }

    /// A field the record cannot do without came out empty.
    pub fn critical_empty(&mut self, field: &str) {
        self.push(format!("Critical field '{}' is empty", field));
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.warnings
    }
}
