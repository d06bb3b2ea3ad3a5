//! Section extractors.
//!
//! Each extractor reads one logical block of the KOM form into the record.
//! They never fail and never look at each other's output; the extractor
//! runs them in the order returned by [`default_sections`].

mod engineering;
mod equipment;
mod financials;
mod heaters;
mod labor;
mod line_items;
mod milestones;
mod notes;
mod parties;
mod pumps;
mod sales;
mod shipping;
mod specs;
mod stack;
mod steam;
mod tanks;
mod tax;
mod utilities;

pub use engineering::EngineeringSection;
pub use equipment::{OtherEquipmentSection, PanelSection, SoftenerSection};
pub use financials::CapitalInstallSection;
pub use heaters::HeatersSection;
pub use labor::LaborSection;
pub use line_items::LineItemsSection;
pub use milestones::PaymentMilestonesSection;
pub use notes::NotesSection;
pub use parties::PartiesSection;
pub use pumps::PumpsSection;
pub use sales::SalesSection;
pub use shipping::ShippingSection;
pub use specs::SpecificationsSection;
pub use stack::{HrSection, StackSection};
pub use steam::SteamHeatersSection;
pub use tanks::TanksSection;
pub use tax::TaxSection;
pub use utilities::UtilitiesSection;

use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

/// Reads one block of the form into the record.
pub trait SectionExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fill this section's fields. Must not fail.
    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, log: &mut ValidationLog);
}

/// All sections in extraction order.
pub fn default_sections() -> Vec<Box<dyn SectionExtractor>> {
    vec![
        Box::new(SalesSection),
        Box::new(PartiesSection),
        Box::new(TaxSection),
        Box::new(PaymentMilestonesSection),
        Box::new(ShippingSection),
        Box::new(SpecificationsSection),
        Box::new(HeatersSection),
        Box::new(StackSection),
        Box::new(HrSection),
        Box::new(TanksSection),
        Box::new(PumpsSection),
        Box::new(SteamHeatersSection),
        Box::new(SoftenerSection),
        Box::new(PanelSection),
        Box::new(OtherEquipmentSection),
        Box::new(UtilitiesSection),
        Box::new(NotesSection),
        Box::new(LineItemsSection),
        Box::new(LaborSection),
        Box::new(CapitalInstallSection),
        Box::new(EngineeringSection),
    ]
}

/// Join the non-empty parts with `sep`.
pub(crate) fn join_nonempty(parts: &[String], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
