//! Capital and install figures.

use rust_decimal::Decimal;

use crate::coerce::{parse_count, parse_decimal};
use crate::locate::FieldLocator;
use crate::models::KomRecord;
use crate::sheet::Sheet;
use crate::validation::ValidationLog;

use super::SectionExtractor;

/// Capital labels live left of column 6, install labels right of it.
const CAPITAL_COLS: (u32, u32) = (1, 5);
const INSTALL_COLS: (u32, u32) = (6, 12);

/// (field, row, value column, label)
const CAPITAL: [(&str, u32, u32, &str); 6] = [
    ("capital_sell_price", 149, 3, "Sell Price"),
    ("capital_equip_cost", 151, 3, "Equip Cost"),
    ("capital_freight", 153, 3, "Freight"),
    ("capital_startup_cost", 155, 4, "Startup"),
    ("capital_protect_cost", 156, 3, "Protect"),
    ("capital_net_revenue", 157, 3, "Net Revenue"),
];

const INSTALL: [(&str, u32, u32, &str); 3] = [
    ("install_sell_price", 149, 8, "Sell Price"),
    ("install_cost", 151, 8, "Install Cost"),
    ("install_net_revenue", 157, 8, "Net Revenue"),
];

const INSTALL_TRIPS: (u32, u32, &str) = (154, 8, "Trips");
const INSTALL_DAYS: (u32, u32, &str) = (155, 8, "Days");

pub struct CapitalInstallSection;

impl SectionExtractor for CapitalInstallSection {
    fn name(&self) -> &'static str {
        "capital/install"
    }

    fn extract(&self, sheet: &Sheet<'_>, record: &mut KomRecord, _log: &mut ValidationLog) {
        for (field, row, col, label) in CAPITAL {
            record.set_decimal(field, amount(sheet, row, col, label, CAPITAL_COLS));
        }
        for (field, row, col, label) in INSTALL {
            record.set_decimal(field, amount(sheet, row, col, label, INSTALL_COLS));
        }

        let (row, col, label) = INSTALL_TRIPS;
        record.set_integer("install_trips", count(sheet, row, col, label));
        let (row, col, label) = INSTALL_DAYS;
        record.set_integer("install_days", count(sheet, row, col, label));
    }
}

fn locator(row: u32, col: u32, label: &str, (first, last): (u32, u32)) -> FieldLocator {
    FieldLocator::new().fixed(row, col).label(row, label, first, last)
}

fn amount(sheet: &Sheet<'_>, row: u32, col: u32, label: &str, window: (u32, u32)) -> Option<Decimal> {
    parse_decimal(&sheet.locate_raw(&locator(row, col, label, window)))
}

fn count(sheet: &Sheet<'_>, row: u32, col: u32, label: &str) -> Option<i64> {
    parse_count(&sheet.locate_text(&locator(row, col, label, INSTALL_COLS)))
}
