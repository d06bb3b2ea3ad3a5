//! In-memory sheets shaped like the KOM template.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::grid::{CellValue, SheetGrid};
use crate::models::FieldValue;

/// Builds a grid and, alongside, the record values it should produce.
#[derive(Default)]
struct Template {
    grid: SheetGrid,
    expected: Vec<(&'static str, FieldValue)>,
}

impl Template {
    fn cell(&mut self, row: u32, col: u32, value: impl Into<CellValue>) -> &mut Self {
        self.grid.set(row, col, value);
        self
    }

    fn expect(&mut self, field: &'static str, value: FieldValue) -> &mut Self {
        self.expected.push((field, value));
        self
    }

    fn text(&mut self, row: u32, col: u32, field: &'static str, value: &str) -> &mut Self {
        self.cell(row, col, value)
            .expect(field, FieldValue::Text(value.to_string()))
    }

    fn decimal(
        &mut self,
        row: u32,
        col: u32,
        field: &'static str,
        value: impl Into<CellValue>,
        expected: &str,
    ) -> &mut Self {
        self.cell(row, col, value)
            .expect(field, FieldValue::Decimal(Some(dec(expected))))
    }

    fn flag(&mut self, row: u32, col: u32, field: &'static str, value: &str, expected: bool) -> &mut Self {
        self.cell(row, col, value).expect(field, FieldValue::Bool(expected))
    }

    fn date(
        &mut self,
        row: u32,
        col: u32,
        field: &'static str,
        value: impl Into<CellValue>,
        expected: (i32, u32, u32),
    ) -> &mut Self {
        let (y, m, d) = expected;
        self.cell(row, col, value)
            .expect(field, FieldValue::Date(NaiveDate::from_ymd_opt(y, m, d)))
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn canonical() -> Template {
    let mut t = Template::default();

    t.cell(1, 1, "TO BE COMPLETED BY SALES");

    // sales and commission
    t.cell(2, 2, "Proposal #:")
        .text(2, 3, "proposal_number", "35371-R2")
        .expect("job_number", FieldValue::Text("35371".to_string()))
        .cell(2, 5, "Proposal Date:")
        .date(2, 6, "proposal_date", NaiveDate::from_ymd_opt(2025, 9, 19).unwrap(), (2025, 9, 19))
        .cell(2, 7, "Sales Rep:")
        .text(2, 8, "sales_rep", "JOHN O'HEHIR")
        .cell(2, 10, "Date of OC:")
        .date(2, 11, "date_of_oc", "10/01/2025", (2025, 10, 1));
    t.cell(4, 2, "Industry:")
        .text(4, 3, "industry", "FOOD & BEVERAGE")
        .cell(4, 4, "Subcategory:")
        .text(4, 5, "industry_subcategory", "MEAT PROCESSING")
        .cell(4, 7, "Discount:")
        .decimal(4, 8, "discount", 5.0, "5")
        .cell(4, 9, "%")
        .cell(4, 10, "PO#:")
        .text(4, 11, "po_number", "PO-7781");
    t.cell(6, 3, "Comm #1 Inside:")
        .decimal(6, 4, "comm_1_inside_percent", "2%", "2")
        .cell(6, 5, "Name:")
        .text(6, 6, "comm_1_inside_name", "ALICE SMITH")
        .cell(6, 9, "Outside $:")
        .decimal(6, 10, "comm_outside_amount", "$1,500.00", "1500.00");
    t.cell(8, 3, "Comm #2 Inside:")
        .decimal(8, 4, "comm_2_inside_percent", 1.5, "1.5")
        .cell(8, 5, "Name:")
        .text(8, 6, "comm_2_inside_name", "BOB JONES")
        .cell(8, 8, "Outside Name:")
        .text(8, 9, "comm_outside_name", "REP GROUP LLC");

    // bill-to / ship-to
    t.cell(10, 2, "BILL TO").cell(10, 6, "SHIP TO");
    t.text(12, 2, "bill_to_name", "JANE DOE")
        .text(14, 2, "bill_to_phone", "216-555-0100")
        .text(16, 2, "bill_to_email", "ap@acme.com")
        .text(18, 2, "bill_to_company", "ACME FOODS")
        .text(20, 2, "bill_to_address", "100 MAIN ST")
        .cell(22, 2, "City:")
        .text(22, 3, "bill_to_city", "CLEVELAND")
        .cell(24, 2, "State/Zip:")
        .text(24, 3, "bill_to_state", "OH")
        .cell(24, 4, 44113.0)
        .expect("bill_to_zip", FieldValue::Text("44113".to_string()));
    t.text(12, 6, "ship_to_name", "JOHN ROE")
        .text(14, 6, "ship_to_phone", "216-555-0199")
        .text(16, 6, "ship_to_email", "dock@acme.com")
        .text(18, 6, "ship_to_company", "ACME PLANT 2")
        .text(20, 6, "ship_to_address", "200 INDUSTRIAL PKWY")
        .text(22, 6, "ship_to_city", "AKRON")
        .text(24, 6, "ship_to_state", "OH")
        .text(24, 9, "ship_to_zip", "44301");

    // tax
    t.cell(26, 3, "Tax Exempt:")
        .flag(26, 4, "tax_exempt", "YES", true)
        .cell(26, 7, "Cert In Hand:")
        .flag(26, 8, "exempt_cert_in_hand", "Y", true)
        .cell(26, 10, "Who:")
        .text(26, 11, "tax_action_who", "SALES")
        .cell(27, 10, "When:")
        .date(27, 11, "tax_action_when", "10/15/25", (2025, 10, 15));
    t.cell(30, 3, "Tax Status Noted:")
        .flag(30, 4, "confirm_tax_status_noted", "TRUE", true)
        .cell(30, 5, "In Sage:")
        .flag(30, 6, "customer_in_sage", "1", true);

    // payment milestones
    t.cell(32, 1, "PAYMENT MILESTONES");
    let milestones: [(&str, &str, &str, &str, &str); 5] = [
        ("ORDER", "30%", "30", "NET 30", "DOWN PAYMENT"),
        ("APPROVAL", "30", "30", "NET 30", "ON APPROVED DRAWINGS"),
        ("SHIPMENT", "20%", "20", "NET 30", "BEFORE SHIPMENT"),
        ("STARTUP", "10%", "10", "NET 45", "AFTER STARTUP"),
        ("RETAINAGE", "10%", "10", "NET 60", "HOLDBACK"),
    ];
    for (i, (event, cell, percent, terms, notes)) in milestones.into_iter().enumerate() {
        let row = 33 + i as u32;
        let n = i + 1;
        t.cell(row, 1, format!("#{}:", n))
            .cell(row, 3, event)
            .cell(row, 4, cell)
            .cell(row, 5, terms)
            .cell(row, 6, notes);
        t.expect(field(&format!("payment_milestone_{n}_event")), FieldValue::Text(event.to_string()))
            .expect(field(&format!("payment_milestone_{n}_percent")), FieldValue::Decimal(Some(dec(percent))))
            .expect(field(&format!("payment_milestone_{n}_terms")), FieldValue::Text(terms.to_string()))
            .expect(field(&format!("payment_milestone_{n}_notes")), FieldValue::Text(notes.to_string()));
    }

    // parties, shipping
    t.cell(43, 2, "Consultant:")
        .text(43, 3, "consultant", "SMITH ENGINEERING")
        .cell(43, 5, "Contractor:")
        .text(43, 6, "contractor_name", "BUILD CO")
        .cell(45, 2, "Desired Delivery:")
        .text(45, 3, "desired_delivery", "Q1 2026");
    t.cell(48, 2, "Freight:")
        .text(48, 3, "freight", "PREPAID & ADD")
        .cell(48, 5, "International:")
        .flag(48, 6, "international", "NO", false)
        .cell(48, 9, "Method:")
        .text(48, 10, "international_freight_method", "Air Freight")
        .cell(50, 2, "Instructions:")
        .text(50, 3, "shipping_instructions", "CALL 24HR BEFORE DELIVERY");

    // specifications and approval
    t.cell(53, 3, "Specs Provided:")
        .flag(53, 4, "specifications_provided", "YES", true)
        .cell(53, 5, "Agreed:")
        .flag(53, 6, "specifications_agreed", "Y", true)
        .cell(53, 9, "LDs:")
        .flag(53, 10, "liquidated_damages", "NO", false)
        .cell(54, 9, "Rate/Cap:")
        .text(54, 10, "liquidated_damages_rate_cap", "0.5%/WK, 10% CAP")
        .cell(55, 2, "Passivation:")
        .flag(55, 3, "passivation", "YES", true)
        .cell(55, 5, "In/Out/Both:")
        .text(55, 6, "passivation_in_out_both", "BOTH");
    t.cell(57, 6, "Approval Prints:")
        .text(57, 7, "approval_prints_ll_mech", "LL & Mech: 10/17/25 ; Elect: 10/22/25")
        .expect("approval_prints_elect", FieldValue::Text("10/22/25".to_string()))
        .cell(58, 3, "Required:")
        .flag(58, 4, "approval_prints_required", "YES", true)
        .cell(58, 5, "Electrical:")
        .flag(58, 6, "approval_prints_electrical", "YES", true)
        .cell(59, 5, "Eng Order Prior:")
        .flag(59, 6, "engineering_order_prior_to_approval", "NO", false);

    // heater units
    let heaters: [(u32, f64, &str, &str, &str, &str, &str, &str); 2] = [
        (61, 1.0, "DIRECT FIRED", "LOW NOX", "4MM", "PUMP", "316SS", "HTR - 1"),
        (65, 2.0, "INDIRECT", "STANDARD", "2MM", "GRAVITY", "304SS", "HTR - 2"),
    ];
    for (i, (row, qty, kind, emissions, size, pump_grav, material, marker)) in
        heaters.into_iter().enumerate()
    {
        let n = i + 1;
        t.cell(row, 1, marker)
            .cell(row, 3, "Qty:")
            .cell(row, 4, qty)
            .cell(row, 5, "Type:")
            .cell(row, 6, kind)
            .cell(row, 8, "Emissions:")
            .cell(row, 9, emissions)
            .cell(row + 2, 1, "Size:")
            .cell(row + 2, 2, size)
            .cell(row + 2, 3, "BTU/HR")
            .cell(row + 2, 5, "Pump/Grav:")
            .cell(row + 2, 6, pump_grav)
            .cell(row + 2, 7, "Mat'l:")
            .cell(row + 2, 8, material);
        t.expect(field(&format!("htr_{n}_qty")), FieldValue::Decimal(Some(Decimal::from(n as i64))))
            .expect(field(&format!("htr_{n}_type")), FieldValue::Text(kind.to_string()))
            .expect(field(&format!("htr_{n}_emissions")), FieldValue::Text(emissions.to_string()))
            .expect(field(&format!("htr_{n}_size")), FieldValue::Text(format!("{} BTU/HR", size)))
            .expect(field(&format!("htr_{n}_pump_grav")), FieldValue::Text(pump_grav.to_string()))
            .expect(field(&format!("htr_{n}_material")), FieldValue::Text(material.to_string()));
    }

    // stack economizer, stack, heat recovery
    t.cell(69, 1, "STK ECON")
        .cell(69, 2, "Size (BHP):")
        .text(69, 3, "stk_econ_size_bhp", "150 BHP")
        .cell(69, 5, "Pump/Grav:")
        .text(69, 6, "stk_econ_pump_grav", "PUMP")
        .cell(69, 7, "Mat'l:")
        .text(69, 8, "stk_econ_material", "CS");
    t.cell(71, 1, "STACK(S)")
        .cell(71, 3, "Length (ft):")
        .decimal(71, 4, "stack_length_ft", 20.0, "20")
        .cell(71, 5, "Total:")
        .text(71, 6, "stack_total", "2")
        .cell(71, 8, "Caps:")
        .flag(71, 9, "stack_caps", "YES", true);
    t.cell(73, 1, "HR")
        .cell(73, 2, "Sections:")
        .decimal(73, 3, "hr_sections", 4.0, "4")
        .cell(73, 4, "Diam (in):")
        .decimal(73, 5, "hr_diam_in", 24.0, "24")
        .cell(73, 6, "Tubes:")
        .text(73, 7, "hr_tubes", "48")
        .cell(73, 8, "Mat'l:")
        .text(73, 9, "hr_material", "304SS");

    // tanks
    t.cell(75, 1, "TANKS");
    let tanks: [(&str, f64, f64, &str, &str); 3] = [
        ("ATMOSPHERIC", 96.0, 10.0, "10", "304SS"),
        ("CONE BOTTOM", 72.0, 8.0, "12", "316SS"),
        ("PRESSURE", 48.0, 6.0, "7", "CS"),
    ];
    for (i, (kind, dia, height, ga, material)) in tanks.into_iter().enumerate() {
        let row = 77 + 2 * i as u32;
        let n = i + 1;
        t.cell(row, 1, format!("#{}:", n))
            .cell(row, 2, "Type:")
            .cell(row, 3, kind)
            .cell(row, 4, "Dia (in):")
            .cell(row, 5, dia)
            .cell(row, 6, "Ht (ft):")
            .cell(row, 7, height)
            .cell(row, 8, "GA:")
            .cell(row, 9, ga)
            .cell(row, 10, "Mat'l:")
            .cell(row, 11, material);
        t.expect(field(&format!("tank_{n}_type")), FieldValue::Text(kind.to_string()))
            .expect(field(&format!("tank_{n}_dia_in")), FieldValue::Decimal(Some(dec(&dia.to_string()))))
            .expect(field(&format!("tank_{n}_ht_ft")), FieldValue::Decimal(Some(dec(&height.to_string()))))
            .expect(field(&format!("tank_{n}_ga")), FieldValue::Text(ga.to_string()))
            .expect(field(&format!("tank_{n}_material")), FieldValue::Text(material.to_string()));
    }

    // pumps
    t.cell(83, 1, "PUMPS")
        .cell(83, 2, "Packaging:")
        .text(83, 3, "pump_packaging", "SKID")
        .cell(83, 5, "Piping:")
        .text(83, 6, "pump_piping_material", "CPVC");
    let pumps: [(&str, f64, &str, &str); 4] = [
        ("CENTRIFUGAL", 2.0, "120", "85.5"),
        ("TRANSFER", 1.0, "40", "30"),
        ("DOSING", 1.0, "2.5", "100"),
        ("SUMP", 1.0, "60", "25"),
    ];
    for (i, (kind, qty, flow, tdh)) in pumps.into_iter().enumerate() {
        let row = 85 + 2 * i as u32;
        let n = i + 1;
        t.cell(row, 1, format!("#{}:", n))
            .cell(row, 2, "Type:")
            .cell(row, 3, kind)
            .cell(row, 4, "Qty:")
            .cell(row, 5, qty)
            .cell(row, 6, "Flow (gpm):")
            .cell(row, 7, flow)
            .cell(row, 8, "TDH (ft):")
            .cell(row, 9, tdh);
        t.expect(field(&format!("pump_{n}_type")), FieldValue::Text(kind.to_string()))
            .expect(field(&format!("pump_{n}_qty")), FieldValue::Decimal(Some(dec(&qty.to_string()))))
            .expect(field(&format!("pump_{n}_flow_gpm")), FieldValue::Decimal(Some(dec(flow))))
            .expect(field(&format!("pump_{n}_tdh_ft")), FieldValue::Decimal(Some(dec(tdh))));
    }

    // steam heaters
    t.cell(93, 1, "STEAM HEATERS");
    let steam: [(&str, &str, &str, &str, &str); 2] = [
        ("12x120", "12", "120", "CS", "PNEUMATIC"),
        ("10 x 96", "10", "96", "316SS", "MANUAL"),
    ];
    for (i, (dims, dia, length, material, valve)) in steam.into_iter().enumerate() {
        let row = 94 + 2 * i as u32;
        let n = i + 1;
        t.cell(row, 1, format!("#{}:", n))
            .cell(row, 3, "Dia(in) x L(in):")
            .cell(row, 4, dims)
            .cell(row, 5, "Mat'l:")
            .cell(row, 6, material)
            .cell(row, 8, "Valve:")
            .cell(row, 9, valve);
        t.expect(field(&format!("steam_heater_{n}_dia_in")), FieldValue::Decimal(Some(dec(dia))))
            .expect(field(&format!("steam_heater_{n}_length_in")), FieldValue::Decimal(Some(dec(length))))
            .expect(field(&format!("steam_heater_{n}_material")), FieldValue::Text(material.to_string()))
            .expect(field(&format!("steam_heater_{n}_valve_type")), FieldValue::Text(valve.to_string()));
    }

    // softener, panel, other
    t.cell(99, 1, "SOFTENER")
        .cell(99, 2, "ASME:")
        .flag(99, 3, "softener_asme_coded", "YES", true)
        .cell(99, 5, "Tank:")
        .text(99, 6, "softener_tank_material", "FRP")
        .cell(99, 8, "Face Piping:")
        .text(99, 9, "softener_face_plumbing_material", "PVC");
    t.cell(102, 1, "PANEL(S)")
        .cell(102, 2, "Qty:")
        .decimal(102, 3, "panel_qty", 1.0, "1")
        .cell(102, 5, "PLC:")
        .text(102, 6, "panel_plc", "ALLEN BRADLEY")
        .cell(102, 8, "Split Volt:")
        .text(102, 9, "panel_split_volt", "480/120");
    t.cell(105, 1, "OTHER")
        .flag(105, 2, "other_vent_condenser", "Vent Condenser", true)
        .flag(105, 4, "other_shaker_screen", "Shaker Screen", true);

    // utilities
    t.cell(107, 7, "City Water Meter (in):")
        .decimal(107, 8, "city_water_meter_in", 2.0, "2")
        .cell(109, 2, "Electrical:")
        .text(109, 3, "electrical", "480V/3PH/60HZ")
        .cell(109, 5, "Fuel:")
        .text(109, 6, "fuel_type", "NATURAL GAS")
        .cell(109, 8, "Gas Pressure:")
        .cell(109, 9, 7.0)
        .cell(109, 10, "IN WC")
        .expect("gas_pressure_psi", FieldValue::Text("7 IN WC".to_string()))
        .cell(111, 4, "Onsite Supply (in):")
        .decimal(111, 5, "onsite_gas_supply_diameter_in", 2.0, "2")
        .cell(111, 8, "Gas Train:")
        .text(111, 9, "gas_train_orientation", "LEFT HAND")
        .cell(113, 7, "Match Proposal:")
        .flag(113, 8, "utilities_match_proposal", "YES", true);

    // notes and project
    t.cell(116, 2, "Notes:")
        .cell(116, 3, "RUSH ORDER")
        .cell(118, 1, "Other Info:")
        .cell(118, 2, "CUSTOMER WILL INSTALL")
        .expect("notes", FieldValue::Text("RUSH ORDER\nCUSTOMER WILL INSTALL".to_string()))
        .cell(123, 3, "Project Name:")
        .text(123, 4, "project_name", "PLANT 2 WASHER")
        .cell(123, 7, "Project Type:")
        .text(123, 8, "project_type", "NEW INSTALL");

    line_items_and_labor(&mut t);
    t.cell(142, 2, "HR:")
        .text(142, 3, "labor_hr", "24")
        .cell(143, 2, "PKG:")
        .decimal(143, 3, "labor_pkg", 40.0, "40")
        .cell(144, 2, "FAB:")
        .decimal(144, 3, "labor_fab", 16.0, "16")
        .cell(145, 2, "WIRING:")
        .decimal(145, 3, "labor_wiring", 8.5, "8.5");

    // capital and install
    t.cell(147, 1, "CAPITAL").cell(147, 6, "INSTALL");
    t.cell(149, 2, "Sell Price:")
        .decimal(149, 3, "capital_sell_price", "$34,447.00", "34447.00")
        .cell(149, 7, "Sell Price:")
        .decimal(149, 8, "install_sell_price", 5200.0, "5200")
        .cell(151, 2, "Equip Cost:")
        .decimal(151, 3, "capital_equip_cost", 20000.0, "20000")
        .cell(151, 7, "Install Cost:")
        .decimal(151, 8, "install_cost", 3100.0, "3100")
        .cell(153, 2, "Freight:")
        .decimal(153, 3, "capital_freight", 1200.0, "1200")
        .cell(154, 7, "Trips:")
        .cell(154, 8, 2.0)
        .expect("install_trips", FieldValue::Integer(Some(2)))
        .cell(155, 2, "Startup Cost:")
        .decimal(155, 4, "capital_startup_cost", 1500.0, "1500")
        .cell(155, 7, "Days:")
        .cell(155, 8, "5")
        .expect("install_days", FieldValue::Integer(Some(5)))
        .cell(156, 2, "Protect:")
        .decimal(156, 3, "capital_protect_cost", 500.0, "500")
        .cell(157, 2, "Net Revenue:")
        .decimal(157, 3, "capital_net_revenue", 11247.0, "11247")
        .cell(157, 7, "Net Revenue:")
        .decimal(157, 8, "install_net_revenue", 2100.0, "2100");

    // engineering checklist
    t.cell(159, 1, "TO BE COMPLETED BY ENG")
        .flag(161, 3, "eng_weld_in_out", "YES", true)
        .flag(161, 6, "eng_height_greater_than_20ft", "NO", false)
        .flag(161, 9, "eng_crane_reqd", "YES", true)
        .flag(163, 3, "eng_hi_temp_htr", "Y", true)
        .flag(163, 6, "eng_large_hp_or_excessive_ll_pumps", "N", false)
        .flag(163, 9, "eng_generator_need", "TRUE", true)
        .flag(165, 3, "eng_special_testing_reqd", "NO", false)
        .flag(165, 6, "eng_extra_forklift_or_scissor_lift_reqd", "YES", true);

    t
}

/// Line-item table, labor header and the equipment-required rows.
fn line_items_and_labor(t: &mut Template) {
    t.cell(125, 1, "TO BE COMPLETED BY APPS")
        .cell(126, 1, "ITEM")
        .cell(126, 3, "DESCRIPTION");
    let items: [(&str, &str, f64); 3] = [
        ("35371-01", "WASHER SYSTEM", 243.9),
        ("35371-02", "CONTROL PANEL", 50.0),
        ("35371-03", "STARTUP SERVICE", 8.0),
    ];
    for (i, (item, description, value)) in items.into_iter().enumerate() {
        let row = 127 + i as u32;
        t.cell(row, 1, item).cell(row, 3, description).cell(row, 6, value);
    }

    t.cell(141, 1, "LABOR HOURS").cell(141, 6, "EQUIPMENT REQUIRED");
    let equipment: [(u32, &str, f64, &str, &str); 3] = [
        (143, "Burner", 2.0, "890-01-012", "BURNER, GAS, EB-7"),
        (144, "Blower", 1.0, "890-02-100", "BLOWER, 5HP"),
        (145, "Media", 153.0, "890-03-001", "MEDIA, PLASTIC"),
    ];
    for (row, kind, qty, kn, description) in equipment {
        t.cell(row, 6, kind)
            .cell(row, 7, qty)
            .cell(row, 8, kn)
            .cell(row, 9, description);
    }
}

/// Field names are static in the schema; tests only need a `'static` str.
fn field(name: &str) -> &'static str {
    crate::models::schema()
        .iter()
        .find(|(n, _)| n == name)
        .map(|(n, _)| n.as_str())
        .unwrap_or_else(|| panic!("undeclared field {name}"))
}

/// A sheet following the template exactly, every field filled.
pub(crate) fn canonical_grid() -> SheetGrid {
    canonical().grid
}

/// The values extraction of [`canonical_grid`] must produce.
pub(crate) fn canonical_values() -> Vec<(&'static str, FieldValue)> {
    canonical().expected
}

/// A sparsely filled sheet: proposal 35371 with three line items and three
/// equipment rows.
pub(crate) fn scenario_grid() -> SheetGrid {
    let mut t = Template::default();
    t.cell(2, 2, "Proposal #:")
        .cell(2, 3, "35371")
        .cell(2, 5, "Proposal Date:")
        .cell(2, 6, "9/19/25")
        .cell(2, 7, "Sales Rep:")
        .cell(2, 8, "JOHN O'HEHIR")
        .cell(4, 7, "Discount:")
        .cell(4, 8, "5")
        .cell(4, 9, "%");
    line_items_and_labor(&mut t);
    t.grid
}
