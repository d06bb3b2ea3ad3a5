//! The extracted KOM record.
//!
//! Scalar fields live in a name-keyed map seeded from a static schema, so
//! every declared field is present in the output even when nothing was
//! found for it. The map is ordered, which keeps serialized output stable
//! across runs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Type of a declared scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Decimal,
    Bool,
    Date,
    Integer,
}

impl FieldKind {
    /// Value a field of this kind holds before anything is extracted.
    pub fn empty(self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Decimal => FieldValue::Decimal(None),
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::Date => FieldValue::Date(None),
            FieldKind::Integer => FieldValue::Integer(None),
        }
    }
}

/// A typed scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Decimal(Option<Decimal>),
    Bool(bool),
    Date(Option<NaiveDate>),
    Integer(Option<i64>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Integer(_) => FieldKind::Integer,
        }
    }
}

/// Decimals are written as JSON numbers and dates as `YYYY-MM-DD`.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Decimal(Some(d)) => rust_decimal::serde::float::serialize(d, serializer),
            FieldValue::Date(Some(d)) => serializer.collect_str(&d.format("%Y-%m-%d")),
            FieldValue::Integer(Some(i)) => serializer.serialize_i64(*i),
            FieldValue::Decimal(None) | FieldValue::Date(None) | FieldValue::Integer(None) => {
                serializer.serialize_none()
            }
        }
    }
}

/// One row of the line-item table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub item_number: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub value_1: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub value_2: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub value_3: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub value_4: Option<Decimal>,
}

/// One required piece of equipment (burner, blower, media).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentRequired {
    pub equipment_type: String,
    pub qty: Option<i64>,
    pub kn_number: String,
    pub description: String,
}

lazy_static! {
    static ref SCHEMA: Vec<(String, FieldKind)> = build_schema();
}

/// Every declared scalar field with its kind.
pub fn schema() -> &'static [(String, FieldKind)] {
    &SCHEMA
}

fn build_schema() -> Vec<(String, FieldKind)> {
    use FieldKind::*;

    let mut fields: Vec<(String, FieldKind)> = Vec::new();
    let mut add = |name: String, kind: FieldKind| fields.push((name, kind));

    for (name, kind) in [
        ("proposal_number", Text),
        ("proposal_date", Date),
        ("sales_rep", Text),
        ("date_of_oc", Date),
        ("industry", Text),
        ("industry_subcategory", Text),
        ("discount", Decimal),
        ("po_number", Text),
        ("job_number", Text),
        ("comm_1_inside_percent", Decimal),
        ("comm_1_inside_name", Text),
        ("comm_2_inside_percent", Decimal),
        ("comm_2_inside_name", Text),
        ("comm_outside_amount", Decimal),
        ("comm_outside_name", Text),
    ] {
        add(name.to_string(), kind);
    }

    for party in ["bill_to", "ship_to"] {
        for part in ["name", "phone", "email", "company", "address", "city", "state", "zip"] {
            add(format!("{party}_{part}"), Text);
        }
    }

    for (name, kind) in [
        ("tax_exempt", Bool),
        ("exempt_cert_in_hand", Bool),
        ("tax_action_who", Text),
        ("tax_action_when", Date),
        ("confirm_tax_status_noted", Bool),
        ("customer_in_sage", Bool),
    ] {
        add(name.to_string(), kind);
    }

    for i in 1..=5 {
        add(format!("payment_milestone_{i}_event"), Text);
        add(format!("payment_milestone_{i}_percent"), Decimal);
        add(format!("payment_milestone_{i}_terms"), Text);
        add(format!("payment_milestone_{i}_notes"), Text);
    }

    for (name, kind) in [
        ("consultant", Text),
        ("contractor_name", Text),
        ("desired_delivery", Text),
        ("freight", Text),
        ("international", Bool),
        ("international_freight_method", Text),
        ("shipping_instructions", Text),
        ("specifications_provided", Bool),
        ("specifications_agreed", Bool),
        ("liquidated_damages", Bool),
        ("liquidated_damages_rate_cap", Text),
        ("passivation", Bool),
        ("passivation_in_out_both", Text),
        ("approval_prints_ll_mech", Text),
        ("approval_prints_elect", Text),
        ("approval_prints_required", Bool),
        ("approval_prints_electrical", Bool),
        ("engineering_order_prior_to_approval", Bool),
    ] {
        add(name.to_string(), kind);
    }

    for i in 1..=2 {
        add(format!("htr_{i}_qty"), Decimal);
        for part in ["type", "emissions", "size", "pump_grav", "material"] {
            add(format!("htr_{i}_{part}"), Text);
        }
    }

    for (name, kind) in [
        ("stk_econ_size_bhp", Text),
        ("stk_econ_pump_grav", Text),
        ("stk_econ_material", Text),
        ("stack_length_ft", Decimal),
        ("stack_total", Text),
        ("stack_caps", Bool),
        ("hr_sections", Decimal),
        ("hr_diam_in", Decimal),
        ("hr_tubes", Text),
        ("hr_material", Text),
    ] {
        add(name.to_string(), kind);
    }

    for i in 1..=3 {
        add(format!("tank_{i}_type"), Text);
        add(format!("tank_{i}_dia_in"), Decimal);
        add(format!("tank_{i}_ht_ft"), Decimal);
        add(format!("tank_{i}_ga"), Text);
        add(format!("tank_{i}_material"), Text);
    }

    add("pump_packaging".to_string(), Text);
    add("pump_piping_material".to_string(), Text);
    for i in 1..=4 {
        add(format!("pump_{i}_type"), Text);
        add(format!("pump_{i}_qty"), Decimal);
        add(format!("pump_{i}_flow_gpm"), Decimal);
        add(format!("pump_{i}_tdh_ft"), Decimal);
    }

    for i in 1..=2 {
        add(format!("steam_heater_{i}_dia_in"), Decimal);
        add(format!("steam_heater_{i}_length_in"), Decimal);
        add(format!("steam_heater_{i}_material"), Text);
        add(format!("steam_heater_{i}_valve_type"), Text);
    }

    for (name, kind) in [
        ("softener_asme_coded", Bool),
        ("softener_tank_material", Text),
        ("softener_face_plumbing_material", Text),
        ("panel_qty", Decimal),
        ("panel_plc", Text),
        ("panel_split_volt", Text),
        ("other_vent_condenser", Bool),
        ("other_shaker_screen", Bool),
        ("city_water_meter_in", Decimal),
        ("electrical", Text),
        ("fuel_type", Text),
        ("gas_pressure_psi", Text),
        ("onsite_gas_supply_diameter_in", Decimal),
        ("gas_train_orientation", Text),
        ("utilities_match_proposal", Bool),
        ("notes", Text),
        ("project_name", Text),
        ("project_type", Text),
        ("labor_hr", Text),
        ("labor_pkg", Decimal),
        ("labor_fab", Decimal),
        ("labor_wiring", Decimal),
        ("capital_sell_price", Decimal),
        ("capital_equip_cost", Decimal),
        ("capital_freight", Decimal),
        ("capital_startup_cost", Decimal),
        ("capital_protect_cost", Decimal),
        ("capital_net_revenue", Decimal),
        ("install_sell_price", Decimal),
        ("install_cost", Decimal),
        ("install_trips", Integer),
        ("install_days", Integer),
        ("install_net_revenue", Decimal),
        ("eng_weld_in_out", Bool),
        ("eng_height_greater_than_20ft", Bool),
        ("eng_crane_reqd", Bool),
        ("eng_hi_temp_htr", Bool),
        ("eng_large_hp_or_excessive_ll_pumps", Bool),
        ("eng_generator_need", Bool),
        ("eng_special_testing_reqd", Bool),
        ("eng_extra_forklift_or_scissor_lift_reqd", Bool),
    ] {
        add(name.to_string(), kind);
    }

    fields
}

/// Structured result of one extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KomRecord {
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,

    /// Rows of the line-item table, in sheet order.
    pub line_items: Vec<LineItem>,

    /// Burner, blower and media requirements that were filled in.
    pub equipment_required: Vec<EquipmentRequired>,

    /// Non-fatal notes about fallbacks taken during extraction.
    #[serde(rename = "_validation_warnings")]
    pub validation_warnings: Vec<String>,
}

impl Default for KomRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl KomRecord {
    /// A record with every declared field at its empty value.
    pub fn new() -> Self {
        let fields = schema()
            .iter()
            .map(|(name, kind)| (name.clone(), kind.empty()))
            .collect();

        Self {
            fields,
            line_items: Vec::new(),
            equipment_required: Vec::new(),
            validation_warnings: Vec::new(),
        }
    }

    /// Store a value under a declared field name.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        debug_assert!(
            self.fields.get(name).is_some_and(|v| v.kind() == value.kind()),
            "undeclared field or kind mismatch: {name}"
        );
        self.fields.insert(name.to_string(), value);
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.set(name, FieldValue::Text(value.into()));
    }

    pub fn set_decimal(&mut self, name: &str, value: Option<Decimal>) {
        self.set(name, FieldValue::Decimal(value));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.set(name, FieldValue::Bool(value));
    }

    pub fn set_date(&mut self, name: &str, value: Option<NaiveDate>) {
        self.set(name, FieldValue::Date(value));
    }

    pub fn set_integer(&mut self, name: &str, value: Option<i64>) {
        self.set(name, FieldValue::Integer(value));
    }

    /// Raw access to a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text value of a field, `""` if it is not a text field.
    pub fn text(&self, name: &str) -> &str {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        match self.fields.get(name) {
            Some(FieldValue::Decimal(d)) => *d,
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(FieldValue::Bool(true)))
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.fields.get(name) {
            Some(FieldValue::Date(d)) => *d,
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(FieldValue::Integer(i)) => *i,
            _ => None,
        }
    }

    /// All scalar fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
