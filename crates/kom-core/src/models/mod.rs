//! Data models: the extracted record and the pipeline configuration.

pub mod config;
pub mod record;

pub use config::{AnchorLayout, ExtractionConfig, GroupLayout, KomConfig, MarkerStyle, TemplateLayout};
pub use record::{schema, EquipmentRequired, FieldKind, FieldValue, KomRecord, LineItem};
