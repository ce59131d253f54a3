//! Pyre Settings - Typed configuration for window effects
//!
//! Effects declare their settings keys in TOML schemas. The store gives typed
//! read/write/reset access to those keys, notifies listeners of changes, and
//! persists non-default values to a TOML file.

mod schema;
mod store;
mod value;

pub use schema::{Schema, SettingSchema, SettingType};
pub use store::{Settings, SettingsStore};
pub use value::SettingValue;
