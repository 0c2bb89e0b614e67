//! Data loading and external game content
//!
//! Ammunition types and item templates, loaded from JSON files in the data
//! directory with built-in fallbacks.

pub mod ammo;
pub mod items;
pub mod loader;

pub use ammo::{AmmoRegistry, AmmunitionType};
pub use items::{AmmoTemplate, ArmorTemplate, ItemTemplates};
pub use loader::{DataError, DataManager, Definition};
