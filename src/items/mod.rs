//! Item system

pub mod item;
pub mod layer;
pub mod traits;
pub mod units;

pub use item::{Item, ItemId, PartArmor, Resistances};
pub use layer::Layer;
pub use traits::ItemTrait;
pub use units::{format_volume, VOLUME_UNITS_ABBR};
