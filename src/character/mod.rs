//! Characters and what they wear

pub mod character;
pub mod worn;

pub use character::{Attitude, Character, Takeoff, WearError, INV_CHARS, MOVES_PER_TURN};
pub use worn::WornItems;
