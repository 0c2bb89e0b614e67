//! Stitchwork - clothing layers for a terminal survival roguelike
//!
//! Worn clothing, the encumbrance penalties of wearing it in the wrong order,
//! the screen for sorting it, and the ammunition data that ships alongside.

pub mod body;
pub mod character;
pub mod config;
pub mod data;
pub mod game;
pub mod items;
pub mod layering;
pub mod ui;

// Re-export commonly used types
pub use character::Character;
pub use data::DataManager;
pub use game::{Game, Target};
pub use items::Item;
