//! Armor layering
//!
//! Penalty evaluation for worn clothing and the screen used to sort it.

pub mod describe;
pub mod penalties;
pub mod render;
pub mod screen;
pub mod state;

pub use penalties::{item_penalties, layering_penalty, ItemPenalties, LayeringItemInfo};
pub use render::{render_layering, right_list, LayeringView, RightEntry};
pub use screen::{run_layering_screen, LayeringOutcome, LayeringUi, PendingTakeoff};
pub use state::{LayeringResume, LayeringState, PaneSizes};
