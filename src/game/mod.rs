//! Game module - turn loop, activities and the message log

mod activity;
mod state;

pub use activity::{Activity, Target};
pub use state::{Game, GameMessage, MessageCategory};
