//! Long-running activities
//!
//! Things a character keeps doing across turns once started.

use serde::{Deserialize, Serialize};

use crate::items::ItemId;
use crate::layering::LayeringResume;

/// Whose clothing an activity works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Avatar,
    /// Index into the game's NPC list
    Npc(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    /// Reopen the layering screen where it was left. Costs no moves.
    ArmorLayers { target: Target, resume: LayeringResume },
    /// Empty an item's pockets, then take it off
    TakeOff { target: Target, item_id: ItemId, moves_left: i32 },
}

impl Activity {
    pub fn target(&self) -> Target {
        match self {
            Activity::ArmorLayers { target, .. } | Activity::TakeOff { target, .. } => *target,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activity::ArmorLayers { .. } => "sorting armor",
            Activity::TakeOff { .. } => "taking off",
        }
    }
}
