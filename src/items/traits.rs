//! Item traits
//!
//! Capabilities an item declares. Queries are set-membership checks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemTrait {
    /// Can occupy the same space as other things
    Semitangible,
    /// Doesn't encumber when worn with other things
    Compact,
    /// Not drawn on the character sprite
    Hidden,
    Fit,
    Varsize,
    Hood,
    Pockets,
    Waterproof,
    WaterFriendly,
    Fancy,
    SuperFancy,
    Flotation,
    Oversize,
    SwimGoggles,
    /// Worn on one side only; can be swapped
    Sided,
}

impl ItemTrait {
    /// Player-facing sentence for traits the detail pane describes
    pub fn description(&self) -> Option<&'static str> {
        match self {
            ItemTrait::Fit => Some("It fits you well."),
            ItemTrait::Varsize => Some("It could be refitted."),
            ItemTrait::Hood => Some("It has a hood."),
            ItemTrait::Pockets => Some("It has pockets."),
            ItemTrait::Waterproof => Some("It is waterproof."),
            ItemTrait::WaterFriendly => Some("It is water friendly."),
            ItemTrait::Fancy => Some("It looks fancy."),
            ItemTrait::SuperFancy => Some("It looks really fancy."),
            ItemTrait::Flotation => Some("You will not drown today."),
            ItemTrait::Oversize => Some("It is very bulky."),
            ItemTrait::SwimGoggles => Some("It helps you to see clearly underwater."),
            ItemTrait::Semitangible => Some("It can occupy the same space as other things."),
            ItemTrait::Compact => Some("It won't encumber you when worn with other things."),
            ItemTrait::Hidden | ItemTrait::Sided => None,
        }
    }
}
