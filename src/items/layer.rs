//! Clothing layers
//!
//! The ordinal category a worn item occupies. Lower layers belong closer to
//! the body; wearing a lower layer outside a higher one costs encumbrance.

use serde::{Deserialize, Serialize};

/// Clothing layer, innermost first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layer {
    Personal,
    Skintight,
    #[default]
    Regular,
    Waist,
    Outer,
    Belted,
    Aura,
}

impl Layer {
    /// Phrase used in the stacking-penalty message ("Wearing multiple items ...")
    pub fn penalty_phrase(&self) -> &'static str {
        match self {
            Layer::Personal => "in your personal aura",
            Layer::Skintight => "close to your skin",
            Layer::Regular => "of normal clothing",
            Layer::Waist => "on your waist",
            Layer::Outer => "of outer clothing",
            Layer::Belted => "strapped to you",
            Layer::Aura => "an aura around you",
        }
    }

    /// One-sentence description, empty for regular clothing
    pub fn description(&self) -> &'static str {
        match self {
            Layer::Personal => "This is in your personal aura.",
            Layer::Skintight => "This is worn next to the skin.",
            Layer::Regular => "",
            Layer::Waist => "This is worn on or around your waist.",
            Layer::Outer => "This is worn over your other clothes.",
            Layer::Belted => "This is strapped onto you.",
            Layer::Aura => "This is an aura around you.",
        }
    }
}
