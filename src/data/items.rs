//! Item templates for data-driven item creation
//!
//! Clothing and ammunition definitions loaded from JSON, instantiated into
//! concrete [`Item`]s on demand.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::body::BodyPart;
use crate::items::{Item, ItemId, ItemTrait, Layer, Resistances};

/// A wearable item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_plural: Option<String>,
    #[serde(default)]
    pub layer: Layer,
    /// Parts covered, all with the same coverage and encumbrance
    pub covers: Vec<BodyPart>,
    pub coverage: u8,
    pub encumbrance: i32,
    #[serde(default)]
    pub warmth: i32,
    #[serde(default)]
    pub storage_ml: u32,
    #[serde(default)]
    pub resistances: Resistances,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub flags: BTreeSet<ItemTrait>,
}

/// A round of ammunition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoTemplate {
    pub id: String,
    pub name: String,
    /// Ammunition type this round belongs to
    pub ammo_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplates {
    pub armor: Vec<ArmorTemplate>,
    pub ammo: Vec<AmmoTemplate>,
}

impl ItemTemplates {
    pub fn find_armor(&self, id: &str) -> Option<&ArmorTemplate> {
        self.armor.iter().find(|t| t.id == id)
    }

    pub fn find_ammo(&self, id: &str) -> Option<&AmmoTemplate> {
        self.ammo.iter().find(|t| t.id == id)
    }

    /// Whether any template has this id
    pub fn contains(&self, id: &str) -> bool {
        self.find_armor(id).is_some() || self.find_ammo(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.armor.len() + self.ammo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create item `item_id` from template `id`
    pub fn instantiate(&self, id: &str, item_id: ItemId) -> Option<Item> {
        if let Some(t) = self.find_armor(id) {
            let mut item = Item::new(item_id, &t.id, &t.name)
                .on_layer(t.layer)
                .covering(&t.covers, t.coverage, t.encumbrance)
                .with_resistances(t.resistances)
                .with_storage(t.storage_ml);
            item.name_plural = t.name_plural.clone();
            item.warmth = t.warmth;
            item.traits = t.flags.clone();
            return Some(item);
        }
        self.find_ammo(id).map(|t| {
            let mut item = Item::new(item_id, &t.id, &t.name);
            item.ammo_type = Some(t.ammo_type.clone());
            item
        })
    }
}

fn armor(id: &str, name: &str, layer: Layer, covers: &[BodyPart], coverage: u8, encumbrance: i32) -> ArmorTemplate {
    ArmorTemplate {
        id: id.to_string(),
        name: name.to_string(),
        name_plural: None,
        layer,
        covers: covers.to_vec(),
        coverage,
        encumbrance,
        warmth: 0,
        storage_ml: 0,
        resistances: Resistances::default(),
        flags: BTreeSet::new(),
    }
}

fn ammo(id: &str, name: &str, ammo_type: &str) -> AmmoTemplate {
    AmmoTemplate {
        id: id.to_string(),
        name: name.to_string(),
        ammo_type: ammo_type.to_string(),
    }
}

/// Built-in templates (hardcoded fallback)
pub fn default_item_templates() -> ItemTemplates {
    use BodyPart::*;

    let arms = [ArmL, ArmR];
    let legs = [LegL, LegR];
    let feet = [FootL, FootR];

    ItemTemplates {
        armor: vec![
            ArmorTemplate {
                warmth: 5,
                flags: BTreeSet::from([ItemTrait::Varsize]),
                ..armor("undershirt", "undershirt", Layer::Skintight, &[Torso], 80, 0)
            },
            ArmorTemplate {
                warmth: 5,
                flags: BTreeSet::from([ItemTrait::Varsize]),
                ..armor("tshirt", "t-shirt", Layer::Regular, &[Torso], 90, 5)
            },
            ArmorTemplate {
                warmth: 25,
                storage_ml: 1_000,
                resistances: Resistances { bash: 1, cut: 1, ..Default::default() },
                flags: BTreeSet::from([ItemTrait::Varsize, ItemTrait::Hood, ItemTrait::Pockets]),
                ..armor("hoodie", "hoodie", Layer::Regular, &[Torso, ArmL, ArmR, Head], 85, 8)
            },
            ArmorTemplate {
                name_plural: Some("pairs of jeans".to_string()),
                warmth: 10,
                storage_ml: 1_500,
                resistances: Resistances { bash: 1, cut: 2, ..Default::default() },
                flags: BTreeSet::from([ItemTrait::Varsize, ItemTrait::Pockets]),
                ..armor("jeans", "pair of jeans", Layer::Regular, &legs, 90, 8)
            },
            ArmorTemplate {
                name_plural: Some("pairs of socks".to_string()),
                warmth: 10,
                ..armor("socks", "pair of socks", Layer::Skintight, &feet, 100, 0)
            },
            ArmorTemplate {
                name_plural: Some("pairs of boots".to_string()),
                warmth: 15,
                resistances: Resistances { bash: 3, cut: 4, acid: 2, ..Default::default() },
                flags: BTreeSet::from([ItemTrait::Varsize, ItemTrait::Waterproof]),
                ..armor("boots", "pair of boots", Layer::Regular, &feet, 95, 12)
            },
            ArmorTemplate {
                name_plural: Some("pairs of work gloves".to_string()),
                warmth: 15,
                resistances: Resistances { bash: 1, cut: 3, ..Default::default() },
                flags: BTreeSet::from([ItemTrait::Varsize]),
                ..armor("gloves_work", "pair of work gloves", Layer::Regular, &[HandL, HandR], 95, 12)
            },
            ArmorTemplate {
                warmth: 40,
                storage_ml: 3_000,
                resistances: Resistances { bash: 2, cut: 3, environmental: 1, ..Default::default() },
                flags: BTreeSet::from([ItemTrait::Varsize, ItemTrait::Pockets, ItemTrait::Waterproof]),
                ..armor("trenchcoat", "trenchcoat", Layer::Outer, &[Torso, ArmL, ArmR, LegL, LegR], 90, 10)
            },
            ArmorTemplate {
                storage_ml: 15_000,
                ..armor("backpack", "backpack", Layer::Belted, &[Torso], 30, 2)
            },
            ArmorTemplate {
                storage_ml: 500,
                flags: BTreeSet::from([ItemTrait::Compact]),
                ..armor("fanny", "fanny pack", Layer::Waist, &[Torso], 5, 0)
            },
            ArmorTemplate {
                name_plural: Some("pairs of eyeglasses".to_string()),
                flags: BTreeSet::from([ItemTrait::Fit]),
                ..armor("glasses_eye", "pair of eyeglasses", Layer::Regular, &[Eyes], 100, 0)
            },
            ArmorTemplate {
                warmth: 5,
                storage_ml: 250,
                flags: BTreeSet::from([ItemTrait::Sided]),
                ..armor("holster_ankle", "ankle holster", Layer::Regular, &[LegL], 5, 1)
            },
            ArmorTemplate {
                resistances: Resistances { bash: 2, cut: 12, bullet: 16, ..Default::default() },
                flags: BTreeSet::from([ItemTrait::Varsize]),
                ..armor("kevlar", "kevlar vest", Layer::Outer, &[Torso], 85, 14)
            },
            ArmorTemplate {
                warmth: 15,
                flags: BTreeSet::from([ItemTrait::Fancy]),
                ..armor("scarf", "scarf", Layer::Regular, &[Mouth], 50, 2)
            },
            ArmorTemplate {
                name_plural: Some("pairs of swim goggles".to_string()),
                flags: BTreeSet::from([ItemTrait::SwimGoggles, ItemTrait::WaterFriendly]),
                ..armor("goggles_swim", "pair of swim goggles", Layer::Regular, &[Eyes], 100, 1)
            },
            ArmorTemplate {
                flags: BTreeSet::from([ItemTrait::Semitangible]),
                ..armor("shimmer", "shimmering aura", Layer::Aura, &[Torso, ArmL, ArmR], 100, 0)
            },
            ArmorTemplate {
                warmth: 5,
                ..armor("sleeves", "pair of arm warmers", Layer::Skintight, &arms, 90, 2)
            },
        ],
        ammo: vec![
            ammo("9mm_fmj", "9x19mm FMJ", "9mm"),
            ammo("9mm_jhp", "9x19mm JHP", "9mm"),
            ammo("22_lr", ".22 LR", "22"),
            ammo("308_fmj", ".308 Winchester FMJ", "308"),
            ammo("arrow_wood", "wooden arrow", "arrow"),
        ],
    }
}
