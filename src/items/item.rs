//! Item definitions
//!
//! Clothing and carried items: layer, per-part coverage, protection and traits.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::body::BodyPart;
use super::layer::Layer;
use super::traits::ItemTrait;

/// Unique item ID for tracking
pub type ItemId = u64;

/// Coverage and encumbrance on a single body part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartArmor {
    /// Percentage of the part covered (0-100)
    pub coverage: u8,
    pub encumbrance: i32,
}

/// Damage and environment resistances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resistances {
    pub bash: i32,
    pub cut: i32,
    pub bullet: i32,
    pub acid: i32,
    pub fire: i32,
    pub environmental: i32,
}

/// A concrete item owned by a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Template this item was created from
    pub type_id: String,
    pub name: String,
    /// Plural name; defaults to `name` + "s"
    pub name_plural: Option<String>,
    pub layer: Layer,
    /// Parts this item covers
    pub coverage: BTreeMap<BodyPart, PartArmor>,
    pub warmth: i32,
    /// Pocket capacity in milliliters
    pub storage_ml: u32,
    /// Volume currently held in the pockets
    pub contents_ml: u32,
    pub resistances: Resistances,
    pub traits: BTreeSet<ItemTrait>,
    /// Inventory letter
    pub invlet: Option<char>,
    /// Ammunition type this item is (for ammo items)
    pub ammo_type: Option<String>,
}

impl Item {
    /// Create a bare item with no coverage
    pub fn new(id: ItemId, type_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            name: name.into(),
            name_plural: None,
            layer: Layer::Regular,
            coverage: BTreeMap::new(),
            warmth: 0,
            storage_ml: 0,
            contents_ml: 0,
            resistances: Resistances::default(),
            traits: BTreeSet::new(),
            invlet: None,
            ammo_type: None,
        }
    }

    /// Builder: set the clothing layer
    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Builder: cover `parts` with the given coverage and encumbrance
    pub fn covering(mut self, parts: &[BodyPart], coverage: u8, encumbrance: i32) -> Self {
        for part in parts {
            self.coverage.insert(*part, PartArmor { coverage, encumbrance });
        }
        self
    }

    /// Builder: add a trait
    pub fn with_trait(mut self, item_trait: ItemTrait) -> Self {
        self.traits.insert(item_trait);
        self
    }

    /// Builder: set resistances
    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    /// Builder: set pocket capacity
    pub fn with_storage(mut self, storage_ml: u32) -> Self {
        self.storage_ml = storage_ml;
        self
    }

    pub fn is_clothing(&self) -> bool {
        !self.coverage.is_empty()
    }

    pub fn covers(&self, part: BodyPart) -> bool {
        self.coverage.contains_key(&part)
    }

    /// Parts covered, in body order
    pub fn covered_parts(&self) -> impl Iterator<Item = BodyPart> + '_ {
        self.coverage.keys().copied()
    }

    pub fn coverage(&self, part: BodyPart) -> u8 {
        self.coverage.get(&part).map(|a| a.coverage).unwrap_or(0)
    }

    pub fn encumbrance(&self, part: BodyPart) -> i32 {
        self.coverage.get(&part).map(|a| a.encumbrance).unwrap_or(0)
    }

    /// Mean coverage across covered parts
    pub fn avg_coverage(&self) -> i32 {
        if self.coverage.is_empty() {
            return 0;
        }
        let total: i32 = self.coverage.values().map(|a| a.coverage as i32).sum();
        total / self.coverage.len() as i32
    }

    /// Mean encumbrance across covered parts
    pub fn avg_encumbrance(&self) -> i32 {
        if self.coverage.is_empty() {
            return 0;
        }
        let total: i32 = self.coverage.values().map(|a| a.encumbrance).sum();
        total / self.coverage.len() as i32
    }

    pub fn has_trait(&self, item_trait: ItemTrait) -> bool {
        self.traits.contains(&item_trait)
    }

    pub fn set_trait(&mut self, item_trait: ItemTrait) {
        self.traits.insert(item_trait);
    }

    /// Flip a trait on or off, returning the new state
    pub fn toggle_trait(&mut self, item_trait: ItemTrait) -> bool {
        if self.traits.remove(&item_trait) {
            false
        } else {
            self.traits.insert(item_trait);
            true
        }
    }

    /// Exempt from the same-layer stacking count
    pub fn is_layering_exempt(&self) -> bool {
        self.has_trait(ItemTrait::Semitangible) || self.has_trait(ItemTrait::Compact)
    }

    pub fn is_sided(&self) -> bool {
        self.has_trait(ItemTrait::Sided)
    }

    /// Move coverage onto the mirrored parts. Returns false for unsided items.
    pub fn swap_side(&mut self) -> bool {
        if !self.is_sided() {
            return false;
        }
        self.coverage = self.coverage
            .iter()
            .map(|(part, armor)| (part.opposite(), *armor))
            .collect();
        true
    }

    /// Type name, pluralized for counts other than one
    pub fn type_name(&self, count: u32) -> String {
        if count == 1 {
            return self.name.clone();
        }
        self.name_plural.clone().unwrap_or_else(|| pluralize(&self.name))
    }

    /// Name shown in lists
    pub fn display_name(&self) -> String {
        if self.contents_ml > 0 {
            format!("{} (filled)", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Moves needed to take this item off
    pub fn takeoff_moves(&self) -> i32 {
        50 + self.avg_encumbrance().max(0) * 5
    }
}

/// English plural for names without an explicit one
fn pluralize(name: &str) -> String {
    const SIBILANT: [&str; 5] = ["s", "x", "z", "ch", "sh"];
    if SIBILANT.iter().any(|end| name.ends_with(end)) {
        return format!("{name}es");
    }
    if let Some(stem) = name.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }
    format!("{name}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_shirt() -> Item {
        Item::new(1, "tshirt", "t-shirt")
            .covering(&[BodyPart::Torso], 90, 5)
            .covering(&[BodyPart::ArmL, BodyPart::ArmR], 50, 1)
    }

    #[test]
    fn test_coverage_queries() {
        let shirt = make_shirt();
        assert!(shirt.is_clothing());
        assert!(shirt.covers(BodyPart::ArmL));
        assert!(!shirt.covers(BodyPart::Head));
        assert_eq!(shirt.coverage(BodyPart::Torso), 90);
        assert_eq!(shirt.coverage(BodyPart::Head), 0);
        assert_eq!(shirt.avg_coverage(), 63);
        assert_eq!(shirt.avg_encumbrance(), 2);
    }

    #[test]
    fn test_exemption() {
        let plain = make_shirt();
        assert!(!plain.is_layering_exempt());
        assert!(make_shirt().with_trait(ItemTrait::Compact).is_layering_exempt());
        assert!(make_shirt().with_trait(ItemTrait::Semitangible).is_layering_exempt());
    }

    #[test]
    fn test_swap_side() {
        let mut pad = Item::new(2, "knee_pad", "knee pad")
            .covering(&[BodyPart::LegL], 30, 2)
            .with_trait(ItemTrait::Sided);
        assert!(pad.swap_side());
        assert!(pad.covers(BodyPart::LegR));
        assert!(!pad.covers(BodyPart::LegL));

        let mut shirt = make_shirt();
        assert!(!shirt.swap_side());
        assert!(shirt.covers(BodyPart::ArmL));
    }

    #[test]
    fn test_type_name_plural() {
        let rag = Item::new(3, "rag", "rag");
        assert_eq!(rag.type_name(1), "rag");
        assert_eq!(rag.type_name(2), "rags");
        assert_eq!(Item::new(2, "mattress", "mattress").type_name(2), "mattresses");
        assert_eq!(Item::new(3, "body armor", "body armor").type_name(0), "body armors");
        assert_eq!(Item::new(4, "battery", "battery").type_name(3), "batteries");
        assert_eq!(Item::new(5, "tray", "tray").type_name(3), "trays");
        assert_eq!(Item::new(6, "sash", "sash").type_name(2), "sashes");

        let mut glass = Item::new(4, "glass_sheet", "sheet of glass");
        glass.name_plural = Some("sheets of glass".to_string());
        assert_eq!(glass.type_name(2), "sheets of glass");
    }

    #[test]
    fn test_toggle_trait() {
        let mut shirt = make_shirt();
        assert!(shirt.toggle_trait(ItemTrait::Hidden));
        assert!(shirt.has_trait(ItemTrait::Hidden));
        assert!(!shirt.toggle_trait(ItemTrait::Hidden));
        assert!(!shirt.has_trait(ItemTrait::Hidden));
    }
}
