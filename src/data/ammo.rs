//! Ammunition types
//!
//! The calibers and projectile families that weapons and magazines accept.
//! Built once from loaded definitions and read-only afterwards; a reload
//! builds a fresh registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::items::ItemTemplates;
use super::loader::DataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmunitionType {
    pub id: String,
    name: String,
    /// Ammo item used when a weapon of this type is spawned loaded
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    default_ammotype: Option<String>,
}

impl AmmunitionType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, default_ammotype: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_ammotype: default_ammotype.map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_ammotype(&self) -> Option<&str> {
        self.default_ammotype.as_deref()
    }
}

/// Ammunition types by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmmoRegistry {
    types: BTreeMap<String, AmmunitionType>,
}

impl AmmoRegistry {
    /// Build from definitions; a repeated id is an error
    pub fn from_definitions(defs: impl IntoIterator<Item = AmmunitionType>) -> Result<Self, DataError> {
        let mut types = BTreeMap::new();
        for def in defs {
            if types.contains_key(&def.id) {
                return Err(DataError::DuplicateAmmo(def.id));
            }
            types.insert(def.id.clone(), def);
        }
        Ok(Self { types })
    }

    pub fn get(&self, id: &str) -> Option<&AmmunitionType> {
        self.types.get(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types in id order
    pub fn iter(&self) -> impl Iterator<Item = &AmmunitionType> {
        self.types.values()
    }

    /// Problems with default ammo: missing items, or items of another type
    pub fn check_consistency(&self, items: &ItemTemplates) -> Vec<String> {
        let mut problems = Vec::new();
        for at in self.iter() {
            let Some(default) = at.default_ammotype() else {
                continue;
            };
            match items.find_ammo(default) {
                None if items.contains(default) => {
                    problems.push(format!("ammo type {} has non-ammo default {}", at.id, default));
                }
                None => {
                    problems.push(format!("ammo type {} has invalid default ammo {}", at.id, default));
                }
                Some(ammo) if ammo.ammo_type != at.id => {
                    problems.push(format!(
                        "ammo type {} has default ammo {} of type {}",
                        at.id, default, ammo.ammo_type
                    ));
                }
                Some(_) => {}
            }
        }
        problems
    }
}

/// Built-in ammunition types (hardcoded fallback)
pub fn default_ammunition_types() -> Vec<AmmunitionType> {
    vec![
        AmmunitionType::new("9mm", "9x19mm", Some("9mm_fmj")),
        AmmunitionType::new("22", ".22", Some("22_lr")),
        AmmunitionType::new("308", ".308", Some("308_fmj")),
        AmmunitionType::new("arrow", "arrows", Some("arrow_wood")),
        AmmunitionType::new("battery", "batteries", None),
    ]
}
