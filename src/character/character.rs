//! Characters
//!
//! A wearer: the avatar or an NPC, with worn clothing and carried items.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::BodyPart;
use crate::items::{Item, ItemId};
use super::worn::WornItems;

/// Letters available for inventory assignment, in order
pub const INV_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Moves a character regains every turn
pub const MOVES_PER_TURN: i32 = 100;

/// Why an item can't be put on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WearError {
    #[error("{0} can't be worn")]
    NotClothing(String),
    #[error("you're already wearing {0}")]
    AlreadyWorn(String),
    #[error("nothing carried in slot {0}")]
    NotCarried(usize),
}

/// Result of asking a character to take something off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Takeoff {
    /// Removed on the spot and moved to the carried items
    Removed(ItemId),
    /// Pockets must be emptied first; a long-running action is needed
    Started { item_id: ItemId, moves: i32 },
    /// No worn item at that position
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attitude {
    Friendly,
    Neutral,
    Hostile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    avatar: bool,
    pub position: (i32, i32),
    pub attitude: Attitude,
    /// Action points; negative means the character owes time
    pub moves: i32,
    pub worn: WornItems,
    /// Carried, unworn items
    pub inventory: Vec<Item>,
}

impl Character {
    /// The player character
    pub fn avatar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: true,
            position: (0, 0),
            attitude: Attitude::Friendly,
            moves: MOVES_PER_TURN,
            worn: WornItems::new(),
            inventory: Vec::new(),
        }
    }

    pub fn npc(name: impl Into<String>, position: (i32, i32), attitude: Attitude) -> Self {
        Self {
            avatar: false,
            position,
            attitude,
            ..Self::avatar(name)
        }
    }

    pub fn is_avatar(&self) -> bool {
        self.avatar
    }

    pub fn is_npc(&self) -> bool {
        !self.avatar
    }

    /// Chebyshev distance in tiles
    pub fn distance_to(&self, other: &Character) -> i32 {
        let dx = (self.position.0 - other.position.0).abs();
        let dy = (self.position.1 - other.position.1).abs();
        dx.max(dy)
    }

    pub fn can_wear(&self, item: &Item) -> Result<(), WearError> {
        if !item.is_clothing() {
            return Err(WearError::NotClothing(item.name.clone()));
        }
        if self.worn.position(item.id).is_some() {
            return Err(WearError::AlreadyWorn(item.name.clone()));
        }
        Ok(())
    }

    /// Carried items that could be put on
    pub fn wearable_inventory(&self) -> Vec<usize> {
        self.inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| self.can_wear(item).is_ok())
            .map(|(i, _)| i)
            .collect()
    }

    /// Put on a carried item, outermost or before the worn item at `position`
    pub fn wear_from_inventory(&mut self, index: usize, position: Option<usize>) -> Result<ItemId, WearError> {
        let item = self.inventory.get(index).ok_or(WearError::NotCarried(index))?;
        self.can_wear(item)?;

        let item = self.inventory.remove(index);
        let id = item.id;
        log::info!("{} puts on {}", self.name, item.name);
        match position {
            Some(pos) => self.worn.insert(pos, item),
            None => self.worn.push(item),
        }
        Ok(id)
    }

    /// Take off the worn item at `index`
    pub fn takeoff(&mut self, index: usize) -> Takeoff {
        let Some(item) = self.worn.get(index) else {
            return Takeoff::Missing;
        };

        if item.contents_ml > 0 {
            let moves = item.takeoff_moves() + (item.contents_ml / 10) as i32;
            log::info!("{} starts emptying {} before taking it off", self.name, item.name);
            return Takeoff::Started { item_id: item.id, moves };
        }

        self.moves -= item.takeoff_moves();
        match self.worn.remove(index) {
            Some(item) => {
                let id = item.id;
                log::info!("{} takes off {}", self.name, item.name);
                self.inventory.push(item);
                Takeoff::Removed(id)
            }
            None => Takeoff::Missing,
        }
    }

    /// Complete a long-running take-off; pocket contents are dumped
    pub fn finish_takeoff(&mut self, item_id: ItemId) -> bool {
        let Some(index) = self.worn.position(item_id) else {
            log::warn!("{} no longer wears item {}", self.name, item_id);
            return false;
        };
        match self.worn.remove(index) {
            Some(mut item) => {
                item.contents_ml = 0;
                log::info!("{} finishes taking off {}", self.name, item.name);
                self.inventory.push(item);
                true
            }
            None => false,
        }
    }

    /// Mirror a sided item onto the other side
    pub fn change_side(&mut self, index: usize) -> bool {
        self.worn.get_mut(index).map(|item| item.swap_side()).unwrap_or(false)
    }

    fn covering_sum(&self, part: BodyPart, f: impl Fn(&Item) -> i32) -> i32 {
        self.worn.covering(part).map(|(_, item)| f(item)).sum()
    }

    pub fn armor_bash(&self, part: BodyPart) -> i32 {
        self.covering_sum(part, |i| i.resistances.bash)
    }

    pub fn armor_cut(&self, part: BodyPart) -> i32 {
        self.covering_sum(part, |i| i.resistances.cut)
    }

    pub fn armor_bullet(&self, part: BodyPart) -> i32 {
        self.covering_sum(part, |i| i.resistances.bullet)
    }

    /// Summed clothing encumbrance on `part`, before layering penalties
    pub fn base_encumbrance(&self, part: BodyPart) -> i32 {
        self.covering_sum(part, |i| i.encumbrance(part))
    }

    pub fn warmth(&self, part: BodyPart) -> i32 {
        self.covering_sum(part, |i| i.warmth)
    }

    /// Item (worn or carried) holding inventory letter `invlet`
    pub fn invlet_to_item(&self, invlet: char) -> Option<&Item> {
        self.worn
            .iter()
            .chain(self.inventory.iter())
            .find(|i| i.invlet == Some(invlet))
    }

    /// Give worn items letters from the end of the alphabet, outermost first
    pub fn assign_armor_invlets(&mut self) {
        let letters: Vec<char> = INV_CHARS.chars().rev().collect();
        let mut li = 0;
        let mut wi = self.worn.len();

        while wi > 0 && li < letters.len() {
            let invlet = letters[li];
            let worn_letter = self.worn.get(wi - 1).and_then(|i| i.invlet);
            if worn_letter == Some(invlet) {
                wi -= 1;
            } else if self.invlet_to_item(invlet).is_some() {
                li += 1;
            } else {
                if let Some(item) = self.worn.get_mut(wi - 1) {
                    item.invlet = Some(invlet);
                }
                wi -= 1;
                li += 1;
            }
        }
    }
}
