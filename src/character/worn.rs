//! Worn items
//!
//! The ordered sequence of equipped clothing, innermost first.

use serde::{Deserialize, Serialize};

use crate::body::BodyPart;
use crate::items::{Item, ItemId};

/// Equipped items in wear order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WornItems {
    items: Vec<Item>,
}

impl WornItems {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Index of the item with `id`
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Items covering `part`, with their wear positions
    pub fn covering(&self, part: BodyPart) -> impl Iterator<Item = (usize, &Item)> {
        self.items.iter().enumerate().filter(move |(_, i)| i.covers(part))
    }

    /// Swap two positions. Out-of-range indices are ignored.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.items.len() && b < self.items.len() {
            self.items.swap(a, b);
        }
    }

    /// Stable sort by ascending layer
    pub fn sort_by_layer(&mut self) {
        self.items.sort_by_key(|i| i.layer);
    }

    /// Put on as the outermost item
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Insert before `index`, clamped to the end
    pub fn insert(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }
}

impl From<Vec<Item>> for WornItems {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}
