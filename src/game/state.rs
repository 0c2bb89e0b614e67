//! Game state
//!
//! Owns the loaded data, the characters and the activity queue, and advances
//! them turn by turn.

use std::collections::VecDeque;

use crate::character::{Character, MOVES_PER_TURN};
use crate::data::{DataError, DataManager};
use crate::items::{Item, ItemId};
use crate::layering::{run_layering_screen, LayeringOutcome, LayeringResume, LayeringUi};
use super::activity::{Activity, Target};

/// Maximum number of messages kept in the log
const MESSAGE_LOG_LEN: usize = 100;

/// The main game struct that holds all game data
pub struct Game {
    /// External game data (ammunition types, item templates)
    data: DataManager,
    pub avatar: Character,
    pub npcs: Vec<Character>,
    /// What the avatar is busy with
    activity: Option<Activity>,
    /// Activities to resume once the current one finishes
    backlog: VecDeque<Activity>,
    messages: Vec<GameMessage>,
    turn: u64,
    /// Counter for generating unique item IDs
    item_id_counter: u64,
}

/// A message to display in the game log
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub text: String,
    pub turn: u64,
    pub category: MessageCategory,
}

/// Categories for message filtering/coloring
#[derive(Debug, Clone, PartialEq)]
pub enum MessageCategory {
    Item,
    System,
    Warning,
}

impl Game {
    pub fn new(data: DataManager, avatar: Character) -> Self {
        Self {
            data,
            avatar,
            npcs: Vec::new(),
            activity: None,
            backlog: VecDeque::new(),
            messages: Vec::new(),
            turn: 0,
            item_id_counter: 1000,
        }
    }

    /// Get access to the game data manager
    pub fn data(&self) -> &DataManager {
        &self.data
    }

    /// Swap in freshly loaded data
    pub fn replace_data(&mut self, data: DataManager) {
        self.data = data;
        self.add_message("Game data reloaded.", MessageCategory::System);
    }

    /// Reread the data from where it was loaded; the old registry is
    /// kept when loading or the consistency check fails
    pub fn reload_data(&mut self) -> Result<(), DataError> {
        let data = self.data.reload()?;
        data.check_consistency()?;
        self.replace_data(data);
        Ok(())
    }

    /// Get the next item ID
    pub fn next_item_id(&mut self) -> ItemId {
        let id = self.item_id_counter;
        self.item_id_counter += 1;
        id
    }

    /// Create an item from a template, logging unknown ids
    pub fn spawn_item(&mut self, template_id: &str) -> Option<Item> {
        let id = self.next_item_id();
        let item = self.data.items.instantiate(template_id, id);
        if item.is_none() {
            log::warn!("Unknown item template {}", template_id);
        }
        item
    }

    pub fn character(&self, target: Target) -> Option<&Character> {
        match target {
            Target::Avatar => Some(&self.avatar),
            Target::Npc(i) => self.npcs.get(i),
        }
    }

    pub fn character_mut(&mut self, target: Target) -> Option<&mut Character> {
        match target {
            Target::Avatar => Some(&mut self.avatar),
            Target::Npc(i) => self.npcs.get_mut(i),
        }
    }

    pub fn activity(&self) -> Option<&Activity> {
        self.activity.as_ref()
    }

    pub fn backlog(&self) -> impl Iterator<Item = &Activity> {
        self.backlog.iter()
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Get all messages
    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    /// Add a message to the log
    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        let text = text.into();
        log::info!("[turn {}] {}", self.turn, text);
        self.messages.push(GameMessage { text, turn: self.turn, category });

        if self.messages.len() > MESSAGE_LOG_LEN {
            self.messages.remove(0);
        }
    }

    /// Open the layering screen once and act on how it was left
    pub fn open_armor_layers<U: LayeringUi>(
        &mut self,
        ui: &mut U,
        target: Target,
        resume: Option<LayeringResume>,
    ) -> anyhow::Result<LayeringOutcome> {
        let outcome = match target {
            Target::Avatar => run_layering_screen(ui, &mut self.avatar, None, resume)?,
            Target::Npc(i) => {
                let Some(npc) = self.npcs.get_mut(i) else {
                    anyhow::bail!("no NPC with index {}", i);
                };
                run_layering_screen(ui, npc, Some(&self.avatar), resume)?
            }
        };

        match &outcome {
            LayeringOutcome::Closed => {}
            LayeringOutcome::Denied(reason) => {
                self.add_message(reason.clone(), MessageCategory::Warning);
                ui.popup(reason)?;
            }
            LayeringOutcome::Suspended { resume, takeoff: None } => {
                self.activity = Some(Activity::ArmorLayers { target, resume: *resume });
            }
            LayeringOutcome::Suspended { resume, takeoff: Some(pending) } => {
                self.activity = Some(Activity::TakeOff {
                    target,
                    item_id: pending.item_id,
                    moves_left: pending.moves,
                });
                self.backlog.push_back(Activity::ArmorLayers { target, resume: *resume });
            }
        }
        Ok(outcome)
    }

    /// Advance one turn: restore moves, then work on the current activity
    pub fn process_turn(&mut self) {
        self.turn += 1;
        for who in std::iter::once(&mut self.avatar).chain(self.npcs.iter_mut()) {
            who.moves = (who.moves + MOVES_PER_TURN).min(MOVES_PER_TURN);
        }

        if let Some(activity) = &self.activity {
            log::debug!("{:?} is {}", activity.target(), activity.name());
        }
        match self.activity.take() {
            Some(Activity::TakeOff { target, item_id, moves_left }) => {
                self.advance_takeoff(target, item_id, moves_left);
            }
            Some(other) => self.activity = Some(other),
            None => self.activity = self.backlog.pop_front(),
        }
    }

    fn advance_takeoff(&mut self, target: Target, item_id: ItemId, moves_left: i32) {
        let Some(who) = self.character_mut(target) else {
            log::warn!("Take-off target {:?} is gone", target);
            self.activity = self.backlog.pop_front();
            return;
        };

        let spent = who.moves.max(0).min(moves_left);
        who.moves -= spent;
        let moves_left = moves_left - spent;
        if moves_left > 0 {
            self.activity = Some(Activity::TakeOff { target, item_id, moves_left });
            return;
        }

        let name = who.worn.position(item_id).and_then(|i| who.worn.get(i)).map(|i| i.name.clone());
        let finished = who.finish_takeoff(item_id);
        let wearer = who.name.clone();
        match (finished, name) {
            (true, Some(name)) => self.add_message(format!("{wearer} takes off the {name}."), MessageCategory::Item),
            _ => self.add_message("The item to take off is no longer worn.", MessageCategory::Warning),
        }
        self.activity = self.backlog.pop_front();
    }

    /// Keep the layering screen up until it is closed, passing turns
    /// whenever it suspends
    pub fn run_armor_layers<U: LayeringUi>(&mut self, ui: &mut U, target: Target) -> anyhow::Result<()> {
        let mut target = target;
        let mut resume = None;

        loop {
            match self.open_armor_layers(ui, target, resume)? {
                LayeringOutcome::Closed | LayeringOutcome::Denied(_) => return Ok(()),
                LayeringOutcome::Suspended { .. } => {}
            }

            loop {
                self.process_turn();
                match self.activity.take() {
                    Some(Activity::ArmorLayers { target: t, resume: r }) => {
                        target = t;
                        resume = Some(r);
                        break;
                    }
                    Some(other) => self.activity = Some(other),
                    None => return Ok(()),
                }
            }
        }
    }
}
