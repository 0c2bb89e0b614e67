//! Layering screen loop
//!
//! Lets a player reorder, add and remove worn clothing on themselves or a
//! friendly NPC next to them. Input, popups and drawing go through
//! [`LayeringUi`] so the loop can be driven by a terminal or by a script.

use crate::character::{Attitude, Character, Takeoff, WearError};
use crate::items::{ItemId, ItemTrait};
use crate::ui::input::{Action, KeyBindings};
use super::render::{right_list, LayeringView};
use super::state::{visible_indices, LayeringResume, LayeringState, PaneSizes};

/// Everything the screen needs from the outside world
pub trait LayeringUi {
    fn keybindings(&self) -> &KeyBindings;

    /// Render a frame and report how many list rows fit
    fn draw(&mut self, view: &LayeringView) -> anyhow::Result<PaneSizes>;

    /// Block until the user asks for something
    fn next_action(&mut self) -> anyhow::Result<Action>;

    fn query_yn(&mut self, message: &str) -> anyhow::Result<bool>;

    fn popup(&mut self, message: &str) -> anyhow::Result<()>;

    /// Pick one of `names`; `None` when cancelled
    fn choose_item(&mut self, title: &str, names: &[String]) -> anyhow::Result<Option<usize>>;
}

/// A take-off that needs its own activity before the screen can resume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTakeoff {
    pub item_id: ItemId,
    pub moves: i32,
}

/// How the screen was left
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayeringOutcome {
    Closed,
    /// Reopen later at `resume`, after `takeoff` finishes if there is one
    Suspended {
        resume: LayeringResume,
        takeoff: Option<PendingTakeoff>,
    },
    /// The screen could not be opened for this wearer
    Denied(String),
}

/// Run the screen for `who`. `sorter` is the character doing the sorting
/// when it isn't `who` itself.
pub fn run_layering_screen<U: LayeringUi>(
    ui: &mut U,
    who: &mut Character,
    sorter: Option<&Character>,
    resume: Option<LayeringResume>,
) -> anyhow::Result<LayeringOutcome> {
    let mut state = LayeringState::new(resume);
    log::debug!("Opening layering screen for {}", who.name);

    loop {
        if who.is_avatar() && who.moves < 0 {
            log::debug!("{} is out of moves; suspending layering screen", who.name);
            return Ok(LayeringOutcome::Suspended { resume: state.resume(), takeoff: None });
        }
        if let Some(denied) = access_denied(who, sorter) {
            return Ok(LayeringOutcome::Denied(denied));
        }

        let visible = visible_indices(who.worn.as_slice(), state.filter());
        state.clamp_cursor(visible.len());
        let right = right_list(who);
        let panes = ui.draw(&LayeringView {
            who: &*who,
            state: &state,
            visible: &visible,
            right: &right,
        })?;
        state.apply_pane_sizes(panes, visible.len(), right.len());

        let action = ui.next_action()?;
        log::debug!("Layering action {:?}", action);
        let cursor_item = visible.get(state.left_index).copied();

        match action {
            Action::Up => state.move_up(&mut who.worn, &visible),
            Action::Down => state.move_down(&mut who.worn, &visible),
            Action::Left => state.change_tab(false),
            Action::Right => state.change_tab(true),
            Action::PrevTab => state.scroll_right(false, right.len()),
            Action::NextTab => state.scroll_right(true, right.len()),
            Action::MoveArmor => {
                if cursor_item.is_some() {
                    state.toggle_grab();
                }
            }
            Action::ChangeSide => {
                if let Some(index) = cursor_item {
                    change_side(ui, who, index)?;
                }
            }
            Action::ToggleCloth => {
                if let Some(item) = cursor_item.and_then(|i| who.worn.get_mut(i)) {
                    item.toggle_trait(ItemTrait::Hidden);
                }
            }
            Action::EquipArmor => equip(ui, who, &mut state, None)?,
            Action::EquipArmorHere => equip(ui, who, &mut state, cursor_item)?,
            Action::RemoveArmor => {
                let Some(index) = cursor_item else {
                    continue;
                };
                if !ui.query_yn("Remove selected armor?")? {
                    continue;
                }
                match who.takeoff(index) {
                    Takeoff::Removed(_) => {
                        state.selected = None;
                        state.left_index = state.left_index.saturating_sub(1);
                    }
                    Takeoff::Started { item_id, moves } => {
                        return Ok(LayeringOutcome::Suspended {
                            resume: state.resume(),
                            takeoff: Some(PendingTakeoff { item_id, moves }),
                        });
                    }
                    Takeoff::Missing => log::warn!("Worn index {} vanished before removal", index),
                }
            }
            Action::AssignInvlets => {
                if who.is_avatar() && ui.query_yn("Reassign invlets for armor?")? {
                    who.assign_armor_invlets();
                }
            }
            Action::SortArmor => who.worn.sort_by_layer(),
            Action::UsageHelp => {
                let text = usage_help(ui.keybindings());
                ui.popup(&text)?;
            }
            Action::HelpKeybindings => {
                let text = keybindings_help(ui.keybindings());
                ui.popup(&text)?;
            }
            Action::Quit => {
                log::debug!("Closing layering screen for {}", who.name);
                return Ok(LayeringOutcome::Closed);
            }
        }
    }
}

fn access_denied(who: &Character, sorter: Option<&Character>) -> Option<String> {
    let sorter = sorter?;
    if who.is_avatar() {
        return None;
    }
    if sorter.distance_to(who) > 1 {
        return Some(format!("{} is too far to sort armor.", who.name));
    }
    if who.attitude != Attitude::Friendly {
        return Some(format!("{} is not friendly!", who.name));
    }
    None
}

fn change_side<U: LayeringUi>(ui: &mut U, who: &mut Character, index: usize) -> anyhow::Result<()> {
    let Some(item) = who.worn.get(index) else {
        return Ok(());
    };
    if !item.is_sided() {
        return ui.popup(&format!("You cannot swap the side on which your {} is worn.", item.name));
    }
    if ui.query_yn(&format!("Swap side for {}?", item.display_name()))? {
        who.change_side(index);
    }
    Ok(())
}

/// Put on a carried item, at the end or before worn position `before`
fn equip<U: LayeringUi>(
    ui: &mut U,
    who: &mut Character,
    state: &mut LayeringState,
    before: Option<usize>,
) -> anyhow::Result<()> {
    let wearable = who.wearable_inventory();
    if wearable.is_empty() {
        return ui.popup("You have nothing to wear.");
    }
    let names: Vec<String> = wearable
        .iter()
        .filter_map(|&i| who.inventory.get(i))
        .map(|i| i.display_name())
        .collect();
    let Some(choice) = ui.choose_item("Wear what?", &names)? else {
        return Ok(());
    };
    let Some(&index) = wearable.get(choice) else {
        return ui.popup(&format!("Can't put this on! ({})", WearError::NotCarried(choice)));
    };

    match who.wear_from_inventory(index, before) {
        Ok(item_id) => {
            let visible = visible_indices(who.worn.as_slice(), state.filter());
            let position = who.worn.position(item_id);
            if let Some(row) = visible.iter().position(|&i| Some(i) == position) {
                state.left_index = row;
                state.selected = None;
            }
            Ok(())
        }
        Err(e) => ui.popup(&format!("Can't put this on! ({e})")),
    }
}

fn usage_help(keys: &KeyBindings) -> String {
    format!(
        "Use the arrow- or vi keys to navigate the left list.\n\
         [{}] to select highlighted armor for reordering.\n\
         [{}] / [{}] to scroll the right list.\n\
         [{}] to assign special inventory letters to clothing.\n\
         [{}] to change the side on which item is worn.\n\
         [{}] to toggle armor visibility on character sprite.\n\
         [{}] to sort worn armor into natural layers.\n\
         [{}] to equip a new item.\n\
         [{}] to equip a new item at the currently selected position.\n\
         [{}] to remove selected armor from oneself.\n\
         \n\
         [Encumbrance and Warmth] explanation:\n\
         The first number is the summed encumbrance from all clothing on that body part. \
         The second number is an additional encumbrance penalty caused by wearing either \
         multiple items on one of the body part's layers or wearing items the wrong way \
         (e.g. a shirt over a backpack). The sum of these values is the effective \
         encumbrance value your character has for that body part.",
        keys.describe(Action::MoveArmor),
        keys.describe(Action::PrevTab),
        keys.describe(Action::NextTab),
        keys.describe(Action::AssignInvlets),
        keys.describe(Action::ChangeSide),
        keys.describe(Action::ToggleCloth),
        keys.describe(Action::SortArmor),
        keys.describe(Action::EquipArmor),
        keys.describe(Action::EquipArmorHere),
        keys.describe(Action::RemoveArmor),
    )
}

fn keybindings_help(keys: &KeyBindings) -> String {
    Action::all()
        .iter()
        .map(|action| format!("{:<12} {}", keys.describe(*action), action.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::body::BodyPart;
    use crate::items::{Item, Layer};

    /// Replays a fixed script of actions and answers
    #[derive(Default)]
    pub(crate) struct ScriptedUi {
        pub actions: VecDeque<Action>,
        pub answers: VecDeque<bool>,
        pub choices: VecDeque<Option<usize>>,
        pub popups: Vec<String>,
        /// Every list offered through `choose_item`
        pub offered: Vec<Vec<String>>,
        pub draws: usize,
        pub keys: KeyBindings,
    }

    impl ScriptedUi {
        pub fn new(actions: &[Action]) -> Self {
            Self {
                actions: actions.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl LayeringUi for ScriptedUi {
        fn keybindings(&self) -> &KeyBindings {
            &self.keys
        }

        fn draw(&mut self, _view: &LayeringView) -> anyhow::Result<PaneSizes> {
            self.draws += 1;
            Ok(PaneSizes { left_lines: 10, right_lines: 10 })
        }

        fn next_action(&mut self) -> anyhow::Result<Action> {
            Ok(self.actions.pop_front().unwrap_or(Action::Quit))
        }

        fn query_yn(&mut self, _message: &str) -> anyhow::Result<bool> {
            Ok(self.answers.pop_front().unwrap_or(true))
        }

        fn popup(&mut self, message: &str) -> anyhow::Result<()> {
            self.popups.push(message.to_string());
            Ok(())
        }

        fn choose_item(&mut self, _title: &str, names: &[String]) -> anyhow::Result<Option<usize>> {
            self.offered.push(names.to_vec());
            Ok(self.choices.pop_front().flatten())
        }
    }

    fn make_who() -> Character {
        let mut who = Character::avatar("Tester");
        who.worn.push(Item::new(1, "coat", "coat").on_layer(Layer::Outer).covering(&[BodyPart::Torso], 90, 6));
        who.worn.push(Item::new(2, "shirt", "shirt").covering(&[BodyPart::Torso], 90, 2));
        who.worn.push(Item::new(3, "boots", "boots").covering(&[BodyPart::FootL, BodyPart::FootR], 95, 4));
        who
    }

    fn ids(who: &Character) -> Vec<ItemId> {
        who.worn.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_quit_closes() {
        let mut ui = ScriptedUi::new(&[Action::Quit]);
        let mut who = make_who();
        let outcome = run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(outcome, LayeringOutcome::Closed);
        assert_eq!(ui.draws, 1);
    }

    #[test]
    fn test_grab_and_move_swaps_items() {
        let mut ui = ScriptedUi::new(&[Action::MoveArmor, Action::Down]);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ids(&who), vec![2, 1, 3]);
    }

    #[test]
    fn test_tab_change_drops_grab() {
        // Grab on Torso, switch to Head and back, then move: nothing swaps
        let mut ui = ScriptedUi::new(&[Action::MoveArmor, Action::Right, Action::Left, Action::Down]);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ids(&who), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_armor() {
        let mut ui = ScriptedUi::new(&[Action::SortArmor]);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ids(&who), vec![2, 3, 1]);
    }

    #[test]
    fn test_toggle_hidden() {
        let mut ui = ScriptedUi::new(&[Action::ToggleCloth]);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert!(who.worn.get(0).unwrap().has_trait(ItemTrait::Hidden));
    }

    #[test]
    fn test_picker_offers_only_wearables() {
        let mut ui = ScriptedUi::new(&[Action::EquipArmor]);
        ui.choices.push_back(Some(0));
        let mut who = make_who();
        who.inventory.push(Item::new(10, "rock", "rock"));
        who.inventory.push(Item::new(11, "scarf", "scarf").covering(&[BodyPart::Mouth], 40, 1));

        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ui.offered, vec![vec!["scarf".to_string()]]);
        assert_eq!(ids(&who), vec![1, 2, 3, 11]);
        assert_eq!(who.inventory.len(), 1);
        assert_eq!(who.inventory[0].id, 10);
        assert!(ui.popups.is_empty());
    }

    #[test]
    fn test_stale_pick_shows_notice() {
        let mut ui = ScriptedUi::new(&[Action::EquipArmor]);
        ui.choices.push_back(Some(4));
        let mut who = make_who();
        who.inventory.push(Item::new(11, "scarf", "scarf").covering(&[BodyPart::Mouth], 40, 1));

        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ids(&who), vec![1, 2, 3]);
        assert_eq!(who.inventory.len(), 1);
        assert_eq!(ui.popups, vec!["Can't put this on! (nothing carried in slot 4)".to_string()]);
    }

    #[test]
    fn test_nothing_to_wear() {
        let mut ui = ScriptedUi::new(&[Action::EquipArmor]);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ui.popups, vec!["You have nothing to wear.".to_string()]);
    }

    #[test]
    fn test_equip_here_inserts_before_cursor() {
        // Cursor on the shirt, then wear the undershirt before it
        let mut ui = ScriptedUi::new(&[Action::Down, Action::EquipArmorHere, Action::ToggleCloth]);
        ui.choices.push_back(Some(0));
        let mut who = make_who();
        who.inventory.push(Item::new(12, "undershirt", "undershirt").on_layer(Layer::Skintight).covering(&[BodyPart::Torso], 80, 1));

        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ids(&who), vec![1, 12, 2, 3]);
        // Cursor followed the new item
        assert!(who.worn.get(1).unwrap().has_trait(ItemTrait::Hidden));
    }

    #[test]
    fn test_remove_moves_to_inventory() {
        let mut ui = ScriptedUi::new(&[Action::Down, Action::RemoveArmor]);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ids(&who), vec![1, 3]);
        assert_eq!(who.inventory[0].id, 2);
    }

    #[test]
    fn test_remove_declined() {
        let mut ui = ScriptedUi::new(&[Action::RemoveArmor]);
        ui.answers.push_back(false);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(who.worn.len(), 3);
    }

    #[test]
    fn test_remove_filled_item_suspends() {
        let mut ui = ScriptedUi::new(&[Action::Right, Action::Left, Action::Down, Action::RemoveArmor]);
        let mut who = make_who();
        who.worn.get_mut(1).unwrap().contents_ml = 500;

        let outcome = run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        match outcome {
            LayeringOutcome::Suspended { resume, takeoff: Some(pending) } => {
                assert_eq!(resume, LayeringResume { tab: 0, left_index: 1 });
                assert_eq!(pending.item_id, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(who.worn.len(), 3);
    }

    #[test]
    fn test_negative_moves_suspend() {
        let mut ui = ScriptedUi::new(&[]);
        let mut who = make_who();
        who.moves = -20;
        let outcome = run_layering_screen(&mut ui, &mut who, None, Some(LayeringResume { tab: 3, left_index: 0 })).unwrap();
        assert_eq!(
            outcome,
            LayeringOutcome::Suspended { resume: LayeringResume { tab: 3, left_index: 0 }, takeoff: None }
        );
        assert_eq!(ui.draws, 0);
    }

    #[test]
    fn test_npc_access_checks() {
        let sorter = Character::avatar("Player");
        let mut ui = ScriptedUi::new(&[]);

        let mut far = Character::npc("Bob", (5, 0), Attitude::Friendly);
        let outcome = run_layering_screen(&mut ui, &mut far, Some(&sorter), None).unwrap();
        assert_eq!(outcome, LayeringOutcome::Denied("Bob is too far to sort armor.".to_string()));

        let mut hostile = Character::npc("Eve", (1, 1), Attitude::Hostile);
        let outcome = run_layering_screen(&mut ui, &mut hostile, Some(&sorter), None).unwrap();
        assert_eq!(outcome, LayeringOutcome::Denied("Eve is not friendly!".to_string()));

        let mut friend = Character::npc("Ann", (1, 0), Attitude::Friendly);
        let outcome = run_layering_screen(&mut ui, &mut friend, Some(&sorter), None).unwrap();
        assert_eq!(outcome, LayeringOutcome::Closed);
    }

    #[test]
    fn test_npc_ignores_invlet_assignment() {
        let sorter = Character::avatar("Player");
        let mut ui = ScriptedUi::new(&[Action::AssignInvlets]);
        let mut friend = Character::npc("Ann", (0, 1), Attitude::Friendly);
        friend.worn.push(Item::new(1, "shirt", "shirt").covering(&[BodyPart::Torso], 90, 2));
        run_layering_screen(&mut ui, &mut friend, Some(&sorter), None).unwrap();
        assert_eq!(friend.worn.get(0).unwrap().invlet, None);
    }

    #[test]
    fn test_change_side_requires_sided_item() {
        let mut ui = ScriptedUi::new(&[Action::Right, Action::Right, Action::ChangeSide]);
        let mut who = Character::avatar("Tester");
        who.worn.push(Item::new(1, "patch", "eyepatch").covering(&[BodyPart::Eyes], 50, 0));
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ui.popups, vec!["You cannot swap the side on which your eyepatch is worn.".to_string()]);

        let mut ui = ScriptedUi::new(&[Action::Left, Action::ChangeSide]);
        let mut who = Character::avatar("Tester");
        who.worn.push(
            Item::new(2, "holster", "holster")
                .covering(&[BodyPart::LegL], 10, 1)
                .with_trait(ItemTrait::Sided),
        );
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert!(who.worn.get(0).unwrap().covers(BodyPart::LegR));
    }

    #[test]
    fn test_help_popups_use_bindings() {
        let mut ui = ScriptedUi::new(&[Action::UsageHelp, Action::HelpKeybindings]);
        let mut who = make_who();
        run_layering_screen(&mut ui, &mut who, None, None).unwrap();
        assert_eq!(ui.popups.len(), 2);
        assert!(ui.popups[0].contains("[S] to sort worn armor"));
        assert!(ui.popups[1].contains("q/Esc"));
    }
}
