//! Layering penalties
//!
//! Works out which encumbrance penalties a worn item is involved in. Always
//! computed from the current wear order; nothing here is cached.

use std::collections::BTreeSet;

use crate::body::{BodyPart, PartFilter};
use crate::items::Item;

/// Penalties a single worn item causes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPenalties {
    /// Parts where two or more non-exempt items share this item's layer
    pub stacking: Vec<BodyPart>,
    /// Parts where this item is worn outside something it belongs beneath
    pub out_of_order: Vec<BodyPart>,
    /// Names of inner items common to every out-of-order part
    pub bad_items_within: BTreeSet<String>,
}

impl ItemPenalties {
    /// Severity 0-2: one point each for stacking and out-of-order
    pub fn badness(&self) -> u8 {
        (!self.stacking.is_empty()) as u8 + (!self.out_of_order.is_empty()) as u8
    }
}

/// Penalties for the item at `index` in wear order, restricted by `filter`
pub fn item_penalties(worn: &[Item], index: usize, filter: PartFilter) -> ItemPenalties {
    let Some(subject) = worn.get(index) else {
        log::error!("penalties requested for worn index {} of {}", index, worn.len());
        return ItemPenalties::default();
    };
    let layer = subject.layer;

    let mut stacking = Vec::new();
    let mut out_of_order = Vec::new();
    let mut lists_within: Vec<BTreeSet<String>> = Vec::new();

    for part in subject.covered_parts().filter(|p| filter.admits(*p)) {
        let same_layer = worn
            .iter()
            .filter(|i| i.layer == layer && i.covers(part) && !i.is_layering_exempt())
            .count();
        if same_layer > 1 {
            stacking.push(part);
        }

        let within: BTreeSet<String> = worn[..index]
            .iter()
            .filter(|i| i.layer > layer && i.covers(part))
            .map(|i| i.type_name(1))
            .collect();
        if !within.is_empty() {
            out_of_order.push(part);
            lists_within.push(within);
        }
    }

    // Only an item common to every part can be named in the message
    let bad_items_within = lists_within
        .into_iter()
        .reduce(|a, b| a.intersection(&b).cloned().collect())
        .unwrap_or_default();

    ItemPenalties { stacking, out_of_order, bad_items_within }
}

/// Extra encumbrance `part` carries from bad layering
pub fn layering_penalty(worn: &[Item], part: BodyPart) -> i32 {
    (0..worn.len())
        .filter(|&i| worn[i].covers(part))
        .map(|i| {
            let p = item_penalties(worn, i, PartFilter::Part(part));
            (!p.stacking.is_empty()) as i32 + 2 * (!p.out_of_order.is_empty()) as i32
        })
        .sum()
}

/// Right-pane entry for one item on one body part
#[derive(Debug, Clone)]
pub struct LayeringItemInfo {
    pub penalties: ItemPenalties,
    pub encumbrance: i32,
    pub name: String,
}

// Paired parts are merged when their entries match. Penalties name different
// parts on each side, so only badness takes part in the comparison.
impl PartialEq for LayeringItemInfo {
    fn eq(&self, other: &Self) -> bool {
        self.penalties.badness() == other.penalties.badness()
            && self.encumbrance == other.encumbrance
            && self.name == other.name
    }
}

/// Entries for every worn item covering `part`, in wear order
pub fn items_covering(worn: &[Item], part: BodyPart) -> Vec<LayeringItemInfo> {
    worn.iter()
        .enumerate()
        .filter(|(_, item)| item.covers(part))
        .map(|(i, item)| LayeringItemInfo {
            penalties: item_penalties(worn, i, PartFilter::Part(part)),
            encumbrance: item.encumbrance(part),
            name: item.display_name(),
        })
        .collect()
}

/// Whether `part` and its opposite render as one merged heading
pub fn combines_with_opposite(worn: &[Item], part: BodyPart) -> bool {
    part.is_paired() && items_covering(worn, part) == items_covering(worn, part.opposite())
}

/// Join names as "a", "a and b" or "a, b, and c"
pub fn enumerate_as_string(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Readable list of parts, merging adjacent left/right pairs ("arms").
/// Callers must not pass an empty list.
pub fn body_part_names(parts: &[BodyPart]) -> Option<String> {
    if parts.is_empty() {
        log::error!("asked for names of an empty body part list");
        return None;
    }

    let mut names = Vec::with_capacity(parts.len());
    let mut i = 0;
    while i < parts.len() {
        let part = parts[i];
        if i + 1 < parts.len() && part.is_paired() && parts[i + 1] == part.opposite() {
            names.push(part.name_accusative(true).to_string());
            i += 2;
        } else {
            names.push(part.name_accusative(false).to_string());
            i += 1;
        }
    }
    Some(enumerate_as_string(&names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemTrait, Layer};
    use proptest::prelude::*;

    fn make_item(id: u64, name: &str, layer: Layer, parts: &[BodyPart]) -> Item {
        Item::new(id, name, name).on_layer(layer).covering(parts, 80, 3)
    }

    #[test]
    fn test_same_layer_pair_flags_both() {
        let worn = vec![
            make_item(1, "shirt", Layer::Regular, &[BodyPart::Torso]),
            make_item(2, "sweater", Layer::Regular, &[BodyPart::Torso]),
        ];
        for i in 0..2 {
            let p = item_penalties(&worn, i, PartFilter::All);
            assert_eq!(p.stacking, vec![BodyPart::Torso]);
            assert!(p.out_of_order.is_empty());
            assert_eq!(p.badness(), 1);
        }
    }

    #[test]
    fn test_exempt_items_do_not_stack() {
        let worn = vec![
            make_item(1, "shirt", Layer::Regular, &[BodyPart::Torso]),
            make_item(2, "cloak", Layer::Regular, &[BodyPart::Torso]).with_trait(ItemTrait::Semitangible),
            make_item(3, "pouch", Layer::Regular, &[BodyPart::Torso]).with_trait(ItemTrait::Compact),
        ];
        for i in 0..3 {
            assert!(item_penalties(&worn, i, PartFilter::All).stacking.is_empty());
        }
    }

    #[test]
    fn test_outer_before_regular_penalizes_regular() {
        let worn = vec![
            make_item(1, "coat", Layer::Outer, &[BodyPart::Torso]),
            make_item(2, "shirt", Layer::Regular, &[BodyPart::Torso]),
        ];
        assert_eq!(item_penalties(&worn, 0, PartFilter::All).badness(), 0);

        let shirt = item_penalties(&worn, 1, PartFilter::All);
        assert_eq!(shirt.out_of_order, vec![BodyPart::Torso]);
        assert_eq!(shirt.bad_items_within, BTreeSet::from(["coat".to_string()]));
    }

    #[test]
    fn test_out_of_order_relative_to_middle_item() {
        let worn = vec![
            make_item(1, "shirt", Layer::Regular, &[BodyPart::Torso]),
            make_item(2, "coat", Layer::Outer, &[BodyPart::Torso]),
            make_item(3, "sweater", Layer::Regular, &[BodyPart::Torso]),
        ];
        assert!(item_penalties(&worn, 1, PartFilter::All).out_of_order.is_empty());
        let sweater = item_penalties(&worn, 2, PartFilter::All);
        assert_eq!(sweater.out_of_order, vec![BodyPart::Torso]);
        assert!(sweater.bad_items_within.contains("coat"));
        assert_eq!(sweater.badness(), 2);
    }

    #[test]
    fn test_disjoint_offenders_intersect_to_empty() {
        let worn = vec![
            make_item(1, "coat", Layer::Outer, &[BodyPart::Torso]),
            make_item(2, "gauntlets", Layer::Outer, &[BodyPart::ArmL]),
            make_item(3, "shirt", Layer::Regular, &[BodyPart::Torso, BodyPart::ArmL]),
        ];
        let p = item_penalties(&worn, 2, PartFilter::All);
        assert_eq!(p.out_of_order, vec![BodyPart::Torso, BodyPart::ArmL]);
        assert!(p.bad_items_within.is_empty());
    }

    #[test]
    fn test_common_offender_survives_intersection() {
        let worn = vec![
            make_item(1, "coat", Layer::Outer, &[BodyPart::Torso, BodyPart::ArmL]),
            make_item(2, "gauntlets", Layer::Outer, &[BodyPart::ArmL]),
            make_item(3, "shirt", Layer::Regular, &[BodyPart::Torso, BodyPart::ArmL]),
        ];
        let p = item_penalties(&worn, 2, PartFilter::All);
        assert_eq!(p.bad_items_within, BTreeSet::from(["coat".to_string()]));
    }

    #[test]
    fn test_filter_restricts_parts() {
        let worn = vec![
            make_item(1, "coat", Layer::Outer, &[BodyPart::ArmL]),
            make_item(2, "shirt", Layer::Regular, &[BodyPart::Torso, BodyPart::ArmL]),
        ];
        assert!(item_penalties(&worn, 1, PartFilter::Part(BodyPart::Torso)).out_of_order.is_empty());
        assert_eq!(
            item_penalties(&worn, 1, PartFilter::Part(BodyPart::ArmL)).out_of_order,
            vec![BodyPart::ArmL]
        );
        // Filtering on a part the item doesn't cover yields nothing
        assert_eq!(item_penalties(&worn, 0, PartFilter::Part(BodyPart::Head)), ItemPenalties::default());
    }

    #[test]
    fn test_out_of_range_index_is_empty() {
        let worn = vec![make_item(1, "shirt", Layer::Regular, &[BodyPart::Torso])];
        assert_eq!(item_penalties(&worn, 3, PartFilter::All), ItemPenalties::default());
    }

    #[test]
    fn test_layering_penalty() {
        let worn = vec![
            make_item(1, "coat", Layer::Outer, &[BodyPart::Torso]),
            make_item(2, "shirt", Layer::Regular, &[BodyPart::Torso]),
            make_item(3, "sweater", Layer::Regular, &[BodyPart::Torso]),
        ];
        // shirt and sweater stack (1 each) and both sit outside the coat (2 each)
        assert_eq!(layering_penalty(&worn, BodyPart::Torso), 6);
        assert_eq!(layering_penalty(&worn, BodyPart::Head), 0);
    }

    #[test]
    fn test_body_part_names() {
        assert_eq!(body_part_names(&[]), None);
        assert_eq!(body_part_names(&[BodyPart::Torso]).unwrap(), "torso");
        assert_eq!(
            body_part_names(&[BodyPart::Torso, BodyPart::ArmL, BodyPart::ArmR]).unwrap(),
            "torso and arms"
        );
        assert_eq!(
            body_part_names(&[BodyPart::Head, BodyPart::ArmL, BodyPart::LegR]).unwrap(),
            "head, left arm, and right leg"
        );
    }

    #[test]
    fn test_combines_paired_parts() {
        let worn = vec![make_item(1, "shirt", Layer::Regular, &[BodyPart::Torso, BodyPart::ArmL, BodyPart::ArmR])];
        assert!(combines_with_opposite(&worn, BodyPart::ArmL));
        assert!(!combines_with_opposite(&worn, BodyPart::Torso));

        let lopsided = vec![make_item(1, "bracer", Layer::Outer, &[BodyPart::ArmL])];
        assert!(!combines_with_opposite(&lopsided, BodyPart::ArmL));
    }

    const PARTS: [BodyPart; 3] = [BodyPart::Torso, BodyPart::ArmL, BodyPart::Head];

    fn arb_worn() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec((0usize..7, 1u8..8, any::<bool>()), 0..8).prop_map(|specs| {
            let layers = [
                Layer::Personal, Layer::Skintight, Layer::Regular, Layer::Waist,
                Layer::Outer, Layer::Belted, Layer::Aura,
            ];
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (layer, mask, exempt))| {
                    let parts: Vec<BodyPart> = PARTS
                        .iter()
                        .enumerate()
                        .filter(|(bit, _)| mask & (1 << bit) != 0)
                        .map(|(_, p)| *p)
                        .collect();
                    let item = make_item(i as u64, &format!("item{i}"), layers[layer], &parts);
                    if exempt { item.with_trait(ItemTrait::Compact) } else { item }
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_out_of_order_iff_earlier_higher_layer(worn in arb_worn()) {
            for (i, item) in worn.iter().enumerate() {
                let p = item_penalties(&worn, i, PartFilter::All);
                for part in PARTS {
                    let expected = item.covers(part)
                        && worn[..i].iter().any(|o| o.layer > item.layer && o.covers(part));
                    prop_assert_eq!(p.out_of_order.contains(&part), expected);
                }
            }
        }

        #[test]
        fn prop_evaluation_is_idempotent(worn in arb_worn()) {
            for i in 0..worn.len() {
                prop_assert_eq!(
                    item_penalties(&worn, i, PartFilter::All),
                    item_penalties(&worn, i, PartFilter::All)
                );
            }
        }

        #[test]
        fn prop_second_same_layer_item_adds_stacking(worn in arb_worn(), layer in 0usize..7) {
            let layers = [
                Layer::Personal, Layer::Skintight, Layer::Regular, Layer::Waist,
                Layer::Outer, Layer::Belted, Layer::Aura,
            ];
            let layer = layers[layer];
            // Keep only items that don't touch the torso on this layer
            let mut base: Vec<Item> = worn
                .into_iter()
                .filter(|i| !(i.layer == layer && i.covers(BodyPart::Torso)))
                .collect();
            base.push(make_item(100, "first", layer, &[BodyPart::Torso]));
            let first = base.len() - 1;
            prop_assert!(!item_penalties(&base, first, PartFilter::All).stacking.contains(&BodyPart::Torso));

            base.push(make_item(101, "second", layer, &[BodyPart::Torso]));
            prop_assert!(item_penalties(&base, first, PartFilter::All).stacking.contains(&BodyPart::Torso));

            base.pop();
            prop_assert!(!item_penalties(&base, first, PartFilter::All).stacking.contains(&BodyPart::Torso));
        }
    }
}
