//! Item description blocks for the detail pane

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::body::PartFilter;
use crate::items::{format_volume, Item, ItemTrait, VOLUME_UNITS_ABBR};
use crate::ui::text::name_and_value;
use super::penalties::{body_part_names, ItemPenalties};

const SPACE: &str = "  ";

/// Descriptive traits in the order they are listed
const DESCRIBED_TRAITS: [ItemTrait; 11] = [
    ItemTrait::Hood,
    ItemTrait::Pockets,
    ItemTrait::Waterproof,
    ItemTrait::WaterFriendly,
    ItemTrait::Fancy,
    ItemTrait::SuperFancy,
    ItemTrait::Flotation,
    ItemTrait::Oversize,
    ItemTrait::SwimGoggles,
    ItemTrait::Semitangible,
    ItemTrait::Compact,
];

fn header(title: &str) -> Line<'static> {
    Line::from(Span::styled(format!("[{title}]"), Style::default().fg(Color::Green)))
}

fn row(name: &str, value: String, width: usize) -> Line<'static> {
    Line::from(Span::styled(
        name_and_value(&format!("{SPACE}{name}"), &value, width),
        Style::default().fg(Color::Gray),
    ))
}

/// Sentence describing the item's layer; empty for regular clothing
pub fn clothing_layer(item: &Item) -> &'static str {
    item.layer.description()
}

/// Coverage, encumbrance, warmth and storage. "All" uses averages.
pub fn clothing_properties(item: &Item, width: usize, filter: PartFilter) -> Vec<Line<'static>> {
    let (coverage, encumbrance) = match filter.part() {
        Some(part) => (item.coverage(part) as i32, item.encumbrance(part)),
        None => (item.avg_coverage(), item.avg_encumbrance()),
    };
    vec![
        header("Properties"),
        row("Coverage:", format!("{coverage:3}"), width),
        row("Encumbrance:", format!("{encumbrance:3}"), width),
        row("Warmth:", format!("{:3}", item.warmth), width),
        row(&format!("Storage ({VOLUME_UNITS_ABBR}):"), format_volume(item.storage_ml), width),
    ]
}

pub fn clothing_protection(item: &Item, width: usize) -> Vec<Line<'static>> {
    let r = &item.resistances;
    vec![
        header("Protection"),
        row("Bash:", format!("{:3}", r.bash), width),
        row("Cut:", format!("{:3}", r.cut), width),
        row("Ballistic:", format!("{:3}", r.bullet), width),
        row("Acid:", format!("{:3}", r.acid), width),
        row("Fire:", format!("{:3}", r.fire), width),
        row("Environmental:", format!("{:3}", r.environmental), width),
    ]
}

/// One sentence per descriptive trait
pub fn clothing_flags_description(item: &Item) -> Vec<&'static str> {
    let mut stack = Vec::new();

    if item.has_trait(ItemTrait::Fit) {
        stack.extend(ItemTrait::Fit.description());
    } else if item.has_trait(ItemTrait::Varsize) {
        stack.extend(ItemTrait::Varsize.description());
    }

    for item_trait in DESCRIBED_TRAITS {
        if item.has_trait(item_trait) {
            stack.extend(item_trait.description());
        }
    }
    stack
}

/// Messages explaining the item's stacking and out-of-order penalties
pub fn penalty_messages(item: &Item, penalties: &ItemPenalties) -> Vec<Line<'static>> {
    let gray = Style::default().fg(Color::Gray);
    let blue = Style::default().fg(Color::LightBlue);
    let red = Style::default().fg(Color::LightRed);
    let mut lines = Vec::new();

    if let Some(parts) = (!penalties.stacking.is_empty())
        .then(|| body_part_names(&penalties.stacking))
        .flatten()
    {
        lines.push(Line::from(vec![
            Span::styled("Wearing multiple items ", gray),
            Span::styled(item.layer.penalty_phrase(), blue),
            Span::styled(" on your ", gray),
            Span::styled(parts, red),
            Span::styled(" is adding encumbrance there.", gray),
        ]));
    }

    if let Some(parts) = (!penalties.out_of_order.is_empty())
        .then(|| body_part_names(&penalties.out_of_order))
        .flatten()
    {
        let mut spans = match penalties.bad_items_within.iter().next() {
            Some(bad_item) => vec![
                Span::styled("Wearing this outside your ", gray),
                Span::styled(bad_item.clone(), blue),
                Span::styled(" is adding encumbrance to your ", gray),
            ],
            None => vec![Span::styled(
                "Wearing this outside items it would normally be beneath is adding encumbrance to your ",
                gray,
            )],
        };
        spans.push(Span::styled(parts, red));
        spans.push(Span::styled(".", gray));
        lines.push(Line::from(spans));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyPart;
    use crate::items::{Layer, Resistances};
    use crate::layering::penalties::item_penalties;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn make_item(id: u64, name: &str, layer: Layer, parts: &[BodyPart]) -> Item {
        Item::new(id, name, name).on_layer(layer).covering(parts, 80, 3)
    }

    #[test]
    fn test_properties_use_filter() {
        let item = Item::new(1, "hoodie", "hoodie")
            .covering(&[BodyPart::Torso], 90, 8)
            .covering(&[BodyPart::Head], 30, 2);
        let part = clothing_properties(&item, 20, PartFilter::Part(BodyPart::Head));
        assert_eq!(text(&part[0]), "[Properties]");
        assert!(text(&part[1]).ends_with(" 30"));
        assert!(text(&part[2]).ends_with("  2"));

        let all = clothing_properties(&item, 20, PartFilter::All);
        assert!(text(&all[1]).ends_with(" 60"));
        assert!(text(&all[2]).ends_with("  5"));
        assert_eq!(text(&all[4]).chars().count(), 20);
    }

    #[test]
    fn test_protection_rows() {
        let item = Item::new(1, "vest", "vest")
            .with_resistances(Resistances { cut: 12, ..Default::default() });
        let lines = clothing_protection(&item, 18);
        assert_eq!(lines.len(), 7);
        assert!(text(&lines[2]).starts_with("  Cut:"));
        assert!(text(&lines[2]).ends_with(" 12"));
    }

    #[test]
    fn test_flags_description() {
        let item = Item::new(1, "coat", "coat")
            .with_trait(ItemTrait::Fit)
            .with_trait(ItemTrait::Varsize)
            .with_trait(ItemTrait::Pockets)
            .with_trait(ItemTrait::Hidden);
        assert_eq!(clothing_flags_description(&item), vec!["It fits you well.", "It has pockets."]);
    }

    #[test]
    fn test_layer_sentence() {
        let item = make_item(1, "tights", Layer::Skintight, &[BodyPart::LegL]);
        assert_eq!(clothing_layer(&item), "This is worn next to the skin.");
        assert_eq!(clothing_layer(&make_item(2, "shirt", Layer::Regular, &[])), "");
    }

    #[test]
    fn test_penalty_messages() {
        let worn = vec![
            make_item(1, "coat", Layer::Outer, &[BodyPart::Torso]),
            make_item(2, "shirt", Layer::Regular, &[BodyPart::Torso, BodyPart::ArmL, BodyPart::ArmR]),
            make_item(3, "sweater", Layer::Regular, &[BodyPart::ArmL, BodyPart::ArmR]),
        ];
        let penalties = item_penalties(&worn, 1, PartFilter::All);
        let lines = penalty_messages(&worn[1], &penalties);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            text(&lines[0]),
            "Wearing multiple items of normal clothing on your arms is adding encumbrance there."
        );
        assert_eq!(
            text(&lines[1]),
            "Wearing this outside your coat is adding encumbrance to your torso."
        );

        let clean = item_penalties(&worn, 0, PartFilter::All);
        assert!(penalty_messages(&worn[0], &clean).is_empty());
    }

    #[test]
    fn test_generic_out_of_order_message() {
        let worn = vec![
            make_item(1, "coat", Layer::Outer, &[BodyPart::Torso]),
            make_item(2, "gauntlets", Layer::Outer, &[BodyPart::HandL]),
            make_item(3, "shirt", Layer::Regular, &[BodyPart::Torso, BodyPart::HandL]),
        ];
        let penalties = item_penalties(&worn, 2, PartFilter::All);
        let lines = penalty_messages(&worn[2], &penalties);
        assert_eq!(
            text(&lines[0]),
            "Wearing this outside items it would normally be beneath is adding encumbrance to your torso and left hand."
        );
    }
}
