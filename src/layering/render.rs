//! Layering screen rendering
//!
//! Three panes: worn items on the left, details of the item under the cursor
//! in the middle (with per-part encumbrance below), and every body part's
//! coverage on the right.

use std::collections::BTreeSet;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::body::{BodyPart, PartFilter};
use crate::character::Character;
use crate::items::{format_volume, ItemTrait, VOLUME_UNITS_ABBR};
use crate::ui::input::{Action, KeyBindings};
use crate::ui::layout::fullscreen_overlay;
use crate::ui::text::truncate_name;
use super::describe::{clothing_flags_description, clothing_layer, clothing_properties, clothing_protection, penalty_messages};
use super::penalties::{combines_with_opposite, item_penalties, items_covering, layering_penalty, LayeringItemInfo};
use super::state::{left_list_offset, right_list_offset, LayeringState, PaneSizes};

/// Rows used by the "Total Protection" block under a specific part's list
const PROTECTION_ROWS: usize = 5;

/// A row of the right-hand coverage list
#[derive(Debug, Clone, PartialEq)]
pub enum RightEntry {
    /// Body part heading; `merged` covers the part and its opposite
    Heading { part: BodyPart, merged: bool },
    Item(LayeringItemInfo),
}

/// Everything the renderer reads for one frame
pub struct LayeringView<'a> {
    pub who: &'a Character,
    pub state: &'a LayeringState,
    /// Wear positions shown in the left list
    pub visible: &'a [usize],
    pub right: &'a [RightEntry],
}

/// Color for a penalty severity
pub fn badness_color(badness: u8) -> Color {
    match badness {
        0 => Color::Gray,
        1 => Color::Yellow,
        _ => Color::LightRed,
    }
}

/// Right-hand list: each body part followed by the items covering it.
/// Paired parts with identical entries share one heading.
pub fn right_list(who: &Character) -> Vec<RightEntry> {
    let worn = who.worn.as_slice();
    let mut shown = BTreeSet::new();
    let mut entries = Vec::new();

    for &part in BodyPart::all() {
        let merged = combines_with_opposite(worn, part);
        if merged && shown.contains(&part.opposite()) {
            continue;
        }
        shown.insert(part);
        entries.push(RightEntry::Heading { part, merged });
        entries.extend(items_covering(worn, part).into_iter().map(RightEntry::Item));
    }
    entries
}

/// Draw the screen and report how many list rows fit
pub fn render_layering(frame: &mut Frame, view: &LayeringView, keys: &KeyBindings) -> PaneSizes {
    let area = fullscreen_overlay(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sort Armor ")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(inner);
    render_top_bar(frame.buffer_mut(), view.state, keys, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(BodyPart::all().len() as u16 + 3),
        ])
        .split(columns[1]);

    let left_lines = render_left(frame.buffer_mut(), view, columns[0]);
    render_details(frame, view, middle[0]);
    render_encumbrance(frame.buffer_mut(), view, middle[1]);
    let right_lines = render_right(frame.buffer_mut(), view, columns[2]);

    PaneSizes { left_lines, right_lines }
}

fn render_top_bar(buf: &mut Buffer, state: &LayeringState, keys: &KeyBindings, area: Rect) {
    let white = Style::default().fg(Color::White);
    let yellow = Style::default().fg(Color::Yellow);
    buf.set_string(area.x, area.y, "Sort Armor", white);
    buf.set_string(area.x + 10, area.y, format!("  << {} >>", state.filter().heading()), yellow);

    let hints = Line::from(vec![
        Span::styled("[", white),
        Span::styled(keys.describe(Action::ToggleCloth), yellow),
        Span::styled("] Hide sprite.  [", white),
        Span::styled(keys.describe(Action::ChangeSide), yellow),
        Span::styled("] Change side.  Press [", white),
        Span::styled(keys.describe(Action::UsageHelp), yellow),
        Span::styled("] for help.", white),
    ]);
    let width = hints.width() as u16;
    let x = area.x + area.width.saturating_sub(width);
    buf.set_line(x, area.y, &hints, area.width.min(width));
}

fn pane(title: &str, area: Rect, buf: &mut Buffer) -> Rect {
    use ratatui::widgets::Widget;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(Color::Rgb(100, 100, 120)));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

fn right_print(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width);
    buf.set_string(x, y, text, style);
}

fn render_left(buf: &mut Buffer, view: &LayeringView, area: Rect) -> usize {
    let inner = pane(" Worn ", area, buf);
    if inner.height < 3 || inner.width < 8 {
        return 0;
    }
    let state = view.state;
    let who = view.who;
    let worn = who.worn.as_slice();
    let filter = state.filter();
    let gray = Style::default().fg(Color::Gray);

    let protection_rows = if filter.part().is_some() && inner.height as usize > PROTECTION_ROWS + 3 {
        PROTECTION_ROWS
    } else {
        0
    };
    let lines = (inner.height as usize).saturating_sub(2 + protection_rows);
    let size = view.visible.len();
    let offset = left_list_offset(state.left_offset, state.left_index, lines, size);

    buf.set_string(inner.x, inner.y, "(Innermost)", gray);
    right_print(buf, inner, inner.y, &format!("Storage ({VOLUME_UNITS_ABBR})"), gray);

    for (row, item_index) in (offset..size).take(lines).enumerate() {
        let y = inner.y + 1 + row as u16;
        let worn_index = view.visible[item_index];
        let item = &worn[worn_index];

        if item_index == state.left_index {
            buf.set_string(inner.x, y, ">>", Style::default().fg(Color::Yellow));
        }

        let offset_x: u16 = if state.selected == Some(item_index) { 4 } else { 3 };
        let penalties = item_penalties(worn, worn_index, filter);
        let storage = format_volume(item.storage_ml);
        let name_width = (inner.width as usize).saturating_sub(offset_x as usize + storage.len() + 1);
        let mut name_style = Style::default().fg(badness_color(penalties.badness()));
        if state.selected == Some(item_index) {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        buf.set_string(inner.x + offset_x, y, truncate_name(&item.display_name(), name_width), name_style);
        right_print(buf, inner, y, &storage, gray);

        if item.has_trait(ItemTrait::Hidden) {
            buf.set_string(inner.x + offset_x - 1, y, "H", Style::default().fg(Color::Cyan));
        }
    }

    let footer_y = inner.y + inner.height - 1;
    if let (Some(part), true) = (filter.part(), protection_rows > 0) {
        let top = footer_y - PROTECTION_ROWS as u16;
        let stab = (who.armor_cut(part) as f32 * 0.8).round() as i32;
        buf.set_string(inner.x, top, "Total Protection:", Style::default().fg(Color::White));
        buf.set_string(inner.x + 2, top + 1, format!("Bash: {}", who.armor_bash(part)), gray);
        buf.set_string(inner.x + 2, top + 2, format!("Cut: {}", who.armor_cut(part)), gray);
        buf.set_string(inner.x + 2, top + 3, format!("Stab: {stab}"), gray);
        buf.set_string(inner.x + 2, top + 4, format!("Ballistic: {}", who.armor_bullet(part)), gray);
    }

    buf.set_string(inner.x, footer_y, "(Outermost)", gray);
    let blue = Style::default().fg(Color::LightBlue);
    if offset + lines < size {
        right_print(buf, inner, footer_y, "<more>", blue);
    }
    if size == 0 {
        right_print(buf, inner, footer_y, "<empty>", blue);
    }

    lines
}

fn render_details(frame: &mut Frame, view: &LayeringView, area: Rect) {
    let inner = pane(" Details ", area, frame.buffer_mut());
    let worn = view.who.worn.as_slice();
    let filter = view.state.filter();

    let Some(&worn_index) = view.visible.get(view.state.left_index) else {
        let empty = Paragraph::new("Nothing to see here!").style(Style::default().fg(Color::White));
        frame.render_widget(empty, inner);
        return;
    };
    let item = &worn[worn_index];
    let width = (inner.width as usize).saturating_sub(3);
    let blue = Style::default().fg(Color::LightBlue);

    let mut lines = vec![Line::from(Span::styled(
        item.type_name(1),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(clothing_properties(item, width, filter));
    lines.extend(clothing_protection(item, width));

    let layer = clothing_layer(item);
    if !layer.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(layer, blue)));
    }

    let flags = clothing_flags_description(item);
    if !flags.is_empty() {
        lines.push(Line::from(""));
        lines.extend(flags.into_iter().map(|f| Line::from(Span::styled(f, blue))));
    }

    let penalties = item_penalties(worn, worn_index, filter);
    let messages = penalty_messages(item, &penalties);
    if !messages.is_empty() {
        lines.push(Line::from(""));
        lines.extend(messages);
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_encumbrance(buf: &mut Buffer, view: &LayeringView, area: Rect) {
    let inner = pane(" Encumbrance and Warmth ", area, buf);
    let who = view.who;
    let worn = who.worn.as_slice();
    let selected = view.visible.get(view.state.left_index).map(|&i| &worn[i]);

    for (row, &part) in BodyPart::all().iter().enumerate() {
        if row as u16 >= inner.height {
            break;
        }
        let color = if selected.is_some_and(|item| item.covers(part)) {
            Color::Green
        } else {
            Color::Gray
        };
        let text = format!(
            "{:<11}{:>3}+{:<3}{:>4}",
            part.heading(false),
            who.base_encumbrance(part),
            layering_penalty(worn, part),
            who.warmth(part),
        );
        buf.set_string(inner.x, inner.y + row as u16, truncate_name(&text, inner.width as usize), Style::default().fg(color));
    }
}

fn render_right(buf: &mut Buffer, view: &LayeringView, area: Rect) -> usize {
    let inner = pane(" Coverage ", area, buf);
    if inner.height < 3 || inner.width < 8 {
        return 0;
    }
    let gray = Style::default().fg(Color::Gray);
    let lines = (inner.height as usize).saturating_sub(2);
    let size = view.right.len();
    let offset = right_list_offset(view.state.right_offset, lines, size);
    let filter = view.state.filter();

    buf.set_string(inner.x, inner.y, "(Innermost)", gray);
    right_print(buf, inner, inner.y, "Encumbrance", gray);

    for (row, entry) in view.right.iter().skip(offset).take(lines).enumerate() {
        let y = inner.y + 1 + row as u16;
        match entry {
            RightEntry::Heading { part, merged } => {
                let highlighted = filter == PartFilter::Part(*part)
                    || (*merged && filter == PartFilter::Part(part.opposite()));
                let color = if highlighted { Color::Yellow } else { Color::White };
                buf.set_string(inner.x + 1, y, format!("{}:", part.heading(*merged)), Style::default().fg(color));
            }
            RightEntry::Item(info) => {
                let badness = info.penalties.badness();
                let name_width = (inner.width as usize).saturating_sub(6);
                buf.set_string(
                    inner.x + 2,
                    y,
                    truncate_name(&info.name, name_width),
                    Style::default().fg(badness_color(badness)),
                );
                let plus = if badness > 0 { '+' } else { ' ' };
                right_print(buf, inner, y, &format!("{:3}{}", info.encumbrance, plus), gray);
            }
        }
    }

    let footer_y = inner.y + inner.height - 1;
    buf.set_string(inner.x, footer_y, "(Outermost)", gray);
    if offset + lines < size {
        right_print(buf, inner, footer_y, "<more>", Style::default().fg(Color::LightBlue));
    }

    lines
}
