//! Layering screen state
//!
//! Tab, cursors, grab mode and scroll offsets. Owned by the screen loop and
//! handed to rendering by reference.

use serde::{Deserialize, Serialize};

use crate::body::PartFilter;
use crate::character::WornItems;
use crate::items::Item;

/// Where to reopen the screen after it was suspended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeringResume {
    pub tab: usize,
    pub left_index: usize,
}

/// Rows available to the two scrolling lists, reported by the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneSizes {
    pub left_lines: usize,
    pub right_lines: usize,
}

#[derive(Debug, Clone)]
pub struct LayeringState {
    tabs: Vec<PartFilter>,
    pub tab: usize,
    /// Cursor in the visible left list
    pub left_index: usize,
    pub left_offset: usize,
    /// Grabbed item (visible-list index) being moved around
    pub selected: Option<usize>,
    pub right_offset: usize,
    pub panes: PaneSizes,
}

impl LayeringState {
    pub fn new(resume: Option<LayeringResume>) -> Self {
        let tabs = PartFilter::tabs();
        let resume = resume.unwrap_or_default();
        Self {
            tab: resume.tab.min(tabs.len() - 1),
            tabs,
            left_index: resume.left_index,
            left_offset: 0,
            selected: None,
            right_offset: 0,
            panes: PaneSizes::default(),
        }
    }

    pub fn filter(&self) -> PartFilter {
        self.tabs[self.tab]
    }

    pub fn resume(&self) -> LayeringResume {
        LayeringResume { tab: self.tab, left_index: self.left_index }
    }

    /// Keep the cursor inside a list of `size` entries
    pub fn clamp_cursor(&mut self, size: usize) {
        self.left_index = self.left_index.min(size.saturating_sub(1));
        if self.selected.is_some_and(|s| s >= size) {
            self.selected = None;
        }
    }

    /// Record the renderer's pane sizes and pull offsets back into range
    pub fn apply_pane_sizes(&mut self, panes: PaneSizes, left_size: usize, right_size: usize) {
        self.panes = panes;
        self.left_offset = left_list_offset(self.left_offset, self.left_index, panes.left_lines, left_size);
        self.right_offset = right_list_offset(self.right_offset, panes.right_lines, right_size);
    }

    /// Cursor up with wrap-around; a grabbed item moves along
    pub fn move_up(&mut self, worn: &mut WornItems, visible: &[usize]) {
        let size = visible.len();
        if size == 0 {
            return;
        }
        let lines = self.panes.left_lines;
        if self.left_index > 0 {
            self.left_index -= 1;
            if self.left_index < self.left_offset {
                self.left_offset = self.left_index;
            }
        } else {
            self.left_index = size - 1;
            self.left_offset = size.saturating_sub(lines);
        }
        self.shift_selected(worn, visible);
    }

    /// Cursor down with wrap-around; a grabbed item moves along
    pub fn move_down(&mut self, worn: &mut WornItems, visible: &[usize]) {
        let size = visible.len();
        if size == 0 {
            return;
        }
        let lines = self.panes.left_lines;
        if self.left_index + 1 < size {
            self.left_index += 1;
            if lines > 0 && self.left_index >= self.left_offset + lines {
                self.left_offset = self.left_index + 1 - lines;
            }
        } else {
            self.left_index = 0;
            self.left_offset = 0;
        }
        self.shift_selected(worn, visible);
    }

    // The grabbed item trades places with whatever is under the cursor
    fn shift_selected(&mut self, worn: &mut WornItems, visible: &[usize]) {
        let Some(selected) = self.selected else {
            return;
        };
        if let (Some(&from), Some(&to)) = (visible.get(selected), visible.get(self.left_index)) {
            worn.swap(from, to);
            self.selected = Some(self.left_index);
        }
    }

    /// Switch body-part tab; clears cursor and grab
    pub fn change_tab(&mut self, forward: bool) {
        let count = self.tabs.len();
        self.tab = if forward {
            (self.tab + 1) % count
        } else {
            (self.tab + count - 1) % count
        };
        self.left_index = 0;
        self.left_offset = 0;
        self.selected = None;
    }

    pub fn scroll_right(&mut self, down: bool, right_size: usize) {
        if down {
            if self.right_offset + self.panes.right_lines < right_size {
                self.right_offset += 1;
            }
        } else if self.right_offset > 0 {
            self.right_offset -= 1;
        }
    }

    /// Grab the cursor item, or drop the grabbed one
    pub fn toggle_grab(&mut self) {
        self.selected = match self.selected {
            Some(_) => None,
            None => Some(self.left_index),
        };
    }
}

/// Wear positions of the items shown under `filter`
pub fn visible_indices(worn: &[Item], filter: PartFilter) -> Vec<usize> {
    worn.iter()
        .enumerate()
        .filter(|(_, item)| match filter.part() {
            Some(part) => item.covers(part),
            None => true,
        })
        .map(|(i, _)| i)
        .collect()
}

/// First visible row of the left list, keeping `index` on screen
pub fn left_list_offset(offset: usize, index: usize, lines: usize, size: usize) -> usize {
    if lines == 0 {
        return 0;
    }
    let mut offset = if lines > size {
        0
    } else if offset + lines > size {
        size - lines
    } else {
        offset
    };
    if offset > index {
        offset = index;
    } else if offset + lines <= index {
        offset = index + 1 - lines;
    }
    offset
}

/// First visible row of the right list
pub fn right_list_offset(offset: usize, lines: usize, size: usize) -> usize {
    if lines > size {
        0
    } else if offset + lines > size {
        size - lines
    } else {
        offset
    }
}
