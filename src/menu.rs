//! Macro menu cursor.
//!
//! The menu snapshots the catalog when it opens and remembers the last
//! selection between openings. Navigation clamps at both ends.

use core::ops::Range;

use crate::config::MENU_WINDOW;
use crate::macro_engine::MacroId;
use crate::ui::input_logic::{clamp_selection, select_next, select_prev, visible_window};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuContext {
    entries: &'static [MacroId],
    selected: usize,
}

impl Default for MenuContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuContext {
    pub const fn new() -> Self {
        Self {
            entries: &MacroId::CATALOG,
            selected: 0,
        }
    }

    /// Snapshot `catalog` and keep the previous cursor, clamped.
    pub fn open(&mut self, catalog: &'static [MacroId]) {
        self.entries = catalog;
        self.selected = clamp_selection(self.selected, catalog.len());
    }

    pub fn up(&mut self) {
        self.selected = select_prev(self.selected);
    }

    pub fn down(&mut self) {
        self.selected = select_next(self.selected, self.entries.len());
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<MacroId> {
        self.entries.get(self.selected).copied()
    }

    pub fn entries(&self) -> &'static [MacroId] {
        self.entries
    }

    /// The rows to draw: `MENU_WINDOW` entries around the cursor.
    pub fn window(&self) -> Range<usize> {
        visible_window(self.selected, self.entries.len(), MENU_WINDOW)
    }
}
