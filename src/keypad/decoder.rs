//! Chord decoder - turns the settled switch set into one logical key.
//!
//! Holding both chord keys is the function modifier. While it is held,
//! a second key selects a combo; combos fire once per fresh press. The
//! menu combo latches a navigation sub-mode in which the up/down keys
//! repeat every tick, and releasing the modifier confirms the selection.
//!
//! Any key that took part in a modifier hold is "consumed" until it is
//! physically released, so letting go of a combo never leaks a plain
//! keystroke. A lone chord key is held back for a few scans to give its
//! partner time to land; released early it still reports as a tap.

use crate::config::{
    CHORD_KEYS, CHORD_SETTLE_SCANS, COMBO_OPEN_MENU, COMBO_QUICK_EXIT, COMBO_SEND_RESULT,
    COMBO_TOGGLE_NUMPAD, MENU_DOWN_KEY, MENU_UP_KEY,
};

use super::{Key, KeySet};

/// Per-tick chord state machine.
#[derive(Debug, Default)]
pub struct ChordDecoder {
    /// Keys used in a modifier hold and not yet released.
    consumed: KeySet,
    /// Scans each chord key has been down on its own.
    settle: [u8; 2],
    modifier_active: bool,
    menu_nav: bool,
}

impl ChordDecoder {
    pub const fn new() -> Self {
        Self {
            consumed: KeySet::empty(),
            settle: [0; 2],
            modifier_active: false,
            menu_nav: false,
        }
    }

    /// True while the function modifier is held.
    pub fn modifier_active(&self) -> bool {
        self.modifier_active
    }

    /// True while the menu navigation sub-mode is latched.
    pub fn menu_nav(&self) -> bool {
        self.menu_nav
    }

    /// Resolve one tick's pressed set into at most one logical key.
    pub fn decode(&mut self, pressed: KeySet) -> Option<Key> {
        self.consumed.retain(pressed);

        let chord_down = [pressed.contains(CHORD_KEYS[0]), pressed.contains(CHORD_KEYS[1])];
        // Only one key beyond the chord pair is tracked per tick: the last
        // one in scan order.
        let secondary = pressed
            .legends()
            .filter(|legend| !CHORD_KEYS.contains(legend))
            .last();

        if chord_down[0] && chord_down[1] {
            self.modifier_active = true;
            self.settle = [0; 2];
            for legend in CHORD_KEYS {
                self.consumed.insert_legend(legend);
            }
            return self.decode_modifier(secondary);
        }

        if self.modifier_active {
            self.modifier_active = false;
            if self.menu_nav {
                self.menu_nav = false;
                return Some(Key::Confirm);
            }
        }

        if let Some(key) = self.decode_chord_keys(chord_down) {
            return Some(key);
        }
        if self.settle.iter().any(|&scans| scans > 0) {
            // A lone chord key is still settling.
            return None;
        }

        match secondary {
            Some(legend) if !self.consumed.contains(legend) => Key::from_legend(legend),
            _ => None,
        }
    }

    fn decode_modifier(&mut self, secondary: Option<u8>) -> Option<Key> {
        let legend = secondary?;

        if self.menu_nav {
            let nav = match legend {
                MENU_UP_KEY => Some(Key::NavUp),
                MENU_DOWN_KEY => Some(Key::NavDown),
                _ => None,
            };
            if nav.is_some() {
                self.consumed.insert_legend(legend);
                return nav;
            }
        }

        if self.consumed.contains(legend) {
            return None;
        }
        self.consumed.insert_legend(legend);

        match legend {
            COMBO_TOGGLE_NUMPAD => Some(Key::ToggleNumpad),
            COMBO_SEND_RESULT => Some(Key::SendResult),
            COMBO_OPEN_MENU => {
                self.menu_nav = true;
                Some(Key::OpenMenu)
            }
            COMBO_QUICK_EXIT => {
                self.menu_nav = false;
                Some(Key::QuickExit)
            }
            _ => None,
        }
    }

    /// Plain reports of the chord keys when the modifier is not held.
    fn decode_chord_keys(&mut self, chord_down: [bool; 2]) -> Option<Key> {
        let blocked = CHORD_KEYS
            .iter()
            .any(|&legend| self.consumed.contains(legend));

        let mut tapped = None;
        for (slot, &legend) in CHORD_KEYS.iter().enumerate() {
            if chord_down[slot] && blocked {
                self.settle[slot] = 0;
            } else if !chord_down[slot] && self.settle[slot] > 0 {
                if self.settle[slot] < CHORD_SETTLE_SCANS {
                    tapped = Key::from_legend(legend);
                }
                self.settle[slot] = 0;
            }
        }
        if tapped.is_some() {
            return tapped;
        }

        for (slot, &legend) in CHORD_KEYS.iter().enumerate() {
            if chord_down[slot] && !blocked {
                self.settle[slot] = self.settle[slot].saturating_add(1);
                if self.settle[slot] >= CHORD_SETTLE_SCANS {
                    return Key::from_legend(legend);
                }
            }
        }
        None
    }
}

/// Dispatch filter owned by the main loop: passes a key only when it
/// differs from the previous tick's key. Repeating keys always pass.
#[derive(Debug, Default)]
pub struct KeyEdge {
    last: Option<Key>,
}

impl KeyEdge {
    pub const fn new() -> Self {
        Self { last: None }
    }

    pub fn filter(&mut self, key: Option<Key>) -> Option<Key> {
        let changed = key != self.last;
        self.last = key;
        match key {
            Some(k) if k.repeats() || changed => Some(k),
            _ => None,
        }
    }
}
