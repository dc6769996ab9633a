//! Calculator state machine.
//!
//! There is no single state tag: behaviour follows from the pending
//! operator, the new-entry flag and the mode flags, which stay
//! orthogonal. Operators chain strictly left to right, so
//! `2 + 3 * 4 =` gives `20`.

use crate::config::MAX_ENTRY_LEN;
use crate::keypad::Key;

use super::{evaluate, format_result, value_from, Op, Value};

/// Short macro label shown in the bottom bar.
pub type Label = heapless::String<8>;

/// Which stage of the progressive clear ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClearStage {
    /// The number being typed was reset to `0`.
    Entry,
    /// The stored operand and pending operator were dropped.
    Operation,
    /// The active function label was dropped.
    Function,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    display: Value,
    stored: Value,
    pending: Option<Op>,
    new_entry: bool,
    function: Label,
    numpad: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            display: value_from("0"),
            stored: Value::new(),
            pending: None,
            new_entry: true,
            function: Label::new(),
            numpad: false,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn stored(&self) -> &str {
        &self.stored
    }

    pub fn pending_op(&self) -> Option<Op> {
        self.pending
    }

    pub fn is_new_entry(&self) -> bool {
        self.new_entry
    }

    pub fn function_name(&self) -> &str {
        &self.function
    }

    pub fn numpad_mode(&self) -> bool {
        self.numpad
    }

    /// Apply one arithmetic key. Mode keys are ignored here.
    pub fn apply(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.press_digit(d),
            Key::Point => self.press_point(),
            Key::Op(op) => self.press_operator(op),
            Key::Equals => {
                self.press_equals();
            }
            Key::Clear => {
                self.press_clear();
            }
            _ => {}
        }
    }

    pub fn press_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        let c = char::from(b'0' + digit);
        if self.new_entry {
            self.display.clear();
            let _ = self.display.push(c);
            self.new_entry = false;
        } else if self.display.len() < MAX_ENTRY_LEN {
            let _ = self.display.push(c);
        }
    }

    pub fn press_point(&mut self) {
        if self.new_entry {
            self.display = value_from("0.");
            self.new_entry = false;
        } else if !self.display.contains('.') {
            let _ = self.display.push('.');
        }
    }

    pub fn press_operator(&mut self, op: Op) {
        if let Some(pending) = self.pending {
            if !self.stored.is_empty() && !self.new_entry {
                self.display = evaluate(&self.stored, pending, &self.display);
            }
        }
        self.stored = self.display.clone();
        self.pending = Some(op);
        self.new_entry = true;
    }

    /// Evaluate the pending operation. Returns false when nothing was pending.
    pub fn press_equals(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if self.stored.is_empty() {
            return false;
        }
        self.display = evaluate(&self.stored, pending, &self.display);
        self.stored.clear();
        self.pending = None;
        self.new_entry = true;
        true
    }

    /// Progressive clear: entry, then operation, then function label.
    /// Exactly one stage runs per press; `None` when already idle.
    pub fn press_clear(&mut self) -> Option<ClearStage> {
        if self.display.as_str() != "0" && !self.new_entry {
            self.reset_entry();
            Some(ClearStage::Entry)
        } else if !self.stored.is_empty() || self.pending.is_some() {
            self.clear_operation();
            Some(ClearStage::Operation)
        } else if !self.function.is_empty() {
            self.function.clear();
            Some(ClearStage::Function)
        } else {
            None
        }
    }

    /// Show `0` and start a fresh number on the next keystroke.
    pub fn reset_entry(&mut self) {
        self.display = value_from("0");
        self.new_entry = true;
    }

    pub fn clear_operation(&mut self) {
        self.stored.clear();
        self.pending = None;
    }

    /// Replace the display with a computed value; the next digit starts over.
    pub fn load_result(&mut self, result: f64) {
        self.display = format_result(result);
        self.new_entry = true;
    }

    pub fn set_function(&mut self, label: &str) {
        self.function.clear();
        for c in label.chars() {
            if self.function.push(c).is_err() {
                break;
            }
        }
    }

    pub fn clear_function(&mut self) {
        self.function.clear();
    }

    pub fn set_numpad_mode(&mut self, enabled: bool) {
        self.numpad = enabled;
    }

    /// Back to power-on defaults, including both mode flags.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
