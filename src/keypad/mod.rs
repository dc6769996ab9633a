//! Keypad subsystem - 4×4 switch matrix plus the dedicated wake key.
//!
//! Raw scans arrive as a [`KeySet`] (one bit per switch), pass through
//! the [`debounce::Debouncer`], and the [`decoder::ChordDecoder`] turns
//! the settled set into at most one logical [`Key`] per tick.
//!
//! ## Components
//!
//! - **Debounce**: per-switch integrating filter
//! - **Decoder**: chord/function-modifier resolution and combo edges
//! - **Edge filter**: drops repeats of an unchanged key between ticks

pub mod debounce;
pub mod decoder;


use crate::calc::Op;
use crate::config::{KEYMAP, MATRIX_COLS, MATRIX_ROWS};

/// Logical key symbols produced by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Digit 0-9.
    Digit(u8),
    /// Decimal point.
    Point,
    /// Arithmetic operator.
    Op(Op),
    /// Progressive clear.
    Clear,
    /// Equals / enter (wake key line).
    Equals,
    /// Function + toggle: USB numpad passthrough on/off.
    ToggleNumpad,
    /// Function + send: type the displayed value over USB.
    SendResult,
    /// Function + menu: open the macro menu.
    OpenMenu,
    /// Menu cursor up (repeats while held).
    NavUp,
    /// Menu cursor down (repeats while held).
    NavDown,
    /// Function modifier released while the menu was latched.
    Confirm,
    /// Function + exit: back to plain calculator mode.
    QuickExit,
}

impl Key {
    /// Map a key-cap legend to its plain (unmodified) meaning.
    pub fn from_legend(legend: u8) -> Option<Self> {
        match legend {
            b'0'..=b'9' => Some(Key::Digit(legend - b'0')),
            b'.' => Some(Key::Point),
            b'C' => Some(Key::Clear),
            b'=' => Some(Key::Equals),
            _ => Op::from_symbol(legend).map(Key::Op),
        }
    }

    /// Keys delivered on every tick while held instead of once per press.
    pub fn repeats(&self) -> bool {
        matches!(self, Key::NavUp | Key::NavDown)
    }

    /// Keys that change modes or drive the menu rather than the value.
    pub fn is_mode_key(&self) -> bool {
        matches!(
            self,
            Key::ToggleNumpad
                | Key::SendResult
                | Key::OpenMenu
                | Key::NavUp
                | Key::NavDown
                | Key::Confirm
                | Key::QuickExit
        )
    }
}

/// Set of physically depressed switches, one bit per matrix position
/// (bit index `row * MATRIX_COLS + col`).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet(u16);

impl KeySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Build a set from key-cap legends; unknown legends are ignored.
    pub fn from_legends(legends: &[u8]) -> Self {
        let mut set = Self::empty();
        for &legend in legends {
            set.insert_legend(legend);
        }
        set
    }

    pub fn insert(&mut self, row: usize, col: usize) {
        if row < MATRIX_ROWS && col < MATRIX_COLS {
            self.0 |= 1 << (row * MATRIX_COLS + col);
        }
    }

    pub fn insert_legend(&mut self, legend: u8) {
        if let Some(bit) = bit_for_legend(legend) {
            self.0 |= 1 << bit;
        }
    }

    pub fn contains(&self, legend: u8) -> bool {
        bit_for_legend(legend).is_some_and(|bit| self.0 & (1 << bit) != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Keep only the switches also present in `other`.
    pub fn retain(&mut self, other: KeySet) {
        self.0 &= other.0;
    }

    /// Legends of the pressed switches in row-major scan order.
    pub fn legends(&self) -> impl Iterator<Item = u8> + '_ {
        (0..MATRIX_ROWS * MATRIX_COLS)
            .filter(move |bit| self.0 & (1 << bit) != 0)
            .map(|bit| KEYMAP[bit / MATRIX_COLS][bit % MATRIX_COLS])
    }
}

fn bit_for_legend(legend: u8) -> Option<usize> {
    KEYMAP
        .iter()
        .flatten()
        .position(|&candidate| candidate == legend)
}
