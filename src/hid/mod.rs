//! Keystroke sink and USB HID usage translation.
//!
//! The controller talks to the host through [`KeystrokeSink`]. Numpad
//! passthrough sends keypad usages directly; send-result types the
//! displayed value character by character. The firmware's sink queues
//! [`Keystroke`]s for the USB writer task, which turns each one into a
//! press report and a release report.

pub mod keyboard;

use keyboard::{KeyboardReport, MOD_LEFT_SHIFT};

use crate::calc::Op;
use crate::keypad::Key;

/// Destination for keystrokes sent to the USB host.
pub trait KeystrokeSink {
    /// Type one ASCII character. Characters without a usage are skipped.
    fn send_character(&mut self, c: char);
    /// Tap one raw HID keyboard usage with no modifiers.
    fn send_raw_keycode(&mut self, code: u8);
}

/// One key tap: modifiers plus a single usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keystroke {
    pub modifier: u8,
    pub usage: u8,
}

impl Keystroke {
    pub const fn raw(usage: u8) -> Self {
        Self { modifier: 0, usage }
    }

    pub fn from_char(c: char) -> Option<Self> {
        ascii_usage(c).map(|(modifier, usage)| Self { modifier, usage })
    }

    pub fn press_report(&self) -> KeyboardReport {
        KeyboardReport::pressed(self.modifier, self.usage)
    }

    pub fn release_report(&self) -> KeyboardReport {
        KeyboardReport::released()
    }
}

// Keyboard/Keypad page usages
pub const USAGE_BACKSPACE: u8 = 0x2A;
pub const USAGE_KP_DIVIDE: u8 = 0x54;
pub const USAGE_KP_MULTIPLY: u8 = 0x55;
pub const USAGE_KP_MINUS: u8 = 0x56;
pub const USAGE_KP_PLUS: u8 = 0x57;
pub const USAGE_KP_ENTER: u8 = 0x58;
pub const USAGE_KP_1: u8 = 0x59;
pub const USAGE_KP_0: u8 = 0x62;
pub const USAGE_KP_DOT: u8 = 0x63;

/// Keypad usage forwarded for a key while numpad passthrough is on.
///
/// Mode keys have no usage; they stay local to the device.
pub fn numpad_usage(key: Key) -> Option<u8> {
    match key {
        Key::Digit(0) => Some(USAGE_KP_0),
        Key::Digit(d @ 1..=9) => Some(USAGE_KP_1 + d - 1),
        Key::Point => Some(USAGE_KP_DOT),
        Key::Op(Op::Add) => Some(USAGE_KP_PLUS),
        Key::Op(Op::Sub) => Some(USAGE_KP_MINUS),
        Key::Op(Op::Mul) => Some(USAGE_KP_MULTIPLY),
        Key::Op(Op::Div) => Some(USAGE_KP_DIVIDE),
        Key::Equals => Some(USAGE_KP_ENTER),
        Key::Clear => Some(USAGE_BACKSPACE),
        _ => None,
    }
}

/// `(modifier, usage)` for the characters a displayed value can contain,
/// using the main keyboard rows (US layout).
pub fn ascii_usage(c: char) -> Option<(u8, u8)> {
    match c {
        '1'..='9' => Some((0, 0x1E + (c as u8 - b'1'))),
        '0' => Some((0, 0x27)),
        '.' => Some((0, 0x37)),
        '-' => Some((0, 0x2D)),
        '+' => Some((MOD_LEFT_SHIFT, 0x2E)),
        'e' => Some((0, 0x08)),
        'E' => Some((MOD_LEFT_SHIFT, 0x08)),
        _ => None,
    }
}
