//! USB HID keyboard report (boot protocol compatible).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```
//!
//! The calculator only ever presses one key at a time, so a keystroke is
//! a press report with a single usage followed by an all-released report.

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Left Shift bit in the modifier byte.
pub const MOD_LEFT_SHIFT: u8 = 0x02;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub reserved: u8,
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// All keys released.
    pub const fn released() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// One key down with the given modifiers.
    pub const fn pressed(modifier: u8, usage: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [usage, 0, 0, 0, 0, 0],
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (8, or 0 if `buf` is too short).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    pub fn is_released(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_press_and_release() {
        let mut buf = [0xFFu8; 8];
        let n = KeyboardReport::pressed(MOD_LEFT_SHIFT, 0x2E).serialize(&mut buf);
        assert_eq!(n, 8);
        assert_eq!(buf, [0x02, 0x00, 0x2E, 0, 0, 0, 0, 0]);

        KeyboardReport::released().serialize(&mut buf);
        assert_eq!(buf, [0; 8]);
    }

    #[test]
    fn serialize_rejects_short_buffer() {
        let mut buf = [0u8; 4];
        assert_eq!(KeyboardReport::released().serialize(&mut buf), 0);
    }

    #[test]
    fn released_detection() {
        assert!(KeyboardReport::released().is_released());
        assert!(KeyboardReport::default().is_released());
        assert!(!KeyboardReport::pressed(0, 0x59).is_released());
        assert!(!KeyboardReport::pressed(MOD_LEFT_SHIFT, 0).is_released());
    }
}
