//! Application-wide constants and compile-time configuration.
//!
//! Key assignments, timing parameters, display geometry and USB
//! identity live here so they can be tuned in one place.

// Firmware

/// Version string compared against the persisted settings at boot.
pub const FIRMWARE_VERSION: &str = "0.2.0";

// Key matrix

/// Matrix rows (driven low one at a time during a scan).
pub const MATRIX_ROWS: usize = 4;

/// Matrix columns (sampled with pull-ups while a row is driven).
pub const MATRIX_COLS: usize = 4;

/// Legend of each switch, row-major. `C` is clear.
pub const KEYMAP: [[u8; MATRIX_COLS]; MATRIX_ROWS] = [
    [b'C', b'/', b'*', b'-'],
    [b'7', b'8', b'9', b'+'],
    [b'4', b'5', b'6', b'.'],
    [b'1', b'2', b'3', b'0'],
];

/// The two chord keys; holding both acts as the function modifier.
pub const CHORD_KEYS: [u8; 2] = [b'-', b'0'];

/// Function modifier + this key toggles USB numpad passthrough.
pub const COMBO_TOGGLE_NUMPAD: u8 = b'+';

/// Function modifier + this key types the displayed value over USB.
pub const COMBO_SEND_RESULT: u8 = b'.';

/// Function modifier + this key opens the macro menu.
pub const COMBO_OPEN_MENU: u8 = b'/';

/// Function modifier + this key drops back to plain calculator mode.
pub const COMBO_QUICK_EXIT: u8 = b'C';

/// Menu navigation keys while the menu is latched.
pub const MENU_UP_KEY: u8 = b'8';
pub const MENU_DOWN_KEY: u8 = b'2';

// GPIO pin assignments
//
// Logical names only; the `embassy_nrf::peripherals::*` pins are
// picked in `main.rs`. Adjust for your PCB.
//
//   Rows (outputs)    → P0.02, P0.03, P0.28, P0.29
//   Columns (inputs)  → P0.04, P0.05, P0.30, P0.31
//   Wake / "=" key    → P0.11 (dedicated line, active-low)
//   I²C SDA           → P0.26
//   I²C SCL           → P0.27
//   Battery sense     → P0.24 (low = battery low)

// Timing

/// Main loop cadence (ms). 20 ms gives ~50 scans per second.
pub const SCAN_INTERVAL_MS: u64 = 20;

/// Settling time after driving a row low before sampling columns (µs).
pub const ROW_SETTLE_US: u64 = 10;

/// Consecutive agreeing scans before a switch changes state.
pub const DEBOUNCE_SCANS: u8 = 2;

/// Scans a lone chord key must stay down (without its partner) before it
/// is reported as a plain key. Released sooner, it reports as a tap.
pub const CHORD_SETTLE_SCANS: u8 = 3;

/// Inactivity before the device powers down (ms).
pub const SLEEP_TIMEOUT_MS: u64 = 60_000;

/// How long the "SENT" acknowledgment replaces the value (ms).
pub const SENT_ACK_MS: u64 = 600;

/// How long the "Sleeping..." screen stays up before power-off (ms).
pub const SLEEP_SCREEN_MS: u64 = 500;

/// How long a first-run / update notice is shown at boot (ms).
pub const BOOT_NOTICE_MS: u64 = 1_500;

// Calculator

/// Maximum characters accepted while typing a number.
pub const MAX_ENTRY_LEN: usize = 10;

/// Capacity of every value string (results may exceed the entry limit).
pub const VALUE_CAPACITY: usize = 32;

/// Fractional digits used when rendering a computed result.
pub const RESULT_PRECISION: usize = 6;

// Display (SSD1309 128×64 OLED)

pub const SCREEN_WIDTH: i32 = 128;
pub const SCREEN_HEIGHT: i32 = 64;

/// Number of menu entries visible at once.
pub const MENU_WINDOW: usize = 3;

// USB

/// USB VID/PID - "pid.codes" open-source test VID.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

pub const USB_MANUFACTURER: &str = "keycalc";
pub const USB_PRODUCT: &str = "Keypad Calculator";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

/// Hold time between key-down and key-up reports (ms).
pub const HID_TAP_MS: u64 = 10;

/// Keystrokes that may wait for the USB writer.
pub const KEYSTROKE_QUEUE_DEPTH: usize = 32;

// Settings storage

/// Flash page index where settings storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for settings.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;
