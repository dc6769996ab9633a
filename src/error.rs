//! Unified error type for keycalc.
//!
//! Only the hardware seams can fail; the calculator core degrades every
//! bad input to a defined state instead. All variants are fixed-size so
//! the enum stays `Copy` and loggable without `alloc`.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // USB
    /// USB stack returned an error while writing a report.
    Usb,

    /// The keystroke queue to the USB writer is full.
    QueueFull,

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    /// A settings record was present but could not be decoded.
    SettingsCorrupt,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::Display => "display transfer failed",
            Error::Usb => "usb write failed",
            Error::QueueFull => "keystroke queue full",
            Error::Storage => "flash access failed",
            Error::SettingsCorrupt => "settings record corrupt",
            Error::BufferOverflow => "buffer too small",
        };
        f.write_str(msg)
    }
}

pub type Result<T> = core::result::Result<T, Error>;
