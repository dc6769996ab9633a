//! USB Device subsystem - presents a boot-protocol keyboard to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. A single HID interface carries both numpad
//! passthrough and send-result keystrokes.
//!
//! The scan loop never blocks on USB: it pushes keystrokes into a
//! channel and the writer task turns each into a press/release pair.

pub mod hid_device;
