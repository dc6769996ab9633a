//! Host-testable core of the keycalc keypad calculator.
//!
//! Everything here is pure logic: chord decoding, the calculator state
//! machine, formula macros, the macro menu, the mode controller, screen
//! layout and the per-tick scheduler. Hardware lives in the firmware
//! binary (`main.rs`), which implements [`hid::KeystrokeSink`] and
//! [`ui::DisplaySurface`] and drives [`app::App::tick`].
//!
//! Usage: `cargo test --lib` on the host.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and needs `--features embedded`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod app;
pub mod calc;
pub mod config;
pub mod controller;
pub mod error;
pub mod hid;
pub mod keypad;
pub mod macro_engine;
pub mod menu;
pub mod power_logic;
pub mod settings;
pub mod ui;

pub use app::{App, TickOutcome};
pub use error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// Cross-module tests - raw matrix samples through to keystrokes and pixels
// ═══════════════════════════════════════════════════════════════════════════
