//! GPIO matrix scan plus the dedicated wake and battery lines.
//!
//! Rows are driven low one at a time; columns have pull-ups, so a low
//! column means the switch at (row, col) is closed. No diodes are
//! assumed, which is why the decoder only tracks one key beyond the
//! chord pair.

use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_time::{block_for, Duration};
use keycalc::config::{MATRIX_COLS, MATRIX_ROWS, ROW_SETTLE_US};
use keycalc::keypad::KeySet;

pub struct MatrixScanner<'d> {
    rows: [Output<'d>; MATRIX_ROWS],
    cols: [Input<'d>; MATRIX_COLS],
    wake: Input<'d>,
    wake_pin: u8,
    battery: Input<'d>,
}

impl<'d> MatrixScanner<'d> {
    pub fn new(
        rows: [AnyPin; MATRIX_ROWS],
        cols: [AnyPin; MATRIX_COLS],
        wake: AnyPin,
        battery: AnyPin,
    ) -> Self {
        let wake_pin = wake.pin();
        Self {
            rows: rows.map(|pin| Output::new(pin, Level::High, OutputDrive::Standard)),
            cols: cols.map(|pin| Input::new(pin, Pull::Up)),
            wake: Input::new(wake, Pull::Up),
            wake_pin,
            battery: Input::new(battery, Pull::Up),
        }
    }

    /// Sample every switch once. Takes a few tens of microseconds.
    pub fn scan(&mut self) -> KeySet {
        let mut pressed = KeySet::empty();
        for (row, line) in self.rows.iter_mut().enumerate() {
            line.set_low();
            block_for(Duration::from_micros(ROW_SETTLE_US));
            for (col, input) in self.cols.iter().enumerate() {
                if input.is_low() {
                    pressed.insert(row, col);
                }
            }
            line.set_high();
        }
        pressed
    }

    /// Raw (undebounced) state of the wake / equals key.
    pub fn wake_pressed(&self) -> bool {
        self.wake.is_low()
    }

    /// Port 0 pin number of the wake line, for arming System OFF wake-up.
    pub fn wake_pin(&self) -> u8 {
        self.wake_pin
    }

    pub fn battery_low(&self) -> bool {
        self.battery.is_low()
    }
}
