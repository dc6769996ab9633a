//! One scan-loop iteration as a pure function of inputs and time.
//!
//! The firmware samples the matrix and the wake line every
//! `SCAN_INTERVAL_MS` and hands the raw samples to [`App::tick`] together
//! with the keystroke sink and the display surface. Everything that used
//! to be a blocking delay (debounce waits, the "SENT" acknowledgment, the
//! idle timeout) is timed state inside the app.

use crate::config::{DEBOUNCE_SCANS, SLEEP_TIMEOUT_MS};
use crate::controller::Controller;
use crate::hid::KeystrokeSink;
use crate::keypad::debounce::Debouncer;
use crate::keypad::decoder::{ChordDecoder, KeyEdge};
use crate::keypad::{Key, KeySet};
use crate::power_logic::PowerManager;
use crate::ui::presenter;
use crate::ui::{DisplaySurface, StatusFlags};

/// What the driver loop should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    Continue,
    /// Idle timeout crossed: enter low power. Returned once.
    Sleep,
}

pub struct App {
    matrix: Debouncer<16>,
    wake: Debouncer<1>,
    decoder: ChordDecoder,
    edge: KeyEdge,
    controller: Controller,
    power: PowerManager,
    status: StatusFlags,
    dirty: bool,
}

impl App {
    pub fn new(now_ms: u64) -> Self {
        Self {
            matrix: Debouncer::new(DEBOUNCE_SCANS),
            wake: Debouncer::new(DEBOUNCE_SCANS),
            decoder: ChordDecoder::new(),
            edge: KeyEdge::new(),
            controller: Controller::new(),
            power: PowerManager::new(now_ms, SLEEP_TIMEOUT_MS),
            status: StatusFlags::default(),
            dirty: true,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Update the status-bar indicators; redraws only on change.
    pub fn set_status(&mut self, status: StatusFlags) {
        if status != self.status {
            self.status = status;
            self.dirty = true;
        }
    }

    /// Run one loop iteration: debounce, decode, dispatch, expire timed
    /// state, redraw if needed, then check the idle timeout.
    pub fn tick<S, D>(
        &mut self,
        raw_keys: KeySet,
        wake_raw: bool,
        now_ms: u64,
        sink: &mut S,
        surface: &mut D,
    ) -> TickOutcome
    where
        S: KeystrokeSink + ?Sized,
        D: DisplaySurface + ?Sized,
    {
        let settled = self.matrix.update(u32::from(raw_keys.bits()));
        let wake = self.wake.update(u32::from(wake_raw)) != 0;

        let decoded = self
            .decoder
            .decode(KeySet::from_bits(settled as u16))
            .or(wake.then_some(Key::Equals));

        if let Some(key) = self.edge.filter(decoded) {
            self.power.activity(now_ms);
            self.controller.handle_key(key, now_ms, sink);
            self.dirty = true;
        }

        if self.controller.tick(now_ms) {
            self.dirty = true;
        }

        if self.dirty {
            if let Err(e) = presenter::render(surface, &self.controller, &self.status) {
                warn!("render failed: {}", e);
            }
            self.dirty = false;
        }

        if self.power.tick(now_ms) {
            TickOutcome::Sleep
        } else {
            TickOutcome::Continue
        }
    }
}
