//! Inactivity tracking for the one-way sleep transition.
//!
//! Time is passed in as milliseconds since boot so the policy runs on
//! the host. The firmware feeds it `embassy_time::Instant::now()`.

/// Power state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Normal operation - scanning, display on.
    Active,
    /// Idle timeout crossed. Only a reset (the wake key) leaves this state.
    Sleeping,
}

/// Power manager tracks activity and decides when to sleep.
#[derive(Clone, Debug)]
pub struct PowerManager {
    state: PowerState,
    last_activity_ms: u64,
    timeout_ms: u64,
}

impl PowerManager {
    pub const fn new(now_ms: u64, timeout_ms: u64) -> Self {
        Self {
            state: PowerState::Active,
            last_activity_ms: now_ms,
            timeout_ms,
        }
    }

    /// Record activity (any accepted key event).
    pub fn activity(&mut self, now_ms: u64) {
        if self.state == PowerState::Active {
            self.last_activity_ms = now_ms;
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms)
    }

    /// Periodic check. Returns true exactly once, on the tick the idle
    /// timeout is crossed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.state != PowerState::Active || self.idle_ms(now_ms) <= self.timeout_ms {
            return false;
        }
        info!("Power: idle for {} ms, sleeping", self.idle_ms(now_ms));
        self.state = PowerState::Sleeping;
        true
    }
}
