//! Tick-based integrating debouncer.
//!
//! Each switch keeps a counter of consecutive scans that disagree with
//! its settled state; the state flips once the counter reaches the
//! configured depth. One scan per loop tick, so the depth is in ticks.

/// Debouncer for up to `N` switches packed into the low bits of a `u32`.
pub struct Debouncer<const N: usize> {
    settled: u32,
    pending: [u8; N],
    depth: u8,
}

impl<const N: usize> Debouncer<N> {
    pub const fn new(depth: u8) -> Self {
        Self {
            settled: 0,
            pending: [0; N],
            depth: if depth == 0 { 1 } else { depth },
        }
    }

    /// Feed one raw sample and return the settled state.
    pub fn update(&mut self, raw: u32) -> u32 {
        for (bit, counter) in self.pending.iter_mut().enumerate() {
            let mask = 1u32 << bit;
            if (raw ^ self.settled) & mask == 0 {
                *counter = 0;
                continue;
            }
            *counter += 1;
            if *counter >= self.depth {
                self.settled ^= mask;
                *counter = 0;
            }
        }
        self.settled
    }

    pub fn settled(&self) -> u32 {
        self.settled
    }
}
