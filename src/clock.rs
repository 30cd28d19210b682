//! Loop clock - elapsed milliseconds since a resettable epoch
//!
//! The sequencer measures every track against one shared clock. The clock
//! starts unset and reads `0` until the first `reset()`, which the sequencer
//! issues when the first gesture of a loop arrives.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of loop time for the sequencer
pub trait Clock {
    /// Record "now" as the new epoch.
    fn reset(&mut self);

    /// Milliseconds since the last `reset()`, or `0` if never started.
    fn elapsed_ms(&self) -> u32;
}

/// Clock backed by the host's monotonic clock
#[derive(Debug, Default, Clone)]
pub struct WallClock {
    epoch: Option<Instant>,
}

impl WallClock {
    pub fn new() -> Self {
        Self { epoch: None }
    }

    /// Alias for `reset()`, reads better at startup.
    pub fn start(&mut self) {
        self.reset();
    }

    pub fn is_started(&self) -> bool {
        self.epoch.is_some()
    }
}

impl Clock for WallClock {
    fn reset(&mut self) {
        self.epoch = Some(Instant::now());
    }

    fn elapsed_ms(&self) -> u32 {
        match self.epoch {
            // u32 milliseconds covers ~49 days, far past any loop length
            Some(epoch) => epoch.elapsed().as_millis().min(u32::MAX as u128) as u32,
            None => 0,
        }
    }
}

/// Shared handle to the "now" of a [`ManualClock`]
///
/// Cloning the handle shares the same time value, so a test (or an offline
/// driver) can keep one copy and move the clock into the sequencer.
#[derive(Debug, Default, Clone)]
pub struct ManualTime {
    now_ms: Rc<Cell<u32>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current absolute time in milliseconds.
    pub fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }

    /// Jump to an absolute time. Time must not run backwards.
    pub fn set_ms(&self, now_ms: u32) {
        debug_assert!(now_ms >= self.now_ms.get(), "manual time ran backwards");
        self.now_ms.set(now_ms);
    }

    /// Move time forward by `delta_ms`.
    pub fn advance_ms(&self, delta_ms: u32) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

/// Clock whose "now" is driven explicitly through a [`ManualTime`] handle
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: ManualTime,
    epoch_ms: Option<u32>,
}

impl ManualClock {
    pub fn new(time: ManualTime) -> Self {
        Self {
            time,
            epoch_ms: None,
        }
    }

    /// Handle sharing this clock's time.
    pub fn time(&self) -> ManualTime {
        self.time.clone()
    }
}

impl Clock for ManualClock {
    fn reset(&mut self) {
        self.epoch_ms = Some(self.time.now_ms());
    }

    fn elapsed_ms(&self) -> u32 {
        match self.epoch_ms {
            Some(epoch) => self.time.now_ms().saturating_sub(epoch),
            None => 0,
        }
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn elapsed_ms(&self) -> u32 {
        (**self).elapsed_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstarted_clock_reads_zero() {
        let time = ManualTime::new();
        time.set_ms(500);
        let clock = ManualClock::new(time);
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(WallClock::new().elapsed_ms(), 0);
    }

    #[test]
    fn reset_moves_the_epoch_to_now() {
        let time = ManualTime::new();
        let mut clock = ManualClock::new(time.clone());

        time.set_ms(100);
        clock.reset();
        time.advance_ms(40);
        assert_eq!(clock.elapsed_ms(), 40);

        clock.reset();
        assert_eq!(clock.elapsed_ms(), 0);
        time.advance_ms(7);
        assert_eq!(clock.elapsed_ms(), 7);
    }

    #[test]
    fn wall_clock_starts_near_zero() {
        let mut clock = WallClock::new();
        assert!(!clock.is_started());
        clock.start();
        assert!(clock.is_started());
        assert!(clock.elapsed_ms() < 1_000);
    }
}
