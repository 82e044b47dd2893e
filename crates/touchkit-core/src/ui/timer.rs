//! Self-reverting one-shot timer owned by a widget.
//!
//! The timer counts dispatcher ticks. Arming it again before it expires
//! replaces the pending countdown and bumps the generation, so at most one
//! expiry is ever reported per arm and an expiry can always be matched to the
//! arm that produced it. A timer advances at most once per dispatcher tick,
//! even when it is reached through more than one owner.

use crate::ui::core::Tick;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevertTimer {
    remaining: Option<u32>,
    generation: u32,
    last_tick: Option<Tick>,
}

impl RevertTimer {
    pub const fn new() -> Self {
        Self {
            remaining: None,
            generation: 0,
            last_tick: None,
        }
    }

    /// Start (or restart) the countdown. A zero duration still waits one tick.
    ///
    /// Returns the generation of this arm.
    pub fn arm(&mut self, ticks: u32) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.remaining = Some(ticks.max(1));
        self.generation
    }

    /// Drop a pending countdown. Its expiry will never be reported.
    pub fn cancel(&mut self) {
        if self.remaining.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance to tick `now`. Returns the generation that expired, if any.
    ///
    /// Repeating the tick the timer last saw does not count down again.
    pub fn tick(&mut self, now: Tick) -> Option<u32> {
        if self.last_tick.replace(now) == Some(now) {
            return None;
        }
        let remaining = self.remaining.as_mut()?;
        *remaining -= 1;
        if *remaining == 0 {
            self.remaining = None;
            Some(self.generation)
        } else {
            None
        }
    }
}
