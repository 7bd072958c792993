//! Throttle for the DOM ripple trail that follows the mouse.

use super::constants::{TRAIL_INTERVAL_MS, TRAIL_MAX_LIVE};

#[derive(Clone, Copy, Debug)]
pub struct RippleTrail {
    pub interval_ms: f64,
    pub max_live: usize,
    last_ms: Option<f64>,
}

impl Default for RippleTrail {
    fn default() -> Self {
        Self::new(TRAIL_INTERVAL_MS, TRAIL_MAX_LIVE)
    }
}

impl RippleTrail {
    pub fn new(interval_ms: f64, max_live: usize) -> Self {
        Self {
            interval_ms,
            max_live,
            last_ms: None,
        }
    }

    /// True when a ripple may be spawned at `now_ms`; records the spawn.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if self
            .last_ms
            .is_some_and(|last| now_ms - last < self.interval_ms)
        {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }

    /// How many of the oldest ripples to remove before adding one to `live`.
    pub fn evictions(&self, live: usize) -> usize {
        (live + 1).saturating_sub(self.max_live.max(1))
    }
}
