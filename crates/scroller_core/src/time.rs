//! Tick pacing.
//!
//! The simulation is tick-based: velocities are integer deltas per tick,
//! so wall-clock time only decides how many ticks a frame runs. A fixed
//! 60 Hz accumulator converts the measured frame delta into whole ticks;
//! leftover time carries into the next frame.

use std::time::Instant;

pub const TICK_RATE_HZ: f64 = 60.0;

/// Longest frame delta the accumulator will absorb. Anything slower (a
/// debugger pause, a suspended laptop) is truncated so the loop does not
/// spiral trying to catch up.
const MAX_FRAME_DELTA: f64 = 0.25;

pub struct TickClock {
    tick_interval: f64,
    accumulator: f64,
    last_instant: Instant,
    /// Ticks simulated since startup.
    pub ticks_total: u64,
    /// Ticks consumed out of the current frame.
    pub ticks_this_frame: u32,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            tick_interval: 1.0 / TICK_RATE_HZ,
            accumulator: 0.0,
            last_instant: Instant::now(),
            ticks_total: 0,
            ticks_this_frame: 0,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let mut delta = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        if delta > MAX_FRAME_DELTA {
            log::warn!(
                "Frame took {:.1}ms, truncating to {:.0}ms of simulation",
                delta * 1000.0,
                MAX_FRAME_DELTA * 1000.0
            );
            delta = MAX_FRAME_DELTA;
        }

        self.accumulator += delta;
        self.ticks_this_frame = 0;
    }

    /// Consume one tick's worth of accumulated time if available.
    pub fn try_tick(&mut self) -> bool {
        if self.accumulator < self.tick_interval {
            return false;
        }
        self.accumulator -= self.tick_interval;
        self.ticks_total += 1;
        self.ticks_this_frame += 1;
        true
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
