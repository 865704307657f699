use std::time::Instant;

/// Longest frame delta handed to the simulation; a stalled window must not
/// replay seconds of animation in one go
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Wall-clock source for the viewer loop
#[derive(Debug)]
pub struct FrameClock {
    started: Instant,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
        }
    }

    /// Seconds since the previous tick, capped at [`MAX_FRAME_DELTA`]
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta.min(MAX_FRAME_DELTA)
    }

    /// Seconds since the clock was created
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Forget the time spent while suspended
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
