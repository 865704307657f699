/// Self-contained timers fed with frame deltas

/// Splits variable frame deltas into fixed simulation steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    timestep: f32,
    accumulator: f32,
    max_steps: u8,
}

impl FixedStep {
    pub fn new(hz: f32, max_steps: u8) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps,
        }
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Number of whole steps covered by `delta` plus the carried remainder.
    /// Time beyond `max_steps` is dropped rather than carried.
    pub fn advance(&mut self, delta: f32) -> usize {
        self.accumulator += delta.max(0.0);

        let due = (self.accumulator / self.timestep) as usize;
        let steps = due.min(self.max_steps as usize);

        self.accumulator = if due > steps {
            0.0
        } else {
            self.accumulator - steps as f32 * self.timestep
        };

        steps
    }

    /// Fraction of a step already accumulated
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.timestep
    }
}

/// Frames-per-second estimate refreshed once per interval
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    interval: f32,
    elapsed: f32,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame; returns the new estimate when the interval rolls over
    pub fn frame(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < self.interval {
            return None;
        }

        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_yields_whole_steps() {
        let mut step = FixedStep::new(60.0, 4);

        assert_eq!(step.advance(0.01), 0);
        assert_eq!(step.advance(0.01), 1);
        assert!(step.alpha() > 0.0 && step.alpha() < 1.0);
    }

    #[test]
    fn fixed_step_caps_and_drops_backlog() {
        let mut step = FixedStep::new(60.0, 4);

        assert_eq!(step.advance(1.0), 4);
        assert_eq!(step.alpha(), 0.0);
        assert_eq!(step.advance(0.0), 0);
    }

    #[test]
    fn fps_counter_reports_per_interval() {
        let mut counter = FpsCounter::new(1.0);

        for _ in 0..3 {
            assert!(counter.frame(0.25).is_none());
        }
        assert_eq!(counter.frame(0.25), Some(4.0));
        assert_eq!(counter.fps(), 4.0);
        assert!(counter.frame(0.25).is_none());
    }
}
