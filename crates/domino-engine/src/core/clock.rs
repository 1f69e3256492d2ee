/// Turns variable host frame deltas into a whole number of fixed session steps.
pub struct FrameClock {
    step: f32,
    backlog: f32,
}

/// Upper bound on steps per host frame, so a stalled tab doesn't replay seconds of input.
const MAX_STEPS_PER_FRAME: u32 = 10;

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self { step, backlog: 0.0 }
    }

    /// Bank `frame_dt` and return how many fixed steps are due.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.backlog += frame_dt;
        }
        self.backlog = self.backlog.min(self.step * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.backlog / self.step) as u32;
        self.backlog -= steps as f32 * self.step;
        steps
    }

    /// The fixed step length in seconds.
    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_frame_is_one_step() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn partial_frames_accumulate() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.advance(0.008), 0);
        assert_eq!(clock.advance(0.010), 1);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.advance(2.0), MAX_STEPS_PER_FRAME);
    }

    #[test]
    fn bogus_deltas_are_ignored() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
    }
}
