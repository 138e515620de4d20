//! Frame timing and the fixed-step accumulator

/// Frame timing information
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Fixed physics timestep in seconds
    pub fixed_timestep: f32,
    /// Most fixed steps run in one frame
    pub max_substeps: u32,
    /// Accumulated time not yet consumed by fixed steps
    pub accumulator: f32,
    /// Total unpaused time
    pub total_time: f32,
    /// Last frame's delta time
    pub delta_time: f32,
    /// Unpaused frames so far
    pub frame: u64,
}

impl FrameTiming {
    /// Create new frame timing
    pub fn new(fixed_timestep: f32, max_substeps: u32) -> Self {
        Self {
            fixed_timestep,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
        }
    }

    /// Drop any partial step, e.g. after a long stall
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Update timing for a new frame. Negative deltas count as zero.
    pub fn update(&mut self, delta_time: f32) {
        let delta_time = delta_time.max(0.0);
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.accumulator += delta_time;
        self.frame += 1;
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Number of fixed steps to run this frame.
    ///
    /// Consumes at most `max_substeps` steps. Whole steps beyond the cap are
    /// discarded so a slow frame cannot snowball into the next one.
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while steps < self.max_substeps && self.consume_fixed_step() {
            steps += 1;
        }

        if self.accumulator >= self.fixed_timestep {
            log::trace!(
                "Dropping {:.3}s of simulation after {} substeps",
                self.accumulator,
                steps
            );
            self.accumulator %= self.fixed_timestep;
        }
        steps
    }

    /// Get interpolation factor for rendering between fixed steps
    pub fn interpolation_factor(&self) -> f32 {
        self.accumulator / self.fixed_timestep
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(0.02, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_timing() {
        let mut timing = FrameTiming::default();

        timing.update(1.0 / 60.0);
        timing.update(1.0 / 60.0);
        timing.update(-1.0);

        assert_eq!(timing.frame, 3);
        assert_eq!(timing.delta_time, 0.0);
        assert!((timing.total_time - 2.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_timestep() {
        let mut timing = FrameTiming::new(0.02, 4);

        timing.update(0.02);
        assert!(timing.consume_fixed_step());
        assert!(!timing.consume_fixed_step());
    }

    #[test]
    fn test_partial_step_carries_over() {
        let mut timing = FrameTiming::new(0.02, 4);

        timing.update(0.03);
        assert_eq!(timing.fixed_steps(), 1);
        timing.update(0.015);
        assert_eq!(timing.fixed_steps(), 1);
        assert!(timing.interpolation_factor() < 0.5);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut timing = FrameTiming::new(0.02, 4);

        timing.update(1.0);
        assert_eq!(timing.fixed_steps(), 4);
        assert!(timing.accumulator < 0.02);
        assert_eq!(timing.fixed_steps(), 0);
    }
}
