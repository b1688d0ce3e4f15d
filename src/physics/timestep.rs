//! Fixed timestep accumulator.

/// Result of advancing the clock by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticks {
    /// Number of fixed steps to simulate this frame.
    pub steps: u32,
    /// Fraction of a fixed step left in the accumulator, in `[0, 1)`.
    pub alpha: f32,
}

/// Splits variable frame times into whole fixed steps.
///
/// At most `max_substeps` steps are produced per frame. Time beyond that is
/// dropped so a slow frame cannot snowball into ever longer frames.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(step: f64, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Add `frame_time` seconds and take out as many whole steps as allowed.
    pub fn advance(&mut self, frame_time: f64) -> Ticks {
        self.accumulator += frame_time.max(0.0);

        let mut steps = 0u32;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator >= self.step {
            tracing::warn!(
                dropped = self.accumulator,
                max_substeps = self.max_substeps,
                "simulation falling behind, dropping accumulated time"
            );
            self.accumulator %= self.step;
        }

        Ticks {
            steps,
            alpha: self.alpha(),
        }
    }

    /// Fraction of a step currently accumulated.
    #[inline]
    pub fn alpha(&self) -> f32 {
        ((self.accumulator / self.step) as f32).clamp(0.0, 1.0 - f32::EPSILON)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps_and_remainder() {
        let mut clock = FixedTimestep::new(0.01, 8);
        let ticks = clock.advance(0.035);
        assert_eq!(ticks.steps, 3);
        assert!((ticks.alpha - 0.5).abs() < 1e-4);

        let ticks = clock.advance(0.005);
        assert_eq!(ticks.steps, 1);
        assert!(ticks.alpha < 1e-3);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = FixedTimestep::new(1.0 / 60.0, 4);
        assert_eq!(clock.advance(1.0 / 240.0).steps, 0);
        assert_eq!(clock.advance(1.0 / 240.0).steps, 0);
        assert_eq!(clock.advance(1.0 / 240.0).steps, 0);
        let ticks = clock.advance(1.0 / 200.0);
        assert_eq!(ticks.steps, 1);
        assert!((0.0..1.0).contains(&ticks.alpha));
    }

    #[test]
    fn test_substeps_capped_and_excess_dropped() {
        let mut clock = FixedTimestep::new(0.1, 4);
        let ticks = clock.advance(1.05);
        assert_eq!(ticks.steps, 4);
        assert!(clock.accumulator() < clock.step());
        assert!((0.0..1.0).contains(&ticks.alpha));
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut clock = FixedTimestep::new(0.1, 4);
        let ticks = clock.advance(-1.0);
        assert_eq!(ticks.steps, 0);
        assert_eq!(ticks.alpha, 0.0);
    }
}
