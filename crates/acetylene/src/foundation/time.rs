//! Time management utilities

use std::time::Instant;

/// Wall-clock frame timer
pub struct Timer {
    last_frame: Instant,
    delta_time: f64,
    total_time: f64,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Sample the clock, returning the seconds elapsed since the previous tick
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f64();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Seconds between the last two ticks
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Seconds accumulated over all ticks
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of ticks taken
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.frame_count as f64 / self.total_time
        } else {
            0.0
        }
    }
}

/// Update schedule for one frame: `steps` whole updates followed by one
/// fractional update of `remainder` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Number of `update(1.0)` calls
    pub steps: u32,
    /// Units passed to the closing update
    pub remainder: f32,
}

/// Fixed-timestep accumulator with a bounded catch-up budget.
///
/// Elapsed wall time is scaled into update units (`elapsed * target_ups`).
/// Whole units run as unit steps until the per-frame cap is reached; whatever
/// whole-unit debt is left after the cap is dropped rather than carried into
/// the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    /// Update units per second of wall time
    pub target_updates_per_second: f64,
    /// Upper bound on unit steps in a single frame
    pub max_updates_per_frame: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self {
            target_updates_per_second: 60.0,
            max_updates_per_frame: 10,
        }
    }
}

impl FixedTimestep {
    /// Create a step policy
    pub fn new(target_updates_per_second: f64, max_updates_per_frame: u32) -> Self {
        Self {
            target_updates_per_second,
            max_updates_per_frame,
        }
    }

    /// Plan the updates for a frame that took `elapsed_seconds`
    pub fn plan(&self, elapsed_seconds: f64) -> StepPlan {
        let mut dt = elapsed_seconds.max(0.0) * self.target_updates_per_second;
        let mut steps = 0;
        while dt >= 1.0 && steps < self.max_updates_per_frame {
            dt -= 1.0;
            steps += 1;
        }
        if dt >= 1.0 {
            log::trace!("Dropping {:.2} update units of debt", dt.trunc());
            dt = dt.fract();
        }
        StepPlan {
            steps,
            remainder: dt as f32,
        }
    }
}
