use crate::constants::{PROGRESS_DAMPING_RATE, PROGRESS_SNAP_EPSILON};
use crate::formation::FormationState;

/// Global morph progress of one tree: 1 is fully formed, 0 fully scattered.
///
/// Each tick moves a `dt`-proportional fraction of the remaining distance
/// toward the target, so the motion decays exponentially and adapts to the
/// host's frame rate. The blend factor is capped at 1, so a long frame lands
/// on the target instead of overshooting it.
#[derive(Clone, Debug)]
pub struct ProgressController {
    progress: f32,
    target: f32,
    rate: f32,
}

impl Default for ProgressController {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressController {
    /// Starts fully formed, matching the initial formation state.
    pub fn new() -> Self {
        Self {
            progress: 1.0,
            target: 1.0,
            rate: PROGRESS_DAMPING_RATE,
        }
    }

    pub fn with_progress(progress: f32) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            progress,
            ..Self::new()
        }
    }

    /// Override the damping rate (per second). Non-positive rates freeze
    /// progress.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate.max(0.0);
        self
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, state: FormationState) {
        self.target = state.target_progress();
    }

    pub fn is_settled(&self) -> bool {
        self.progress == self.target
    }

    /// Advance by `dt_sec`. Negative or non-finite time steps are treated as
    /// zero-length ticks.
    pub fn tick(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        let blend = (dt * self.rate).clamp(0.0, 1.0);
        self.progress += (self.target - self.progress) * blend;
        if (self.target - self.progress).abs() < PROGRESS_SNAP_EPSILON {
            self.progress = self.target;
        }
    }
}
