//! Host-owned simulation context.
//!
//! Holds everything that changes over time for one tree: the gesture mailbox,
//! the formation state machine, global progress and the camera. The host
//! pushes samples whenever its tracker produces them and calls [`tick`] once
//! per frame; all mutation happens through `&mut self`, so there is exactly
//! one writer per tick.
//!
//! [`tick`]: SimulationContext::tick

use crate::camera::{Camera, CameraMapper, CameraSmoothing};
use crate::formation::{FormationState, FormationStateMachine, GestureSample};
use crate::progress::ProgressController;

/// Whether a hand tracker is feeding samples.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TrackerStatus {
    #[default]
    Active,
    Unavailable {
        reason: String,
    },
}

impl TrackerStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TrackerStatus::Active)
    }
}

/// What a status light in the host UI should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlIndicator {
    /// A reliable hand is in view.
    Tracking,
    /// Tracker running, no reliable hand.
    Searching,
    /// No tracker; clicks toggle the formation.
    Manual,
}

/// Single-slot mailbox: a new sample overwrites the previous one.
#[derive(Clone, Debug, Default)]
struct SampleSlot {
    latest: GestureSample,
    fresh: bool,
}

impl SampleSlot {
    fn put(&mut self, sample: GestureSample) {
        self.latest = sample;
        self.fresh = true;
    }

    fn take_fresh(&mut self) -> Option<GestureSample> {
        std::mem::take(&mut self.fresh).then_some(self.latest)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SimulationContext {
    mailbox: SampleSlot,
    formation: FormationStateMachine,
    progress: ProgressController,
    camera: CameraMapper,
    tracker: TrackerStatus,
}

impl SimulationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera_smoothing(mut self, smoothing: CameraSmoothing) -> Self {
        self.camera = self.camera.with_smoothing(smoothing);
        self
    }

    pub fn with_progress(mut self, progress: ProgressController) -> Self {
        self.progress = progress;
        self
    }

    /// Store the tracker's newest output. Never blocks and never queues.
    pub fn push_sample(&mut self, sample: GestureSample) {
        self.mailbox.put(sample);
    }

    pub fn latest_sample(&self) -> &GestureSample {
        &self.mailbox.latest
    }

    /// Flip the formation state right away.
    pub fn manual_toggle(&mut self) -> FormationState {
        // Samples that arrived before the toggle are applied first so they
        // cannot override it at the next tick.
        if let Some(sample) = self.mailbox.take_fresh() {
            self.formation.observe(&sample);
        }
        let state = self.formation.toggle();
        self.progress.set_target(state);
        state
    }

    /// Background click from the host UI. Only acts as a toggle while no
    /// tracker is available; returns whether it toggled.
    pub fn pointer_click(&mut self) -> bool {
        if self.tracker.is_active() {
            return false;
        }
        self.manual_toggle();
        true
    }

    pub fn tracker_status(&self) -> &TrackerStatus {
        &self.tracker
    }

    /// Losing the tracker behaves like an endless stream of empty samples:
    /// state and camera freeze where they are.
    pub fn set_tracker_status(&mut self, status: TrackerStatus) {
        if let TrackerStatus::Unavailable { reason } = &status {
            log::warn!("[tracker] unavailable: {}; manual control only", reason);
            self.mailbox.put(GestureSample::absent());
        } else if !self.tracker.is_active() {
            log::info!("[tracker] active");
        }
        self.tracker = status;
    }

    /// Advance one frame: apply a fresh sample (if any) to the formation
    /// state, ease progress, then steer the camera from the latest sample.
    pub fn tick(&mut self, dt_sec: f32) {
        if let Some(sample) = self.mailbox.take_fresh() {
            self.formation.observe(&sample);
        }
        self.progress.set_target(self.formation.state());
        self.progress.tick(dt_sec);
        let latest = self.mailbox.latest;
        self.camera.update(&latest, dt_sec);
    }

    pub fn state(&self) -> FormationState {
        self.formation.state()
    }

    pub fn progress(&self) -> f32 {
        self.progress.progress()
    }

    pub fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    pub fn camera_mapper_mut(&mut self) -> &mut CameraMapper {
        &mut self.camera
    }

    pub fn indicator(&self) -> ControlIndicator {
        if !self.tracker.is_active() {
            ControlIndicator::Manual
        } else if self.mailbox.latest.is_reliable() {
            ControlIndicator::Tracking
        } else {
            ControlIndicator::Searching
        }
    }
}
