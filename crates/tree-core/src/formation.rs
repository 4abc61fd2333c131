//! Gesture samples and the two-state formation machine.

use crate::constants::CONFIDENCE_THRESHOLD;

/// Which arrangement the tree is heading toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FormationState {
    Chaos,
    #[default]
    Formed,
}

impl FormationState {
    /// Progress value the controller eases toward in this state.
    #[inline]
    pub fn target_progress(self) -> f32 {
        match self {
            FormationState::Chaos => 0.0,
            FormationState::Formed => 1.0,
        }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            FormationState::Chaos => FormationState::Formed,
            FormationState::Formed => FormationState::Chaos,
        }
    }
}

/// One snapshot from the hand tracker.
///
/// `x` and `y` are the normalized image position of the reference landmark;
/// `confidence` of 0 means no hand was seen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub hand_open: bool,
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

impl Default for GestureSample {
    fn default() -> Self {
        Self::absent()
    }
}

impl GestureSample {
    /// The tracker's "no hand" output.
    pub const fn absent() -> Self {
        Self {
            hand_open: false,
            x: 0.5,
            y: 0.5,
            confidence: 0.0,
        }
    }

    pub const fn detected(hand_open: bool, x: f32, y: f32) -> Self {
        Self {
            hand_open,
            x,
            y,
            confidence: 1.0,
        }
    }

    /// Strictly above the confidence threshold. NaN is never reliable.
    #[inline]
    pub fn is_reliable(&self) -> bool {
        self.confidence > CONFIDENCE_THRESHOLD
    }
}

/// Flat two-state machine. Reliable samples map directly to a state (open
/// hand scatters, closed hand forms) with no hysteresis; unreliable samples
/// leave the state untouched.
#[derive(Clone, Debug, Default)]
pub struct FormationStateMachine {
    state: FormationState,
}

impl FormationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormationState {
        self.state
    }

    /// Feed one sample and return the resulting state.
    pub fn observe(&mut self, sample: &GestureSample) -> FormationState {
        if sample.is_reliable() {
            let next = if sample.hand_open {
                FormationState::Chaos
            } else {
                FormationState::Formed
            };
            self.transition(next, "gesture");
        }
        self.state
    }

    /// Manual fallback: flip regardless of gesture input.
    pub fn toggle(&mut self) -> FormationState {
        self.transition(self.state.toggled(), "manual toggle");
        self.state
    }

    fn transition(&mut self, next: FormationState, cause: &str) {
        if next != self.state {
            log::debug!("[formation] {:?} -> {:?} ({})", self.state, next, cause);
            self.state = next;
        }
    }
}
