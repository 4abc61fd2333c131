use tree_core::gesture::{self, HandLandmarks, Landmark, INDEX_TIP, MIDDLE_MCP, PINKY_TIP, WRIST};
use tree_core::GestureSample;

// Script timing (seconds)
const CLOSED_UNTIL: f32 = 3.0;
const OPEN_UNTIL: f32 = 6.0;
const CYCLE: f32 = 7.5; // hand leaves the frame for the rest of the cycle

/// Stand-in for a camera hand tracker: produces landmark frames on a fixed
/// script (fist, open palm, no hand) with the hand drifting around the image.
pub struct ScriptedTracker {
    frame_interval: f32,
    since_frame: f32,
    clock: f32,
}

impl ScriptedTracker {
    pub fn new(frames_per_sec: f32) -> Self {
        let frame_interval = 1.0 / frames_per_sec.max(1.0);
        Self {
            frame_interval,
            // emit on the first poll
            since_frame: frame_interval,
            clock: 0.0,
        }
    }

    /// Advance by `dt_sec`; returns a sample when a camera frame is due.
    pub fn poll(&mut self, dt_sec: f32) -> Option<GestureSample> {
        self.clock += dt_sec;
        self.since_frame += dt_sec;
        if self.since_frame < self.frame_interval {
            return None;
        }
        self.since_frame -= self.frame_interval;
        let hand = self.landmarks_at(self.clock);
        Some(gesture::classify(hand.as_ref()))
    }

    fn landmarks_at(&self, t: f32) -> Option<HandLandmarks> {
        let phase = t % CYCLE;
        if phase >= OPEN_UNTIL {
            return None;
        }
        let open = phase >= CLOSED_UNTIL;
        let x = 0.5 + 0.3 * (t * 0.7).sin();
        let y = 0.5 + 0.2 * (t * 0.5).cos();
        let reach = if open { 0.5 } else { 0.2 };

        let mut points = [Landmark::default(); gesture::LANDMARK_COUNT];
        points[WRIST] = Landmark::new(x, y + 0.15, 0.0);
        points[MIDDLE_MCP] = Landmark::new(x, y, 0.0);
        points[INDEX_TIP] = Landmark::new(x - 0.05, y + 0.15 - reach, 0.0);
        points[PINKY_TIP] = Landmark::new(x + 0.08, y + 0.15 - reach * 0.8, 0.0);
        Some(HandLandmarks(points))
    }
}
