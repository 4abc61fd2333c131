//! Open/closed classification from 21-point hand landmarks.
//!
//! Landmark detection itself is external. Hosts that receive raw landmarks
//! from a detector can turn them into a [`GestureSample`] here.

use crate::constants::OPEN_HAND_DISTANCE;
use crate::formation::GestureSample;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const PINKY_TIP: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance in the image plane; depth is ignored.
    #[inline]
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmarks(pub [Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.0.get(index)
    }

    /// A hand is open when either the index or the pinky tip is far from
    /// the wrist.
    pub fn is_open(&self) -> bool {
        let wrist = &self.0[WRIST];
        wrist.planar_distance(&self.0[INDEX_TIP]) > OPEN_HAND_DISTANCE
            || wrist.planar_distance(&self.0[PINKY_TIP]) > OPEN_HAND_DISTANCE
    }
}

/// Convert the first detected hand (if any) into a sample. The middle-finger
/// knuckle is the reference position.
pub fn classify(hand: Option<&HandLandmarks>) -> GestureSample {
    match hand {
        Some(hand) => {
            let anchor = &hand.0[MIDDLE_MCP];
            GestureSample::detected(hand.is_open(), anchor.x, anchor.y)
        }
        None => GestureSample::absent(),
    }
}
