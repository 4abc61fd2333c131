//! Camera description and the hand-driven camera mapper.
//!
//! The mapper steers the eye toward a point derived from the hand position
//! and re-aims the camera at the scene origin. It never touches the formation
//! state; both consume the same gesture sample independently.

use crate::constants::{
    camera_orbit_target, camera_start_eye, CAMERA_BASE_Y, CAMERA_BLEND_PER_FRAME, CAMERA_FOVY_DEG,
    CAMERA_SPAN_X, CAMERA_SPAN_Y, CAMERA_ZFAR, CAMERA_ZNEAR, ORBIT_MAX_DISTANCE,
    ORBIT_MIN_DISTANCE,
};
use crate::formation::GestureSample;
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_start_eye(),
            target: camera_orbit_target(),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    /// Combined world-to-clip transform uploaded as the camera uniform.
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// How the eye blends toward the hand-derived target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraSmoothing {
    /// Fixed fraction per rendered frame, independent of frame time. Faster
    /// displays converge faster.
    PerFrame { blend: f32 },
    /// Opt-in frame-rate independent variant: `dt * rate` of the remaining
    /// distance per update, capped at 1.
    TimeScaled { rate: f32 },
}

impl Default for CameraSmoothing {
    fn default() -> Self {
        CameraSmoothing::PerFrame {
            blend: CAMERA_BLEND_PER_FRAME,
        }
    }
}

impl CameraSmoothing {
    pub fn factor(self, dt_sec: f32) -> f32 {
        match self {
            // max(0.0) maps NaN to 0
            CameraSmoothing::PerFrame { blend } => blend.max(0.0).min(1.0),
            CameraSmoothing::TimeScaled { rate } => {
                let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
                (dt * rate.max(0.0)).min(1.0)
            }
        }
    }
}

/// Eye-space target for a hand at normalized `(x, y)`. Image y grows
/// downward, so it is flipped.
#[inline]
pub fn hand_to_eye_target(x: f32, y: f32) -> Vec2 {
    Vec2::new(
        (x - 0.5) * CAMERA_SPAN_X,
        (0.5 - y) * CAMERA_SPAN_Y + CAMERA_BASE_Y,
    )
}

#[derive(Clone, Debug, Default)]
pub struct CameraMapper {
    camera: Camera,
    smoothing: CameraSmoothing,
}

impl CameraMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(mut self, smoothing: CameraSmoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn smoothing(&self) -> CameraSmoothing {
        self.smoothing
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    /// Orbit controller entry point. Keeps the eye between the orbit
    /// distance limits around the current look target.
    pub fn set_eye(&mut self, eye: Vec3) {
        let offset = eye - self.camera.target;
        let direction = offset.try_normalize().unwrap_or(Vec3::Z);
        let distance = offset
            .length()
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        self.camera.eye = self.camera.target + direction * distance;
    }

    /// Advance one rendered frame. Returns whether the sample was reliable
    /// enough to move the camera; otherwise the pose is held.
    pub fn update(&mut self, sample: &GestureSample, dt_sec: f32) -> bool {
        if !sample.is_reliable() {
            return false;
        }
        let target = hand_to_eye_target(sample.x, sample.y);
        let k = self.smoothing.factor(dt_sec);
        let eye = &mut self.camera.eye;
        eye.x += (target.x - eye.x) * k;
        eye.y += (target.y - eye.y) * k;
        self.camera.target = Vec3::ZERO;
        true
    }
}
