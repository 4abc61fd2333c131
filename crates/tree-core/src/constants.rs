use glam::Vec3;

// Shared tuning constants for the formation engine and its hosts.

// Progress easing
pub const PROGRESS_DAMPING_RATE: f32 = 2.0; // per second; ~1s to settle
pub const PROGRESS_SNAP_EPSILON: f32 = 1e-3; // snap to target inside this band

// Gesture input
pub const CONFIDENCE_THRESHOLD: f32 = 0.5; // strictly above counts as a reliable hand
pub const OPEN_HAND_DISTANCE: f32 = 0.4; // wrist-to-fingertip distance (normalized) for an open palm

// Camera mapping
pub const CAMERA_SPAN_X: f32 = 8.0; // world units across the full hand x range
pub const CAMERA_SPAN_Y: f32 = 4.0; // world units across the full hand y range
pub const CAMERA_BASE_Y: f32 = 4.0; // eye height with the hand centered
pub const CAMERA_BLEND_PER_FRAME: f32 = 0.05; // fraction of the remaining distance per frame

// Initial camera and orbit limits
pub const CAMERA_START_EYE: [f32; 3] = [0.0, 4.0, 20.0];
pub const CAMERA_ORBIT_TARGET: [f32; 3] = [0.0, 2.0, 0.0];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const ORBIT_MIN_DISTANCE: f32 = 10.0;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;

// Foliage
pub const FOLIAGE_SWAY_AMPLITUDE: f32 = 0.05; // x offset while scattered
pub const PHOTO_PANEL_SIZE: [f32; 3] = [0.8, 1.0, 0.05];
pub const PHOTO_COUNT_MAX: u32 = 100; // mock photo ids are drawn from [0, this)

// Palette (sRGB, converted to linear when particles are built)
pub const GOLD_SRGB: [u8; 3] = [0xD4, 0xAF, 0x37];
pub const EMERALD_SRGB: [u8; 3] = [0x04, 0x39, 0x27];
pub const RED_SRGB: [u8; 3] = [0x8B, 0x00, 0x00];
pub const PHOTO_CARD_LINEAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// Foliage gradient endpoints (already linear), blended by weight
pub const FOLIAGE_DEEP: [f32; 3] = [0.015, 0.22, 0.15];
pub const FOLIAGE_LIGHT: [f32; 3] = [0.05, 0.45, 0.25];

#[inline]
pub fn camera_start_eye() -> Vec3 {
    Vec3::from(CAMERA_START_EYE)
}

#[inline]
pub fn camera_orbit_target() -> Vec3 {
    Vec3::from(CAMERA_ORBIT_TARGET)
}

/// Convert an 8-bit sRGB color to linear RGBA with full alpha.
pub fn srgb_to_linear(rgb: [u8; 3]) -> [f32; 4] {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), 1.0]
}
