//! Position generators for the two particle arrangements.
//!
//! Both samplers are stateless and draw fresh values from the caller's RNG on
//! every call, so hosts can seed a `StdRng` for reproducible scenes or use the
//! thread RNG for variety.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Sample a point uniformly by volume inside a sphere of `radius`.
///
/// The polar angle comes from `acos(2u - 1)` so directions are uniform over
/// the sphere, and the radial distance uses a cube root so density is
/// uniform by volume rather than by radius.
pub fn sample_chaos<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * rng.gen::<f32>().cbrt();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Sample a point inside a cone standing on the xz plane, re-centered on y.
///
/// Height is drawn uniformly per slice, not per volume: every slice is equally
/// likely regardless of its circumference, which packs points toward the tip
/// and gives the tree its silhouette.
pub fn sample_formed<R: Rng + ?Sized>(rng: &mut R, height: f32, max_radius: f32) -> Vec3 {
    let y = rng.gen::<f32>() * height;
    let radius_at_y = max_radius * (1.0 - y / height);
    let theta = rng.gen::<f32>() * TAU;
    Vec3::new(
        radius_at_y * theta.cos(),
        y - height / 2.0,
        radius_at_y * theta.sin(),
    )
}

/// Planar radius of the cone at a re-centered height `y_out`.
#[inline]
pub fn cone_radius_at(y_out: f32, height: f32, max_radius: f32) -> f32 {
    max_radius * (1.0 - (y_out + height / 2.0) / height)
}
