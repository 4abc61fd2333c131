//! Particle records and the per-particle morphing rule.
//!
//! A [`ParticleSet`] is sampled once for a category and never changes. What
//! moves is the global progress value: each frame the renderer asks every
//! particle for its effective transform at that progress.

use crate::constants::{
    srgb_to_linear, EMERALD_SRGB, FOLIAGE_DEEP, FOLIAGE_LIGHT, FOLIAGE_SWAY_AMPLITUDE, GOLD_SRGB,
    PHOTO_CARD_LINEAR, PHOTO_COUNT_MAX, PHOTO_PANEL_SIZE, RED_SRGB,
};
use crate::error::ConfigError;
use crate::position::{sample_chaos, sample_formed};
use glam::{Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};
use std::ops::Range;

/// Orientation from Euler angles applied in X, Y, Z order (x outermost).
#[inline]
fn euler_xyz(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_rotation_x(x) * Quat::from_rotation_y(y) * Quat::from_rotation_z(z)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Foliage,
    Ball,
    Gift,
    Photo,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Foliage,
        Category::Ball,
        Category::Gift,
        Category::Photo,
    ];

    /// Affine factor applied to global progress for a particle of `weight`.
    ///
    /// Foliage converges in a narrow window, balls and photos lag or lead by
    /// their weight, and gifts are halved so they settle last.
    #[inline]
    pub fn progress_scale(self, weight: f32) -> f32 {
        match self {
            Category::Foliage => 1.0 + weight * 0.2,
            Category::Ball | Category::Photo => weight,
            Category::Gift => weight * 0.5,
        }
    }

    /// Effective progress for one particle, clamped to `[0, 1]`.
    #[inline]
    pub fn local_progress(self, progress: f32, weight: f32) -> f32 {
        (progress * self.progress_scale(weight)).clamp(0.0, 1.0)
    }
}

/// Shape and weight parameters for one category, fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryConfig {
    pub count: usize,
    pub chaos_radius: f32,
    pub formed_height: f32,
    pub formed_max_radius: f32,
    pub weight_range: Range<f32>,
}

impl CategoryConfig {
    /// Scene defaults for `category`.
    pub fn default_for(category: Category) -> Self {
        match category {
            Category::Foliage => Self {
                count: 8000,
                chaos_radius: 20.0,
                formed_height: 14.0,
                formed_max_radius: 5.0,
                weight_range: 0.0..1.0,
            },
            Category::Ball => Self {
                count: 120,
                chaos_radius: 22.0,
                formed_height: 12.0,
                formed_max_radius: 4.5,
                weight_range: 1.0..2.5,
            },
            Category::Gift => Self {
                count: 40,
                chaos_radius: 25.0,
                formed_height: 2.0, // gifts pile up around the base
                formed_max_radius: 5.5,
                weight_range: 2.0..3.0,
            },
            Category::Photo => Self {
                count: 20,
                chaos_radius: 30.0,
                formed_height: 12.0,
                formed_max_radius: 4.2,
                weight_range: 1.0..2.0,
            },
        }
    }

    pub fn validate(&self, category: Category) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptyCategory { category });
        }
        for (field, value) in [
            ("chaos_radius", self.chaos_radius),
            ("formed_height", self.formed_height),
            ("formed_max_radius", self.formed_max_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive {
                    category,
                    field,
                    value,
                });
            }
        }
        let Range { start, end } = self.weight_range;
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(ConfigError::InvalidWeightRange {
                category,
                start,
                end,
            });
        }
        // Every particle has to land exactly on its target at progress 1.
        let scale = category.progress_scale(start);
        if scale < 1.0 {
            return Err(ConfigError::WeightCannotConverge {
                category,
                start,
                scale,
            });
        }
        Ok(())
    }
}

/// Per-instance record uploaded by the renderer for instanced draws.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: [f32; 4],
    pub color: [f32; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub category: Category,
    pub chaos_position: Vec3,
    pub target_position: Vec3,
    pub weight: f32,
    pub size: Vec3,
    /// Linear RGBA.
    pub color: [f32; 4],
    /// Orientation in the formed arrangement.
    pub rotation: Quat,
    pub photo_id: Option<u32>,
}

impl Particle {
    fn sample<R: Rng + ?Sized>(category: Category, config: &CategoryConfig, rng: &mut R) -> Self {
        let chaos_position = sample_chaos(rng, config.chaos_radius);
        let target_position =
            sample_formed(rng, config.formed_height, config.formed_max_radius);
        let weight = rng.gen_range(config.weight_range.clone());

        let mut particle = Particle {
            category,
            chaos_position,
            target_position,
            weight,
            size: Vec3::ONE,
            color: [1.0; 4],
            rotation: Quat::IDENTITY,
            photo_id: None,
        };
        match category {
            Category::Foliage => {
                // point-size factor; the renderer divides by view depth
                particle.size = Vec3::splat(1.0 + weight);
                let t = weight.clamp(0.0, 1.0);
                let deep = Vec3::from(FOLIAGE_DEEP);
                let light = Vec3::from(FOLIAGE_LIGHT);
                particle.color = deep.lerp(light, t).extend(1.0).to_array();
            }
            Category::Ball => {
                particle.size = Vec3::splat(0.1 + rng.gen::<f32>() * 0.2);
                particle.color = if rng.gen::<f32>() > 0.5 {
                    srgb_to_linear(GOLD_SRGB)
                } else if rng.gen::<f32>() > 0.5 {
                    srgb_to_linear(EMERALD_SRGB)
                } else {
                    srgb_to_linear(RED_SRGB)
                };
                let (x, y, z) = (rng.gen(), rng.gen(), rng.gen());
                particle.rotation = euler_xyz(x, y, z);
            }
            Category::Gift => {
                particle.size = Vec3::splat(0.3 + rng.gen::<f32>() * 0.4);
                particle.color = if rng.gen::<f32>() > 0.5 {
                    srgb_to_linear(GOLD_SRGB)
                } else {
                    srgb_to_linear(RED_SRGB)
                };
                particle.rotation = Quat::from_rotation_y(rng.gen::<f32>() * PI);
            }
            Category::Photo => {
                // face outward from the trunk
                let azimuth = target_position.z.atan2(target_position.x);
                let tilt = (rng.gen::<f32>() - 0.5) * 0.4;
                particle.size = Vec3::from(PHOTO_PANEL_SIZE);
                particle.color = PHOTO_CARD_LINEAR;
                particle.rotation = euler_xyz(0.0, -azimuth + FRAC_PI_2, tilt);
                particle.photo_id = Some(rng.gen_range(0..PHOTO_COUNT_MAX));
            }
        }
        particle
    }

    #[inline]
    pub fn local_progress(&self, progress: f32) -> f32 {
        self.category.local_progress(progress, self.weight)
    }

    /// Position at global `progress`, interpolated per axis.
    ///
    /// Written as `chaos * (1 - t) + target * t` so both endpoints come out
    /// bit-exact.
    pub fn effective_position(&self, progress: f32) -> Vec3 {
        let t = self.local_progress(progress);
        self.chaos_position * (1.0 - t) + self.target_position * t
    }

    /// Orientation the particle tumbles from while scattered. Only photo
    /// panels use it; the chaos coordinates double as Euler angles.
    pub fn chaos_rotation(&self) -> Quat {
        let c = self.chaos_position;
        euler_xyz(c.x, c.y, c.z)
    }

    /// Orientation at global `progress`. Photo panels slerp from their chaos
    /// orientation; everything else keeps its static rotation.
    pub fn effective_rotation(&self, progress: f32) -> Quat {
        if self.category != Category::Photo {
            return self.rotation;
        }
        let t = self.local_progress(progress);
        if t <= 0.0 {
            self.chaos_rotation()
        } else if t >= 1.0 {
            self.rotation
        } else {
            self.chaos_rotation().slerp(self.rotation, t)
        }
    }

    /// Full instance record at `progress`. Foliage sways along x while the
    /// tree is not fully formed.
    pub fn instance(&self, progress: f32, time_sec: f32) -> InstanceData {
        let mut position = self.effective_position(progress);
        if self.category == Category::Foliage {
            let sway = (time_sec + position.y).sin() * FOLIAGE_SWAY_AMPLITUDE;
            position.x += sway * (1.0 - progress);
        }
        InstanceData {
            position: position.to_array(),
            scale: self.size.to_array(),
            rotation: self.effective_rotation(progress).to_array(),
            color: self.color,
        }
    }
}

/// Immutable collection of particles for one category.
#[derive(Clone, Debug)]
pub struct ParticleSet {
    category: Category,
    config: CategoryConfig,
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// Validate `config` and sample `config.count` particles from `rng`.
    pub fn build<R: Rng + ?Sized>(
        category: Category,
        config: &CategoryConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate(category)?;
        let particles = (0..config.count)
            .map(|_| Particle::sample(category, config, rng))
            .collect::<Vec<_>>();
        log::info!(
            "[particles] built {} {:?} (chaos r={:.1}, cone h={:.1} r={:.1})",
            particles.len(),
            category,
            config.chaos_radius,
            config.formed_height,
            config.formed_max_radius
        );
        Ok(Self {
            category,
            config: config.clone(),
            particles,
        })
    }

    /// Like [`ParticleSet::build`] with the thread RNG.
    pub fn new(category: Category, config: &CategoryConfig) -> Result<Self, ConfigError> {
        Self::build(category, config, &mut thread_rng())
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn config(&self) -> &CategoryConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn effective_positions(&self, progress: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.particles
            .iter()
            .map(move |p| p.effective_position(progress))
    }

    /// Refill `out` with one instance record per particle.
    pub fn write_instances(&self, progress: f32, time_sec: f32, out: &mut Vec<InstanceData>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| p.instance(progress, time_sec)));
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
