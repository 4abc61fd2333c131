use crate::error::ConfigError;
use crate::particle::{Category, CategoryConfig, ParticleSet};
use rand::prelude::*;

/// Per-category configuration for a whole tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    pub foliage: CategoryConfig,
    pub balls: CategoryConfig,
    pub gifts: CategoryConfig,
    pub photos: CategoryConfig,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            foliage: CategoryConfig::default_for(Category::Foliage),
            balls: CategoryConfig::default_for(Category::Ball),
            gifts: CategoryConfig::default_for(Category::Gift),
            photos: CategoryConfig::default_for(Category::Photo),
        }
    }
}

impl TreeConfig {
    pub fn get(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Foliage => &self.foliage,
            Category::Ball => &self.balls,
            Category::Gift => &self.gifts,
            Category::Photo => &self.photos,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut CategoryConfig {
        match category {
            Category::Foliage => &mut self.foliage,
            Category::Ball => &mut self.balls,
            Category::Gift => &mut self.gifts,
            Category::Photo => &mut self.photos,
        }
    }
}

/// All particle sets of one tree instance. Regenerating means building a new
/// value; existing sets are never diffed or resized.
#[derive(Clone, Debug)]
pub struct TreeParticles {
    sets: [ParticleSet; 4],
}

impl TreeParticles {
    pub fn build<R: Rng + ?Sized>(config: &TreeConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let foliage = ParticleSet::build(Category::Foliage, &config.foliage, rng)?;
        let balls = ParticleSet::build(Category::Ball, &config.balls, rng)?;
        let gifts = ParticleSet::build(Category::Gift, &config.gifts, rng)?;
        let photos = ParticleSet::build(Category::Photo, &config.photos, rng)?;
        Ok(Self {
            sets: [foliage, balls, gifts, photos],
        })
    }

    pub fn new(config: &TreeConfig) -> Result<Self, ConfigError> {
        Self::build(config, &mut thread_rng())
    }

    pub fn get(&self, category: Category) -> &ParticleSet {
        // `sets` is laid out in `Category::ALL` order
        let index = match category {
            Category::Foliage => 0,
            Category::Ball => 1,
            Category::Gift => 2,
            Category::Photo => 3,
        };
        &self.sets[index]
    }

    pub fn sets(&self) -> &[ParticleSet] {
        &self.sets
    }

    pub fn total_len(&self) -> usize {
        self.sets.iter().map(ParticleSet::len).sum()
    }
}
