// Particle construction, config validation and the per-particle morph rule.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::{
    Category, CategoryConfig, ConfigError, InstanceData, ParticleSet, TreeConfig, TreeParticles,
    FOLIAGE_SWAY_AMPLITUDE,
};

fn foliage_config(count: usize) -> CategoryConfig {
    CategoryConfig {
        count,
        chaos_radius: 20.0,
        formed_height: 14.0,
        formed_max_radius: 5.0,
        weight_range: 0.0..1.0,
    }
}

fn weights_across(range: &std::ops::Range<f32>) -> Vec<f32> {
    (0..=20)
        .map(|i| range.start + (range.end - range.start) * i as f32 / 20.0)
        .collect()
}

#[test]
fn local_progress_hits_exact_endpoints_for_every_category() {
    for category in Category::ALL {
        let range = CategoryConfig::default_for(category).weight_range;
        for w in weights_across(&range) {
            assert_eq!(category.local_progress(0.0, w), 0.0, "{category:?} w={w}");
            assert_eq!(category.local_progress(1.0, w), 1.0, "{category:?} w={w}");
        }
    }
}

#[test]
fn local_progress_is_monotonic() {
    for category in Category::ALL {
        let range = CategoryConfig::default_for(category).weight_range;
        for w in weights_across(&range) {
            let mut prev = 0.0_f32;
            for step in 0..=200 {
                let p = step as f32 / 200.0;
                let local = category.local_progress(p, w);
                assert!(local >= prev, "{category:?} w={w} p={p}: {local} < {prev}");
                assert!((0.0..=1.0).contains(&local));
                prev = local;
            }
        }
    }
}

#[test]
fn local_progress_staggers_particles() {
    // Two balls with different weights are at different points mid-morph.
    let light = Category::Ball.local_progress(0.5, 1.2);
    let heavy = Category::Ball.local_progress(0.5, 2.0);
    assert!((light - 0.6).abs() < 1e-6);
    assert_eq!(heavy, 1.0);

    let a = Category::Foliage.local_progress(0.5, 0.1);
    let b = Category::Foliage.local_progress(0.5, 0.9);
    assert!(b > a);

    let g = Category::Gift.local_progress(0.5, 2.0);
    assert!((g - 0.5).abs() < 1e-6);
}

#[test]
fn end_to_end_interpolation_between_arrangements() {
    let mut rng = StdRng::seed_from_u64(2024);
    let set = ParticleSet::build(Category::Foliage, &foliage_config(100), &mut rng)
        .expect("valid config");
    assert_eq!(set.len(), 100);

    for p in set.iter() {
        assert_eq!(p.effective_position(0.0), p.chaos_position);
        assert_eq!(p.effective_position(1.0), p.target_position);

        let mid = p.effective_position(0.5);
        for axis in 0..3 {
            let (a, b, v) = (p.chaos_position[axis], p.target_position[axis], mid[axis]);
            if (a - b).abs() > 1e-3 {
                assert!(
                    v > a.min(b) && v < a.max(b),
                    "axis {axis}: {v} not strictly between {a} and {b}"
                );
            }
        }
    }
}

#[test]
fn midpoint_lies_on_the_segment() {
    let mut rng = StdRng::seed_from_u64(99);
    let set = ParticleSet::build(Category::Foliage, &foliage_config(50), &mut rng).unwrap();
    for p in &set {
        let t = p.local_progress(0.5);
        let expected = p.chaos_position + (p.target_position - p.chaos_position) * t;
        assert!(p.effective_position(0.5).distance(expected) < 1e-4);
    }
}

#[test]
fn positions_are_frozen_after_construction() {
    let mut rng = StdRng::seed_from_u64(1);
    let config = CategoryConfig::default_for(Category::Ball);
    let set = ParticleSet::build(Category::Ball, &config, &mut rng).unwrap();
    let before: Vec<(Vec3, Vec3)> = set
        .iter()
        .map(|p| (p.chaos_position, p.target_position))
        .collect();
    for step in 0..10 {
        let _ = set.effective_positions(step as f32 / 10.0).count();
    }
    let after: Vec<(Vec3, Vec3)> = set
        .iter()
        .map(|p| (p.chaos_position, p.target_position))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn weights_are_drawn_from_the_category_range() {
    let mut rng = StdRng::seed_from_u64(8);
    for category in Category::ALL {
        let config = CategoryConfig::default_for(category);
        let set = ParticleSet::build(category, &config, &mut rng).unwrap();
        assert_eq!(set.len(), config.count);
        assert!(set.iter().all(|p| config.weight_range.contains(&p.weight)));
        assert!(set.iter().all(|p| p.category == category));
    }
}

#[test]
fn photo_panels_face_outward_and_slerp_between_orientations() {
    let mut rng = StdRng::seed_from_u64(42);
    let set = ParticleSet::build(
        Category::Photo,
        &CategoryConfig::default_for(Category::Photo),
        &mut rng,
    )
    .unwrap();

    for p in &set {
        assert!(p.photo_id.is_some_and(|id| id < 100));

        let planar = Vec3::new(p.target_position.x, 0.0, p.target_position.z);
        if planar.length() > 1e-3 {
            let facing = p.rotation * Vec3::Z;
            let outward = planar.normalize();
            assert!(
                facing.dot(outward) > 0.999,
                "panel faces {facing:?}, expected {outward:?}"
            );
        }

        assert_eq!(p.effective_rotation(0.0), p.chaos_rotation());
        assert_eq!(p.effective_rotation(1.0), p.rotation);

        // Mid-morph orientation lies on the shortest arc between the two.
        let mid = p.effective_rotation(0.3);
        assert!(mid.is_normalized());
        let total = p.chaos_rotation().angle_between(p.rotation);
        let split =
            p.chaos_rotation().angle_between(mid) + mid.angle_between(p.rotation);
        assert!((split - total).abs() < 1e-3, "split {split} vs total {total}");
    }
}

#[test]
fn non_photo_rotation_is_static() {
    let mut rng = StdRng::seed_from_u64(4);
    let config = CategoryConfig::default_for(Category::Gift);
    let set = ParticleSet::build(Category::Gift, &config, &mut rng).unwrap();
    for p in &set {
        assert_eq!(p.effective_rotation(0.0), p.rotation);
        assert_eq!(p.effective_rotation(0.7), p.rotation);
        // gifts only spin about the vertical axis
        let up = p.rotation * Vec3::Y;
        assert!(up.distance(Vec3::Y) < 1e-4);
    }
}

#[test]
fn instance_records_match_particles() {
    assert_eq!(std::mem::size_of::<InstanceData>(), 14 * 4);

    let mut rng = StdRng::seed_from_u64(6);
    let set = ParticleSet::build(Category::Foliage, &foliage_config(64), &mut rng).unwrap();
    let mut buffer = vec![InstanceData::default(); 3];
    set.write_instances(1.0, 12.5, &mut buffer);
    assert_eq!(buffer.len(), 64);
    for (p, inst) in set.iter().zip(&buffer) {
        // fully formed foliage does not sway
        assert_eq!(inst.position, p.target_position.to_array());
        assert_eq!(inst.scale, Vec3::splat(1.0 + p.weight).to_array());
    }
    let bytes: &[u8] = bytemuck::cast_slice(&buffer);
    assert_eq!(bytes.len(), 64 * std::mem::size_of::<InstanceData>());
}

#[test]
fn foliage_sways_only_while_scattered() {
    let mut rng = StdRng::seed_from_u64(12);
    let set = ParticleSet::build(Category::Foliage, &foliage_config(32), &mut rng).unwrap();
    let mut swayed = false;
    for p in &set {
        let inst = p.instance(0.0, 3.0);
        let dx = inst.position[0] - p.chaos_position.x;
        assert!(dx.abs() <= FOLIAGE_SWAY_AMPLITUDE + 1e-5);
        assert_eq!(inst.position[1], p.chaos_position.y);
        swayed |= dx.abs() > 1e-4;
    }
    assert!(swayed);
}

#[test]
fn invalid_configs_fail_fast() {
    let mut rng = StdRng::seed_from_u64(0);

    let err = ParticleSet::build(Category::Foliage, &foliage_config(0), &mut rng).unwrap_err();
    assert_eq!(
        err,
        ConfigError::EmptyCategory {
            category: Category::Foliage
        }
    );

    let mut cfg = foliage_config(10);
    cfg.chaos_radius = -1.0;
    let err = ParticleSet::build(Category::Foliage, &cfg, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositive {
            field: "chaos_radius",
            ..
        }
    ));

    let mut cfg = foliage_config(10);
    cfg.formed_height = 0.0;
    assert!(matches!(
        ParticleSet::build(Category::Foliage, &cfg, &mut rng),
        Err(ConfigError::NonPositive {
            field: "formed_height",
            ..
        })
    ));

    let mut cfg = foliage_config(10);
    cfg.formed_max_radius = f32::NAN;
    assert!(matches!(
        ParticleSet::build(Category::Foliage, &cfg, &mut rng),
        Err(ConfigError::NonPositive {
            field: "formed_max_radius",
            ..
        })
    ));

    let mut cfg = foliage_config(10);
    cfg.weight_range = 1.0..1.0;
    assert!(matches!(
        ParticleSet::build(Category::Foliage, &cfg, &mut rng),
        Err(ConfigError::InvalidWeightRange { .. })
    ));
}

#[test]
fn weight_ranges_that_cannot_reach_the_tree_are_rejected() {
    let mut rng = StdRng::seed_from_u64(0);

    let mut balls = CategoryConfig::default_for(Category::Ball);
    balls.weight_range = 0.5..2.0;
    let err = ParticleSet::build(Category::Ball, &balls, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::WeightCannotConverge {
            category: Category::Ball,
            ..
        }
    ));
    assert!(err.to_string().contains("Ball"));

    let mut gifts = CategoryConfig::default_for(Category::Gift);
    gifts.weight_range = 1.0..3.0;
    assert!(matches!(
        ParticleSet::build(Category::Gift, &gifts, &mut rng),
        Err(ConfigError::WeightCannotConverge { .. })
    ));
}

#[test]
fn tree_builds_every_category() {
    let mut rng = StdRng::seed_from_u64(31);
    let config = TreeConfig::default();
    let tree = TreeParticles::build(&config, &mut rng).unwrap();
    for category in Category::ALL {
        let set = tree.get(category);
        assert_eq!(set.category(), category);
        assert_eq!(set.len(), config.get(category).count);
    }
    assert_eq!(tree.total_len(), 8000 + 120 + 40 + 20);
}

#[test]
fn tree_rejects_a_single_bad_category() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut config = TreeConfig::default();
    config.get_mut(Category::Photo).count = 0;
    let err = TreeParticles::build(&config, &mut rng).unwrap_err();
    assert_eq!(
        err,
        ConfigError::EmptyCategory {
            category: Category::Photo
        }
    );
}
