// Host-side tests for the tube mesh and the particle cloud.

use glam::Vec3;
use light_ray::ray::constants::*;
use light_ray::ray::palette::srgb_to_linear;
use light_ray::ray::{InteractionField, ParticleBuffer, PathCurve, PathGenerator, TubeGeometry};
use rand::prelude::*;

fn sample_curve() -> PathCurve {
    PathGenerator::new(42).curve(1.0, 0.0, &mut InteractionField::default())
}

#[test]
fn tube_topology() {
    let tube = TubeGeometry::new(RAY_RADIUS);
    assert_eq!(tube.vertex_count(), 201 * 13);
    assert_eq!(tube.indices.len(), 200 * 12 * 6);
    assert_eq!(tube.uvs.len(), tube.vertex_count());
    let max = tube.indices.iter().copied().max().unwrap_or(0) as usize;
    assert!(max < tube.vertex_count());
}

#[test]
fn rebuild_keeps_indices_and_wraps_rings_around_the_curve() {
    let curve = sample_curve();
    let mut tube = TubeGeometry::with_segments(GLOW_RADIUS, 40, 8);
    let indices = tube.indices.clone();
    tube.rebuild(&curve);
    assert_eq!(tube.indices, indices);

    let ring = 9;
    for i in 0..=40 {
        let center = curve.point_at(i as f32 / 40.0);
        for j in 0..ring {
            let k = i * ring + j;
            let r = tube.positions[k].distance(center);
            assert!((r - GLOW_RADIUS).abs() < 1e-3, "ring {i} vertex {j}: r={r}");
            assert!((tube.normals[k].length() - 1.0).abs() < 1e-3);
        }
        // seam vertices coincide
        assert!(tube.positions[i * ring].distance(tube.positions[i * ring + 8]) < 1e-3);
    }
}

#[test]
fn tube_normals_point_out_from_the_centre_line() {
    let curve = sample_curve();
    let mut tube = TubeGeometry::with_segments(RAY_RADIUS, 20, 6);
    tube.rebuild(&curve);
    for i in 0..=20 {
        let center = curve.point_at(i as f32 / 20.0);
        for j in 0..7 {
            let k = i * 7 + j;
            let outward = (tube.positions[k] - center) / RAY_RADIUS;
            assert!((outward - tube.normals[k]).length() < 1e-3, "ring {i} vertex {j}");
        }
    }
}

#[test]
fn new_particles_have_tones_and_sizes() {
    let mut rng = StdRng::seed_from_u64(1);
    let p = ParticleBuffer::new(PARTICLE_COUNT, &mut rng);
    assert_eq!(p.len(), 120);
    assert_eq!(p.positions.len(), 360);
    assert_eq!(p.colors.len(), 360);
    for s in &p.sizes {
        assert!((PARTICLE_SIZE_MIN..=PARTICLE_SIZE_MIN + PARTICLE_SIZE_SPAN).contains(s));
    }
    for rgb in p.colors.chunks(3) {
        assert!(PARTICLE_TONES.iter().any(|t| t.map(srgb_to_linear)[..] == *rgb));
    }
    assert!(p.is_dirty());
}

#[test]
fn particles_hug_the_curve() {
    let curve = sample_curve();
    let dense: Vec<Vec3> = (0..=4000).map(|k| curve.point_at(k as f32 / 4000.0)).collect();
    let mut rng = StdRng::seed_from_u64(9);
    let mut p = ParticleBuffer::new(PARTICLE_COUNT, &mut rng);
    p.mark_uploaded();
    p.update(&curve, &mut rng);
    assert!(p.is_dirty());

    for i in 0..p.len() {
        let pos = p.position(i);
        let nearest = dense
            .iter()
            .map(|q| q.distance(pos))
            .fold(f32::MAX, f32::min);
        assert!(nearest <= PARTICLE_MAX_OFFSET + 0.1, "particle {i}: {nearest}");
    }
}

#[test]
fn particle_updates_replay_with_the_same_rng() {
    let curve = sample_curve();
    let mut a = ParticleBuffer::new(30, &mut StdRng::seed_from_u64(5));
    let mut b = a.clone();
    a.update(&curve, &mut StdRng::seed_from_u64(6));
    b.update(&curve, &mut StdRng::seed_from_u64(6));
    assert_eq!(a.positions, b.positions);
}
