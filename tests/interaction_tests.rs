// Host-side tests for interaction points and their influence on path samples.

use glam::{Vec2, Vec3};
use light_ray::ray::interaction::viewport_to_ray_space;
use light_ray::ray::{InteractionField, InteractionKind, InteractionPoint};

fn card_at(x: f32, y: f32, t: f64) -> InteractionPoint {
    InteractionPoint::new(InteractionKind::CardHover, Vec2::new(x, y), t)
}

#[test]
fn presets_match_their_sources() {
    let card = card_at(1.0, 2.0, 0.5);
    assert_eq!(card.position, Vec3::new(1.0, 2.0, 20.0));
    assert_eq!(card.strength, 25.0);
    assert_eq!(card.decay, 0.02);
    assert_eq!(card.created_at, 0.5);

    let section = InteractionPoint::new(InteractionKind::SectionVisible, Vec2::ZERO, 0.0);
    assert_eq!(section.position.z, 10.0);
    assert_eq!(section.strength, 15.0);
    assert_eq!(section.decay, 0.01);
    assert!(section.strength < card.strength);
}

#[test]
fn influence_pulls_toward_the_point() {
    let p = card_at(0.0, 0.0, 0.0);
    let sample = Vec3::new(30.0, -40.0, 0.0); // distance 50
    let d = p.influence_on(sample, 0.0);
    let expected = 25.0 / (1.0 + 5.0);
    assert!((d.truncate().length() - expected).abs() < 1e-4);
    assert!(d.truncate().dot(-sample.truncate()) > 0.0);
    assert!((d.z - 20.0 / 50.0 * expected).abs() < 1e-4);
}

#[test]
fn influence_vanishes_outside_radius() {
    let p = card_at(0.0, 0.0, 0.0);
    assert_eq!(p.influence_on(Vec3::new(100.0, 0.0, 0.0), 0.0), Vec3::ZERO);
    assert_eq!(p.influence_on(Vec3::new(150.0, 80.0, 0.0), 0.0), Vec3::ZERO);
    assert_ne!(p.influence_on(Vec3::new(99.0, 0.0, 0.0), 0.0), Vec3::ZERO);
}

#[test]
fn coincident_sample_is_finite() {
    let p = card_at(5.0, 5.0, 0.0);
    let d = p.influence_on(Vec3::new(5.0, 5.0, 3.0), 0.0);
    assert!(d.is_finite(), "{d}");
    assert_eq!(d.truncate(), Vec2::ZERO);
}

#[test]
fn influence_decays_with_age() {
    let p = card_at(0.0, 0.0, 0.0);
    let sample = Vec3::new(10.0, 0.0, 0.0);
    let young = p.influence_on(sample, 0.5).length();
    let old = p.influence_on(sample, 3.0).length();
    assert!(old < young);
    let ratio = old / young;
    assert!((ratio - (-0.02f32 * 2.5 * 10.0).exp()).abs() < 1e-4);
}

#[test]
fn expired_points_have_no_influence_and_are_pruned() {
    let mut field = InteractionField::default();
    field.push(card_at(0.0, 0.0, 0.0));
    field.push(card_at(0.0, 0.0, 3.0));
    let sample = Vec3::new(10.0, 0.0, 0.0);

    assert_eq!(field.points()[0].influence_on(sample, 5.0), Vec3::ZERO);
    field.prune(5.0);
    assert_eq!(field.len(), 1);
    assert_eq!(field.points()[0].created_at, 3.0);

    field.prune(8.0);
    assert!(field.is_empty());
    assert_eq!(field.influence(sample, 8.0), Vec3::ZERO);
}

#[test]
fn influences_accumulate() {
    let mut field = InteractionField::default();
    let a = card_at(0.0, 20.0, 0.0);
    let b = card_at(20.0, 0.0, 0.0);
    field.push(a);
    field.push(b);
    let sample = Vec3::ZERO;
    let sum = a.influence_on(sample, 1.0) + b.influence_on(sample, 1.0);
    assert!((field.influence(sample, 1.0) - sum).length() < 1e-5);
}

#[test]
fn viewport_centre_maps_to_origin() {
    let vp = Vec2::new(1920.0, 1080.0);
    assert_eq!(viewport_to_ray_space(Vec2::new(960.0, 540.0), vp), Vec2::ZERO);
    assert_eq!(
        viewport_to_ray_space(Vec2::new(0.0, 0.0), vp),
        Vec2::new(-960.0, -540.0)
    );
}
