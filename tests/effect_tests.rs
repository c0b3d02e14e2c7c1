// Host-side tests for the per-frame effect update.

use glam::Vec2;
use light_ray::ray::constants::*;
use light_ray::ray::scroll::frame_alpha;
use light_ray::ray::{EffectInput, EffectParams, InteractionKind, RayEffect, ScrollState};

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn new_effect_is_ready_to_draw() {
    let effect = RayEffect::new(EffectParams::default());
    assert_eq!(effect.time(), 0.0);
    assert_eq!(effect.particles().len(), PARTICLE_COUNT);
    assert!(effect.particles().positions.iter().all(|v| v.is_finite()));
    assert!(effect.ray_tube().positions.iter().all(|p| p.is_finite()));
    assert!(effect.glow_tube().positions.iter().all(|p| p.is_finite()));
    assert!(effect.interactions().is_empty());
}

#[test]
fn one_sixtieth_second_advances_one_frame_step() {
    let mut effect = RayEffect::new(EffectParams::default());
    let state = effect.advance(FRAME);
    assert!((state.time - f64::from(TIME_STEP_PER_FRAME)).abs() < 1e-6);
    assert_eq!(state.time, effect.time());
}

#[test]
fn long_gaps_are_clamped() {
    let mut effect = RayEffect::new(EffectParams::default());
    effect.advance(10.0);
    let expected = f64::from(TIME_STEP_PER_FRAME * REFERENCE_FPS * MAX_FRAME_DT_SEC);
    assert!((effect.time() - expected).abs() < 1e-6);
    effect.advance(-1.0);
    assert!((effect.time() - expected).abs() < 1e-6);
}

#[test]
fn clock_keeps_running_after_days_open() {
    let rate = 655_360.0;
    let mut effect = RayEffect::new(EffectParams {
        time_rate: rate,
        ..EffectParams::default()
    });
    effect.advance(0.1);
    let t0 = effect.time();
    assert!(t0 >= 65_536.0);

    let dt = TIME_STEP_PER_FRAME / rate;
    let mut last = t0;
    for _ in 0..1000 {
        let state = effect.advance(dt);
        assert!(state.time > last, "clock stalled at {}", state.time);
        last = state.time;
    }
    assert!((effect.time() - t0 - 3.0).abs() < 0.01, "t={}", effect.time());
}

#[test]
fn shader_time_wraps_without_a_seam() {
    let mut effect = RayEffect::new(EffectParams {
        time_rate: 1_000_000.0,
        ..EffectParams::default()
    });
    let state = effect.advance(0.1);
    let st = state.shader_time();
    assert!((0.0..SHADER_TIME_PERIOD as f32).contains(&st));
    for rate in [0.4f64, 0.3, 0.2, 0.15, 0.08] {
        let wrapped = (rate * f64::from(st)).sin();
        let full = (rate * state.time).sin();
        assert!((wrapped - full).abs() < 1e-3, "rate {rate}");
    }
}

#[test]
fn update_without_advance_keeps_time() {
    let mut effect = RayEffect::new(EffectParams::default());
    effect.advance(FRAME);
    let t = effect.time();
    let state = effect.update();
    assert_eq!(state.time, t);
    assert!(!state.band_changed);
}

#[test]
fn scroll_eases_toward_the_page_offset() {
    let mut effect = RayEffect::new(EffectParams::default());
    effect.apply(EffectInput::Scroll(1000.0));
    assert_eq!(effect.scroll().target, 1000.0);
    assert_eq!(effect.scroll().smoothed, 0.0);

    effect.advance(FRAME);
    assert!((effect.scroll().smoothed - 15.0).abs() < 1e-2);

    let mut last = effect.scroll().smoothed;
    for _ in 0..600 {
        effect.advance(FRAME);
        let s = effect.scroll().smoothed;
        assert!(s >= last && s <= 1000.0);
        last = s;
    }
    assert!(last > 990.0);
    assert!((effect.scroll_factor() - last * SCROLL_FACTOR_SCALE).abs() < 1e-6);
}

#[test]
fn smoothing_is_frame_rate_independent() {
    let mut fast = ScrollState::default();
    let mut slow = ScrollState::default();
    fast.set_target(500.0);
    slow.set_target(500.0);
    for _ in 0..120 {
        fast.step(frame_alpha(SCROLL_SMOOTHING_PER_FRAME, 1.0 / 120.0, REFERENCE_FPS));
    }
    for _ in 0..30 {
        slow.step(frame_alpha(SCROLL_SMOOTHING_PER_FRAME, 1.0 / 30.0, REFERENCE_FPS));
    }
    assert!((fast.smoothed - slow.smoothed).abs() < 0.05);
}

#[test]
fn interactions_are_stamped_and_expire() {
    let params = EffectParams {
        time_rate: 10.0,
        ..EffectParams::default()
    };
    let mut effect = RayEffect::new(params);
    effect.advance(0.1);
    effect.apply(EffectInput::Interaction {
        kind: InteractionKind::CardHover,
        center: Vec2::new(-40.0, 10.0),
    });
    assert_eq!(effect.interactions().len(), 1);
    assert_eq!(effect.interactions().points()[0].created_at, effect.time());

    for _ in 0..4 {
        effect.advance(0.1);
    }
    assert_eq!(effect.interactions().len(), 1);
    for _ in 0..2 {
        effect.advance(0.1);
    }
    assert!(effect.interactions().is_empty());
}

#[test]
fn resize_updates_the_camera() {
    let mut effect = RayEffect::new(EffectParams::default());
    effect.apply(EffectInput::Resize {
        width: 200.0,
        height: 100.0,
    });
    assert_eq!(effect.camera().aspect, 2.0);
    effect.apply(EffectInput::Resize {
        width: 0.0,
        height: 100.0,
    });
    assert_eq!(effect.camera().aspect, 2.0);
}

#[test]
fn camera_sways_gently() {
    let mut effect = RayEffect::new(EffectParams::default());
    for _ in 0..100 {
        effect.advance(MAX_FRAME_DT_SEC);
        let eye = effect.camera().eye;
        assert!(eye.x.abs() <= CAMERA_SWAY && eye.y.abs() <= CAMERA_SWAY);
        assert_eq!(eye.z, CAMERA_Z);
    }
}

#[test]
fn glow_trails_the_ray() {
    let effect = RayEffect::new(EffectParams::default());
    let ray = &effect.ray_tube().positions;
    let glow = &effect.glow_tube().positions;
    assert_eq!(ray.len(), glow.len());
    let differing = ray
        .iter()
        .zip(glow.iter())
        .filter(|(a, b)| a.distance(**b) > 1e-3)
        .count();
    assert!(differing > 0);
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut effect = RayEffect::new(EffectParams::default());
        effect.apply(EffectInput::Scroll(300.0));
        for _ in 0..10 {
            effect.advance(FRAME);
        }
        (
            effect.particles().positions.clone(),
            effect.ray_tube().positions.clone(),
            effect.band(),
        )
    };
    assert_eq!(run(), run());
}
