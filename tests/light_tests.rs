// Host-side tests for the light-paint model and the ripple field.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod ocean_core;

use glam::Vec2;
use ocean_core::constants::{
    LIGHT_CUTOFF, MAX_PENDING_SPLATS, MAX_RIPPLES, PAINT_INTENSITY, RIPPLE_LIFETIME_SEC,
};
use ocean_core::light::{splat_intensity, splat_pixel_radius, LightDecay, PingPong, SplatQueue};
use ocean_core::projection::{Jacobian, LightSplat};
use ocean_core::ripple::{Ripple, RippleField};
use ocean_core::SplatInstance;

const FRAME_SEC: f32 = 1.0 / 60.0;

fn splat(radius: f32) -> LightSplat {
    LightSplat {
        uv: Vec2::new(0.5, 0.75),
        jacobian: Jacobian::default(),
        screen_radius: radius,
    }
}

#[test]
fn decay_factor_reaches_floor_after_fade_duration() {
    let decay = LightDecay::default();
    assert!((decay.factor(decay.fade_duration_sec) - decay.floor).abs() < 1e-6);
    assert_eq!(decay.factor(0.0), 1.0);
    assert!(decay.factor(FRAME_SEC) < 1.0);
}

#[test]
fn unbiased_decay_is_geometric() {
    let decay = LightDecay {
        bias: 0.0,
        cutoff: 0.0,
        ..LightDecay::default()
    };
    let i0 = 1.0_f32;
    let mut i = i0;
    for n in 1..=600 {
        i = decay.step(i, FRAME_SEC);
        if n % 100 == 0 {
            let expected =
                i0 * decay.floor.powf(n as f32 * FRAME_SEC / decay.fade_duration_sec);
            assert!(
                (i - expected).abs() <= expected * 1e-3,
                "frame {n}: {i} vs {expected}"
            );
        }
    }
}

#[test]
fn biased_decay_reaches_exact_zero() {
    let decay = LightDecay::default();
    let mut i = 1.0_f32;
    let mut frames = 0;
    while i > 0.0 {
        i = decay.step(i, FRAME_SEC);
        frames += 1;
        assert!(frames < 300, "light never cleared");
    }
    assert_eq!(i, 0.0);
    assert_eq!(decay.step(i, FRAME_SEC), 0.0);
}

#[test]
fn values_below_cutoff_are_cleared() {
    let decay = LightDecay {
        bias: 0.0,
        ..LightDecay::default()
    };
    assert_eq!(decay.step(LIGHT_CUTOFF * 0.5, 0.0), 0.0);
    assert!(decay.step(LIGHT_CUTOFF * 2.0, 0.0) > 0.0);
}

#[test]
fn zero_fade_duration_clears_immediately() {
    let decay = LightDecay {
        fade_duration_sec: 0.0,
        ..LightDecay::default()
    };
    assert_eq!(decay.factor(FRAME_SEC), 0.0);
}

#[test]
fn ping_pong_alternates_roles() {
    let mut pp = PingPong::default();
    assert_eq!((pp.read(), pp.write()), (0, 1));
    pp.swap();
    assert_eq!((pp.read(), pp.write()), (1, 0));
    pp.swap();
    assert_eq!(pp.read(), 0);
    pp.swap();
    pp.reset();
    assert_eq!(pp.read(), 0);
}

#[test]
fn splat_queue_drops_oldest_past_cap() {
    let mut q = SplatQueue::new();
    q.extend((0..MAX_PENDING_SPLATS + 100).map(|i| splat(i as f32)));
    assert_eq!(q.len(), MAX_PENDING_SPLATS);
    let taken = q.take();
    assert_eq!(taken[0].screen_radius, 100.0);
    assert!(q.is_empty());
}

#[test]
fn splat_falls_off_to_zero_at_its_radius() {
    let s = splat(10.0);
    assert!((splat_intensity(&s, Vec2::ZERO) - PAINT_INTENSITY).abs() < 1e-6);
    let half = splat_intensity(&s, Vec2::new(0.005, 0.0));
    assert!(half > 0.0 && half < PAINT_INTENSITY);
    assert_eq!(splat_intensity(&s, Vec2::new(0.011, 0.0)), 0.0);
    assert_eq!(splat_intensity(&splat(0.0), Vec2::ZERO), 0.0);
}

#[test]
fn splat_quad_covers_its_footprint() {
    let r = splat_pixel_radius(&splat(10.0), Vec2::new(1000.0, 1000.0));
    assert!((r - 11.0).abs() < 1e-4);
}

#[test]
fn splat_instance_matches_vertex_layout() {
    assert_eq!(std::mem::size_of::<SplatInstance>(), 28);
    let inst = SplatInstance::from(&splat(3.0));
    assert_eq!(inst.uv, [0.5, 0.75]);
    assert_eq!(inst.uv_deriv, [0.001, 0.0, 0.0, 0.001]);
    assert_eq!(inst.screen_radius, 3.0);
}

fn ripple_at(birth: f32) -> Ripple {
    Ripple {
        origin: Vec2::ZERO,
        birth_time: birth,
        amplitude: 0.18,
    }
}

#[test]
fn ripple_field_is_a_bounded_fifo() {
    let mut field = RippleField::new();
    for i in 0..MAX_RIPPLES + 2 {
        field.push(ripple_at(i as f32));
    }
    assert_eq!(field.len(), MAX_RIPPLES);
    let births: Vec<f32> = field.iter().map(|r| r.birth_time).collect();
    assert_eq!(births.first(), Some(&2.0));
    assert_eq!(births.last(), Some(&((MAX_RIPPLES + 1) as f32)));
    let (packed, count) = field.packed();
    assert_eq!(count as usize, MAX_RIPPLES);
    assert_eq!(packed[0][2], 2.0);
}

#[test]
fn expired_ripples_contribute_nothing() {
    let r = ripple_at(0.0);
    let p = Vec2::new(0.3, 0.1);
    assert!(r.is_alive(RIPPLE_LIFETIME_SEC));
    assert!(!r.is_alive(RIPPLE_LIFETIME_SEC + 1e-3));
    assert_eq!(r.height_at(p, RIPPLE_LIFETIME_SEC + 1e-3), 0.0);
    assert_eq!(r.height_at(p, -1.0), 0.0);

    let mut field = RippleField::new();
    field.push(r);
    field.push(ripple_at(0.5));
    assert_eq!(field.height_at(p, 20.0), 0.0);
}

#[test]
fn ripple_fades_in_from_zero() {
    let r = ripple_at(1.0);
    assert_eq!(r.height_at(Vec2::new(0.2, 0.0), 1.0), 0.0);
    let later = (0..20)
        .map(|i| r.height_at(Vec2::new(0.2, 0.0), 1.5 + i as f32 * 0.05).abs())
        .fold(0.0_f32, f32::max);
    assert!(later > 0.0);
}
