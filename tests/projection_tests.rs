// Host-side tests for the screen / water / sky mappings.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod ocean_core;

use glam::{Vec2, Vec3};
use ocean_core::projection::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ASPECT: f32 = 16.0 / 9.0;

fn close(a: Vec2, b: Vec2, eps: f32) -> bool {
    (a - b).abs().max_element() <= eps
}

#[test]
fn screen_centre_looks_slightly_up() {
    let ray = camera_ray(Vec2::splat(0.5), ASPECT, 0.0);
    assert!(ray.y > 0.0);
    assert!(ray.z > 0.0);
    assert!((ray.length() - 1.0).abs() < 1e-5);
}

#[test]
fn lower_screen_hits_water_and_maps_back() {
    let pose = CameraPose::default();
    for screen in [
        Vec2::new(0.5, 0.05),
        Vec2::new(0.2, 0.2),
        Vec2::new(0.9, 0.1),
    ] {
        let hit = screen_to_water_hit(screen, ASPECT, 3.0, pose).expect("below horizon");
        let back = water_hit_to_screen(hit, ASPECT, 3.0, pose).expect("in front of camera");
        assert!(close(back, screen, 1e-3), "{screen:?} -> {back:?}");
    }
}

#[test]
fn upper_screen_misses_water() {
    let pose = CameraPose::default();
    assert_eq!(screen_to_water_hit(Vec2::new(0.5, 0.95), ASPECT, 0.0, pose), None);
}

#[test]
fn sky_uv_round_trips_on_upper_hemisphere() {
    for uv in [
        Vec2::new(0.1, 0.6),
        Vec2::new(0.5, 0.75),
        Vec2::new(0.85, 0.95),
    ] {
        let back = direction_to_sky_uv(sky_uv_to_direction(uv));
        assert!(close(back, uv, 1e-4), "{uv:?} -> {back:?}");
    }
    let dir = Vec3::new(0.3, 0.4, 0.5).normalize();
    let back = sky_uv_to_direction(direction_to_sky_uv(dir));
    assert!((back - dir).length() < 1e-4);
}

#[test]
fn screen_to_sky_round_trips_through_direction() {
    let screen = Vec2::new(0.3, 0.8);
    let uv = screen_to_sky_uv(screen, ASPECT, 0.0).expect("above horizon");
    let back = direction_to_screen(sky_uv_to_direction(uv), ASPECT, 0.0).expect("visible");
    assert!(close(back, screen, 1e-3), "{back:?}");
}

#[test]
fn sky_is_not_sampled_below_horizon() {
    assert_eq!(screen_to_sky_uv(Vec2::new(0.5, 0.0), ASPECT, 0.0), None);
}

#[test]
fn uv_delta_wraps_across_seam() {
    assert!((wrap_uv_delta(0.95, 0.05) + 0.1).abs() < 1e-5);
    assert!((wrap_uv_delta(0.05, 0.95) - 0.1).abs() < 1e-5);
    assert!((wrap_uv_delta(0.6, 0.4) - 0.2).abs() < 1e-5);
}

#[test]
fn client_position_maps_to_device_pixels_y_up() {
    let px = client_to_canvas_px(
        Vec2::new(110.0, 20.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(200.0, 100.0),
        Vec2::new(400.0, 200.0),
    );
    assert_eq!(px, Some(Vec2::new(200.0, 180.0)));
    assert_eq!(
        client_to_canvas_px(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, Vec2::ONE),
        None
    );
}

#[test]
fn sky_sample_has_invertible_jacobian() {
    let size = Vec2::new(800.0, 450.0);
    let sample = sky_sample(Vec2::new(400.0, 380.0), size, 0.0).expect("sky pixel");
    assert!(sample.jacobian.det().abs() > 0.0);
    assert!(sky_sample(Vec2::new(-5.0, 10.0), size, 0.0).is_none());
    assert!(sky_sample(Vec2::new(400.0, 5.0), size, 0.0).is_none());
}

#[test]
fn jacobian_inverse_undoes_apply() {
    let j = Jacobian {
        du_dx: 0.002,
        dv_dx: 0.0005,
        du_dy: -0.0003,
        dv_dy: 0.0015,
    };
    let v = Vec2::new(7.0, -3.0);
    assert!(close(j.inverse_apply(j.apply(v)), v, 1e-3));

    let singular = Jacobian {
        du_dx: 0.0,
        dv_dx: 0.0,
        du_dy: 0.0,
        dv_dy: 0.0,
    };
    assert_eq!(singular.inverse_apply(v), v);
}

#[test]
fn splat_burst_stays_in_sky_texture() {
    let size = Vec2::new(800.0, 450.0);
    let sample = sky_sample(Vec2::new(20.0, 430.0), size, 0.0).expect("sky pixel");
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        for s in splat_burst(&sample, 1.5, &mut rng) {
            assert!((0.0..1.0).contains(&s.uv.x), "u = {}", s.uv.x);
            assert!((0.0..=1.0).contains(&s.uv.y), "v = {}", s.uv.y);
            assert!((4.0 * 1.5..=10.0 * 1.5).contains(&s.screen_radius));
            assert_eq!(s.jacobian, sample.jacobian);
        }
    }
}

#[test]
fn logo_rect_projects_into_sky() {
    let fallback = Vec2::new(0.18, 0.18 / 1.32);
    let rect = logo_sky_rect(
        Vec2::new(0.5, 0.8),
        Vec2::new(0.1, 0.05),
        ASPECT,
        0.0,
        fallback,
    )
    .expect("logo above horizon");
    assert!(rect.size.x > 0.0 && rect.size.y > 0.0);
    assert!(rect.center.y > 0.5);
    assert_eq!(
        logo_sky_rect(Vec2::new(0.5, 0.05), Vec2::new(0.1, 0.05), ASPECT, 0.0, fallback),
        None
    );
}

#[test]
fn camera_pose_packs_as_vec3() {
    let pose = CameraPose {
        y_offset: 1.0,
        z_offset: -8.0,
        tilt_offset: -0.7,
    };
    assert_eq!(CameraPose::from_vec3(pose.to_vec3()), pose);
}
