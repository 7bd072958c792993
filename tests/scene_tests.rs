// Host-side tests for the per-frame scene state, tweens and theme modes.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod ocean_core;

use glam::{Vec2, Vec3};
use ocean_core::animation::{ease_in_out, DelayedFade, Tween};
use ocean_core::constants::*;
use ocean_core::projection::{CameraPose, Jacobian, LightSplat};
use ocean_core::{FrameInput, PageConfig, PageKind, QualityTier, SceneState, ThemeMode};

fn input(now_ms: f64) -> FrameInput {
    FrameInput {
        now_ms,
        device_pixel_ratio: 2.0,
        prefers_dark: false,
    }
}

fn scene() -> SceneState {
    SceneState::new(&PageConfig::default(), ThemeMode::Auto, false, PageKind::Normal)
}

#[test]
fn first_frame_starts_in_day() {
    let mut s = scene();
    let p = s.advance(&input(0.0));
    assert_eq!(p.night, 0.0);
    assert_eq!(p.ambient, AMBIENT_DAY);
    assert_eq!(p.quality, QualityTier::High);
    assert_eq!(p.light_delta_sec, 0.0);
    assert_eq!(p.light_decay, 1.0);
    assert_eq!(p.ripple_count, 0);
    assert!(!p.quality_changed);
}

#[test]
fn theme_switch_blends_to_night() {
    let mut s = scene();
    s.advance(&input(0.0));
    s.set_theme_mode(ThemeMode::Night);
    assert_eq!(s.advance(&input(1000.0)).night, 0.0);
    let mid = s.advance(&input(1000.0 + THEME_FADE_DURATION_MS / 2.0)).night;
    assert!((mid - 0.5).abs() < 1e-4);
    let end = s.advance(&input(1000.0 + THEME_FADE_DURATION_MS));
    assert_eq!(end.night, 1.0);
    assert!((end.ambient - AMBIENT_NIGHT).abs() < 1e-6);
}

#[test]
fn auto_theme_follows_os_preference() {
    let mut s = scene();
    s.advance(&input(0.0));
    let dark = FrameInput {
        prefers_dark: true,
        ..input(100.0)
    };
    s.advance(&dark);
    let p = s.advance(&FrameInput {
        prefers_dark: true,
        ..input(100.0 + THEME_FADE_DURATION_MS)
    });
    assert_eq!(p.night, 1.0);
}

#[test]
fn not_found_page_moves_camera() {
    let mut s = scene();
    s.advance(&input(0.0));
    s.set_page(PageKind::NotFound);
    assert_eq!(s.page(), PageKind::NotFound);
    s.advance(&input(500.0));
    let p = s.advance(&input(500.0 + CAMERA_404_DURATION_MS));
    assert_eq!(p.pose, PageKind::NotFound.camera_pose());
    assert_eq!(p.pose.z_offset, CAMERA_404_Z_OFFSET);
}

#[test]
fn not_found_direct_load_eases_in() {
    let mut s = SceneState::new(&PageConfig::default(), ThemeMode::Auto, false, PageKind::NotFound);
    let first = s.advance(&input(0.0));
    assert_eq!(first.pose, CameraPose::default());
    let mid = s.advance(&input(CAMERA_404_DURATION_MS / 2.0));
    assert!((mid.pose.z_offset - CAMERA_404_Z_OFFSET / 2.0).abs() < 1e-5);
    let end = s.advance(&input(CAMERA_404_DURATION_MS));
    assert_eq!(end.pose, PageKind::NotFound.camera_pose());
}

#[test]
fn page_kind_reads_router_attribute() {
    assert_eq!(PageKind::from_page_type(Some("404")), PageKind::NotFound);
    assert_eq!(PageKind::from_page_type(Some("home")), PageKind::Normal);
    assert_eq!(PageKind::from_page_type(None), PageKind::Normal);
}

#[test]
fn splats_are_delivered_once() {
    let mut s = scene();
    let splat = LightSplat {
        uv: Vec2::new(0.2, 0.8),
        jacobian: Jacobian::default(),
        screen_radius: 6.0,
    };
    s.queue_splats([splat; 10]);
    assert_eq!(s.pending_splats(), 10);
    assert_eq!(s.advance(&input(0.0)).splats.len(), 10);
    assert_eq!(s.pending_splats(), 0);
    assert!(s.advance(&input(16.0)).splats.is_empty());
}

#[test]
fn light_delta_tracks_frame_time() {
    let mut s = scene();
    s.advance(&input(1000.0));
    let p = s.advance(&input(1016.0));
    assert!((p.light_delta_sec - 0.016).abs() < 1e-6);
    assert!((p.light_decay - s.decay().factor(0.016)).abs() < 1e-7);
    assert!(p.light_decay < 1.0);
}

#[test]
fn slow_frames_lower_quality_with_cooldown() {
    let mut s = scene();
    let changes: Vec<(f64, QualityTier)> = (0..=80)
        .map(|i| i as f64 * 100.0)
        .filter_map(|t| {
            let p = s.advance(&input(t));
            p.quality_changed.then_some((t, p.quality))
        })
        .collect();
    assert_eq!(
        changes,
        vec![(4000.0, QualityTier::Medium), (8000.0, QualityTier::Low)]
    );
}

#[test]
fn disabled_controller_keeps_pinned_tier() {
    let cfg = PageConfig::from_query("quality=medium&autoquality=off");
    let mut s = SceneState::new(&cfg, ThemeMode::Day, false, PageKind::Normal);
    for i in 0..=80 {
        let p = s.advance(&input(i as f64 * 100.0));
        assert_eq!(p.quality, QualityTier::Medium);
        assert!(!p.quality_changed);
    }
}

#[test]
fn manual_quality_switch_reports_change() {
    let mut s = scene();
    assert!(!s.set_quality(QualityTier::High, 0.0));
    assert!(s.set_quality(QualityTier::Low, 0.0));
    assert_eq!(s.quality(), QualityTier::Low);
}

#[test]
fn fps_is_reported_each_second() {
    let mut s = scene();
    let reports: Vec<u32> = (0..=20)
        .filter_map(|i| s.advance(&input(i as f64 * 100.0)).fps)
        .collect();
    assert_eq!(reports, vec![11, 10]);
}

#[test]
fn click_ripple_lands_on_water() {
    let mut s = scene();
    let ripple = s
        .add_ripple_at(Vec2::new(0.5, 0.1), 1.5, 2000.0)
        .expect("lower screen hits water");
    assert_eq!(ripple.birth_time, 2.0);
    assert_eq!(ripple.amplitude, RIPPLE_CLICK_AMPLITUDE);
    assert!(s.add_ripple_at(Vec2::new(0.5, 0.95), 1.5, 2000.0).is_none());
    let p = s.advance(&input(2100.0));
    assert_eq!(p.ripple_count, 1);
    assert_eq!(p.ripples[0][2], 2.0);
}

#[test]
fn logo_fades_in_after_delay() {
    let mut s = scene();
    assert_eq!(s.advance(&input(0.0)).logo_fade, 0.0);
    assert_eq!(s.advance(&input(LOGO_FADE_DELAY_MS)).logo_fade, 0.0);
    let mid = s
        .advance(&input(LOGO_FADE_DELAY_MS + LOGO_FADE_DURATION_MS / 2.0))
        .logo_fade;
    assert!((mid - LOGO_FADE_TARGET / 2.0).abs() < 1e-6);
    assert_eq!(s.advance(&input(5000.0)).logo_fade, LOGO_FADE_TARGET);
}

#[test]
fn logo_rect_follows_image_aspect() {
    let mut s = scene();
    assert_eq!(s.logo_rect().center, Vec2::from_array(LOGO_DEFAULT_CENTER));
    s.set_logo_aspect(2.0);
    assert_eq!(s.logo_rect().size, Vec2::new(LOGO_BASE_SIZE, LOGO_BASE_SIZE / 2.0));
    s.set_logo_aspect(f32::NAN);
    assert_eq!(
        s.logo_rect().size,
        Vec2::new(LOGO_BASE_SIZE, LOGO_BASE_SIZE / LOGO_DEFAULT_ASPECT)
    );
    let mut rect = s.logo_rect();
    rect.center = Vec2::new(0.25, 0.7);
    s.set_logo_rect(rect);
    assert_eq!(s.advance(&input(0.0)).logo_rect, rect);
}

#[test]
fn grain_is_coarser_on_low_dpi() {
    let mut s = scene();
    let low = s.advance(&FrameInput {
        device_pixel_ratio: 1.0,
        ..input(0.0)
    });
    assert_eq!(low.noise_scale, LOW_DPI_NOISE_SCALE);
    assert_eq!(s.advance(&input(16.0)).noise_scale, 1.0);
}

#[test]
fn ease_hits_endpoints_and_midpoint() {
    assert_eq!(ease_in_out(0.0), 0.0);
    assert_eq!(ease_in_out(1.0), 1.0);
    assert_eq!(ease_in_out(0.5), 0.5);
    assert_eq!(ease_in_out(-1.0), 0.0);
    assert_eq!(ease_in_out(2.0), 1.0);
}

#[test]
fn tween_is_monotonic_and_lands_on_target() {
    let mut t = Tween::settled(0.0_f32, 1000.0);
    t.retarget(1.0);
    let mut prev = t.evaluate(0.0);
    assert_eq!(prev, 0.0);
    for i in 1..=10 {
        let v = t.evaluate(i as f64 * 100.0);
        assert!(v >= prev);
        prev = v;
    }
    assert_eq!(prev, 1.0);
    assert!(t.is_settled());
}

#[test]
fn tween_retarget_mid_flight_starts_from_current_value() {
    let mut t = Tween::settled(Vec3::ZERO, 1000.0);
    t.retarget(Vec3::X);
    t.evaluate(0.0);
    let mid = t.evaluate(500.0);
    t.retarget(Vec3::ZERO);
    assert_eq!(t.from, mid);
    assert_eq!(t.evaluate(600.0), mid);
    assert_eq!(t.evaluate(1600.0), Vec3::ZERO);

    let before = t.start_ms;
    t.retarget(Vec3::ZERO);
    assert_eq!(t.start_ms, before);
}

#[test]
fn delayed_fade_holds_zero_until_start() {
    let mut f = DelayedFade::new(100.0, 200.0, 0.8);
    assert_eq!(f.evaluate(1000.0), 0.0);
    assert_eq!(f.evaluate(1050.0), 0.0);
    assert!((f.evaluate(1200.0) - 0.4).abs() < 1e-6);
    assert_eq!(f.evaluate(1400.0), 0.8);
}

#[test]
fn theme_modes_cycle_and_persist() {
    assert_eq!(ThemeMode::from_stored(None), ThemeMode::Auto);
    assert_eq!(ThemeMode::from_stored(Some("night")), ThemeMode::Night);
    assert_eq!(ThemeMode::from_stored(Some("sepia")), ThemeMode::Auto);
    for mode in ThemeMode::ALL {
        assert_eq!(mode.next().next().next(), mode);
        assert_eq!(mode.as_str().parse::<ThemeMode>(), Ok(mode));
    }
    assert_eq!(ThemeMode::Auto.next(), ThemeMode::Night);
    assert_eq!(ThemeMode::Night.label(), "DARK");
    assert_eq!(ThemeMode::Day.label(), "LIGHT");
}

#[test]
fn theme_mode_resolves_night() {
    assert!(ThemeMode::Auto.is_night(true));
    assert!(!ThemeMode::Auto.is_night(false));
    assert!(ThemeMode::Night.is_night(false));
    assert!(!ThemeMode::Day.is_night(true));
    assert_eq!(ThemeMode::Night.blend_target(false), 1.0);
}
