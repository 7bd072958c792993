// Host-side tests for quality tiers, the adaptive controller and page config.
// The main crate is wasm-only, so we pull the pure-Rust core in by path.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod ocean_core;

use ocean_core::auto_quality::{fps_report, AutoQuality, AutoQualityConfig, FpsCounter};
use ocean_core::config::PageConfig;
use ocean_core::quality::{backing_size, QualityTier, QUALITY_TIERS};

#[test]
fn profiles_get_more_expensive_with_tier() {
    for pair in QUALITY_TIERS.windows(2) {
        let (lo, hi) = (pair[0].profile(), pair[1].profile());
        assert!(lo.raymarch_steps <= hi.raymarch_steps);
        assert!(lo.wave_iter_raymarch <= hi.wave_iter_raymarch);
        assert!(lo.fbm_octaves <= hi.fbm_octaves);
        assert!(lo.scale <= hi.scale);
    }
}

#[test]
fn tier_steps_clamp_at_the_ends() {
    assert_eq!(QualityTier::Low.lower(), None);
    assert_eq!(QualityTier::Low.higher(), Some(QualityTier::Medium));
    assert_eq!(QualityTier::Medium.lower(), Some(QualityTier::Low));
    assert_eq!(QualityTier::High.higher(), None);
}

#[test]
fn tier_parses_and_displays() {
    assert_eq!("low".parse::<QualityTier>(), Ok(QualityTier::Low));
    assert_eq!(" Medium ".parse::<QualityTier>(), Ok(QualityTier::Medium));
    assert_eq!("HIGH".parse::<QualityTier>(), Ok(QualityTier::High));
    assert!("ultra".parse::<QualityTier>().is_err());
    assert_eq!(QualityTier::Medium.to_string(), "medium");
    assert_eq!(QualityTier::default(), QualityTier::High);
}

#[test]
fn backing_size_uses_low_dpi_scale_below_threshold() {
    assert_eq!(backing_size(1000.0, 500.0, 2.0, QualityTier::High), (800, 400));
    assert_eq!(backing_size(1000.0, 500.0, 1.0, QualityTier::High), (680, 340));
    assert_eq!(backing_size(0.0, 0.0, 2.0, QualityTier::Low), (1, 1));
}

#[test]
fn controller_holds_the_floor_on_low_fps() {
    let mut aq = AutoQuality::default();
    let mut tier = QualityTier::Low;
    for (i, fps) in [15.0, 16.0, 14.0, 15.0].into_iter().enumerate() {
        let now = 5000.0 + i as f64 * 250.0;
        if let Some(next) = aq.observe(now, fps, tier) {
            tier = next;
        }
    }
    assert_eq!(tier, QualityTier::Low);
    assert_eq!(aq.average_fps(), Some(15.0));
}

#[test]
fn controller_steps_up_once_and_clears_history() {
    let mut aq = AutoQuality::default();
    let mut changes = Vec::new();
    let mut tier = QualityTier::Medium;
    for i in 0..8 {
        let now = 5000.0 + i as f64 * 250.0;
        if let Some(next) = aq.observe(now, 60.0, tier) {
            changes.push((now, next));
            assert_eq!(aq.samples(), 0);
            tier = next;
        }
    }
    assert_eq!(changes, vec![(5500.0, QualityTier::High)]);
    assert_eq!(tier, QualityTier::High);
}

#[test]
fn controller_waits_for_three_samples() {
    let mut aq = AutoQuality::default();
    assert_eq!(aq.observe(10_000.0, 10.0, QualityTier::Medium), None);
    assert_eq!(aq.observe(10_250.0, 10.0, QualityTier::Medium), None);
    assert_eq!(
        aq.observe(10_500.0, 10.0, QualityTier::Medium),
        Some(QualityTier::Low)
    );
}

#[test]
fn controller_respects_cooldown() {
    let mut aq = AutoQuality::default();
    aq.note_change(5000.0);
    for i in 1..16 {
        let now = 5000.0 + i as f64 * 250.0;
        let step = aq.observe(now, 10.0, QualityTier::High);
        if now - 5000.0 < 4000.0 {
            assert_eq!(step, None, "changed at {now} inside the cooldown");
        }
    }
}

#[test]
fn controller_evicts_samples_outside_the_window() {
    let mut aq = AutoQuality::default();
    aq.observe(5000.0, 10.0, QualityTier::High);
    aq.observe(5100.0, 10.0, QualityTier::High);
    assert_eq!(aq.observe(8000.0, 10.0, QualityTier::High), None);
    assert_eq!(aq.samples(), 1);
}

#[test]
fn thresholds_are_tunable() {
    let mut aq = AutoQuality::new(AutoQualityConfig {
        fps_low: 50.0,
        ..AutoQualityConfig::default()
    });
    let mut step = None;
    for i in 0..3 {
        step = aq.observe(5000.0 + i as f64 * 100.0, 45.0, QualityTier::High);
    }
    assert_eq!(step, Some(QualityTier::Medium));
}

#[test]
fn fps_counter_reports_once_per_second() {
    let mut counter = FpsCounter::default();
    let reports: Vec<(f64, u32)> = (0..=25)
        .map(|i| i as f64 * 100.0)
        .filter_map(|t| counter.tick(t).map(|fps| (t, fps)))
        .collect();
    assert_eq!(reports, vec![(1000.0, 11), (2000.0, 10)]);
}

#[test]
fn fps_report_formats_overlay_text() {
    assert_eq!(
        fps_report(58, 640, 360, QualityTier::Medium),
        "FPS: 58 | 640x360 | Quality: medium"
    );
}

#[test]
fn page_config_reads_query_flags() {
    let cfg = PageConfig::from_query("?fps&quality=low&autoquality=off");
    assert!(cfg.show_fps);
    assert_eq!(cfg.initial_quality, QualityTier::Low);
    assert!(!cfg.auto_quality);

    let cfg = PageConfig::from_query("");
    assert_eq!(cfg, PageConfig::default());

    let cfg = PageConfig::from_query("quality=bogus&autoquality=on");
    assert_eq!(cfg.initial_quality, QualityTier::High);
    assert!(cfg.auto_quality);
}
