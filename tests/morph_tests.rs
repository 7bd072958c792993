// Host-side tests for the corner-text morph and the cursor trail throttle.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod ocean_core;

use ocean_core::animation::ease_in_out_cubic;
use ocean_core::constants::{MORPH_BLUR_MAX_PX, MORPH_DURATION_MS, TEXT_REVEAL_DURATION_MS};
use ocean_core::morph::{CornerStyle, Language, TextMorph, TextStyle};
use ocean_core::trail::RippleTrail;

fn revealed() -> TextMorph {
    let mut m = TextMorph::default();
    m.evaluate(0.0);
    m.evaluate(TEXT_REVEAL_DURATION_MS);
    assert!(!m.is_animating());
    m
}

#[test]
fn cubic_ease_endpoints_and_shape() {
    assert_eq!(ease_in_out_cubic(-0.5), 0.0);
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(0.5), 0.5);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert_eq!(ease_in_out_cubic(0.25), 0.0625);
    assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-6);
}

#[test]
fn span_style_blur_and_opacity() {
    let half = TextStyle::at(0.5);
    assert!((half.blur_px - 8.0).abs() < 1e-5);
    assert!((half.opacity - 0.5_f32.powf(0.4)).abs() < 1e-6);
    assert_eq!(TextStyle::at(0.0).blur_px, MORPH_BLUR_MAX_PX);
    assert!(TextStyle::at(1.0).blur_px < 0.01);
    assert_eq!(half.filter_css(), "blur(8px)");
}

#[test]
fn corner_style_is_symmetric() {
    let s = CornerStyle::at(0.25);
    assert_eq!(s.english, TextStyle::at(0.25));
    assert_eq!(s.elven, TextStyle::at(0.75));
    let shown = CornerStyle::at(0.0);
    assert!(shown.elven.opacity > 0.99);
    assert!(shown.english.opacity < 0.05);
}

#[test]
fn first_load_reveals_elven_only() {
    let mut m = TextMorph::default();
    let start = m.evaluate(1000.0);
    assert_eq!(start.elven.opacity, 0.0);
    assert_eq!(start.elven.blur_px, MORPH_BLUR_MAX_PX);
    assert_eq!(start.english, TextStyle::HIDDEN);

    let mid = m.evaluate(1000.0 + TEXT_REVEAL_DURATION_MS / 2.0);
    assert!((mid.elven.opacity - 0.5_f32.powf(0.4)).abs() < 1e-6);
    assert_eq!(mid.english, TextStyle::HIDDEN);

    let end = m.evaluate(1000.0 + TEXT_REVEAL_DURATION_MS);
    assert_eq!(end, CornerStyle::at(0.0));
    assert!(!m.is_animating());
}

#[test]
fn hover_shows_english_and_leave_returns() {
    let mut m = revealed();
    m.pointer_enter();
    assert!(m.is_animating());
    m.evaluate(2000.0);
    m.evaluate(2000.0 + MORPH_DURATION_MS / 2.0);
    assert!((m.fraction() - 0.5).abs() < 1e-6);
    m.evaluate(2000.0 + MORPH_DURATION_MS);
    assert_eq!(m.fraction(), 1.0);
    assert!(!m.is_animating());

    m.pointer_leave();
    m.evaluate(4000.0);
    m.evaluate(4000.0 + MORPH_DURATION_MS);
    assert_eq!(m.fraction(), 0.0);
}

#[test]
fn interrupted_morph_starts_from_current_fraction() {
    let mut m = revealed();
    m.pointer_enter();
    m.evaluate(0.0);
    m.evaluate(MORPH_DURATION_MS / 2.0);
    m.pointer_leave();
    let resumed = m.evaluate(MORPH_DURATION_MS / 2.0 + 1.0);
    assert_eq!(resumed, CornerStyle::at(0.5));
}

#[test]
fn click_toggles_default_language() {
    let mut m = revealed();
    assert_eq!(m.default_language(), Language::Elven);
    m.click();
    assert_eq!(m.default_language(), Language::English);
    m.evaluate(0.0);
    m.evaluate(MORPH_DURATION_MS);
    assert_eq!(m.fraction(), 1.0);

    // while hovering, the click only changes where leaving ends up
    m.pointer_enter();
    m.evaluate(1000.0);
    m.evaluate(1000.0 + MORPH_DURATION_MS);
    m.click();
    assert_eq!(m.default_language(), Language::Elven);
    assert!(!m.is_animating());
    m.pointer_leave();
    m.evaluate(3000.0);
    m.evaluate(3000.0 + MORPH_DURATION_MS);
    assert_eq!(m.fraction(), 0.0);
    assert_eq!(Language::English.toggled(), Language::Elven);
}

#[test]
fn trail_is_throttled_by_interval() {
    let mut t = RippleTrail::default();
    assert!(t.admit(0.0));
    assert!(!t.admit(50.0));
    assert!(!t.admit(99.9));
    assert!(t.admit(100.0));
    assert!(!t.admit(150.0));
    assert!(t.admit(250.0));
}

#[test]
fn trail_evicts_oldest_at_cap() {
    let t = RippleTrail::default();
    assert_eq!(t.evictions(0), 0);
    assert_eq!(t.evictions(8), 0);
    assert_eq!(t.evictions(9), 1);
    assert_eq!(t.evictions(12), 4);
    assert_eq!(RippleTrail::new(100.0, 0).evictions(0), 0);
}
