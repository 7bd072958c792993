//! Cross-fade of the corner text between its elven and English spellings.
//!
//! A single fraction `f` drives both spans: 0 shows elven, 1 shows English.
//! Each span is blurred and faded by how far `f` is from its own end.

use super::animation::ease_in_out_cubic;
use super::constants::{
    MORPH_BLUR_MAX_PX, MORPH_BLUR_SCALE_PX, MORPH_DURATION_MS, MORPH_MIN_FRACTION,
    MORPH_OPACITY_EXPONENT, TEXT_REVEAL_DURATION_MS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Elven,
    English,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Elven => Language::English,
            Language::English => Language::Elven,
        }
    }

    /// Morph fraction at which this spelling is fully shown.
    pub fn fraction(self) -> f32 {
        match self {
            Language::Elven => 0.0,
            Language::English => 1.0,
        }
    }
}

/// CSS `filter: blur()` radius and `opacity` for one span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub blur_px: f32,
    pub opacity: f32,
}

impl TextStyle {
    pub const HIDDEN: Self = Self {
        blur_px: MORPH_BLUR_MAX_PX,
        opacity: 0.0,
    };

    /// Style of a span at visibility `v`; blur grows as `8/v - 8`.
    pub fn at(v: f32) -> Self {
        let v = v.clamp(MORPH_MIN_FRACTION, 1.0 - MORPH_MIN_FRACTION);
        Self {
            blur_px: blur_for(v),
            opacity: v.powf(MORPH_OPACITY_EXPONENT),
        }
    }

    /// First-load reveal: opacity follows the eased progress from exactly zero.
    pub fn revealing(eased: f32) -> Self {
        let eased = eased.clamp(0.0, 1.0);
        Self {
            blur_px: blur_for(eased.max(MORPH_MIN_FRACTION)),
            opacity: eased.powf(MORPH_OPACITY_EXPONENT),
        }
    }

    pub fn filter_css(&self) -> String {
        format!("blur({}px)", self.blur_px)
    }
}

#[inline]
fn blur_for(v: f32) -> f32 {
    (MORPH_BLUR_SCALE_PX / v - MORPH_BLUR_SCALE_PX).min(MORPH_BLUR_MAX_PX)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerStyle {
    pub elven: TextStyle,
    pub english: TextStyle,
}

impl CornerStyle {
    pub fn at(f: f32) -> Self {
        Self {
            elven: TextStyle::at(1.0 - f),
            english: TextStyle::at(f),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Reveal { start_ms: Option<f64> },
    Morph { from: f32, to: f32, start_ms: Option<f64> },
    Idle,
}

/// Animation state of one corner text element.
///
/// Starts with the elven reveal. Hover morphs to English, leaving returns
/// to the default language, and a click swaps the default.
#[derive(Clone, Copy, Debug)]
pub struct TextMorph {
    phase: Phase,
    fraction: f32,
    default: Language,
    hovering: bool,
    pub morph_ms: f64,
    pub reveal_ms: f64,
}

impl Default for TextMorph {
    fn default() -> Self {
        Self::new(MORPH_DURATION_MS, TEXT_REVEAL_DURATION_MS)
    }
}

impl TextMorph {
    pub fn new(morph_ms: f64, reveal_ms: f64) -> Self {
        Self {
            phase: Phase::Reveal { start_ms: None },
            fraction: 0.0,
            default: Language::Elven,
            hovering: false,
            morph_ms,
            reveal_ms,
        }
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn default_language(&self) -> Language {
        self.default
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn pointer_enter(&mut self) {
        self.hovering = true;
        self.morph_to(Language::English);
    }

    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        self.morph_to(self.default);
    }

    /// Swaps the default language; shows it unless the pointer is holding English.
    pub fn click(&mut self) {
        self.default = self.default.toggled();
        if !self.hovering {
            self.morph_to(self.default);
        }
    }

    /// Starts from the current fraction, so interrupting a morph never jumps.
    pub fn morph_to(&mut self, target: Language) {
        self.phase = Phase::Morph {
            from: self.fraction,
            to: target.fraction(),
            start_ms: None,
        };
    }

    pub fn evaluate(&mut self, now_ms: f64) -> CornerStyle {
        match &mut self.phase {
            Phase::Reveal { start_ms } => {
                let t = progress(now_ms, start_ms, self.reveal_ms);
                if t >= 1.0 {
                    self.phase = Phase::Idle;
                    self.fraction = 0.0;
                    return CornerStyle::at(0.0);
                }
                CornerStyle {
                    elven: TextStyle::revealing(ease_in_out_cubic(t)),
                    english: TextStyle::HIDDEN,
                }
            }
            Phase::Morph { from, to, start_ms } => {
                let (from, to) = (*from, *to);
                let t = progress(now_ms, start_ms, self.morph_ms);
                if t >= 1.0 {
                    self.phase = Phase::Idle;
                    self.fraction = to;
                } else {
                    self.fraction = from + (to - from) * ease_in_out_cubic(t);
                }
                CornerStyle::at(self.fraction)
            }
            Phase::Idle => CornerStyle::at(self.fraction),
        }
    }
}

fn progress(now_ms: f64, start_ms: &mut Option<f64>, duration_ms: f64) -> f32 {
    let start = *start_ms.get_or_insert(now_ms);
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - start) / duration_ms).clamp(0.0, 1.0) as f32
}
