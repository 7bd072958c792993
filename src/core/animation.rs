//! Eased transitions between two values.
//!
//! Each animated quantity (night blend, camera pose, logo fade) is a small
//! [`Tween`] record instead of a closure capturing a start timestamp. The
//! start time latches on the first `evaluate` after a retarget so that a
//! retarget issued from an event handler begins on the next rendered frame.

use glam::Vec3;

/// Values that can be linearly interpolated.
pub trait Mix: Copy + PartialEq {
    fn mix(self, other: Self, t: f32) -> Self;
}

impl Mix for f32 {
    #[inline]
    fn mix(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Mix for Vec3 {
    #[inline]
    fn mix(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// Smoothstep easing on [0, 1].
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Cubic ease-in-out on [0, 1]; steeper through the middle than [`ease_in_out`].
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Mix> {
    pub from: T,
    pub to: T,
    pub start_ms: Option<f64>,
    pub duration_ms: f64,
    value: T,
}

impl<T: Mix> Tween<T> {
    /// A tween resting at `value`.
    pub fn settled(value: T, duration_ms: f64) -> Self {
        Self {
            from: value,
            to: value,
            start_ms: None,
            duration_ms,
            value,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.to
    }

    /// Head for `to`, starting from wherever the tween currently is.
    /// Retargeting to the current target is a no-op.
    pub fn retarget(&mut self, to: T) {
        if to == self.to {
            return;
        }
        self.from = self.value;
        self.to = to;
        self.start_ms = None;
    }

    /// Retarget and pin the start time.
    pub fn retarget_at(&mut self, to: T, now_ms: f64) {
        if to == self.to {
            return;
        }
        self.retarget(to);
        self.start_ms = Some(now_ms);
    }

    pub fn evaluate(&mut self, now_ms: f64) -> T {
        if self.is_settled() {
            self.start_ms = None;
            return self.value;
        }
        let start = *self.start_ms.get_or_insert(now_ms);
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        };
        if progress >= 1.0 {
            self.value = self.to;
            self.start_ms = None;
        } else {
            self.value = self.from.mix(self.to, ease_in_out(progress as f32));
        }
        self.value
    }
}

/// Delayed linear fade from 0 to `target`, anchored at the first frame.
#[derive(Clone, Copy, Debug)]
pub struct DelayedFade {
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub target: f32,
    start_ms: Option<f64>,
}

impl DelayedFade {
    pub fn new(delay_ms: f64, duration_ms: f64, target: f32) -> Self {
        Self {
            delay_ms,
            duration_ms,
            target,
            start_ms: None,
        }
    }

    pub fn evaluate(&mut self, now_ms: f64) -> f32 {
        let start = *self.start_ms.get_or_insert(now_ms + self.delay_ms);
        let progress = if now_ms < start {
            0.0
        } else if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        };
        progress as f32 * self.target
    }
}
