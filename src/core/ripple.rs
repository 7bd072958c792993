use super::constants::{
    MAX_RIPPLES, RIPPLE_DECAY, RIPPLE_FADE_IN_SEC, RIPPLE_FREQUENCY, RIPPLE_LIFETIME_SEC,
    RIPPLE_SPATIAL_DECAY, RIPPLE_SPEED,
};
use glam::Vec2;
use smallvec::SmallVec;

/// A click ripple on the water plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    /// World-space (x, z) on the y = 0 plane.
    pub origin: Vec2,
    /// Scene time in seconds when the ripple was spawned.
    pub birth_time: f32,
    pub amplitude: f32,
}

impl Ripple {
    pub fn age(&self, time_sec: f32) -> f32 {
        time_sec - self.birth_time
    }

    pub fn is_alive(&self, time_sec: f32) -> bool {
        let age = self.age(time_sec);
        (0.0..=RIPPLE_LIFETIME_SEC).contains(&age)
    }

    /// Height contribution at `position`; zero before birth and after the lifetime.
    pub fn height_at(&self, position: Vec2, time_sec: f32) -> f32 {
        let age = self.age(time_sec);
        if !(0.0..=RIPPLE_LIFETIME_SEC).contains(&age) {
            return 0.0;
        }
        let dist = position.distance(self.origin);
        let phase = dist * RIPPLE_FREQUENCY - age * RIPPLE_SPEED;
        let envelope = (-RIPPLE_DECAY * age).exp() * (-dist * RIPPLE_SPATIAL_DECAY).exp();
        let fade_in = smoothstep(0.0, RIPPLE_FADE_IN_SEC, age);
        self.amplitude * envelope * fade_in * phase.sin()
    }

    /// Packed as the shader reads it: (x, z, birth, amplitude).
    pub fn packed(&self) -> [f32; 4] {
        [self.origin.x, self.origin.y, self.birth_time, self.amplitude]
    }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Bounded FIFO of ripples. Pushing past capacity evicts the oldest.
///
/// Expired ripples are not removed; they simply contribute nothing until
/// newer ones push them out.
#[derive(Clone, Debug, Default)]
pub struct RippleField {
    ripples: SmallVec<[Ripple; MAX_RIPPLES]>,
}

impl RippleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ripple: Ripple) {
        self.ripples.push(ripple);
        if self.ripples.len() > MAX_RIPPLES {
            self.ripples.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }

    /// Sum of all ripple contributions at `position`.
    pub fn height_at(&self, position: Vec2, time_sec: f32) -> f32 {
        self.ripples
            .iter()
            .map(|r| r.height_at(position, time_sec))
            .sum()
    }

    /// Fixed-size uniform array plus the live count.
    pub fn packed(&self) -> ([[f32; 4]; MAX_RIPPLES], u32) {
        let mut out = [[0.0; 4]; MAX_RIPPLES];
        for (slot, r) in out.iter_mut().zip(self.ripples.iter()) {
            *slot = r.packed();
        }
        (out, self.ripples.len() as u32)
    }
}
