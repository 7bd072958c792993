//! Light-paint state: decay model, ping-pong roles and the splat queue.
//!
//! The GPU passes live in `render::light`; this module holds the parts that
//! can be reasoned about without a device. `LightDecay::step` and
//! `splat_intensity` mirror `shaders/light.wgsl` texel for texel.

use super::constants::{
    LIGHT_CUTOFF, LIGHT_FADE_DURATION_SEC, LIGHT_INTENSITY, LIGHT_QUANTIZATION_BIAS,
    MAX_PENDING_SPLATS, PAINT_INTENSITY,
};
use super::projection::LightSplat;
use super::ripple::smoothstep;
use glam::Vec2;

/// Per-frame exponential fade of the light buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightDecay {
    /// Intensity fraction left after `fade_duration_sec` seconds.
    pub floor: f32,
    pub fade_duration_sec: f32,
    /// Values below this are forced to zero.
    pub cutoff: f32,
    /// Subtracted after the multiply so 8-bit texels cannot stall.
    pub bias: f32,
}

impl Default for LightDecay {
    fn default() -> Self {
        Self {
            floor: (1.0 / 255.0) / LIGHT_INTENSITY,
            fade_duration_sec: LIGHT_FADE_DURATION_SEC,
            cutoff: LIGHT_CUTOFF,
            bias: LIGHT_QUANTIZATION_BIAS,
        }
    }
}

impl LightDecay {
    /// Multiplier for a frame of `delta_sec` seconds.
    pub fn factor(&self, delta_sec: f32) -> f32 {
        if self.fade_duration_sec <= 0.0 {
            return 0.0;
        }
        self.floor.powf(delta_sec.max(0.0) / self.fade_duration_sec)
    }

    /// One decay pass applied to a single texel intensity.
    pub fn step(&self, intensity: f32, delta_sec: f32) -> f32 {
        let v = (intensity * self.factor(delta_sec) - self.bias).max(0.0);
        if v < self.cutoff {
            0.0
        } else {
            v
        }
    }
}

/// Explicit read/write roles over the two light buffers.
///
/// `current` is the index last written; the other slot is written next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PingPong {
    current: usize,
}

impl PingPong {
    pub fn read(&self) -> usize {
        self.current
    }

    pub fn write(&self) -> usize {
        1 - self.current
    }

    pub fn swap(&mut self) {
        self.current = self.write();
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Splats waiting for the next light pass. Oldest are dropped past the cap.
#[derive(Clone, Debug, Default)]
pub struct SplatQueue {
    pending: Vec<LightSplat>,
}

impl SplatQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = LightSplat>>(&mut self, splats: I) {
        self.pending.extend(splats);
        if self.pending.len() > MAX_PENDING_SPLATS {
            let excess = self.pending.len() - MAX_PENDING_SPLATS;
            self.pending.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn take(&mut self) -> Vec<LightSplat> {
        std::mem::take(&mut self.pending)
    }
}

/// Per-instance vertex data for the splat pass (28 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SplatInstance {
    pub uv: [f32; 2],
    pub uv_deriv: [f32; 4],
    pub screen_radius: f32,
}

impl From<&LightSplat> for SplatInstance {
    fn from(s: &LightSplat) -> Self {
        Self {
            uv: s.uv.to_array(),
            uv_deriv: s.jacobian.to_array(),
            screen_radius: s.screen_radius,
        }
    }
}

/// Half-size in light-texture pixels of the quad covering a splat.
pub fn splat_pixel_radius(splat: &LightSplat, tex_size: Vec2) -> f32 {
    let j = &splat.jacobian;
    let dx = Vec2::new(j.du_dx, j.dv_dx) * tex_size;
    let dy = Vec2::new(j.du_dy, j.dv_dy) * tex_size;
    dx.length().max(dy.length()) * splat.screen_radius + 1.0
}

/// Additive intensity a splat deposits at a UV offset from its centre.
pub fn splat_intensity(splat: &LightSplat, uv_offset: Vec2) -> f32 {
    if splat.screen_radius <= 0.0 {
        return 0.0;
    }
    let screen_offset = splat.jacobian.inverse_apply(uv_offset);
    let dist = screen_offset.length() / splat.screen_radius;
    (1.0 - smoothstep(0.0, 1.0, dist)) * PAINT_INTENSITY
}
