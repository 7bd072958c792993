//! Pointer-to-scene projections.
//!
//! These mirror `get_ray`, `sky_uv` and `dir_to_screen_uv` in
//! `shaders/ocean.wgsl`; keep the two in lockstep. Screen positions are
//! normalised to [0, 1] with y pointing up (GL convention).

use super::constants::{
    CAMERA_BASE_TILT, CAMERA_DRIFT_PER_SEC, CAMERA_FOCAL, CAMERA_HEIGHT, CAMERA_Z,
    JACOBIAN_DET_EPSILON, SPLATS_PER_SAMPLE,
};
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Animated camera offsets layered on the fixed rig.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub y_offset: f32,
    pub z_offset: f32,
    pub tilt_offset: f32,
}

impl CameraPose {
    pub fn from_vec3(v: Vec3) -> Self {
        Self {
            y_offset: v.x,
            z_offset: v.y,
            tilt_offset: v.z,
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.y_offset, self.z_offset, self.tilt_offset)
    }

    pub fn tilt(self) -> f32 {
        CAMERA_BASE_TILT + self.tilt_offset
    }

    /// Camera origin at scene time `time_sec`.
    pub fn origin(self, time_sec: f32) -> Vec3 {
        Vec3::new(
            time_sec * CAMERA_DRIFT_PER_SEC,
            CAMERA_HEIGHT + self.y_offset,
            CAMERA_Z + self.z_offset,
        )
    }
}

/// Screen-space derivatives of sky UV, per device pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jacobian {
    pub du_dx: f32,
    pub dv_dx: f32,
    pub du_dy: f32,
    pub dv_dy: f32,
}

impl Default for Jacobian {
    fn default() -> Self {
        Self {
            du_dx: 0.001,
            dv_dx: 0.0,
            du_dy: 0.0,
            dv_dy: 0.001,
        }
    }
}

impl Jacobian {
    pub fn det(&self) -> f32 {
        self.du_dx * self.dv_dy - self.du_dy * self.dv_dx
    }

    /// Screen offset (pixels) to UV offset.
    pub fn apply(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            self.du_dx * screen.x + self.du_dy * screen.y,
            self.dv_dx * screen.x + self.dv_dy * screen.y,
        )
    }

    /// UV offset back to a screen offset. Near-singular Jacobians return the
    /// offset unchanged.
    pub fn inverse_apply(&self, uv: Vec2) -> Vec2 {
        let det = self.det();
        if det.abs() <= JACOBIAN_DET_EPSILON {
            return uv;
        }
        Vec2::new(
            (self.dv_dy * uv.x - self.du_dy * uv.y) / det,
            (-self.dv_dx * uv.x + self.du_dx * uv.y) / det,
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.du_dx, self.dv_dx, self.du_dy, self.dv_dy]
    }
}

/// Sky UV at a pointer sample together with its Jacobian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkySample {
    pub uv: Vec2,
    pub jacobian: Jacobian,
}

/// A queued light-paint splat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSplat {
    pub uv: Vec2,
    pub jacobian: Jacobian,
    /// Desired radius in canvas pixels.
    pub screen_radius: f32,
}

/// Sky-UV rectangle the logo is reflected into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyRect {
    pub center: Vec2,
    pub size: Vec2,
}

#[inline]
fn rotate_tilt(d: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(d.x, d.y * c + d.z * s, -d.y * s + d.z * c)
}

/// World-space view direction through a screen position.
pub fn camera_ray(screen: Vec2, aspect: f32, tilt_offset: f32) -> Vec3 {
    let uv = (screen * 2.0 - Vec2::ONE) * Vec2::new(aspect, 1.0);
    let proj = Vec3::new(uv.x, uv.y, CAMERA_FOCAL).normalize();
    rotate_tilt(proj, CAMERA_BASE_TILT + tilt_offset)
}

/// Screen position a world direction projects to, or `None` behind the camera.
pub fn direction_to_screen(dir: Vec3, aspect: f32, tilt_offset: f32) -> Option<Vec2> {
    let local = rotate_tilt(dir, -(CAMERA_BASE_TILT + tilt_offset));
    if local.z <= 0.0 {
        return None;
    }
    let uv = Vec2::new(local.x, local.y) / local.z * CAMERA_FOCAL;
    let ndc = uv / Vec2::new(aspect, 1.0);
    Some(ndc * 0.5 + Vec2::splat(0.5))
}

/// Intersection of the view ray with the y = 0 water plane, as world (x, z).
pub fn screen_to_water_hit(
    screen: Vec2,
    aspect: f32,
    time_sec: f32,
    pose: CameraPose,
) -> Option<Vec2> {
    let ray = camera_ray(screen, aspect, pose.tilt_offset);
    if ray.y >= 0.0 {
        return None;
    }
    let origin = pose.origin(time_sec);
    let t = -origin.y / ray.y;
    if !t.is_finite() || t <= 0.0 {
        return None;
    }
    Some(Vec2::new(origin.x + ray.x * t, origin.z + ray.z * t))
}

/// Screen position of a point on the water plane.
pub fn water_hit_to_screen(
    hit: Vec2,
    aspect: f32,
    time_sec: f32,
    pose: CameraPose,
) -> Option<Vec2> {
    let origin = pose.origin(time_sec);
    let dir = (Vec3::new(hit.x, 0.0, hit.y) - origin).normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }
    direction_to_screen(dir, aspect, pose.tilt_offset)
}

/// Longitude/latitude parametrisation of a direction.
pub fn direction_to_sky_uv(dir: Vec3) -> Vec2 {
    let u = (dir.z.atan2(dir.x) / TAU + 0.5).rem_euclid(1.0);
    let v = (dir.y * 0.5 + 0.5).clamp(0.0, 1.0);
    Vec2::new(u, v)
}

/// Inverse of [`direction_to_sky_uv`].
pub fn sky_uv_to_direction(uv: Vec2) -> Vec3 {
    let angle = (uv.x - 0.5) * TAU;
    let y = (uv.y * 2.0 - 1.0).clamp(-1.0, 1.0);
    let r = (1.0 - y * y).max(0.0).sqrt();
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Sky UV under a screen position; `None` when the ray points below the horizon.
pub fn screen_to_sky_uv(screen: Vec2, aspect: f32, tilt_offset: f32) -> Option<Vec2> {
    let ray = camera_ray(screen, aspect, tilt_offset);
    if ray.y < 0.0 {
        return None;
    }
    Some(direction_to_sky_uv(ray))
}

/// Signed difference of two `u` values across the wrap seam, in [-0.5, 0.5].
#[inline]
pub fn wrap_uv_delta(a: f32, b: f32) -> f32 {
    let mut d = a - b;
    if d > 0.5 {
        d -= 1.0;
    }
    if d < -0.5 {
        d += 1.0;
    }
    d
}

/// Converts a pointer client position into canvas device pixels, y up.
pub fn client_to_canvas_px(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    canvas_size: Vec2,
) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    let scale = canvas_size / rect_size;
    let x = (client.x - rect_origin.x) * scale.x;
    let y = (rect_size.y - (client.y - rect_origin.y)) * scale.y;
    Some(Vec2::new(x, y))
}

/// Finite difference along one screen axis; one-sided when a neighbour misses.
fn axis_derivative(
    center: Vec2,
    plus: Option<Vec2>,
    minus: Option<Vec2>,
    eps: f32,
) -> Option<(f32, f32)> {
    match (plus, minus) {
        (Some(p), Some(m)) => Some((wrap_uv_delta(p.x, m.x) / (2.0 * eps), (p.y - m.y) / (2.0 * eps))),
        (Some(p), None) => Some((wrap_uv_delta(p.x, center.x) / eps, (p.y - center.y) / eps)),
        (None, Some(m)) => Some((wrap_uv_delta(center.x, m.x) / eps, (center.y - m.y) / eps)),
        (None, None) => None,
    }
}

/// Sky UV and its Jacobian at a canvas pixel (y up).
pub fn sky_sample(px: Vec2, canvas_size: Vec2, tilt_offset: f32) -> Option<SkySample> {
    if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
        return None;
    }
    let screen = px / canvas_size;
    if !(0.0..=1.0).contains(&screen.x) || !(0.0..=1.0).contains(&screen.y) {
        return None;
    }
    let aspect = canvas_size.x / canvas_size.y;
    let uv = screen_to_sky_uv(screen, aspect, tilt_offset)?;

    let eps = 1.0;
    let at = |p: Vec2| screen_to_sky_uv(p / canvas_size, aspect, tilt_offset);
    let right = at(px + Vec2::new(eps, 0.0));
    let left = at(px - Vec2::new(eps, 0.0));
    let up = at(px + Vec2::new(0.0, eps));
    let down = at(px - Vec2::new(0.0, eps));

    let mut jacobian = Jacobian::default();
    if let Some((du, dv)) = axis_derivative(uv, right, left, eps) {
        jacobian.du_dx = du;
        jacobian.dv_dx = dv;
    }
    if let Some((du, dv)) = axis_derivative(uv, up, down, eps) {
        jacobian.du_dy = du;
        jacobian.dv_dy = dv;
    }
    Some(SkySample { uv, jacobian })
}

/// A burst of jittered splats around one pointer sample.
///
/// `canvas_scale` is canvas pixels per CSS pixel times two, so the burst
/// keeps the same on-screen size across quality tiers.
pub fn splat_burst<R: Rng + ?Sized>(
    sample: &SkySample,
    canvas_scale: f32,
    rng: &mut R,
) -> [LightSplat; SPLATS_PER_SAMPLE] {
    std::array::from_fn(|_| {
        let angle = rng.gen::<f32>() * TAU;
        let radius = (rng.gen::<f32>() * 10.0 + 6.0) * canvas_scale;
        let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
        let jitter = sample.jacobian.apply(offset);
        let screen_radius = (rng.gen::<f32>() * 6.0 + 4.0) * canvas_scale;
        LightSplat {
            uv: Vec2::new(
                (sample.uv.x + jitter.x + 1.0).rem_euclid(1.0),
                (sample.uv.y + jitter.y).clamp(0.0, 1.0),
            ),
            jacobian: sample.jacobian,
            screen_radius,
        }
    })
}

/// Projects the logo's screen rectangle (centre and half extents, y up) into
/// sky UV. Axes whose endpoints miss the sky keep `fallback_size`.
pub fn logo_sky_rect(
    center: Vec2,
    half: Vec2,
    aspect: f32,
    tilt_offset: f32,
    fallback_size: Vec2,
) -> Option<SkyRect> {
    let uv = |p: Vec2| screen_to_sky_uv(p, aspect, tilt_offset);
    let center_uv = uv(center)?;
    let left = uv(center - Vec2::new(half.x, 0.0));
    let right = uv(center + Vec2::new(half.x, 0.0));
    let up = uv(center + Vec2::new(0.0, half.y));
    let down = uv(center - Vec2::new(0.0, half.y));

    let mut size = fallback_size;
    if let (Some(l), Some(r)) = (left, right) {
        size.x = wrap_uv_delta(r.x, l.x).abs();
    }
    if let (Some(u), Some(d)) = (up, down) {
        size.y = (u.y - d.y).abs();
    }
    Some(SkyRect {
        center: center_uv,
        size,
    })
}
