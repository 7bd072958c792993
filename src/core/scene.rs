//! Explicit renderer state advanced once per frame.
//!
//! Everything time-varying that the passes read lives in [`SceneState`];
//! `advance` turns it into a plain [`FrameParams`] snapshot for the GPU side.
//! Event handlers mutate the state between frames (ripples, splats, theme,
//! page kind) and never during one.

use super::animation::{DelayedFade, Tween};
use super::auto_quality::{AutoQuality, FpsCounter};
use super::config::PageConfig;
use super::constants::*;
use super::light::{LightDecay, SplatQueue};
use super::projection::{screen_to_water_hit, CameraPose, LightSplat, SkyRect};
use super::quality::QualityTier;
use super::ripple::{Ripple, RippleField};
use super::theme::ThemeMode;
use glam::{Vec2, Vec3};

/// Page kind reported by the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PageKind {
    #[default]
    Normal,
    NotFound,
}

impl PageKind {
    pub fn from_page_type(page_type: Option<&str>) -> Self {
        match page_type {
            Some("404") => PageKind::NotFound,
            _ => PageKind::Normal,
        }
    }

    pub fn camera_pose(self) -> CameraPose {
        match self {
            PageKind::Normal => CameraPose::default(),
            PageKind::NotFound => CameraPose {
                y_offset: CAMERA_404_Y_OFFSET,
                z_offset: CAMERA_404_Z_OFFSET,
                tilt_offset: CAMERA_404_TILT_OFFSET,
            },
        }
    }
}

/// Per-frame environment sampled from the browser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub now_ms: f64,
    pub device_pixel_ratio: f64,
    pub prefers_dark: bool,
}

/// Everything the three passes need for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameParams {
    pub time_sec: f32,
    pub light_delta_sec: f32,
    pub light_decay: f32,
    pub night: f32,
    pub ambient: f32,
    pub pose: CameraPose,
    pub logo_fade: f32,
    pub logo_rect: SkyRect,
    pub ripples: [[f32; 4]; MAX_RIPPLES],
    pub ripple_count: u32,
    pub splats: Vec<LightSplat>,
    pub noise_scale: f32,
    pub quality: QualityTier,
    /// Set on the frame the tier changed; the renderer must rebuild.
    pub quality_changed: bool,
    /// Frames counted over the last report interval, once per interval.
    pub fps: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct SceneState {
    quality: QualityTier,
    theme_mode: ThemeMode,
    page: PageKind,
    auto_quality: Option<AutoQuality>,
    fps: FpsCounter,
    night: Tween<f32>,
    camera: Tween<Vec3>,
    logo: DelayedFade,
    logo_rect: SkyRect,
    ripples: RippleField,
    splats: SplatQueue,
    decay: LightDecay,
    last_light_ms: Option<f64>,
}

impl SceneState {
    pub fn new(config: &PageConfig, theme_mode: ThemeMode, prefers_dark: bool, page: PageKind) -> Self {
        let auto_quality = config
            .auto_quality
            .then(|| AutoQuality::new(config.auto_quality_config));
        // A direct load of a special page still eases in from the resting pose.
        let mut camera = Tween::settled(CameraPose::default().to_vec3(), CAMERA_404_DURATION_MS);
        camera.retarget(page.camera_pose().to_vec3());
        Self {
            quality: config.initial_quality,
            theme_mode,
            page,
            auto_quality,
            fps: FpsCounter::default(),
            night: Tween::settled(theme_mode.blend_target(prefers_dark), THEME_FADE_DURATION_MS),
            camera,
            logo: DelayedFade::new(LOGO_FADE_DELAY_MS, LOGO_FADE_DURATION_MS, LOGO_FADE_TARGET),
            logo_rect: SkyRect {
                center: Vec2::from_array(LOGO_DEFAULT_CENTER),
                size: Vec2::new(LOGO_BASE_SIZE, LOGO_BASE_SIZE / LOGO_DEFAULT_ASPECT),
            },
            ripples: RippleField::new(),
            splats: SplatQueue::new(),
            decay: LightDecay::default(),
            last_light_ms: None,
        }
    }

    pub fn quality(&self) -> QualityTier {
        self.quality
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    /// Starts the camera transition for a new page; it begins on the next frame.
    pub fn set_page(&mut self, page: PageKind) {
        self.page = page;
        self.camera.retarget(page.camera_pose().to_vec3());
    }

    /// Current camera offsets, as last evaluated.
    pub fn pose(&self) -> CameraPose {
        CameraPose::from_vec3(self.camera.value())
    }

    pub fn logo_rect(&self) -> SkyRect {
        self.logo_rect
    }

    pub fn set_logo_rect(&mut self, rect: SkyRect) {
        self.logo_rect = rect;
    }

    /// Resets the reflected size from the loaded image's aspect ratio.
    pub fn set_logo_aspect(&mut self, aspect: f32) {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            LOGO_DEFAULT_ASPECT
        };
        self.logo_rect.size = Vec2::new(LOGO_BASE_SIZE, LOGO_BASE_SIZE / aspect);
    }

    pub fn ripples(&self) -> &RippleField {
        &self.ripples
    }

    pub fn pending_splats(&self) -> usize {
        self.splats.len()
    }

    pub fn decay(&self) -> &LightDecay {
        &self.decay
    }

    /// Manual tier switch. Returns `true` when the tier actually changed.
    pub fn set_quality(&mut self, tier: QualityTier, now_ms: f64) -> bool {
        if tier == self.quality {
            return false;
        }
        self.quality = tier;
        if let Some(aq) = &mut self.auto_quality {
            aq.note_change(now_ms);
        }
        true
    }

    /// Spawns a ripple where a screen position meets the water.
    pub fn add_ripple_at(&mut self, screen: Vec2, aspect: f32, now_ms: f64) -> Option<Ripple> {
        let time_sec = (now_ms * 0.001) as f32;
        let hit = screen_to_water_hit(screen, aspect, time_sec, self.pose())?;
        let ripple = Ripple {
            origin: hit,
            birth_time: time_sec,
            amplitude: RIPPLE_CLICK_AMPLITUDE,
        };
        self.ripples.push(ripple);
        Some(ripple)
    }

    pub fn push_ripple(&mut self, ripple: Ripple) {
        self.ripples.push(ripple);
    }

    pub fn queue_splats<I: IntoIterator<Item = LightSplat>>(&mut self, splats: I) {
        self.splats.extend(splats);
    }

    pub fn advance(&mut self, input: &FrameInput) -> FrameParams {
        let now = input.now_ms;

        let fps = self.fps.tick(now);
        let mut quality_changed = false;
        if let (Some(fps), Some(aq)) = (fps, self.auto_quality.as_mut()) {
            if let Some(tier) = aq.observe(now, fps as f32, self.quality) {
                log::info!("[quality] {} -> {} (fps {})", self.quality, tier, fps);
                self.quality = tier;
                quality_changed = true;
            }
        }

        let last = *self.last_light_ms.get_or_insert(now);
        let light_delta_sec = ((now - last) * 0.001).max(0.0) as f32;
        self.last_light_ms = Some(now);

        self.night
            .retarget_at(self.theme_mode.blend_target(input.prefers_dark), now);
        let night = self.night.evaluate(now);
        let pose = CameraPose::from_vec3(self.camera.evaluate(now));
        let (ripples, ripple_count) = self.ripples.packed();

        FrameParams {
            time_sec: (now * 0.001) as f32,
            light_delta_sec,
            light_decay: self.decay.factor(light_delta_sec),
            night,
            ambient: AMBIENT_DAY + (AMBIENT_NIGHT - AMBIENT_DAY) * night,
            pose,
            logo_fade: self.logo.evaluate(now),
            logo_rect: self.logo_rect,
            ripples,
            ripple_count,
            splats: self.splats.take(),
            noise_scale: if input.device_pixel_ratio < LOW_DPI_THRESHOLD {
                LOW_DPI_NOISE_SCALE
            } else {
                1.0
            },
            quality: self.quality,
            quality_changed,
            fps,
        }
    }
}
