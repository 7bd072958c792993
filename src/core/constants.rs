// Shared scene tuning constants used by the renderer and the input mapping.
// Everything here must agree with the literals in `shaders/ocean.wgsl`.

// Camera
pub const CAMERA_BASE_TILT: f32 = 0.14; // radians about +X, positive looks up
pub const CAMERA_FOCAL: f32 = 1.5; // z component of the unnormalised view ray
pub const CAMERA_HEIGHT: f32 = 1.5;
pub const CAMERA_Z: f32 = 1.0;
pub const CAMERA_DRIFT_PER_SEC: f32 = 0.2; // camera slides along +X over time

// Not-found page pose
pub const CAMERA_404_Y_OFFSET: f32 = 1.0;
pub const CAMERA_404_Z_OFFSET: f32 = -8.0;
pub const CAMERA_404_TILT_OFFSET: f32 = -0.7;
pub const CAMERA_404_DURATION_MS: f64 = 3000.0;

// Ripples
pub const MAX_RIPPLES: usize = 10;
pub const RIPPLE_LIFETIME_SEC: f32 = 12.0;
pub const RIPPLE_CLICK_AMPLITUDE: f32 = 0.18;
pub const RIPPLE_FREQUENCY: f32 = 4.0;
pub const RIPPLE_SPEED: f32 = 3.2;
pub const RIPPLE_DECAY: f32 = 0.45;
pub const RIPPLE_SPATIAL_DECAY: f32 = 0.16;
pub const RIPPLE_FADE_IN_SEC: f32 = 0.3;

// Light paint
pub const LIGHT_INTENSITY: f32 = 1.0;
pub const PAINT_INTENSITY: f32 = LIGHT_INTENSITY / 3.0;
pub const LIGHT_FADE_DURATION_SEC: f32 = 240.0;
pub const LIGHT_CUTOFF: f32 = 1.0 / 255.0;
pub const LIGHT_QUANTIZATION_BIAS: f32 = 0.004;
pub const SPLATS_PER_SAMPLE: usize = 10;
pub const MAX_PENDING_SPLATS: usize = 600;
pub const JACOBIAN_DET_EPSILON: f32 = 1e-12;

// Theme / logo animation
pub const THEME_FADE_DURATION_MS: f64 = 900.0;
pub const LOGO_FADE_DELAY_MS: f64 = 150.0;
pub const LOGO_FADE_DURATION_MS: f64 = 900.0;
pub const LOGO_FADE_TARGET: f32 = 0.85;
pub const LOGO_BASE_SIZE: f32 = 0.18;
pub const LOGO_DEFAULT_ASPECT: f32 = 1.32;
pub const LOGO_DEFAULT_CENTER: [f32; 2] = [0.53, 0.72];

// Ambient sky light: day 1.0, night 0.28
pub const AMBIENT_DAY: f32 = 1.0;
pub const AMBIENT_NIGHT: f32 = 0.28;

// Display density
pub const LOW_DPI_THRESHOLD: f64 = 1.5;
pub const LOW_DPI_NOISE_SCALE: f32 = 1.7;

// Adaptive quality defaults
pub const AUTO_QUALITY_FPS_LOW: f32 = 28.0;
pub const AUTO_QUALITY_FPS_HIGH: f32 = 55.0;
pub const AUTO_QUALITY_SAMPLE_WINDOW_MS: f64 = 2000.0;
pub const AUTO_QUALITY_COOLDOWN_MS: f64 = 4000.0;
pub const AUTO_QUALITY_MIN_SAMPLES: usize = 3;
pub const FPS_REPORT_INTERVAL_MS: f64 = 1000.0;

// Corner text morph
pub const MORPH_DURATION_MS: f64 = 850.0;
pub const TEXT_REVEAL_DURATION_MS: f64 = 1000.0;
pub const MORPH_BLUR_SCALE_PX: f32 = 8.0;
pub const MORPH_BLUR_MAX_PX: f32 = 100.0;
pub const MORPH_OPACITY_EXPONENT: f32 = 0.4;
pub const MORPH_MIN_FRACTION: f32 = 0.0001;

// Cursor ripple trail (DOM)
pub const TRAIL_INTERVAL_MS: f64 = 100.0;
pub const TRAIL_MAX_LIVE: usize = 9;
pub const TRAIL_LIFETIME_MS: i32 = 3600;
pub const TRAIL_RIPPLE_SIZE_PX: u32 = 100;
