use std::fmt;
use std::str::FromStr;

/// Rendering cost tier. Ordered from cheapest to most expensive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum QualityTier {
    Low,
    Medium,
    #[default]
    High,
}

/// Immutable per-tier render parameters.
///
/// `scale` multiplies the CSS-pixel × DPR backing size of the canvas;
/// `low_dpi_scale` is used instead on displays below the low-DPI threshold.
/// The iteration counts are baked into the ocean shader as constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityProfile {
    pub scale: f32,
    pub low_dpi_scale: f32,
    pub raymarch_steps: u32,
    pub wave_iter_raymarch: u32,
    pub wave_iter_normal: u32,
    pub fbm_octaves: u32,
}

pub const QUALITY_TIERS: [QualityTier; 3] =
    [QualityTier::Low, QualityTier::Medium, QualityTier::High];

const LOW: QualityProfile = QualityProfile {
    scale: 0.25,
    low_dpi_scale: 0.425,
    raymarch_steps: 20,
    wave_iter_raymarch: 4,
    wave_iter_normal: 16,
    fbm_octaves: 2,
};

const MEDIUM: QualityProfile = QualityProfile {
    scale: 0.35,
    low_dpi_scale: 0.595,
    raymarch_steps: 24,
    wave_iter_raymarch: 6,
    wave_iter_normal: 16,
    fbm_octaves: 3,
};

const HIGH: QualityProfile = QualityProfile {
    scale: 0.4,
    low_dpi_scale: 0.68,
    raymarch_steps: 32,
    wave_iter_raymarch: 8,
    wave_iter_normal: 16,
    fbm_octaves: 4,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quality tier `{0}` (expected low, medium or high)")]
pub struct ParseTierError(pub String);

impl QualityTier {
    pub fn profile(self) -> &'static QualityProfile {
        match self {
            QualityTier::Low => &LOW,
            QualityTier::Medium => &MEDIUM,
            QualityTier::High => &HIGH,
        }
    }

    pub fn index(self) -> usize {
        match self {
            QualityTier::Low => 0,
            QualityTier::Medium => 1,
            QualityTier::High => 2,
        }
    }

    /// One tier cheaper, or `None` at the floor.
    pub fn lower(self) -> Option<QualityTier> {
        self.index().checked_sub(1).map(|i| QUALITY_TIERS[i])
    }

    /// One tier more expensive, or `None` at the ceiling.
    pub fn higher(self) -> Option<QualityTier> {
        QUALITY_TIERS.get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl QualityProfile {
    /// Backing-store scale for a display with the given device pixel ratio.
    pub fn render_scale(&self, device_pixel_ratio: f64) -> f32 {
        if device_pixel_ratio < super::constants::LOW_DPI_THRESHOLD {
            self.low_dpi_scale
        } else {
            self.scale
        }
    }
}

/// Canvas backing size in device pixels for a CSS viewport, never zero.
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64, tier: QualityTier) -> (u32, u32) {
    let scale = tier.profile().render_scale(dpr) as f64;
    let w = (css_width * dpr * scale).floor().max(1.0) as u32;
    let h = (css_height * dpr * scale).floor().max(1.0) as u32;
    (w, h)
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityTier::Low),
            "medium" => Ok(QualityTier::Medium),
            "high" => Ok(QualityTier::High),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}
