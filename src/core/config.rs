use super::auto_quality::AutoQualityConfig;
use super::quality::QualityTier;

/// Runtime options read from the page URL query string.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    /// `?fps` shows the FPS / resolution / tier overlay.
    pub show_fps: bool,
    /// `?quality=<tier>` pins the starting tier.
    pub initial_quality: QualityTier,
    /// `?autoquality=off` disables the adaptive controller.
    pub auto_quality: bool,
    pub auto_quality_config: AutoQualityConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            show_fps: false,
            initial_quality: QualityTier::default(),
            auto_quality: true,
            auto_quality_config: AutoQualityConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parses `location.search` (with or without the leading `?`).
    pub fn from_query(search: &str) -> Self {
        let mut cfg = Self::default();
        let query = search.strip_prefix('?').unwrap_or(search);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "fps" => cfg.show_fps = true,
                "quality" => match value.parse::<QualityTier>() {
                    Ok(tier) => cfg.initial_quality = tier,
                    Err(e) => log::warn!("[config] {}", e),
                },
                "autoquality" => {
                    cfg.auto_quality = !matches!(value, "off" | "0" | "false");
                }
                _ => {}
            }
        }
        cfg
    }
}
