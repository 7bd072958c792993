use super::constants::{
    AUTO_QUALITY_COOLDOWN_MS, AUTO_QUALITY_FPS_HIGH, AUTO_QUALITY_FPS_LOW,
    AUTO_QUALITY_MIN_SAMPLES, AUTO_QUALITY_SAMPLE_WINDOW_MS, FPS_REPORT_INTERVAL_MS,
};
use super::quality::QualityTier;
use std::collections::VecDeque;

/// Tunables for the adaptive quality controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoQualityConfig {
    pub fps_low: f32,
    pub fps_high: f32,
    pub sample_window_ms: f64,
    pub cooldown_ms: f64,
    pub min_samples: usize,
}

impl Default for AutoQualityConfig {
    fn default() -> Self {
        Self {
            fps_low: AUTO_QUALITY_FPS_LOW,
            fps_high: AUTO_QUALITY_FPS_HIGH,
            sample_window_ms: AUTO_QUALITY_SAMPLE_WINDOW_MS,
            cooldown_ms: AUTO_QUALITY_COOLDOWN_MS,
            min_samples: AUTO_QUALITY_MIN_SAMPLES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsSample {
    pub time_ms: f64,
    pub fps: f32,
}

/// Steps the quality tier up or down from a rolling FPS average.
#[derive(Clone, Debug)]
pub struct AutoQuality {
    pub config: AutoQualityConfig,
    history: VecDeque<FpsSample>,
    last_change_ms: f64,
}

impl AutoQuality {
    pub fn new(config: AutoQualityConfig) -> Self {
        Self {
            config,
            history: VecDeque::new(),
            last_change_ms: 0.0,
        }
    }

    pub fn samples(&self) -> usize {
        self.history.len()
    }

    pub fn last_change_ms(&self) -> f64 {
        self.last_change_ms
    }

    pub fn average_fps(&self) -> Option<f32> {
        if self.history.is_empty() {
            return None;
        }
        let sum: f32 = self.history.iter().map(|s| s.fps).sum();
        Some(sum / self.history.len() as f32)
    }

    /// Records a tier change made elsewhere (e.g. a manual override).
    pub fn note_change(&mut self, now_ms: f64) {
        self.history.clear();
        self.last_change_ms = now_ms;
    }

    /// Feeds one FPS sample; returns the new tier when a step is due.
    pub fn observe(&mut self, now_ms: f64, fps: f32, current: QualityTier) -> Option<QualityTier> {
        self.history.push_back(FpsSample { time_ms: now_ms, fps });
        let cutoff = now_ms - self.config.sample_window_ms;
        while self.history.front().is_some_and(|s| s.time_ms < cutoff) {
            self.history.pop_front();
        }

        if self.history.len() < self.config.min_samples {
            return None;
        }
        if now_ms - self.last_change_ms < self.config.cooldown_ms {
            return None;
        }

        let avg = self.average_fps()?;
        let next = if avg < self.config.fps_low {
            current.lower()
        } else if avg > self.config.fps_high {
            current.higher()
        } else {
            None
        };
        if let Some(tier) = next {
            self.note_change(now_ms);
            return Some(tier);
        }
        None
    }
}

impl Default for AutoQuality {
    fn default() -> Self {
        Self::new(AutoQualityConfig::default())
    }
}

/// Counts frames and reports the rate once per interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    last_report_ms: f64,
}

impl FpsCounter {
    pub fn tick(&mut self, now_ms: f64) -> Option<u32> {
        self.frames += 1;
        if now_ms - self.last_report_ms < FPS_REPORT_INTERVAL_MS {
            return None;
        }
        let fps = self.frames;
        self.frames = 0;
        self.last_report_ms = now_ms;
        Some(fps)
    }
}

/// Text of the `?fps` diagnostics overlay.
pub fn fps_report(fps: u32, width: u32, height: u32, tier: QualityTier) -> String {
    format!("FPS: {} | {}x{} | Quality: {}", fps, width, height, tier)
}
