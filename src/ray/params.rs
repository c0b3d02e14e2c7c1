use super::constants::*;

/// Runtime knobs for one effect instance.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectParams {
    /// Seeds the noise field and particle jitter.
    pub seed: u64,
    /// Animation time advanced per wall-clock second.
    pub time_rate: f32,
    /// Scroll easing per 60 Hz frame.
    pub scroll_smoothing: f32,
    /// Smoothed scroll pixels to noise-space scroll factor.
    pub scroll_scale: f32,
    pub glow_time_offset: f32,
    pub glow_scroll_scale: f32,
    /// Longest frame delta honoured; larger gaps (tab switches) are clamped.
    pub max_frame_dt: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            seed: 42,
            time_rate: TIME_STEP_PER_FRAME * REFERENCE_FPS,
            scroll_smoothing: SCROLL_SMOOTHING_PER_FRAME,
            scroll_scale: SCROLL_FACTOR_SCALE,
            glow_time_offset: GLOW_TIME_OFFSET,
            glow_scroll_scale: GLOW_SCROLL_SCALE,
            max_frame_dt: MAX_FRAME_DT_SEC,
        }
    }
}

impl EffectParams {
    /// Apply host-supplied overrides (`seed`, `time-rate`, `scroll-scale`).
    ///
    /// `lookup` returns the raw attribute text for a key. Values that fail to
    /// parse or are out of range are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("seed") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(_) => log::warn!("[params] ignoring seed={:?}", raw),
            }
        }
        if let Some(raw) = lookup("time-rate") {
            match raw.trim().parse::<f32>() {
                Ok(v) if v.is_finite() && v >= 0.0 => self.time_rate = v,
                _ => log::warn!("[params] ignoring time-rate={:?}", raw),
            }
        }
        if let Some(raw) = lookup("scroll-scale") {
            match raw.trim().parse::<f32>() {
                Ok(v) if v.is_finite() => self.scroll_scale = v,
                _ => log::warn!("[params] ignoring scroll-scale={:?}", raw),
            }
        }
        self
    }
}
