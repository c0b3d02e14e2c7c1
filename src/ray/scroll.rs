/// Page scroll offset as seen by the effect.
///
/// `target` jumps with every scroll event; `smoothed` eases toward it once
/// per frame so the ray drifts rather than snaps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub target: f32,
    pub smoothed: f32,
}

impl ScrollState {
    pub fn set_target(&mut self, offset: f32) {
        self.target = offset;
    }

    /// Move `smoothed` toward `target` by `alpha ∈ [0, 1]`.
    pub fn step(&mut self, alpha: f32) {
        self.smoothed += (self.target - self.smoothed) * alpha.clamp(0.0, 1.0);
    }
}

/// Per-frame blend factor for a rate tuned at `reference_fps`, rescaled to a
/// frame of `dt_sec`.
#[inline]
pub fn frame_alpha(rate_per_frame: f32, dt_sec: f32, reference_fps: f32) -> f32 {
    1.0 - (1.0 - rate_per_frame).powf(dt_sec * reference_fps)
}
