//! Exponential smoothing filters
//!
//! Each filter moves a value toward its target by
//! `current += (target - current) * factor`, where the factor is derived from
//! the elapsed time so the result does not depend on the frame rate.

/// Frame rate the per-frame blend factors are expressed against
pub const REFERENCE_HZ: f64 = 60.0;

/// First-order exponential filter with an explicit time constant (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpFilter {
    pub time_constant: f64,
}

impl ExpFilter {
    pub const fn new(time_constant: f64) -> Self {
        Self { time_constant }
    }

    /// Builds a filter equivalent to blending by `per_frame` once per
    /// reference frame, e.g. `0.05` at 60 Hz
    pub fn from_per_frame(per_frame: f64) -> Self {
        let per_frame = per_frame.clamp(0.0, 1.0);
        if per_frame >= 1.0 {
            return Self::new(0.0);
        }
        if per_frame <= 0.0 {
            return Self::new(f64::INFINITY);
        }
        Self::new(-1.0 / (REFERENCE_HZ * (1.0 - per_frame).ln()))
    }

    /// Blend factor in `[0, 1]` for a frame of `delta` seconds
    pub fn factor(&self, delta: f64) -> f64 {
        if delta <= 0.0 {
            return 0.0;
        }
        if self.time_constant <= 0.0 {
            return 1.0;
        }
        1.0 - (-delta / self.time_constant).exp()
    }

    pub fn step(&self, current: f64, target: f64, delta: f64) -> f64 {
        current + (target - current) * self.factor(delta)
    }
}
