use serde::{Deserialize, Serialize};

/// Easing curves mapping linear progress `[0, 1]` to an interpolation ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Fast start, long exponential deceleration
    ExpoOut,
    /// Overshoots the target and rings around it before settling
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// Ratio at `progress`; progress is clamped, the ratio may overshoot for elastic curves
    pub fn apply(&self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        if p >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => p,
            Easing::ExpoOut => 1.0 - 2f32.powf(-10.0 * p),
            Easing::ElasticOut { amplitude, period } => {
                let amplitude = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let shift = period / std::f32::consts::TAU * (1.0 / amplitude).asin();
                amplitude
                    * 2f32.powf(-10.0 * p)
                    * ((p - shift) * std::f32::consts::TAU / period).sin()
                    + 1.0
            }
        }
    }
}
