/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// A degenerate input range (`in_min == in_max`) maps everything to `out_min`.
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    (value - in_min) / span * (out_max - out_min) + out_min
}

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

pub fn radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
