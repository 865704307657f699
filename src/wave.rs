//! Continuous radial wave across the tile grid.
//!
//! The phase of each tile comes from its distance to a fixed reference
//! corner at `(-rows, -columns)` in swapped `(row, column)` coordinates, so
//! the wavefront rolls in from that corner rather than from the grid centre.
use serde::{Deserialize, Serialize};

use crate::layout::GridSpec;
use crate::math::{distance, remap};
use crate::tile_grid::TileGrid;

/// Upper end of the nominal distance range fed into the phase remap
const DISTANCE_RANGE_MAX: f32 = 100.0;
/// Lower end of the phase offset range
const OFFSET_RANGE_MIN: f32 = -140.0;
/// Lowest height the wave pushes a tile to
const TROUGH_HEIGHT: f32 = -4.0;
/// Divisor turning `frequency` into the per-tick phase step
const TICKS_PER_FREQUENCY_UNIT: f64 = 20.0;

/// Shared wave parameters; `angle` is the wave's frame-count clock and is
/// kept in `f64` so it keeps stepping however long the scene runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveState {
    pub angle: f64,
    pub amplitude: f32,
    pub wavelength: f32,
    pub frequency: f32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            amplitude: 2.0,
            wavelength: 10.0,
            frequency: 4.0,
        }
    }
}

impl WaveState {
    /// Phase step applied per tick
    pub fn step(&self) -> f64 {
        f64::from(self.frequency) / TICKS_PER_FREQUENCY_UNIT
    }

    /// Advance the wave clock by one tick
    pub fn advance(&mut self) {
        self.angle -= self.step();
    }
}

/// Height of tile `(column, row)` for the current wave state. Pure.
///
/// `wavelength == -100` collapses the distance range; `remap` then pins the
/// offset to `-140` for every tile.
pub fn height(spec: &GridSpec, column: usize, row: usize, state: &WaveState) -> f32 {
    let dist = distance(
        row as f32,
        column as f32,
        -(spec.rows as f32),
        -(spec.columns as f32),
    );
    let offset = remap(
        dist,
        -state.wavelength,
        DISTANCE_RANGE_MAX,
        OFFSET_RANGE_MIN,
        state.wavelength,
    );
    let angle = state.angle + f64::from(offset);

    remap(angle.sin() as f32, -1.0, 1.0, TROUGH_HEIGHT, state.amplitude)
}

/// One frame of wave mode: every tile takes its height, then the clock advances once
pub fn apply(state: &mut WaveState, tiles: &mut TileGrid) {
    let spec = *tiles.spec();
    for (i, j) in spec.cells() {
        let y = height(&spec, i, j, state);
        tiles.set_height(i, j, y);
        if let Some(tile) = tiles.get_mut(i, j) {
            tile.shadow_visible = true;
        }
    }
    state.advance();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> WaveState {
        WaveState {
            angle: 0.0,
            amplitude: 2.0,
            wavelength: 10.0,
            frequency: 4.0,
        }
    }

    #[test]
    fn test_height_is_deterministic() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let state = sample_state();
        let a = height(&spec, 0, 0, &state);
        let b = height(&spec, 0, 0, &state);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_height_matches_formula() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let state = sample_state();

        // dist from (0, 0) to (-5, -12)
        let dist = 13.0_f32;
        let offset = (dist + 10.0) / 110.0 * 150.0 - 140.0;
        let expected = (offset.sin() + 1.0) / 2.0 * 6.0 - 4.0;

        assert!((height(&spec, 0, 0, &state) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_height_within_range() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let mut state = sample_state();
        for _ in 0..50 {
            for (i, j) in spec.cells() {
                let h = height(&spec, i, j, &state);
                assert!(h >= -4.0 - 1e-4 && h <= 2.0 + 1e-4);
            }
            state.advance();
        }
    }

    #[test]
    fn test_height_does_not_touch_angle() {
        let spec = GridSpec::new(3, 3, 1.0, 0.4).unwrap();
        let state = sample_state();
        for (i, j) in spec.cells() {
            height(&spec, i, j, &state);
        }
        assert_eq!(state.angle, 0.0);
    }

    #[test]
    fn test_advance_steps_by_frequency_over_twenty() {
        let mut state = sample_state();
        state.advance();
        assert_eq!(state.angle, -0.2);
    }

    #[test]
    fn test_advance_after_days_of_frames() {
        // Past 2^23 an f32 angle no longer moves by 0.2
        let mut state = WaveState {
            angle: -8_388_608.0,
            ..sample_state()
        };
        let spec = GridSpec::new(2, 2, 1.0, 0.4).unwrap();
        let before = height(&spec, 1, 1, &state);

        state.advance();
        assert!((state.angle + 8_388_608.2).abs() < 1e-6);
        assert_ne!(height(&spec, 1, 1, &state), before);
    }

    #[test]
    fn test_degenerate_wavelength_is_finite() {
        let spec = GridSpec::new(4, 4, 1.0, 0.4).unwrap();
        let state = WaveState {
            wavelength: -100.0,
            ..sample_state()
        };
        for (i, j) in spec.cells() {
            assert!(height(&spec, i, j, &state).is_finite());
        }
    }
}
