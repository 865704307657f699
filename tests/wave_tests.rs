use cone_grid::layout::GridSpec;
use cone_grid::tile_grid::TileGrid;
use cone_grid::wave::{self, WaveState};

fn stock_state() -> WaveState {
    WaveState {
        angle: 0.0,
        amplitude: 2.0,
        wavelength: 10.0,
        frequency: 4.0,
    }
}

#[cfg(test)]
mod wave_field_tests {
    use super::*;

    #[test]
    fn test_height_is_pure() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let state = stock_state();

        let first = wave::height(&spec, 0, 0, &state);
        for _ in 0..10 {
            assert_eq!(wave::height(&spec, 0, 0, &state).to_bits(), first.to_bits());
        }
        assert_eq!(state, stock_state(), "sampling must not advance the clock");
    }

    #[test]
    fn test_height_within_trough_and_amplitude() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let state = stock_state();

        for (i, j) in spec.cells() {
            let h = wave::height(&spec, i, j, &state);
            assert!((-4.0 - 1e-5..=2.0 + 1e-5).contains(&h), "tile ({}, {}) at {}", i, j, h);
        }
    }

    #[test]
    fn test_one_frame_advances_angle_once() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let mut tiles = TileGrid::new(spec, 4.0).unwrap();
        let mut state = stock_state();

        wave::apply(&mut state, &mut tiles);
        assert!((state.angle + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_twenty_frames_advance_four() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let mut tiles = TileGrid::new(spec, 4.0).unwrap();
        let mut state = stock_state();

        for _ in 0..20 {
            wave::apply(&mut state, &mut tiles);
        }
        assert!((state.angle + 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_apply_sets_every_tile_from_pre_advance_state() {
        let spec = GridSpec::new(3, 2, 1.4, 0.6).unwrap();
        let mut tiles = TileGrid::new(spec, 4.0).unwrap();
        let mut state = stock_state();
        let before = state;

        wave::apply(&mut state, &mut tiles);

        for (i, j) in spec.cells() {
            let tile = tiles.get(i, j).unwrap();
            assert_eq!(tile.height, wave::height(&spec, i, j, &before));
            assert!(tile.shadow_visible);
        }
    }

    #[test]
    fn test_degenerate_wavelength_is_finite() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        let state = WaveState {
            wavelength: -100.0,
            ..stock_state()
        };

        for (i, j) in spec.cells() {
            assert!(wave::height(&spec, i, j, &state).is_finite());
        }
    }
}
