use cone_grid::layout::{position, GridSpec, ShapeOutline};
use cone_grid::tile_grid::TileGrid;
use glam::Vec2;

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_doubled_spacing_positions() {
        let spec = GridSpec::new(2, 2, 1.5, 0.5).unwrap();

        let expected = [((0, 0), (0.0, 0.0)), ((1, 0), (-3.0, 0.0)), ((0, 1), (0.0, -3.0)), ((1, 1), (-3.0, -3.0))];
        for ((i, j), (x, z)) in expected {
            let p = position(&spec, i, j, 7.0);
            assert!((p.x - x).abs() < 1e-6, "x of ({}, {})", i, j);
            assert!((p.z - z).abs() < 1e-6, "z of ({}, {})", i, j);
            assert_eq!(p.y, 7.0);
            assert_eq!((p.column, p.row), (i, j));
        }
    }

    #[test]
    fn test_position_is_deterministic() {
        let spec = GridSpec::new(12, 5, 1.4, 0.6).unwrap();
        assert_eq!(position(&spec, 11, 4, 0.0), position(&spec, 11, 4, 0.0));
    }
}

#[cfg(test)]
mod outline_tests {
    use super::*;

    #[test]
    fn test_hole_count_matches_tiles() {
        for (columns, rows) in [(0, 0), (0, 3), (4, 0), (1, 1), (3, 7), (12, 5)] {
            let spec = GridSpec::new(columns, rows, 1.4, 0.6).unwrap();
            let outline = ShapeOutline::build(&spec, 100.0);
            let tiles = TileGrid::new(spec, 4.0).unwrap();

            assert_eq!(outline.holes.len(), (columns * rows) as usize, "{}x{}", columns, rows);
            assert_eq!(outline.holes.len(), tiles.len());
        }
    }

    #[test]
    fn test_hole_k_sits_under_tile_k() {
        let spec = GridSpec::new(4, 3, 1.4, 0.6).unwrap();
        let outline = ShapeOutline::build(&spec, 100.0);
        let tiles = TileGrid::new(spec, 4.0).unwrap();

        for (k, hole) in outline.holes.iter().enumerate() {
            let p = position(&spec, k / spec.rows, k % spec.rows, 0.0);
            assert!(hole.center.abs_diff_eq(Vec2::new(p.x, p.z), 1e-6), "hole {}", k);
            assert_eq!(hole.radius, 0.6);

            let tile = tiles.by_index(k).unwrap();
            assert_eq!((tile.position.x, tile.position.z), (p.x, p.z));
        }
    }

    #[test]
    fn test_degenerate_grid_keeps_boundary() {
        let spec = GridSpec::new(0, 5, 1.4, 0.6).unwrap();
        let outline = ShapeOutline::build(&spec, 100.0);

        assert!(outline.holes.is_empty());
        assert_eq!(outline.boundary.len(), 4);
        assert!(outline.contains(Vec2::ZERO));
    }

    #[test]
    fn test_floor_solid_between_holes() {
        let spec = GridSpec::new(2, 1, 1.4, 0.6).unwrap();
        let outline = ShapeOutline::build(&spec, 100.0);

        assert!(!outline.contains(Vec2::new(0.0, 0.0)));
        assert!(!outline.contains(Vec2::new(-2.8, 0.0)));
        assert!(outline.contains(Vec2::new(-1.4, 0.0)));
        assert!(!outline.contains(Vec2::new(150.0, 0.0)));
    }
}

#[cfg(test)]
mod config_error_tests {
    use super::*;
    use cone_grid::ConfigError;

    #[test]
    fn test_negative_dimensions_fail_fast() {
        assert!(matches!(
            GridSpec::new(-1, 5, 1.4, 0.6),
            Err(ConfigError::NegativeDimensions { columns: -1, rows: 5 })
        ));
    }

    #[test]
    fn test_non_positive_spacing_and_radius_rejected() {
        assert!(matches!(GridSpec::new(2, 2, 0.0, 0.6), Err(ConfigError::InvalidSpacing(_))));
        assert!(matches!(GridSpec::new(2, 2, 1.4, -0.1), Err(ConfigError::InvalidRadius(_))));
        assert!(matches!(GridSpec::new(2, 2, f32::NAN, 0.6), Err(ConfigError::InvalidSpacing(_))));
    }
}
