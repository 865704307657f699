use cone_grid::config::ModeKind;
use cone_grid::render::{draw_scene, Canvas};
use cone_grid::{ConfigError, PanelChange, Scene, SceneConfig};
use glam::Vec3;

const STEP: f32 = 1.0 / 60.0;

fn scene(mode: ModeKind, columns: i64, rows: i64) -> Scene {
    let mut config = SceneConfig {
        mode,
        ..SceneConfig::default()
    };
    config.grid.columns = columns;
    config.grid.rows = rows;
    Scene::build(&config, 16.0 / 9.0).unwrap()
}

#[cfg(test)]
mod build_tests {
    use super::*;

    #[test]
    fn test_holes_and_tiles_agree() {
        let scene = scene(ModeKind::Staggered, 12, 5);
        assert_eq!(scene.tiles().len(), 60);
        assert_eq!(scene.outline().holes.len(), 60);
        assert_eq!(scene.floor().curve_segments, 32);
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let mut config = SceneConfig::default();
        config.grid.columns = -3;
        assert!(matches!(
            Scene::build(&config, 1.0),
            Err(ConfigError::NegativeDimensions { .. })
        ));

        let mut config = SceneConfig::default();
        config.floor.half_size = 0.0;
        assert!(matches!(Scene::build(&config, 1.0), Err(ConfigError::InvalidFloorSize(_))));
    }

    #[test]
    fn test_json_config_selects_mode() {
        let config: SceneConfig = serde_json::from_str(
            r#"{ "mode": "wave", "wave": { "amplitude": 3.0 }, "grid": { "columns": 2, "rows": 2 } }"#,
        )
        .unwrap();
        let scene = Scene::build(&config, 1.0).unwrap();

        let state = scene.wave_state().unwrap();
        assert_eq!(state.amplitude, 3.0);
        assert_eq!(state.frequency, 4.0);
        assert_eq!(scene.tiles().len(), 4);
    }
}

#[cfg(test)]
mod mode_tests {
    use super::*;

    #[test]
    fn test_wave_mode_never_flips() {
        let mut scene = scene(ModeKind::Wave, 12, 5);
        for _ in 0..600 {
            assert!(scene.tick(STEP).is_empty());
        }
        assert!(!scene.rig().state().flipped);
        assert!((scene.wave_state().unwrap().angle + 120.0).abs() < 1e-2);
    }

    #[test]
    fn test_staggered_mode_flips_each_cycle() {
        let mut scene = scene(ModeKind::Staggered, 2, 2);
        // 3 * 0.03 + 1.3 = 1.39s per cycle
        for _ in 0..180 {
            scene.tick(STEP);
        }
        assert_eq!(scene.cycles(), 2);
        assert!(!scene.rig().state().flipped);
    }

    #[test]
    fn test_empty_staggered_scene_idles() {
        let mut scene = scene(ModeKind::Staggered, 0, 5);
        for _ in 0..300 {
            assert!(scene.tick(STEP).is_empty());
        }
        assert_eq!(scene.cycles(), 0);
        assert!(!scene.rig().state().flipped);
    }

    #[test]
    fn test_panel_changes_reach_scene() {
        let mut scene = scene(ModeKind::Wave, 3, 3);
        scene.apply(PanelChange::LightTarget(Vec3::new(10.0, -20.0, 300.0)));
        scene.apply(PanelChange::Frequency(0.0));

        assert_eq!(scene.light().target(), Vec3::new(10.0, -20.0, 100.0));
        let angle = scene.wave_state().unwrap().angle;
        scene.tick(STEP);
        assert_eq!(scene.wave_state().unwrap().angle, angle);
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;

    #[test]
    fn test_colour_change_tints_every_surface() {
        let mut scene = scene(ModeKind::Staggered, 1, 1);
        scene.apply(PanelChange::Color([0.0, 0.0, 1.0]));
        scene.tick(0.3);

        let mut canvas = Canvas::new(32, 32);
        draw_scene(&scene, &mut canvas);

        assert!(canvas
            .pixels()
            .chunks_exact(4)
            .all(|p| p[0] == 0 && p[1] == 0));
    }

    #[test]
    fn test_teardown_then_draw_shows_only_floor() {
        let mut scene = scene(ModeKind::Staggered, 12, 5);
        scene.tick(0.5);
        scene.teardown();

        let mut canvas = Canvas::new(32, 18);
        draw_scene(&scene, &mut canvas);
        assert!(scene.tiles().is_empty());
        assert!(canvas.pixels().chunks_exact(4).all(|p| p[3] == 255));
    }
}
